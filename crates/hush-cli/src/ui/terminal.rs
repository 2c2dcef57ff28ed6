//! Terminal surfaces: the in-place reveal and the masked composer.
//!
//! Both only ever draw projections produced by the disclosure engine. The
//! composer draws on stderr so `hush seal --compose > file` still works.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{MoveToColumn, MoveToPreviousLine};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers,
};
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};
use futures::StreamExt;
use zeroize::Zeroizing;

use hush_core::disclosure::{
    EditDescriptor, EditKind, InputMasker, RevealEngine, RevealFrame, RevealPhase, RevealSpeed,
};

use super::context::UiContext;
use super::theme::{styled, styles, PROMPT};

/// Play a reveal of `text` in place on stdout, `width` columns wide.
///
/// Ctrl-C cancels the reveal and leaves the last frame on screen.
pub async fn play_reveal(
    engine: &mut RevealEngine,
    text: &str,
    speed: RevealSpeed,
    width: usize,
) -> anyhow::Result<RevealPhase> {
    let mut out = io::stdout();
    let mut frames = engine.subscribe();
    // Rows above the cursor taken by the previous frame.
    let mut rows_up = 0;
    engine.start(text, speed);

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = frames.borrow_and_update().clone();
                draw_frame(&mut out, &frame, rows_up)?;
                rows_up = rows_spanned(&frame.text, width).saturating_sub(1);
                if frame.phase != RevealPhase::Revealing {
                    break;
                }
            }
            _ = &mut interrupt => {
                engine.cancel();
                tracing::debug!("reveal interrupted");
                break;
            }
        }
    }

    writeln!(out)?;
    out.flush()?;
    Ok(engine.phase())
}

/// Redraw over the previous frame, whose first row is `rows_up` rows above
/// the cursor.
fn draw_frame(out: &mut Stdout, frame: &RevealFrame, rows_up: u16) -> io::Result<()> {
    if rows_up > 0 {
        queue!(out, MoveToPreviousLine(rows_up))?;
    }
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::FromCursorDown),
        Print(&frame.text)
    )?;
    out.flush()
}

/// Terminal rows `text` occupies when wrapped at `width` columns.
fn rows_spanned(text: &str, width: usize) -> u16 {
    let width = width.max(1);
    let rows: usize = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    rows.min(u16::MAX as usize) as u16
}

/// Raw mode with bracketed paste; both are undone when dropped, including
/// on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stderr(), EnableBracketedPaste)?;
        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stderr(), DisableBracketedPaste);
        let _ = disable_raw_mode();
    }
}

/// What a key press does to the composition.
#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Edit(EditDescriptor),
    MoveTo(usize),
    Submit,
    Abort,
    Ignore,
}

/// Caret bookkeeping for the single-line composer, in characters.
#[derive(Debug, Default)]
struct Caret {
    position: usize,
}

impl Caret {
    fn action_for(&self, key: &KeyEvent, len: usize) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignore;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => KeyAction::Abort,
            KeyCode::Char('u') if ctrl => {
                KeyAction::Edit(EditDescriptor::delete_range(0, self.position))
            }
            KeyCode::Char(_) if ctrl => KeyAction::Ignore,
            KeyCode::Char(c) => KeyAction::Edit(EditDescriptor::insert(self.position, c)),
            KeyCode::Tab => KeyAction::Edit(EditDescriptor::insert(self.position, '\t')),
            KeyCode::Backspace => KeyAction::Edit(EditDescriptor::delete_backward(self.position)),
            KeyCode::Delete => KeyAction::Edit(EditDescriptor::delete_forward(self.position)),
            KeyCode::Left => KeyAction::MoveTo(self.position.saturating_sub(1)),
            KeyCode::Right => KeyAction::MoveTo((self.position + 1).min(len)),
            KeyCode::Home => KeyAction::MoveTo(0),
            KeyCode::End => KeyAction::MoveTo(len),
            KeyCode::Enter => KeyAction::Submit,
            KeyCode::Esc => KeyAction::Abort,
            _ => KeyAction::Ignore,
        }
    }

    /// A pasted block is inserted at the caret as one edit. Line breaks
    /// stay part of the message instead of submitting it.
    fn paste_action(&self, text: &str) -> KeyAction {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if text.is_empty() {
            return KeyAction::Ignore;
        }
        KeyAction::Edit(EditDescriptor::insert(self.position, text))
    }

    /// Move the caret to where `edit` leaves it in a buffer that held
    /// `len_before` characters.
    fn follow(&mut self, edit: &EditDescriptor, len_before: usize) {
        let start = edit.selection_start.min(edit.selection_end).min(len_before);
        let end = edit.selection_start.max(edit.selection_end).min(len_before);
        self.position = match &edit.kind {
            EditKind::Insert(text) => start + text.chars().count(),
            _ if start != end => start,
            EditKind::DeleteBackward => start.saturating_sub(1),
            EditKind::DeleteForward => start,
        };
    }
}

/// The part of `display` that fits in `width` columns around the caret,
/// and the caret column within it.
fn viewport(display: &str, caret: usize, width: usize) -> (String, usize) {
    let chars: Vec<char> = display.chars().collect();
    let width = width.max(1);
    let first = (caret + 1).saturating_sub(width);
    let shown: String = chars.iter().skip(first).take(width).collect();
    (shown, caret - first)
}

/// Run the masked composer until Enter (returns the message) or Esc /
/// Ctrl-C (returns `None` after wiping the buffer).
pub async fn compose(
    ctx: &UiContext,
    masker: &mut InputMasker,
) -> anyhow::Result<Option<Zeroizing<String>>> {
    let mut err = io::stderr();
    let prompt = format!("{} ", PROMPT.get(ctx.unicode));
    let prompt_width = prompt.chars().count();
    let styled_prompt = styled(&prompt, styles::dim(), ctx.color);
    let room = ctx.width.saturating_sub(prompt_width + 1);

    let _raw = RawModeGuard::enable()?;
    let mut events = EventStream::new();
    let mut view = masker.subscribe();
    let mut caret = Caret::default();

    let redraw = |err: &mut io::Stderr, display: &str, caret: usize| -> io::Result<()> {
        let (shown, column) = viewport(display, caret, room);
        queue!(
            err,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(&styled_prompt),
            Print(shown),
            MoveToColumn((prompt_width + column) as u16)
        )?;
        err.flush()
    };
    redraw(&mut err, &masker.display(), caret.position)?;

    let outcome = loop {
        tokio::select! {
            event = events.next() => {
                let key = match event {
                    Some(Ok(Event::Key(key))) => key,
                    Some(Ok(Event::Paste(text))) => {
                        if let KeyAction::Edit(edit) = caret.paste_action(&text) {
                            let before = masker.len();
                            masker.apply_edit(&edit);
                            caret.follow(&edit, before);
                            redraw(&mut err, &masker.display(), caret.position)?;
                        }
                        continue;
                    }
                    Some(Ok(Event::Resize(..))) => {
                        redraw(&mut err, &masker.display(), caret.position)?;
                        continue;
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                    None => break None,
                };
                match caret.action_for(&key, masker.len()) {
                    KeyAction::Edit(edit) => {
                        let before = masker.len();
                        masker.apply_edit(&edit);
                        caret.follow(&edit, before);
                    }
                    KeyAction::MoveTo(position) => caret.position = position,
                    KeyAction::Submit => break Some(masker.take_plaintext()),
                    KeyAction::Abort => break None,
                    KeyAction::Ignore => continue,
                }
                redraw(&mut err, &masker.display(), caret.position)?;
            }
            changed = view.changed() => {
                if changed.is_ok() {
                    let display = view.borrow_and_update().display.clone();
                    redraw(&mut err, &display, caret.position)?;
                }
            }
        }
    };

    if outcome.is_none() {
        masker.clear();
    }
    masker.cancel_idle_timer();
    queue!(err, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    err.flush()?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing_inserts_at_caret() {
        let caret = Caret { position: 2 };
        assert_eq!(
            caret.action_for(&press(KeyCode::Char('x')), 4),
            KeyAction::Edit(EditDescriptor::insert(2, 'x'))
        );
    }

    #[test]
    fn test_control_keys() {
        let caret = Caret { position: 3 };
        assert_eq!(caret.action_for(&ctrl('c'), 3), KeyAction::Abort);
        assert_eq!(caret.action_for(&press(KeyCode::Esc), 3), KeyAction::Abort);
        assert_eq!(caret.action_for(&press(KeyCode::Enter), 3), KeyAction::Submit);
        assert_eq!(caret.action_for(&ctrl('x'), 3), KeyAction::Ignore);
        assert_eq!(
            caret.action_for(&ctrl('u'), 3),
            KeyAction::Edit(EditDescriptor::delete_range(0, 3))
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        assert_eq!(Caret::default().action_for(&key, 0), KeyAction::Ignore);
    }

    #[test]
    fn test_caret_movement_is_clamped() {
        let caret = Caret { position: 0 };
        assert_eq!(caret.action_for(&press(KeyCode::Left), 5), KeyAction::MoveTo(0));
        let caret = Caret { position: 5 };
        assert_eq!(caret.action_for(&press(KeyCode::Right), 5), KeyAction::MoveTo(5));
        assert_eq!(caret.action_for(&press(KeyCode::Home), 5), KeyAction::MoveTo(0));
    }

    #[test]
    fn test_caret_follows_edits() {
        let mut caret = Caret { position: 2 };
        caret.follow(&EditDescriptor::insert(2, "abc"), 4);
        assert_eq!(caret.position, 5);

        caret.follow(&EditDescriptor::delete_backward(5), 7);
        assert_eq!(caret.position, 4);

        caret.follow(&EditDescriptor::delete_forward(4), 6);
        assert_eq!(caret.position, 4);

        caret.follow(&EditDescriptor::delete_backward(0), 5);
        assert_eq!(caret.position, 0);

        caret.follow(&EditDescriptor::delete_range(1, 3), 5);
        assert_eq!(caret.position, 1);

        caret.follow(&EditDescriptor::replace(1, 3, "xyz"), 5);
        assert_eq!(caret.position, 4);
    }

    #[test]
    fn test_paste_inserts_line_breaks_without_submitting() {
        let caret = Caret { position: 1 };
        assert_eq!(
            caret.paste_action("one\r\ntwo\rthree"),
            KeyAction::Edit(EditDescriptor::insert(1, "one\ntwo\nthree"))
        );
        assert_eq!(caret.paste_action(""), KeyAction::Ignore);
    }

    #[test]
    fn test_rows_spanned_counts_wrapped_lines() {
        assert_eq!(rows_spanned("", 10), 1);
        assert_eq!(rows_spanned("0123456789", 10), 1);
        assert_eq!(rows_spanned("0123456789a", 10), 2);
        assert_eq!(rows_spanned("ab\ncd\n", 10), 3);
        assert_eq!(rows_spanned(&"*".repeat(25), 10), 3);
        assert_eq!(rows_spanned("abc", 0), 3);
    }

    #[test]
    fn test_viewport_fits_short_text() {
        assert_eq!(viewport("*** brown", 9, 20), ("*** brown".to_string(), 9));
    }

    #[test]
    fn test_viewport_scrolls_to_caret() {
        let (shown, column) = viewport("**** **** word", 14, 6);
        assert_eq!(shown, " word");
        assert_eq!(column, 5);
    }
}
