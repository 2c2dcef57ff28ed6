//! Masked composition buffer.
//!
//! [`InputMasker`] owns the real message while it is typed. The composition
//! surface reports edits as [`EditDescriptor`]s; the masker applies them to
//! its buffer and republishes the display projection, which shows only the
//! word being typed. After the idle timeout that word is masked too.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use zeroize::{Zeroize, Zeroizing};

use crate::disclosure::mask::{project_display, Tail};
use crate::disclosure::timer::{publish_if_current, Stamped, TimerSlot};

/// Default delay before the trailing word is masked.
pub const DEFAULT_IDLE_MASK: Duration = Duration::from_secs(5);

/// What an edit does to the selected span.
#[derive(Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Replace the selection (possibly empty) with this text.
    Insert(String),
    /// Delete the selection, or the character after the caret.
    DeleteForward,
    /// Delete the selection, or the character before the caret.
    DeleteBackward,
}

impl fmt::Debug for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Typed text is part of the secret.
            Self::Insert(text) => f
                .debug_tuple("Insert")
                .field(&format_args!("<{} chars>", text.chars().count()))
                .finish(),
            Self::DeleteForward => f.write_str("DeleteForward"),
            Self::DeleteBackward => f.write_str("DeleteBackward"),
        }
    }
}

/// One edit reported by the composition surface.
///
/// Selection bounds are character offsets into the current message. An
/// empty selection (`start == end`) is a caret position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDescriptor {
    pub selection_start: usize,
    pub selection_end: usize,
    pub kind: EditKind,
}

impl EditDescriptor {
    /// Insert `text` at the caret.
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at, at, text)
    }

    /// Replace the span `start..end` with `text`.
    pub fn replace(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            selection_start: start,
            selection_end: end,
            kind: EditKind::Insert(text.into()),
        }
    }

    /// Backspace at the caret.
    pub fn delete_backward(at: usize) -> Self {
        Self {
            selection_start: at,
            selection_end: at,
            kind: EditKind::DeleteBackward,
        }
    }

    /// Forward delete at the caret.
    pub fn delete_forward(at: usize) -> Self {
        Self {
            selection_start: at,
            selection_end: at,
            kind: EditKind::DeleteForward,
        }
    }

    /// Delete the span `start..end`.
    pub fn delete_range(start: usize, end: usize) -> Self {
        Self {
            selection_start: start,
            selection_end: end,
            kind: EditKind::DeleteBackward,
        }
    }
}

/// The projection currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedView {
    pub display: String,
    /// Whether the idle timeout has masked the trailing word.
    pub tail_hidden: bool,
    epoch: u64,
}

impl Stamped for MaskedView {
    fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Owner of the real message during composition.
///
/// Must be used from within a Tokio runtime.
pub struct InputMasker {
    buffer: Zeroizing<String>,
    idle_after: Duration,
    epoch: u64,
    view: Arc<watch::Sender<MaskedView>>,
    idle: TimerSlot,
}

impl InputMasker {
    pub fn new(idle_after: Duration) -> Self {
        let (tx, _rx) = watch::channel(MaskedView {
            display: String::new(),
            tail_hidden: true,
            epoch: 0,
        });
        Self {
            buffer: Zeroizing::new(String::new()),
            idle_after,
            epoch: 0,
            view: Arc::new(tx),
            idle: TimerSlot::new("idle-mask"),
        }
    }

    /// Apply an edit and return the new display projection.
    ///
    /// Restarts the idle timer.
    pub fn apply_edit(&mut self, edit: &EditDescriptor) -> String {
        apply_to_buffer(&mut self.buffer, edit);

        let display = project_display(&self.buffer, Tail::Visible);
        let hidden = project_display(&self.buffer, Tail::Hidden);
        let epoch = self.next_epoch();
        self.view.send_modify(|view| {
            view.display = display.clone();
            view.tail_hidden = display == hidden;
            view.epoch = epoch;
        });

        if display == hidden {
            self.idle.cancel();
        } else {
            let view = Arc::clone(&self.view);
            let delay = self.idle_after;
            self.idle.arm(async move {
                tokio::time::sleep(delay).await;
                let fired = publish_if_current(&*view, epoch, |current| {
                    current.display = hidden;
                    current.tail_hidden = true;
                });
                if fired {
                    tracing::trace!("idle mask applied");
                }
            });
        }
        display
    }

    /// Stop the pending idle timer. The trailing word stays visible.
    pub fn cancel_idle_timer(&mut self) {
        self.idle.cancel();
        self.next_epoch();
    }

    /// Wipe the message and the display.
    pub fn clear(&mut self) {
        self.cancel_idle_timer();
        self.buffer.zeroize();
        let epoch = self.epoch;
        self.view.send_modify(|view| {
            view.display.clear();
            view.tail_hidden = true;
            view.epoch = epoch;
        });
    }

    /// The real message, for handing to the codec on submit.
    pub fn plaintext(&self) -> &str {
        &self.buffer
    }

    /// Move the real message out and clear the masker.
    pub fn take_plaintext(&mut self) -> Zeroizing<String> {
        let message = Zeroizing::new(std::mem::take(&mut *self.buffer));
        self.clear();
        message
    }

    /// Message length in characters.
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The projection currently on screen.
    pub fn display(&self) -> String {
        self.view.borrow().display.clone()
    }

    pub fn is_tail_hidden(&self) -> bool {
        self.view.borrow().tail_hidden
    }

    /// Observe display changes, including the idle mask firing.
    pub fn subscribe(&self) -> watch::Receiver<MaskedView> {
        self.view.subscribe()
    }

    pub fn is_idle_timer_pending(&self) -> bool {
        self.idle.is_pending()
    }

    fn next_epoch(&mut self) -> u64 {
        self.epoch += 1;
        let epoch = self.epoch;
        self.view.send_if_modified(|view| {
            view.epoch = epoch;
            false
        });
        epoch
    }
}

impl Default for InputMasker {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_MASK)
    }
}

impl fmt::Debug for InputMasker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputMasker")
            .field("len", &self.len())
            .field("idle_after", &self.idle_after)
            .field("display", &self.display())
            .finish()
    }
}

/// Apply `edit` to `buffer`. Out-of-range bounds are clamped and reversed
/// bounds swapped.
fn apply_to_buffer(buffer: &mut String, edit: &EditDescriptor) {
    let len = buffer.chars().count();
    let mut start = edit.selection_start.min(len);
    let mut end = edit.selection_end.min(len);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    match &edit.kind {
        EditKind::Insert(text) => {
            let range = byte_offset(buffer, start)..byte_offset(buffer, end);
            buffer.replace_range(range, text);
        }
        EditKind::DeleteBackward | EditKind::DeleteForward if start != end => {
            let range = byte_offset(buffer, start)..byte_offset(buffer, end);
            buffer.replace_range(range, "");
        }
        EditKind::DeleteBackward => {
            if start > 0 {
                let range = byte_offset(buffer, start - 1)..byte_offset(buffer, start);
                buffer.replace_range(range, "");
            }
        }
        EditKind::DeleteForward => {
            if start < len {
                let range = byte_offset(buffer, start)..byte_offset(buffer, start + 1);
                buffer.replace_range(range, "");
            }
        }
    }
}

/// Byte offset of the character at `index`, or the end of the string.
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
