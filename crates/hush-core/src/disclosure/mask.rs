//! Pure masking projections.
//!
//! Masking replaces characters one-for-one, so a masked string has the same
//! character count and whitespace layout as its source.

/// Character substituted for hidden content.
pub const MASK_CHAR: char = '*';

/// Whether the trailing word of a composition is still shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    /// The last non-whitespace run is shown as typed.
    Visible,
    /// Every non-whitespace run is masked.
    Hidden,
}

/// Replace every non-whitespace character with [`MASK_CHAR`].
pub fn mask_non_whitespace(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { c } else { MASK_CHAR })
        .collect()
}

/// Mask a whole sentence except its trailing terminator run (`.`, `!`, `?`).
///
/// ```
/// use hush_core::disclosure::mask::mask_sentence;
///
/// assert_eq!(mask_sentence("Wait... "), "****... ");
/// ```
pub fn mask_sentence(sentence: &str) -> String {
    let body = sentence.trim_end();
    let terminators = body
        .chars()
        .rev()
        .take_while(|c| is_terminator(*c))
        .count();
    let masked_until = body.chars().count() - terminators;
    sentence
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i < masked_until && !c.is_whitespace() {
                MASK_CHAR
            } else {
                c
            }
        })
        .collect()
}

pub(crate) fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Mask the non-whitespace characters of everything except the last `keep`
/// characters of `text`.
pub fn mask_leading(text: &str, keep: usize) -> String {
    let total = text.chars().count();
    if keep >= total {
        return text.to_owned();
    }
    let hide = total - keep;
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            if i < hide && !c.is_whitespace() {
                MASK_CHAR
            } else {
                c
            }
        })
        .collect()
}

/// Project a composition buffer onto what may be shown on screen.
///
/// Every non-whitespace run is masked except, with [`Tail::Visible`], the
/// last one.
///
/// # Examples
///
/// ```
/// use hush_core::disclosure::mask::{project_display, Tail};
///
/// assert_eq!(project_display("the quick brown", Tail::Visible), "*** ***** brown");
/// assert_eq!(project_display("the quick brown", Tail::Hidden), "*** ***** *****");
/// ```
pub fn project_display(text: &str, tail: Tail) -> String {
    if tail == Tail::Hidden {
        return mask_non_whitespace(text);
    }

    let (start, end) = last_word_span(text);
    let mut out = mask_non_whitespace(&text[..start]);
    out.push_str(&text[start..end]);
    out.push_str(&text[end..]);
    out
}

/// Byte range of the last non-whitespace run; empty at the end of the text
/// when there is none.
fn last_word_span(text: &str) -> (usize, usize) {
    let end = text.trim_end().len();
    let start = text[..end]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    (start, end)
}
