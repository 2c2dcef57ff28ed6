//! Sentence segmentation and sentence-window masking.
//!
//! A sentence ends at `.`, `!` or `?` when the next character is whitespace
//! or the end of the text. The whitespace run after the terminator belongs
//! to the sentence it ends, so the segments always concatenate back to the
//! original text. Text after the last terminator is an open final sentence.

use crate::disclosure::mask::{is_terminator, mask_leading, mask_sentence};

/// How much of a revealed prefix stays readable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowPolicy {
    /// Number of trailing sentences shown in full.
    pub visible_sentences: usize,
    /// Minimum trailing characters left readable in the earliest visible
    /// sentence when the prefix is short.
    pub min_tail_chars: usize,
    /// Fraction of the earliest visible sentence left readable, if larger
    /// than `min_tail_chars`.
    pub tail_fraction: f64,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            visible_sentences: 3,
            min_tail_chars: 6,
            tail_fraction: 0.25,
        }
    }
}

impl WindowPolicy {
    /// Number of trailing characters left readable in a sentence of
    /// `len` characters.
    pub fn tail_window(&self, len: usize) -> usize {
        let fraction = (self.tail_fraction.max(0.0) * len as f64).floor() as usize;
        self.min_tail_chars.max(fraction)
    }
}

/// Split `text` into sentences.
///
/// # Examples
///
/// ```
/// use hush_core::disclosure::sentence::split_sentences;
///
/// assert_eq!(
///     split_sentences("One. Two!  Three"),
///     vec!["One. ", "Two!  ", "Three"]
/// );
/// ```
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !is_terminator(c) {
            continue;
        }
        match chars.peek() {
            None => {
                sentences.push(&text[start..]);
                start = text.len();
            }
            Some(&(_, next)) if next.is_whitespace() => {
                let mut end = text.len();
                while let Some(&(i, w)) = chars.peek() {
                    if !w.is_whitespace() {
                        end = i;
                        break;
                    }
                    chars.next();
                }
                sentences.push(&text[start..end]);
                start = end;
            }
            Some(_) => {}
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Render `prefix` with everything outside the sentence window masked.
///
/// Sentences before the last `visible_sentences` are masked down to their
/// terminators. When
/// the prefix has no more sentences than that, the first sentence instead
/// keeps only its trailing [`WindowPolicy::tail_window`] characters.
///
/// # Examples
///
/// ```
/// use hush_core::disclosure::sentence::{render_window, WindowPolicy};
///
/// let shown = render_window("One. Two. Three. Four.", &WindowPolicy::default());
/// assert_eq!(shown, "***. Two. Three. Four.");
/// ```
pub fn render_window(prefix: &str, policy: &WindowPolicy) -> String {
    let sentences = split_sentences(prefix);
    let mut out = String::with_capacity(prefix.len());

    if sentences.len() > policy.visible_sentences {
        let split = sentences.len() - policy.visible_sentences;
        for sentence in &sentences[..split] {
            out.push_str(&mask_sentence(sentence));
        }
        for sentence in &sentences[split..] {
            out.push_str(sentence);
        }
    } else if let Some((first, rest)) = sentences.split_first() {
        let keep = policy.tail_window(first.chars().count());
        out.push_str(&mask_leading(first, keep));
        for sentence in rest {
            out.push_str(sentence);
        }
    }

    out
}
