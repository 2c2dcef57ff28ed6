//! Passphrase checks.
//!
//! The codec only refuses an empty passphrase. Strength is advisory: the
//! CLI warns about weak passphrases on `seal` but never blocks them, since
//! the recipient must be able to type whatever the sender chose.

use crate::error::{HushError, Result};

/// Passphrases shorter than this (in characters) are reported as weak.
pub const RECOMMENDED_MIN_LENGTH: usize = 8;

/// Advisory strength rating for a passphrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// Zero-length; rejected by the codec.
    Empty,
    /// Accepted, but short or whitespace-only.
    Weak,
    /// Meets the recommended minimum.
    Acceptable,
}

/// Reject an empty passphrase with [`HushError::EmptyPassphrase`].
pub fn require_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.is_empty() {
        return Err(HushError::EmptyPassphrase);
    }
    Ok(())
}

/// Rate a passphrase without rejecting it.
///
/// # Examples
///
/// ```
/// use hush_core::crypto::passphrase::{assess, Strength};
///
/// assert_eq!(assess(""), Strength::Empty);
/// assert_eq!(assess("short"), Strength::Weak);
/// assert_eq!(assess("correct horse battery"), Strength::Acceptable);
/// ```
pub fn assess(passphrase: &str) -> Strength {
    if passphrase.is_empty() {
        return Strength::Empty;
    }
    if passphrase.trim().is_empty() || passphrase.chars().count() < RECOMMENDED_MIN_LENGTH {
        return Strength::Weak;
    }
    Strength::Acceptable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_empty() {
        assert_eq!(require_passphrase(""), Err(HushError::EmptyPassphrase));
    }

    #[test]
    fn test_require_accepts_whitespace() {
        // Whitespace is a legal (if poor) secret; only emptiness is refused.
        assert!(require_passphrase("   ").is_ok());
    }

    #[test]
    fn test_whitespace_only_is_weak() {
        assert_eq!(assess("          "), Strength::Weak);
        assert_eq!(assess("\n\t"), Strength::Weak);
    }

    #[test]
    fn test_exactly_min_length_is_acceptable() {
        let exactly_8 = "12345678";
        assert_eq!(exactly_8.chars().count(), RECOMMENDED_MIN_LENGTH);
        assert_eq!(assess(exactly_8), Strength::Acceptable);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 4 characters, 8+ bytes
        assert_eq!(assess("ключ"), Strength::Weak);
    }
}
