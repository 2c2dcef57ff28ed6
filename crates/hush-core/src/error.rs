//! Error types for Hush core operations.
//!
//! Every variant is terminal: the same inputs always produce the same error,
//! so callers never retry. The CLI layer maps these to user-facing messages
//! and exit codes.

use thiserror::Error;

/// Result type alias for Hush operations.
pub type Result<T> = std::result::Result<T, HushError>;

/// Core error type for Hush operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HushError {
    /// No passphrase was supplied to encrypt or decrypt.
    #[error("Passphrase cannot be empty")]
    EmptyPassphrase,

    /// The blob is not valid base64, or decodes to too few bytes to hold
    /// a salt, a nonce and an authentication tag.
    #[error("Malformed payload")]
    MalformedPayload,

    /// Wrong passphrase or tampered ciphertext. The two causes are
    /// intentionally reported as one.
    #[error("Decryption failed: wrong passphrase or corrupted message")]
    AuthenticationFailure,

    /// A required primitive (OS randomness, cipher setup) is unavailable.
    #[error("Cryptographic primitives unavailable: {0}")]
    EnvironmentUnsupported(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failure_message_is_generic() {
        let msg = HushError::AuthenticationFailure.to_string();
        assert!(msg.contains("wrong passphrase or corrupted"));
    }

    #[test]
    fn test_environment_message_names_primitive() {
        let msg = HushError::EnvironmentUnsupported("os randomness").to_string();
        assert!(msg.contains("os randomness"));
    }
}
