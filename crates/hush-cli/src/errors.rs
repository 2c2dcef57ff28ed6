//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes so scripts can tell a wrong
//! passphrase from a corrupted blob.

use std::fmt;

use hush_core::HushError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config file, keychain entry).
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong passphrase or tampered message).
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input.
    InvalidInput(String),

    /// Input is not a sealed message.
    Malformed { message: String, hint: String },

    /// The platform cannot provide the cryptographic primitives.
    Unsupported(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. }
            | CliError::AuthFailed { message, .. }
            | CliError::Malformed { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput(message) | CliError::Unsupported(message) => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<HushError> for CliError {
    fn from(err: HushError) -> Self {
        match err {
            HushError::EmptyPassphrase => CliError::invalid_input(err.to_string()),
            HushError::MalformedPayload => CliError::Malformed {
                message: err.to_string(),
                hint: "Paste the whole blob exactly as `hush seal` printed it.".to_string(),
            },
            HushError::AuthenticationFailure => CliError::auth_failed_with_hint(
                err.to_string(),
                "Check the passphrase, or set HUSH_PASSPHRASE.",
            ),
            HushError::EnvironmentUnsupported(_) => CliError::Unsupported(err.to_string()),
        }
    }
}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Hint shown under the error, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } | CliError::Malformed { hint, .. } => Some(hint),
            CliError::AuthFailed { hint, .. } => hint.as_deref(),
            CliError::InvalidInput(_) | CliError::Unsupported(_) => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Malformed { .. } => exit_codes::MALFORMED,
            CliError::Unsupported(_) => exit_codes::ENVIRONMENT_UNSUPPORTED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_codes;

    #[test]
    fn test_core_errors_map_to_exit_codes() {
        let cases = [
            (HushError::EmptyPassphrase, exit_codes::INVALID_INPUT),
            (HushError::MalformedPayload, exit_codes::MALFORMED),
            (HushError::AuthenticationFailure, exit_codes::AUTH_FAILED),
            (
                HushError::EnvironmentUnsupported("no rng"),
                exit_codes::ENVIRONMENT_UNSUPPORTED,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(CliError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn test_auth_failure_has_hint() {
        let err = CliError::from(HushError::AuthenticationFailure);
        assert!(err.hint().is_some_and(|h| h.contains("HUSH_PASSPHRASE")));
        assert_eq!(
            err.to_string(),
            "Decryption failed: wrong passphrase or corrupted message"
        );
    }

    #[test]
    fn test_invalid_input_has_no_hint() {
        assert!(CliError::invalid_input("nope").hint().is_none());
    }
}
