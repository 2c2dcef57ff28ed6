//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config file, keychain entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase or tampered message).
    pub const AUTH_FAILED: i32 = 5;

    /// The blob is not a sealed message.
    pub const MALFORMED: i32 = 6;

    /// Cryptographic primitives unavailable on this platform.
    pub const ENVIRONMENT_UNSUPPORTED: i32 = 7;
}

/// Environment variables read by the CLI.
pub mod env_vars {
    pub const PASSPHRASE: &str = "HUSH_PASSPHRASE";
    pub const CONFIG: &str = "HUSH_CONFIG";
    pub const LOG: &str = "HUSH_LOG";
}

/// Keychain service name.
pub const KEYCHAIN_SERVICE: &str = "hush";

/// Keychain account holding the remembered passphrase.
pub const KEYCHAIN_ACCOUNT: &str = "default";
