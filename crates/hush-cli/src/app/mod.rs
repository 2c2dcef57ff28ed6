//! Application-level utilities for the Hush CLI.
//!
//! This module provides:
//! - The command context (arguments plus lazily-loaded config)
//! - Passphrase resolution with retry and keychain remembering
//! - Blob and message input

mod context;
mod input;
mod passphrase;

pub use context::AppContext;
pub use input::{read_blob, read_message_stdin};
pub use passphrase::{
    remember, resolve_passphrase, retry_passphrase, strength_warning, Purpose,
};
