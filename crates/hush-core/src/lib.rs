//! # Hush Core
//!
//! Core library for Hush - passphrase-sealed messages with shoulder-surfing
//! resistant display.
//!
//! This crate has no terminal or I/O dependencies; the CLI renders what it
//! produces.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, AES-256-GCM codec, wire framing
//! - **disclosure**: masking projections, reveal engine, input masker
//! - **error**: the four terminal error kinds

pub mod crypto;
pub mod disclosure;
pub mod error;

pub use crypto::{decrypt, encrypt};
pub use disclosure::{InputMasker, RevealEngine};
pub use error::{HushError, Result};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
