//! Cryptographic codec for Hush messages.
//!
//! - **key**: PBKDF2-HMAC-SHA256 key derivation (100,000 rounds, 256-bit key)
//! - **codec**: AES-256-GCM sealing into a self-contained base64 blob
//! - **payload**: wire framing and the length guard
//! - **passphrase**: emptiness check and advisory strength rating
//!
//! ## Threat Model
//!
//! We defend against:
//! - Tampering with a blob in transit or at rest
//! - Offline guessing of the passphrase (slowed by the KDF)
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Memory scraping while a message is open

pub mod codec;
pub mod key;
pub mod passphrase;
pub mod payload;

pub use codec::{decrypt, encrypt};
pub use key::{derive_key, DerivedKey};
pub use payload::CipherPayload;
