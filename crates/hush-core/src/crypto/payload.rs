//! Wire framing: `salt(16) ‖ nonce(12) ‖ ciphertext‖tag`, base64 encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::crypto::key::SALT_LENGTH;
use crate::error::{HushError, Result};

/// Length of the AES-GCM nonce in bytes.
pub const NONCE_LENGTH: usize = 12;

/// Length of the AES-GCM authentication tag in bytes.
pub const TAG_LENGTH: usize = 16;

/// Bytes preceding the sealed data.
pub const HEADER_LENGTH: usize = SALT_LENGTH + NONCE_LENGTH;

/// A parsed, borrowed view of a decoded payload.
///
/// Construction enforces the length guard: anything of `HEADER_LENGTH`
/// bytes or fewer is rejected before any key derivation happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherPayload<'a> {
    salt: &'a [u8; SALT_LENGTH],
    nonce: &'a [u8; NONCE_LENGTH],
    sealed: &'a [u8],
}

impl<'a> CipherPayload<'a> {
    /// Split decoded payload bytes into salt, nonce and sealed data.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() <= HEADER_LENGTH {
            return Err(HushError::MalformedPayload);
        }
        let (salt, rest) = bytes.split_at(SALT_LENGTH);
        let (nonce, sealed) = rest.split_at(NONCE_LENGTH);
        Ok(Self {
            salt: salt.try_into().map_err(|_| HushError::MalformedPayload)?,
            nonce: nonce.try_into().map_err(|_| HushError::MalformedPayload)?,
            sealed,
        })
    }

    /// Random salt fed to key derivation.
    pub fn salt(&self) -> &'a [u8; SALT_LENGTH] {
        self.salt
    }

    /// AES-GCM nonce.
    pub fn nonce(&self) -> &'a [u8; NONCE_LENGTH] {
        self.nonce
    }

    /// Ciphertext with the authentication tag appended.
    pub fn sealed(&self) -> &'a [u8] {
        self.sealed
    }

    /// Length of the ciphertext without its tag.
    ///
    /// Zero for payloads too short to carry a full tag; those still parse but
    /// can never authenticate.
    pub fn ciphertext_len(&self) -> usize {
        self.sealed.len().saturating_sub(TAG_LENGTH)
    }
}

/// Decode a base64 blob. Surrounding ASCII whitespace is ignored so blobs
/// pasted with a trailing newline still open.
pub fn decode_blob(blob: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(blob.trim())
        .map_err(|_| HushError::MalformedPayload)
}

/// Frame and encode a payload.
pub(crate) fn encode_blob(
    salt: &[u8; SALT_LENGTH],
    nonce: &[u8; NONCE_LENGTH],
    sealed: &[u8],
) -> String {
    let mut bytes = Vec::with_capacity(HEADER_LENGTH + sealed.len());
    bytes.extend_from_slice(salt);
    bytes.extend_from_slice(nonce);
    bytes.extend_from_slice(sealed);
    STANDARD.encode(bytes)
}
