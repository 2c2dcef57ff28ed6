//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! Each message gets a fresh random salt, so every encryption runs the
//! derivation again and ends up with its own key.

use std::time::Instant;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::crypto::passphrase::require_passphrase;
use crate::error::Result;

/// PBKDF2 iteration count. Fixed: it is not recorded in the payload.
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// Length of the salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// A cryptographic key derived from a passphrase.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase and salt.
///
/// Same passphrase + salt always produces the same key. The only failure is
/// an empty passphrase.
///
/// # Examples
///
/// ```
/// use hush_core::crypto::derive_key;
///
/// let salt = [7u8; 16];
/// let key = derive_key("my-passphrase", &salt).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(passphrase: &str, salt: &[u8; SALT_LENGTH]) -> Result<DerivedKey> {
    require_passphrase(passphrase)?;

    let started = Instant::now();
    let key = derive_with_rounds(passphrase.as_bytes(), salt, PBKDF2_ROUNDS);
    tracing::debug!(
        rounds = PBKDF2_ROUNDS,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "derived message key"
    );
    Ok(key)
}

fn derive_with_rounds(passphrase: &[u8], salt: &[u8], rounds: u32) -> DerivedKey {
    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(passphrase, salt, rounds, &mut key_bytes);
    DerivedKey::from_bytes(key_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HushError;

    #[test]
    fn test_key_derivation_deterministic() {
        let salt = [1u8; SALT_LENGTH];

        let key1 = derive_key("test-passphrase", &salt).unwrap();
        let key2 = derive_key("test-passphrase", &salt).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("test-passphrase", &[1u8; SALT_LENGTH]).unwrap();
        let key2 = derive_key("test-passphrase", &[2u8; SALT_LENGTH]).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let salt = *b"fixed-salt-12345";

        let key1 = derive_key("passphrase-one", &salt).unwrap();
        let key2 = derive_key("passphrase-two", &salt).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let result = derive_key("", &[0u8; SALT_LENGTH]);
        assert_eq!(result.unwrap_err(), HushError::EmptyPassphrase);
    }

    #[test]
    fn test_pbkdf2_sha256_known_vectors() {
        let one = derive_with_rounds(b"password", b"salt", 1);
        assert_eq!(
            hex::encode(one.as_bytes()),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );

        let two = derive_with_rounds(b"password", b"salt", 2);
        assert_eq!(
            hex::encode(two.as_bytes()),
            "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
        );
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("test-passphrase", &[9u8; SALT_LENGTH]).unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
