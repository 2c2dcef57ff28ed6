//! Passphrase-based authenticated encryption of text messages.
//!
//! Each call derives a fresh key from a new random salt and seals the
//! message with AES-256-GCM under a new random nonce. The output is a single
//! base64 string carrying everything needed to decrypt except the passphrase.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use crate::crypto::key::{derive_key, DerivedKey, SALT_LENGTH};
use crate::crypto::passphrase::require_passphrase;
use crate::crypto::payload::{decode_blob, encode_blob, CipherPayload, NONCE_LENGTH};
use crate::error::{HushError, Result};

/// Encrypt `plaintext` under `passphrase` and return the base64 blob.
///
/// Two calls with identical inputs produce different blobs.
///
/// # Examples
///
/// ```
/// use hush_core::crypto::{decrypt, encrypt};
///
/// let blob = encrypt("meet at noon", "swordfish").unwrap();
/// let plaintext = decrypt(&blob, "swordfish").unwrap();
/// assert_eq!(plaintext.as_str(), "meet at noon");
/// ```
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String> {
    require_passphrase(passphrase)?;

    let mut salt = [0u8; SALT_LENGTH];
    let mut nonce = [0u8; NONCE_LENGTH];
    fill_random(&mut salt)?;
    fill_random(&mut nonce)?;

    let key = derive_key(passphrase, &salt)?;
    let sealed = cipher(&key)?
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| HushError::EnvironmentUnsupported("aes-256-gcm"))?;

    tracing::debug!(
        plaintext_len = plaintext.len(),
        sealed_len = sealed.len(),
        "sealed message"
    );
    Ok(encode_blob(&salt, &nonce, &sealed))
}

/// Decrypt a base64 blob produced by [`encrypt`].
///
/// # Errors
///
/// - [`HushError::EmptyPassphrase`] if `passphrase` is empty
/// - [`HushError::MalformedPayload`] if the blob is not base64 or is too short
/// - [`HushError::AuthenticationFailure`] for a wrong passphrase or any
///   modification of the payload; the two are not distinguished
pub fn decrypt(blob: &str, passphrase: &str) -> Result<Zeroizing<String>> {
    require_passphrase(passphrase)?;

    let bytes = decode_blob(blob)?;
    let payload = CipherPayload::parse(&bytes)?;

    let key = derive_key(passphrase, payload.salt())?;
    let opened = cipher(&key)?
        .decrypt(Nonce::from_slice(payload.nonce()), payload.sealed())
        .map(Zeroizing::new)
        .map_err(|_| {
            tracing::debug!(sealed_len = payload.sealed().len(), "authentication failed");
            HushError::AuthenticationFailure
        })?;

    let text = std::str::from_utf8(&opened).map_err(|_| HushError::AuthenticationFailure)?;
    tracing::debug!(plaintext_len = text.len(), "opened message");
    Ok(Zeroizing::new(text.to_owned()))
}

fn cipher(key: &DerivedKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| HushError::EnvironmentUnsupported("aes-256-gcm"))
}

fn fill_random(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf).map_err(|e| {
        tracing::warn!(error = %e, "secure randomness unavailable");
        HushError::EnvironmentUnsupported("os randomness")
    })
}
