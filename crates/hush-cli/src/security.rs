//! OS keychain access for the remembered passphrase.

use secrecy::{ExposeSecret, SecretString};

use crate::constants::{KEYCHAIN_ACCOUNT, KEYCHAIN_SERVICE};

pub fn keychain_get() -> anyhow::Result<Option<SecretString>> {
    let entry = keychain_entry()?;
    match entry.get_password() {
        Ok(value) => Ok(Some(SecretString::from(value))),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(anyhow::anyhow!("Keychain read failed: {}", err)),
    }
}

pub fn keychain_set(passphrase: &SecretString) -> anyhow::Result<()> {
    let entry = keychain_entry()?;
    entry
        .set_password(passphrase.expose_secret())
        .map_err(|e| anyhow::anyhow!("Keychain write failed: {}", e))
}

/// Remove the remembered passphrase. Returns whether one was stored.
pub fn keychain_clear() -> anyhow::Result<bool> {
    let entry = keychain_entry()?;
    match entry.delete_password() {
        Ok(()) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(err) => Err(anyhow::anyhow!("Keychain delete failed: {}", err)),
    }
}

fn keychain_entry() -> anyhow::Result<keyring::Entry> {
    keyring::Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
        .map_err(|e| anyhow::anyhow!("Keychain entry failed: {}", e))
}
