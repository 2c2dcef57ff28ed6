//! Passphrase resolution: environment, keychain, then prompt.

use std::io::IsTerminal;

use dialoguer::Password;
use secrecy::{ExposeSecret, SecretString};

use hush_core::crypto::passphrase::{assess, Strength, RECOMMENDED_MIN_LENGTH};
use hush_core::HushError;

use crate::constants::env_vars;
use crate::errors::CliError;
use crate::security::{keychain_get, keychain_set};

use super::context::AppContext;

/// Attempts allowed when a prompted passphrase fails to open a message.
pub const MAX_PROMPT_ATTEMPTS: usize = 3;

/// Why the passphrase is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Sealing; the prompt asks for confirmation.
    Seal,
    Open,
}

/// Where a passphrase came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Env,
    Keychain,
    Prompt,
}

pub struct ResolvedPassphrase {
    pub secret: SecretString,
    pub source: Source,
}

/// Resolve the passphrase without prompting, if one is available.
fn from_environment(ctx: &AppContext) -> anyhow::Result<Option<ResolvedPassphrase>> {
    let env_value = std::env::var(env_vars::PASSPHRASE)
        .ok()
        .filter(|v| !v.trim().is_empty());
    if let Some(value) = env_value {
        return Ok(Some(ResolvedPassphrase {
            secret: SecretString::from(value),
            source: Source::Env,
        }));
    }

    if ctx.config()?.keychain.enabled {
        match keychain_get() {
            Ok(Some(secret)) => {
                tracing::debug!("using remembered passphrase");
                return Ok(Some(ResolvedPassphrase {
                    secret,
                    source: Source::Keychain,
                }));
            }
            Ok(None) => {}
            Err(err) => tracing::warn!("{}", err),
        }
    }
    Ok(None)
}

fn prompt(purpose: Purpose) -> anyhow::Result<ResolvedPassphrase> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::not_found(
            "No passphrase provided and no TTY available",
            format!("Set {} or run in a terminal.", env_vars::PASSPHRASE),
        )
        .into());
    }
    let password = match purpose {
        Purpose::Seal => Password::new()
            .with_prompt("Passphrase")
            .with_confirmation("Confirm passphrase", "Passphrases do not match")
            .interact(),
        Purpose::Open => Password::new().with_prompt("Passphrase").interact(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?;

    Ok(ResolvedPassphrase {
        secret: SecretString::from(password),
        source: Source::Prompt,
    })
}

/// Resolve the passphrase: `HUSH_PASSPHRASE`, then the keychain (when
/// enabled), then an interactive prompt.
pub fn resolve_passphrase(ctx: &AppContext, purpose: Purpose) -> anyhow::Result<ResolvedPassphrase> {
    match from_environment(ctx)? {
        Some(resolved) => Ok(resolved),
        None => prompt(purpose),
    }
}

/// Ask again after a failed attempt. Only prompted passphrases are retried.
pub fn retry_passphrase(
    previous: &ResolvedPassphrase,
    attempt: usize,
    err: HushError,
) -> anyhow::Result<ResolvedPassphrase> {
    if err != HushError::AuthenticationFailure
        || previous.source != Source::Prompt
        || attempt >= MAX_PROMPT_ATTEMPTS
    {
        return Err(CliError::from(err).into());
    }
    eprintln!(
        "Incorrect passphrase ({} of {} attempts)",
        attempt, MAX_PROMPT_ATTEMPTS
    );
    prompt(Purpose::Open)
}

/// Store a prompted passphrase in the keychain when remembering is enabled.
pub fn remember(ctx: &AppContext, resolved: &ResolvedPassphrase) -> anyhow::Result<()> {
    if resolved.source != Source::Prompt || !ctx.config()?.keychain.enabled {
        return Ok(());
    }
    if let Err(err) = keychain_set(&resolved.secret) {
        tracing::warn!("{}", err);
    }
    Ok(())
}

/// Warning for a passphrase below the recommended length, if any.
pub fn strength_warning(secret: &SecretString) -> Option<String> {
    match assess(secret.expose_secret()) {
        Strength::Weak => Some(format!(
            "Passphrase is shorter than {} characters; the recipient's copy is only as safe as it is",
            RECOMMENDED_MIN_LENGTH
        )),
        Strength::Empty | Strength::Acceptable => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompted(value: &str) -> ResolvedPassphrase {
        ResolvedPassphrase {
            secret: SecretString::from(value.to_string()),
            source: Source::Prompt,
        }
    }

    #[test]
    fn test_strength_warning() {
        assert!(strength_warning(&SecretString::from("short".to_string())).is_some());
        assert!(strength_warning(&SecretString::from("long enough phrase".to_string())).is_none());
    }

    #[test]
    fn test_env_passphrase_is_not_retried() {
        let resolved = ResolvedPassphrase {
            secret: SecretString::from("wrong".to_string()),
            source: Source::Env,
        };
        let err = retry_passphrase(&resolved, 1, HushError::AuthenticationFailure)
            .err()
            .expect("should not retry");
        let cli_err = err.downcast_ref::<CliError>().expect("typed error");
        assert_eq!(cli_err.exit_code(), crate::constants::exit_codes::AUTH_FAILED);
    }

    #[test]
    fn test_malformed_is_not_retried() {
        let err = retry_passphrase(&prompted("x"), 1, HushError::MalformedPayload)
            .err()
            .expect("should not retry");
        let cli_err = err.downcast_ref::<CliError>().expect("typed error");
        assert_eq!(cli_err.exit_code(), crate::constants::exit_codes::MALFORMED);
    }

    #[test]
    fn test_attempts_are_bounded() {
        let err = retry_passphrase(&prompted("x"), MAX_PROMPT_ATTEMPTS, HushError::AuthenticationFailure)
            .err()
            .expect("should stop");
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
