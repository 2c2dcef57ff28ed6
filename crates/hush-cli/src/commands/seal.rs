use std::io::IsTerminal;

use secrecy::ExposeSecret;
use zeroize::Zeroizing;

use crate::app::{
    read_message_stdin, remember, resolve_passphrase, strength_warning, AppContext, Purpose,
};
use crate::cli::SealArgs;
use crate::commands::compose::compose_message;
use crate::errors::CliError;
use crate::ui::{badge, receipt, status, with_spinner, Badge, UiContext};

pub async fn handle_seal(ctx: &AppContext<'_>, args: &SealArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json);

    let message = match &args.text {
        Some(text) if text.is_empty() => {
            return Err(CliError::invalid_input("--text cannot be empty").into());
        }
        Some(text) => Zeroizing::new(text.clone()),
        None if wants_composer(args.compose, std::io::stdin().is_terminal(), ui.stderr_tty) => {
            compose_message(ctx, &ui).await?
        }
        None => read_message_stdin()?,
    };

    seal_and_print(ctx, &ui, message, args.json).await
}

/// Typing at a terminal goes through the masked composer, even when stdout
/// is redirected.
fn wants_composer(compose_flag: bool, stdin_tty: bool, stderr_tty: bool) -> bool {
    compose_flag || (stdin_tty && stderr_tty)
}

/// Seal `message` and print the blob on stdout.
pub async fn seal_and_print(
    ctx: &AppContext<'_>,
    ui: &UiContext,
    message: Zeroizing<String>,
    json: bool,
) -> anyhow::Result<()> {
    let passphrase = resolve_passphrase(ctx, Purpose::Seal)?;
    if let Some(warning) = strength_warning(&passphrase.secret) {
        if !ctx.quiet() {
            status(ui, &badge(ui, Badge::Warn, &warning));
        }
    }

    let chars = message.chars().count();
    let secret = Zeroizing::new(passphrase.secret.expose_secret().to_string());
    let blob = with_spinner(ui, "Deriving key", move || {
        hush_core::encrypt(&message, &secret)
    })
    .await?
    .map_err(CliError::from)?;
    remember(ctx, &passphrase)?;

    if json {
        let output = serde_json::json!({ "blob": blob, "characters": chars });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", blob);
    if ui.mode.is_pretty() && !ctx.quiet() {
        let chars = chars.to_string();
        status(ui, &receipt(ui, "Sealed", &[("Characters", &chars)]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_stdin_uses_composer_when_stdout_redirected() {
        assert!(wants_composer(false, true, true));
    }

    #[test]
    fn test_piped_stdin_reads_message() {
        assert!(!wants_composer(false, false, true));
        assert!(!wants_composer(false, true, false));
    }

    #[test]
    fn test_compose_flag_forces_composer() {
        assert!(wants_composer(true, false, false));
    }
}
