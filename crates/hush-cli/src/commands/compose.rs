use std::io::IsTerminal;

use zeroize::Zeroizing;

use hush_core::InputMasker;

use crate::app::AppContext;
use crate::commands::seal::seal_and_print;
use crate::errors::CliError;
use crate::ui::terminal::compose;
use crate::ui::{header, hint, status, UiContext};

/// Type a message in the masked composer.
///
/// Fails with an input error when the composition is aborted or empty.
pub async fn compose_message(
    ctx: &AppContext<'_>,
    ui: &UiContext,
) -> anyhow::Result<Zeroizing<String>> {
    if !std::io::stdin().is_terminal() || !ui.stderr_tty {
        return Err(CliError::invalid_input(
            "The composer needs a terminal; pipe the message on stdin instead",
        )
        .into());
    }

    if !ctx.quiet() {
        let composer_ui = UiContext {
            mode: crate::ui::OutputMode::Pretty,
            ..ui.clone()
        };
        status(ui, &header(&composer_ui, "compose", None));
        status(ui, &hint(&composer_ui, "Enter seals, Esc discards"));
    }

    let mut masker = InputMasker::new(ctx.config()?.idle_mask());
    match compose(ui, &mut masker).await? {
        Some(message) if !message.is_empty() => Ok(message),
        Some(_) => Err(CliError::invalid_input("Nothing to seal").into()),
        None => Err(CliError::invalid_input("Composition discarded").into()),
    }
}

pub async fn handle_compose(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let message = compose_message(ctx, &ui).await?;
    seal_and_print(ctx, &ui, message, false).await
}
