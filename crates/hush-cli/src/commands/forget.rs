use crate::app::AppContext;
use crate::security::keychain_clear;
use crate::ui::{badge, status, Badge};

pub fn handle_forget(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let removed = keychain_clear()?;
    tracing::debug!(removed, "keychain entry cleared");

    if !ctx.quiet() {
        let line = if removed {
            badge(&ui, Badge::Ok, "Forgot the remembered passphrase")
        } else {
            badge(&ui, Badge::Info, "No passphrase was remembered")
        };
        status(&ui, &line);
    }
    Ok(())
}
