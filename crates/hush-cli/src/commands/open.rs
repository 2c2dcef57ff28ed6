use secrecy::ExposeSecret;
use zeroize::Zeroizing;

use hush_core::disclosure::sentence::render_window;
use hush_core::disclosure::RevealPhase;

use crate::app::{read_blob, remember, resolve_passphrase, retry_passphrase, AppContext, Purpose};
use crate::cli::OpenArgs;
use crate::ui::terminal::play_reveal;
use crate::ui::{badge, header, status, with_spinner, Badge};

pub async fn handle_open(ctx: &AppContext<'_>, args: &OpenArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let blob = read_blob(args.blob.as_deref())?;
    let speed = ctx.reveal_speed(args.speed)?;
    let mut engine = ctx.reveal_engine()?;

    let mut passphrase = resolve_passphrase(ctx, Purpose::Open)?;
    let mut attempt = 1;
    let plaintext = loop {
        let secret = Zeroizing::new(passphrase.secret.expose_secret().to_string());
        let sealed = blob.clone();
        let opened = with_spinner(&ui, "Deriving key", move || {
            hush_core::decrypt(&sealed, &secret)
        })
        .await?;
        match opened {
            Ok(plaintext) => break plaintext,
            Err(err) => {
                passphrase = retry_passphrase(&passphrase, attempt, err)?;
                attempt += 1;
            }
        }
    };
    remember(ctx, &passphrase)?;

    if args.instant || !ui.allows_animation() {
        println!("{}", render_window(&plaintext, engine.policy()));
        return Ok(());
    }

    if !ctx.quiet() {
        status(&ui, &header(&ui, "open", Some(speed.as_str())));
    }
    let phase = play_reveal(&mut engine, &plaintext, speed, ui.width).await?;
    if phase == RevealPhase::Cancelled && !ctx.quiet() {
        status(&ui, &badge(&ui, Badge::Info, "Reveal cancelled"));
    }
    Ok(())
}
