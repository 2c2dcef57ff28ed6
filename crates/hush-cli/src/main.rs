//! Hush CLI - passphrase-sealed messages with shoulder-surfing resistant
//! display.
//!
//! This is the command-line interface for Hush. It seals and opens blobs
//! with the core codec and drives the reveal engine and input masker on a
//! terminal.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod security;
mod ui;

use clap::Parser;
use hush_core::{HushError, VERSION};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{compose, forget, inspect, misc, open, seal};
use crate::errors::CliError;
use crate::ui::print_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli).await {
        let ui_ctx = ctx.ui_context(false);
        let (message, hint, code) = describe_error(&e);
        tracing::debug!(error = ?e, "command failed");
        print_error(&ui_ctx, &message, hint.as_deref());
        std::process::exit(code);
    }
}

/// Message, hint and exit code for a failed command.
fn describe_error(err: &anyhow::Error) -> (String, Option<String>, i32) {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return (
            cli_err.to_string(),
            cli_err.hint().map(str::to_string),
            cli_err.exit_code(),
        );
    }
    if let Some(core_err) = err.downcast_ref::<HushError>() {
        let cli_err = CliError::from(*core_err);
        return (
            cli_err.to_string(),
            cli_err.hint().map(str::to_string),
            cli_err.exit_code(),
        );
    }
    (format!("{:#}", err), None, 1)
}

/// Whether `command` reads the config file.
fn uses_config(command: &Option<Commands>) -> bool {
    !matches!(command, None | Some(Commands::Completions(_)))
}

async fn run(ctx: &AppContext<'_>, cli: &Cli) -> anyhow::Result<()> {
    // Surface a missing --config or invalid values before any work.
    if uses_config(&cli.command) {
        ctx.config()?;
    }

    match &cli.command {
        Some(Commands::Seal(args)) => {
            seal::handle_seal(ctx, args).await?;
        }
        Some(Commands::Open(args)) => {
            open::handle_open(ctx, args).await?;
        }
        Some(Commands::Compose) => {
            compose::handle_compose(ctx).await?;
        }
        Some(Commands::Inspect(args)) => {
            inspect::handle_inspect(ctx, args)?;
        }
        Some(Commands::Forget) => {
            forget::handle_forget(ctx)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Hush v{}", VERSION);
            println!("\nQuickstart:");
            println!("  hush seal --text \"Meet at noon.\" > note.txt");
            println!("  hush open < note.txt");
            println!("  hush compose");
            println!("\nRun `hush --help` for full usage.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_codes;

    #[test]
    fn test_describe_typed_error() {
        let err: anyhow::Error = CliError::from(HushError::MalformedPayload).into();
        let (message, hint, code) = describe_error(&err);
        assert_eq!(message, "Malformed payload");
        assert!(hint.is_some());
        assert_eq!(code, exit_codes::MALFORMED);
    }

    #[test]
    fn test_describe_core_error() {
        let err: anyhow::Error = HushError::AuthenticationFailure.into();
        let (_, _, code) = describe_error(&err);
        assert_eq!(code, exit_codes::AUTH_FAILED);
    }

    #[test]
    fn test_config_loaded_for_working_commands() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command;
        assert!(uses_config(&parse(&["hush", "seal", "--text", "x"])));
        assert!(uses_config(&parse(&["hush", "inspect", "abc"])));
        assert!(uses_config(&parse(&["hush", "forget"])));
        assert!(!uses_config(&parse(&["hush", "completions", "bash"])));
        assert!(!uses_config(&parse(&["hush"])));
    }

    #[test]
    fn test_describe_untyped_error() {
        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(describe_error(&err), ("disk on fire".to_string(), None, 1));
    }
}
