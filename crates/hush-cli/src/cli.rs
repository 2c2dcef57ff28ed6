use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use hush_core::disclosure::RevealSpeed;
use hush_core::VERSION;

use crate::constants::env_vars;

/// Hush - passphrase-sealed messages that never sit in plain view
#[derive(Parser)]
#[command(name = "hush")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = env_vars::CONFIG)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `seal` command
#[derive(Args)]
pub struct SealArgs {
    /// Message to seal (otherwise composed interactively or read from stdin)
    #[arg(long, conflicts_with = "compose")]
    pub text: Option<String>,

    /// Type the message in the masked composer
    #[arg(long)]
    pub compose: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `open` command
#[derive(Args)]
pub struct OpenArgs {
    /// Sealed blob (otherwise read from stdin)
    #[arg(value_name = "BLOB")]
    pub blob: Option<String>,

    /// Reveal pace: fast or slow
    #[arg(long, value_name = "SPEED")]
    pub speed: Option<RevealSpeed>,

    /// Print only the final masked frame
    #[arg(long)]
    pub instant: bool,
}

/// Arguments for the `inspect` command
#[derive(Args)]
pub struct InspectArgs {
    /// Sealed blob (otherwise read from stdin)
    #[arg(value_name = "BLOB")]
    pub blob: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seal a message with a passphrase
    Seal(SealArgs),

    /// Open a sealed message and reveal it progressively
    Open(OpenArgs),

    /// Compose a message with masked input, then seal it
    Compose,

    /// Show the framing of a sealed blob without decrypting it
    Inspect(InspectArgs),

    /// Remove the remembered passphrase from the keychain
    Forget,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_open_speed() {
        let cli = Cli::try_parse_from(["hush", "open", "--speed", "slow", "abc"]).unwrap();
        match cli.command {
            Some(Commands::Open(args)) => {
                assert_eq!(args.speed, Some(RevealSpeed::Slow));
                assert_eq!(args.blob.as_deref(), Some("abc"));
            }
            _ => panic!("expected open"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_speed() {
        assert!(Cli::try_parse_from(["hush", "open", "--speed", "medium"]).is_err());
    }

    #[test]
    fn test_seal_text_conflicts_with_compose() {
        assert!(Cli::try_parse_from(["hush", "seal", "--text", "x", "--compose"]).is_err());
    }
}
