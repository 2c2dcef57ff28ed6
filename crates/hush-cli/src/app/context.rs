//! Application context for the Hush CLI.
//!
//! Bundles the parsed arguments with the lazily-loaded config file.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use hush_core::disclosure::{RevealEngine, RevealSpeed};

use crate::cli::Cli;
use crate::config::{default_config_path, load_config, read_config, HushConfig};
use crate::errors::CliError;
use crate::ui::UiContext;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<HushConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config, loading it on first use.
    ///
    /// An explicit `--config` path must exist; the default path may not.
    pub fn config(&self) -> anyhow::Result<&HushConfig> {
        self.config.get_or_try_init(|| match &self.cli.config {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(CliError::not_found(
                        format!("Config not found: {}", path.display()),
                        "Check the --config path or HUSH_CONFIG.",
                    )
                    .into());
                }
                read_config(&path)
            }
            None => load_config(&default_config_path()?),
        })
    }

    /// UI context for a command; `json` is the command's `--json` flag.
    pub fn ui_context(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.no_color, self.cli.ascii)
    }

    /// Reveal engine configured from the window and timing sections.
    pub fn reveal_engine(&self) -> anyhow::Result<RevealEngine> {
        let config = self.config()?;
        Ok(RevealEngine::new(config.window_policy()).with_timing(config.reveal_timing()))
    }

    /// The `--speed` flag, or the configured default.
    pub fn reveal_speed(&self, flag: Option<RevealSpeed>) -> anyhow::Result<RevealSpeed> {
        match flag {
            Some(speed) => Ok(speed),
            None => Ok(self.config()?.reveal.speed.into()),
        }
    }
}
