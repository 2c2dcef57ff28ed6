//! Diagnostic logging to stderr.
//!
//! stdout carries blobs and revealed frames, so events always go to stderr.
//! `HUSH_LOG` takes an `EnvFilter` directive; without it the level is `warn`,
//! or `debug` with `--verbose`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::env_vars;

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(env_vars::LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    // A second init in the same process is harmless.
    let _ = tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init();
}
