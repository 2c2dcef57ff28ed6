//! Spinner for the slow key derivation.
//!
//! Draws on stderr so stdout stays clean for blobs and revealed text.

use std::io::{self, Write};
use std::time::Duration;

use super::context::UiContext;
use super::theme::Theme;

const TICK: Duration = Duration::from_millis(80);

/// A spinner for indeterminate progress.
pub struct Spinner<'a> {
    ctx: &'a UiContext,
    message: String,
    frame: usize,
}

impl<'a> Spinner<'a> {
    pub fn new(ctx: &'a UiContext, message: &str) -> Self {
        Self {
            ctx,
            message: message.to_string(),
            frame: 0,
        }
    }

    fn enabled(&self) -> bool {
        self.ctx.stderr_tty && self.ctx.mode.is_pretty()
    }

    /// Advance to the next frame.
    pub fn tick(&mut self) {
        if !self.enabled() {
            return;
        }
        let frames = Theme::default().spinner_frames(self.ctx.unicode);
        self.frame = (self.frame + 1) % frames.len();
        eprint!("\r\x1b[K{} {}...", frames[self.frame], self.message);
        let _ = io::stderr().flush();
    }

    /// Clear the spinner line.
    pub fn finish(&self) {
        if self.enabled() {
            eprint!("\r\x1b[K");
            let _ = io::stderr().flush();
        }
    }
}

/// Run blocking `work` off the async thread while a spinner turns.
pub async fn with_spinner<T, F>(ctx: &UiContext, message: &str, work: F) -> anyhow::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let mut spinner = Spinner::new(ctx, message);
    let mut task = tokio::task::spawn_blocking(work);
    let mut ticker = tokio::time::interval(TICK);

    let result = loop {
        tokio::select! {
            joined = &mut task => break joined,
            _ = ticker.tick() => spinner.tick(),
        }
    };
    spinner.finish();

    result.map_err(|e| anyhow::anyhow!("{} failed: {}", message, e))
}
