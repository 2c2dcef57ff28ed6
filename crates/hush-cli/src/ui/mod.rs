//! UI primitives for the Hush CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, styles, symbols
//! - **Render**: Headers, receipts, hints, errors
//! - **Progress**: Spinner around key derivation
//! - **Terminal**: In-place reveal playback and the masked composer
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{UiContext, render::{header, kv}};
//!
//! let ctx = UiContext::from_env(args.json, cli.no_color, cli.ascii);
//! if ctx.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//! println!("{}", header(&ctx, "inspect", None));
//! println!("{}", kv(&ctx, "Salt", &salt_hex));
//! ```

mod context;
mod mode;
pub mod progress;
pub mod render;
pub mod terminal;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{badge, divider, header, hint, kv, print_error, receipt, status};

pub use progress::with_spinner;
