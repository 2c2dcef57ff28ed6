//! Command handlers, one module per subcommand.

pub mod compose;
pub mod forget;
pub mod inspect;
pub mod misc;
pub mod open;
pub mod seal;
