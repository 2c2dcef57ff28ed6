//! Disclosure engine: how much of a message is ever on screen.
//!
//! - **mask**: pure projections (asterisk masking, trailing-word display)
//! - **sentence**: sentence tokenizer and sentence-window rendering
//! - **reveal**: timed, cancellable reveal of decrypted text
//! - **masker**: composition buffer with idle masking
//!
//! Both stateful components keep at most one timer pending and cancel it
//! before arming a new one.

pub mod mask;
pub mod masker;
pub mod reveal;
pub mod sentence;
mod timer;

pub use masker::{EditDescriptor, EditKind, InputMasker, MaskedView, DEFAULT_IDLE_MASK};
pub use reveal::{RevealEngine, RevealFrame, RevealPhase, RevealSpeed, RevealTiming, StepRange};
pub use sentence::WindowPolicy;
