//! Animator - the clock sequence and the panel state machine that drives it.
//!
//! - [`sequence`] - the scramble/reveal steps and scramble text
//! - [`runner`] - plays a sequence onto a [`ClockSink`] until cancelled
//! - [`RevealPanel`] - owns the state, the running tasks and their cancellation

mod panel;
pub mod runner;
pub mod sequence;

pub use panel::RevealPanel;
pub use runner::{ClockSink, RunOutcome, play};
pub use sequence::{AnimationStep, StepKind, build_sequence, scramble_text};
