//! # pulldown-reveal
//!
//! A hidden clock panel that slides down from the top of a page when the user
//! over-scrolls at the top, plays a short scramble/reveal sequence, then slides
//! away. Plus a pointer-driven tilt effect for cards.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! panel's state, and a single-threaded tokio runtime for its timers.
//!
//! ## Architecture
//!
//! ```text
//! InputEvent → GestureDetector → RevealPanel → render effect → Host
//! ```
//!
//! The panel draws through a [`Host`], so the same state machine runs against
//! a recording host in tests and a crossterm terminal in the demo.
//!
//! ## Modules
//!
//! - [`types`] - Core types (PanelState, InputEvent, Rect, PanelFlags)
//! - [`config`] - Thresholds, timings and presets, loadable from TOML
//! - [`state`] - Gesture detection and card tilt
//! - [`animator`] - Clock sequence and the panel state machine
//! - [`host`] - Host trait, recording host, terminal host
//! - [`pipeline`] - Mount API

pub mod animator;
pub mod config;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod state;
pub mod style;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::RevealConfig;
pub use error::{Result, RevealError};

pub use animator::{AnimationStep, RevealPanel, StepKind, build_sequence};

pub use host::{Host, RecordingHost, TerminalHost};

pub use pipeline::{MountHandle, TiltHandle, mount, mount_tilt, unmount};

pub use state::gesture::{GestureContext, GestureDetector, GestureState};
pub use state::tilt::{Highlight, TiltGroup, TiltStyle, TiltUpdate, tilt_at, tilt_rest};
