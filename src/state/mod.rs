//! State Module - Pure input state machines
//!
//! Nothing here touches the host or spawns tasks. The pipeline feeds events
//! in and applies what comes out.
//!
//! - [`gesture`] - pull-down and wheel detection
//! - [`tilt`] - pointer-driven card tilt

pub mod gesture;
pub mod tilt;
