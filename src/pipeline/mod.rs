//! Pipeline - wires input, state and host together.
//!
//! ```text
//! InputEvent → GestureDetector → RevealPanel → state/glow signals → render effect → Host
//! pointer    → TiltGroup → TiltUpdate → Host::apply_tilt
//! ```

mod mount;
mod tilt;

pub use mount::{MountHandle, mount, unmount};
pub use tilt::{TiltHandle, mount_tilt};
