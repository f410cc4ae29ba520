//! Core types for pulldown-reveal.
//!
//! These types flow between the gesture detector, the reveal animator and the
//! host page. They carry no behavior of their own beyond small accessors.

use std::fmt;

// =============================================================================
// Panel State
// =============================================================================

/// Lifecycle of the reveal panel.
///
/// This is the single source of truth for both "is the panel visible" and
/// "is the clock animating". Those are derived, never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Off screen. Initial and terminal state.
    #[default]
    Hidden,
    /// Marked visible, slide-in in progress, sequence not started yet.
    Revealing,
    /// Scramble/reveal steps are executing.
    Animating,
    /// Sequence finished, panel stays shown until closed.
    Holding,
    /// Slide-out in progress. Cleanup runs when it settles.
    Closing,
}

impl PanelState {
    /// Whether the panel carries the active (slid-in) class.
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Revealing | Self::Animating | Self::Holding)
    }

    /// Whether a scramble/reveal cycle is executing.
    pub fn is_animating(self) -> bool {
        self == Self::Animating
    }

    /// Whether gesture input must be ignored in this state.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Revealing | Self::Animating | Self::Closing)
    }

    /// Whether a close request is honored in this state.
    pub fn can_close(self) -> bool {
        self.is_visible()
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hidden => "hidden",
            Self::Revealing => "revealing",
            Self::Animating => "animating",
            Self::Holding => "holding",
            Self::Closing => "closing",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Triggers
// =============================================================================

/// Abstract event raised by the gesture detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Pull-down or wheel-up burst at the top of the page.
    Open,
    /// Pull-up or wheel-down burst while the panel is holding.
    Close,
}

/// Why the panel started closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The step sequence ran to the end.
    SequenceComplete,
    /// The close control was activated.
    CloseButton,
    /// The detector raised [`Trigger::Close`].
    Gesture,
    /// The auto-close timeout elapsed.
    Timeout,
    /// The mount was torn down.
    Unmount,
}

// =============================================================================
// Input Events
// =============================================================================

/// Raw vertical input forwarded by the host.
///
/// Coordinates are page Y positions in CSS pixels. Wheel deltas follow the
/// browser convention: negative is upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    TouchEnd,
    MouseDown { y: f64 },
    MouseMove { y: f64 },
    MouseUp,
    Wheel { delta_y: f64 },
}

// =============================================================================
// Geometry
// =============================================================================

/// Axis-aligned rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Whether a client point falls inside the rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }

    /// Center point in client coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

// =============================================================================
// Panel Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Class list mirrored onto the host's panel elements.
    ///
    /// `ACTIVE` slides the container in, `GLOW` pulses the clock text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PanelFlags: u8 {
        const NONE = 0;
        const ACTIVE = 1 << 0;
        const GLOW = 1 << 1;
    }
}

impl PanelFlags {
    /// Flags for a given state and glow signal.
    pub fn from_state(state: PanelState, glow: bool) -> Self {
        let mut flags = Self::NONE;
        if state.is_visible() {
            flags |= Self::ACTIVE;
        }
        if glow {
            flags |= Self::GLOW;
        }
        flags
    }
}
