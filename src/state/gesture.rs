//! Gesture Module - Pull-down and wheel burst detection
//!
//! Turns raw touch, mouse and wheel input into [`Trigger`]s. The detector
//! never touches the panel; it only reads the panel state it is handed and
//! returns what the caller should do.
//!
//! # Rules
//!
//! - `Open` needs scroll offset 0, a hidden panel, and a pull or upward wheel
//!   run past its threshold
//! - `Close` needs the two-way option, a holding panel, and a pull-up or
//!   downward wheel run past its threshold
//! - A busy panel (revealing, animating, closing) swallows all input
//!
//! # Example
//!
//! ```ignore
//! let mut detector = GestureDetector::new(&RevealConfig::default());
//! let ctx = GestureContext { scroll_y: 0.0, panel: PanelState::Hidden };
//! for _ in 0..11 {
//!     if let Some(trigger) = detector.handle(InputEvent::Wheel { delta_y: -100.0 }, ctx) {
//!         // Trigger::Open
//!     }
//! }
//! ```

use tracing::{debug, trace};

use crate::config::RevealConfig;
use crate::types::{InputEvent, PanelState, Trigger};

// =============================================================================
// TYPES
// =============================================================================

/// Page context sampled by the host for each input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    /// Current vertical scroll offset of the page.
    pub scroll_y: f64,
    /// Panel state at the time of the event.
    pub panel: PanelState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WheelDirection {
    Up,
    Down,
}

/// In-progress gesture bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureState {
    /// Y where the current touch or held-mouse drag began.
    pub start_y: Option<f64>,
    /// Sum of |delta| over the current same-direction wheel run.
    pub accumulated_wheel_delta: f64,
    wheel_direction: Option<WheelDirection>,
}

impl GestureState {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn reset_wheel(&mut self) {
        self.accumulated_wheel_delta = 0.0;
        self.wheel_direction = None;
    }
}

// =============================================================================
// DETECTOR
// =============================================================================

/// Maps input events to open/close triggers.
#[derive(Debug, Clone)]
pub struct GestureDetector {
    pull_threshold_px: f64,
    wheel_threshold: f64,
    close_gesture: bool,
    state: GestureState,
}

impl GestureDetector {
    /// Create a detector using the thresholds from `config`.
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            pull_threshold_px: config.pull_threshold_px,
            wheel_threshold: config.wheel_threshold,
            close_gesture: config.close_gesture,
            state: GestureState::default(),
        }
    }

    /// Current gesture bookkeeping.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Drop any partial gesture.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Feed one input event. Returns the trigger it completes, if any.
    pub fn handle(&mut self, event: InputEvent, ctx: GestureContext) -> Option<Trigger> {
        if ctx.panel.is_busy() {
            if self.state != GestureState::default() {
                trace!(panel = %ctx.panel, "gesture input ignored while busy");
            }
            self.state.reset();
            return None;
        }

        match event {
            InputEvent::TouchStart { y } | InputEvent::MouseDown { y } => {
                self.state.start_y = Some(y);
                None
            }
            InputEvent::TouchMove { y } | InputEvent::MouseMove { y } => {
                let start_y = self.state.start_y?;
                self.handle_pull(y - start_y, ctx)
            }
            InputEvent::TouchEnd | InputEvent::MouseUp => {
                self.state.start_y = None;
                None
            }
            InputEvent::Wheel { delta_y } => self.handle_wheel(delta_y, ctx),
        }
    }

    fn handle_pull(&mut self, pull_distance: f64, ctx: GestureContext) -> Option<Trigger> {
        let trigger = match ctx.panel {
            PanelState::Hidden
                if ctx.scroll_y == 0.0 && pull_distance > self.pull_threshold_px =>
            {
                Some(Trigger::Open)
            }
            PanelState::Holding
                if self.close_gesture && pull_distance < -self.pull_threshold_px =>
            {
                Some(Trigger::Close)
            }
            _ => None,
        };

        if let Some(trigger) = trigger {
            debug!(?trigger, pull_distance, "pull gesture completed");
            self.state.reset();
        }
        trigger
    }

    fn handle_wheel(&mut self, delta_y: f64, ctx: GestureContext) -> Option<Trigger> {
        let direction = if delta_y < 0.0 {
            WheelDirection::Up
        } else if delta_y > 0.0 {
            WheelDirection::Down
        } else {
            return None;
        };

        if self.state.wheel_direction != Some(direction) {
            self.state.reset_wheel();
            self.state.wheel_direction = Some(direction);
        }

        let trigger = match (direction, ctx.panel) {
            (WheelDirection::Up, PanelState::Hidden) => {
                self.state.accumulated_wheel_delta += delta_y.abs();
                (ctx.scroll_y == 0.0 && self.state.accumulated_wheel_delta > self.wheel_threshold)
                    .then_some(Trigger::Open)
            }
            (WheelDirection::Down, PanelState::Holding) if self.close_gesture => {
                self.state.accumulated_wheel_delta += delta_y;
                (self.state.accumulated_wheel_delta > self.wheel_threshold)
                    .then_some(Trigger::Close)
            }
            _ => {
                self.state.reset_wheel();
                None
            }
        };

        if let Some(trigger) = trigger {
            debug!(
                ?trigger,
                accumulated = self.state.accumulated_wheel_delta,
                "wheel gesture completed"
            );
            self.state.reset_wheel();
        }
        trigger
    }
}

// =============================================================================
// TESTS
// =============================================================================
