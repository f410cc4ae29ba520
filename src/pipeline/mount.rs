//! Mount API - Page initialization and render effect.
//!
//! This is the entry point the host calls once its content is ready. It
//! injects the styles, asks for the clock font, builds the panel elements,
//! wires the gesture detector to the animator, and installs the one render
//! effect that mirrors panel state onto the host's class list.
//!
//! # Example
//!
//! ```ignore
//! use pulldown_reveal::{mount, RevealConfig, InputEvent};
//!
//! let local = tokio::task::LocalSet::new();
//! local.run_until(async {
//!     let mut handle = mount(host, RevealConfig::default())?;
//!
//!     // Forward page input as it arrives
//!     handle.dispatch(InputEvent::Wheel { delta_y: -120.0 });
//!
//!     // Forward DOM callbacks
//!     handle.transition_end();
//!     handle.click_close();
//!
//!     handle.unmount();
//! }).await;
//! ```

use std::rc::Rc;

use spark_signals::effect;
use tracing::{debug, info, warn};

use crate::animator::RevealPanel;
use crate::config::RevealConfig;
use crate::error::Result;
use crate::host::Host;
use crate::state::gesture::{GestureContext, GestureDetector};
use crate::style::STYLESHEET;
use crate::types::{CloseReason, InputEvent, PanelFlags, PanelState, Trigger};

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`].
///
/// Holds:
/// - The panel (state machine and its tasks)
/// - The gesture detector fed by [`dispatch`](Self::dispatch)
/// - The render effect stop function
pub struct MountHandle {
    host: Rc<dyn Host>,
    panel: RevealPanel,
    detector: GestureDetector,
    close_button: bool,
    stop_effect: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for MountHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountHandle")
            .field("panel", &self.panel)
            .field("detector", &self.detector)
            .field("close_button", &self.close_button)
            .field("mounted", &self.stop_effect.is_some())
            .finish()
    }
}

impl MountHandle {
    /// Feed one page input event through the detector.
    ///
    /// Returns the trigger that fired, if the panel acted on one.
    pub fn dispatch(&mut self, event: InputEvent) -> Option<Trigger> {
        let ctx = GestureContext {
            scroll_y: self.host.scroll_y(),
            panel: self.panel.state(),
        };

        let trigger = self.detector.handle(event, ctx)?;
        let accepted = match trigger {
            Trigger::Open => self.panel.open(),
            Trigger::Close => self.panel.close(CloseReason::Gesture),
        };
        accepted.then_some(trigger)
    }

    /// The close control was activated.
    ///
    /// A no-op when the panel was mounted without one.
    pub fn click_close(&self) -> bool {
        if !self.close_button {
            debug!("close click ignored, no close control");
            return false;
        }
        self.panel.close(CloseReason::CloseButton)
    }

    /// The container's transform transition ended.
    pub fn transition_end(&self) -> bool {
        self.panel.transition_end()
    }

    pub fn state(&self) -> PanelState {
        self.panel.state()
    }

    pub fn panel(&self) -> &RevealPanel {
        &self.panel
    }

    /// Stop every task, hide the panel and stop the render effect.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            self.panel.shutdown();
            if let Err(err) = self.host.set_panel_flags(PanelFlags::NONE) {
                debug!(error = %err, "panel flags not cleared");
            }
            stop();
            info!("reveal panel unmounted");
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Install the reveal panel on `host`.
///
/// This sets up:
/// 1. The panel stylesheet
/// 2. The clock font (failure only logs; text falls back to the default font)
/// 3. The container, clock and optional close control
/// 4. The render effect mirroring panel state onto the host
///
/// Must be called from inside a tokio `LocalSet`.
pub fn mount(host: Rc<dyn Host>, config: RevealConfig) -> Result<MountHandle> {
    config.validate()?;

    host.inject_styles(STYLESHEET);
    if let Err(err) = host.load_stylesheet(&config.font_url) {
        warn!(error = %err, "clock font unavailable, using fallback font");
    }
    host.create_panel(&config.placeholder, config.close_button)?;

    let detector = GestureDetector::new(&config);
    let close_button = config.close_button;
    let panel = RevealPanel::new(Rc::clone(&host), config);

    // The ONE render effect: class list follows state + glow.
    let state = panel.state_signal();
    let glow = panel.glow_signal();
    let render_host = Rc::clone(&host);
    let stop = effect(move || {
        let flags = PanelFlags::from_state(state.get(), glow.get());
        if let Err(err) = render_host.set_panel_flags(flags) {
            debug!(error = %err, "panel flags skipped");
        }
    });

    info!(close_button, "reveal panel mounted");
    Ok(MountHandle {
        host,
        panel,
        detector,
        close_button,
        stop_effect: Some(Box::new(stop)),
    })
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::task::LocalSet;
    use tokio::time;

    use super::*;
    use crate::host::RecordingHost;

    fn mount_recording(config: RevealConfig) -> (Rc<RecordingHost>, MountHandle) {
        let host = Rc::new(RecordingHost::new());
        let handle = mount(host.clone(), config.with_seed(3)).unwrap();
        (host, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_builds_page() {
        LocalSet::new()
            .run_until(async {
                let (host, handle) = mount_recording(RevealConfig::default());

                assert!(host.has_panel());
                assert!(host.has_close_button());
                assert_eq!(host.styles(), vec![STYLESHEET.to_string()]);
                assert_eq!(host.stylesheets().len(), 1);
                assert_eq!(host.clock_text().as_deref(), Some("XX:XX"));
                assert_eq!(host.flags(), PanelFlags::NONE);
                assert_eq!(handle.state(), PanelState::Hidden);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_font_failure_is_not_fatal() {
        LocalSet::new()
            .run_until(async {
                let host = Rc::new(RecordingHost::new());
                host.fail_stylesheets();

                let handle = mount(host.clone(), RevealConfig::default()).unwrap();
                assert!(host.stylesheets().is_empty());
                assert!(host.has_panel());
                assert_eq!(handle.state(), PanelState::Hidden);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_config_rejected() {
        LocalSet::new()
            .run_until(async {
                let host = Rc::new(RecordingHost::new());
                let config = RevealConfig {
                    tick_interval_ms: 0,
                    ..RevealConfig::default()
                };
                assert!(mount(host.clone(), config).is_err());
                assert!(!host.has_panel());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_effect_mirrors_flags() {
        LocalSet::new()
            .run_until(async {
                let (host, mut handle) = mount_recording(RevealConfig::default());

                for _ in 0..11 {
                    handle.dispatch(InputEvent::Wheel { delta_y: -100.0 });
                }
                assert_eq!(host.flags(), PanelFlags::ACTIVE);

                time::sleep(Duration::from_millis(3000)).await;
                for _ in 0..4 {
                    tokio::task::yield_now().await;
                }
                assert_eq!(host.flags(), PanelFlags::ACTIVE | PanelFlags::GLOW);

                assert!(handle.click_close());
                assert_eq!(host.flags(), PanelFlags::NONE);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_close_without_control() {
        LocalSet::new()
            .run_until(async {
                let (host, mut handle) = mount_recording(RevealConfig::auto_close());
                assert!(!host.has_close_button());

                handle.dispatch(InputEvent::TouchStart { y: 0.0 });
                assert_eq!(
                    handle.dispatch(InputEvent::TouchMove { y: 150.0 }),
                    Some(Trigger::Open)
                );
                assert!(!handle.click_close());
                assert!(handle.state().is_visible());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_hides_and_stops() {
        LocalSet::new()
            .run_until(async {
                let (host, mut handle) = mount_recording(RevealConfig::default());
                for _ in 0..11 {
                    handle.dispatch(InputEvent::Wheel { delta_y: -100.0 });
                }
                time::sleep(Duration::from_millis(200)).await;

                handle.unmount();
                assert_eq!(host.flags(), PanelFlags::NONE);
                assert_eq!(host.clock_text().as_deref(), Some("XX:XX"));

                let frozen = host.text_updates().len();
                time::sleep(Duration::from_millis(20_000)).await;
                assert_eq!(host.text_updates().len(), frozen);
            })
            .await;
    }
}
