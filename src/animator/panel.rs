//! Reveal panel - the clock's state machine.
//!
//! ```text
//! Hidden ──open──▶ Revealing ──delay──▶ Animating ──done──▶ Closing ──settle──▶ Hidden
//!                      │                    │       └─hold─▶ Holding ──close──┘
//!                      └───────close────────┴────────────────────────────────▶ Closing
//! ```
//!
//! The state lives in one signal. Visibility and the animating flag are read
//! off it, so they cannot disagree. Three local tasks hang off the panel:
//! the step run, the auto-close timer and the settle timer. Each is cancelled
//! through its own token the moment it stops being relevant.
//!
//! `open` and `close` spawn local tasks and must run inside a tokio
//! [`LocalSet`](tokio::task::LocalSet).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use spark_signals::{Signal, signal};
use tokio::task::{self, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use super::runner::{self, ClockSink, RunOutcome};
use super::sequence::{AnimationStep, build_sequence, scramble_text};
use crate::config::RevealConfig;
use crate::host::Host;
use crate::types::{CloseReason, PanelState};

// =============================================================================
// TASK GUARD
// =============================================================================

/// A spawned local task plus the token that stops it.
struct TaskGuard {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl TaskGuard {
    fn spawn<F, Fut>(make: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: std::future::Future<Output = ()> + 'static,
    {
        let token = CancellationToken::new();
        let handle = task::spawn_local(make(token.clone()));
        Self { token, handle }
    }

    fn cancel(self) {
        self.token.cancel();
        self.handle.abort();
    }
}

// =============================================================================
// PANEL
// =============================================================================

struct PanelInner {
    host: Rc<dyn Host>,
    config: RevealConfig,
    steps: Vec<AnimationStep>,
    state: Signal<PanelState>,
    glow: Signal<bool>,
    rng: RefCell<StdRng>,
    run: RefCell<Option<TaskGuard>>,
    auto_close: RefCell<Option<TaskGuard>>,
    settle: RefCell<Option<TaskGuard>>,
    run_count: Cell<u64>,
}

/// The reveal panel. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct RevealPanel {
    inner: Rc<PanelInner>,
}

impl std::fmt::Debug for RevealPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealPanel")
            .field("state", &self.inner.state.get())
            .field("glow", &self.inner.glow.get())
            .field("runs", &self.inner.run_count.get())
            .finish()
    }
}

impl RevealPanel {
    /// Create a hidden panel that draws onto `host`.
    ///
    /// The host must already hold the panel elements; see
    /// [`mount`](crate::pipeline::mount).
    pub fn new(host: Rc<dyn Host>, config: RevealConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let steps = build_sequence(&config);

        Self {
            inner: Rc::new(PanelInner {
                host,
                config,
                steps,
                state: signal(PanelState::Hidden),
                glow: signal(false),
                rng: RefCell::new(rng),
                run: RefCell::new(None),
                auto_close: RefCell::new(None),
                settle: RefCell::new(None),
                run_count: Cell::new(0),
            }),
        }
    }

    pub fn state(&self) -> PanelState {
        self.inner.state.get()
    }

    pub fn is_visible(&self) -> bool {
        self.state().is_visible()
    }

    pub fn is_animating(&self) -> bool {
        self.state().is_animating()
    }

    pub fn is_glowing(&self) -> bool {
        self.inner.glow.get()
    }

    /// Number of times the panel has been opened.
    pub fn run_count(&self) -> u64 {
        self.inner.run_count.get()
    }

    /// Reactive state, for render effects.
    pub fn state_signal(&self) -> Signal<PanelState> {
        self.inner.state.clone()
    }

    /// Reactive glow flag, for render effects.
    pub fn glow_signal(&self) -> Signal<bool> {
        self.inner.glow.clone()
    }

    pub fn config(&self) -> &RevealConfig {
        &self.inner.config
    }

    /// Slide the panel in and start the step sequence.
    ///
    /// Returns `false` without touching anything unless the panel is hidden.
    pub fn open(&self) -> bool {
        PanelInner::open(&self.inner)
    }

    /// Slide the panel out, abandoning whatever is left of the sequence.
    ///
    /// Returns `false` if the panel is hidden or already closing.
    pub fn close(&self, reason: CloseReason) -> bool {
        PanelInner::begin_close(&self.inner, reason)
    }

    /// The host's slide transition finished. Only a slide-out does anything.
    pub fn transition_end(&self) -> bool {
        match self.state() {
            PanelState::Closing => self.inner.finish_close(),
            state => {
                trace!(%state, "transition end ignored");
                false
            }
        }
    }

    /// Cancel every task and drop straight to hidden.
    ///
    /// Spawns nothing, so it is safe outside a `LocalSet`.
    pub fn shutdown(&self) {
        self.inner.enter_closing(CloseReason::Unmount);
        self.inner.finish_close();
    }
}

impl PanelInner {
    fn open(this: &Rc<Self>) -> bool {
        let state = this.state.get();
        if state != PanelState::Hidden {
            debug!(%state, "open ignored, panel not hidden");
            return false;
        }

        let run_id = this.run_count.get() + 1;
        this.run_count.set(run_id);
        info!(
            run = run_id,
            sequence_ms = this.config.sequence_duration().as_millis() as u64,
            "revealing panel"
        );
        this.state.set(PanelState::Revealing);

        let run_inner = Rc::clone(this);
        let run = TaskGuard::spawn(move |token| async move {
            let delay = run_inner.config.reveal_delay();
            if !delay.is_zero() && runner::wait(delay, &token).await == RunOutcome::Cancelled {
                return;
            }
            run_inner.state.set(PanelState::Animating);

            let tick = run_inner.config.tick_interval();
            let outcome = runner::play(&run_inner.steps, tick, &*run_inner, &token).await;
            if outcome == RunOutcome::Completed {
                PanelInner::sequence_finished(&run_inner);
            }
        });
        *this.run.borrow_mut() = Some(run);

        if let Some(after) = this.config.auto_close_after() {
            let timer_inner = Rc::clone(this);
            let timer = TaskGuard::spawn(move |token| async move {
                if runner::wait(after, &token).await == RunOutcome::Completed {
                    debug!(after_ms = after.as_millis() as u64, "auto-close timeout");
                    PanelInner::begin_close(&timer_inner, CloseReason::Timeout);
                }
            });
            *this.auto_close.borrow_mut() = Some(timer);
        }

        true
    }

    fn sequence_finished(this: &Rc<Self>) {
        // The run is finishing on its own; drop the guard without aborting.
        this.run.borrow_mut().take();

        if this.config.close_after_sequence {
            PanelInner::begin_close(this, CloseReason::SequenceComplete);
        } else {
            info!("sequence finished, holding panel");
            this.state.set(PanelState::Holding);
        }
    }

    fn begin_close(this: &Rc<Self>, reason: CloseReason) -> bool {
        if !this.enter_closing(reason) {
            return false;
        }

        let settle_inner = Rc::clone(this);
        let slide = this.config.slide_duration();
        let settle = TaskGuard::spawn(move |token| async move {
            if runner::wait(slide, &token).await == RunOutcome::Completed {
                trace!("slide settled without transition end");
                settle_inner.finish_close();
            }
        });
        *this.settle.borrow_mut() = Some(settle);
        true
    }

    /// Cancel the run and the auto-close timer, then mark the panel closing.
    fn enter_closing(&self, reason: CloseReason) -> bool {
        let state = self.state.get();
        if !state.can_close() {
            debug!(%state, ?reason, "close ignored");
            return false;
        }

        let run = self.run.borrow_mut().take();
        if let Some(run) = run {
            run.cancel();
        }
        let timer = self.auto_close.borrow_mut().take();
        if let Some(timer) = timer {
            timer.cancel();
        }

        info!(?reason, from = %state, "closing panel");
        self.glow.set(false);
        self.state.set(PanelState::Closing);
        true
    }

    /// Closing → Hidden. Runs its cleanup at most once per close.
    fn finish_close(&self) -> bool {
        if self.state.get() != PanelState::Closing {
            return false;
        }

        let settle = self.settle.borrow_mut().take();
        if let Some(settle) = settle {
            settle.cancel();
        }

        self.show(&self.config.placeholder);
        self.glow.set(false);
        self.state.set(PanelState::Hidden);
        info!("panel hidden");
        true
    }
}

impl ClockSink for PanelInner {
    fn show(&self, text: &str) {
        if let Err(err) = self.host.set_clock_text(text) {
            debug!(error = %err, "clock update skipped");
        }
    }

    fn set_glow(&self, on: bool) {
        self.glow.set(on);
    }

    fn scramble(&self) -> String {
        scramble_text(&mut *self.rng.borrow_mut())
    }
}

// =============================================================================
// TESTS
// =============================================================================
