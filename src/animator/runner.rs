//! Step runner - plays an [`AnimationStep`] list as awaitable delays.
//!
//! A run is one future. Every suspension point races the step timer against
//! the cancellation token with the token polled first, so once the token is
//! cancelled the run cannot write to the clock again.

use std::time::Duration;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::sequence::{AnimationStep, StepKind};

// =============================================================================
// SINK
// =============================================================================

/// Where a run writes its frames.
pub trait ClockSink {
    /// Overwrite the clock text.
    fn show(&self, text: &str);
    /// Turn the pulsing glow on or off.
    fn set_glow(&self, on: bool);
    /// Produce the next random `DD:DD` frame.
    fn scramble(&self) -> String;
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

// =============================================================================
// RUN
// =============================================================================

/// Play `steps` in order, redrawing scrambles every `tick`.
pub async fn play<S>(
    steps: &[AnimationStep],
    tick: Duration,
    sink: &S,
    cancel: &CancellationToken,
) -> RunOutcome
where
    S: ClockSink + ?Sized,
{
    for (index, step) in steps.iter().enumerate() {
        trace!(step = index, kind = ?step.kind, "step start");
        let outcome = match step.kind {
            StepKind::Scramble => scramble(step.duration, tick, sink, cancel).await,
            StepKind::Reveal => reveal(step, sink, cancel).await,
        };
        if outcome == RunOutcome::Cancelled {
            debug!(step = index, "run cancelled");
            return outcome;
        }
    }
    RunOutcome::Completed
}

/// Sleep until `deadline` unless cancelled first.
pub async fn wait_until(deadline: Instant, cancel: &CancellationToken) -> RunOutcome {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => RunOutcome::Cancelled,
        _ = time::sleep_until(deadline) => RunOutcome::Completed,
    }
}

/// Sleep for `duration` unless cancelled first.
pub async fn wait(duration: Duration, cancel: &CancellationToken) -> RunOutcome {
    wait_until(Instant::now() + duration, cancel).await
}

async fn scramble<S>(
    duration: Duration,
    tick: Duration,
    sink: &S,
    cancel: &CancellationToken,
) -> RunOutcome
where
    S: ClockSink + ?Sized,
{
    let deadline = Instant::now() + duration;
    let frames = if tick.is_zero() {
        0
    } else {
        duration.as_nanos() / tick.as_nanos()
    };

    // First tick completes immediately, so frames land at 0, tick, 2*tick, ...
    let mut interval = time::interval(tick.max(Duration::from_millis(1)));
    for _ in 0..frames {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return RunOutcome::Cancelled,
            _ = interval.tick() => {}
        }
        let frame = sink.scramble();
        sink.show(&frame);
    }

    wait_until(deadline, cancel).await
}

async fn reveal<S>(step: &AnimationStep, sink: &S, cancel: &CancellationToken) -> RunOutcome
where
    S: ClockSink + ?Sized,
{
    if let Some(text) = step.text.as_deref() {
        sink.show(text);
    }
    sink.set_glow(true);

    let outcome = wait(step.duration, cancel).await;
    if outcome == RunOutcome::Completed {
        sink.set_glow(false);
    }
    outcome
}

// =============================================================================
// TESTS
// =============================================================================
