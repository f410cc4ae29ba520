//! Reveal configuration.
//!
//! Every tunable of the easter egg lives here. The historical variants
//! (100 vs 200 px pull, close button vs timed close, which resolved string
//! shows first) are presets over the same struct rather than separate code.
//!
//! # Example
//!
//! ```ignore
//! use pulldown_reveal::RevealConfig;
//!
//! let config = RevealConfig::from_toml_str(r#"
//!     pull_threshold_px = 120
//!     resolved = ["CO:MN", "20:25"]
//! "#)?;
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, RevealError};

// =============================================================================
// DEFAULTS
// =============================================================================

/// Space Mono, the face the clock is styled with.
pub const FONT_STYLESHEET_URL: &str = "https://fonts.googleapis.com/css2?family=Space+Mono:ital,wght@0,400;0,700;1,400;1,700&display=swap";

/// Text shown while the panel is idle.
pub const PLACEHOLDER_TEXT: &str = "XX:XX";

/// Pull distance (px) for touch and mouse drags.
pub const PULL_THRESHOLD_PX: f64 = 200.0;

/// Cumulative wheel delta needed to trigger.
pub const WHEEL_THRESHOLD: f64 = 1000.0;

/// Scramble redraw cadence.
pub const TICK_INTERVAL_MS: u64 = 50;

/// Length of one scramble phase.
pub const SCRAMBLE_MS: u64 = 3000;

/// Length of one glowing reveal hold.
pub const REVEAL_MS: u64 = 3000;

/// Matches the container's `transform 0.5s` transition.
pub const SLIDE_MS: u64 = 500;

/// Timed-close variant timeout.
pub const AUTO_CLOSE_MS: u64 = 10_000;

// =============================================================================
// CONFIG
// =============================================================================

/// Tunables for the reveal panel and its gesture detector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Touch/mouse pull distance in px.
    pub pull_threshold_px: f64,
    /// Cumulative wheel delta.
    pub wheel_threshold: f64,
    /// Allow pull-up / wheel-down to close a holding panel.
    pub close_gesture: bool,
    pub tick_interval_ms: u64,
    pub scramble_ms: u64,
    pub reveal_ms: u64,
    /// Delay between the panel turning visible and the first scramble tick.
    pub reveal_delay_ms: u64,
    /// Fallback for hosts that never report transition end.
    pub slide_ms: u64,
    /// Resolved strings, each preceded by a scramble phase.
    pub resolved: Vec<String>,
    pub placeholder: String,
    /// Insert a close control into the panel.
    pub close_button: bool,
    /// Slide out once the sequence finishes. When false the panel holds.
    pub close_after_sequence: bool,
    /// Force a close this long after opening.
    pub auto_close_ms: Option<u64>,
    /// Fixed seed for the scramble digits. Entropy when absent.
    pub rng_seed: Option<u64>,
    pub font_url: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            pull_threshold_px: PULL_THRESHOLD_PX,
            wheel_threshold: WHEEL_THRESHOLD,
            close_gesture: true,
            tick_interval_ms: TICK_INTERVAL_MS,
            scramble_ms: SCRAMBLE_MS,
            reveal_ms: REVEAL_MS,
            reveal_delay_ms: 0,
            slide_ms: SLIDE_MS,
            resolved: vec!["20:25".to_string(), "CO:MN".to_string()],
            placeholder: PLACEHOLDER_TEXT.to_string(),
            close_button: true,
            close_after_sequence: true,
            auto_close_ms: None,
            rng_seed: None,
            font_url: FONT_STYLESHEET_URL.to_string(),
        }
    }
}

impl RevealConfig {
    /// Timed-close variant: shorter pull, no close control, one-way gestures,
    /// forced close after ten seconds.
    pub fn auto_close() -> Self {
        Self {
            pull_threshold_px: 100.0,
            close_gesture: false,
            close_button: false,
            auto_close_ms: Some(AUTO_CLOSE_MS),
            ..Self::default()
        }
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Same config with a fixed scramble seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn scramble_duration(&self) -> Duration {
        Duration::from_millis(self.scramble_ms)
    }

    pub fn reveal_duration(&self) -> Duration {
        Duration::from_millis(self.reveal_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_ms)
    }

    pub fn auto_close_after(&self) -> Option<Duration> {
        self.auto_close_ms.map(Duration::from_millis)
    }

    /// Number of display updates in one scramble phase.
    pub fn ticks_per_scramble(&self) -> u64 {
        if self.tick_interval_ms == 0 {
            return 0;
        }
        self.scramble_ms / self.tick_interval_ms
    }

    /// Total run length from first tick to the end of the last hold.
    pub fn sequence_duration(&self) -> Duration {
        let per_pair = self.scramble_ms + self.reveal_ms;
        Duration::from_millis(per_pair * self.resolved.len() as u64)
    }

    /// Reject values the animator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.pull_threshold_px > 0.0) {
            return Err(RevealError::InvalidConfig(format!(
                "pull_threshold_px must be positive, got {}",
                self.pull_threshold_px
            )));
        }
        if !(self.wheel_threshold > 0.0) {
            return Err(RevealError::InvalidConfig(format!(
                "wheel_threshold must be positive, got {}",
                self.wheel_threshold
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(RevealError::InvalidConfig(
                "tick_interval_ms must be non-zero".to_string(),
            ));
        }
        if self.ticks_per_scramble() == 0 {
            return Err(RevealError::InvalidConfig(format!(
                "scramble_ms ({}) shorter than one tick ({})",
                self.scramble_ms, self.tick_interval_ms
            )));
        }
        if self.resolved.is_empty() {
            return Err(RevealError::InvalidConfig(
                "resolved needs at least one string".to_string(),
            ));
        }
        let can_close = self.close_after_sequence
            || self.close_button
            || self.close_gesture
            || self.auto_close_ms.is_some();
        if !can_close {
            return Err(RevealError::InvalidConfig(
                "panel has no way to close".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_canonical_variant() {
        let config = RevealConfig::default();
        assert_eq!(config.pull_threshold_px, 200.0);
        assert_eq!(config.wheel_threshold, 1000.0);
        assert_eq!(config.resolved, vec!["20:25", "CO:MN"]);
        assert!(config.close_button);
        assert!(config.auto_close_ms.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_auto_close_preset() {
        let config = RevealConfig::auto_close();
        assert_eq!(config.pull_threshold_px, 100.0);
        assert!(!config.close_button);
        assert!(!config.close_gesture);
        assert_eq!(config.auto_close_after(), Some(Duration::from_secs(10)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ticks_and_sequence_duration() {
        let config = RevealConfig::default();
        assert_eq!(config.ticks_per_scramble(), 60);
        assert_eq!(config.sequence_duration(), Duration::from_millis(12_000));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = RevealConfig::from_toml_str(
            r#"
            pull_threshold_px = 120.0
            resolved = ["CO:MN", "20:25"]
            auto_close_ms = 10000
            "#,
        )
        .unwrap();
        assert_eq!(config.pull_threshold_px, 120.0);
        assert_eq!(config.resolved[0], "CO:MN");
        assert_eq!(config.auto_close_ms, Some(10_000));
        assert_eq!(config.tick_interval_ms, TICK_INTERVAL_MS);
    }

    #[test]
    fn test_from_toml_rejects_unknown_key() {
        let err = RevealConfig::from_toml_str("pull_treshold = 3").unwrap_err();
        assert!(matches!(err, RevealError::ConfigParse(_)));
    }

    #[test]
    fn test_validate_zero_tick() {
        let config = RevealConfig {
            tick_interval_ms: 0,
            ..RevealConfig::default()
        };
        assert!(matches!(config.validate(), Err(RevealError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_scramble_shorter_than_tick() {
        let config = RevealConfig {
            scramble_ms: 40,
            ..RevealConfig::default()
        };
        assert_eq!(config.ticks_per_scramble(), 0);
        assert!(matches!(config.validate(), Err(RevealError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_empty_resolved() {
        let config = RevealConfig {
            resolved: Vec::new(),
            ..RevealConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unclosable() {
        let config = RevealConfig {
            close_after_sequence: false,
            close_button: false,
            close_gesture: false,
            auto_close_ms: None,
            ..RevealConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("no way to close"));
    }
}
