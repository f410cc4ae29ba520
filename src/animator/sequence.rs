//! Step sequence for the clock animation.
//!
//! A play-through is a flat list of steps: scramble, reveal, scramble, reveal.
//! Built once from config and replayed for every open.

use std::time::Duration;

use rand::Rng;

use crate::config::RevealConfig;

/// What a step does to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Redraw random `DD:DD` every tick.
    Scramble,
    /// Hold a resolved string with the glow on.
    Reveal,
}

/// One entry of the play-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationStep {
    pub kind: StepKind,
    /// Resolved string for [`StepKind::Reveal`], `None` for scrambles.
    pub text: Option<String>,
    pub duration: Duration,
}

impl AnimationStep {
    pub fn scramble(duration: Duration) -> Self {
        Self {
            kind: StepKind::Scramble,
            text: None,
            duration,
        }
    }

    pub fn reveal(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: StepKind::Reveal,
            text: Some(text.into()),
            duration,
        }
    }
}

/// A scramble/reveal pair for every resolved string, in order.
pub fn build_sequence(config: &RevealConfig) -> Vec<AnimationStep> {
    config
        .resolved
        .iter()
        .flat_map(|text| {
            [
                AnimationStep::scramble(config.scramble_duration()),
                AnimationStep::reveal(text.clone(), config.reveal_duration()),
            ]
        })
        .collect()
}

/// Two random digits, a colon, two random digits.
pub fn scramble_text<R: Rng>(rng: &mut R) -> String {
    let mut digit = || char::from(b'0' + rng.random_range(0..10u8));
    let mut text = String::with_capacity(5);
    text.push(digit());
    text.push(digit());
    text.push(':');
    text.push(digit());
    text.push(digit());
    text
}

/// Whether `text` has the `DD:DD` shape a scramble tick produces.
pub fn is_scramble_text(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_sequence_order() {
        let steps = build_sequence(&RevealConfig::default());
        let three_s = Duration::from_millis(3000);

        assert_eq!(
            steps,
            vec![
                AnimationStep::scramble(three_s),
                AnimationStep::reveal("20:25", three_s),
                AnimationStep::scramble(three_s),
                AnimationStep::reveal("CO:MN", three_s),
            ]
        );
    }

    #[test]
    fn test_resolved_order_follows_config() {
        let config = RevealConfig {
            resolved: vec!["CO:MN".to_string(), "20:25".to_string()],
            ..RevealConfig::default()
        };
        let steps = build_sequence(&config);
        assert_eq!(steps[1].text.as_deref(), Some("CO:MN"));
        assert_eq!(steps[3].text.as_deref(), Some("20:25"));
    }

    #[test]
    fn test_scramble_text_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let text = scramble_text(&mut rng);
            assert!(is_scramble_text(&text), "bad scramble {text:?}");
        }
    }

    #[test]
    fn test_scramble_text_is_seed_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(scramble_text(&mut a), scramble_text(&mut b));
        }
    }

    #[test]
    fn test_is_scramble_text_rejects() {
        assert!(!is_scramble_text("XX:XX"));
        assert!(!is_scramble_text("1234"));
        assert!(!is_scramble_text("12345"));
        assert!(!is_scramble_text("12:345"));
        assert!(is_scramble_text("09:59"));
    }
}
