//! Stylesheet injected into web hosts.
//!
//! Class names match [`PanelFlags`](crate::PanelFlags): `active` slides the
//! container in, `glow` pulses the clock. The 0.5s transform transition is what
//! [`SLIDE_MS`](crate::config::SLIDE_MS) mirrors.

/// Element id of the panel container.
pub const CONTAINER_ID: &str = "easter-egg-container";

/// Element id of the clock text node.
pub const CLOCK_ID: &str = "clock";

/// Element id of the close control.
pub const CLOSE_BUTTON_ID: &str = "close-button";

/// Class applied to tilt cards.
pub const CARD_CLASS: &str = "card";

/// Class of the highlight layer inside a card.
pub const LIGHT_EFFECT_CLASS: &str = "light-effect";

pub const STYLESHEET: &str = r#"
#easter-egg-container {
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 25vh;
    background: transparent;
    overflow: hidden;
    display: flex;
    justify-content: center;
    align-items: center;
    transform: translateY(-100%);
    transition: transform 0.5s ease;
    z-index: 999;
}
#easter-egg-container::before {
    content: "";
    position: absolute;
    inset: 0;
    backdrop-filter: blur(10px);
    -webkit-backdrop-filter: blur(10px);
    mask-image: linear-gradient(to bottom, black 0%, transparent 100%);
    -webkit-mask-image: linear-gradient(to bottom, black 0%, transparent 100%);
}
#easter-egg-container.active {
    transform: translateY(0);
}
#clock {
    font-family: "Space Mono", monospace;
    font-size: 1.5rem;
    color: #f9f9f9;
    transition: text-shadow 0.3s ease;
}
#clock.glow {
    animation: reveal-blink 0.5s ease-in-out infinite alternate;
}
@keyframes reveal-blink {
    from { text-shadow: 0 0 10px #ffffffb2, 0 0 20px #ffffffb2, 0 0 30px #fff; }
    to { text-shadow: none; }
}
#close-button {
    position: absolute;
    top: 10px;
    right: 10px;
    background: none;
    border: none;
    color: white;
    font-size: 1.5rem;
    cursor: pointer;
    opacity: 0;
}
.card {
    position: relative;
    transform-style: preserve-3d;
    transition: transform 0.1s ease-out;
}
.card .light-effect {
    position: absolute;
    inset: 0;
    border-radius: inherit;
    pointer-events: none;
    opacity: 0;
    transition: opacity 0.2s ease;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_targets_ids() {
        assert!(STYLESHEET.contains(&format!("#{CONTAINER_ID}.active")));
        assert!(STYLESHEET.contains(&format!("#{CLOCK_ID}.glow")));
        assert!(STYLESHEET.contains(&format!("#{CLOSE_BUTTON_ID}")));
        assert!(STYLESHEET.contains("transition: transform 0.5s"));
    }

    #[test]
    fn test_stylesheet_styles_tilt_cards() {
        assert!(STYLESHEET.contains(&format!(".{CARD_CLASS} {{")));
        assert!(STYLESHEET.contains(&format!(".{CARD_CLASS} .{LIGHT_EFFECT_CLASS} {{")));
    }
}
