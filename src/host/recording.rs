//! In-memory host that records every write.
//!
//! Used by the tests and by embedders that want to drive the panel headless.
//! Timestamps come from tokio's clock, so they follow a paused test clock.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tokio::time::Instant;

use super::Host;
use crate::error::{Result, RevealError};
use crate::state::tilt::TiltStyle;
use crate::types::PanelFlags;

/// One clock text write.
#[derive(Debug, Clone, PartialEq)]
pub struct TextUpdate {
    pub at: Instant,
    pub text: String,
}

#[derive(Debug, Default)]
struct Page {
    styles: Vec<String>,
    stylesheets: Vec<String>,
    panel_created: bool,
    close_button: bool,
    clock: Option<String>,
    flags: PanelFlags,
    flag_history: Vec<PanelFlags>,
    text_updates: Vec<TextUpdate>,
    cards: HashMap<usize, Option<TiltStyle>>,
}

/// Headless [`Host`].
#[derive(Debug, Default)]
pub struct RecordingHost {
    scroll_y: Cell<f64>,
    fail_stylesheets: Cell<bool>,
    page: RefCell<Page>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    /// Make every later [`Host::load_stylesheet`] call fail.
    pub fn fail_stylesheets(&self) {
        self.fail_stylesheets.set(true);
    }

    /// Drop the clock node, as if another script removed it.
    pub fn remove_clock(&self) {
        self.page.borrow_mut().clock = None;
    }

    /// Add a tilt card element.
    pub fn add_card(&self, card: usize) {
        self.page.borrow_mut().cards.insert(card, None);
    }

    pub fn clock_text(&self) -> Option<String> {
        self.page.borrow().clock.clone()
    }

    pub fn text_updates(&self) -> Vec<TextUpdate> {
        self.page.borrow().text_updates.clone()
    }

    pub fn flags(&self) -> PanelFlags {
        self.page.borrow().flags
    }

    pub fn flag_history(&self) -> Vec<PanelFlags> {
        self.page.borrow().flag_history.clone()
    }

    pub fn styles(&self) -> Vec<String> {
        self.page.borrow().styles.clone()
    }

    pub fn stylesheets(&self) -> Vec<String> {
        self.page.borrow().stylesheets.clone()
    }

    pub fn has_panel(&self) -> bool {
        self.page.borrow().panel_created
    }

    pub fn has_close_button(&self) -> bool {
        self.page.borrow().close_button
    }

    /// Last style applied to a card.
    pub fn card_style(&self, card: usize) -> Option<TiltStyle> {
        self.page.borrow().cards.get(&card).copied().flatten()
    }
}

impl Host for RecordingHost {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn inject_styles(&self, css: &str) {
        self.page.borrow_mut().styles.push(css.to_string());
    }

    fn load_stylesheet(&self, url: &str) -> Result<()> {
        if self.fail_stylesheets.get() {
            return Err(RevealError::Stylesheet {
                url: url.to_string(),
                reason: "network unavailable".to_string(),
            });
        }
        self.page.borrow_mut().stylesheets.push(url.to_string());
        Ok(())
    }

    fn create_panel(&self, placeholder: &str, close_button: bool) -> Result<()> {
        let mut page = self.page.borrow_mut();
        page.panel_created = true;
        page.close_button = close_button;
        page.clock = Some(placeholder.to_string());
        Ok(())
    }

    fn set_panel_flags(&self, flags: PanelFlags) -> Result<()> {
        let mut page = self.page.borrow_mut();
        if !page.panel_created {
            return Err(RevealError::MissingElement("container"));
        }
        page.flags = flags;
        page.flag_history.push(flags);
        Ok(())
    }

    fn set_clock_text(&self, text: &str) -> Result<()> {
        let mut page = self.page.borrow_mut();
        let Some(clock) = page.clock.as_mut() else {
            return Err(RevealError::MissingElement("clock"));
        };
        *clock = text.to_string();
        page.text_updates.push(TextUpdate {
            at: Instant::now(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn apply_tilt(&self, card: usize, style: &TiltStyle) -> Result<()> {
        let mut page = self.page.borrow_mut();
        match page.cards.get_mut(&card) {
            Some(slot) => {
                *slot = Some(*style);
                Ok(())
            }
            None => Err(RevealError::MissingElement("card")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_before_panel_are_missing() {
        let host = RecordingHost::new();
        assert!(matches!(
            host.set_clock_text("12:34"),
            Err(RevealError::MissingElement("clock"))
        ));
        assert!(host.set_panel_flags(PanelFlags::ACTIVE).is_err());
    }

    #[test]
    fn test_create_panel_sets_placeholder() {
        let host = RecordingHost::new();
        host.create_panel("XX:XX", true).unwrap();
        assert_eq!(host.clock_text().as_deref(), Some("XX:XX"));
        assert!(host.has_close_button());
        assert!(host.text_updates().is_empty());
    }

    #[test]
    fn test_unknown_card_is_missing() {
        let host = RecordingHost::new();
        let style = crate::state::tilt::tilt_rest();
        assert!(host.apply_tilt(3, &style).is_err());
        host.add_card(3);
        host.apply_tilt(3, &style).unwrap();
        assert_eq!(host.card_style(3), Some(style));
    }
}
