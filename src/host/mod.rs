//! Host Module - The page the panel lives on
//!
//! The panel never builds its own UI. A [`Host`] owns the container, the clock
//! text node, the optional close control and any tilt cards, and exposes the
//! handful of mutations the animator needs.
//!
//! - [`RecordingHost`] - in-memory host that records every write
//! - [`TerminalHost`] - crossterm host that draws the panel in a terminal

mod recording;
mod terminal;

pub use recording::{RecordingHost, TextUpdate};
pub use terminal::{CELL_HEIGHT_PX, CELL_WIDTH_PX, TerminalHost};

use crate::error::Result;
use crate::state::tilt::TiltStyle;
use crate::types::PanelFlags;

/// DOM-like collaborator the panel draws onto.
///
/// Writes that target an element the host does not have return
/// [`RevealError::MissingElement`](crate::RevealError::MissingElement); the
/// caller treats those as no-ops.
pub trait Host {
    /// Current vertical scroll offset of the page.
    fn scroll_y(&self) -> f64;

    /// Add the panel's stylesheet to the page.
    fn inject_styles(&self, css: &str);

    /// Load an external stylesheet (the clock font).
    fn load_stylesheet(&self, url: &str) -> Result<()>;

    /// Create the container, the clock showing `placeholder`, and the close
    /// control when `close_button` is set.
    fn create_panel(&self, placeholder: &str, close_button: bool) -> Result<()>;

    /// Replace the panel's class list.
    fn set_panel_flags(&self, flags: PanelFlags) -> Result<()>;

    /// Overwrite the clock text.
    fn set_clock_text(&self, text: &str) -> Result<()>;

    /// Apply a tilt style to a card. Hosts without cards ignore this.
    fn apply_tilt(&self, card: usize, style: &TiltStyle) -> Result<()> {
        let _ = (card, style);
        Ok(())
    }
}
