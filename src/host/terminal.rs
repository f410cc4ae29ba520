//! Terminal host - draws the reveal panel with crossterm.
//!
//! The "page" is a scrollable column of numbered lines. The panel occupies the
//! top rows while active, with the clock centered and a close control in the
//! top-right corner. Cell coordinates are converted to CSS-like pixels with
//! [`CELL_WIDTH_PX`] and [`CELL_HEIGHT_PX`] so the same thresholds apply.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType};
use tracing::trace;

use super::Host;
use crate::error::{Result, RevealError};
use crate::state::tilt::TiltStyle;
use crate::types::{PanelFlags, Rect};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Pixels per terminal column.
pub const CELL_WIDTH_PX: f64 = 8.0;

/// Pixels per terminal row.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Rows covered by the active panel.
const PANEL_ROWS: u16 = 5;

/// Lines of filler content on the page.
const PAGE_LINES: u16 = 200;

const PANEL_BG: Color = Color::Rgb { r: 24, g: 24, b: 32 };
const CLOCK_FG: Color = Color::Rgb { r: 249, g: 249, b: 249 };
const CLOCK_DIM: Color = Color::Rgb { r: 160, g: 160, b: 170 };

// =============================================================================
// TYPES
// =============================================================================

/// A tilt card laid out in cells.
#[derive(Debug, Clone, Copy)]
struct CardCells {
    id: usize,
    col: u16,
    row: u16,
    width: u16,
    height: u16,
    style: Option<TiltStyle>,
}

/// crossterm-backed [`Host`].
#[derive(Debug)]
pub struct TerminalHost {
    width: Cell<u16>,
    height: Cell<u16>,
    scroll_rows: Cell<u16>,
    panel_created: Cell<bool>,
    close_button: Cell<bool>,
    flags: Cell<PanelFlags>,
    clock: RefCell<String>,
    cards: RefCell<Vec<CardCells>>,
}

impl TerminalHost {
    /// Create a host sized to the current terminal.
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            width: Cell::new(width),
            height: Cell::new(height),
            scroll_rows: Cell::new(0),
            panel_created: Cell::new(false),
            close_button: Cell::new(false),
            flags: Cell::new(PanelFlags::NONE),
            clock: RefCell::new(String::new()),
            cards: RefCell::new(Vec::new()),
        })
    }

    pub fn resize(&self, width: u16, height: u16) -> Result<()> {
        self.width.set(width);
        self.height.set(height);
        self.redraw()
    }

    /// Scroll the page by `delta_rows`, clamped to the content.
    pub fn scroll_by(&self, delta_rows: i32) -> Result<()> {
        let max = PAGE_LINES.saturating_sub(self.height.get()) as i32;
        let next = (self.scroll_rows.get() as i32 + delta_rows).clamp(0, max.max(0));
        if next as u16 != self.scroll_rows.get() {
            self.scroll_rows.set(next as u16);
            self.redraw()?;
        }
        Ok(())
    }

    /// Lay out a tilt card and return its bounds in pixels.
    pub fn add_card(&self, id: usize, col: u16, row: u16, width: u16, height: u16) -> Rect {
        self.cards.borrow_mut().push(CardCells {
            id,
            col,
            row,
            width,
            height,
            style: None,
        });
        Rect::new(
            col as f64 * CELL_WIDTH_PX,
            row as f64 * CELL_HEIGHT_PX,
            width as f64 * CELL_WIDTH_PX,
            height as f64 * CELL_HEIGHT_PX,
        )
    }

    /// Whether a click at `(col, row)` lands on the close control.
    pub fn close_button_hit(&self, col: u16, row: u16) -> bool {
        self.close_button.get()
            && self.flags.get().contains(PanelFlags::ACTIVE)
            && row == 0
            && col + 3 >= self.width.get()
    }

    /// Center of a cell in pixels.
    pub fn cell_to_px(col: u16, row: u16) -> (f64, f64) {
        (
            (col as f64 + 0.5) * CELL_WIDTH_PX,
            (row as f64 + 0.5) * CELL_HEIGHT_PX,
        )
    }

    /// Repaint everything.
    pub fn redraw(&self) -> Result<()> {
        let mut out = io::stdout();
        queue!(out, ResetColor, Clear(ClearType::All))?;
        self.queue_page(&mut out)?;
        self.queue_cards(&mut out)?;
        if self.flags.get().contains(PanelFlags::ACTIVE) {
            self.queue_panel(&mut out)?;
        }
        out.flush()?;
        Ok(())
    }

    fn queue_page(&self, out: &mut impl Write) -> io::Result<()> {
        let first = self.scroll_rows.get();
        for row in 0..self.height.get() {
            let line = first + row;
            if line >= PAGE_LINES {
                break;
            }
            let text = if line == 0 {
                "Scroll up or drag down at the top of the page. q quits.".to_string()
            } else {
                format!("{line:>4} ·")
            };
            queue!(out, MoveTo(0, row), Print(text))?;
        }
        Ok(())
    }

    fn queue_cards(&self, out: &mut impl Write) -> io::Result<()> {
        for card in self.cards.borrow().iter() {
            let label = match card.style {
                Some(style) => format!(
                    "x {:+.1}° y {:+.1}°",
                    style.rotate_x_deg, style.rotate_y_deg
                ),
                None => "hover me".to_string(),
            };
            let glow = card
                .style
                .and_then(|s| s.highlight)
                .is_some_and(|h| h.opacity > 0.0);
            let bg = if glow {
                Color::Rgb { r: 70, g: 70, b: 90 }
            } else {
                Color::Rgb { r: 40, g: 40, b: 52 }
            };
            queue!(out, SetBackgroundColor(bg))?;
            for dy in 0..card.height {
                queue!(
                    out,
                    MoveTo(card.col, card.row + dy),
                    Print(" ".repeat(card.width as usize))
                )?;
            }
            let label_col = card.col + card.width.saturating_sub(label.chars().count() as u16) / 2;
            queue!(
                out,
                MoveTo(label_col, card.row + card.height / 2),
                Print(label),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn queue_panel(&self, out: &mut impl Write) -> io::Result<()> {
        let width = self.width.get();
        queue!(out, SetBackgroundColor(PANEL_BG))?;
        for row in 0..PANEL_ROWS.min(self.height.get()) {
            queue!(out, MoveTo(0, row), Print(" ".repeat(width as usize)))?;
        }
        if self.close_button.get() && width >= 2 {
            queue!(out, MoveTo(width - 2, 0), SetForegroundColor(Color::White), Print("×"))?;
        }
        self.queue_clock(out)?;
        queue!(out, ResetColor, SetAttribute(Attribute::Reset))
    }

    fn queue_clock(&self, out: &mut impl Write) -> io::Result<()> {
        let clock = self.clock.borrow();
        let col = (self.width.get() / 2).saturating_sub(clock.chars().count() as u16 / 2);
        let glow = self.flags.get().contains(PanelFlags::GLOW);
        let (fg, attr) = if glow {
            (CLOCK_FG, Attribute::Bold)
        } else {
            (CLOCK_DIM, Attribute::NormalIntensity)
        };
        queue!(
            out,
            MoveTo(col, PANEL_ROWS / 2),
            SetBackgroundColor(PANEL_BG),
            SetForegroundColor(fg),
            SetAttribute(attr),
            Print(clock.as_str()),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
    }
}

impl Host for TerminalHost {
    fn scroll_y(&self) -> f64 {
        self.scroll_rows.get() as f64 * CELL_HEIGHT_PX
    }

    fn inject_styles(&self, css: &str) {
        trace!(bytes = css.len(), "terminal host ignores css");
    }

    fn load_stylesheet(&self, url: &str) -> Result<()> {
        Err(RevealError::Stylesheet {
            url: url.to_string(),
            reason: "terminal renders with its own font".to_string(),
        })
    }

    fn create_panel(&self, placeholder: &str, close_button: bool) -> Result<()> {
        self.panel_created.set(true);
        self.close_button.set(close_button);
        *self.clock.borrow_mut() = placeholder.to_string();
        self.redraw()
    }

    fn set_panel_flags(&self, flags: PanelFlags) -> Result<()> {
        if !self.panel_created.get() {
            return Err(RevealError::MissingElement("container"));
        }
        let previous = self.flags.replace(flags);
        if previous.contains(PanelFlags::ACTIVE) != flags.contains(PanelFlags::ACTIVE) {
            return self.redraw();
        }
        if flags.contains(PanelFlags::ACTIVE) {
            let mut out = io::stdout();
            self.queue_clock(&mut out)?;
            out.flush()?;
        }
        Ok(())
    }

    fn set_clock_text(&self, text: &str) -> Result<()> {
        if !self.panel_created.get() {
            return Err(RevealError::MissingElement("clock"));
        }
        *self.clock.borrow_mut() = text.to_string();
        if self.flags.get().contains(PanelFlags::ACTIVE) {
            let mut out = io::stdout();
            self.queue_clock(&mut out)?;
            out.flush()?;
        }
        Ok(())
    }

    fn apply_tilt(&self, card: usize, style: &TiltStyle) -> Result<()> {
        {
            let mut cards = self.cards.borrow_mut();
            let Some(slot) = cards.iter_mut().find(|c| c.id == card) else {
                return Err(RevealError::MissingElement("card"));
            };
            slot.style = Some(*style);
        }
        let mut out = io::stdout();
        self.queue_cards(&mut out)?;
        if self.flags.get().contains(PanelFlags::ACTIVE) {
            self.queue_panel(&mut out)?;
        }
        out.flush()?;
        Ok(())
    }
}
