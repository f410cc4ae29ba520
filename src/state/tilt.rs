//! Tilt Module - Pointer-relative card rotation and highlight
//!
//! Each registered card rotates towards the pointer, up to a maximum angle,
//! and a radial highlight follows the pointer across its face. When the
//! pointer leaves the card the rotation snaps back to zero and the highlight
//! fades out.
//!
//! Hosts that deliver real enter/leave events can call [`tilt_at`] and
//! [`tilt_rest`] directly. Hosts that only report raw pointer positions use a
//! [`TiltGroup`], which hit-tests registered bounds and synthesizes the leave.

use tracing::trace;

use crate::types::Rect;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Maximum rotation on either axis, in degrees.
pub const MAX_ROTATION_DEG: f64 = 8.0;

/// Opacity of the highlight while the pointer is over a card.
pub const HIGHLIGHT_OPACITY: f64 = 0.2;

// =============================================================================
// TYPES
// =============================================================================

/// Radial highlight placement, in percent of the card size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub x_pct: f64,
    pub y_pct: f64,
    pub opacity: f64,
}

/// Style to apply to one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltStyle {
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
    /// `None` when the card has no highlight layer.
    pub highlight: Option<Highlight>,
}

impl TiltStyle {
    /// CSS `transform` value.
    pub fn transform_css(&self) -> String {
        format!(
            "rotateX({}deg) rotateY({}deg)",
            self.rotate_x_deg, self.rotate_y_deg
        )
    }

    /// CSS `background` value for the highlight layer.
    pub fn background_css(&self) -> Option<String> {
        self.highlight.map(|h| {
            format!(
                "radial-gradient(circle at {}% {}%, rgba(255,255,255,0.2) 0%, rgba(255,255,255,0) 80%)",
                h.x_pct, h.y_pct
            )
        })
    }
}

// =============================================================================
// COMPUTATION
// =============================================================================

/// Tilt for a pointer at client `(x, y)` over a card with `bounds`.
///
/// Returns `None` for zero-sized bounds.
pub fn tilt_at(bounds: Rect, x: f64, y: f64, max_rotation_deg: f64) -> Option<TiltStyle> {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }

    let center_x = bounds.width / 2.0;
    let center_y = bounds.height / 2.0;
    let local_x = x - bounds.left;
    let local_y = y - bounds.top;

    let rotate_y = ((local_x - center_x) / center_x) * max_rotation_deg;
    let rotate_x = -((local_y - center_y) / center_y) * max_rotation_deg;

    Some(TiltStyle {
        // + 0.0 folds -0.0 into 0.0
        rotate_x_deg: rotate_x.clamp(-max_rotation_deg, max_rotation_deg) + 0.0,
        rotate_y_deg: rotate_y.clamp(-max_rotation_deg, max_rotation_deg) + 0.0,
        highlight: Some(Highlight {
            x_pct: (local_x / bounds.width) * 100.0,
            y_pct: (local_y / bounds.height) * 100.0,
            opacity: HIGHLIGHT_OPACITY,
        }),
    })
}

/// Resting style applied when the pointer leaves a card.
pub fn tilt_rest() -> TiltStyle {
    TiltStyle {
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
        highlight: Some(Highlight {
            x_pct: 50.0,
            y_pct: 50.0,
            opacity: 0.0,
        }),
    }
}

// =============================================================================
// GROUP - hit testing and hover tracking
// =============================================================================

/// One registered card.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TiltCard {
    id: usize,
    bounds: Rect,
    has_highlight: bool,
}

/// A style change for one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltUpdate {
    pub card: usize,
    pub style: TiltStyle,
}

/// Registered cards plus the one currently under the pointer.
#[derive(Debug, Clone)]
pub struct TiltGroup {
    max_rotation_deg: f64,
    cards: Vec<TiltCard>,
    hovered: Option<usize>,
}

impl Default for TiltGroup {
    fn default() -> Self {
        Self::new(MAX_ROTATION_DEG)
    }
}

impl TiltGroup {
    pub fn new(max_rotation_deg: f64) -> Self {
        Self {
            max_rotation_deg,
            cards: Vec::new(),
            hovered: None,
        }
    }

    /// Register a card. Re-registering an id replaces its bounds.
    pub fn register(&mut self, id: usize, bounds: Rect, has_highlight: bool) {
        let card = TiltCard {
            id,
            bounds,
            has_highlight,
        };
        match self.cards.iter_mut().find(|c| c.id == id) {
            Some(existing) => *existing = card,
            None => self.cards.push(card),
        }
    }

    /// Remove a card. Unknown ids are ignored.
    pub fn unregister(&mut self, id: usize) {
        self.cards.retain(|c| c.id != id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }

    /// Card currently under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn card(&self, id: usize) -> Option<&TiltCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Topmost card at a point (last registered wins).
    fn hit_test(&self, x: f64, y: f64) -> Option<&TiltCard> {
        self.cards.iter().rev().find(|c| c.bounds.contains(x, y))
    }

    fn rest_for(card: &TiltCard) -> TiltStyle {
        let mut style = tilt_rest();
        if !card.has_highlight {
            style.highlight = None;
        }
        style
    }

    /// Pointer moved to client `(x, y)`.
    ///
    /// Emits a rest update for the card the pointer left (if any) followed by
    /// a tilt update for the card now under it.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Vec<TiltUpdate> {
        let mut updates = Vec::new();
        let target = self.hit_test(x, y).copied();
        let target_id = target.map(|c| c.id);

        if self.hovered != target_id {
            if let Some(prev) = self.hovered.and_then(|id| self.card(id)) {
                trace!(card = prev.id, "tilt leave");
                updates.push(TiltUpdate {
                    card: prev.id,
                    style: Self::rest_for(prev),
                });
            }
            self.hovered = target_id;
        }

        if let Some(card) = target {
            if let Some(mut style) = tilt_at(card.bounds, x, y, self.max_rotation_deg) {
                if !card.has_highlight {
                    style.highlight = None;
                }
                updates.push(TiltUpdate {
                    card: card.id,
                    style,
                });
            }
        }

        updates
    }

    /// Pointer left the page entirely.
    pub fn pointer_leave(&mut self) -> Option<TiltUpdate> {
        let id = self.hovered.take()?;
        let card = self.card(id)?;
        Some(TiltUpdate {
            card: card.id,
            style: Self::rest_for(card),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect::new(100.0, 50.0, 200.0, 100.0);

    #[test]
    fn test_center_is_flat() {
        let style = tilt_at(CARD, 200.0, 100.0, MAX_ROTATION_DEG).unwrap();
        assert_eq!(style.rotate_x_deg, 0.0);
        assert_eq!(style.rotate_y_deg, 0.0);
        let highlight = style.highlight.unwrap();
        assert_eq!(highlight.x_pct, 50.0);
        assert_eq!(highlight.y_pct, 50.0);
        assert_eq!(highlight.opacity, HIGHLIGHT_OPACITY);
        assert_eq!(style.transform_css(), "rotateX(0deg) rotateY(0deg)");
    }

    #[test]
    fn test_corners_hit_max_rotation() {
        // Top-left: tilt up (positive X) and left (negative Y).
        let style = tilt_at(CARD, 100.0, 50.0, MAX_ROTATION_DEG).unwrap();
        assert_eq!(style.rotate_x_deg, 8.0);
        assert_eq!(style.rotate_y_deg, -8.0);

        // Bottom-right.
        let style = tilt_at(CARD, 300.0, 150.0, MAX_ROTATION_DEG).unwrap();
        assert_eq!(style.rotate_x_deg, -8.0);
        assert_eq!(style.rotate_y_deg, 8.0);
    }

    #[test]
    fn test_rotation_is_clamped_outside_bounds() {
        let style = tilt_at(CARD, 1000.0, -500.0, MAX_ROTATION_DEG).unwrap();
        assert_eq!(style.rotate_y_deg, 8.0);
        assert_eq!(style.rotate_x_deg, 8.0);
    }

    #[test]
    fn test_quarter_offset_is_proportional() {
        let style = tilt_at(CARD, 250.0, 100.0, MAX_ROTATION_DEG).unwrap();
        assert_eq!(style.rotate_y_deg, 4.0);
        assert_eq!(style.highlight.unwrap().x_pct, 75.0);
    }

    #[test]
    fn test_zero_sized_bounds_skipped() {
        assert!(tilt_at(Rect::new(0.0, 0.0, 0.0, 10.0), 0.0, 0.0, 8.0).is_none());
    }

    #[test]
    fn test_rest_style() {
        let style = tilt_rest();
        assert_eq!(style.rotate_x_deg, 0.0);
        assert_eq!(style.rotate_y_deg, 0.0);
        assert_eq!(style.highlight.unwrap().opacity, 0.0);
    }

    #[test]
    fn test_background_css() {
        let style = tilt_at(CARD, 200.0, 100.0, MAX_ROTATION_DEG).unwrap();
        assert_eq!(
            style.background_css().unwrap(),
            "radial-gradient(circle at 50% 50%, rgba(255,255,255,0.2) 0%, rgba(255,255,255,0) 80%)"
        );
    }

    #[test]
    fn test_group_enter_move_leave() {
        let mut group = TiltGroup::default();
        group.register(1, CARD, true);

        assert!(group.pointer_move(0.0, 0.0).is_empty());
        assert_eq!(group.hovered(), None);

        let updates = group.pointer_move(200.0, 100.0);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].card, 1);
        assert_eq!(group.hovered(), Some(1));

        let updates = group.pointer_move(5.0, 5.0);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].style, tilt_rest());
        assert_eq!(group.hovered(), None);
    }

    #[test]
    fn test_group_moving_between_cards() {
        let mut group = TiltGroup::default();
        group.register(1, Rect::new(0.0, 0.0, 100.0, 100.0), true);
        group.register(2, Rect::new(100.0, 0.0, 100.0, 100.0), true);

        group.pointer_move(50.0, 50.0);
        let updates = group.pointer_move(150.0, 50.0);
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].card, 1);
        assert_eq!(updates[0].style.highlight.unwrap().opacity, 0.0);
        assert_eq!(updates[1].card, 2);
        assert_eq!(updates[1].style.rotate_y_deg, 0.0);
    }

    #[test]
    fn test_group_card_without_highlight_still_tilts() {
        let mut group = TiltGroup::default();
        group.register(7, CARD, false);

        let updates = group.pointer_move(250.0, 100.0);
        assert_eq!(updates[0].style.rotate_y_deg, 4.0);
        assert!(updates[0].style.highlight.is_none());
        assert!(updates[0].style.background_css().is_none());

        let leave = group.pointer_leave().unwrap();
        assert!(leave.style.highlight.is_none());
    }

    #[test]
    fn test_group_pointer_leave_without_hover() {
        let mut group = TiltGroup::default();
        group.register(1, CARD, true);
        assert!(group.pointer_leave().is_none());
    }

    #[test]
    fn test_group_unregister_clears_hover() {
        let mut group = TiltGroup::default();
        group.register(1, CARD, true);
        group.pointer_move(200.0, 100.0);

        group.unregister(1);
        assert_eq!(group.hovered(), None);
        assert!(group.is_empty());
        assert!(group.pointer_move(200.0, 100.0).is_empty());
    }
}
