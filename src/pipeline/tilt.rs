//! Tilt binding - routes pointer input through a [`TiltGroup`] onto a host.

use std::rc::Rc;

use tracing::debug;

use crate::host::Host;
use crate::state::tilt::{TiltGroup, TiltUpdate};
use crate::types::Rect;

/// Tilt cards bound to a host.
pub struct TiltHandle {
    host: Rc<dyn Host>,
    group: TiltGroup,
}

impl std::fmt::Debug for TiltHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiltHandle").field("group", &self.group).finish()
    }
}

/// Bind tilt cards on `host`, rotating at most `max_rotation_deg`.
pub fn mount_tilt(host: Rc<dyn Host>, max_rotation_deg: f64) -> TiltHandle {
    TiltHandle {
        host,
        group: TiltGroup::new(max_rotation_deg),
    }
}

impl TiltHandle {
    pub fn register(&mut self, card: usize, bounds: Rect, has_highlight: bool) {
        self.group.register(card, bounds, has_highlight);
    }

    pub fn unregister(&mut self, card: usize) {
        self.group.unregister(card);
    }

    pub fn group(&self) -> &TiltGroup {
        &self.group
    }

    /// Pointer moved to client `(x, y)`. Returns how many cards were restyled.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> usize {
        let updates = self.group.pointer_move(x, y);
        updates.iter().filter(|u| self.apply(u)).count()
    }

    /// Pointer left the page.
    pub fn pointer_leave(&mut self) -> bool {
        match self.group.pointer_leave() {
            Some(update) => self.apply(&update),
            None => false,
        }
    }

    fn apply(&self, update: &TiltUpdate) -> bool {
        match self.host.apply_tilt(update.card, &update.style) {
            Ok(()) => true,
            Err(err) => {
                debug!(card = update.card, error = %err, "tilt skipped");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::state::tilt::MAX_ROTATION_DEG;

    #[test]
    fn test_tilt_applies_to_host() {
        let host = Rc::new(RecordingHost::new());
        host.add_card(1);
        let mut tilt = mount_tilt(host.clone(), MAX_ROTATION_DEG);
        tilt.register(1, Rect::new(0.0, 0.0, 100.0, 100.0), true);

        assert_eq!(tilt.pointer_move(50.0, 50.0), 1);
        let style = host.card_style(1).unwrap();
        assert_eq!((style.rotate_x_deg, style.rotate_y_deg), (0.0, 0.0));

        assert!(tilt.pointer_leave());
        let style = host.card_style(1).unwrap();
        assert_eq!(style.highlight.unwrap().opacity, 0.0);
    }

    #[test]
    fn test_missing_card_element_skipped() {
        let host = Rc::new(RecordingHost::new());
        let mut tilt = mount_tilt(host.clone(), MAX_ROTATION_DEG);
        tilt.register(9, Rect::new(0.0, 0.0, 100.0, 100.0), true);

        assert_eq!(tilt.pointer_move(10.0, 10.0), 0);
        assert!(host.card_style(9).is_none());
        assert!(!tilt.pointer_leave());
    }
}
