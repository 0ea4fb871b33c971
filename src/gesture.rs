//! Pointer gesture interpretation
//!
//! Maps raw contact events (1-2 simultaneous pointers) to proposed offset
//! values. Two policies exist:
//! - `Spread`: the offset is half the distance between two contacts
//! - `Drag`: one contact drags the offset relative to its grab point
//!
//! The interpreter only proposes offsets; clamping happens in the scene's
//! layout pass.

use glam::Vec2;

/// Identifier of one active pointer/touch contact
pub type ContactId = u64;

/// Which gesture policy an interpreter runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    /// Two-finger spread: offset = distance(contact1, contact2) / 2
    Spread,
    /// Single-finger vertical drag relative to the grab point
    Drag,
}

/// Registry of active contacts for the spread policy
#[derive(Debug, Clone, Default)]
pub struct SpreadTracker {
    /// Insertion-ordered; at most a handful of entries
    contacts: Vec<(ContactId, Vec2)>,
}

impl SpreadTracker {
    fn down(&mut self, id: ContactId, pos: Vec2) {
        if let Some(slot) = self.contacts.iter_mut().find(|(c, _)| *c == id) {
            slot.1 = pos;
        } else {
            self.contacts.push((id, pos));
        }
    }

    fn moved(&mut self, id: ContactId, pos: Vec2) -> Option<f32> {
        // Unknown ids are tolerated; the stored positions still count
        if let Some(slot) = self.contacts.iter_mut().find(|(c, _)| *c == id) {
            slot.1 = pos;
        }

        // Only a two-finger spread changes the offset; a lone contact
        // moving does nothing
        if self.contacts.len() == 2 {
            Some(self.contacts[0].1.distance(self.contacts[1].1) / 2.0)
        } else {
            None
        }
    }

    fn up(&mut self, id: ContactId) {
        self.contacts.retain(|(c, _)| *c != id);
    }
}

#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    contact: ContactId,
    grab_y: f32,
    grab_offset: f32,
}

/// Single-drag state for the drag policy
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    anchor: Option<DragAnchor>,
}

impl DragTracker {
    fn down(&mut self, id: ContactId, pos: Vec2, current_offset: f32) -> bool {
        // Only the first contact of a multi-touch sequence is tracked
        if self.anchor.is_some() {
            return false;
        }
        self.anchor = Some(DragAnchor {
            contact: id,
            grab_y: pos.y,
            grab_offset: current_offset,
        });
        true
    }

    fn moved(&mut self, id: ContactId, pos: Vec2) -> Option<f32> {
        let anchor = self.anchor?;
        if anchor.contact != id {
            return None;
        }
        Some(anchor.grab_offset + (pos.y - anchor.grab_y))
    }

    fn up(&mut self, id: ContactId) {
        if self.anchor.is_some_and(|a| a.contact == id) {
            self.anchor = None;
        }
    }
}

/// One of the two gesture policies, behind a single event surface
#[derive(Debug, Clone)]
pub enum GestureInterpreter {
    Spread(SpreadTracker),
    Drag(DragTracker),
}

impl GestureInterpreter {
    pub fn new(mode: GestureMode) -> Self {
        match mode {
            GestureMode::Spread => Self::Spread(SpreadTracker::default()),
            GestureMode::Drag => Self::Drag(DragTracker::default()),
        }
    }

    /// Register a contact. Returns true when the event is claimed (drag
    /// policy grabs every down-event it sees; spread lets them pass).
    ///
    /// `current_offset` is the offset at the time of the touch, used as
    /// the drag anchor; the spread policy ignores it.
    pub fn contact_down(&mut self, id: ContactId, pos: Vec2, current_offset: f32) -> bool {
        match self {
            Self::Spread(tracker) => {
                tracker.down(id, pos);
                false
            }
            Self::Drag(tracker) => tracker.down(id, pos, current_offset),
        }
    }

    /// Update a contact position; returns the proposed offset, if any
    pub fn contact_move(&mut self, id: ContactId, pos: Vec2) -> Option<f32> {
        match self {
            Self::Spread(tracker) => tracker.moved(id, pos),
            Self::Drag(tracker) => tracker.moved(id, pos),
        }
    }

    /// Deregister a contact; unknown ids are a no-op
    pub fn contact_up(&mut self, id: ContactId) {
        match self {
            Self::Spread(tracker) => tracker.up(id),
            Self::Drag(tracker) => tracker.up(id),
        }
    }

    /// Number of contacts currently tracked
    pub fn active_contacts(&self) -> usize {
        match self {
            Self::Spread(tracker) => tracker.contacts.len(),
            Self::Drag(tracker) => usize::from(tracker.anchor.is_some()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread_two_contacts_set_half_distance() {
        let mut gesture = GestureInterpreter::new(GestureMode::Spread);
        gesture.contact_down(1, Vec2::new(400.0, 100.0), 0.0);
        gesture.contact_down(2, Vec2::new(400.0, 300.0), 0.0);

        let offset = gesture.contact_move(2, Vec2::new(400.0, 300.0));
        assert_eq!(offset, Some(100.0));
    }

    #[test]
    fn test_spread_uses_full_2d_distance() {
        let mut gesture = GestureInterpreter::new(GestureMode::Spread);
        gesture.contact_down(1, Vec2::new(0.0, 0.0), 0.0);
        gesture.contact_down(2, Vec2::new(300.0, 400.0), 0.0);

        // 3-4-5 triangle: distance 500, offset 250
        let offset = gesture.contact_move(1, Vec2::new(0.0, 0.0));
        assert_eq!(offset, Some(250.0));
    }

    #[test]
    fn test_spread_single_contact_is_inert() {
        let mut gesture = GestureInterpreter::new(GestureMode::Spread);
        gesture.contact_down(1, Vec2::new(100.0, 100.0), 0.0);
        assert_eq!(gesture.contact_move(1, Vec2::new(100.0, 400.0)), None);
    }

    #[test]
    fn test_spread_unknown_up_is_noop() {
        let mut gesture = GestureInterpreter::new(GestureMode::Spread);
        gesture.contact_down(1, Vec2::new(100.0, 100.0), 0.0);
        gesture.contact_up(99);
        assert_eq!(gesture.active_contacts(), 1);
    }

    #[test]
    fn test_spread_third_contact_blocks_offset() {
        let mut gesture = GestureInterpreter::new(GestureMode::Spread);
        gesture.contact_down(1, Vec2::new(0.0, 0.0), 0.0);
        gesture.contact_down(2, Vec2::new(0.0, 100.0), 0.0);
        gesture.contact_down(3, Vec2::new(0.0, 200.0), 0.0);
        assert_eq!(gesture.contact_move(2, Vec2::new(0.0, 150.0)), None);

        // Lifting back down to two reactivates the spread
        gesture.contact_up(3);
        assert!(gesture.contact_move(2, Vec2::new(0.0, 150.0)).is_some());
    }

    #[test]
    fn test_drag_offset_follows_vertical_delta() {
        let mut gesture = GestureInterpreter::new(GestureMode::Drag);
        assert!(gesture.contact_down(7, Vec2::new(400.0, 200.0), 50.0));

        let offset = gesture.contact_move(7, Vec2::new(400.0, 230.0));
        assert_eq!(offset, Some(80.0));

        // Horizontal motion alone changes nothing
        let offset = gesture.contact_move(7, Vec2::new(10.0, 230.0));
        assert_eq!(offset, Some(80.0));
    }

    #[test]
    fn test_drag_claims_only_first_contact() {
        let mut gesture = GestureInterpreter::new(GestureMode::Drag);
        assert!(gesture.contact_down(1, Vec2::new(400.0, 200.0), 50.0));
        assert!(!gesture.contact_down(2, Vec2::new(100.0, 100.0), 50.0));

        // The second contact never moves the offset
        assert_eq!(gesture.contact_move(2, Vec2::new(100.0, 500.0)), None);
        assert_eq!(gesture.contact_move(1, Vec2::new(400.0, 210.0)), Some(60.0));
    }

    #[test]
    fn test_drag_move_without_anchor_is_ignored() {
        let mut gesture = GestureInterpreter::new(GestureMode::Drag);
        assert_eq!(gesture.contact_move(1, Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_drag_up_clears_anchor() {
        let mut gesture = GestureInterpreter::new(GestureMode::Drag);
        gesture.contact_down(1, Vec2::new(400.0, 200.0), 50.0);
        gesture.contact_up(1);
        assert_eq!(gesture.active_contacts(), 0);
        assert_eq!(gesture.contact_move(1, Vec2::new(400.0, 300.0)), None);

        // A fresh grab re-anchors at the new position
        gesture.contact_down(1, Vec2::new(400.0, 500.0), 120.0);
        assert_eq!(gesture.contact_move(1, Vec2::new(400.0, 510.0)), Some(130.0));
    }

    #[test]
    fn test_drag_unrelated_up_keeps_anchor() {
        let mut gesture = GestureInterpreter::new(GestureMode::Drag);
        gesture.contact_down(1, Vec2::new(400.0, 200.0), 50.0);
        gesture.contact_up(99);
        assert_eq!(gesture.active_contacts(), 1);
    }
}
