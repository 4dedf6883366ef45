//! Pointer events and per-contact tracking.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Platform-assigned identifier of one contact, stable for the duration of a gesture.
pub type ContactId = u64;

/// Pointer event in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { id: ContactId, position: Point },
    Move { id: ContactId, position: Point },
    Up { id: ContactId, position: Point },
    /// The platform cancelled the contact (e.g. palm rejection).
    Cancel { id: ContactId },
    /// The contact left the surface while still down.
    Leave { id: ContactId },
    /// Mouse wheel or trackpad scroll.
    Wheel { position: Point, delta: Vec2 },
}

impl PointerEvent {
    /// The contact this event belongs to, if any.
    pub fn contact(&self) -> Option<ContactId> {
        match self {
            PointerEvent::Down { id, .. }
            | PointerEvent::Move { id, .. }
            | PointerEvent::Up { id, .. }
            | PointerEvent::Cancel { id }
            | PointerEvent::Leave { id } => Some(*id),
            PointerEvent::Wheel { .. } => None,
        }
    }
}

/// Last known device position of every active contact.
#[derive(Debug, Clone, Default)]
pub struct ContactTable {
    positions: HashMap<ContactId, Point>,
    /// Contacts in arrival order, so the first two define a pinch.
    order: Vec<ContactId>,
}

impl ContactTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new contact. Returns false, leaving the stored position untouched, if it
    /// was already tracked.
    pub fn insert(&mut self, id: ContactId, position: Point) -> bool {
        match self.positions.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(position);
                self.order.push(id);
                true
            }
        }
    }

    /// Update a tracked contact. Returns the previous position, or `None` if untracked.
    pub fn update(&mut self, id: ContactId, position: Point) -> Option<Point> {
        let slot = self.positions.get_mut(&id)?;
        Some(std::mem::replace(slot, position))
    }

    /// Forget a contact. Returns its last position if it was tracked.
    pub fn remove(&mut self, id: ContactId) -> Option<Point> {
        let last = self.positions.remove(&id)?;
        self.order.retain(|&c| c != id);
        Some(last)
    }

    pub fn get(&self, id: ContactId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The two oldest contacts with their positions.
    pub fn first_pair(&self) -> Option<((ContactId, Point), (ContactId, Point))> {
        let a = *self.order.first()?;
        let b = *self.order.get(1)?;
        Some(((a, self.get(a)?), (b, self.get(b)?)))
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_update_remove() {
        let mut contacts = ContactTable::new();
        assert!(contacts.insert(7, Point::new(1.0, 2.0)));
        assert!(!contacts.insert(7, Point::new(1.0, 2.0)));
        assert_eq!(contacts.update(7, Point::new(3.0, 4.0)), Some(Point::new(1.0, 2.0)));
        assert_eq!(contacts.get(7), Some(Point::new(3.0, 4.0)));
        assert_eq!(contacts.remove(7), Some(Point::new(3.0, 4.0)));
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_duplicate_insert_keeps_position() {
        let mut contacts = ContactTable::new();
        assert!(contacts.insert(1, Point::new(0.0, 0.0)));
        assert!(!contacts.insert(1, Point::new(100.0, 0.0)));
        assert_eq!(contacts.get(1), Some(Point::new(0.0, 0.0)));
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn test_update_untracked_is_ignored() {
        let mut contacts = ContactTable::new();
        assert_eq!(contacts.update(1, Point::ZERO), None);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_first_pair_follows_arrival_order() {
        let mut contacts = ContactTable::new();
        contacts.insert(5, Point::new(0.0, 0.0));
        contacts.insert(2, Point::new(10.0, 0.0));
        contacts.insert(9, Point::new(20.0, 0.0));
        let ((a, _), (b, pb)) = contacts.first_pair().unwrap();
        assert_eq!((a, b), (5, 2));
        assert_eq!(pb, Point::new(10.0, 0.0));

        contacts.remove(5);
        let ((a, _), (b, _)) = contacts.first_pair().unwrap();
        assert_eq!((a, b), (2, 9));
    }

    #[test]
    fn test_event_contact() {
        assert_eq!(PointerEvent::Cancel { id: 3 }.contact(), Some(3));
        let wheel = PointerEvent::Wheel {
            position: Point::ZERO,
            delta: Vec2::new(0.0, 1.0),
        };
        assert_eq!(wheel.contact(), None);
    }
}
