//! Pointer input
//!
//! Hosts forward raw pointer events; [`PointerTracker`] turns them into drag
//! deltas for the orbit controls. Only the latest pointer position is kept.

use crate::foundation::math::Vec2;

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (left) button, orbits the camera
    Primary,
    /// Secondary (right) button
    Secondary,
    /// Middle button or wheel press
    Auxiliary,
}

/// Raw pointer event in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A button went down
    Down {
        /// Which button
        button: PointerButton,
        /// Pointer position
        position: Vec2,
    },
    /// The pointer moved
    Move {
        /// Pointer position
        position: Vec2,
    },
    /// A button was released
    Up {
        /// Which button
        button: PointerButton,
        /// Pointer position
        position: Vec2,
    },
    /// The pointer left the viewport or the gesture was cancelled
    Cancel,
}

/// Tracks a primary-button drag
#[derive(Debug, Default)]
pub struct PointerTracker {
    last: Option<Vec2>,
}

impl PointerTracker {
    /// Create a tracker with no drag in progress
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the primary button is held
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Feed one event; returns the drag delta since the previous position
    pub fn handle(&mut self, event: PointerEvent) -> Option<Vec2> {
        match event {
            PointerEvent::Down { button: PointerButton::Primary, position } => {
                self.last = Some(position);
                None
            }
            PointerEvent::Move { position } => {
                let previous = self.last.replace(position)?;
                let delta = position - previous;
                (delta != Vec2::zeros()).then_some(delta)
            }
            PointerEvent::Up { button: PointerButton::Primary, .. } | PointerEvent::Cancel => {
                self.last = None;
                None
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Down { button: PointerButton::Primary, position: Vec2::new(x, y) }
    }

    fn moved(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Move { position: Vec2::new(x, y) }
    }

    #[test]
    fn drag_produces_deltas_between_moves() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.handle(down(10.0, 10.0)), None);
        assert_eq!(tracker.handle(moved(15.0, 8.0)), Some(Vec2::new(5.0, -2.0)));
        assert_eq!(tracker.handle(moved(20.0, 8.0)), Some(Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn hovering_without_a_button_does_nothing() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.handle(moved(15.0, 8.0)), None);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn release_and_cancel_end_the_drag() {
        let mut tracker = PointerTracker::new();
        tracker.handle(down(0.0, 0.0));
        tracker.handle(PointerEvent::Up { button: PointerButton::Primary, position: Vec2::zeros() });
        assert_eq!(tracker.handle(moved(5.0, 5.0)), None);

        tracker.handle(down(0.0, 0.0));
        tracker.handle(PointerEvent::Cancel);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn secondary_button_does_not_orbit() {
        let mut tracker = PointerTracker::new();
        tracker.handle(PointerEvent::Down { button: PointerButton::Secondary, position: Vec2::zeros() });
        assert_eq!(tracker.handle(moved(5.0, 5.0)), None);
    }
}
