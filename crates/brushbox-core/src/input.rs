//! Pointer events and gesture capture.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Only shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Whether the modifiers ask to extend the current selection.
    pub fn extends_selection(&self) -> bool {
        self.shift
    }
}

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A normalized pointer sample, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Position in scene coordinates.
    pub position: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, position: Point, modifiers: Modifiers) -> Self {
        Self {
            phase,
            position,
            modifiers,
        }
    }

    pub fn down(position: Point) -> Self {
        Self::new(PointerPhase::Down, position, Modifiers::default())
    }

    pub fn moved(position: Point) -> Self {
        Self::new(PointerPhase::Move, position, Modifiers::default())
    }

    pub fn up(position: Point) -> Self {
        Self::new(PointerPhase::Up, position, Modifiers::default())
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Scopes move/up delivery to the gesture that started with a down.
///
/// A capture begins at pointer-down and ends exactly once at pointer-up.
/// Positions are never bounds-checked, so a drag that leaves the surface
/// still resolves.
#[derive(Debug, Clone, Default)]
pub struct GestureCapture {
    /// Start position of the active gesture.
    drag_start: Option<Point>,
    /// Latest position seen by the active gesture.
    last_position: Point,
}

impl GestureCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Latest position of the active gesture.
    pub fn last_position(&self) -> Option<Point> {
        self.drag_start.map(|_| self.last_position)
    }

    /// Start a gesture. Returns `false` if one is already active.
    pub fn begin(&mut self, position: Point) -> bool {
        if self.is_active() {
            return false;
        }
        self.drag_start = Some(position);
        self.last_position = position;
        true
    }

    /// Record a move. Returns `false` when no gesture is active.
    pub fn track(&mut self, position: Point) -> bool {
        if !self.is_active() {
            return false;
        }
        self.last_position = position;
        true
    }

    /// End the active gesture. Returns `false` when there was none.
    pub fn end(&mut self) -> bool {
        self.drag_start.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_lifecycle() {
        let mut capture = GestureCapture::new();
        assert!(!capture.is_active());
        assert!(!capture.track(Point::new(1.0, 1.0)));

        assert!(capture.begin(Point::new(10.0, 10.0)));
        assert!(!capture.begin(Point::new(20.0, 20.0)));
        assert_eq!(capture.last_position(), Some(Point::new(10.0, 10.0)));

        assert!(capture.track(Point::new(-50.0, 40.0)));
        assert_eq!(capture.last_position(), Some(Point::new(-50.0, 40.0)));

        assert!(capture.end());
        assert!(!capture.end());
        assert!(capture.last_position().is_none());
    }

    #[test]
    fn test_event_builders() {
        let event = PointerEvent::down(Point::new(3.0, 4.0)).with_modifiers(Modifiers::SHIFT);
        assert_eq!(event.phase, PointerPhase::Down);
        assert!(event.modifiers.extends_selection());
        assert!(!PointerEvent::up(Point::ZERO).modifiers.extends_selection());
    }
}
