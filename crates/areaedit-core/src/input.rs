//! Pointer events delivered by the host and click classification.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Move { position: Point },
    Up { position: Point, button: MouseButton },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. } => position,
        }
    }
}

/// Result of classifying a completed click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
}

/// Pairs consecutive clicks into double clicks.
///
/// Time comes from the owner's frame clock rather than the wall clock so
/// that classification is deterministic under test. The clock only moves
/// when the owner is ticked; without ticks every pair of nearby clicks is a
/// double click.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_click: Option<(f64, Point)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a click at `time` and `position`.
    pub fn click(&mut self, time: f64, position: Point, window: f64, distance: f64) -> ClickKind {
        if let Some((last_time, last_pos)) = self.last_click {
            if time - last_time <= window && last_pos.distance(position) <= distance {
                // Reset so a triple click is not a second double click.
                self.last_click = None;
                return ClickKind::Double;
            }
        }
        self.last_click = Some((time, position));
        ClickKind::Single
    }

    /// Forget any pending click.
    pub fn reset(&mut self) {
        self.last_click = None;
    }
}
