//! Resize handles placed on an area's corners and edge midpoints.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Identity of one of the eight handles around an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    TopLeft,
    TopCenter,
    TopRight,
    LeftCenter,
    RightCenter,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl HandleKind {
    /// All handles, in creation order.
    pub const ALL: [HandleKind; 8] = [
        HandleKind::TopLeft,
        HandleKind::TopCenter,
        HandleKind::TopRight,
        HandleKind::LeftCenter,
        HandleKind::RightCenter,
        HandleKind::BottomLeft,
        HandleKind::BottomCenter,
        HandleKind::BottomRight,
    ];

    /// Position of this handle in [`HandleKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            HandleKind::TopLeft => 0,
            HandleKind::TopCenter => 1,
            HandleKind::TopRight => 2,
            HandleKind::LeftCenter => 3,
            HandleKind::RightCenter => 4,
            HandleKind::BottomLeft => 5,
            HandleKind::BottomCenter => 6,
            HandleKind::BottomRight => 7,
        }
    }

    /// Whether this is a corner handle (resizes both axes).
    pub fn is_corner(self) -> bool {
        let rule = self.resize_rule();
        rule.horizontal.is_some() && rule.vertical.is_some()
    }

    /// Anchor point of this handle on `bounds`.
    pub fn anchor(self, bounds: Rect) -> Point {
        let center = bounds.center();
        match self {
            HandleKind::TopLeft => Point::new(bounds.x0, bounds.y0),
            HandleKind::TopCenter => Point::new(center.x, bounds.y0),
            HandleKind::TopRight => Point::new(bounds.x1, bounds.y0),
            HandleKind::LeftCenter => Point::new(bounds.x0, center.y),
            HandleKind::RightCenter => Point::new(bounds.x1, center.y),
            HandleKind::BottomLeft => Point::new(bounds.x0, bounds.y1),
            HandleKind::BottomCenter => Point::new(center.x, bounds.y1),
            HandleKind::BottomRight => Point::new(bounds.x1, bounds.y1),
        }
    }

    /// Which edge of each axis this handle drags.
    pub fn resize_rule(self) -> ResizeRule {
        use AxisEdge::{End, Start};
        let (horizontal, vertical) = match self {
            HandleKind::TopLeft => (Some(Start), Some(Start)),
            HandleKind::TopCenter => (None, Some(Start)),
            HandleKind::TopRight => (Some(End), Some(Start)),
            HandleKind::LeftCenter => (Some(Start), None),
            HandleKind::RightCenter => (Some(End), None),
            HandleKind::BottomLeft => (Some(Start), Some(End)),
            HandleKind::BottomCenter => (None, Some(End)),
            HandleKind::BottomRight => (Some(End), Some(End)),
        };
        ResizeRule {
            horizontal,
            vertical,
        }
    }
}

/// The moving edge of one axis during a resize.
///
/// `Start` is the left/top edge, `End` the right/bottom edge. The other edge
/// of the axis stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisEdge {
    Start,
    End,
}

impl AxisEdge {
    /// Move this edge of the span `[start, end]` to `pointer`.
    ///
    /// Returns the new span, or `None` when the resulting extent would be
    /// smaller than `min_extent` or is not finite.
    pub fn resize(self, start: f64, end: f64, pointer: f64, min_extent: f64) -> Option<(f64, f64)> {
        let (new_start, new_end) = match self {
            AxisEdge::Start => (pointer, end),
            AxisEdge::End => (start, pointer),
        };
        let extent = new_end - new_start;
        if !extent.is_finite() || extent < min_extent {
            None
        } else {
            Some((new_start, new_end))
        }
    }
}

/// Per-axis resize behaviour of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeRule {
    pub horizontal: Option<AxisEdge>,
    pub vertical: Option<AxisEdge>,
}

/// Interaction state of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleState {
    #[default]
    Idle,
    /// Pointer pressed on the handle.
    Selected,
    /// Pointer pressed and moving.
    Dragging,
}

/// Notifications raised by a handle to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleEvent {
    Selected(HandleKind),
    Released(HandleKind),
}

/// Rate at which a released handle's pulse settles back to rest, per second.
const PULSE_SETTLE_RATE: f64 = 10.0;

/// A draggable marker owned by an area.
///
/// The owner sets its position; the handle only tracks its own press state
/// and visual feedback.
#[derive(Debug, Clone)]
pub struct ResizeHandle {
    kind: HandleKind,
    position: Point,
    visible: bool,
    state: HandleState,
    scale: f64,
    pulse_hz: f64,
    pulse_amplitude: f64,
}

impl ResizeHandle {
    /// Create a hidden, idle handle.
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self {
            kind,
            position,
            visible: false,
            state: HandleState::Idle,
            scale: 1.0,
            pulse_hz: 0.0,
            pulse_amplitude: 0.0,
        }
    }

    /// Set the selected-state pulse.
    pub fn with_pulse(mut self, hz: f64, amplitude: f64) -> Self {
        self.pulse_hz = hz;
        self.pulse_amplitude = amplitude;
        self
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Point::new(x, y);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    /// True while the pointer is held on this handle.
    pub fn is_selected(&self) -> bool {
        self.state != HandleState::Idle
    }

    /// Current visual scale (1.0 at rest).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Drawn bounds for a handle of the given base size.
    pub fn bounds(&self, size: f64) -> Rect {
        let side = size * self.scale;
        Rect::from_center_size(self.position, Size::new(side, side))
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }

    /// Pointer pressed on the handle.
    pub fn press(&mut self) -> Option<HandleEvent> {
        if self.is_selected() {
            return None;
        }
        self.state = HandleState::Selected;
        Some(HandleEvent::Selected(self.kind))
    }

    /// Pointer moved while pressed. Returns false if the handle is not held.
    pub fn drag(&mut self) -> bool {
        if !self.is_selected() {
            return false;
        }
        self.state = HandleState::Dragging;
        true
    }

    /// Pointer released.
    pub fn release(&mut self) -> Option<HandleEvent> {
        if !self.is_selected() {
            return None;
        }
        self.state = HandleState::Idle;
        Some(HandleEvent::Released(self.kind))
    }

    /// Advance visual feedback. Pulses while selected and settles back to
    /// rest otherwise.
    pub fn update(&mut self, time: f64, dt: f64) {
        if self.is_selected() {
            self.scale = 1.0 + self.pulse_amplitude * (TAU * self.pulse_hz * time).sin().abs();
        } else {
            let t = (dt * PULSE_SETTLE_RATE).clamp(0.0, 1.0);
            self.scale += (1.0 - self.scale) * t;
        }
    }
}
