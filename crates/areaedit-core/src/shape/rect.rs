//! The rectangle primitive drawn for an area.

use crate::area::Area;
use crate::handle::HandleKind;
use kurbo::{Point, Rect, Size};

/// Live geometry and visibility of an area's rectangle.
///
/// During a drag this is the authoritative geometry; the stored [`Area`]
/// only catches up on commit.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaRect {
    bounds: Rect,
    visible: bool,
}

impl AreaRect {
    /// Build a visible rectangle matching an area.
    pub fn from_area(area: &Area) -> Self {
        Self {
            bounds: area.bounds(),
            visible: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Move the rectangle so its center lands on `center`, keeping its size.
    pub fn set_center(&mut self, center: Point) {
        self.bounds = Rect::from_center_size(center, self.bounds.size());
    }

    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    /// Absolute coordinates of one of the eight anchor points.
    pub fn anchor(&self, kind: HandleKind) -> Point {
        kind.anchor(self.bounds)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
