//! Host scene capability injected into an area shape.

use crate::handle::HandleKind;
use kurbo::Rect;

/// A visual primitive owned by an area shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Area,
    Handle(HandleKind),
}

/// What an area shape needs from the scene it lives in.
///
/// Only the redraw signal is required; placement callbacks default to
/// no-ops for hosts that read geometry back from the shape instead.
pub trait SceneHost {
    /// The view must be redrawn.
    fn mark_dirty(&mut self);

    /// Position, size and visibility of an area's rectangle changed.
    fn place_area(&mut self, _id: &str, _bounds: Rect, _visible: bool) {}

    /// Drawn bounds (position and pulse-scaled size) or visibility of a
    /// handle changed.
    fn place_handle(&mut self, _id: &str, _kind: HandleKind, _bounds: Rect, _visible: bool) {}

    /// A primitive is being destroyed and must be removed from the scene.
    fn detach(&mut self, _id: &str, _primitive: Primitive) {}
}

impl<T: SceneHost + ?Sized> SceneHost for &mut T {
    fn mark_dirty(&mut self) {
        (**self).mark_dirty();
    }

    fn place_area(&mut self, id: &str, bounds: Rect, visible: bool) {
        (**self).place_area(id, bounds, visible);
    }

    fn place_handle(&mut self, id: &str, kind: HandleKind, bounds: Rect, visible: bool) {
        (**self).place_handle(id, kind, bounds, visible);
    }

    fn detach(&mut self, id: &str, primitive: Primitive) {
        (**self).detach(id, primitive);
    }
}

impl<T: SceneHost + ?Sized> SceneHost for Box<T> {
    fn mark_dirty(&mut self) {
        (**self).mark_dirty();
    }

    fn place_area(&mut self, id: &str, bounds: Rect, visible: bool) {
        (**self).place_area(id, bounds, visible);
    }

    fn place_handle(&mut self, id: &str, kind: HandleKind, bounds: Rect, visible: bool) {
        (**self).place_handle(id, kind, bounds, visible);
    }

    fn detach(&mut self, id: &str, primitive: Primitive) {
        (**self).detach(id, primitive);
    }
}
