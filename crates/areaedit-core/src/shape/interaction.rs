//! Pointer handling: move by the body, resize by the handles.

use super::{AreaShape, Gesture};
use crate::area::AreaPatch;
use crate::event::AreaEvent;
use crate::handle::HandleKind;
use crate::host::SceneHost;
use crate::input::{ClickKind, MouseButton, PointerEvent};
use kurbo::Point;

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Handle(HandleKind),
    Body,
}

impl<H: SceneHost> AreaShape<H> {
    /// Find what is under `point`. Visible handles win over the body.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        if self.handles_visible() {
            let tolerance = self.config.handle_hit_tolerance;
            if let Some(handle) = self.handles.iter().find(|h| h.hit_test(point, tolerance)) {
                return Some(HitTarget::Handle(handle.kind()));
            }
        }
        if self.rect.is_visible() && self.rect.contains(point) {
            return Some(HitTarget::Body);
        }
        None
    }

    /// Route a pointer event. Returns true if the shape consumed it.
    ///
    /// Double clicks are timed with the clock advanced by
    /// [`AreaShape::tick`]; a host that never ticks sees every pair of
    /// nearby clicks as a double click.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position, button } => self.pointer_up(position, button),
        }
    }

    /// The pointer was lost mid-gesture (e.g. focus loss).
    ///
    /// Whatever valid geometry is in effect is committed, as on a normal
    /// release, but no click is reported.
    pub fn pointer_lost(&mut self) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {}
            Gesture::Body { .. } => {
                if self.moved {
                    self.commit_geometry(true);
                }
            }
            Gesture::Handle(kind) => {
                self.handles[kind.index()].release();
                self.commit_geometry(false);
            }
        }
        self.moved = false;
        self.clicks.reset();
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        if self.gesture != Gesture::Idle {
            // One gesture at a time; the held one keeps the pointer.
            return true;
        }
        match self.hit_test(position) {
            Some(HitTarget::Handle(kind)) => {
                if let Some(event) = self.handles[kind.index()].press() {
                    log::trace!("Area {}: {:?}", self.area.id, event);
                }
                self.gesture = Gesture::Handle(kind);
                true
            }
            Some(HitTarget::Body) => {
                self.gesture = Gesture::Body {
                    offset: self.rect.center() - position,
                    origin: position,
                    dragged: false,
                };
                self.moved = false;
                true
            }
            None => false,
        }
    }

    fn pointer_move(&mut self, position: Point) -> bool {
        if !position.is_finite() {
            log::trace!("Area {}: ignoring non-finite pointer {:?}", self.area.id, position);
            return self.gesture != Gesture::Idle;
        }
        let click_distance = self.config.double_click_distance;
        match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Body {
                offset,
                origin,
                dragged,
            } => {
                if origin.distance(position) > click_distance {
                    *dragged = true;
                }
                let offset = *offset;
                if self.selected {
                    self.move_to(position + offset);
                }
                true
            }
            Gesture::Handle(kind) => {
                let kind = *kind;
                self.drag_handle(kind, position);
                true
            }
        }
    }

    fn pointer_up(&mut self, position: Point, button: MouseButton) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => false,
            Gesture::Body { dragged, .. } => {
                if self.moved {
                    self.commit_geometry(true);
                    self.moved = false;
                } else if dragged {
                    log::trace!("Area {}: unselected drag, no click", self.area.id);
                } else {
                    let kind = self.clicks.click(
                        self.clock,
                        position,
                        self.config.double_click_secs,
                        self.config.double_click_distance,
                    );
                    self.events.push(match kind {
                        ClickKind::Single => AreaEvent::Clicked,
                        ClickKind::Double => AreaEvent::DoubleClicked,
                    });
                }
                true
            }
            Gesture::Handle(kind) => {
                if let Some(event) = self.handles[kind.index()].release() {
                    log::trace!("Area {}: {:?}", self.area.id, event);
                }
                self.commit_geometry(false);
                true
            }
        }
    }

    /// Body drag: the center tracks the pointer (plus the grab offset).
    fn move_to(&mut self, center: Point) {
        self.rect.set_center(center);
        self.moved = true;
        self.sync_rect();
        self.sync_handles();
        self.host.mark_dirty();
    }

    /// One resize frame for the held handle.
    ///
    /// Each axis the handle controls is resolved on its own: an axis whose
    /// extent would drop below the minimum keeps its previous edges, and the
    /// dragged handle snaps back on that axis when handles are re-placed.
    fn drag_handle(&mut self, kind: HandleKind, pointer: Point) {
        if !self.handles[kind.index()].drag() {
            return;
        }

        let rule = kind.resize_rule();
        let min = self.config.min_size;
        let bounds = self.rect.bounds();
        let mut next = bounds;
        let mut accepted = false;

        if let Some(edge) = rule.horizontal {
            match edge.resize(bounds.x0, bounds.x1, pointer.x, min) {
                Some((x0, x1)) => {
                    next.x0 = x0;
                    next.x1 = x1;
                    accepted = true;
                }
                None => log::trace!("Area {}: width below {} rejected", self.area.id, min),
            }
        }
        if let Some(edge) = rule.vertical {
            match edge.resize(bounds.y0, bounds.y1, pointer.y, min) {
                Some((y0, y1)) => {
                    next.y0 = y0;
                    next.y1 = y1;
                    accepted = true;
                }
                None => log::trace!("Area {}: height below {} rejected", self.area.id, min),
            }
        }

        if !accepted {
            return;
        }
        self.rect.set_bounds(next);
        self.sync_rect();
        self.sync_handles();
        self.host.mark_dirty();
    }

    /// Copy the live rectangle into the stored area and emit the geometry.
    ///
    /// A body move always emits. A handle release with unchanged geometry
    /// emits nothing.
    fn commit_geometry(&mut self, always: bool) {
        let bounds = self.rect.bounds();
        if !always && bounds == self.area.bounds() {
            return;
        }
        self.area.set_bounds(bounds);
        log::debug!(
            "Committed area {} at ({}, {}) {}x{}",
            self.area.id,
            self.area.x,
            self.area.y,
            self.area.width,
            self.area.height
        );
        let patch = AreaPatch::geometry(self.area.id.clone(), bounds);
        self.events.push(AreaEvent::Update(patch));
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{RecordingHost, init_logger, selected_shape};
    use super::*;
    use crate::area::Area;
    use kurbo::Rect;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn drag(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// Press at `from`, drag to `to`, release there.
    fn gesture(shape: &mut AreaShape<RecordingHost>, from: Point, to: Point) {
        assert!(shape.handle_pointer(down(from.x, from.y)));
        assert!(shape.handle_pointer(drag(to.x, to.y)));
        assert!(shape.handle_pointer(up(to.x, to.y)));
    }

    fn updates(shape: &mut AreaShape<RecordingHost>) -> Vec<AreaPatch> {
        shape
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                AreaEvent::Update(patch) => Some(patch),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_hit_test_prefers_handles() {
        let shape = selected_shape();
        assert_eq!(
            shape.hit_test(Point::new(100.0, 100.0)),
            Some(HitTarget::Handle(HandleKind::BottomRight))
        );
        assert_eq!(
            shape.hit_test(Point::new(50.0, 2.0)),
            Some(HitTarget::Handle(HandleKind::TopCenter))
        );
        assert_eq!(shape.hit_test(Point::new(50.0, 50.0)), Some(HitTarget::Body));
        assert_eq!(shape.hit_test(Point::new(300.0, 50.0)), None);
    }

    #[test]
    fn test_hidden_handles_are_not_hit() {
        init_logger();
        let area = Area::with_id("a1", "Room", 0.0, 0.0, 100.0, 100.0);
        let shape = AreaShape::with_defaults(area, RecordingHost::default()).unwrap();
        assert_eq!(shape.hit_test(Point::new(2.0, 2.0)), Some(HitTarget::Body));
    }

    #[test]
    fn test_move_body() {
        let mut shape = selected_shape();
        gesture(&mut shape, Point::new(50.0, 50.0), Point::new(80.0, 80.0));

        let updates = updates(&mut shape);
        assert_eq!(
            updates,
            vec![AreaPatch::new("a1").with_geometry(30.0, 30.0, 100.0, 100.0)]
        );
        assert!(!shape.is_moved());
        assert_eq!(shape.area().bounds(), Rect::new(30.0, 30.0, 130.0, 130.0));
        assert_eq!(
            shape.handle(HandleKind::TopLeft).position(),
            Point::new(30.0, 30.0)
        );
        assert!(shape.host().dirty > 0);
    }

    #[test]
    fn test_move_keeps_grab_offset() {
        let mut shape = selected_shape();
        gesture(&mut shape, Point::new(20.0, 30.0), Point::new(40.0, 30.0));
        assert_eq!(shape.area().bounds(), Rect::new(20.0, 0.0, 120.0, 100.0));
    }

    #[test]
    fn test_move_marks_dirty_each_frame() {
        let mut shape = selected_shape();
        shape.handle_pointer(down(50.0, 50.0));
        shape.handle_pointer(drag(55.0, 50.0));
        shape.handle_pointer(drag(60.0, 50.0));
        assert!(shape.is_moved());
        assert_eq!(shape.host().dirty, 2);
        // Not committed until release.
        assert!((shape.area().x - 0.0).abs() < f64::EPSILON);
        assert!(!shape.has_events());
        shape.handle_pointer(up(60.0, 50.0));
        assert!((shape.area().x - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unselected_body_does_not_move() {
        init_logger();
        let area = Area::with_id("a1", "Room", 0.0, 0.0, 100.0, 100.0);
        let mut shape = AreaShape::with_defaults(area, RecordingHost::default()).unwrap();
        gesture(&mut shape, Point::new(50.0, 50.0), Point::new(80.0, 80.0));

        // A drag is not a click, even when nothing moved.
        assert!(!shape.has_events());
        assert_eq!(shape.area().bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(shape.host().dirty, 0);

        // A small wobble within the click distance still counts.
        gesture(&mut shape, Point::new(50.0, 50.0), Point::new(52.0, 51.0));
        assert_eq!(shape.drain_events(), vec![AreaEvent::Clicked]);
    }

    #[test]
    fn test_move_back_to_start_still_commits() {
        let mut shape = selected_shape();
        shape.handle_pointer(down(50.0, 50.0));
        shape.handle_pointer(drag(80.0, 80.0));
        shape.handle_pointer(drag(50.0, 50.0));
        assert!(shape.is_moved());
        shape.handle_pointer(up(50.0, 50.0));

        assert_eq!(
            shape.drain_events(),
            vec![AreaEvent::Update(
                AreaPatch::new("a1").with_geometry(0.0, 0.0, 100.0, 100.0)
            )]
        );
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let mut shape = selected_shape();
        shape.handle_pointer(down(100.0, 50.0));
        assert!(shape.handle_pointer(drag(f64::NAN, 50.0)));
        shape.handle_pointer(up(f64::NAN, 50.0));
        assert_eq!(shape.area().bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!shape.has_events());

        // Body moves ignore it too.
        shape.handle_pointer(down(50.0, 50.0));
        shape.handle_pointer(drag(f64::INFINITY, 60.0));
        shape.handle_pointer(up(50.0, 50.0));
        assert_eq!(shape.area().bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_click_and_double_click() {
        let mut shape = selected_shape();
        shape.handle_pointer(down(50.0, 50.0));
        shape.handle_pointer(up(50.0, 50.0));
        shape.tick(0.2, 0.2);
        shape.handle_pointer(down(51.0, 50.0));
        shape.handle_pointer(up(51.0, 50.0));
        shape.tick(2.0, 1.8);
        shape.handle_pointer(down(50.0, 50.0));
        shape.handle_pointer(up(50.0, 50.0));

        assert_eq!(
            shape.drain_events(),
            vec![AreaEvent::Clicked, AreaEvent::DoubleClicked, AreaEvent::Clicked]
        );
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut shape = selected_shape();
        let consumed = shape.handle_pointer(PointerEvent::Down {
            position: Point::new(50.0, 50.0),
            button: MouseButton::Right,
        });
        assert!(!consumed);
        assert!(!shape.handle_pointer(drag(80.0, 80.0)));
        assert!(!shape.has_events());
    }

    #[test]
    fn test_resize_right_center() {
        let mut shape = selected_shape();
        gesture(&mut shape, Point::new(100.0, 50.0), Point::new(150.0, 50.0));

        assert_eq!(
            updates(&mut shape),
            vec![AreaPatch::new("a1").with_geometry(0.0, 0.0, 150.0, 100.0)]
        );
        assert!(!shape.is_handle_active());
        assert!(!shape.handle(HandleKind::RightCenter).is_selected());
    }

    #[test]
    fn test_resize_below_minimum_rejected() {
        let mut shape = selected_shape();
        gesture(&mut shape, Point::new(100.0, 100.0), Point::new(10.0, 10.0));

        assert!(updates(&mut shape).is_empty());
        assert_eq!(shape.area().bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(
            shape.handle(HandleKind::BottomRight).position(),
            Point::new(100.0, 100.0)
        );
        assert_eq!(shape.host().dirty, 0);
    }

    #[test]
    fn test_resize_rejects_axes_independently() {
        let mut shape = selected_shape();
        // Width would be 10 (rejected), height 150 (accepted).
        gesture(&mut shape, Point::new(0.0, 0.0), Point::new(90.0, -50.0));

        assert_eq!(
            updates(&mut shape),
            vec![AreaPatch::new("a1").with_geometry(0.0, -50.0, 100.0, 150.0)]
        );
        assert_eq!(
            shape.handle(HandleKind::TopLeft).position(),
            Point::new(0.0, -50.0)
        );
    }

    #[test]
    fn test_edge_drag_keeps_other_axis_center() {
        let mut shape = selected_shape();
        // Vertical pointer motion on a horizontal edge handle is ignored.
        gesture(&mut shape, Point::new(0.0, 50.0), Point::new(20.0, 77.0));
        assert_eq!(shape.area().bounds(), Rect::new(20.0, 0.0, 100.0, 100.0));
        assert!((shape.rect().center().y - 50.0).abs() < f64::EPSILON);

        gesture(&mut shape, Point::new(60.0, 100.0), Point::new(10.0, 60.0));
        assert_eq!(shape.area().bounds(), Rect::new(20.0, 0.0, 100.0, 60.0));
        assert!((shape.rect().center().x - 60.0).abs() < f64::EPSILON);

        gesture(&mut shape, Point::new(60.0, 0.0), Point::new(60.0, 20.0));
        assert_eq!(shape.area().bounds(), Rect::new(20.0, 20.0, 100.0, 60.0));
    }

    #[test]
    fn test_corner_drag_keeps_opposite_edges() {
        let cases = [
            (HandleKind::TopLeft, Point::new(-20.0, 30.0)),
            (HandleKind::TopRight, Point::new(140.0, -10.0)),
            (HandleKind::BottomLeft, Point::new(25.0, 160.0)),
            (HandleKind::BottomRight, Point::new(60.0, 45.0)),
        ];
        for (kind, target) in cases {
            let mut shape = selected_shape();
            let start = shape.anchor(kind);
            let rule = kind.resize_rule();
            let opposite_x = match rule.horizontal {
                Some(crate::handle::AxisEdge::Start) => shape.anchor(HandleKind::RightCenter).x,
                _ => shape.anchor(HandleKind::LeftCenter).x,
            };
            let opposite_y = match rule.vertical {
                Some(crate::handle::AxisEdge::Start) => shape.anchor(HandleKind::BottomCenter).y,
                _ => shape.anchor(HandleKind::TopCenter).y,
            };

            gesture(&mut shape, start, target);

            let bounds = shape.area().bounds();
            assert_eq!(shape.anchor(kind), target, "{kind:?}");
            match rule.horizontal {
                Some(crate::handle::AxisEdge::Start) => assert_eq!(bounds.x1, opposite_x),
                _ => assert_eq!(bounds.x0, opposite_x),
            }
            match rule.vertical {
                Some(crate::handle::AxisEdge::Start) => assert_eq!(bounds.y1, opposite_y),
                _ => assert_eq!(bounds.y0, opposite_y),
            }
        }
    }

    #[test]
    fn test_committed_resize_never_below_minimum() {
        let targets = [-200.0, -40.0, 0.0, 10.0, 31.0, 32.0, 33.0, 50.0, 68.0, 69.0, 90.0, 100.0, 250.0];
        for kind in HandleKind::ALL {
            for &tx in &targets {
                for &ty in &targets {
                    let mut shape = selected_shape();
                    let start = shape.anchor(kind);
                    shape.handle_pointer(down(start.x, start.y));
                    shape.handle_pointer(drag(tx, ty));
                    shape.handle_pointer(drag(ty, tx));
                    shape.handle_pointer(up(ty, tx));
                    let area = shape.area();
                    assert!(area.width >= 32.0 && area.height >= 32.0, "{kind:?} {tx} {ty}");
                }
            }
        }
    }

    #[test]
    fn test_resize_marks_dirty_and_moves_handles_live() {
        let mut shape = selected_shape();
        shape.handle_pointer(down(100.0, 50.0));
        assert!(shape.is_handle_active());
        shape.handle_pointer(drag(120.0, 50.0));

        assert_eq!(shape.host().dirty, 1);
        assert_eq!(shape.anchor(HandleKind::TopRight), Point::new(120.0, 0.0));
        assert_eq!(
            shape.handle(HandleKind::BottomCenter).position(),
            Point::new(60.0, 100.0)
        );
        // Not committed until release.
        assert!((shape.area().width - 100.0).abs() < f64::EPSILON);
        assert!(!shape.has_events());
    }

    #[test]
    fn test_second_press_ignored_while_handle_held() {
        let mut shape = selected_shape();
        shape.handle_pointer(down(100.0, 50.0));
        // A press on another handle does not steal the gesture.
        assert!(shape.handle_pointer(down(0.0, 0.0)));
        assert!(!shape.handle(HandleKind::TopLeft).is_selected());
        shape.handle_pointer(drag(130.0, 50.0));
        shape.handle_pointer(up(130.0, 50.0));
        assert_eq!(shape.area().bounds(), Rect::new(0.0, 0.0, 130.0, 100.0));
    }

    #[test]
    fn test_pointer_lost_commits_partial_geometry() {
        let mut shape = selected_shape();
        shape.handle_pointer(down(100.0, 100.0));
        shape.handle_pointer(drag(140.0, 120.0));
        shape.pointer_lost();

        assert!(!shape.is_handle_active());
        assert!(!shape.handle(HandleKind::BottomRight).is_selected());
        assert_eq!(
            updates(&mut shape),
            vec![AreaPatch::new("a1").with_geometry(0.0, 0.0, 140.0, 120.0)]
        );
        // A later release belongs to no gesture.
        assert!(!shape.handle_pointer(up(140.0, 120.0)));
    }

    #[test]
    fn test_pointer_lost_without_move_reports_nothing() {
        let mut shape = selected_shape();
        shape.handle_pointer(down(50.0, 50.0));
        shape.pointer_lost();
        assert!(!shape.has_events());
    }

    #[test]
    fn test_deselect_ends_gesture() {
        let mut shape = selected_shape();
        shape.handle_pointer(down(50.0, 50.0));
        shape.handle_pointer(drag(60.0, 50.0));
        shape.set_selected(false);

        assert!(!shape.is_moved());
        assert_eq!(
            updates(&mut shape),
            vec![AreaPatch::new("a1").with_geometry(10.0, 0.0, 100.0, 100.0)]
        );
    }

    #[test]
    fn test_tick_pulses_held_handle() {
        let mut shape = selected_shape();
        shape.handle_pointer(down(100.0, 50.0));
        shape.tick(0.125, 0.016);
        assert!(shape.handle(HandleKind::RightCenter).scale() > 1.0);
        assert!((shape.handle(HandleKind::LeftCenter).scale() - 1.0).abs() < f64::EPSILON);

        shape.handle_pointer(up(100.0, 50.0));
        shape.tick(1.0, 1.0);
        assert!((shape.handle(HandleKind::RightCenter).scale() - 1.0).abs() < 1e-9);
    }
}
