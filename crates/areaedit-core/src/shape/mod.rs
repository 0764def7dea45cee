//! The interactive area shape: one rectangle plus eight resize handles.
//!
//! An [`AreaShape`] owns the stored [`Area`], the rectangle primitive and
//! its handles. Pointer events move or resize it (see `interaction`), and
//! every committed change is queued as an [`AreaEvent`] for the owning
//! controller to drain.

mod interaction;
mod rect;

pub use interaction::HitTarget;
pub use rect::AreaRect;

use crate::area::{Area, AreaPatch};
use crate::config::EditorConfig;
use crate::error::{AreaError, AreaResult};
use crate::event::{AreaEvent, EventQueue};
use crate::handle::{HandleKind, ResizeHandle};
use crate::host::{Primitive, SceneHost};
use crate::input::ClickTracker;
use kurbo::{Point, Vec2};
use serde_json::Value;

/// Gesture in progress on a shape. At most one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// Pointer held on the body; `offset` is center minus press position.
    /// `dragged` is set once the pointer strays further than a click allows.
    Body {
        offset: Vec2,
        origin: Point,
        dragged: bool,
    },
    /// Pointer held on a handle; other handle drags are ignored.
    Handle(HandleKind),
}

/// An editable area rendered through a [`SceneHost`].
pub struct AreaShape<H: SceneHost> {
    area: Area,
    rect: AreaRect,
    handles: [ResizeHandle; 8],
    selected: bool,
    moved: bool,
    gesture: Gesture,
    clicks: ClickTracker,
    clock: f64,
    config: EditorConfig,
    events: EventQueue,
    host: H,
}

impl<H: SceneHost> AreaShape<H> {
    /// Create a shape for `area`. Handles start hidden.
    pub fn new(area: Area, host: H, config: EditorConfig) -> AreaResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(area.width) || !valid(area.height) {
            return Err(AreaError::InvalidDimensions {
                width: area.width,
                height: area.height,
            });
        }

        let rect = AreaRect::from_area(&area);
        let bounds = rect.bounds();
        let handles = HandleKind::ALL.map(|kind| {
            ResizeHandle::new(kind, kind.anchor(bounds))
                .with_pulse(config.pulse_hz, config.pulse_amplitude)
        });

        let mut shape = Self {
            area,
            rect,
            handles,
            selected: false,
            moved: false,
            gesture: Gesture::Idle,
            clicks: ClickTracker::new(),
            clock: 0.0,
            config,
            events: EventQueue::new(),
            host,
        };
        shape.sync_rect();
        shape.sync_handles();
        log::debug!("Created area shape {}", shape.area.id);
        Ok(shape)
    }

    /// Create a shape with the default configuration.
    pub fn with_defaults(area: Area, host: H) -> AreaResult<Self> {
        Self::new(area, host, EditorConfig::default())
    }

    /// Advance the frame clock and handle feedback.
    pub fn tick(&mut self, elapsed: f64, dt: f64) {
        self.clock = elapsed;
        if !self.selected {
            return;
        }
        let id = &self.area.id;
        let size = self.config.handle_size;
        for handle in &mut self.handles {
            let before = handle.scale();
            handle.update(elapsed, dt);
            if handle.scale() != before {
                self.host
                    .place_handle(id, handle.kind(), handle.bounds(size), handle.is_visible());
            }
        }
    }

    /// Show or hide the handles. Calling it with the current value does
    /// nothing.
    pub fn set_selected(&mut self, selected: bool) {
        if self.selected == selected {
            return;
        }
        if !selected && self.gesture != Gesture::Idle {
            self.pointer_lost();
        }
        self.selected = selected;
        log::debug!("Area {} selected: {}", self.area.id, selected);
        self.sync_handles();
    }

    /// Show or hide the whole shape. Hiding also hides the handles.
    pub fn set_visible(&mut self, visible: bool) {
        if self.rect.is_visible() == visible {
            return;
        }
        if !visible && self.gesture != Gesture::Idle {
            self.pointer_lost();
        }
        self.rect.set_visible(visible);
        self.sync_rect();
        self.sync_handles();
    }

    /// Merge an externally-driven change into the stored area.
    ///
    /// No event is emitted. Width and height are clamped to the configured
    /// minimum; a non-finite extent is replaced by the minimum.
    pub fn apply_update(&mut self, patch: AreaPatch) -> AreaResult<()> {
        if patch.id != self.area.id {
            return Err(AreaError::IdMismatch {
                expected: self.area.id.clone(),
                found: patch.id,
            });
        }

        let previous = self.area.bounds();
        self.area.merge(patch);
        if !self.area.x.is_finite() || !self.area.y.is_finite() {
            log::warn!("Area {} updated to a non-finite position, keeping previous", self.area.id);
            self.area.x = previous.x0;
            self.area.y = previous.y0;
        }

        let min = self.config.min_size;
        let clamp = |v: f64| if v.is_finite() && v >= min { v } else { min };
        let (width, height) = (clamp(self.area.width), clamp(self.area.height));
        if width != self.area.width || height != self.area.height {
            log::warn!(
                "Area {} updated to {}x{}, clamping to minimum {}",
                self.area.id,
                self.area.width,
                self.area.height,
                min
            );
            self.area.width = width;
            self.area.height = height;
        }

        self.rect.set_bounds(self.area.bounds());
        self.sync_rect();
        self.sync_handles();
        log::debug!("Applied external update to area {}", self.area.id);
        Ok(())
    }

    /// Set one property and emit an update carrying only that entry.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        self.area.properties.insert(key.clone(), value.clone());
        let patch = AreaPatch::new(self.area.id.clone()).with_property(key, value);
        self.events.push(AreaEvent::Update(patch));
    }

    /// Ask the controller to remove this area. The shape stays alive until
    /// the controller calls [`AreaShape::destroy`].
    pub fn request_delete(&mut self) {
        self.events.push(AreaEvent::Delete);
    }

    /// Detach all primitives from the host and hand the host back.
    pub fn destroy(self) -> H {
        let Self {
            area,
            handles,
            mut host,
            ..
        } = self;
        for handle in &handles {
            host.detach(&area.id, Primitive::Handle(handle.kind()));
        }
        host.detach(&area.id, Primitive::Area);
        host.mark_dirty();
        log::debug!("Destroyed area shape {}", area.id);
        host
    }

    /// The stored area (committed state).
    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn id(&self) -> &str {
        &self.area.id
    }

    pub fn name(&self) -> &str {
        &self.area.name
    }

    /// The live rectangle (may lead the stored area during a drag).
    pub fn rect(&self) -> &AreaRect {
        &self.rect
    }

    pub fn handles(&self) -> &[ResizeHandle; 8] {
        &self.handles
    }

    pub fn handle(&self, kind: HandleKind) -> &ResizeHandle {
        &self.handles[kind.index()]
    }

    /// Absolute coordinates of an anchor on the live rectangle.
    pub fn anchor(&self, kind: HandleKind) -> Point {
        self.rect.anchor(kind)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_visible(&self) -> bool {
        self.rect.is_visible()
    }

    /// Whether a body drag has moved the shape since the press.
    pub fn is_moved(&self) -> bool {
        self.moved
    }

    /// Whether a handle currently holds the pointer.
    pub fn is_handle_active(&self) -> bool {
        matches!(self.gesture, Gesture::Handle(_))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether events are waiting to be drained.
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Take all pending events in emission order.
    pub fn drain_events(&mut self) -> Vec<AreaEvent> {
        self.events.drain()
    }

    fn handles_visible(&self) -> bool {
        self.selected && self.rect.is_visible()
    }

    fn sync_rect(&mut self) {
        self.host
            .place_area(&self.area.id, self.rect.bounds(), self.rect.is_visible());
    }

    /// Reposition every handle on the live rectangle and refresh visibility.
    fn sync_handles(&mut self) {
        let bounds = self.rect.bounds();
        let visible = self.handles_visible();
        let size = self.config.handle_size;
        for handle in &mut self.handles {
            let position = handle.kind().anchor(bounds);
            handle.set_position(position.x, position.y);
            handle.set_visible(visible);
            self.host
                .place_handle(&self.area.id, handle.kind(), handle.bounds(size), visible);
        }
    }
}

impl<H: SceneHost + std::fmt::Debug> std::fmt::Debug for AreaShape<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AreaShape")
            .field("area", &self.area)
            .field("rect", &self.rect)
            .field("selected", &self.selected)
            .field("moved", &self.moved)
            .field("gesture", &self.gesture)
            .field("host", &self.host)
            .finish()
    }
}
