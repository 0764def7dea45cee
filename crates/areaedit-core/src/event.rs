//! Outbound change notifications.

use crate::area::AreaPatch;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Event names, as seen by listeners.
pub const EVENT_CLICKED: &str = "clicked";
pub const EVENT_DOUBLE_CLICKED: &str = "doubleclicked";
pub const EVENT_UPDATE: &str = "update";
pub const EVENT_DELETE: &str = "delete";

/// Events emitted by an area shape for its owning controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AreaEvent {
    /// Primary press and release on the body that did not move it.
    Clicked,
    /// Second click in quick succession.
    DoubleClicked,
    /// A committed geometry or property change (only changed fields).
    Update(AreaPatch),
    /// The user asked for the area to be removed.
    Delete,
}

impl AreaEvent {
    /// Contract name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            AreaEvent::Clicked => EVENT_CLICKED,
            AreaEvent::DoubleClicked => EVENT_DOUBLE_CLICKED,
            AreaEvent::Update(_) => EVENT_UPDATE,
            AreaEvent::Delete => EVENT_DELETE,
        }
    }
}

/// Ordered queue of pending events, drained by the controller each frame.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<AreaEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: AreaEvent) {
        log::trace!("Queued area event: {}", event.name());
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take all pending events in emission order.
    pub fn drain(&mut self) -> Vec<AreaEvent> {
        self.pending.drain(..).collect()
    }
}
