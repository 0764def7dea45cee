//! AreaEdit Core Library
//!
//! Interactive editing of axis-aligned rectangular areas: a rectangle with
//! eight resize handles, move/resize by pointer drag with a minimum size,
//! and change events for the owning controller.

pub mod area;
pub mod config;
pub mod error;
pub mod event;
pub mod handle;
pub mod host;
pub mod input;
pub mod shape;

pub use area::{Area, AreaId, AreaPatch, Properties};
pub use config::{EditorConfig, MIN_AREA_SIZE};
pub use error::{AreaError, AreaResult};
pub use event::{AreaEvent, EventQueue};
pub use handle::{AxisEdge, HandleEvent, HandleKind, HandleState, ResizeHandle, ResizeRule};
pub use host::{Primitive, SceneHost};
pub use input::{MouseButton, PointerEvent};
pub use shape::{AreaRect, AreaShape, HitTarget};
