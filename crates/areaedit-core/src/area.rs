//! The edited area record and its partial updates.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Opaque area identifier.
pub type AreaId = String;

/// Open key/value mapping owned by an area.
pub type Properties = Map<String, Value>;

/// A rectangular area on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub(crate) id: AreaId,
    /// Display label.
    pub name: String,
    /// Left edge in scene coordinates.
    pub x: f64,
    /// Top edge in scene coordinates.
    pub y: f64,
    /// Width of the area.
    pub width: f64,
    /// Height of the area.
    pub height: f64,
    /// Free-form properties.
    #[serde(default)]
    pub properties: Properties,
}

impl Area {
    /// Create a new area with a generated id.
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, x, y, width, height)
    }

    /// Create an area with a known id (e.g. loaded from a document).
    pub fn with_id(
        id: impl Into<AreaId>,
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x,
            y,
            width,
            height,
            properties: Properties::new(),
        }
    }

    /// Add a property (builder style).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The area id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the area as a kurbo Rect.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Center of the area.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Size of the area.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Overwrite position and size from a rectangle.
    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.x = bounds.x0;
        self.y = bounds.y0;
        self.width = bounds.width();
        self.height = bounds.height();
    }

    /// Merge the fields present in `patch` into this area.
    ///
    /// Properties are merged recursively: nested objects merge key by key,
    /// any other value replaces the stored one. The id is never changed.
    pub fn merge(&mut self, patch: AreaPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(properties) = patch.properties {
            merge_map(&mut self.properties, properties);
        }
    }
}

fn merge_map(target: &mut Properties, source: Properties) {
    for (key, value) in source {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_map(existing, incoming);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// A partial area: the id plus only the fields that changed.
///
/// This is both the payload of an `Update` event and the input of
/// [`AreaShape::apply_update`](crate::AreaShape::apply_update). Absent
/// fields are skipped when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaPatch {
    pub id: AreaId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl AreaPatch {
    /// Create an empty patch for an area.
    pub fn new(id: impl Into<AreaId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// A patch carrying all four geometry fields of `bounds`.
    pub fn geometry(id: impl Into<AreaId>, bounds: Rect) -> Self {
        Self::new(id).with_geometry(bounds.x0, bounds.y0, bounds.width(), bounds.height())
    }

    /// Set the geometry fields.
    pub fn with_geometry(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the name field.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a single property entry.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value.into());
        self
    }

    /// Whether the patch touches position or size.
    pub fn has_geometry(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }
}
