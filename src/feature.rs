//! Map features: geometry plus the attribute row used for classification.

use std::fmt;

use crate::types::{Coord, Envelope};

/// Source layer a feature was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Road,
    Railway,
    Waterway,
    LandUse,
    WaterArea,
    Admin,
}

impl Layer {
    /// Keyword used for this layer in map sources
    pub fn keyword(self) -> &'static str {
        match self {
            Layer::Road => "road",
            Layer::Railway => "railway",
            Layer::Waterway => "waterway",
            Layer::LandUse => "landuse",
            Layer::WaterArea => "waterarea",
            Layer::Admin => "admin",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Layer> {
        match keyword {
            "road" => Some(Layer::Road),
            "railway" => Some(Layer::Railway),
            "waterway" => Some(Layer::Waterway),
            "landuse" => Some(Layer::LandUse),
            "waterarea" => Some(Layer::WaterArea),
            "admin" => Some(Layer::Admin),
            _ => None,
        }
    }

    /// Polygon layers are tiled; the rest get flowed along their path.
    pub fn area_kind(self) -> Option<AreaKind> {
        match self {
            Layer::LandUse => Some(AreaKind::Land),
            Layer::WaterArea => Some(AreaKind::Water),
            Layer::Admin => Some(AreaKind::Admin),
            Layer::Road | Layer::Railway | Layer::Waterway => None,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Category of a polygon feature, selects the fallback label color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    Water,
    Land,
    Admin,
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AreaKind::Water => "Water",
            AreaKind::Land => "Land",
            AreaKind::Admin => "Admin",
        })
    }
}

/// Classification fields of a feature
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes {
    /// Type code within the layer, e.g. `primary`, `river`, `park`
    pub kind: String,
    /// Proper name; blank names fall back to the classification's title
    pub name: Option<String>,
    /// Stacking key (z-order for roads, area for land use)
    pub order: Option<f64>,
    /// Administrative level
    pub level: Option<i64>,
}

impl Attributes {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_order(mut self, order: f64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    /// The name if it has any visible content
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// A single mapped entity. Read-only once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    layer: Layer,
    attrs: Attributes,
    coords: Vec<Coord>,
    envelope: Envelope,
}

impl Feature {
    pub fn new(layer: Layer, attrs: Attributes, coords: Vec<Coord>) -> Self {
        let envelope = Envelope::enclosing(&coords);
        Self {
            layer,
            attrs,
            coords,
            envelope,
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Name if present, otherwise `default`
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.attrs.display_name().unwrap_or(default)
    }
}
