//! Feature collection data model.
//!
//! The serde representation matches the GeoJSON exchange format exactly, so the
//! same types are used for snapshot export and for the persisted editor state.
//! Untrusted input goes through [`super::validator`] instead of `Deserialize`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::constants::FEATURE_ID_PREFIX;

/// A 2D or 3D coordinate tuple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Xy([f64; 2]),
    Xyz([f64; 3]),
}

#[allow(dead_code)]
impl Position {
    pub fn x(&self) -> f64 {
        match self {
            Position::Xy([x, _]) | Position::Xyz([x, _, _]) => *x,
        }
    }

    pub fn y(&self) -> f64 {
        match self {
            Position::Xy([_, y]) | Position::Xyz([_, y, _]) => *y,
        }
    }

    pub fn z(&self) -> Option<f64> {
        match self {
            Position::Xy(_) => None,
            Position::Xyz([_, _, z]) => Some(*z),
        }
    }
}

impl From<[f64; 2]> for Position {
    fn from(xy: [f64; 2]) -> Self {
        Position::Xy(xy)
    }
}

impl From<[f64; 3]> for Position {
    fn from(xyz: [f64; 3]) -> Self {
        Position::Xyz(xyz)
    }
}

/// One of the seven GeoJSON geometry kinds.
///
/// `GeometryCollection` members are never themselves collections; the
/// validator rejects nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPoint { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    #[allow(dead_code)]
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::LineString { .. } => "LineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPoint { .. } => "MultiPoint",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
            Geometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    pub fn point(position: impl Into<Position>) -> Self {
        Geometry::Point {
            coordinates: position.into(),
        }
    }
}

/// Opaque feature identifier. Imported documents may carry string or numeric
/// ids; the editor always assigns `feature-<uuid>` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    Text(String),
    Number(serde_json::Number),
}

impl FeatureId {
    /// Generate a fresh, globally unique identifier.
    pub fn generate() -> Self {
        FeatureId::Text(format!("{}{}", FEATURE_ID_PREFIX, Uuid::new_v4()))
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::Text(s) => f.write_str(s),
            FeatureId::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry,
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Compare geometry and properties, ignoring the identifier.
    pub fn same_content(&self, other: &Feature) -> bool {
        self.geometry == other.geometry && self.properties == other.properties
    }
}

/// Ordered features. Position is z-order: the last feature is drawn on top.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Replace every feature's identifier with a newly generated one.
    pub fn with_fresh_ids(mut self) -> Self {
        for feature in &mut self.features {
            feature.id = Some(FeatureId::generate());
        }
        self
    }

    /// Compare two collections feature by feature, ignoring identifiers.
    pub fn same_content(&self, other: &FeatureCollection) -> bool {
        self.len() == other.len()
            && self
                .features
                .iter()
                .zip(&other.features)
                .all(|(a, b)| a.same_content(b))
    }
}
