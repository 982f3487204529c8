//! Schema validation for untrusted feature collection documents.
//!
//! Every check reports the JSON path of the offending value so a raw-GeoJSON
//! editor can point the user at the problem. Unknown members (e.g. `bbox`) are
//! accepted and dropped.

use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{Feature, FeatureCollection, FeatureId, Geometry, Position};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{path}: expected {expected}")]
    Schema { path: String, expected: String },
}

impl ValidationError {
    fn schema(path: &str, expected: impl Into<String>) -> Self {
        ValidationError::Schema {
            path: path.to_string(),
            expected: expected.into(),
        }
    }

    /// JSON path of the failing value, if the failure was a schema violation.
    pub fn path(&self) -> Option<&str> {
        match self {
            ValidationError::Json(_) => None,
            ValidationError::Schema { path, .. } => Some(path),
        }
    }
}

type ValidationResult<T> = Result<T, ValidationError>;

/// Parse raw text and validate it as a feature collection.
pub fn parse_feature_collection(text: &str) -> ValidationResult<FeatureCollection> {
    let value: Value = serde_json::from_str(text)?;
    validate_feature_collection(&value)
}

/// Validate an already-parsed JSON value as a feature collection.
pub fn validate_feature_collection(value: &Value) -> ValidationResult<FeatureCollection> {
    let path = "$";
    let object = expect_object(value, path)?;
    expect_type_tag(object, path, "FeatureCollection")?;

    let features_path = field_path(path, "features");
    let features = object
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::schema(&features_path, "an array of features"))?;

    let features = features
        .iter()
        .enumerate()
        .map(|(i, feature)| validate_feature(feature, &index_path(&features_path, i)))
        .collect::<ValidationResult<Vec<_>>>()?;

    Ok(FeatureCollection::new(features))
}

fn validate_feature(value: &Value, path: &str) -> ValidationResult<Feature> {
    let object = expect_object(value, path)?;
    expect_type_tag(object, path, "Feature")?;

    let geometry_path = field_path(path, "geometry");
    let geometry = object
        .get("geometry")
        .ok_or_else(|| ValidationError::schema(&geometry_path, "a geometry"))?;
    let geometry = validate_geometry(geometry, &geometry_path, true)?;

    let properties_path = field_path(path, "properties");
    let properties = object
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| ValidationError::schema(&properties_path, "a properties object"))?;

    let id = match object.get("id") {
        None => None,
        Some(Value::String(s)) => Some(FeatureId::Text(s.clone())),
        Some(Value::Number(n)) => Some(FeatureId::Number(n.clone())),
        Some(_) => {
            return Err(ValidationError::schema(
                &field_path(path, "id"),
                "a string or number id",
            ));
        }
    };

    Ok(Feature {
        id,
        geometry,
        properties,
    })
}

fn validate_geometry(value: &Value, path: &str, allow_collection: bool) -> ValidationResult<Geometry> {
    let object = expect_object(value, path)?;
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::schema(&field_path(path, "type"), "a geometry type"))?;

    if kind == "GeometryCollection" {
        if !allow_collection {
            return Err(ValidationError::schema(
                &field_path(path, "type"),
                "a non-collection geometry inside a GeometryCollection",
            ));
        }
        let members_path = field_path(path, "geometries");
        let members = object
            .get("geometries")
            .and_then(Value::as_array)
            .ok_or_else(|| ValidationError::schema(&members_path, "an array of geometries"))?;
        let geometries = members
            .iter()
            .enumerate()
            .map(|(i, g)| validate_geometry(g, &index_path(&members_path, i), false))
            .collect::<ValidationResult<Vec<_>>>()?;
        return Ok(Geometry::GeometryCollection { geometries });
    }

    let coords_path = field_path(path, "coordinates");
    let coords = object
        .get("coordinates")
        .ok_or_else(|| ValidationError::schema(&coords_path, "coordinates"))?;

    let geometry = match kind {
        "Point" => Geometry::Point {
            coordinates: position(coords, &coords_path)?,
        },
        "LineString" => Geometry::LineString {
            coordinates: positions(coords, &coords_path)?,
        },
        "MultiPoint" => Geometry::MultiPoint {
            coordinates: positions(coords, &coords_path)?,
        },
        "Polygon" => Geometry::Polygon {
            coordinates: nested(coords, &coords_path, positions)?,
        },
        "MultiLineString" => Geometry::MultiLineString {
            coordinates: nested(coords, &coords_path, positions)?,
        },
        "MultiPolygon" => Geometry::MultiPolygon {
            coordinates: nested(coords, &coords_path, |v, p| nested(v, p, positions))?,
        },
        _ => {
            return Err(ValidationError::schema(
                &field_path(path, "type"),
                "one of Point, LineString, Polygon, MultiPoint, MultiLineString, MultiPolygon, GeometryCollection",
            ));
        }
    };
    Ok(geometry)
}

fn position(value: &Value, path: &str) -> ValidationResult<Position> {
    let invalid = || ValidationError::schema(path, "a position of 2 or 3 numbers");
    let items = value.as_array().ok_or_else(invalid)?;
    let numbers = items
        .iter()
        .map(Value::as_f64)
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(invalid)?;
    match numbers.as_slice() {
        [x, y] => Ok(Position::Xy([*x, *y])),
        [x, y, z] => Ok(Position::Xyz([*x, *y, *z])),
        _ => Err(invalid()),
    }
}

fn positions(value: &Value, path: &str) -> ValidationResult<Vec<Position>> {
    nested(value, path, position)
}

fn nested<T>(
    value: &Value,
    path: &str,
    item: impl Fn(&Value, &str) -> ValidationResult<T>,
) -> ValidationResult<Vec<T>> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::schema(path, "an array"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, v)| item(v, &index_path(path, i)))
        .collect()
}

fn expect_object<'a>(value: &'a Value, path: &str) -> ValidationResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::schema(path, "an object"))
}

fn expect_type_tag(object: &Map<String, Value>, path: &str, tag: &str) -> ValidationResult<()> {
    match object.get("type").and_then(Value::as_str) {
        Some(found) if found == tag => Ok(()),
        _ => Err(ValidationError::schema(
            &field_path(path, "type"),
            format!("\"{}\"", tag),
        )),
    }
}

fn field_path(parent: &str, field: &str) -> String {
    format!("{}.{}", parent, field)
}

fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}
