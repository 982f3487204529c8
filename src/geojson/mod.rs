//! GeoJSON document model and schema validation.
//!
//! - [`types`] - Feature collection types shared by the editor, snapshots and persistence
//! - [`validator`] - Accept/reject for untrusted documents

mod types;
mod validator;

pub use types::{Feature, FeatureCollection, FeatureId, Geometry, Position};
pub use validator::{ValidationError, parse_feature_collection, validate_feature_collection};
