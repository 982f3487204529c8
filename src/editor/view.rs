use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_ZOOM};

/// Map camera position. Persisted with the editor state but never recorded in
/// history.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            longitude: DEFAULT_LONGITUDE,
            latitude: DEFAULT_LATITUDE,
            zoom: DEFAULT_ZOOM,
            pitch: 0.0,
            bearing: 0.0,
        }
    }
}
