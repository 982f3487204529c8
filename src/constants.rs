//! Centralized constants used across the application.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Prefix of every identifier the editor assigns to a feature
pub const FEATURE_ID_PREFIX: &str = "feature-";

/// Namespace key the committed editor state is stored under
pub const STORAGE_KEY: &str = "geojsons.com";

/// Version of the persisted state layout
pub const STORAGE_VERSION: u32 = 1;

/// Properties `type` value given to features drawn with the typed marker tool
pub const DEFAULT_TYPED_MARKER_KIND: &str = "cat";

/// Initial map camera, centred on London
pub const DEFAULT_LONGITUDE: f64 = -0.08648816636906795;
pub const DEFAULT_LATITUDE: f64 = 51.519898434555685;
pub const DEFAULT_ZOOM: f64 = 1.0;
