//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// World units per degree of longitude/latitude.
/// Boundary geometry and markers are placed on a plate-carrée plane.
pub const WORLD_UNITS_PER_DEGREE: f32 = 10.0;

/// Initial view center (longitude, latitude) at startup
pub const INITIAL_CENTER_LNG: f64 = -70.9;
pub const INITIAL_CENTER_LAT: f64 = 42.35;

/// Initial zoom level at startup
pub const INITIAL_ZOOM: f32 = 3.0;

/// Zoom level the camera flies to when a country is selected
pub const FLY_TO_ZOOM: f32 = 4.0;

/// Duration of the fly-to camera animation in seconds
pub const FLY_TO_DURATION_SECS: f32 = 1.2;

/// Side length of a marker sprite in world units
pub const MARKER_SIZE: f32 = 12.0;

/// Default base URL of the marker API backend
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Default URL of the country boundary GeoJSON dataset
pub const DEFAULT_BOUNDARIES_URL: &str =
    "https://d2ad6b4ur7yvpq.cloudfront.net/naturalearth-3.3.0/ne_50m_admin_0_countries.geojson";

/// Bundled country centroid table
pub const COUNTRIES_FILE: &str = "assets/countries.json";
