//! Conversion between geographic (lng/lat degrees) and world coordinates.
//!
//! The map plane is plate-carrée: one degree maps to a fixed number of world
//! units on both axes. Zoom levels follow the usual halve-the-scale-per-level
//! convention, anchored so the initial zoom renders at scale 1.

use bevy::prelude::*;

use crate::constants::{INITIAL_ZOOM, WORLD_UNITS_PER_DEGREE};

/// Geographic position → world position
pub fn geo_to_world(lng: f64, lat: f64) -> Vec2 {
    Vec2::new(
        (lng as f32) * WORLD_UNITS_PER_DEGREE,
        (lat as f32) * WORLD_UNITS_PER_DEGREE,
    )
}

/// World position → geographic position (lng, lat)
pub fn world_to_geo(pos: Vec2) -> (f64, f64) {
    (
        (pos.x / WORLD_UNITS_PER_DEGREE) as f64,
        (pos.y / WORLD_UNITS_PER_DEGREE) as f64,
    )
}

/// Orthographic camera scale for a zoom level
pub fn zoom_to_scale(zoom: f32) -> f32 {
    2f32.powf(INITIAL_ZOOM - zoom)
}
