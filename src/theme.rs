//! Centralized color theme for the application.
//!
//! This module provides all colors used for map rendering and markers.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;

// ============================================================================
// Boundary Layer Colors
// ============================================================================

/// Country fill outline (periwinkle, semi-transparent)
pub const COUNTRY_FILL: Color = Color::srgba(0.384, 0.482, 0.757, 0.5);

/// Country border lines (purple)
pub const COUNTRY_BORDER: Color = Color::srgb(0.702, 0.31, 0.812);

/// Hover highlight for the country under the cursor
pub const COUNTRY_HOVER: Color = Color::srgba(1.0, 1.0, 1.0, 0.85);

// ============================================================================
// Marker Colors
// ============================================================================

/// Placed marker sprites (red)
pub const MARKER_COLOR: Color = Color::srgb(0.9, 0.2, 0.2);

/// The currently selected marker (amber)
pub const MARKER_SELECTED_COLOR: Color = Color::srgb(1.0, 0.7, 0.2);
