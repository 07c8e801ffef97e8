//! Boundary source and layer management.
//!
//! The boundary source holds the collection currently bound to the three
//! boundary layers (fill, border, hover-highlight). Selecting a country
//! replaces the source with a filtered view and re-adds all three layers in
//! the same frame, so the swap reads as one atomic update.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use crate::geo::{BoundaryCollection, BoundaryFeature, GeometryIndex};
use crate::interaction::HighlightFilter;
use crate::theme;

use super::projection::geo_to_world;

/// The three layers derived from the boundary source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapLayer {
    Fill,
    Border,
    HoverHighlight,
}

impl MapLayer {
    pub fn color(&self) -> Color {
        match self {
            MapLayer::Fill => theme::COUNTRY_FILL,
            MapLayer::Border => theme::COUNTRY_BORDER,
            MapLayer::HoverHighlight => theme::COUNTRY_HOVER,
        }
    }

    pub fn all() -> &'static [MapLayer] {
        &[MapLayer::Fill, MapLayer::Border, MapLayer::HoverHighlight]
    }
}

/// The collection currently bound to the boundary layers. Hit testing runs
/// against this (not the unfiltered index), so an excluded country is neither
/// rendered nor clickable.
#[derive(Resource, Default)]
pub struct BoundarySource {
    pub collection: BoundaryCollection,
}

/// Message to replace the boundary source and re-add the dependent layers,
/// optionally excluding one country by name
#[derive(Message)]
pub struct RebuildBoundaryLayers {
    pub exclude: Option<String>,
}

/// One rendered boundary feature on one layer
#[derive(Component)]
pub struct BoundaryLayerShape {
    pub layer: MapLayer,
    pub name: String,
    /// Polygon rings in world space (exteriors and holes alike)
    pub rings: Vec<Vec<Vec2>>,
}

/// Gizmo group for boundary layer rendering
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct BoundaryGizmoGroup;

pub fn configure_boundary_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<BoundaryGizmoGroup>();
    config.line.width = 2.0;
}

/// World-space rings of a boundary feature
pub fn feature_rings(feature: &BoundaryFeature) -> Vec<Vec<Vec2>> {
    let mut rings = Vec::new();
    for polygon in &feature.geometry.0 {
        let ring_points = |ls: &geo::LineString<f64>| {
            ls.coords().map(|c| geo_to_world(c.x, c.y)).collect::<Vec<_>>()
        };
        rings.push(ring_points(polygon.exterior()));
        for interior in polygon.interiors() {
            rings.push(ring_points(interior));
        }
    }
    rings
}

/// System to rebuild the boundary source and its three layers.
///
/// The underlying renderer has no atomic in-place geometry replacement for a
/// live source bound to multiple layers, so this is a full remove-and-re-add
/// of every layer shape.
pub fn rebuild_boundary_layers(
    mut commands: Commands,
    mut events: MessageReader<RebuildBoundaryLayers>,
    index: Res<GeometryIndex>,
    mut source: ResMut<BoundarySource>,
    existing: Query<Entity, With<BoundaryLayerShape>>,
) {
    let Some(event) = events.read().last() else {
        return;
    };

    source.collection = match &event.exclude {
        Some(name) => index.boundaries_excluding(name),
        None => index.all_boundaries().clone(),
    };

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    for feature in source.collection.iter() {
        let rings = feature_rings(feature);
        for layer in MapLayer::all() {
            commands.spawn(BoundaryLayerShape {
                layer: *layer,
                name: feature.name.clone(),
                rings: rings.clone(),
            });
        }
    }

    info!(
        "Rebuilt boundary layers: {} features{}",
        source.collection.len(),
        event
            .exclude
            .as_deref()
            .map(|n| format!(", excluding {}", n))
            .unwrap_or_default()
    );
}

/// System to draw the fill and border layers
pub fn render_boundary_layers(
    mut gizmos: Gizmos<BoundaryGizmoGroup>,
    shapes: Query<&BoundaryLayerShape>,
) {
    for shape in shapes.iter() {
        if shape.layer == MapLayer::HoverHighlight {
            continue;
        }

        for ring in &shape.rings {
            if ring.len() < 2 {
                continue;
            }
            gizmos.linestrip_2d(ring.iter().copied(), shape.layer.color());
        }
    }
}

/// System to draw the hover-highlight layer.
///
/// Only shapes whose name equals the filter are drawn; the empty-string
/// filter matches no feature, which is the layer's idle state.
pub fn render_hover_highlight(
    mut gizmos: Gizmos<BoundaryGizmoGroup>,
    filter: Res<HighlightFilter>,
    shapes: Query<&BoundaryLayerShape>,
) {
    for shape in shapes.iter() {
        if shape.layer != MapLayer::HoverHighlight || shape.name != filter.name {
            continue;
        }

        for ring in &shape.rings {
            if ring.len() < 2 {
                continue;
            }
            gizmos.linestrip_2d(ring.iter().copied(), shape.layer.color());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::BoundaryCollection;

    fn square_feature() -> BoundaryFeature {
        BoundaryCollection::from_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": { "name": "Square" },
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]
                        }
                    }
                ]
            }"#,
        )
        .unwrap()
        .iter()
        .next()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_feature_rings_projects_to_world_space() {
        let rings = feature_rings(&square_feature());
        assert_eq!(rings.len(), 1);
        // Closed ring: 5 points
        assert_eq!(rings[0].len(), 5);
        assert_eq!(rings[0][0], geo_to_world(0.0, 0.0));
        assert_eq!(rings[0][2], geo_to_world(1.0, 1.0));
    }

    #[test]
    fn test_map_layer_all_has_three_layers() {
        assert_eq!(MapLayer::all().len(), 3);
        assert!(MapLayer::all().contains(&MapLayer::Fill));
        assert!(MapLayer::all().contains(&MapLayer::Border));
        assert!(MapLayer::all().contains(&MapLayer::HoverHighlight));
    }
}
