//! Hit testing of pointer positions against rendered map content.

use bevy::prelude::*;

use crate::constants::MARKER_SIZE;
use crate::map::projection::world_to_geo;
use crate::map::BoundarySource;

/// The name of the country feature under a world point, if any.
///
/// Runs against the active (possibly filtered) boundary source: an excluded
/// country is not hittable. While the source is still empty (the dataset has
/// not arrived yet) every query misses; that race is normal during startup.
pub fn feature_name_at(source: &BoundarySource, world_pos: Vec2) -> Option<String> {
    if source.collection.is_empty() {
        return None;
    }

    let (lng, lat) = world_to_geo(world_pos);
    source
        .collection
        .feature_at(lng, lat)
        .map(|f| f.name.clone())
}

/// Check if a world point lands on a marker's hit target
pub fn point_in_marker(world_pos: Vec2, marker_pos: Vec2) -> bool {
    let half = MARKER_SIZE / 2.0;
    (world_pos.x - marker_pos.x).abs() <= half && (world_pos.y - marker_pos.y).abs() <= half
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::BoundaryCollection;
    use crate::map::projection::geo_to_world;

    fn square_source() -> BoundarySource {
        BoundarySource {
            collection: BoundaryCollection::from_geojson(
                r#"{
                    "type": "FeatureCollection",
                    "features": [
                        {
                            "type": "Feature",
                            "properties": { "name": "Square" },
                            "geometry": {
                                "type": "Polygon",
                                "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]
                            }
                        }
                    ]
                }"#,
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_feature_name_at_hit() {
        let source = square_source();
        let hit = feature_name_at(&source, geo_to_world(5.0, 5.0));
        assert_eq!(hit.as_deref(), Some("Square"));
    }

    #[test]
    fn test_feature_name_at_miss() {
        let source = square_source();
        assert!(feature_name_at(&source, geo_to_world(50.0, 50.0)).is_none());
    }

    #[test]
    fn test_feature_name_at_empty_source_is_none() {
        // Source not yet populated: a miss, not an error
        let source = BoundarySource::default();
        assert!(feature_name_at(&source, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_point_in_marker_inside_and_outside() {
        let marker = Vec2::new(100.0, 100.0);
        assert!(point_in_marker(marker, marker));
        assert!(point_in_marker(marker + Vec2::splat(MARKER_SIZE / 2.0), marker));
        assert!(!point_in_marker(marker + Vec2::splat(MARKER_SIZE), marker));
    }
}
