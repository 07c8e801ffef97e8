//! Click routing - exactly one handler per physical gesture.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::map::projection::{geo_to_world, world_to_geo};
use crate::map::BoundarySource;
use crate::markers::{CreateMarkerRequest, Marker, MarkerDragState, MarkerStore};

use super::hit_test::{feature_name_at, point_in_marker};
use super::params::{is_cursor_over_ui, CameraParams};
use super::selection::CountryClicked;

/// What a single click resolves to. Markers sit on top of the map surface,
/// so a marker hit wins over the country beneath it.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickAction {
    SelectMarker(String),
    SelectCountry(String),
    PlaceMarker { lat: f64, lng: f64 },
}

/// Resolve a click to its single action
pub fn route_click(world_pos: Vec2, markers: &[Marker], source: &BoundarySource) -> ClickAction {
    for marker in markers {
        if point_in_marker(world_pos, geo_to_world(marker.lng, marker.lat)) {
            return ClickAction::SelectMarker(marker.id.clone());
        }
    }

    if let Some(name) = feature_name_at(source, world_pos) {
        return ClickAction::SelectCountry(name);
    }

    let (lng, lat) = world_to_geo(world_pos);
    ClickAction::PlaceMarker { lat, lng }
}

/// System dispatching map clicks.
///
/// A press on a marker selects it and arms dragging; a press on a country
/// raises CountryClicked; a press on empty map requests a marker create.
#[allow(clippy::too_many_arguments)]
pub fn handle_map_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    camera: CameraParams,
    source: Res<BoundarySource>,
    mut store: ResMut<MarkerStore>,
    mut drag_state: ResMut<MarkerDragState>,
    mut country_events: MessageWriter<CountryClicked>,
    mut create_events: MessageWriter<CreateMarkerRequest>,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    // Don't interact if over UI
    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(world_pos) = camera.cursor_world_pos() else {
        return;
    };

    match route_click(world_pos, store.markers(), &source) {
        ClickAction::SelectMarker(id) => {
            store.selected = Some(id.clone());
            drag_state.begin(id);
        }
        ClickAction::SelectCountry(name) => {
            country_events.write(CountryClicked { name });
        }
        ClickAction::PlaceMarker { lat, lng } => {
            create_events.write(CreateMarkerRequest { lat, lng });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::BoundaryCollection;

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

    fn marker_at(id: &str, lat: f64, lng: f64) -> Marker {
        Marker {
            id: id.to_string(),
            lat,
            lng,
            image: None,
        }
    }

    #[test]
    fn test_click_on_marker_selects_only_the_marker() {
        // The marker sits inside the Square feature; the marker must win and
        // the country click must not fire for the same gesture.
        let source = square_source();
        let markers = vec![marker_at("abc", 5.0, 5.0)];

        let action = route_click(geo_to_world(5.0, 5.0), &markers, &source);
        assert_eq!(action, ClickAction::SelectMarker("abc".to_string()));
    }

    #[test]
    fn test_click_on_country_selects_country() {
        let source = square_source();
        let action = route_click(geo_to_world(5.0, 5.0), &[], &source);
        assert_eq!(action, ClickAction::SelectCountry("Square".to_string()));
    }

    #[test]
    fn test_click_on_empty_map_places_marker() {
        let source = square_source();
        let action = route_click(geo_to_world(50.0, -30.0), &[], &source);

        match action {
            ClickAction::PlaceMarker { lat, lng } => {
                assert!((lat - -30.0).abs() < 1e-4);
                assert!((lng - 50.0).abs() < 1e-4);
            }
            other => panic!("expected PlaceMarker, got {:?}", other),
        }
    }

    #[test]
    fn test_click_with_no_boundaries_places_marker() {
        // Boundary source not loaded yet: clicks fall through to creation
        let source = BoundarySource::default();
        let action = route_click(geo_to_world(5.0, 5.0), &[], &source);
        assert!(matches!(action, ClickAction::PlaceMarker { .. }));
    }
}
