//! Country selection: fly the camera to the clicked country and cut its
//! feature out of the boundary layers.

use bevy::prelude::*;

use crate::constants::FLY_TO_ZOOM;
use crate::geo::GeometryIndex;
use crate::map::{FlyToRequest, RebuildBoundaryLayers};

/// The selected country, if any. Selection is terminal per session: there is
/// no deselect, only clicking a different country.
#[derive(Resource, Default)]
pub struct CountrySelection {
    pub selected: Option<String>,
}

/// Message raised when a click resolves to a country feature
#[derive(Message)]
pub struct CountryClicked {
    pub name: String,
}

/// System handling confirmed country clicks.
///
/// A name with no centroid entry (disputed territory, dataset mismatch) makes
/// the whole command a no-op: no camera move, no selection change.
pub fn handle_country_clicked(
    mut events: MessageReader<CountryClicked>,
    index: Res<GeometryIndex>,
    mut selection: ResMut<CountrySelection>,
    mut fly_to_events: MessageWriter<FlyToRequest>,
    mut rebuild_events: MessageWriter<RebuildBoundaryLayers>,
) {
    for event in events.read() {
        let Some((lat, lng)) = index.lookup_centroid(&event.name) else {
            info!("No centroid for clicked country {:?}", event.name);
            continue;
        };

        fly_to_events.write(FlyToRequest {
            lat,
            lng,
            zoom: FLY_TO_ZOOM,
        });

        selection.selected = Some(event.name.clone());

        rebuild_events.write(RebuildBoundaryLayers {
            exclude: Some(event.name.clone()),
        });

        info!("Selected country {:?}", event.name);
    }
}
