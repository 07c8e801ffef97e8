//! Startup loading of the geographic reference data.

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;
use std::io::Read;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::constants::COUNTRIES_FILE;
use crate::interaction::CountrySelection;
use crate::map::RebuildBoundaryLayers;

use super::boundaries::BoundaryCollection;
use super::countries::CountryIndex;
use super::GeometryIndex;

/// Result of the background boundary fetch
struct BoundaryFetchResult {
    collection: Option<BoundaryCollection>,
    source: String,
    error: Option<String>,
}

/// Background task fetching and parsing the boundary dataset
#[derive(Component)]
pub struct BoundaryFetchTask(Task<BoundaryFetchResult>);

/// Load the bundled centroid table. A missing or corrupt file leaves the
/// table empty; country clicks then resolve to no-ops.
pub fn load_countries(mut index: ResMut<GeometryIndex>) {
    match std::fs::read_to_string(COUNTRIES_FILE) {
        Ok(json) => match CountryIndex::from_json(&json) {
            Ok(countries) => {
                info!("Loaded {} country centroids", countries.len());
                index.countries = countries;
            }
            Err(e) => warn!("{}", e),
        },
        Err(e) => warn!("Failed to read {}: {}", COUNTRIES_FILE, e),
    }
}

/// Fetch the boundary GeoJSON from a local file or over HTTP
fn fetch_boundaries(url: String, file: Option<PathBuf>) -> BoundaryFetchResult {
    let (raw, source) = if let Some(path) = file {
        let source = path.to_string_lossy().to_string();
        match std::fs::read_to_string(&path) {
            Ok(raw) => (raw, source),
            Err(e) => {
                return BoundaryFetchResult {
                    collection: None,
                    source,
                    error: Some(format!("Failed to read boundary file: {}", e)),
                }
            }
        }
    } else {
        match ureq::get(&url).set("User-Agent", "worldpin").call() {
            Ok(response) => {
                let mut raw = String::new();
                if let Err(e) = response.into_reader().read_to_string(&mut raw) {
                    return BoundaryFetchResult {
                        collection: None,
                        source: url,
                        error: Some(format!("Failed to read boundary response: {}", e)),
                    };
                }
                (raw, url)
            }
            Err(e) => {
                return BoundaryFetchResult {
                    collection: None,
                    source: url,
                    error: Some(format!("Failed to fetch boundaries: {}", e)),
                }
            }
        }
    };

    match BoundaryCollection::from_geojson(&raw) {
        Ok(collection) => BoundaryFetchResult {
            collection: Some(collection),
            source,
            error: None,
        },
        Err(e) => BoundaryFetchResult {
            collection: None,
            source,
            error: Some(e),
        },
    }
}

/// System to start the boundary fetch on startup
pub fn start_boundary_fetch(mut commands: Commands, config: Res<AppConfig>) {
    let url = config.data.boundaries_url.clone();
    let file = config.data.boundaries_file.clone();

    let task_pool = IoTaskPool::get();
    let task = task_pool.spawn(async move { fetch_boundaries(url, file) });

    commands.spawn(BoundaryFetchTask(task));
}

/// System to poll the boundary fetch and install the collection when it
/// arrives. The rebuild honors whatever country is selected at that moment.
pub fn poll_boundary_fetch(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut BoundaryFetchTask)>,
    mut index: ResMut<GeometryIndex>,
    selection: Res<CountrySelection>,
    mut rebuild_events: MessageWriter<RebuildBoundaryLayers>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            if let Some(collection) = result.collection {
                info!(
                    "Loaded {} boundary features from {}",
                    collection.len(),
                    result.source
                );
                index.set_boundaries(collection);
                rebuild_events.write(RebuildBoundaryLayers {
                    exclude: selection.selected.clone(),
                });
            } else if let Some(error) = result.error {
                error!("{}", error);
            }

            commands.entity(entity).despawn();
        }
    }
}
