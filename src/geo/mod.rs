//! Static geographic reference data: country centroids and boundaries.
//!
//! The centroid table is bundled and loads synchronously at startup; the
//! boundary dataset is fetched in the background (URL or local file, per
//! config). Until the fetch completes the boundary collection is empty and
//! hit tests simply find nothing.

mod boundaries;
mod countries;
mod loader;

pub use boundaries::{BoundaryCollection, BoundaryFeature};
pub use countries::CountryIndex;

use bevy::prelude::*;

use crate::config::ConfigLoaded;

/// Holds the country boundary collection and the name→centroid lookup.
#[derive(Resource, Default)]
pub struct GeometryIndex {
    pub countries: CountryIndex,
    boundaries: BoundaryCollection,
}

impl GeometryIndex {
    /// Centroid (lat, lng) for the named country, case-insensitive.
    pub fn lookup_centroid(&self, name: &str) -> Option<(f64, f64)> {
        self.countries.lookup_centroid(name)
    }

    /// The full, unfiltered boundary set.
    pub fn all_boundaries(&self) -> &BoundaryCollection {
        &self.boundaries
    }

    /// The boundary set with the named country's feature removed; unchanged
    /// when no feature matches.
    pub fn boundaries_excluding(&self, name: &str) -> BoundaryCollection {
        self.boundaries.excluding(name)
    }

    pub(crate) fn set_boundaries(&mut self, boundaries: BoundaryCollection) {
        self.boundaries = boundaries;
    }
}

pub struct GeoPlugin;

impl Plugin for GeoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GeometryIndex>()
            .add_systems(
                Startup,
                (loader::load_countries, loader::start_boundary_fetch).after(ConfigLoaded),
            )
            .add_systems(Update, loader::poll_boundary_fetch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> GeometryIndex {
        let mut index = GeometryIndex {
            countries: CountryIndex::from_json(
                r#"{ "data": [ { "country": "Alpha", "lat": 5.0, "lng": 5.0 } ] }"#,
            )
            .unwrap(),
            ..Default::default()
        };
        index.set_boundaries(
            BoundaryCollection::from_geojson(
                r#"{
                    "type": "FeatureCollection",
                    "features": [
                        {
                            "type": "Feature",
                            "properties": { "name": "Alpha" },
                            "geometry": {
                                "type": "Polygon",
                                "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]
                            }
                        },
                        {
                            "type": "Feature",
                            "properties": { "name": "Beta" },
                            "geometry": {
                                "type": "Polygon",
                                "coordinates": [[[20, 0], [30, 0], [30, 10], [20, 10], [20, 0]]]
                            }
                        }
                    ]
                }"#,
            )
            .unwrap(),
        );
        index
    }

    #[test]
    fn test_boundaries_excluding_known_name() {
        let index = sample_index();
        let filtered = index.boundaries_excluding("Alpha");

        assert_eq!(filtered.len(), index.all_boundaries().len() - 1);
        assert!(filtered.iter().all(|f| f.name != "Alpha"));
    }

    #[test]
    fn test_boundaries_excluding_unknown_name_is_identity() {
        let index = sample_index();
        let filtered = index.boundaries_excluding("Atlantis");
        assert_eq!(filtered.len(), index.all_boundaries().len());
    }

    #[test]
    fn test_lookup_centroid_delegates_to_country_table() {
        let index = sample_index();
        assert_eq!(index.lookup_centroid("alpha"), Some((5.0, 5.0)));
        assert!(index.lookup_centroid("Atlantis").is_none());
    }
}
