//! Country boundary collection parsed from a GeoJSON FeatureCollection.

use geo::{Contains, Coord, LineString, MultiPolygon, Point, Polygon};
use serde_json::Value;

/// One country's boundary as reported by the dataset, carrying at least a name
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

/// Ordered, immutable set of country boundaries. Coordinates are lng/lat
/// degrees. Filtered views are produced with [`BoundaryCollection::excluding`].
#[derive(Debug, Clone, Default)]
pub struct BoundaryCollection {
    features: Vec<BoundaryFeature>,
}

impl BoundaryCollection {
    /// Parse a GeoJSON FeatureCollection. Features without a `name` property
    /// or without Polygon/MultiPolygon geometry are skipped.
    pub fn from_geojson(json: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse GeoJSON: {}", e))?;

        let Some(raw_features) = value["features"].as_array() else {
            return Err("GeoJSON has no features array".to_string());
        };

        let mut features = Vec::new();
        for feature in raw_features {
            let Some(name) = feature["properties"]["name"].as_str() else {
                continue;
            };
            if name.is_empty() {
                continue;
            }

            let geometry = &feature["geometry"];
            let parsed = match geometry["type"].as_str() {
                Some("Polygon") => geometry["coordinates"]
                    .as_array()
                    .map(|rings| MultiPolygon(vec![parse_polygon_coords(rings)])),
                Some("MultiPolygon") => geometry["coordinates"]
                    .as_array()
                    .map(|polys| parse_multipolygon_coords(polys)),
                _ => None,
            };

            if let Some(geometry) = parsed {
                features.push(BoundaryFeature {
                    name: name.to_string(),
                    geometry,
                });
            }
        }

        Ok(Self { features })
    }

    /// A new collection with the feature matching `name` removed.
    /// Matching is case-sensitive against the feature's name property; when
    /// nothing matches the collection is returned unchanged (disputed
    /// territories and dataset name mismatches are legitimate).
    pub fn excluding(&self, name: &str) -> BoundaryCollection {
        BoundaryCollection {
            features: self
                .features
                .iter()
                .filter(|f| f.name != name)
                .cloned()
                .collect(),
        }
    }

    /// The feature containing the given lng/lat point, if any.
    /// First match in collection order wins.
    pub fn feature_at(&self, lng: f64, lat: f64) -> Option<&BoundaryFeature> {
        let point = Point::new(lng, lat);
        self.features.iter().find(|f| f.geometry.contains(&point))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundaryFeature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Parse GeoJSON MultiPolygon coordinates: [[exterior, interiors...], ...]
fn parse_multipolygon_coords(polys: &[Value]) -> MultiPolygon<f64> {
    MultiPolygon(
        polys
            .iter()
            .filter_map(|p| p.as_array().map(|rings| parse_polygon_coords(rings)))
            .collect(),
    )
}

/// Parse GeoJSON Polygon coordinates: first ring is the exterior, the rest
/// are holes.
fn parse_polygon_coords(rings: &[Value]) -> Polygon<f64> {
    let mut exterior = LineString(vec![]);
    let mut interiors = Vec::new();

    for (idx, ring) in rings.iter().enumerate() {
        let Some(coords) = ring.as_array() else {
            continue;
        };
        let ring = parse_ring_coords(coords);
        if idx == 0 {
            exterior = ring;
        } else {
            interiors.push(ring);
        }
    }

    Polygon::new(exterior, interiors)
}

/// Parse a ring from GeoJSON coordinates: [[lng, lat], [lng, lat], ...]
fn parse_ring_coords(coords: &[Value]) -> LineString<f64> {
    let mut points: Vec<Coord<f64>> = coords
        .iter()
        .filter_map(|pair| {
            let pair = pair.as_array()?;
            let x = pair.first()?.as_f64()?;
            let y = pair.get(1)?.as_f64()?;
            Some(Coord { x, y })
        })
        .collect();

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    LineString(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two unit squares: "Alpha" spans (0,0)..(10,10), "Beta" (20,0)..(30,10)
    fn sample_collection() -> BoundaryCollection {
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
                            "type": "MultiPolygon",
                            "coordinates": [[[[20, 0], [30, 0], [30, 10], [20, 10], [20, 0]]]]
                        }
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_feature_collection() {
        let collection = sample_collection();
        assert_eq!(collection.len(), 2);

        let names: Vec<_> = collection.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_parse_skips_features_without_name() {
        let collection = BoundaryCollection::from_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {},
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]
                        }
                    }
                ]
            }"#,
        )
        .unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(BoundaryCollection::from_geojson("not json").is_err());
        assert!(BoundaryCollection::from_geojson(r#"{ "type": "FeatureCollection" }"#).is_err());
    }

    #[test]
    fn test_excluding_removes_exactly_one_feature() {
        let collection = sample_collection();
        let filtered = collection.excluding("Alpha");

        assert_eq!(filtered.len(), collection.len() - 1);
        assert!(filtered.iter().all(|f| f.name != "Alpha"));
        assert!(filtered.iter().any(|f| f.name == "Beta"));
    }

    #[test]
    fn test_excluding_absent_name_is_unchanged() {
        let collection = sample_collection();
        let filtered = collection.excluding("Atlantis");

        assert_eq!(filtered.len(), collection.len());
    }

    #[test]
    fn test_excluding_is_case_sensitive() {
        let collection = sample_collection();
        // Lowercase does not match the feature's name property
        assert_eq!(collection.excluding("alpha").len(), collection.len());
    }

    #[test]
    fn test_feature_at_inside_polygon() {
        let collection = sample_collection();
        assert_eq!(collection.feature_at(5.0, 5.0).unwrap().name, "Alpha");
        assert_eq!(collection.feature_at(25.0, 5.0).unwrap().name, "Beta");
    }

    #[test]
    fn test_feature_at_outside_all_features() {
        let collection = sample_collection();
        assert!(collection.feature_at(15.0, 5.0).is_none());
        assert!(collection.feature_at(-5.0, -5.0).is_none());
    }

    #[test]
    fn test_feature_at_on_empty_collection() {
        let collection = BoundaryCollection::default();
        assert!(collection.feature_at(0.0, 0.0).is_none());
    }

    #[test]
    fn test_open_rings_are_closed_on_parse() {
        // Ring deliberately not closed; containment should still work
        let collection = BoundaryCollection::from_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": { "name": "Open" },
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10]]]
                        }
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(collection.feature_at(5.0, 5.0).unwrap().name, "Open");
    }
}
