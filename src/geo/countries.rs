//! Country centroid table loaded from the bundled countries dataset.

use serde::Deserialize;

/// One entry of the centroid table
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRecord {
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

/// The dataset wraps its entries in a `data` array
#[derive(Debug, Deserialize)]
struct CountryFile {
    data: Vec<CountryRecord>,
}

/// Name → centroid lookup over the static country reference data.
/// Loaded once at startup, immutable for the session.
#[derive(Debug, Default)]
pub struct CountryIndex {
    records: Vec<CountryRecord>,
}

impl CountryIndex {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let file: CountryFile = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse countries dataset: {}", e))?;
        Ok(Self { records: file.data })
    }

    /// Centroid (lat, lng) for the named country. Matching is case-insensitive;
    /// a miss is a legitimate outcome, not an error.
    pub fn lookup_centroid(&self, name: &str) -> Option<(f64, f64)> {
        self.records
            .iter()
            .find(|r| r.country.eq_ignore_ascii_case(name))
            .map(|r| (r.lat, r.lng))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
