//! HTTP client for the remote marker API.
//!
//! All calls run inside background tasks; results are plain structs the poll
//! systems match on. A failed call never carries an optimistic local effect
//! with it — the poll site decides what (if anything) to apply.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::marker::Marker;

/// Result of fetching the full marker list
pub struct MarkerListResult {
    pub markers: Option<Vec<Marker>>,
    pub error: Option<String>,
}

/// Result of a create round-trip
pub struct MarkerCreateResult {
    pub marker: Option<Marker>,
    pub error: Option<String>,
}

/// Result of a delete round-trip
pub struct MarkerDeleteResult {
    pub id: String,
    pub success: bool,
    pub error: Option<String>,
}

/// Result of an image upload
pub struct ImageUploadResult {
    pub id: String,
    pub error: Option<String>,
}

/// Fetch all markers from the backend
pub fn fetch_markers(backend_url: &str) -> MarkerListResult {
    let url = format!("{}/api/markers", backend_url);

    match ureq::get(&url).set("User-Agent", "worldpin").call() {
        Ok(response) => match response.into_json::<Vec<Marker>>() {
            Ok(markers) => MarkerListResult {
                markers: Some(markers),
                error: None,
            },
            Err(e) => MarkerListResult {
                markers: None,
                error: Some(format!("Failed to parse marker list: {}", e)),
            },
        },
        Err(e) => MarkerListResult {
            markers: None,
            error: Some(format!("Failed to fetch markers: {}", e)),
        },
    }
}

/// Create a marker. The server may echo the client id or assign its own;
/// the returned marker is authoritative.
pub fn create_marker(backend_url: &str, marker: &Marker) -> MarkerCreateResult {
    let url = format!("{}/api/markers", backend_url);

    let response = ureq::post(&url).set("User-Agent", "worldpin").send_json(
        serde_json::json!({
            "id": marker.id,
            "lat": marker.lat,
            "lng": marker.lng,
        }),
    );

    match response {
        Ok(resp) => match resp.into_json::<Marker>() {
            Ok(marker) => MarkerCreateResult {
                marker: Some(marker),
                error: None,
            },
            Err(e) => MarkerCreateResult {
                marker: None,
                error: Some(format!("Failed to parse created marker: {}", e)),
            },
        },
        Err(e) => MarkerCreateResult {
            marker: None,
            error: Some(format!("Failed to create marker: {}", e)),
        },
    }
}

/// Delete a marker by id
pub fn delete_marker(backend_url: &str, id: &str) -> MarkerDeleteResult {
    let url = format!("{}/api/markers/{}", backend_url, id);

    match ureq::delete(&url).set("User-Agent", "worldpin").call() {
        Ok(_) => MarkerDeleteResult {
            id: id.to_string(),
            success: true,
            error: None,
        },
        Err(e) => MarkerDeleteResult {
            id: id.to_string(),
            success: false,
            error: Some(format!("Failed to delete marker {}: {}", id, e)),
        },
    }
}

/// Encode an image payload for the per-marker image endpoint
pub fn encode_image_payload(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Upload an image for a marker. Fire-and-forget from the caller's side;
/// the marker itself is not mutated locally.
pub fn upload_marker_image(backend_url: &str, id: &str, image_bytes: &[u8]) -> ImageUploadResult {
    let url = format!("{}/api/markers/{}/image", backend_url, id);

    let response = ureq::post(&url).set("User-Agent", "worldpin").send_json(
        serde_json::json!({
            "base64String": encode_image_payload(image_bytes),
        }),
    );

    match response {
        Ok(_) => ImageUploadResult {
            id: id.to_string(),
            error: None,
        },
        Err(e) => ImageUploadResult {
            id: id.to_string(),
            error: Some(format!("Failed to upload image for {}: {}", id, e)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_deserializes_without_image() {
        let marker: Marker =
            serde_json::from_str(r#"{ "id": "abc", "lat": 10.0, "lng": 20.0 }"#).unwrap();
        assert_eq!(marker.id, "abc");
        assert_eq!(marker.lat, 10.0);
        assert_eq!(marker.lng, 20.0);
        assert!(marker.image.is_none());
    }

    #[test]
    fn test_marker_deserializes_with_image() {
        let marker: Marker = serde_json::from_str(
            r#"{ "id": "abc", "lat": 1.0, "lng": 2.0, "image": "aGVsbG8=" }"#,
        )
        .unwrap();
        assert_eq!(marker.image.as_deref(), Some("aGVsbG8="));
    }

    #[test]
    fn test_marker_serialization_omits_empty_image() {
        let marker = Marker {
            id: "abc".to_string(),
            lat: 1.0,
            lng: 2.0,
            image: None,
        };
        let json = serde_json::to_string(&marker).unwrap();
        assert!(!json.contains("image"));
    }

    #[test]
    fn test_encode_image_payload() {
        assert_eq!(encode_image_payload(b"hello"), "aGVsbG8=");
        assert_eq!(encode_image_payload(b""), "");
    }
}
