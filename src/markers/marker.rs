//! Marker data model and the canonical marker store.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A point marker persisted by the backend. Ids are opaque strings; the
/// client generates one before the create round-trip and the server may echo
/// or reassign it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Owns the canonical marker list and the marker selection.
///
/// All mutation goes through the apply_* functions below, called from the
/// task-poll systems with the then-current list. Creates are pessimistic
/// (nothing is appended until the server confirms), moves are optimistic and
/// client-authoritative, removes are pessimistic.
#[derive(Resource, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
    /// Id of the selected marker (popup target), if any
    pub selected: Option<String>,
    initial_load_done: bool,
    /// Append intent from the create path, consumed by the selection-follow
    /// step so the freshly placed marker opens its popup
    pending_follow: Option<String>,
}

impl MarkerStore {
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn initial_load_done(&self) -> bool {
        self.initial_load_done
    }

    /// Called the moment a create is requested, before the round-trip, so no
    /// stale popup shows while the request is in flight.
    pub fn begin_create(&mut self) {
        self.selected = None;
    }

    /// Wholesale replacement from the initial load. Never records append
    /// intent and never touches the selection.
    pub fn apply_loaded(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
        self.initial_load_done = true;
    }

    /// Append the server-confirmed marker and record append intent. The
    /// append itself leaves the selection untouched; selection-follow is a
    /// separate step.
    pub fn apply_created(&mut self, marker: Marker) {
        self.pending_follow = Some(marker.id.clone());
        self.markers.push(marker);
    }

    /// Remove a server-deleted marker and clear the selection. Removing an
    /// id that is no longer present is tolerated.
    pub fn apply_removed(&mut self, id: &str) {
        self.markers.retain(|m| m.id != id);
        self.selected = None;
    }

    /// Eager local position update during a drag. Returns false when the id
    /// is unknown.
    pub fn move_to(&mut self, id: &str, lat: f64, lng: f64) -> bool {
        match self.markers.iter_mut().find(|m| m.id == id) {
            Some(marker) => {
                marker.lat = lat;
                marker.lng = lng;
                true
            }
            None => false,
        }
    }

    /// Consume the pending append intent, if any
    pub fn take_follow(&mut self) -> Option<String> {
        self.pending_follow.take()
    }
}

/// Selection-follow: a marker appended by the create path becomes the
/// selection. Driven by explicit intent, never by list-length comparison.
pub fn selection_follow(store: &mut MarkerStore) {
    if let Some(id) = store.take_follow() {
        if store.get(&id).is_some() {
            store.selected = Some(id);
        }
    }
}
