//! Marker dragging - eager, client-authoritative position updates.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::interaction::params::{is_cursor_over_ui, CameraParams};
use crate::map::projection::world_to_geo;

use super::marker::MarkerStore;

/// The marker drag in progress, if any. Armed by the click router when a
/// press lands on a marker.
#[derive(Resource, Default)]
pub struct MarkerDragState {
    dragging: Option<String>,
}

impl MarkerDragState {
    pub fn begin(&mut self, id: String) {
        self.dragging = Some(id);
    }

    pub fn end(&mut self) {
        self.dragging = None;
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }
}

/// System moving the dragged marker with the cursor.
///
/// The position is written straight into the store (last-writer-wins); no
/// network call is made, the backend has no position-update endpoint.
pub fn handle_marker_drag(
    mouse_button: Res<ButtonInput<MouseButton>>,
    camera: CameraParams,
    mut store: ResMut<MarkerStore>,
    mut drag_state: ResMut<MarkerDragState>,
    mut contexts: EguiContexts,
) {
    if mouse_button.just_released(MouseButton::Left) {
        drag_state.end();
        return;
    }

    let Some(id) = drag_state.dragging().map(str::to_string) else {
        return;
    };

    if !mouse_button.pressed(MouseButton::Left) {
        drag_state.end();
        return;
    }

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(world_pos) = camera.cursor_world_pos() else {
        return;
    };

    let (lng, lat) = world_to_geo(world_pos);
    if !store.move_to(&id, lat, lng) {
        // Marker vanished mid-drag (e.g. a remove resolved); drop the drag
        drag_state.end();
    }
}
