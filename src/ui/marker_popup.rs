//! Popup window for the selected marker: position, image attach, removal.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::markers::{AttachImageRequest, MarkerStore, RemoveMarkerRequest};

pub fn marker_popup_ui(
    mut contexts: EguiContexts,
    mut store: ResMut<MarkerStore>,
    mut remove_events: MessageWriter<RemoveMarkerRequest>,
    mut attach_events: MessageWriter<AttachImageRequest>,
) -> Result {
    let Some(selected_id) = store.selected.clone() else {
        return Ok(());
    };

    let Some(marker) = store.get(&selected_id).cloned() else {
        return Ok(());
    };

    let ctx = contexts.ctx_mut()?;

    let mut open = true;
    let mut close_requested = false;

    egui::Window::new("Marker")
        .anchor(egui::Align2::LEFT_TOP, [20.0, 20.0])
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.set_min_width(220.0);

            ui.monospace(&marker.id);
            ui.label(format!("{:.4}, {:.4}", marker.lat, marker.lng));

            if let Some(image) = &marker.image {
                ui.weak(format!("Image attached ({} bytes encoded)", image.len()));
            }

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                if ui.button("Attach image...").clicked() {
                    let picked = rfd::FileDialog::new()
                        .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
                        .pick_file();

                    if let Some(path) = picked {
                        attach_events.write(AttachImageRequest {
                            id: marker.id.clone(),
                            path,
                        });
                    }
                }

                if ui.button("Remove").clicked() {
                    remove_events.write(RemoveMarkerRequest {
                        id: marker.id.clone(),
                    });
                }

                if ui.button("Close").clicked() {
                    close_requested = true;
                }
            });
        });

    if !open || close_requested {
        store.selected = None;
    }

    Ok(())
}
