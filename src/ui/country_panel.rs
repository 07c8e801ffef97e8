//! Side panel showing the hovered and selected country.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::interaction::{CountrySelection, HoverState};

pub fn country_panel_ui(
    mut contexts: EguiContexts,
    selection: Res<CountrySelection>,
    hover: Res<HoverState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Country")
        .anchor(egui::Align2::RIGHT_TOP, [-20.0, 20.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.set_min_width(200.0);

            match &selection.selected {
                Some(name) => {
                    ui.strong(name);
                }
                None => {
                    ui.label("Click a country to inspect it");
                }
            }

            if let Some(hovered) = &hover.hovered {
                ui.separator();
                ui.weak(format!("Hovering: {}", hovered));
            }
        });

    Ok(())
}
