//! egui panels: country inspector and the selected marker's popup.

mod country_panel;
mod marker_popup;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            (country_panel::country_panel_ui, marker_popup::marker_popup_ui),
        );
    }
}
