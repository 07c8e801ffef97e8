//! Pointer interaction: hover highlighting, click routing, and country
//! selection.
//!
//! Raw pointer events enter here and are dispatched to exactly one handler:
//! hover state on every move, and one of marker-select / country-select /
//! marker-create per click.

mod hit_test;
mod hover;
pub mod params;
mod router;
mod selection;

pub use hit_test::{feature_name_at, point_in_marker};
pub use hover::{HighlightFilter, HoverState};
pub use router::{route_click, ClickAction};
pub use selection::{CountryClicked, CountrySelection};

use bevy::prelude::*;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoverState>()
            .init_resource::<HighlightFilter>()
            .init_resource::<CountrySelection>()
            .add_message::<CountryClicked>()
            .add_systems(
                Update,
                (
                    hover::pointer_hover_system,
                    router::handle_map_click,
                    selection::handle_country_clicked.run_if(on_message::<CountryClicked>),
                ),
            );
    }
}
