//! Marker lifecycle: the canonical store, the remote marker API, and the
//! systems tying them together.
//!
//! The store is the single owner of the marker list and the marker
//! selection. Network calls run as background tasks; their results are
//! applied to the store at poll time against the then-current list, never a
//! snapshot captured before the request went out.
//!
//! ## Key Types
//!
//! - [`Marker`] - the persisted point marker
//! - [`MarkerStore`] - canonical list + selection
//! - [`MarkerDragState`] - in-progress drag, armed by the click router
//!
//! ## Update strategies
//!
//! - create: pessimistic (append on server confirmation)
//! - move: optimistic, client-authoritative (no network call)
//! - remove: pessimistic (filter on server confirmation)
//! - attach image: fire-and-forget

mod api;
mod drag;
mod marker;
mod systems;


pub use drag::MarkerDragState;
pub use marker::{Marker, MarkerStore};
pub use systems::{AttachImageRequest, CreateMarkerRequest, MarkerSprite, RemoveMarkerRequest};

use bevy::prelude::*;

use crate::config::ConfigLoaded;

pub struct MarkerPlugin;

impl Plugin for MarkerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MarkerStore>()
            .init_resource::<MarkerDragState>()
            .add_message::<CreateMarkerRequest>()
            .add_message::<RemoveMarkerRequest>()
            .add_message::<AttachImageRequest>()
            .add_systems(Startup, systems::start_marker_load.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    systems::handle_create_requests.run_if(on_message::<CreateMarkerRequest>),
                    systems::handle_remove_requests.run_if(on_message::<RemoveMarkerRequest>),
                    systems::handle_attach_requests.run_if(on_message::<AttachImageRequest>),
                    systems::poll_load_tasks,
                    systems::poll_create_tasks,
                    systems::poll_delete_tasks,
                    systems::poll_upload_tasks,
                    systems::selection_follow_system,
                    drag::handle_marker_drag,
                    systems::sync_marker_sprites,
                ),
            );
    }
}
