//! Map rendering: camera, boundary source, and the derived layers.

mod camera;
mod layers;
pub mod projection;

pub use camera::{CameraZoom, FlyTo, FlyToRequest, MapCamera};
pub use layers::{
    BoundaryLayerShape, BoundarySource, MapLayer, RebuildBoundaryLayers, feature_rings,
};

use bevy::prelude::*;

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoundarySource>()
            .init_resource::<FlyTo>()
            .add_message::<FlyToRequest>()
            .add_message::<RebuildBoundaryLayers>()
            .init_gizmo_group::<layers::BoundaryGizmoGroup>()
            .add_systems(
                Startup,
                (camera::spawn_camera, layers::configure_boundary_gizmos),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    camera::begin_fly_to.run_if(on_message::<FlyToRequest>),
                    camera::animate_fly_to,
                    layers::rebuild_boundary_layers.run_if(on_message::<RebuildBoundaryLayers>),
                    layers::render_boundary_layers,
                    layers::render_hover_highlight,
                ),
            );
    }
}
