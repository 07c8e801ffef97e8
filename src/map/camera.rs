//! Map camera: panning, zooming, and the animated fly-to transition.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::constants::{
    FLY_TO_DURATION_SECS, INITIAL_CENTER_LAT, INITIAL_CENTER_LNG, INITIAL_ZOOM,
};

use super::projection::{geo_to_world, zoom_to_scale};

#[derive(Component)]
pub struct MapCamera;

#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Message commanding an animated camera transition to a geographic target
#[derive(Message)]
pub struct FlyToRequest {
    pub lat: f64,
    pub lng: f64,
    pub zoom: f32,
}

struct FlyToAnimation {
    from_pos: Vec2,
    to_pos: Vec2,
    from_scale: f32,
    to_scale: f32,
    elapsed: f32,
    duration: f32,
}

/// Resource holding the in-flight fly-to animation, if any
#[derive(Resource, Default)]
pub struct FlyTo {
    animation: Option<FlyToAnimation>,
}

pub fn spawn_camera(mut commands: Commands) {
    let center = geo_to_world(INITIAL_CENTER_LNG, INITIAL_CENTER_LAT);
    commands.spawn((
        Camera2d,
        MapCamera,
        CameraZoom {
            scale: zoom_to_scale(INITIAL_ZOOM),
        },
        Transform::from_translation(center.extend(1000.0)),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<MapCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut CameraZoom, With<MapCamera>>,
) {
    let Ok(mut zoom) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };

        zoom.scale = (zoom.scale - scroll_amount).clamp(0.05, 10.0);
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<MapCamera>, Changed<CameraZoom>)>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}

/// System to begin a fly-to animation from the camera's current pose
pub fn begin_fly_to(
    mut events: MessageReader<FlyToRequest>,
    mut fly_to: ResMut<FlyTo>,
    camera_query: Query<(&Transform, &CameraZoom), With<MapCamera>>,
) {
    for event in events.read() {
        let Ok((transform, zoom)) = camera_query.single() else {
            continue;
        };

        fly_to.animation = Some(FlyToAnimation {
            from_pos: transform.translation.truncate(),
            to_pos: geo_to_world(event.lng, event.lat),
            from_scale: zoom.scale,
            to_scale: zoom_to_scale(event.zoom),
            elapsed: 0.0,
            duration: FLY_TO_DURATION_SECS,
        });
    }
}

/// System to advance the fly-to animation each frame
pub fn animate_fly_to(
    time: Res<Time>,
    mut fly_to: ResMut<FlyTo>,
    mut camera_query: Query<(&mut Transform, &mut CameraZoom), With<MapCamera>>,
) {
    let Some(animation) = fly_to.animation.as_mut() else {
        return;
    };

    let Ok((mut transform, mut zoom)) = camera_query.single_mut() else {
        return;
    };

    animation.elapsed += time.delta_secs();
    let t = (animation.elapsed / animation.duration).clamp(0.0, 1.0);
    // Smoothstep easing
    let eased = t * t * (3.0 - 2.0 * t);

    let pos = animation.from_pos.lerp(animation.to_pos, eased);
    transform.translation.x = pos.x;
    transform.translation.y = pos.y;
    zoom.scale = animation.from_scale + (animation.to_scale - animation.from_scale) * eased;

    if t >= 1.0 {
        fly_to.animation = None;
    }
}
