//! Marker systems: request handling, background API tasks, and keeping the
//! rendered marker sprites in sync with the store.

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;
use std::collections::HashSet;
use std::path::PathBuf;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::constants::MARKER_SIZE;
use crate::map::projection::geo_to_world;
use crate::theme;

use super::api::{
    self, ImageUploadResult, MarkerCreateResult, MarkerDeleteResult, MarkerListResult,
};
use super::marker::{selection_follow, Marker, MarkerStore};

/// Message to create a marker at a geographic position
#[derive(Message)]
pub struct CreateMarkerRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Message to delete a marker
#[derive(Message)]
pub struct RemoveMarkerRequest {
    pub id: String,
}

/// Message to attach an image file to a marker
#[derive(Message)]
pub struct AttachImageRequest {
    pub id: String,
    pub path: PathBuf,
}

#[derive(Component)]
pub struct LoadMarkersTask(Task<MarkerListResult>);

#[derive(Component)]
pub struct CreateMarkerTask(Task<MarkerCreateResult>);

#[derive(Component)]
pub struct DeleteMarkerTask(Task<MarkerDeleteResult>);

#[derive(Component)]
pub struct UploadImageTask(Task<ImageUploadResult>);

/// Sprite entity mirroring one marker in the store
#[derive(Component)]
pub struct MarkerSprite {
    pub id: String,
}

/// System to start the one-time initial marker load
pub fn start_marker_load(mut commands: Commands, config: Res<AppConfig>) {
    let backend_url = config.data.backend_url.clone();

    let task_pool = IoTaskPool::get();
    let task = task_pool.spawn(async move { api::fetch_markers(&backend_url) });

    commands.spawn(LoadMarkersTask(task));
}

/// System handling create requests: clear the selection right away, generate
/// the client id, and start the round-trip. Nothing is appended until the
/// server confirms.
pub fn handle_create_requests(
    mut commands: Commands,
    mut events: MessageReader<CreateMarkerRequest>,
    mut store: ResMut<MarkerStore>,
    config: Res<AppConfig>,
) {
    for event in events.read() {
        store.begin_create();

        let marker = Marker {
            id: Uuid::new_v4().to_string(),
            lat: event.lat,
            lng: event.lng,
            image: None,
        };
        let backend_url = config.data.backend_url.clone();

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move { api::create_marker(&backend_url, &marker) });

        commands.spawn(CreateMarkerTask(task));
    }
}

/// System handling remove requests: pessimistic, the list is untouched until
/// the delete succeeds.
pub fn handle_remove_requests(
    mut commands: Commands,
    mut events: MessageReader<RemoveMarkerRequest>,
    config: Res<AppConfig>,
) {
    for event in events.read() {
        let backend_url = config.data.backend_url.clone();
        let id = event.id.clone();

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move { api::delete_marker(&backend_url, &id) });

        commands.spawn(DeleteMarkerTask(task));
    }
}

/// System handling image-attach requests. The file is read, validated as a
/// decodable image, and uploaded fire-and-forget.
pub fn handle_attach_requests(
    mut commands: Commands,
    mut events: MessageReader<AttachImageRequest>,
    config: Res<AppConfig>,
) {
    for event in events.read() {
        let backend_url = config.data.backend_url.clone();
        let id = event.id.clone();
        let path = event.path.clone();

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    return ImageUploadResult {
                        id,
                        error: Some(format!("Failed to read {:?}: {}", path, e)),
                    }
                }
            };

            if let Err(e) = image::guess_format(&bytes) {
                return ImageUploadResult {
                    id,
                    error: Some(format!("{:?} is not a supported image: {}", path, e)),
                };
            }

            api::upload_marker_image(&backend_url, &id, &bytes)
        });

        commands.spawn(UploadImageTask(task));
    }
}

/// System to poll the initial load and install the list wholesale
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadMarkersTask)>,
    mut store: ResMut<MarkerStore>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            match result.markers {
                Some(markers) => {
                    info!("Loaded {} markers", markers.len());
                    store.apply_loaded(markers);
                }
                None => {
                    if let Some(error) = result.error {
                        error!("{}", error);
                    }
                }
            }

            commands.entity(entity).despawn();
        }
    }
}

/// System to poll create round-trips. The server-returned marker is appended
/// to the list as it is at poll time; a failed create is dropped.
pub fn poll_create_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut CreateMarkerTask)>,
    mut store: ResMut<MarkerStore>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            match result.marker {
                Some(marker) => {
                    info!("Created marker {} at ({}, {})", marker.id, marker.lat, marker.lng);
                    store.apply_created(marker);
                }
                None => {
                    if let Some(error) = result.error {
                        error!("{}", error);
                    }
                }
            }

            commands.entity(entity).despawn();
        }
    }
}

/// System to poll delete round-trips. Only a confirmed delete filters the
/// marker out; a failure leaves the list and the selection untouched.
pub fn poll_delete_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut DeleteMarkerTask)>,
    mut store: ResMut<MarkerStore>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            if result.success {
                info!("Removed marker {}", result.id);
                store.apply_removed(&result.id);
            } else if let Some(error) = result.error {
                error!("{}", error);
            }

            commands.entity(entity).despawn();
        }
    }
}

/// System to poll image uploads. Success has no local effect.
pub fn poll_upload_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut UploadImageTask)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            match result.error {
                Some(error) => error!("{}", error),
                None => info!("Uploaded image for marker {}", result.id),
            }

            commands.entity(entity).despawn();
        }
    }
}

/// System applying the selection-follow step after store mutations
pub fn selection_follow_system(mut store: ResMut<MarkerStore>) {
    selection_follow(&mut store);
}

/// System reconciling marker sprites with the store: spawn for new markers,
/// despawn for removed ones, track position and selection tint.
pub fn sync_marker_sprites(
    mut commands: Commands,
    store: Res<MarkerStore>,
    mut sprites: Query<(Entity, &MarkerSprite, &mut Transform, &mut Sprite)>,
) {
    let mut seen = HashSet::new();

    for (entity, marker_sprite, mut transform, mut sprite) in sprites.iter_mut() {
        match store.get(&marker_sprite.id) {
            Some(marker) => {
                seen.insert(marker.id.clone());

                let pos = geo_to_world(marker.lng, marker.lat);
                transform.translation.x = pos.x;
                transform.translation.y = pos.y;

                let color = if store.selected.as_deref() == Some(marker.id.as_str()) {
                    theme::MARKER_SELECTED_COLOR
                } else {
                    theme::MARKER_COLOR
                };
                if sprite.color != color {
                    sprite.color = color;
                }
            }
            None => {
                commands.entity(entity).despawn();
            }
        }
    }

    for marker in store.markers() {
        if seen.contains(&marker.id) {
            continue;
        }

        let pos = geo_to_world(marker.lng, marker.lat);
        commands.spawn((
            Sprite::from_color(theme::MARKER_COLOR, Vec2::splat(MARKER_SIZE)),
            Transform::from_translation(pos.extend(500.0)),
            MarkerSprite {
                id: marker.id.clone(),
            },
        ));
    }
}
