//! Hover highlighting - the two-state machine behind the cursor.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::map::BoundarySource;

use super::hit_test::feature_name_at;
use super::params::{is_cursor_over_ui, CameraParams};

/// The country currently under the cursor, if any
#[derive(Resource, Default)]
pub struct HoverState {
    pub hovered: Option<String>,
}

/// Name filter applied to the hover-highlight layer. The empty string is the
/// idle filter: it matches zero features.
#[derive(Resource, Default)]
pub struct HighlightFilter {
    pub name: String,
}

/// Apply a hover transition. Returns whether the filter actually changed;
/// re-entering the same hover is a no-op so repeated pointer moves over one
/// country never reapply the filter.
pub fn apply_hover(state: &mut HoverState, filter: &mut HighlightFilter, hit: Option<&str>) -> bool {
    match hit {
        Some(name) => {
            if state.hovered.as_deref() == Some(name) {
                return false;
            }
            state.hovered = Some(name.to_string());
            filter.name = name.to_string();
            true
        }
        None => {
            if state.hovered.is_none() && filter.name.is_empty() {
                return false;
            }
            state.hovered = None;
            filter.name.clear();
            true
        }
    }
}

/// System feeding pointer movement into the hover state machine.
///
/// Runs on every pointer position, hit or not; leaving the map surface (or
/// moving over UI) resolves to the idle filter.
pub fn pointer_hover_system(
    camera: CameraParams,
    source: Res<BoundarySource>,
    mut state: ResMut<HoverState>,
    mut filter: ResMut<HighlightFilter>,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let hit = if is_cursor_over_ui(&mut contexts) {
        None
    } else {
        camera
            .cursor_world_pos()
            .and_then(|pos| feature_name_at(&source, pos))
    };

    apply_hover(&mut state, &mut filter, hit.as_deref());

    if let Ok(window_entity) = window_query.single() {
        let icon = if state.hovered.is_some() {
            CursorIcon::System(SystemCursorIcon::Pointer)
        } else {
            CursorIcon::System(SystemCursorIcon::Default)
        };
        commands.entity(window_entity).insert(icon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_enter_sets_filter() {
        let mut state = HoverState::default();
        let mut filter = HighlightFilter::default();

        assert!(apply_hover(&mut state, &mut filter, Some("France")));
        assert_eq!(state.hovered.as_deref(), Some("France"));
        assert_eq!(filter.name, "France");
    }

    #[test]
    fn test_hover_same_country_is_idempotent() {
        let mut state = HoverState::default();
        let mut filter = HighlightFilter::default();

        assert!(apply_hover(&mut state, &mut filter, Some("France")));
        assert!(!apply_hover(&mut state, &mut filter, Some("France")));
        assert_eq!(filter.name, "France");
    }

    #[test]
    fn test_hover_switch_country_changes_filter() {
        let mut state = HoverState::default();
        let mut filter = HighlightFilter::default();

        apply_hover(&mut state, &mut filter, Some("France"));
        assert!(apply_hover(&mut state, &mut filter, Some("Japan")));
        assert_eq!(filter.name, "Japan");
    }

    #[test]
    fn test_hover_leave_clears_to_empty_filter() {
        let mut state = HoverState::default();
        let mut filter = HighlightFilter::default();

        apply_hover(&mut state, &mut filter, Some("France"));
        assert!(apply_hover(&mut state, &mut filter, None));
        assert!(state.hovered.is_none());
        // The idle filter is an empty-match, not a removed layer
        assert_eq!(filter.name, "");
    }

    #[test]
    fn test_idle_stays_idle_without_changes() {
        let mut state = HoverState::default();
        let mut filter = HighlightFilter::default();

        assert!(!apply_hover(&mut state, &mut filter, None));
        assert!(!apply_hover(&mut state, &mut filter, None));
    }
}
