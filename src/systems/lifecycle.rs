use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::components::PlayerController;
use crate::resources::CursorSnapshot;
use crate::world::spawn_player;

/// Spawn-completion hook for input capture: remember the cursor's current
/// visibility, then hide and lock it for free look.
pub fn capture_cursor_on_spawn(
    players: Query<Entity, Added<PlayerController>>,
    mut snapshot: ResMut<CursorSnapshot>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if players.is_empty() {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    if snapshot.capture(window.cursor_options.visible) {
        window.cursor_options.visible = false;
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        info!("cursor captured for look input");
    }
}

/// Despawn hook: put the cursor back exactly as it was before the capture.
/// Runs off component removal, so it also fires when an error path tears the
/// character down, never leaving the cursor permanently hidden.
pub fn restore_cursor_on_despawn(
    mut removed: RemovedComponents<PlayerController>,
    players: Query<(), With<PlayerController>>,
    mut snapshot: ResMut<CursorSnapshot>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if removed.read().next().is_none() || !players.is_empty() {
        return;
    }
    if let Some(visible) = snapshot.restore() {
        if let Ok(mut window) = windows.get_single_mut() {
            window.cursor_options.visible = visible;
            window.cursor_options.grab_mode = CursorGrabMode::None;
            info!("cursor visibility restored");
        }
    }
}

/// Demo lifecycle driver: Escape despawns the character (restoring the
/// cursor) and brings it back on the next press.
pub fn toggle_player_spawn(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    players: Query<Entity, With<PlayerController>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    if let Ok(player) = players.get_single() {
        commands.entity(player).despawn_recursive();
    } else {
        spawn_player(&mut commands);
    }
}
