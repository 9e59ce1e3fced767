mod components;
mod input;
mod resources;
mod systems;
mod world;

use bevy::prelude::*;
use bevy::render::settings::{Backends, RenderCreation, WgpuSettings};
use bevy::render::RenderPlugin;

use input::{default_bindings, ActionEvent, AxisEvent};
use resources::CursorSnapshot;
use systems::*;
use world::{setup_world, spawn_initial_player};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Capsule Walker".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(RenderPlugin {
                    render_creation: RenderCreation::Automatic(WgpuSettings {
                        // Force Vulkan backend for multi-platform compatibility
                        backends: Some(Backends::VULKAN),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .init_resource::<CursorSnapshot>()
        .add_event::<ActionEvent>()
        .add_event::<AxisEvent>()
        .add_systems(Startup, (setup_bindings, setup_world, spawn_initial_player).chain())
        // Controller pipeline: dispatch resolves the binding table, the
        // stance/movement/look systems mutate controller state, look is
        // written to the transforms, and the body driver consumes intent
        // against this frame's yaw - all in one ordered pass so nothing
        // observes a half-updated frame.
        .add_systems(
            Update,
            (
                input::dispatch_actions,
                input::dispatch_axes,
                input::handle_gamepad_disconnect,
                apply_movement_intent,
                handle_crouch_toggle,
                handle_jump,
                mouse_look,
                gamepad_look,
                apply_look_transforms,
                drive_body,
            )
                .chain(),
        )
        // Lifecycle hooks: spawn-completion placement and cursor capture,
        // removal-driven cursor restore, and the Escape spawn toggle.
        .add_systems(
            Update,
            (
                toggle_player_spawn,
                place_camera_on_spawn,
                capture_cursor_on_spawn,
                restore_cursor_on_despawn,
            ),
        )
        .run();
}

/// Build the binding table. A registration failure here means the character
/// would be uncontrollable, so abort instead of starting the game.
fn setup_bindings(mut commands: Commands) {
    let bindings = default_bindings().expect("failed to register input bindings");
    commands.insert_resource(bindings);
}
