use bevy::input::gamepad::{GamepadConnection, GamepadConnectionEvent};
use bevy::prelude::*;

use super::bindings::InputBindings;
use super::ids::{ActionId, AxisId};
use crate::components::PlayerController;

/// A discrete input firing. Carries only the abstract id; consumers decide
/// what it means for them.
#[derive(Event, Debug, Clone, Copy)]
pub struct ActionEvent {
    pub id: ActionId,
}

/// A continuous input changing value. Emitted only when the combined device
/// value actually changed, so downstream last-write-wins state stays quiet
/// while the player holds a key steady.
#[derive(Event, Debug, Clone, Copy)]
pub struct AxisEvent {
    pub id: AxisId,
    pub value: f32,
}

/// Resolve action bindings against current device state and emit events for
/// every action whose combo was just pressed this frame.
pub fn dispatch_actions(
    bindings: Res<InputBindings>,
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut actions: EventWriter<ActionEvent>,
) {
    for (&id, binding) in bindings.actions() {
        let key_fired = binding.keys.iter().any(|&key| keyboard.just_pressed(key));
        let button_fired = gamepads
            .iter()
            .any(|gamepad| binding.buttons.iter().any(|&button| gamepad.just_pressed(button)));
        if key_fired || button_fired {
            actions.send(ActionEvent { id });
        }
    }
}

/// Resolve axis bindings and emit change events. Keyboard pairs are
/// pre-combined to -1/0/1 before they reach any consumer.
pub fn dispatch_axes(
    mut bindings: ResMut<InputBindings>,
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut axes: EventWriter<AxisEvent>,
) {
    let gamepad = gamepads.iter().next();
    for (id, value) in bindings.changed_axis_values(&keyboard, gamepad) {
        axes.send(AxisEvent { id, value });
    }
}

/// Stop the character drifting on stick input that no longer exists.
///
/// Clearing the axis memory makes the next dispatch pass re-emit every axis
/// from current device state, so a still-held keyboard key immediately wins
/// the channel back.
pub fn handle_gamepad_disconnect(
    mut events: EventReader<GamepadConnectionEvent>,
    mut bindings: ResMut<InputBindings>,
    mut players: Query<&mut PlayerController>,
) {
    for event in events.read() {
        if matches!(event.connection, GamepadConnection::Disconnected) {
            bindings.reset_axis_memory();
            for mut controller in players.iter_mut() {
                controller.forward_input = 0.0;
                controller.right_input = 0.0;
            }
            info!("gamepad disconnected, movement input cleared");
        }
    }
}
