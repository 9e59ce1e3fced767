use bevy::prelude::*;

use super::camera::camera_height;
use crate::components::{CameraRig, CapsuleBody, PlayerController};
use crate::input::{ActionEvent, ActionId};

/// Speed multiplier while crouched.
const CROUCH_SPEED_FACTOR: f32 = 0.5;

/// One press of the crouch toggle. Returns whether the stance changed.
///
/// Standing -> crouching snapshots the current speed first, then asks the
/// body for the crouched shape; only an accepted request flips the stance
/// and halves the speed. Crouching -> standing is symmetric and restores the
/// snapshotted speed exactly. A refused request leaves both stance and speed
/// untouched; the player simply presses the toggle again.
pub fn toggle_stance(controller: &mut PlayerController, body: &mut CapsuleBody) -> bool {
    if !controller.is_crouching {
        controller.pre_crouch_speed = body.movement_speed();
        if body.request_crouch(true) {
            controller.is_crouching = true;
            body.set_movement_speed(controller.pre_crouch_speed * CROUCH_SPEED_FACTOR);
            return true;
        }
    } else if body.request_crouch(false) {
        controller.is_crouching = false;
        body.set_movement_speed(controller.pre_crouch_speed);
        return true;
    }
    false
}

/// Consume crouch action events and reconcile the camera rig afterwards.
///
/// The rig height is recomputed from the body's current half-height whether
/// or not the shape change was accepted: on refusal the half-height is
/// unchanged, so this is an idempotent no-op that keeps the rig from ever
/// lagging the stance by a frame.
pub fn handle_crouch_toggle(
    mut actions: EventReader<ActionEvent>,
    mut bodies: Query<(&mut PlayerController, &mut CapsuleBody, &Children)>,
    mut rigs: Query<&mut Transform, With<CameraRig>>,
) {
    for event in actions.read() {
        if event.id != ActionId::Crouch {
            continue;
        }
        for (mut controller, mut body, children) in bodies.iter_mut() {
            toggle_stance(&mut controller, &mut body);
            for &child in children.iter() {
                if let Ok(mut rig) = rigs.get_mut(child) {
                    rig.translation.y = camera_height(body.half_height());
                }
            }
        }
    }
}
