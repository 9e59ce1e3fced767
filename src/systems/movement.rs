use bevy::prelude::*;

use crate::components::{CapsuleBody, PlayerController};
use crate::input::{ActionEvent, ActionId, AxisEvent, AxisId};

/// Store an axis value on the controller. Overwrites, never accumulates:
/// only the most recent value before a poll is visible to consumers.
pub(crate) fn apply_axis(controller: &mut PlayerController, id: AxisId, value: f32) {
    match id {
        AxisId::MoveForward => controller.forward_input = value,
        AxisId::MoveRight => controller.right_input = value,
        // Look axes are polled by the look controller, not aggregated here.
        AxisId::LookRight | AxisId::LookUp => {}
    }
}

/// Feed movement axis change events into the controller's intent fields.
pub fn apply_movement_intent(
    mut axes: EventReader<AxisEvent>,
    mut players: Query<&mut PlayerController>,
) {
    for event in axes.read() {
        for mut controller in players.iter_mut() {
            apply_axis(&mut controller, event.id, event.value);
        }
    }
}

/// Jump is a momentary action: a vertical impulse, only while grounded.
pub fn handle_jump(mut actions: EventReader<ActionEvent>, mut bodies: Query<&mut CapsuleBody>) {
    for event in actions.read() {
        if event.id != ActionId::Jump {
            continue;
        }
        for mut body in bodies.iter_mut() {
            if body.grounded {
                body.velocity_y = body.jump_speed;
                body.grounded = false;
            }
        }
    }
}

/// Body driver: consumes movement intent once per frame and moves the
/// capsule. Horizontal motion follows the body's yaw, vertical motion
/// integrates gravity against the flat ground plane.
pub fn drive_body(
    time: Res<Time>,
    mut bodies: Query<(&mut Transform, &PlayerController, &mut CapsuleBody)>,
) {
    let dt = time.delta_secs();

    for (mut transform, controller, mut body) in bodies.iter_mut() {
        // The body carries yaw only, so forward/right are already horizontal.
        let forward = transform.forward().as_vec3();
        let right = transform.right().as_vec3();
        let direction = (forward * controller.forward_input + right * controller.right_input)
            .clamp_length_max(1.0);
        transform.translation += direction * body.movement_speed() * dt;

        body.velocity_y -= body.gravity * dt;
        transform.translation.y += body.velocity_y * dt;

        // Flat ground plane at y = 0; the capsule center rests one
        // half-height above it. Stance changes move the rest height, and a
        // stand-up below it is pushed back out.
        let rest_height = body.half_height();
        if transform.translation.y <= rest_height {
            transform.translation.y = rest_height;
            body.velocity_y = 0.0;
            body.grounded = true;
        } else {
            body.grounded = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_last_write_wins() {
        let mut controller = PlayerController::default();

        apply_axis(&mut controller, AxisId::MoveForward, 0.3);
        apply_axis(&mut controller, AxisId::MoveForward, -1.0);
        apply_axis(&mut controller, AxisId::MoveForward, 0.0);

        assert_eq!(controller.forward_input, 0.0);
    }

    #[test]
    fn test_axis_channels_are_independent() {
        let mut controller = PlayerController::default();

        apply_axis(&mut controller, AxisId::MoveForward, 1.0);
        apply_axis(&mut controller, AxisId::MoveRight, -0.5);

        assert_eq!(controller.forward_input, 1.0);
        assert_eq!(controller.right_input, -0.5);
    }

    #[test]
    fn test_look_axes_do_not_touch_movement_intent() {
        let mut controller = PlayerController::default();

        apply_axis(&mut controller, AxisId::LookRight, 1.0);
        apply_axis(&mut controller, AxisId::LookUp, 1.0);

        assert_eq!(controller.forward_input, 0.0);
        assert_eq!(controller.right_input, 0.0);
    }
}
