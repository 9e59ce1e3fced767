use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use crate::components::{CameraRig, PlayerController};
use crate::input::{AxisId, InputBindings};

/// Pitch stops just short of straight up/down so the view never flips.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Add already-scaled look deltas to the controller.
///
/// `dx`/`dy` follow the mouse convention: positive x looks right, positive y
/// looks down. Yaw is left unbounded; pitch is clamped.
pub(crate) fn accumulate_look(controller: &mut PlayerController, dx: f32, dy: f32) {
    controller.yaw -= dx;
    controller.pitch = (controller.pitch - dy).clamp(-PITCH_LIMIT, PITCH_LIMIT);
}

/// Pointer path: fires per raw movement event and carries a pixel delta that
/// is already frame-rate independent, so no time scaling is applied.
pub fn mouse_look(
    mut motion: EventReader<MouseMotion>,
    mut players: Query<&mut PlayerController>,
) {
    let mut delta = Vec2::ZERO;
    for event in motion.read() {
        delta += event.delta;
    }
    if delta == Vec2::ZERO {
        return;
    }

    for mut controller in players.iter_mut() {
        let scale = controller.mouse_sensitivity;
        accumulate_look(&mut controller, delta.x * scale, delta.y * scale);
    }
}

/// Scale a sampled stick displacement into mouse-style look deltas.
///
/// A stick reports displacement, not deltas, so the held value is integrated
/// against elapsed time to stay frame-rate independent. Stick up means look
/// up, which is a negative mouse-style dy.
pub(crate) fn stick_look_delta(x: f32, y: f32, sensitivity: f32, dt: f32) -> (f32, f32) {
    (x * sensitivity * dt, -y * sensitivity * dt)
}

/// Stick path: samples the held stick value once per frame through the
/// binding table and integrates it against elapsed time.
pub fn gamepad_look(
    time: Res<Time>,
    bindings: Res<InputBindings>,
    gamepads: Query<&Gamepad>,
    mut players: Query<&mut PlayerController>,
) {
    let Some(gamepad) = gamepads.iter().next() else {
        return;
    };
    let x = bindings.axis_value(AxisId::LookRight, gamepad);
    let y = bindings.axis_value(AxisId::LookUp, gamepad);
    if x == 0.0 && y == 0.0 {
        return;
    }

    let dt = time.delta_secs();
    for mut controller in players.iter_mut() {
        let (dx, dy) = stick_look_delta(x, y, controller.gamepad_sensitivity, dt);
        accumulate_look(&mut controller, dx, dy);
    }
}

/// Write accumulated look back to the scene: yaw rotates the body about its
/// vertical axis (non-yaw axes untouched, the character stays upright),
/// pitch rotates only the camera rig child.
pub fn apply_look_transforms(
    mut bodies: Query<
        (&mut Transform, &PlayerController, &Children),
        Changed<PlayerController>,
    >,
    mut rigs: Query<&mut Transform, (With<CameraRig>, Without<PlayerController>)>,
) {
    for (mut transform, controller, children) in bodies.iter_mut() {
        transform.rotation = Quat::from_rotation_y(controller.yaw);
        for &child in children.iter() {
            if let Ok(mut rig) = rigs.get_mut(child) {
                rig.rotation = Quat::from_rotation_x(controller.pitch);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_accumulates_across_events() {
        let mut controller = PlayerController::default();
        let k = controller.mouse_sensitivity;
        let before = controller.yaw;

        accumulate_look(&mut controller, 12.0 * k, 0.0);
        accumulate_look(&mut controller, -5.0 * k, 0.0);

        assert!((controller.yaw - (before - k * (12.0 - 5.0))).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut controller = PlayerController::default();
        for _ in 0..1000 {
            accumulate_look(&mut controller, -0.1, 0.0);
        }
        assert!(controller.yaw > std::f32::consts::TAU);
    }

    #[test]
    fn test_pitch_clamps_at_vertical() {
        let mut controller = PlayerController::default();

        accumulate_look(&mut controller, 0.0, -100.0);
        assert_eq!(controller.pitch, PITCH_LIMIT);

        accumulate_look(&mut controller, 0.0, 100.0);
        assert_eq!(controller.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_stick_look_integration_is_frame_rate_independent() {
        let mut at_30hz = PlayerController::default();
        let mut at_60hz = PlayerController::default();
        let sensitivity = at_30hz.gamepad_sensitivity;

        // The same held deflection over one 1/30s frame or two 1/60s frames
        // must rotate the view by the same amount.
        let (dx, dy) = stick_look_delta(0.8, -0.4, sensitivity, 1.0 / 30.0);
        accumulate_look(&mut at_30hz, dx, dy);
        for _ in 0..2 {
            let (dx, dy) = stick_look_delta(0.8, -0.4, sensitivity, 1.0 / 60.0);
            accumulate_look(&mut at_60hz, dx, dy);
        }

        assert!((at_30hz.yaw - at_60hz.yaw).abs() < 1e-6);
        assert!((at_30hz.pitch - at_60hz.pitch).abs() < 1e-6);
    }

    #[test]
    fn test_stick_up_looks_up() {
        let mut controller = PlayerController::default();
        let (dx, dy) = stick_look_delta(0.0, 1.0, 2.0, 0.1);
        accumulate_look(&mut controller, dx, dy);
        assert!(controller.pitch > 0.0);
    }

    #[test]
    fn test_look_does_not_touch_movement_intent() {
        let mut controller = PlayerController::default();
        accumulate_look(&mut controller, 1.0, 1.0);
        assert_eq!(controller.forward_input, 0.0);
        assert_eq!(controller.right_input, 0.0);
    }
}
