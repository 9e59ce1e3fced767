use bevy::prelude::*;

/// First-person controller state for a spawned character.
///
/// Holds movement intent and accumulated look rotation. Input dispatch
/// overwrites the intent fields (last write wins); the body driver and the
/// look systems poll them once per frame. Stance bookkeeping lives here too:
/// `pre_crouch_speed` is snapshotted when a standing -> crouching transition
/// begins so the exact speed can be restored on the way back up.
#[derive(Component)]
pub struct PlayerController {
    /// Latest forward/back axis value in [-1, 1] (positive = forward).
    pub forward_input: f32,
    /// Latest right/left axis value in [-1, 1] (positive = right).
    pub right_input: f32,
    /// Rotation about the vertical axis (radians, unbounded).
    pub yaw: f32,
    /// Camera rig rotation about the lateral axis (radians, clamped).
    pub pitch: f32,
    /// Current stance. Only flips when the body accepts a shape change.
    pub is_crouching: bool,
    /// Movement speed captured the instant a crouch begins.
    pub pre_crouch_speed: f32,
    /// Radians per pixel of mouse movement.
    pub mouse_sensitivity: f32,
    /// Radians per second at full stick deflection.
    pub gamepad_sensitivity: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            forward_input: 0.0,
            right_input: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            is_crouching: false,
            pre_crouch_speed: 0.0,
            mouse_sensitivity: 0.003,
            gamepad_sensitivity: 2.5,
        }
    }
}

/// Marker for the child camera entity that holds the active viewpoint.
///
/// The rig is always looked up through the ECS hierarchy (`Children`), never
/// stored as an entity id on the controller, so a despawned or rebuilt rig
/// can't leave a stale reference behind.
#[derive(Component)]
pub struct CameraRig;
