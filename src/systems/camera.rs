use bevy::prelude::*;

use crate::components::{CameraRig, CapsuleBody, PlayerController};

/// Camera height relative to the capsule center, as a multiple of the
/// capsule half-height. Puts the viewpoint a little above the top of the
/// capsule so crouching visibly lowers the eye line.
pub const CAMERA_HEIGHT_FACTOR: f32 = 2.1;

/// Relative height the camera rig should have for a given capsule.
pub fn camera_height(body_half_height: f32) -> f32 {
    body_half_height * CAMERA_HEIGHT_FACTOR
}

/// Spawn-completion hook: once the body and its camera rig child both exist,
/// put the rig at stance height. Also covers respawns.
pub fn place_camera_on_spawn(
    bodies: Query<(&CapsuleBody, &Children), Added<PlayerController>>,
    mut rigs: Query<&mut Transform, With<CameraRig>>,
) {
    for (body, children) in bodies.iter() {
        for &child in children.iter() {
            if let Ok(mut rig) = rigs.get_mut(child) {
                rig.translation.y = camera_height(body.half_height());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_height_tracks_half_height() {
        assert!((camera_height(0.9) - 1.89).abs() < 1e-6);
        assert!((camera_height(0.45) - 0.945).abs() < 1e-6);
    }
}
