use bevy::prelude::*;

/// Collision capsule the controller rides on.
///
/// Stands in for the external physics body: the controller never mutates the
/// shape directly, it goes through `request_crouch`, which the physics layer
/// may refuse (e.g. not enough clearance to stand back up). A refused request
/// changes nothing; the caller re-attempts on the next toggle press.
#[derive(Component)]
pub struct CapsuleBody {
    pub radius: f32,
    standing_half_height: f32,
    crouched_half_height: f32,
    half_height: f32,
    movement_speed: f32,
    /// Vertical velocity, driven by gravity and jump impulses.
    pub velocity_y: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    pub grounded: bool,
    /// Set by the physics layer when the capsule can't change shape
    /// (obstruction above). Makes `request_crouch` refuse.
    pub shape_change_blocked: bool,
}

impl Default for CapsuleBody {
    fn default() -> Self {
        Self {
            radius: 0.3,
            standing_half_height: 0.9,
            crouched_half_height: 0.45,
            half_height: 0.9,
            movement_speed: 5.0,
            velocity_y: 0.0,
            gravity: 20.0,
            jump_speed: 8.0,
            grounded: false,
            shape_change_blocked: false,
        }
    }
}

impl CapsuleBody {
    /// Current capsule half-height (changes with stance).
    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn set_movement_speed(&mut self, speed: f32) {
        self.movement_speed = speed;
    }

    /// Ask the body to adopt the crouched (or standing) collision shape.
    ///
    /// Returns whether the request was accepted. Asking for the shape the
    /// capsule already has is a no-op and always accepted.
    pub fn request_crouch(&mut self, crouch: bool) -> bool {
        let target = if crouch {
            self.crouched_half_height
        } else {
            self.standing_half_height
        };
        if self.half_height == target {
            return true;
        }
        if self.shape_change_blocked {
            return false;
        }
        self.half_height = target;
        true
    }
}
