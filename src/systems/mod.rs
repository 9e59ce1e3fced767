mod camera;
mod lifecycle;
mod look;
mod movement;
mod stance;

pub use camera::{camera_height, place_camera_on_spawn};
pub use lifecycle::{capture_cursor_on_spawn, restore_cursor_on_despawn, toggle_player_spawn};
pub use look::{apply_look_transforms, gamepad_look, mouse_look};
pub use movement::{apply_movement_intent, drive_body, handle_jump};
pub use stance::handle_crouch_toggle;
