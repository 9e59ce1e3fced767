mod body;
mod player;

pub use body::CapsuleBody;
pub use player::{CameraRig, PlayerController};
