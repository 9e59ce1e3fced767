/// Unique IDs of action events (discrete, momentary or toggle input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    Jump,
    Crouch,
}

/// Unique IDs of axis events (continuous scalar input in [-1, 1]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    /// Move forward/back.
    MoveForward,
    /// Move right/left.
    MoveRight,
    /// Gamepad-only horizontal look.
    LookRight,
    /// Gamepad-only vertical look.
    LookUp,
}
