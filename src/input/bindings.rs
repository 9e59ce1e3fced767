use bevy::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

use super::ids::{ActionId, AxisId};

/// Deadzone applied to analog stick values before they reach the controller.
pub const STICK_DEADZONE: f32 = 0.15;

/// Registration failures. All of these are startup configuration errors:
/// an unbound input means the character is uncontrollable, so main aborts
/// instead of limping along.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("action {0:?} is already registered")]
    DuplicateAction(ActionId),
    #[error("axis {0:?} is already registered")]
    DuplicateAxis(AxisId),
    #[error("binding has no device inputs at all")]
    EmptyCombo,
    #[error("key pair uses the same key for both directions")]
    MirroredKeyPair,
}

/// Device combination for a discrete action: any listed key or button fires it.
#[derive(Debug, Clone, Default)]
pub struct ActionBinding {
    pub keys: Vec<KeyCode>,
    pub buttons: Vec<GamepadButton>,
}

/// Device combination for a continuous axis.
///
/// The key pair is (positive, negative); the dispatch layer pre-combines it
/// into a single -1/0/1 digital value. `polled` axes (gamepad look) are never
/// dispatched as change events - consumers sample them every frame instead,
/// because a stick reports displacement, not deltas.
#[derive(Debug, Clone, Default)]
pub struct AxisBinding {
    pub key_pair: Option<(KeyCode, KeyCode)>,
    pub stick: Option<GamepadAxis>,
    pub polled: bool,
}

impl AxisBinding {
    /// Digital keyboard contribution: +1, -1 or 0.
    pub fn keyboard_value(&self, keyboard: &ButtonInput<KeyCode>) -> f32 {
        let Some((positive, negative)) = self.key_pair else {
            return 0.0;
        };
        (keyboard.pressed(positive) as i8 - keyboard.pressed(negative) as i8) as f32
    }

    /// Deadzone-processed stick contribution, 0 when no stick is bound.
    pub fn stick_value(&self, gamepad: &Gamepad, deadzone: f32) -> f32 {
        let Some(axis) = self.stick else {
            return 0.0;
        };
        apply_deadzone(gamepad.get(axis).unwrap_or(0.0), deadzone)
    }
}

/// Rescale a raw stick value so the live range still spans [-1, 1].
fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        0.0
    } else {
        (value - deadzone * value.signum()) / (1.0 - deadzone)
    }
}

/// Static mapping from abstract event ids to device combinations.
///
/// Built once at startup; the dispatch systems resolve it against current
/// device state every frame. Also remembers the last value emitted per axis
/// so downstream consumers only see change events.
#[derive(Resource)]
pub struct InputBindings {
    actions: HashMap<ActionId, ActionBinding>,
    axes: HashMap<AxisId, AxisBinding>,
    last_axis_values: HashMap<AxisId, f32>,
    pub stick_deadzone: f32,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
            axes: HashMap::new(),
            last_axis_values: HashMap::new(),
            stick_deadzone: STICK_DEADZONE,
        }
    }
}

impl InputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a discrete action. Fails on id collision or an empty combo.
    pub fn register_action(
        &mut self,
        id: ActionId,
        binding: ActionBinding,
    ) -> Result<(), BindingError> {
        if self.actions.contains_key(&id) {
            return Err(BindingError::DuplicateAction(id));
        }
        if binding.keys.is_empty() && binding.buttons.is_empty() {
            return Err(BindingError::EmptyCombo);
        }
        info!("registered action {:?}", id);
        self.actions.insert(id, binding);
        Ok(())
    }

    /// Register a continuous axis. Fails on id collision or a malformed combo.
    pub fn register_axis(&mut self, id: AxisId, binding: AxisBinding) -> Result<(), BindingError> {
        if self.axes.contains_key(&id) {
            return Err(BindingError::DuplicateAxis(id));
        }
        if binding.key_pair.is_none() && binding.stick.is_none() {
            return Err(BindingError::EmptyCombo);
        }
        if let Some((positive, negative)) = binding.key_pair {
            if positive == negative {
                return Err(BindingError::MirroredKeyPair);
            }
        }
        info!("registered axis {:?}", id);
        self.axes.insert(id, binding);
        Ok(())
    }

    pub fn actions(&self) -> impl Iterator<Item = (&ActionId, &ActionBinding)> {
        self.actions.iter()
    }

    /// Sample the currently-held stick value for a polled axis.
    pub fn axis_value(&self, id: AxisId, gamepad: &Gamepad) -> f32 {
        let Some(binding) = self.axes.get(&id) else {
            return 0.0;
        };
        binding.stick_value(gamepad, self.stick_deadzone)
    }

    /// Recompute every event-dispatched axis and return the ones whose
    /// combined device value changed since the last call.
    pub fn changed_axis_values(
        &mut self,
        keyboard: &ButtonInput<KeyCode>,
        gamepad: Option<&Gamepad>,
    ) -> Vec<(AxisId, f32)> {
        let mut changed = Vec::new();
        for (&id, binding) in &self.axes {
            if binding.polled {
                continue;
            }
            let kb = binding.keyboard_value(keyboard);
            let stick = gamepad
                .map(|g| binding.stick_value(g, self.stick_deadzone))
                .unwrap_or(0.0);
            // Keyboard wins while any of its pair is held; the stick fills in
            // otherwise. Downstream state is last-write-wins either way.
            let value = if kb != 0.0 { kb } else { stick };
            if self.last_axis_values.get(&id).copied() != Some(value) {
                self.last_axis_values.insert(id, value);
                changed.push((id, value));
            }
        }
        changed
    }

    /// Forget remembered axis values so the next dispatch re-emits them.
    /// Used after a gamepad disconnect, where held keyboard keys must win
    /// back the axis without the player re-pressing them.
    pub fn reset_axis_memory(&mut self) {
        self.last_axis_values.clear();
    }
}

/// Default bindings for the character: crouch toggle, jump, WASD + left
/// stick movement, right stick look.
pub fn default_bindings() -> Result<InputBindings, BindingError> {
    let mut bindings = InputBindings::new();

    bindings.register_action(
        ActionId::Jump,
        ActionBinding {
            keys: vec![KeyCode::Space],
            buttons: vec![GamepadButton::South],
        },
    )?;
    bindings.register_action(
        ActionId::Crouch,
        ActionBinding {
            keys: vec![KeyCode::KeyC],
            buttons: vec![GamepadButton::East],
        },
    )?;

    bindings.register_axis(
        AxisId::MoveForward,
        AxisBinding {
            key_pair: Some((KeyCode::KeyW, KeyCode::KeyS)),
            stick: Some(GamepadAxis::LeftStickY),
            polled: false,
        },
    )?;
    bindings.register_axis(
        AxisId::MoveRight,
        AxisBinding {
            key_pair: Some((KeyCode::KeyD, KeyCode::KeyA)),
            stick: Some(GamepadAxis::LeftStickX),
            polled: false,
        },
    )?;

    // Look axes have no keyboard equivalent: the mouse path is event-driven
    // and bypasses the binding table entirely.
    bindings.register_axis(
        AxisId::LookRight,
        AxisBinding {
            key_pair: None,
            stick: Some(GamepadAxis::RightStickX),
            polled: true,
        },
    )?;
    bindings.register_axis(
        AxisId::LookUp,
        AxisBinding {
            key_pair: None,
            stick: Some(GamepadAxis::RightStickY),
            polled: true,
        },
    )?;

    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_register_cleanly() {
        assert!(default_bindings().is_ok());
    }

    #[test]
    fn test_duplicate_action_rejected() {
        let mut bindings = InputBindings::new();
        let combo = ActionBinding {
            keys: vec![KeyCode::Space],
            buttons: vec![],
        };
        assert!(bindings.register_action(ActionId::Jump, combo.clone()).is_ok());
        assert_eq!(
            bindings.register_action(ActionId::Jump, combo),
            Err(BindingError::DuplicateAction(ActionId::Jump))
        );
    }

    #[test]
    fn test_duplicate_axis_rejected() {
        let mut bindings = InputBindings::new();
        let combo = AxisBinding {
            key_pair: Some((KeyCode::KeyW, KeyCode::KeyS)),
            stick: None,
            polled: false,
        };
        assert!(bindings.register_axis(AxisId::MoveForward, combo.clone()).is_ok());
        assert_eq!(
            bindings.register_axis(AxisId::MoveForward, combo),
            Err(BindingError::DuplicateAxis(AxisId::MoveForward))
        );
    }

    #[test]
    fn test_empty_combo_rejected() {
        let mut bindings = InputBindings::new();
        assert_eq!(
            bindings.register_action(ActionId::Jump, ActionBinding::default()),
            Err(BindingError::EmptyCombo)
        );
        assert_eq!(
            bindings.register_axis(AxisId::MoveForward, AxisBinding::default()),
            Err(BindingError::EmptyCombo)
        );
    }

    #[test]
    fn test_mirrored_key_pair_rejected() {
        let mut bindings = InputBindings::new();
        let combo = AxisBinding {
            key_pair: Some((KeyCode::KeyW, KeyCode::KeyW)),
            stick: None,
            polled: false,
        };
        assert_eq!(
            bindings.register_axis(AxisId::MoveForward, combo),
            Err(BindingError::MirroredKeyPair)
        );
    }

    #[test]
    fn test_keyboard_pair_combines_to_digital_axis() {
        let binding = AxisBinding {
            key_pair: Some((KeyCode::KeyW, KeyCode::KeyS)),
            stick: None,
            polled: false,
        };

        let mut keyboard = ButtonInput::<KeyCode>::default();
        assert_eq!(binding.keyboard_value(&keyboard), 0.0);

        keyboard.press(KeyCode::KeyW);
        assert_eq!(binding.keyboard_value(&keyboard), 1.0);

        // Both held cancel out.
        keyboard.press(KeyCode::KeyS);
        assert_eq!(binding.keyboard_value(&keyboard), 0.0);

        keyboard.release(KeyCode::KeyW);
        assert_eq!(binding.keyboard_value(&keyboard), -1.0);
    }

    #[test]
    fn test_deadzone_rescales_live_range() {
        assert_eq!(apply_deadzone(0.1, 0.15), 0.0);
        assert_eq!(apply_deadzone(-0.1, 0.15), 0.0);
        assert_eq!(apply_deadzone(1.0, 0.15), 1.0);
        assert_eq!(apply_deadzone(-1.0, 0.15), -1.0);

        // Just past the deadzone edge the value should be barely nonzero,
        // not jump to 0.15.
        let edge = apply_deadzone(0.16, 0.15);
        assert!(edge > 0.0 && edge < 0.02);
    }

    #[test]
    fn test_changed_axis_values_emit_only_on_change() {
        let mut bindings = InputBindings::new();
        bindings
            .register_axis(
                AxisId::MoveForward,
                AxisBinding {
                    key_pair: Some((KeyCode::KeyW, KeyCode::KeyS)),
                    stick: None,
                    polled: false,
                },
            )
            .unwrap();

        let mut keyboard = ButtonInput::<KeyCode>::default();

        // First pass establishes the resting value.
        assert_eq!(
            bindings.changed_axis_values(&keyboard, None),
            vec![(AxisId::MoveForward, 0.0)]
        );
        // Unchanged input is silent.
        assert!(bindings.changed_axis_values(&keyboard, None).is_empty());

        keyboard.press(KeyCode::KeyW);
        assert_eq!(
            bindings.changed_axis_values(&keyboard, None),
            vec![(AxisId::MoveForward, 1.0)]
        );
        assert!(bindings.changed_axis_values(&keyboard, None).is_empty());

        // Resetting memory re-emits the held value.
        bindings.reset_axis_memory();
        assert_eq!(
            bindings.changed_axis_values(&keyboard, None),
            vec![(AxisId::MoveForward, 1.0)]
        );
    }

    #[test]
    fn test_polled_axes_never_dispatch() {
        let mut bindings = InputBindings::new();
        bindings
            .register_axis(
                AxisId::LookRight,
                AxisBinding {
                    key_pair: None,
                    stick: Some(GamepadAxis::RightStickX),
                    polled: true,
                },
            )
            .unwrap();

        let keyboard = ButtonInput::<KeyCode>::default();
        assert!(bindings.changed_axis_values(&keyboard, None).is_empty());
    }
}
