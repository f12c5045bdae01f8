//! Player input handling.
//!
//! This module converts raw per-tick input (analog stick or digital keys plus
//! buttons) into commands for the physics system.

use headhop_physics::PlayerCommand;
use serde::{Deserialize, Serialize};

/// Raw player input for a single tick.
///
/// This is the input format received from the client input system.
/// It gets converted to [`PlayerCommand`] for the physics system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Horizontal stick, -1.0 (left) to 1.0 (right).
    pub horizontal: f32,

    /// Vertical stick, -1.0 (down) to 1.0 (up).
    pub vertical: f32,

    /// Action buttons held.
    pub actions: ActionInput,

    /// Frame number this input was generated.
    pub frame: u64,
}

/// Digital direction key states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Action button states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInput {
    pub jump: bool,
    pub hit: bool,
}

impl PlayerInput {
    /// Build analog input from digital keys. Opposing keys cancel out.
    pub fn from_keys(keys: DirectionKeys, actions: ActionInput) -> Self {
        Self {
            horizontal: axis(keys.left, keys.right),
            vertical: axis(keys.down, keys.up),
            actions,
            frame: 0,
        }
    }

    /// Convert to a physics command. Axes are clamped to `[-1, 1]`.
    pub fn to_command(&self) -> PlayerCommand {
        PlayerCommand {
            horizontal: clamp_axis(self.horizontal),
            vertical: clamp_axis(self.vertical),
            jump: self.actions.jump,
        }
    }

    /// Check if any movement input is active.
    pub fn has_movement(&self) -> bool {
        self.horizontal != 0.0 || self.vertical != 0.0
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_to_command() {
        let keys = DirectionKeys {
            right: true,
            up: true,
            ..Default::default()
        };
        let actions = ActionInput {
            jump: true,
            hit: false,
        };

        let cmd = PlayerInput::from_keys(keys, actions).to_command();

        assert_eq!(cmd.horizontal, 1.0);
        assert_eq!(cmd.vertical, 1.0);
        assert!(cmd.jump);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let keys = DirectionKeys {
            left: true,
            right: true,
            down: true,
            ..Default::default()
        };

        let input = PlayerInput::from_keys(keys, ActionInput::default());

        assert_eq!(input.horizontal, 0.0);
        assert_eq!(input.vertical, -1.0);
        assert!(input.has_movement());
    }

    #[test]
    fn test_axes_clamped() {
        let input = PlayerInput {
            horizontal: 3.0,
            vertical: f32::NAN,
            ..Default::default()
        };

        let cmd = input.to_command();

        assert_eq!(cmd.horizontal, 1.0);
        assert_eq!(cmd.vertical, 0.0);
    }
}
