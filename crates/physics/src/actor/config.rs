//! Actor tuning.
//!
//! All values are world units, seconds, and units per second. Both configs
//! are plain data; [`PlayerConfig::validate`] and [`BallConfig::validate`]
//! run when an actor is created.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ConfigError};
use crate::movement::{check_half_extents, RayCounts};

/// Player movement tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Half size of the player's box.
    pub half_extents: Vec2,

    /// Rays per edge.
    pub rays: RayCounts,

    /// Top horizontal speed at full stick deflection.
    pub move_speed: f32,

    /// Apex height of a full jump. Also sets gravity.
    pub max_jump_height: f32,

    /// Apex height when the jump is released immediately.
    pub min_jump_height: f32,

    /// Apex height of a released head hop.
    pub min_hop_height: f32,

    /// Seconds from take-off to the apex of a full jump.
    pub time_to_apex: f32,

    /// Vertical velocity while fast-falling (negative is down).
    pub fast_fall_speed: f32,

    /// Stick deflection (0 to 1) that counts as an analog jump or fast-fall.
    pub analog_jump_sensitivity: f32,

    /// Horizontal smoothing time while airborne.
    pub acceleration_time_air: f32,

    /// Horizontal smoothing time while grounded.
    pub acceleration_time_ground: f32,

    /// Stun on both sides of a head hop.
    pub hop_stun_duration: f32,

    /// How long a knockdown holds the player down.
    pub knock_down_duration: f32,

    /// Seconds after a head hop during which landing knocks the victim down.
    pub hop_vulnerable_time: f32,

    /// Speed given to the ball when this player hits it.
    pub ball_hit_force: f32,

    /// Seconds before this player can hit the ball again.
    pub ball_hit_cooldown: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(0.5, 1.0),
            rays: RayCounts::default(),
            move_speed: 6.0,
            max_jump_height: 4.0,
            min_jump_height: 1.0,
            min_hop_height: 2.0,
            time_to_apex: 0.4,
            fast_fall_speed: -18.0,
            analog_jump_sensitivity: 0.5,
            acceleration_time_air: 0.2,
            acceleration_time_ground: 0.1,
            hop_stun_duration: 0.25,
            knock_down_duration: 1.0,
            hop_vulnerable_time: 0.6,
            ball_hit_force: 14.0,
            ball_hit_cooldown: 0.4,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_half_extents(self.half_extents.x, self.half_extents.y)?;
        ensure_positive("time_to_apex", self.time_to_apex)?;
        ensure_positive("max_jump_height", self.max_jump_height)?;
        ensure_positive("min_jump_height", self.min_jump_height)?;
        ensure_positive("min_hop_height", self.min_hop_height)?;
        check_range("jump_height", self.min_jump_height, self.max_jump_height)?;
        check_range("hop_height", self.min_hop_height, self.max_jump_height)?;

        ensure_non_negative("move_speed", self.move_speed)?;
        ensure_non_negative("analog_jump_sensitivity", self.analog_jump_sensitivity)?;
        ensure_non_negative("acceleration_time_air", self.acceleration_time_air)?;
        ensure_non_negative("acceleration_time_ground", self.acceleration_time_ground)?;
        ensure_non_negative("hop_stun_duration", self.hop_stun_duration)?;
        ensure_non_negative("knock_down_duration", self.knock_down_duration)?;
        ensure_non_negative("hop_vulnerable_time", self.hop_vulnerable_time)?;
        ensure_non_negative("ball_hit_force", self.ball_hit_force)?;
        ensure_non_negative("ball_hit_cooldown", self.ball_hit_cooldown)?;
        Ok(())
    }
}

/// Ball movement tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Half size of the ball's box.
    pub half_extents: Vec2,

    /// Rays per edge.
    pub rays: RayCounts,

    /// Vertical acceleration (negative is down).
    pub gravity: f32,

    /// Share of the hitter's upward velocity added to a hit.
    pub added_hit_force_ratio: f32,

    /// Speed lost on every floor bounce.
    pub bounce_decay: f32,

    /// Horizontal speed lost per second.
    pub horizontal_decay: f32,

    /// Slowest rebound off the floor.
    pub min_vertical_velocity: f32,

    /// Horizontal drag never slows the ball below this.
    pub min_horizontal_velocity: f32,

    /// Seconds before the ball can be hit again.
    pub hit_cooldown: f32,

    /// How long a stunning hit freezes the ball.
    pub hit_stun_duration: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            half_extents: Vec2::splat(0.4),
            rays: RayCounts::default(),
            gravity: -15.0,
            added_hit_force_ratio: 0.5,
            bounce_decay: 1.0,
            horizontal_decay: 0.5,
            min_vertical_velocity: 4.0,
            min_horizontal_velocity: 0.5,
            hit_cooldown: 0.3,
            hit_stun_duration: 0.2,
        }
    }
}

impl BallConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_half_extents(self.half_extents.x, self.half_extents.y)?;
        ensure_non_negative("added_hit_force_ratio", self.added_hit_force_ratio)?;
        ensure_non_negative("bounce_decay", self.bounce_decay)?;
        ensure_non_negative("horizontal_decay", self.horizontal_decay)?;
        ensure_non_negative("min_vertical_velocity", self.min_vertical_velocity)?;
        ensure_non_negative("min_horizontal_velocity", self.min_horizontal_velocity)?;
        ensure_non_negative("hit_cooldown", self.hit_cooldown)?;
        ensure_non_negative("hit_stun_duration", self.hit_stun_duration)?;
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "gravity",
                value: self.gravity,
            });
        }
        Ok(())
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PlayerConfig::default().validate().is_ok());
        assert!(BallConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_jump_heights() {
        let config = PlayerConfig {
            min_jump_height: 5.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                name: "jump_height",
                min: 5.0,
                max: 4.0
            })
        );
    }

    #[test]
    fn test_rejects_zero_time_to_apex() {
        let config = PlayerConfig {
            time_to_apex: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "time_to_apex", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_durations() {
        let player = PlayerConfig {
            knock_down_duration: -1.0,
            ..Default::default()
        };
        assert!(player.validate().is_err());

        let ball = BallConfig {
            hit_cooldown: -0.1,
            ..Default::default()
        };
        assert!(ball.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_box() {
        let ball = BallConfig {
            half_extents: Vec2::new(0.4, 0.0),
            ..Default::default()
        };
        assert!(matches!(
            ball.validate(),
            Err(ConfigError::NonPositive { name: "half_extents.y", .. })
        ));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: PlayerConfig = serde_json::from_str(r#"{ "move_speed": 9.0 }"#).unwrap();
        assert_eq!(config.move_speed, 9.0);
        assert_eq!(config.time_to_apex, PlayerConfig::default().time_to_apex);
    }
}
