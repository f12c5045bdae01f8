//! Player motion policy.
//!
//! Turns one tick of stick and button input into the velocity handed to the
//! [`KinematicController`], and tracks the player's jump, hop, stun and
//! knockdown state.
//!
//! # Tick order
//!
//! 1. Paused or dropping in: gravity only, no input
//! 2. Victory bounce: gravity only, rebound on landing
//! 3. Grounded check: clear jump state, knock down a vulnerable lander
//! 4. Stunned: gravity only, no input
//! 5. Input: knockdown recovery, jump, short jump, fast-fall, horizontal smoothing
//! 6. Gravity, then move

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{ActorId, ActorKind, RayFilter, RaycastQuery};
use crate::error::ConfigError;
use crate::movement::{Body, CollisionInfo, Deadline, KinematicController, MoveOutcome, MoverConfig};

use super::config::PlayerConfig;
use super::events::MotionEvent;
use super::jump::{ButtonState, JumpProfile};

/// Share of the hop stun a player is frozen for after hitting the ball.
const BALL_HIT_STUN_RATIO: f32 = 0.75;

/// Player intent for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerCommand {
    /// Horizontal stick, -1.0 (left) to 1.0 (right).
    pub horizontal: f32,

    /// Vertical stick, -1.0 (down) to 1.0 (up).
    pub vertical: f32,

    /// Jump button held.
    pub jump: bool,
}

/// Coarse player state, for presentation and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Grounded,
    Airborne,
    JumpRising,
    Hopping,
    /// Frozen after landing a head hop.
    Stunned,
    /// Frozen after being hopped on or hitting the ball.
    Hitstun,
    KnockedDown,
    /// Victory bounce.
    Bouncing,
}

/// Direction the player last moved toward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// What the current stun came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum StunKind {
    #[default]
    Hop,
    Hit,
    KnockDown,
}

/// Player state toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerFlags(pub u16);

impl PlayerFlags {
    /// Round not running: gravity only.
    pub const PAUSED: u16 = 1 << 0;

    /// Falling in at round start; ends on first landing.
    pub const DROPPED_IN: u16 = 1 << 1;

    /// Rising from a head hop.
    pub const HOP: u16 = 1 << 2;

    /// Falling at `fast_fall_speed`.
    pub const FAST_FALLING: u16 = 1 << 3;

    /// Current jump started from the button (release cuts it).
    pub const BUTTON_JUMP: u16 = 1 << 4;

    /// Stick has returned to neutral since the last analog jump.
    pub const ANALOG_RESET: u16 = 1 << 5;

    /// Lying down until horizontal input or leaving the ground.
    pub const KNOCKED_DOWN: u16 = 1 << 6;

    /// Victory bounce.
    pub const BOUNCING: u16 = 1 << 7;

    #[inline]
    pub fn has(self, flag: u16) -> bool {
        (self.0 & flag) != 0
    }

    #[inline]
    pub fn set(&mut self, flag: u16, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }
}

/// A player actor.
#[derive(Debug, Clone)]
pub struct Player {
    id: ActorId,
    config: PlayerConfig,
    profile: JumpProfile,

    /// Bounding box in world space.
    pub body: Body,

    /// Velocity in units per second.
    pub velocity: Vec2,

    controller: KinematicController,
    filter: RayFilter,
    flags: PlayerFlags,
    jump_button: ButtonState,
    facing: Facing,

    /// SmoothDamp state for horizontal velocity.
    velocity_x_smoothing: f32,

    stun: Deadline,
    stun_kind: StunKind,
    knock_down_wait: Deadline,
    vulnerable: Deadline,
    hitting_ball: Deadline,
}

impl Player {
    /// Create a paused player centered on `spawn`.
    pub fn new(
        id: ActorId,
        config: PlayerConfig,
        mover: Arc<MoverConfig>,
        spawn: Vec2,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller = KinematicController::new(mover, config.rays)?;

        let mut flags = PlayerFlags::default();
        flags.set(PlayerFlags::PAUSED, true);
        flags.set(PlayerFlags::ANALOG_RESET, true);

        Ok(Self {
            id,
            profile: JumpProfile::from_config(&config),
            body: Body::new(spawn, config.half_extents),
            velocity: Vec2::ZERO,
            controller,
            filter: RayFilter::for_actor(id, ActorKind::Player.default_mask()),
            flags,
            jump_button: ButtonState::new(),
            facing: Facing::default(),
            velocity_x_smoothing: 0.0,
            stun: Deadline::NONE,
            stun_kind: StunKind::default(),
            knock_down_wait: Deadline::NONE,
            vulnerable: Deadline::NONE,
            hitting_ball: Deadline::NONE,
            config,
        })
    }

    /// Run one tick and move the player.
    ///
    /// `now` is the clock time of this tick and `delta_time` its length in
    /// seconds. Head hops found by the move are returned in
    /// [`MoveOutcome::landed_on`]; applying them is up to the caller.
    pub fn update<Q: RaycastQuery + ?Sized>(
        &mut self,
        world: &Q,
        command: &PlayerCommand,
        now: f64,
        delta_time: f32,
        events: &mut Vec<MotionEvent>,
    ) -> MoveOutcome {
        if self.stun.poll(now) {
            log::trace!("player {} stun over", self.id);
        }
        let edges = self.jump_button.update(command.jump);

        if self.flags.has(PlayerFlags::PAUSED) || self.flags.has(PlayerFlags::DROPPED_IN) {
            if self.controller.collisions.below {
                self.velocity.y = 0.0;
            }
            self.velocity.x = 0.0;
            self.velocity.y += self.profile.gravity * delta_time;
            let outcome = self.move_and_report(world, delta_time, events);
            if self.controller.collisions.below {
                self.flags.set(PlayerFlags::DROPPED_IN, false);
            }
            return outcome;
        }

        if self.flags.has(PlayerFlags::BOUNCING) {
            self.velocity.x = 0.0;
            self.velocity.y += self.profile.gravity * delta_time;
            let outcome = self.move_and_report(world, delta_time, events);
            if self.controller.collisions.below {
                self.velocity.y = self.profile.min_jump_velocity;
            }
            return outcome;
        }

        let grounded = self.controller.collisions.below;
        if grounded {
            self.velocity.y = 0.0;
            self.flags.set(PlayerFlags::HOP, false);
            self.flags.set(PlayerFlags::FAST_FALLING, false);

            if self.vulnerable.is_pending(now) {
                self.vulnerable.cancel();
                self.knock_down(now, events);
            }
        }

        if self.stun.is_pending(now) {
            self.apply_gravity(delta_time);
            return self.move_and_report(world, delta_time, events);
        }

        let mut input_x = command.horizontal.clamp(-1.0, 1.0);
        let input_y = command.vertical.clamp(-1.0, 1.0);

        if self.knock_down_wait.is_pending(now) {
            input_x = 0.0;
        } else if self.flags.has(PlayerFlags::KNOCKED_DOWN) && (input_x != 0.0 || !grounded) {
            self.flags.set(PlayerFlags::KNOCKED_DOWN, false);
        }

        if input_x > 0.0 {
            self.facing = Facing::Right;
        } else if input_x < 0.0 {
            self.facing = Facing::Left;
        }

        if input_y <= 0.0 {
            self.flags.set(PlayerFlags::ANALOG_RESET, true);
        }

        let sensitivity = self.config.analog_jump_sensitivity;

        if edges.pressed && grounded {
            self.flags.set(PlayerFlags::BUTTON_JUMP, true);
            self.jump(events);
        } else if input_y > sensitivity && self.flags.has(PlayerFlags::ANALOG_RESET) && grounded {
            self.flags.set(PlayerFlags::ANALOG_RESET, false);
            self.jump(events);
        }

        // Variable jump height: letting go cuts the rise
        let hopping = self.flags.has(PlayerFlags::HOP);
        if edges.released {
            self.flags.set(PlayerFlags::BUTTON_JUMP, false);
            self.velocity.y = self.profile.cut(self.velocity.y, hopping);
        } else if !self.flags.has(PlayerFlags::BUTTON_JUMP) && input_y <= 0.0 {
            self.velocity.y = self.profile.cut(self.velocity.y, hopping);
        }

        if self.velocity.y < 0.0 && input_y < -sensitivity {
            self.flags.set(PlayerFlags::FAST_FALLING, true);
        }

        let target_velocity_x = input_x * self.config.move_speed;
        let smooth_time = if grounded {
            self.config.acceleration_time_ground
        } else {
            self.config.acceleration_time_air
        };
        self.velocity.x = smooth_damp(
            self.velocity.x,
            target_velocity_x,
            &mut self.velocity_x_smoothing,
            smooth_time,
            delta_time,
        );

        self.apply_gravity(delta_time);
        self.move_and_report(world, delta_time, events)
    }

    // ========================================================================
    // Head hop
    // ========================================================================

    /// Launch this player off another player's head.
    pub fn force_jump(&mut self) {
        self.flags.set(PlayerFlags::FAST_FALLING, false);
        self.velocity.y = self.profile.max_jump_velocity;
        self.controller.collisions.below = false;
        self.flags.set(PlayerFlags::HOP, true);
        if self.jump_button.is_held() {
            self.flags.set(PlayerFlags::BUTTON_JUMP, true);
        }
    }

    /// Brief stun for the player that landed a head hop.
    pub fn hop_stun(&mut self, now: f64) {
        self.stun_for(StunKind::Hop, now, self.config.hop_stun_duration);
    }

    /// Slam this player down after being hopped on, opening the vulnerability
    /// window.
    pub fn force_fast_fall(&mut self, now: f64) {
        self.flags.set(PlayerFlags::FAST_FALLING, true);
        self.velocity.y = 0.0;
        self.vulnerable.arm(now, self.config.hop_vulnerable_time);
    }

    /// Stun for `hop_stun_duration`, replacing any current stun.
    pub fn hitstun(&mut self, now: f64) {
        self.stun_for(StunKind::Hit, now, self.config.hop_stun_duration);
    }

    /// Stun for `duration` seconds, replacing any current stun.
    pub fn hitstun_for(&mut self, now: f64, duration: f32) {
        self.stun_for(StunKind::Hit, now, duration);
    }

    // ========================================================================
    // Round and match events
    // ========================================================================

    /// Knock the player over. Input is ignored for `knock_down_duration`,
    /// after which the player stays down until it moves or leaves the ground.
    pub fn knock_down(&mut self, now: f64, events: &mut Vec<MotionEvent>) {
        self.velocity.x = 0.0;
        self.velocity_x_smoothing = 0.0;
        self.flags.set(PlayerFlags::KNOCKED_DOWN, true);
        self.knock_down_wait.arm(now, self.config.knock_down_duration);
        self.stun_for(StunKind::KnockDown, now, self.config.knock_down_duration);

        log::debug!("player {} knocked down", self.id);
        events.push(MotionEvent::KnockedDown { actor: self.id });
    }

    /// This player hit the ball: clear stun and knockdown, freeze briefly and
    /// start the hit cooldown.
    pub fn ball_hit(&mut self, now: f64) {
        self.reset_state();
        self.hitting_ball.arm(now, self.config.ball_hit_cooldown);
        self.stun_for(
            StunKind::Hit,
            now,
            self.config.hop_stun_duration * BALL_HIT_STUN_RATIO,
        );
    }

    /// Start the victory bounce.
    pub fn win(&mut self) {
        self.velocity = Vec2::new(0.0, self.profile.min_jump_velocity);
        self.flags.set(PlayerFlags::BOUNCING, true);
    }

    /// Clear stun, knockdown and vulnerability.
    pub fn reset_state(&mut self) {
        self.stun.cancel();
        self.knock_down_wait.cancel();
        self.vulnerable.cancel();
        self.flags.set(PlayerFlags::KNOCKED_DOWN, false);
    }

    /// Place the player at `spawn` and let it fall in.
    pub fn drop_in(&mut self, spawn: Vec2) {
        self.reset_state();
        self.hitting_ball.cancel();
        self.body.center = spawn;
        self.velocity = Vec2::ZERO;
        self.velocity_x_smoothing = 0.0;
        self.controller.collisions = CollisionInfo::default();
        for flag in [
            PlayerFlags::HOP,
            PlayerFlags::FAST_FALLING,
            PlayerFlags::BUTTON_JUMP,
            PlayerFlags::BOUNCING,
        ] {
            self.flags.set(flag, false);
        }
        self.flags.set(PlayerFlags::DROPPED_IN, true);
    }

    pub fn pause(&mut self) {
        self.flags.set(PlayerFlags::PAUSED, true);
    }

    pub fn resume(&mut self) {
        self.flags.set(PlayerFlags::PAUSED, false);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn profile(&self) -> &JumpProfile {
        &self.profile
    }

    pub fn flags(&self) -> PlayerFlags {
        self.flags
    }

    /// Contacts from the last move.
    pub fn collisions(&self) -> &CollisionInfo {
        &self.controller.collisions
    }

    pub fn is_grounded(&self) -> bool {
        self.controller.collisions.below
    }

    pub fn is_paused(&self) -> bool {
        self.flags.has(PlayerFlags::PAUSED)
    }

    pub fn is_dropping_in(&self) -> bool {
        self.flags.has(PlayerFlags::DROPPED_IN)
    }

    pub fn is_hopping(&self) -> bool {
        self.flags.has(PlayerFlags::HOP)
    }

    pub fn is_fast_falling(&self) -> bool {
        self.flags.has(PlayerFlags::FAST_FALLING)
    }

    pub fn is_knocked_down(&self) -> bool {
        self.flags.has(PlayerFlags::KNOCKED_DOWN)
    }

    pub fn is_bouncing(&self) -> bool {
        self.flags.has(PlayerFlags::BOUNCING)
    }

    pub fn is_stunned(&self, now: f64) -> bool {
        self.stun.is_pending(now)
    }

    /// Inside the window where landing knocks the player down.
    pub fn is_vulnerable(&self, now: f64) -> bool {
        self.vulnerable.is_pending(now)
    }

    /// Not on ball-hit cooldown.
    pub fn can_hit_ball(&self, now: f64) -> bool {
        !self.hitting_ball.is_pending(now)
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    /// Point ball hits are measured from.
    pub fn hit_pivot(&self) -> Vec2 {
        self.body.center
    }

    pub fn state(&self, now: f64) -> PlayerState {
        if self.flags.has(PlayerFlags::BOUNCING) {
            return PlayerState::Bouncing;
        }
        if self.stun.is_pending(now) {
            return match self.stun_kind {
                StunKind::Hop => PlayerState::Stunned,
                StunKind::Hit => PlayerState::Hitstun,
                StunKind::KnockDown => PlayerState::KnockedDown,
            };
        }
        if self.flags.has(PlayerFlags::KNOCKED_DOWN) {
            PlayerState::KnockedDown
        } else if self.controller.collisions.below {
            PlayerState::Grounded
        } else if self.flags.has(PlayerFlags::HOP) {
            PlayerState::Hopping
        } else if self.velocity.y > 0.0 {
            PlayerState::JumpRising
        } else {
            PlayerState::Airborne
        }
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn jump(&mut self, events: &mut Vec<MotionEvent>) {
        self.velocity.y = self.profile.max_jump_velocity;
        events.push(MotionEvent::Jumped { actor: self.id });
    }

    fn stun_for(&mut self, kind: StunKind, now: f64, duration: f32) {
        self.stun.arm(now, duration);
        self.stun_kind = kind;
    }

    fn apply_gravity(&mut self, delta_time: f32) {
        if self.flags.has(PlayerFlags::FAST_FALLING) {
            self.velocity.y = self.config.fast_fall_speed;
        }
        self.velocity.y += self.profile.gravity * delta_time;
    }

    fn move_and_report<Q: RaycastQuery + ?Sized>(
        &mut self,
        world: &Q,
        delta_time: f32,
        events: &mut Vec<MotionEvent>,
    ) -> MoveOutcome {
        let was_grounded = self.controller.collisions.below;
        let outcome = self.controller.move_body(
            world,
            &mut self.body,
            &self.filter,
            self.velocity * delta_time,
        );
        if !was_grounded && self.controller.collisions.below {
            events.push(MotionEvent::Landed { actor: self.id });
        }
        outcome
    }
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` carries the rate of change between calls. Never overshoots.
fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, delta_time: f32) -> f32 {
    if delta_time <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(1.0e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * delta_time;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * delta_time;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / delta_time;
    }

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionLayers, CollisionWorld};
    use crate::movement::FrameClock;

    const DT: f32 = 1.0 / 60.0;

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(Vec2::new(0.0, -1.0), Vec2::new(50.0, 1.0), CollisionLayers::STAGE);
        world
    }

    struct Rig {
        world: CollisionWorld,
        player: Player,
        clock: FrameClock,
        events: Vec<MotionEvent>,
    }

    impl Rig {
        /// Resumed player standing on the floor.
        fn grounded() -> Self {
            let mut rig = Self::paused(Vec2::new(0.0, 1.0));
            rig.player.resume();
            rig.tick(PlayerCommand::default());
            assert!(rig.player.is_grounded());
            rig.events.clear();
            rig
        }

        fn paused(spawn: Vec2) -> Self {
            let player = Player::new(
                1,
                PlayerConfig::default(),
                Arc::new(MoverConfig::default()),
                spawn,
            )
            .expect("default config is valid");

            Self {
                world: create_test_world(),
                player,
                clock: FrameClock::new(),
                events: Vec::new(),
            }
        }

        fn now(&self) -> f64 {
            self.clock.now()
        }

        fn tick(&mut self, command: PlayerCommand) -> MoveOutcome {
            self.clock.advance(DT);
            let now = self.clock.now();
            self.player
                .update(&self.world, &command, now, DT, &mut self.events)
        }

        fn ticks(&mut self, count: usize, command: PlayerCommand) {
            for _ in 0..count {
                self.tick(command);
            }
        }
    }

    fn jump_held() -> PlayerCommand {
        PlayerCommand {
            jump: true,
            ..Default::default()
        }
    }

    fn count_jumps(events: &[MotionEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, MotionEvent::Jumped { .. }))
            .count()
    }

    #[test]
    fn test_smooth_damp_converges_without_overshoot() {
        let mut velocity = 0.0;
        let mut value = 0.0;
        for _ in 0..120 {
            value = smooth_damp(value, 6.0, &mut velocity, 0.1, DT);
            assert!(value <= 6.0);
        }
        assert!((value - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PlayerConfig {
            time_to_apex: 0.0,
            ..Default::default()
        };
        let result = Player::new(1, config, Arc::new(MoverConfig::default()), Vec2::ZERO);
        assert!(result.is_err());
    }

    #[test]
    fn test_paused_player_ignores_input() {
        let mut rig = Rig::paused(Vec2::new(0.0, 1.0));
        assert!(rig.player.is_paused());

        rig.ticks(
            30,
            PlayerCommand {
                horizontal: 1.0,
                jump: true,
                ..Default::default()
            },
        );

        assert_eq!(rig.player.body.center.x, 0.0);
        assert!(rig.player.is_grounded());
        assert_eq!(count_jumps(&rig.events), 0);
    }

    #[test]
    fn test_landing_event() {
        let mut rig = Rig::paused(Vec2::new(0.0, 3.0));
        rig.player.resume();

        rig.ticks(60, PlayerCommand::default());

        let landings = rig
            .events
            .iter()
            .filter(|e| **e == MotionEvent::Landed { actor: 1 })
            .count();
        assert_eq!(landings, 1);
        assert_eq!(rig.player.state(rig.now()), PlayerState::Grounded);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut rig = Rig::grounded();
        let profile = *rig.player.profile();

        rig.tick(jump_held());

        let expected = profile.max_jump_velocity + profile.gravity * DT;
        assert!((rig.player.velocity.y - expected).abs() < 1e-4);
        assert_eq!(count_jumps(&rig.events), 1);
        assert_eq!(rig.player.state(rig.now()), PlayerState::JumpRising);
    }

    #[test]
    fn test_short_hop_cuts_to_min_jump() {
        let mut rig = Rig::grounded();
        let profile = *rig.player.profile();

        rig.tick(jump_held());
        rig.tick(PlayerCommand::default());

        let expected = profile.min_jump_velocity + profile.gravity * DT;
        assert!((rig.player.velocity.y - expected).abs() < 1e-4);
    }

    #[test]
    fn test_short_hop_cuts_to_min_hop_when_hopping() {
        let mut rig = Rig::grounded();
        let profile = *rig.player.profile();

        rig.player.force_jump();
        assert!(!rig.player.is_grounded());
        rig.tick(PlayerCommand::default());

        let expected = profile.min_hop_velocity + profile.gravity * DT;
        assert!((rig.player.velocity.y - expected).abs() < 1e-4);
        assert_eq!(rig.player.state(rig.now()), PlayerState::Hopping);
    }

    #[test]
    fn test_release_never_raises_velocity() {
        let mut rig = Rig::grounded();
        let profile = *rig.player.profile();

        // Hold past the point where the rise is already slower than a short jump
        rig.ticks(20, jump_held());
        let before = rig.player.velocity.y;
        assert!(before < profile.min_jump_velocity);

        rig.tick(PlayerCommand::default());

        let expected = before + profile.gravity * DT;
        assert!((rig.player.velocity.y - expected).abs() < 1e-4);
    }

    #[test]
    fn test_analog_jump_needs_reset() {
        let mut rig = Rig::grounded();
        let up = PlayerCommand {
            vertical: 1.0,
            ..Default::default()
        };

        // Holding up through a whole jump and landing does not jump again
        rig.ticks(90, up);
        assert_eq!(count_jumps(&rig.events), 1);
        assert!(rig.player.is_grounded());

        rig.tick(PlayerCommand::default());
        rig.tick(up);
        assert_eq!(count_jumps(&rig.events), 2);
    }

    #[test]
    fn test_walk_reaches_move_speed() {
        let mut rig = Rig::grounded();
        let right = PlayerCommand {
            horizontal: 1.0,
            ..Default::default()
        };

        rig.ticks(60, right);

        assert!((rig.player.velocity.x - rig.player.config().move_speed).abs() < 0.05);
        assert!(rig.player.body.center.x > 3.0);
        assert_eq!(rig.player.facing(), Facing::Right);
        assert!(rig.player.is_grounded());
    }

    #[test]
    fn test_fast_fall() {
        let mut rig = Rig::grounded();
        let profile = *rig.player.profile();

        rig.ticks(30, jump_held());
        assert!(rig.player.velocity.y < 0.0);

        rig.tick(PlayerCommand {
            vertical: -1.0,
            jump: true,
            ..Default::default()
        });

        assert!(rig.player.is_fast_falling());
        let expected = rig.player.config().fast_fall_speed + profile.gravity * DT;
        assert!((rig.player.velocity.y - expected).abs() < 1e-4);
    }

    #[test]
    fn test_knock_down_blocks_input_until_recovered() {
        let mut rig = Rig::grounded();
        let right = PlayerCommand {
            horizontal: 1.0,
            ..Default::default()
        };

        let now = rig.now();
        rig.player.knock_down(now, &mut rig.events);
        assert_eq!(rig.events, vec![MotionEvent::KnockedDown { actor: 1 }]);

        rig.ticks(30, right);
        assert_eq!(rig.player.velocity.x, 0.0);
        assert_eq!(rig.player.body.center.x, 0.0);
        assert_eq!(rig.player.state(rig.now()), PlayerState::KnockedDown);

        rig.ticks(40, right);
        assert!(!rig.player.is_knocked_down());
        assert!(rig.player.velocity.x > 0.0);
    }

    #[test]
    fn test_knocked_down_stays_down_without_input() {
        let mut rig = Rig::grounded();
        let now = rig.now();
        rig.player.knock_down(now, &mut rig.events);

        rig.ticks(120, PlayerCommand::default());

        assert!(rig.player.is_knocked_down());
        assert_eq!(rig.player.state(rig.now()), PlayerState::KnockedDown);
    }

    #[test]
    fn test_ball_hit_resets_state() {
        let mut rig = Rig::grounded();
        let now = rig.now();
        rig.player.knock_down(now, &mut rig.events);
        rig.player.force_fast_fall(now);

        rig.player.ball_hit(now);

        assert!(!rig.player.is_knocked_down());
        assert!(!rig.player.is_vulnerable(now));
        assert_eq!(rig.player.state(now), PlayerState::Hitstun);
        assert!(!rig.player.can_hit_ball(now));

        rig.ticks(30, PlayerCommand::default());
        assert!(rig.player.can_hit_ball(rig.now()));
        assert!(!rig.player.is_stunned(rig.now()));
    }

    #[test]
    fn test_new_stun_replaces_old() {
        let mut rig = Rig::grounded();
        let now = rig.now();

        rig.player.hitstun_for(now, 5.0);
        rig.player.hop_stun(now);

        rig.ticks(20, PlayerCommand::default());
        assert!(!rig.player.is_stunned(rig.now()));
    }

    #[test]
    fn test_victory_bounce() {
        let mut rig = Rig::grounded();
        rig.player.win();

        let mut highest: f32 = 0.0;
        for _ in 0..120 {
            rig.tick(PlayerCommand {
                horizontal: 1.0,
                ..Default::default()
            });
            highest = highest.max(rig.player.body.min().y);
            assert_eq!(rig.player.velocity.x, 0.0);
        }

        assert!(highest > 0.5);
        assert_eq!(rig.player.body.center.x, 0.0);
        assert_eq!(rig.player.state(rig.now()), PlayerState::Bouncing);
    }

    #[test]
    fn test_drop_in() {
        let mut rig = Rig::grounded();
        rig.player.drop_in(Vec2::new(2.0, 5.0));
        assert!(rig.player.is_dropping_in());

        let right = PlayerCommand {
            horizontal: 1.0,
            ..Default::default()
        };
        for _ in 0..60 {
            rig.tick(right);
            if !rig.player.is_dropping_in() {
                break;
            }
        }

        // Input is ignored until the landing tick
        assert!(!rig.player.is_dropping_in());
        assert!(rig.player.is_grounded());
        assert_eq!(rig.player.body.center.x, 2.0);
    }
}
