//! Match simulation - the main game loop.
//!
//! This module contains the deterministic, frame-stepped driver: every tick
//! updates players in insertion order, applies head hops as soon as a
//! lander's move reports them, resolves ball hits, then moves the ball.
//!
//! # Round phases
//!
//! ```text
//! Waiting ──drop_in()──► DroppingIn ──start()──► Playing ──celebrate()──► Victory
//!    ▲                                                                     │
//!    └────────────────────────────── pause() ◄─────────────────────────────┘
//! ```

use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use headhop_physics::actor::{dispatch_head_hops, ButtonState};
use headhop_physics::{
    ActorId, ActorKind, Ball, BallConfig, ConfigError, FrameClock, MotionEvent, MoverConfig,
    Player, PlayerConfig,
};
use serde::{Deserialize, Serialize};

use crate::input::PlayerInput;
use crate::stage::Stage;

/// Id given to the ball. Players are numbered from 1.
pub const BALL_ID: ActorId = 0;

/// Match configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Mover tuning shared by every actor.
    pub mover: MoverConfig,

    /// Player tuning.
    pub player: PlayerConfig,

    /// Ball tuning.
    pub ball: BallConfig,

    /// Farthest a player's hit pivot can be from the ball center and still hit it.
    pub ball_hit_reach: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            mover: MoverConfig::default(),
            player: PlayerConfig::default(),
            ball: BallConfig::default(),
            ball_hit_reach: 1.5,
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        self.mover.validate()?;
        self.player.validate()?;
        self.ball.validate()?;
        if !(self.ball_hit_reach.is_finite() && self.ball_hit_reach >= 0.0) {
            return Err(ConfigError::Negative {
                name: "ball_hit_reach",
                value: self.ball_hit_reach,
            });
        }
        Ok(())
    }
}

/// Where the match is in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Everyone paused.
    Waiting,
    /// Players falling onto the stage, input ignored.
    DroppingIn,
    /// Input live, ball in play.
    Playing,
    /// Round over: the winner bounces, everyone else is down.
    Victory { winner: ActorId },
}

type Subscriber = Box<dyn FnMut(&MotionEvent)>;

/// The match simulation.
///
/// This contains all match state and advances it deterministically based on
/// player inputs.
pub struct Simulation {
    config: SimulationConfig,
    mover: Arc<MoverConfig>,
    stage: Stage,
    players: Vec<Player>,
    /// Hit button per player, indexed like `players`.
    hit_buttons: Vec<ButtonState>,
    ball: Ball,
    clock: FrameClock,
    phase: RoundPhase,
    subscribers: Vec<Subscriber>,
    next_player_id: ActorId,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("frame", &self.clock.frame())
            .field("phase", &self.phase)
            .field("players", &self.players)
            .field("ball", &self.ball)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Create a new simulation with the given configuration and stage.
    pub fn new(config: SimulationConfig, stage: Stage) -> Result<Self, ConfigError> {
        config.validate()?;
        let mover = Arc::new(config.mover.clone());
        let ball = Ball::new(BALL_ID, config.ball.clone(), Arc::clone(&mover), stage.ball_spawn)?;

        Ok(Self {
            config,
            mover,
            stage,
            players: Vec::new(),
            hit_buttons: Vec::new(),
            ball,
            clock: FrameClock::new(),
            phase: RoundPhase::Waiting,
            subscribers: Vec::new(),
            next_player_id: BALL_ID + 1,
        })
    }

    /// Create a simulation with default configuration and the standard arena.
    pub fn arena() -> Result<Self, ConfigError> {
        Self::new(SimulationConfig::default(), Stage::arena())
    }

    /// Add a paused player at the next spawn point.
    ///
    /// Returns the player's ID.
    pub fn add_player(&mut self) -> Result<ActorId, ConfigError> {
        let id = self.next_player_id;
        let spawn = self.stage.player_spawn(self.players.len()).copied();
        let position = spawn.map(|s| s.position).unwrap_or(Vec2::ZERO);

        let mut player = Player::new(id, self.config.player.clone(), Arc::clone(&self.mover), position)?;
        if let Some(spawn) = spawn {
            player.set_facing(spawn.facing);
        }

        self.next_player_id += 1;
        self.players.push(player);
        self.hit_buttons.push(ButtonState::new());
        self.sync_player_bodies();
        log::debug!("added player {} at {:?}", id, position);
        Ok(id)
    }

    /// Call `subscriber` with every event the simulation raises.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&MotionEvent) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    // ========================================================================
    // Round phases
    // ========================================================================

    /// Freeze every actor.
    pub fn pause(&mut self) {
        for player in &mut self.players {
            player.pause();
        }
        self.ball.pause();
        self.phase = RoundPhase::Waiting;
    }

    /// Put every player back on its spawn and the ball on its serve point.
    /// Players fall in under gravity; input is ignored until [`start`](Self::start).
    pub fn drop_in(&mut self) {
        for (index, player) in self.players.iter_mut().enumerate() {
            let spawn = self.stage.player_spawn(index).copied();
            player.pause();
            player.drop_in(spawn.map(|s| s.position).unwrap_or(Vec2::ZERO));
            if let Some(spawn) = spawn {
                player.set_facing(spawn.facing);
            }
        }
        self.ball.pause();
        self.ball.respawn(self.stage.ball_spawn);
        self.sync_player_bodies();
        self.phase = RoundPhase::DroppingIn;
    }

    /// Hand control to the players and put the ball in play.
    pub fn start(&mut self) {
        for player in &mut self.players {
            player.resume();
        }
        self.ball.resume();
        self.phase = RoundPhase::Playing;
    }

    /// End the round: `winner` starts its victory bounce, everyone else is
    /// knocked down, and the ball freezes.
    ///
    /// Returns the knockdown events. Does nothing if `winner` is unknown.
    pub fn celebrate(&mut self, winner: ActorId) -> Vec<MotionEvent> {
        let mut events = Vec::new();
        if !self.players.iter().any(|p| p.id() == winner) {
            log::warn!("ignoring celebration for unknown player {}", winner);
            return events;
        }

        let now = self.clock.now();
        self.ball.pause();
        for player in &mut self.players {
            if player.id() == winner {
                player.reset_state();
                player.resume();
                player.win();
            } else {
                player.knock_down(now, &mut events);
                player.pause();
            }
        }
        self.phase = RoundPhase::Victory { winner };
        self.publish(&events);
        events
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advance the simulation by one tick.
    ///
    /// `inputs` is indexed by player position; missing entries count as idle.
    /// Returns every event raised this tick, in order.
    pub fn tick(&mut self, inputs: &[PlayerInput]) -> Vec<MotionEvent> {
        let delta_time = self.config.delta_time();
        self.clock.advance(delta_time);
        let now = self.clock.now();
        let mut events = Vec::new();

        self.sync_player_bodies();

        for index in 0..self.players.len() {
            let input = inputs.get(index).copied().unwrap_or_default();
            let command = input.to_command();

            let outcome = self.players[index].update(
                &self.stage.collision,
                &command,
                now,
                delta_time,
                &mut events,
            );
            self.sync_player_body(index);

            let lander = self.players[index].id();
            if dispatch_head_hops(&mut self.players, lander, &outcome, now, &mut events) > 0 {
                self.sync_player_bodies();
            }

            if self.hit_buttons[index].update(input.actions.hit).pressed {
                self.try_hit_ball(index, now, &mut events);
            }
        }

        self.ball.update(&self.stage.collision, now, delta_time, &mut events);

        self.publish(&events);
        events
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by ID.
    pub fn player(&self, id: ActorId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Get a mutable reference to a player by ID.
    pub fn player_mut(&mut self, id: ActorId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    /// Ticks run so far.
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    /// Simulated seconds so far.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn try_hit_ball(&mut self, index: usize, now: f64, events: &mut Vec<MotionEvent>) {
        let player = &self.players[index];
        if player.is_paused() || player.is_stunned(now) || !player.can_hit_ball(now) {
            return;
        }

        let pivot = player.hit_pivot();
        if pivot.distance(self.ball.body.center) > self.config.ball_hit_reach {
            return;
        }

        let force = player.config().ball_hit_force;
        let added_force = player.velocity;
        if self.ball.hit(force, pivot, added_force, false, now, events) {
            self.players[index].ball_hit(now);
        }
    }

    fn sync_player_body(&mut self, index: usize) {
        let player = &self.players[index];
        self.stage.collision.set_actor_body(
            player.id(),
            ActorKind::Player,
            player.body.center,
            player.body.half_extents,
        );
    }

    fn sync_player_bodies(&mut self) {
        for index in 0..self.players.len() {
            self.sync_player_body(index);
        }
    }

    fn publish(&mut self, events: &[MotionEvent]) {
        for event in events {
            for subscriber in &mut self.subscribers {
                subscriber(event);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
