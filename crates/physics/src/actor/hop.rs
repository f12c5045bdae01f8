//! Cross-actor head hop.
//!
//! A player whose downward move ends on another player's body has landed a
//! head hop. The mover only reports it (see [`MoveOutcome::landed_on`]); the
//! effect is applied here once the lander's update has finished, so no player
//! is ever borrowed twice.
//!
//! - **Lander**: launched at full jump speed, briefly stunned
//! - **Victim**: slammed into a fast-fall, stunned, and knocked down if it
//!   touches ground before the vulnerability window closes

use serde::{Deserialize, Serialize};

use crate::collision::ActorId;
use crate::movement::MoveOutcome;

use super::events::MotionEvent;
use super::player::Player;

/// One player landing on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeadHop {
    pub lander: ActorId,
    pub victim: ActorId,
}

impl HeadHop {
    /// Head hops reported by `lander`'s move.
    pub fn from_outcome(lander: ActorId, outcome: &MoveOutcome) -> impl Iterator<Item = HeadHop> + '_ {
        outcome
            .landed_on
            .iter()
            .map(move |&victim| HeadHop { lander, victim })
    }

    /// Apply this hop to both players.
    ///
    /// Returns `false` and changes nothing if either player is missing or the
    /// lander and victim are the same player.
    pub fn apply(self, players: &mut [Player], now: f64, events: &mut Vec<MotionEvent>) -> bool {
        let Some((lander, victim)) = pair_mut(players, self.lander, self.victim) else {
            log::warn!(
                "ignoring head hop {} -> {}: no such player pair",
                self.lander,
                self.victim
            );
            return false;
        };

        lander.force_jump();
        lander.hop_stun(now);
        victim.force_fast_fall(now);
        victim.hitstun(now);

        log::debug!("player {} hopped on player {}", self.lander, self.victim);
        events.push(MotionEvent::HeadHopLanding {
            lander: self.lander,
            victim: self.victim,
        });
        true
    }
}

/// Apply every head hop in `outcome` for `lander`. Returns how many applied.
pub fn dispatch_head_hops(
    players: &mut [Player],
    lander: ActorId,
    outcome: &MoveOutcome,
    now: f64,
    events: &mut Vec<MotionEvent>,
) -> usize {
    HeadHop::from_outcome(lander, outcome)
        .filter(|hop| hop.apply(players, now, events))
        .count()
}

/// Borrow two distinct players by id.
fn pair_mut(players: &mut [Player], a: ActorId, b: ActorId) -> Option<(&mut Player, &mut Player)> {
    let ia = players.iter().position(|p| p.id() == a)?;
    let ib = players.iter().position(|p| p.id() == b)?;
    if ia == ib {
        return None;
    }

    if ia < ib {
        let (left, right) = players.split_at_mut(ib);
        Some((&mut left[ia], &mut right[0]))
    } else {
        let (left, right) = players.split_at_mut(ia);
        Some((&mut right[0], &mut left[ib]))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec2;

    use super::*;
    use crate::actor::{PlayerCommand, PlayerConfig, PlayerState};
    use crate::collision::{ActorKind, CollisionLayers, CollisionWorld};
    use crate::movement::{FrameClock, MoverConfig};

    const DT: f32 = 1.0 / 60.0;

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(Vec2::new(0.0, -1.0), Vec2::new(50.0, 1.0), CollisionLayers::STAGE);
        world
    }

    fn spawn(id: ActorId, at: Vec2) -> Player {
        spawn_with(id, at, PlayerConfig::default())
    }

    fn spawn_with(id: ActorId, at: Vec2, config: PlayerConfig) -> Player {
        let mut player = Player::new(id, config, Arc::new(MoverConfig::default()), at)
            .expect("valid config");
        player.resume();
        player
    }

    /// Hop on an airborne victim (id 2) and let it fall until it settles.
    ///
    /// Returns the victim and the events of every tick after the hop.
    fn hop_airborne_victim(height: f32, vulnerable_time: f32) -> (Player, Vec<MotionEvent>, FrameClock) {
        let world = create_test_world();
        let mut clock = FrameClock::new();
        let config = PlayerConfig {
            hop_vulnerable_time: vulnerable_time,
            ..Default::default()
        };
        let mut players = vec![
            spawn_with(1, Vec2::new(8.0, 1.0), config.clone()),
            spawn_with(2, Vec2::new(0.0, height + 1.0), config),
        ];

        let hop = HeadHop { lander: 1, victim: 2 };
        assert!(hop.apply(&mut players, clock.now(), &mut Vec::new()));

        let victim = &players[1];
        assert!(!victim.is_grounded());
        assert!(victim.is_fast_falling());
        assert!(victim.is_vulnerable(clock.now()));

        let mut events = Vec::new();
        let mut victim = players.swap_remove(1);
        for _ in 0..240 {
            clock.advance(DT);
            victim.update(&world, &PlayerCommand::default(), clock.now(), DT, &mut events);
        }
        (victim, events, clock)
    }

    fn sync(world: &mut CollisionWorld, players: &[Player]) {
        for player in players {
            world.set_actor_body(
                player.id(),
                ActorKind::Player,
                player.body.center,
                player.body.half_extents,
            );
        }
    }

    #[test]
    fn test_head_hop_launches_lander_and_slams_victim() {
        let mut world = create_test_world();
        let mut clock = FrameClock::new();
        let mut events = Vec::new();
        let idle = PlayerCommand::default();

        // B stands on the floor, A hovers just above B's head
        let mut players = vec![
            spawn(1, Vec2::new(0.0, 3.05)),
            spawn(2, Vec2::new(0.0, 1.0)),
        ];
        clock.advance(DT);
        players[1].update(&world, &idle, clock.now(), DT, &mut events);
        assert!(players[1].is_grounded());

        clock.advance(DT);
        let now = clock.now();
        sync(&mut world, &players);
        players[0].velocity.y = -5.0;
        let outcome = players[0].update(&world, &idle, now, DT, &mut events);
        assert_eq!(outcome.landed_on, vec![2]);

        events.clear();
        let applied = dispatch_head_hops(&mut players, 1, &outcome, now, &mut events);
        assert_eq!(applied, 1);
        assert_eq!(events, vec![MotionEvent::HeadHopLanding { lander: 1, victim: 2 }]);

        let (a, b) = (&players[0], &players[1]);
        assert_eq!(a.velocity.y, a.profile().max_jump_velocity);
        assert!(!a.is_grounded());
        assert!(a.is_hopping());
        assert_eq!(a.state(now), PlayerState::Stunned);

        assert_eq!(b.velocity.y, 0.0);
        assert!(b.is_fast_falling());
        assert!(b.is_vulnerable(now));
        assert_eq!(b.state(now), PlayerState::Hitstun);

        // Victim is still on the ground, so its next tick knocks it down
        events.clear();
        clock.advance(DT);
        players[1].update(&world, &idle, clock.now(), DT, &mut events);
        assert!(events.contains(&MotionEvent::KnockedDown { actor: 2 }));
        assert!(players[1].is_knocked_down());
    }

    #[test]
    fn test_lander_rises_after_hop() {
        let mut world = create_test_world();
        let mut clock = FrameClock::new();
        let mut events = Vec::new();
        let idle = PlayerCommand::default();

        let mut players = vec![
            spawn(1, Vec2::new(0.0, 3.05)),
            spawn(2, Vec2::new(0.0, 1.0)),
        ];
        sync(&mut world, &players);
        players[0].velocity.y = -5.0;
        clock.advance(DT);
        let outcome = players[0].update(&world, &idle, clock.now(), DT, &mut events);
        dispatch_head_hops(&mut players, 1, &outcome, clock.now(), &mut events);

        let start = players[0].body.center.y;
        for _ in 0..5 {
            clock.advance(DT);
            players[0].update(&world, &idle, clock.now(), DT, &mut events);
        }
        assert!(players[0].body.center.y > start);
    }

    #[test]
    fn test_airborne_victim_landing_inside_window_is_knocked_down() {
        let (victim, events, _) = hop_airborne_victim(4.0, 0.6);

        assert!(events.contains(&MotionEvent::Landed { actor: 2 }));
        assert!(events.contains(&MotionEvent::KnockedDown { actor: 2 }));
        assert!(victim.is_grounded());
        assert!(victim.is_knocked_down());
    }

    #[test]
    fn test_airborne_victim_landing_after_window_stays_up() {
        let (victim, events, clock) = hop_airborne_victim(8.0, 0.05);

        assert!(events.contains(&MotionEvent::Landed { actor: 2 }));
        assert!(!events.contains(&MotionEvent::KnockedDown { actor: 2 }));
        assert!(victim.is_grounded());
        assert!(!victim.is_knocked_down());
        assert!(!victim.is_vulnerable(clock.now()));
        assert_eq!(victim.state(clock.now()), PlayerState::Grounded);
    }

    #[test]
    fn test_missing_victim_is_ignored() {
        let mut players = vec![spawn(1, Vec2::new(0.0, 3.0))];
        let before = players[0].velocity;
        let mut events = Vec::new();

        let hop = HeadHop { lander: 1, victim: 7 };
        assert!(!hop.apply(&mut players, 0.0, &mut events));

        assert_eq!(players[0].velocity, before);
        assert!(!players[0].is_hopping());
        assert!(events.is_empty());
    }

    #[test]
    fn test_self_hop_is_ignored() {
        let mut players = vec![spawn(1, Vec2::ZERO), spawn(2, Vec2::X * 3.0)];
        let hop = HeadHop { lander: 2, victim: 2 };
        assert!(!hop.apply(&mut players, 0.0, &mut Vec::new()));
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut players = vec![spawn(4, Vec2::ZERO), spawn(9, Vec2::X * 3.0)];

        let (a, b) = pair_mut(&mut players, 9, 4).expect("both present");
        assert_eq!((a.id(), b.id()), (9, 4));
        let (a, b) = pair_mut(&mut players, 4, 9).expect("both present");
        assert_eq!((a.id(), b.id()), (4, 9));
    }
}
