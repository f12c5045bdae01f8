//! Events raised to presentation collaborators (animation, audio, scoring).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::ActorId;

/// Something an actor did this tick that collaborators may react to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionEvent {
    /// An actor touched ground after being airborne.
    Landed { actor: ActorId },

    /// `lander` came down on `victim`'s head.
    HeadHopLanding { lander: ActorId, victim: ActorId },

    /// The ball rebounded off the floor or a wall with this velocity.
    BallBounce { velocity: Vec2 },

    /// The ball was struck.
    BallHit {
        magnitude: f32,
        origin: Vec2,
        added_force: Vec2,
    },

    /// A player left the ground by jumping.
    Jumped { actor: ActorId },

    /// A player was knocked down.
    KnockedDown { actor: ActorId },
}

impl MotionEvent {
    /// Actor the event is about, if it names one.
    pub fn actor(&self) -> Option<ActorId> {
        match *self {
            Self::Landed { actor } | Self::Jumped { actor } | Self::KnockedDown { actor } => {
                Some(actor)
            }
            Self::HeadHopLanding { lander, .. } => Some(lander),
            Self::BallBounce { .. } | Self::BallHit { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_actor() {
        assert_eq!(MotionEvent::Jumped { actor: 3 }.actor(), Some(3));
        assert_eq!(MotionEvent::HeadHopLanding { lander: 1, victim: 2 }.actor(), Some(1));
        assert_eq!(MotionEvent::BallBounce { velocity: Vec2::Y }.actor(), None);
    }
}
