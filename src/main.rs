//! Head-hop - headless demo round
//!
//! Drops two players into the arena, plays a short scripted round and logs
//! every motion event. Pass a JSON `SimulationConfig` path to override the
//! defaults; set `RUST_LOG=debug` to see head hops, bounces and hits.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use headhop_game::{
    ActionInput, DirectionKeys, MotionEvent, PlayerInput, RoundPhase, Simulation,
    SimulationConfig, Stage,
};

const DROP_IN_TICKS: u64 = 90;
const ROUND_TICKS: u64 = 600;
const VICTORY_TICKS: u64 = 120;

/// Keys a scripted player can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Hit,
}

/// Input state tracking
#[derive(Debug, Default)]
struct InputState {
    keys: DirectionKeys,
    actions: ActionInput,
}

impl InputState {
    fn to_player_input(&self, frame: u64) -> PlayerInput {
        PlayerInput {
            frame,
            ..PlayerInput::from_keys(self.keys, self.actions)
        }
    }

    fn handle_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Left => self.keys.left = pressed,
            Key::Right => self.keys.right = pressed,
            Key::Up => self.keys.up = pressed,
            Key::Down => self.keys.down = pressed,
            Key::Jump => self.actions.jump = pressed,
            Key::Hit => self.actions.hit = pressed,
        }
    }
}

/// `(frame, player index, key, pressed)`, sorted by frame.
const SCRIPT: &[(u64, usize, Key, bool)] = &[
    (0, 0, Key::Right, true),
    (0, 1, Key::Left, true),
    (20, 1, Key::Left, false),
    (30, 0, Key::Jump, true),
    (55, 0, Key::Jump, false),
    (60, 1, Key::Hit, true),
    (75, 1, Key::Hit, false),
    (80, 0, Key::Down, true),
    (100, 0, Key::Down, false),
    (120, 1, Key::Up, true),
    (126, 1, Key::Up, false),
    (150, 0, Key::Right, false),
    (150, 0, Key::Left, true),
    (160, 0, Key::Hit, true),
    (170, 0, Key::Hit, false),
    (200, 1, Key::Right, true),
    (210, 1, Key::Jump, true),
    (240, 1, Key::Jump, false),
    (260, 1, Key::Right, false),
    (300, 0, Key::Left, false),
];

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref().map(Path::new))?;

    // Create simulation
    let mut simulation =
        Simulation::new(config, Stage::arena()).context("invalid simulation config")?;
    let players = [simulation.add_player()?, simulation.add_player()?];
    simulation.subscribe(|event| log::info!("{:?}", event));

    simulation.drop_in();
    for _ in 0..DROP_IN_TICKS {
        simulation.tick(&[]);
    }
    simulation.start();

    // Scripted round; the first knockdown ends it
    let mut inputs: Vec<InputState> = players.iter().map(|_| InputState::default()).collect();
    let mut script = SCRIPT.iter().peekable();
    let mut event_count = 0;

    for frame in 0..ROUND_TICKS {
        while let Some((_, index, key, pressed)) = script.next_if(|(at, ..)| *at == frame) {
            inputs[*index].handle_key(*key, *pressed);
        }

        let tick_inputs: Vec<_> = inputs.iter().map(|s| s.to_player_input(frame)).collect();
        let events = simulation.tick(&tick_inputs);
        event_count += events.len();

        let loser = events.iter().find_map(|event| match event {
            MotionEvent::KnockedDown { actor } => Some(*actor),
            _ => None,
        });
        if let Some(loser) = loser {
            if let Some(&winner) = players.iter().find(|&&id| id != loser) {
                event_count += simulation.celebrate(winner).len();
            }
            break;
        }
    }

    if let RoundPhase::Victory { winner } = simulation.phase() {
        for _ in 0..VICTORY_TICKS {
            event_count += simulation.tick(&[]).len();
        }
        log::info!("player {} wins", winner);
    } else {
        log::info!("round timed out");
    }

    let summary = serde_json::json!({
        "frames": simulation.frame(),
        "events": event_count,
        "phase": format!("{:?}", simulation.phase()),
        "players": simulation
            .players()
            .iter()
            .map(|p| serde_json::json!({
                "id": p.id(),
                "position": [p.body.center.x, p.body.center.y],
                "state": format!("{:?}", p.state(simulation.now())),
            }))
            .collect::<Vec<_>>(),
        "ball": [simulation.ball().body.center.x, simulation.ball().body.center.y],
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
