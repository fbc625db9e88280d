//! Balloon Archer headless runner
//!
//! Plays matches without a window: either the autopilot or a recorded input
//! script drives the simulation, one tick per frame.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use balloon_archer::Autopilot;
use balloon_archer::consts::FRAME_DT;
use balloon_archer::platform::{Platform, ScriptedPlatform, poll_input};
use balloon_archer::renderer::{SpriteMetrics, build_frame, status_line};
use balloon_archer::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use balloon_archer::tuning::Tuning;

#[derive(Parser, Debug)]
#[command(name = "balloon-archer")]
#[command(about = "Headless runner for the Balloon Archer simulation")]
struct Cli {
    /// Match seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of matches to play
    #[arg(long, default_value_t = 1)]
    matches: u32,
    /// Tuning JSON overriding the default balance
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Recorded input frames (JSON); the autopilot plays when omitted
    #[arg(long)]
    script: Option<PathBuf>,
    /// Stop after this many frames no matter what
    #[arg(long, default_value_t = 200_000)]
    max_frames: u64,
    /// Print the final match state as JSON
    #[arg(long, default_value_t = false)]
    dump_state: bool,
}

/// Where this run's input comes from
enum Driver {
    Autopilot(Autopilot),
    Script(ScriptedPlatform),
}

impl Driver {
    /// Input and frame time for the next frame, or `None` once a script runs dry
    fn next(&mut self, state: &GameState) -> Option<(TickInput, f32)> {
        match self {
            Driver::Autopilot(pilot) => Some((pilot.next_input(state), FRAME_DT)),
            Driver::Script(script) => {
                if script.is_finished() {
                    return None;
                }
                let frame = (poll_input(&*script), script.frame_time());
                script.advance();
                Some(frame)
            }
        }
    }
}

#[derive(Debug, Default)]
struct RunStats {
    wins: u32,
    losses: u32,
    hits: u32,
    arrows: u32,
    frames: u64,
    draw_commands: usize,
}

struct Game {
    state: GameState,
    driver: Driver,
    metrics: SpriteMetrics,
    stats: RunStats,
}

impl Game {
    /// Simulate one frame and build its draw list; returns false when input ran out
    fn frame(&mut self) -> bool {
        let Some((input, dt)) = self.driver.next(&self.state) else {
            return false;
        };
        tick(&mut self.state, &input, dt);
        self.stats.frames += 1;

        for event in &self.state.events {
            match event {
                GameEvent::Won | GameEvent::Lost { .. } => {
                    match self.state.phase {
                        GamePhase::Win => self.stats.wins += 1,
                        _ => self.stats.losses += 1,
                    }
                    self.stats.hits += self.state.hits;
                    self.stats.arrows += self.state.arrows_fired;
                    log::info!(
                        "Match {} finished: {}",
                        self.stats.wins + self.stats.losses,
                        status_line(&self.state)
                    );
                }
                GameEvent::Restarted => log::info!("New match"),
                _ => {}
            }
        }

        let commands = build_frame(&self.state, input.mouse_pos, &self.metrics);
        self.stats.draw_commands = commands.len();
        true
    }

    fn matches_played(&self) -> u32 {
        self.stats.wins + self.stats.losses
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Balloon Archer starting with seed {}", seed);

    let driver = match &cli.script {
        Some(path) => Driver::Script(
            ScriptedPlatform::load(path)
                .with_context(|| format!("loading input script {}", path.display()))?,
        ),
        None => Driver::Autopilot(Autopilot::new(seed)),
    };

    let mut game = Game {
        state: GameState::with_tuning(seed, tuning),
        driver,
        metrics: SpriteMetrics::default(),
        stats: RunStats::default(),
    };

    while game.matches_played() < cli.matches && game.stats.frames < cli.max_frames {
        if !game.frame() {
            log::warn!("Input script ended before the requested matches were played");
            break;
        }
    }

    let stats = &game.stats;
    println!(
        "{} match(es): {} won, {} lost, {} hits from {} arrows over {} frames",
        game.matches_played(),
        stats.wins,
        stats.losses,
        stats.hits,
        stats.arrows,
        stats.frames
    );
    log::debug!("Last frame drew {} commands", stats.draw_commands);

    if cli.dump_state {
        let json = serde_json::to_string_pretty(&game.state).context("serializing final state")?;
        println!("{}", json);
    }

    Ok(())
}
