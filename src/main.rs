//! Underwell Pit headless runner
//!
//! Plays a run at a fixed frame rate against a scripted defence, logs what
//! happens and keeps the best survival time on disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;

use underwell_pit::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
use underwell_pit::sim::{Command, GameEvent, GamePhase, Tool};
use underwell_pit::{BestTime, Game, Tuning};

#[derive(Parser)]
#[command(name = "underwell-pit")]
#[command(about = "Run the Underwell Pit simulation without a window")]
struct Cli {
    /// RNG seed for the run
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after this many simulated seconds if the everstone still stands
    #[arg(long, default_value_t = 300.0)]
    seconds: f32,
    #[arg(long, default_value_t = DEFAULT_ARENA_WIDTH)]
    width: f32,
    #[arg(long, default_value_t = DEFAULT_ARENA_HEIGHT)]
    height: f32,
    /// Balance overrides (JSON, partial files allowed)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Where the best survival time is kept
    #[arg(long, default_value = "underwell_best.json")]
    best: PathBuf,
    /// Defence placed before the run starts
    #[arg(long, value_enum, default_value_t = Layout::Demo)]
    layout: Layout,
    /// Simulated frame rate feeding the fixed-step clock
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layout {
    /// A handful of towers, traps and walls around the platform
    Demo,
    /// Bare level, the everstone fends for itself
    Empty,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("Failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let mut best = BestTime::load(&cli.best)
        .with_context(|| format!("Failed to read best time from {}", cli.best.display()))?;

    let mut game = Game::new(cli.width, cli.height, cli.seed, tuning);
    game.set_best_secs(best.seconds);

    if cli.layout == Layout::Demo {
        for (tool, command) in demo_defence(cli.width, cli.height) {
            log::debug!("{}: {:?}", tool.label(), command);
            game.queue(command);
        }
    }
    game.queue(Command::Start);

    let fps = if cli.fps.is_finite() && cli.fps > 0.0 {
        cli.fps
    } else {
        60.0
    };
    let frames = (f64::from(cli.seconds.max(0.0)) * fps).ceil() as u64;
    let mut kills = 0u32;

    for _ in 0..frames {
        for event in game.advance(1.0 / fps) {
            match event {
                GameEvent::MonsterKilled { .. } => kills += 1,
                GameEvent::TrapTriggered { trap, stunned } => {
                    log::debug!("Trap {} stunned {} monsters", trap, stunned);
                }
                GameEvent::GameOver { survival_secs } => {
                    if best.record(survival_secs) {
                        best.save(&cli.best).with_context(|| {
                            format!("Failed to save best time to {}", cli.best.display())
                        })?;
                    }
                }
                _ => {}
            }
        }
        if game.world().phase == GamePhase::Ended {
            break;
        }
    }

    let hud = game.hud();
    let outcome = match hud.phase {
        GamePhase::Ended => "everstone destroyed",
        _ => "everstone still standing",
    };
    println!(
        "seed {}: {} after {:.1}s ({} monsters killed, everstone {:.0}/{:.0}, best {:.1}s)",
        game.seed(),
        outcome,
        hud.elapsed_secs,
        kills,
        hud.everstone_health,
        hud.everstone_max,
        best.seconds
    );
    Ok(())
}

/// Pointer presses a player might make before pressing start
fn demo_defence(width: f32, height: f32) -> Vec<(Tool, Command)> {
    let center = Vec2::new(width / 2.0, height / 2.0 + 30.0);
    let presses = [
        (Tool::Laser, center + Vec2::new(-140.0, -120.0)),
        (Tool::Laser, center + Vec2::new(140.0, -120.0)),
        (Tool::Shock, center + Vec2::new(-200.0, -30.0)),
        (Tool::Shock, center + Vec2::new(200.0, -30.0)),
        (Tool::Barrier, center + Vec2::new(-110.0, -90.0)),
        (Tool::Barrier, center + Vec2::new(110.0, -90.0)),
        (Tool::Builder, center + Vec2::new(0.0, -110.0)),
        (Tool::Conveyor, Vec2::new(width * 0.2, center.y - 140.0)),
        (Tool::Bomb, Vec2::new(width - 120.0, 120.0)),
    ];
    presses
        .into_iter()
        .filter_map(|(tool, pos)| tool.command_at(pos).map(|command| (tool, command)))
        .collect()
}
