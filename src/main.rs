//! Headless runner: plays rooms with the autopilot and keeps the gold.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use tile_roguelike::config::GameConfig;
use tile_roguelike::events::GameEvent;
use tile_roguelike::game::{Game, GameState};
use tile_roguelike::input::{Autopilot, InputSource};
use tile_roguelike::render;
use tile_roguelike::terrain::NoiseTerrain;
use tile_roguelike::wallet;

/// Tile roguelike, played by the autopilot
#[derive(Parser, Debug)]
#[command(name = "tile-roguelike")]
#[command(version, about = "Clear rooms, collect gold, go deeper", long_about = None)]
struct Args {
    /// Seed for room generation and combat rolls (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(short = 't', long = "ticks", default_value_t = 2000)]
    ticks: u64,

    /// JSON config file; missing fields and a missing file use defaults
    #[arg(short = 'c', long = "config", default_value = "roguelike.json")]
    config: PathBuf,

    /// Wallet file, overriding the one named in the config
    #[arg(short = 'w', long = "wallet")]
    wallet: Option<PathBuf>,

    /// Print an ASCII frame after every tick
    #[arg(long = "ascii")]
    ascii: bool,

    /// Sleep between ticks to run at the configured tick rate
    #[arg(long = "realtime")]
    realtime: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let args = Args::parse();
    let config = GameConfig::load(&args.config)?;
    let wallet_path = args.wallet.clone().unwrap_or_else(|| config.wallet_path.0.clone());
    let gold = wallet::load(&wallet_path)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let tick_length = Duration::from_secs_f64(1.0 / f64::from(config.tick_rate.0.max(1)));

    log::info!("seed {seed}, starting with {gold} gold");
    let terrain = NoiseTerrain::new(config.terrain.clone());
    let mut game = Game::new(config, Box::new(terrain), gold, seed)?;
    let mut pilot = Autopilot::new();

    for _ in 0..args.ticks {
        let inputs = pilot.poll(&game);
        let events = match game.tick(&inputs) {
            Ok(events) => events,
            Err(e) => {
                log::error!("could not build the next room: {e}");
                break;
            }
        };
        for event in &events {
            report(event);
        }

        if args.ascii {
            println!("{}", render::ascii_frame(&game));
        }
        if game.state() != GameState::Running {
            break;
        }
        if args.realtime {
            std::thread::sleep(tick_length);
        }
    }

    let health = game.player_health();
    println!(
        "{} ticks, {} rooms cleared, difficulty {:.1}, hp {}/{}, gold {}",
        game.ticks(),
        game.rooms_cleared(),
        game.difficulty(),
        health.current,
        health.max,
        game.gold()
    );

    if let Err(e) = wallet::save(&wallet_path, game.gold()) {
        log::warn!("{e}");
    }
    Ok(())
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::EnemyDied { gold, .. } => log::debug!("enemy down, {gold} gold dropped"),
        GameEvent::LootCollected { value, .. } => log::debug!("picked up {value} gold"),
        GameEvent::TrapTriggered { damage, .. } => log::debug!("trap hit for {damage}"),
        GameEvent::PlayerDied => log::info!("the player has fallen"),
        _ => log::trace!("{event:?}"),
    }
}
