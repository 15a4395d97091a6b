//! Block Tower entry point
//!
//! Headless driver: runs autoplay games against the engine on the fixed
//! tick cadence, persisting the high score between runs.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use block_tower::autoplay::AutoPlayer;
use block_tower::consts::TICK_DT;
use block_tower::feedback::LogSink;
use block_tower::persistence::{FileStore, KeyValueStore, MemoryStore, Storage};
use block_tower::platform::{Platform, check_compatibility, check_features};
use block_tower::settings::Toggle;
use block_tower::sim::GameConfig;
use block_tower::{Screen, Session};

#[derive(Debug, Parser)]
#[command(name = "block-tower", version, about = "Headless Block Tower runner")]
struct Args {
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the default game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON key-value store for high score and settings (in-memory if omitted)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Tick budget per game
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,

    /// Autoplay accuracy, 0.0 (wild) to 1.0 (perfect)
    #[arg(long, default_value_t = 0.85)]
    skill: f32,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Turn vibration feedback off (persisted)
    #[arg(long)]
    no_vibration: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Block Tower (native) starting...");

    let compat = check_compatibility(Platform::current());
    if !compat.is_compatible {
        log::error!("{}", compat.message.unwrap_or_default());
        return ExitCode::FAILURE;
    }
    for warning in check_features(Platform::current()) {
        log::warn!("{}", warning);
    }

    let config = match &args.config {
        Some(path) => match GameConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Could not load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    match &args.store {
        Some(path) => match FileStore::open(path) {
            Ok(store) => run(&args, config, Storage::new(store)),
            Err(e) => {
                log::error!("Could not open store {}: {}", path.display(), e);
                ExitCode::FAILURE
            }
        },
        None => run(&args, config, Storage::new(MemoryStore::new())),
    }
}

fn run<S: KeyValueStore>(args: &Args, config: GameConfig, storage: Storage<S>) -> ExitCode {
    let seed = args.seed.unwrap_or_else(rand::random);
    let screen_width = config.screen_width;
    let mut session = Session::open(config, seed, storage, LogSink);
    if args.no_vibration && session.settings().vibration_enabled {
        session.toggle(Toggle::Vibration);
    }

    let mut bot = AutoPlayer::new(args.skill, screen_width, seed.wrapping_add(1));
    for game in 1..=args.games {
        if game == 1 {
            session.navigate(Screen::Game);
        } else {
            session.restart();
        }

        let start_ticks = session.ticks();
        while session.state().is_playing() && session.ticks() - start_ticks < args.max_ticks {
            session.update(TICK_DT);
            if bot.wants_commit(session.state()) {
                session.tap();
            }
        }

        let state = session.state();
        let outcome = if state.is_game_over() {
            "game over"
        } else {
            "tick budget reached"
        };
        println!(
            "Game {}: score {} (height {}, streak {}, speed x{:.1}) - {}",
            game,
            state.score,
            state.height(),
            state.streak,
            state.speed_multiplier,
            outcome
        );
    }

    session.navigate(Screen::Main);
    println!("High score: {}", session.high_score());
    ExitCode::SUCCESS
}
