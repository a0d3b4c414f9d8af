//! Derplings headless runner.
//!
//! Loads a configuration and a level, then advances the simulation for a
//! fixed number of ticks without a window. Sound cues are played by a small
//! logging audio service on its own thread; deaths and the level's end are
//! reported as they happen.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --level level.json --ticks 1200 --seed 7
//! RUST_LOG=debug cargo run -- --debug
//! ```

use std::path::PathBuf;
use std::thread;

use clap::Parser;
use crossbeam_channel::Receiver;
use log::{error, info, warn};
use rustc_hash::FxHashSet;

use derplings::events::audio::AudioCmd;
use derplings::game::Simulation;
use derplings::level::{Level, demo_level};
use derplings::resources::audio::shutdown_audio;
use derplings::resources::gameconfig::GameConfig;

/// Derplings headless simulation
#[derive(Parser)]
#[command(version, about = "Runs a Derplings level without a window and logs what happens.")]
struct Cli {
    /// INI configuration file. Missing keys keep their defaults.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level JSON file. The built-in demo level is used when absent.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Milliseconds per tick.
    #[arg(long, default_value_t = 16)]
    delta_ms: u32,

    /// Random seed, overriding the configured one.
    #[arg(long)]
    seed: Option<u64>,

    /// Log the behavior markers of every derpling each tick.
    #[arg(long)]
    debug: bool,
}

/// Stand-in audio service: logs each cue until the bridge is dropped.
fn audio_service(rx_cmd: Receiver<AudioCmd>) {
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::PlayFx { id } => info!("audio: play {id}"),
        }
    }
    info!("audio: bridge closed");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using default configuration");
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let level = match &cli.level {
        Some(path) => match Level::load_from_file(path) {
            Ok(level) => level,
            Err(e) => {
                error!("Failed to load level {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => demo_level(),
    };

    let mut sim = Simulation::new(config);
    sim.set_debug(cli.debug);
    let rx_cmd = sim.attach_audio();
    let audio = thread::spawn(move || audio_service(rx_cmd));
    level.apply(&mut sim.world);

    let mut reported = FxHashSet::default();
    for tick in 0..cli.ticks {
        sim.tick(cli.delta_ms);

        for entity in sim.dead_derplings() {
            if reported.insert(entity) {
                info!("tick {tick}: derpling {entity} died");
            }
        }
        if sim.progress().ended {
            info!("tick {tick}: level complete");
            break;
        }
    }

    sim.log_summary();
    info!("{} derplings lost", reported.len());

    shutdown_audio(&mut sim.world);
    if audio.join().is_err() {
        error!("audio service panicked");
    }
}
