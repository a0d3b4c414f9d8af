//! Simulation configuration resource.
//!
//! Holds the tuning constants of the simulation, loaded from an INI
//! configuration file. Defaults reproduce the stock game so a missing file is
//! never fatal.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! target_fps = 60
//! seed = 0
//!
//! [grid]
//! size = 32
//!
//! [derpling]
//! width = 32
//! height = 64
//! walk_speed = 175
//! fall_speed = 300
//! umbrella_speed = 100
//! death_fall_time_ms = 1000
//! growth_window_ms = 5000
//! ladder_exit_lift = 10
//!
//! [spawner]
//! period_ms = 128
//! amount = 1
//!
//! [tnt]
//! fuse_ms = 3000
//! blast_size = 64
//!
//! [map]
//! width = 1344
//! height = 768
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_SEED: u64 = 0;
const DEFAULT_GRID_SIZE: f32 = 32.0;
const DEFAULT_DERPLING_WIDTH: f32 = DEFAULT_GRID_SIZE;
const DEFAULT_DERPLING_HEIGHT: f32 = DEFAULT_GRID_SIZE * 2.0;
const DEFAULT_WALK_SPEED: f32 = 175.0;
const DEFAULT_FALL_SPEED: f32 = 300.0;
const DEFAULT_UMBRELLA_SPEED: f32 = 100.0;
const DEFAULT_DEATH_FALL_TIME_MS: u64 = 1000;
const DEFAULT_GROWTH_WINDOW_MS: u64 = 5000;
const DEFAULT_LADDER_EXIT_LIFT: f32 = 10.0;
const DEFAULT_SPAWN_PERIOD_MS: u64 = 128;
const DEFAULT_SPAWN_AMOUNT: u32 = 1;
const DEFAULT_TNT_FUSE_MS: u64 = 3000;
const DEFAULT_BLAST_SIZE: f32 = 64.0;
const DEFAULT_MAP_WIDTH: f32 = 1344.0;
const DEFAULT_MAP_HEIGHT: f32 = 768.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Simulation configuration resource.
///
/// Inserted once at world construction and read by every system that needs a
/// speed, size or timing threshold.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Nominal frame rate the motion integrators are expressed against.
    pub target_fps: u32,
    /// Seed for [`SimRng`](crate::resources::rng::SimRng).
    pub seed: u64,
    /// Tile edge in world units; items snap to it.
    pub grid_size: f32,
    pub derpling_width: f32,
    pub derpling_height: f32,
    pub walk_speed: f32,
    pub fall_speed: f32,
    pub umbrella_speed: f32,
    /// A fall lasting at least this long is fatal without an umbrella.
    pub death_fall_time_ms: u64,
    /// How long an inflated or deflated derpling keeps its size.
    pub growth_window_ms: u64,
    /// Upward nudge applied when a derpling leaves the top of a ladder.
    pub ladder_exit_lift: f32,
    pub spawn_period_ms: u64,
    pub spawn_amount: u32,
    pub tnt_fuse_ms: u64,
    pub blast_size: f32,
    pub map_width: f32,
    pub map_height: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with the stock game values.
    pub fn new() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            seed: DEFAULT_SEED,
            grid_size: DEFAULT_GRID_SIZE,
            derpling_width: DEFAULT_DERPLING_WIDTH,
            derpling_height: DEFAULT_DERPLING_HEIGHT,
            walk_speed: DEFAULT_WALK_SPEED,
            fall_speed: DEFAULT_FALL_SPEED,
            umbrella_speed: DEFAULT_UMBRELLA_SPEED,
            death_fall_time_ms: DEFAULT_DEATH_FALL_TIME_MS,
            growth_window_ms: DEFAULT_GROWTH_WINDOW_MS,
            ladder_exit_lift: DEFAULT_LADDER_EXIT_LIFT,
            spawn_period_ms: DEFAULT_SPAWN_PERIOD_MS,
            spawn_amount: DEFAULT_SPAWN_AMOUNT,
            tnt_fuse_ms: DEFAULT_TNT_FUSE_MS,
            blast_size: DEFAULT_BLAST_SIZE,
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: fps={}, seed={}, grid={}, walk={}, fall={}, map={}x{}",
            self.target_fps,
            self.seed,
            self.grid_size,
            self.walk_speed,
            self.fall_speed,
            self.map_width,
            self.map_height
        );

        Ok(())
    }

    /// Override fields from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // [simulation] section
        if let Some(fps) = uint("simulation", "target_fps") {
            self.target_fps = fps as u32;
        }
        if let Some(seed) = uint("simulation", "seed") {
            self.seed = seed;
        }

        // [grid] section
        if let Some(size) = float("grid", "size") {
            self.grid_size = size;
        }

        // [derpling] section
        if let Some(width) = float("derpling", "width") {
            self.derpling_width = width;
        }
        if let Some(height) = float("derpling", "height") {
            self.derpling_height = height;
        }
        if let Some(speed) = float("derpling", "walk_speed") {
            self.walk_speed = speed;
        }
        if let Some(speed) = float("derpling", "fall_speed") {
            self.fall_speed = speed;
        }
        if let Some(speed) = float("derpling", "umbrella_speed") {
            self.umbrella_speed = speed;
        }
        if let Some(ms) = uint("derpling", "death_fall_time_ms") {
            self.death_fall_time_ms = ms;
        }
        if let Some(ms) = uint("derpling", "growth_window_ms") {
            self.growth_window_ms = ms;
        }
        if let Some(lift) = float("derpling", "ladder_exit_lift") {
            self.ladder_exit_lift = lift;
        }

        // [spawner] section
        if let Some(ms) = uint("spawner", "period_ms") {
            self.spawn_period_ms = ms;
        }
        if let Some(amount) = uint("spawner", "amount") {
            self.spawn_amount = amount as u32;
        }

        // [tnt] section
        if let Some(ms) = uint("tnt", "fuse_ms") {
            self.tnt_fuse_ms = ms;
        }
        if let Some(size) = float("tnt", "blast_size") {
            self.blast_size = size;
        }

        // [map] section
        if let Some(width) = float("map", "width") {
            self.map_width = width;
        }
        if let Some(height) = float("map", "height") {
            self.map_height = height;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("simulation", "target_fps", Some(self.target_fps.to_string()));
        config.set("simulation", "seed", Some(self.seed.to_string()));

        config.set("grid", "size", Some(self.grid_size.to_string()));

        config.set("derpling", "width", Some(self.derpling_width.to_string()));
        config.set("derpling", "height", Some(self.derpling_height.to_string()));
        config.set("derpling", "walk_speed", Some(self.walk_speed.to_string()));
        config.set("derpling", "fall_speed", Some(self.fall_speed.to_string()));
        config.set(
            "derpling",
            "umbrella_speed",
            Some(self.umbrella_speed.to_string()),
        );
        config.set(
            "derpling",
            "death_fall_time_ms",
            Some(self.death_fall_time_ms.to_string()),
        );
        config.set(
            "derpling",
            "growth_window_ms",
            Some(self.growth_window_ms.to_string()),
        );
        config.set(
            "derpling",
            "ladder_exit_lift",
            Some(self.ladder_exit_lift.to_string()),
        );

        config.set("spawner", "period_ms", Some(self.spawn_period_ms.to_string()));
        config.set("spawner", "amount", Some(self.spawn_amount.to_string()));

        config.set("tnt", "fuse_ms", Some(self.tnt_fuse_ms.to_string()));
        config.set("tnt", "blast_size", Some(self.blast_size.to_string()));

        config.set("map", "width", Some(self.map_width.to_string()));
        config.set("map", "height", Some(self.map_height.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Nominal frame rate as a float, for the integrators.
    pub fn fps(&self) -> f32 {
        self.target_fps as f32
    }
}
