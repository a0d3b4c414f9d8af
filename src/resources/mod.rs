//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: timing, configuration, randomness,
//! player stock and input, and the bridges to host services. Each submodule
//! documents the semantics and intended usage of its resource(s).
//!
//! Overview
//! - `animationstore` – frame counts and timing of each animation set
//! - `audio` – channel bridge to the host's audio service
//! - `debugmode` – presence enables the per-tick behavior dump
//! - `gameconfig` – tuning constants loaded from INI
//! - `input` – per-tick pointer and camera keys
//! - `inventory` – placeable tool stock
//! - `particles` – live particle records
//! - `progress` – freed/victorious counts and level end
//! - `rng` – seedable random source
//! - `viewport` – view rectangle for world/screen transforms
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod audio;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod inventory;
pub mod particles;
pub mod progress;
pub mod rng;
pub mod viewport;
pub mod worldtime;
