//! Derplings simulation library.
//!
//! This module exposes the simulation's ECS components, resources, systems and
//! messages, the level loader and the player placement operations, for use by
//! the headless runner, by hosts that render and play audio, and by the
//! integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod level;
pub mod placement;
pub mod registry;
pub mod resources;
pub mod systems;
