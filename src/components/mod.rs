//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulation world. Components are plain data; behavior lives in
//! [`crate::systems`].
//!
//! Submodules overview:
//! - [`animation`] – animation set, frame index and mirroring for the renderer
//! - [`camera`] – free/tracking camera rig
//! - [`derpling`] – derpling record and behavior markers
//! - [`easing`] – easing curves used by particle fades
//! - [`geometry`] – platforms, walls, ladders, goals and no-item zones
//! - [`item`] – player-placed tools and level pickups
//! - [`mechanics`] – TNT and blast radius
//! - [`motion`] – polar velocity, linear/ballistic integrators, stopwatch
//! - [`particle`] – particle generators and effect presets
//! - [`spatial`] – position, size, bounding rectangle and facing
//! - [`spawner`] – periodic derpling source
//! - [`sprite`] – static icon and translucency
//! - [`teleporter`] – portal pairs and their triggers

pub mod animation;
pub mod camera;
pub mod derpling;
pub mod easing;
pub mod geometry;
pub mod item;
pub mod mechanics;
pub mod motion;
pub mod particle;
pub mod spatial;
pub mod spawner;
pub mod sprite;
pub mod teleporter;
