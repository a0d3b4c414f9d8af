//! Simulation systems.
//!
//! Every system is a plain function scheduled by [`crate::game::build_schedule`]
//! in one fixed, chained order. Commands issued by a system are applied before
//! the next one runs, so marker changes are visible within the same tick.
//!
//! Submodules overview
//! - [`animation`] – advance animation frames from the animation store
//! - [`audio`] – forward audio cues to the host and advance the message queue
//! - [`ballistic`] – derplings in flight hitting walls and platforms
//! - [`camera`] – free panning and derpling tracking, viewport centering
//! - [`debug`] – per-tick marker dump while debug mode is on
//! - [`descending`] – landing or exploding at the end of a fall
//! - [`exploding`] – death animation and removal
//! - [`goal`] – victory arcs, level completion and goal trampolines
//! - [`growth`] – inflated/deflated derplings returning to normal size
//! - [`item`] – pointer-following and activation of placed items
//! - [`ladder`] – climbing, hopping segments and leaving the top
//! - [`mechanics`] – TNT fuses and blasts
//! - [`movement`] – linear and ballistic integrators
//! - [`particles`] – particle emission and integration
//! - [`spawner`] – derpling sources and the freed-derpling count
//! - [`stopwatch`] – accumulate elapsed time on stopwatches
//! - [`teleporter`] – portal lifecycle
//! - [`time`] – update simulation time and delta
//! - [`transitions`] – shared behavior state changes
//! - [`walking`] – everything a walking derpling can bump into

pub mod animation;
pub mod audio;
pub mod ballistic;
pub mod camera;
pub mod debug;
pub mod descending;
pub mod exploding;
pub mod goal;
pub mod growth;
pub mod item;
pub mod ladder;
pub mod mechanics;
pub mod movement;
pub mod particles;
pub mod spawner;
pub mod stopwatch;
pub mod teleporter;
pub mod time;
pub mod transitions;
pub mod walking;
