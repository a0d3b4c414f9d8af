//! Static level geometry markers.
//!
//! These attach to [`Spatial`](super::spatial::Spatial) entities created at
//! level setup. Their rectangles never move; weak platforms can be destroyed
//! by a blast and ladders can be placed or removed by the player.

use bevy_ecs::prelude::Component;

/// Solid floor derplings land on and walk along.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Platform;

/// Platform that a TNT blast can destroy.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct WeakPlatform;

/// Vertical obstacle that turns walking derplings around.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Wall;

/// Ladder segment. `in_use` is set while a derpling is attached to it.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Ladder {
    pub in_use: bool,
}

/// Level exit zone.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Goal;

/// Bounce pad behind the goal that relaunches victorious derplings.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct GoalTrampoline;

/// Area where the player may not place items.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct NoItemZone;
