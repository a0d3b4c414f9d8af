//! Derpling record and behavior markers.
//!
//! A derpling's behavior is the set of marker components attached to it.
//! Exactly zero or one *primary* marker ([`Descending`], [`Walking`],
//! [`OnLadder`], [`Exploding`]) may be present; a derpling on a ballistic arc
//! carries none. The orthogonal modifiers ([`Grown`], [`Shrunk`],
//! [`ReachedGoal`], [`Victory`]) combine freely with the primary state.
//!
//! Systems change state by removing the old primary marker and inserting the
//! new one through the same `EntityCommands`, so both edits land at the same
//! sync point. [`crate::registry::check_behavior_invariants`] asserts the rule.

use bevy_ecs::prelude::*;

use crate::components::spatial::Facing;

/// Auxiliary per-derpling state.
///
/// `attached_platform` is `Some` exactly while [`Walking`] is present and
/// `attached_ladder` exactly while [`OnLadder`] is present.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Derpling {
    pub attached_platform: Option<Entity>,
    pub attached_ladder: Option<Entity>,
    pub has_umbrella: bool,
    pub imprisoned: bool,
    pub last_facing_direction: Facing,
    pub dead: bool,
}

impl Default for Derpling {
    fn default() -> Self {
        Self {
            attached_platform: None,
            attached_ladder: None,
            has_umbrella: false,
            imprisoned: true,
            last_facing_direction: Facing::Right,
            dead: false,
        }
    }
}

impl Derpling {
    pub fn new(imprisoned: bool) -> Self {
        Self {
            imprisoned,
            ..Self::default()
        }
    }
}

/// Falling under linear motion until a platform is touched.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Descending;

/// Walking along `attached_platform`.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Walking;

/// Climbing `attached_ladder`.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct OnLadder;

/// Playing the death animation; destroyed once it ends.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Exploding;

/// Inflated to twice the base size; `elapsed_ms` runs the growth window.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Grown {
    pub elapsed_ms: u64,
}

/// Deflated to half the base size; `elapsed_ms` runs the growth window.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Shrunk {
    pub elapsed_ms: u64,
}

/// Touched a goal this tick; consumed by the goal system on the next tick.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ReachedGoal;

/// Launched from the goal; counts towards ending the level.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Victory;

/// Primary behavior, as reported by [`primary_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryState {
    Descending,
    Walking,
    OnLadder,
    Exploding,
}

impl PrimaryState {
    pub fn name(self) -> &'static str {
        match self {
            PrimaryState::Descending => "Descending",
            PrimaryState::Walking => "Walking",
            PrimaryState::OnLadder => "OnLadder",
            PrimaryState::Exploding => "Exploding",
        }
    }
}

/// Every primary marker present on an entity, in a fixed order.
pub fn primary_states(entity: &EntityRef) -> arrayvec::ArrayVec<PrimaryState, 4> {
    let mut found = arrayvec::ArrayVec::new();
    if entity.contains::<Descending>() {
        found.push(PrimaryState::Descending);
    }
    if entity.contains::<Walking>() {
        found.push(PrimaryState::Walking);
    }
    if entity.contains::<OnLadder>() {
        found.push(PrimaryState::OnLadder);
    }
    if entity.contains::<Exploding>() {
        found.push(PrimaryState::Exploding);
    }
    found
}

/// The single primary state of a derpling, or `None` while ballistic.
pub fn primary_state(world: &World, entity: Entity) -> Option<PrimaryState> {
    let entity_ref = world.get_entity(entity).ok()?;
    primary_states(&entity_ref).first().copied()
}
