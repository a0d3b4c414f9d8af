//! Entity registry contract over the ECS [`World`].
//!
//! Systems work on the world directly through queries; this trait is the
//! checked, id-based surface used by setup code, host operations and tests.
//! Every call on a stale id fails with [`RegistryError::NotFound`], every
//! call for a component the entity lacks fails with
//! [`RegistryError::TypeMismatch`].
//!
//! [`check_behavior_invariants`] is the consistency check run after ticks.

use std::any::type_name;

use bevy_ecs::component::Mutable;
use bevy_ecs::prelude::*;
use bevy_ecs::query::QueryFilter;
use smallvec::SmallVec;
use thiserror::Error;

use crate::components::derpling::{Derpling, OnLadder, Walking, primary_states};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("entity {entity} does not exist")]
    NotFound { entity: Entity },

    #[error("entity {entity} has no {component} component")]
    TypeMismatch {
        entity: Entity,
        component: &'static str,
    },

    #[error("entity {entity} holds conflicting behavior markers: {markers}")]
    ConflictingBehavior { entity: Entity, markers: String },

    #[error("entity {entity} has inconsistent attachment state: {detail}")]
    DetachedState { entity: Entity, detail: &'static str },
}

/// Id-based access to entities and their components.
pub trait Registry {
    /// Create an entity without components.
    fn create(&mut self) -> Entity;

    /// Create an entity holding `bundle`.
    fn create_with<B: Bundle>(&mut self, bundle: B) -> Entity;

    /// Destroy `entity` and all its components immediately.
    fn destroy(&mut self, entity: Entity) -> Result<(), RegistryError>;

    /// Attach `component`, replacing any existing value of the same type.
    fn attach<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), RegistryError>;

    /// Detach and return the component.
    fn detach<T: Component>(&mut self, entity: Entity) -> Result<T, RegistryError>;

    /// Whether `entity` is alive and holds a `T`.
    fn has<T: Component>(&self, entity: Entity) -> bool;

    fn fetch<T: Component>(&self, entity: Entity) -> Result<&T, RegistryError>;

    fn fetch_mut<T: Component<Mutability = Mutable>>(
        &mut self,
        entity: Entity,
    ) -> Result<Mut<'_, T>, RegistryError>;

    /// Snapshot of every entity matching the filter `F`.
    ///
    /// The list is materialized before returning, so callers may mutate the
    /// world while walking it.
    fn entities_with<F: QueryFilter>(&mut self) -> Vec<Entity>;

    fn is_alive(&self, entity: Entity) -> bool;
}

impl Registry for World {
    fn create(&mut self) -> Entity {
        self.spawn_empty().id()
    }

    fn create_with<B: Bundle>(&mut self, bundle: B) -> Entity {
        self.spawn(bundle).id()
    }

    fn destroy(&mut self, entity: Entity) -> Result<(), RegistryError> {
        if self.despawn(entity) {
            Ok(())
        } else {
            Err(RegistryError::NotFound { entity })
        }
    }

    fn attach<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), RegistryError> {
        let mut entity_mut = self
            .get_entity_mut(entity)
            .map_err(|_| RegistryError::NotFound { entity })?;
        entity_mut.insert(component);
        Ok(())
    }

    fn detach<T: Component>(&mut self, entity: Entity) -> Result<T, RegistryError> {
        let mut entity_mut = self
            .get_entity_mut(entity)
            .map_err(|_| RegistryError::NotFound { entity })?;
        entity_mut.take::<T>().ok_or(RegistryError::TypeMismatch {
            entity,
            component: short_type_name::<T>(),
        })
    }

    fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get_entity(entity)
            .map(|entity_ref| entity_ref.contains::<T>())
            .unwrap_or(false)
    }

    fn fetch<T: Component>(&self, entity: Entity) -> Result<&T, RegistryError> {
        let entity_ref = self
            .get_entity(entity)
            .map_err(|_| RegistryError::NotFound { entity })?;
        entity_ref.get::<T>().ok_or(RegistryError::TypeMismatch {
            entity,
            component: short_type_name::<T>(),
        })
    }

    fn fetch_mut<T: Component<Mutability = Mutable>>(
        &mut self,
        entity: Entity,
    ) -> Result<Mut<'_, T>, RegistryError> {
        if self.get_entity(entity).is_err() {
            return Err(RegistryError::NotFound { entity });
        }
        self.get_mut::<T>(entity).ok_or(RegistryError::TypeMismatch {
            entity,
            component: short_type_name::<T>(),
        })
    }

    fn entities_with<F: QueryFilter>(&mut self) -> Vec<Entity> {
        let mut query = self.query_filtered::<Entity, F>();
        query.iter(self).collect()
    }

    fn is_alive(&self, entity: Entity) -> bool {
        self.get_entity(entity).is_ok()
    }
}

/// Last path segment of a type name, for error messages.
fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Verify the behavior rules of every derpling.
///
/// - at most one of `Descending`, `Walking`, `OnLadder`, `Exploding`
/// - `attached_platform` is set exactly while `Walking`
/// - `attached_ladder` is set exactly while `OnLadder`
pub fn check_behavior_invariants(world: &mut World) -> Result<(), RegistryError> {
    let mut query = world.query::<(Entity, &Derpling)>();
    let derplings: SmallVec<[(Entity, Derpling); 32]> =
        query.iter(world).map(|(e, d)| (e, *d)).collect();

    for (entity, derpling) in derplings {
        let entity_ref = world.entity(entity);
        let states = primary_states(&entity_ref);
        if states.len() > 1 {
            let markers = states
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(RegistryError::ConflictingBehavior { entity, markers });
        }

        let walking = entity_ref.contains::<Walking>();
        if walking != derpling.attached_platform.is_some() {
            return Err(RegistryError::DetachedState {
                entity,
                detail: if walking {
                    "walking without an attached platform"
                } else {
                    "attached platform while not walking"
                },
            });
        }

        let on_ladder = entity_ref.contains::<OnLadder>();
        if on_ladder != derpling.attached_ladder.is_some() {
            return Err(RegistryError::DetachedState {
                entity,
                detail: if on_ladder {
                    "climbing without an attached ladder"
                } else {
                    "attached ladder while not climbing"
                },
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::derpling::{Descending, Exploding};
    use crate::components::geometry::Platform;
    use crate::components::motion::Stopwatch;

    #[test]
    fn fetch_distinguishes_stale_and_missing() {
        let mut world = World::new();
        let e = world.create_with(Stopwatch::default());
        assert!(world.fetch::<Stopwatch>(e).is_ok());
        assert!(matches!(
            world.fetch::<Platform>(e),
            Err(RegistryError::TypeMismatch { .. })
        ));
        world.destroy(e).unwrap();
        assert_eq!(
            world.fetch::<Stopwatch>(e).unwrap_err(),
            RegistryError::NotFound { entity: e }
        );
        assert!(world.destroy(e).is_err());
    }

    #[test]
    fn attach_replaces_and_detach_returns() {
        let mut world = World::new();
        let e = world.create();
        world.attach(e, Stopwatch::with_elapsed(5)).unwrap();
        world.attach(e, Stopwatch::with_elapsed(9)).unwrap();
        assert_eq!(world.detach::<Stopwatch>(e).unwrap().elapsed_ms, 9);
        assert!(!world.has::<Stopwatch>(e));
        assert!(matches!(
            world.detach::<Stopwatch>(e),
            Err(RegistryError::TypeMismatch { component: "Stopwatch", .. })
        ));
    }

    #[test]
    fn fetch_mut_writes_through() {
        let mut world = World::new();
        let e = world.create_with(Stopwatch::default());
        world.fetch_mut::<Stopwatch>(e).unwrap().elapsed_ms = 40;
        assert_eq!(world.fetch::<Stopwatch>(e).unwrap().elapsed_ms, 40);
    }

    #[test]
    fn entities_with_snapshot_survives_destruction() {
        let mut world = World::new();
        let a = world.create_with(Platform);
        let b = world.create_with(Platform);
        world.create_with(Stopwatch::default());
        let platforms = world.entities_with::<With<Platform>>();
        assert_eq!(platforms.len(), 2);
        for e in platforms {
            world.destroy(e).unwrap();
        }
        assert!(!world.is_alive(a));
        assert!(!world.is_alive(b));
    }

    #[test]
    fn invariants_reject_two_primary_markers() {
        let mut world = World::new();
        world.spawn((Derpling::default(), Descending, Exploding));
        assert!(matches!(
            check_behavior_invariants(&mut world),
            Err(RegistryError::ConflictingBehavior { .. })
        ));
    }

    #[test]
    fn invariants_tie_platform_to_walking() {
        let mut world = World::new();
        world.spawn((Derpling::default(), Walking));
        assert!(matches!(
            check_behavior_invariants(&mut world),
            Err(RegistryError::DetachedState { .. })
        ));

        let mut world = World::new();
        let platform = world.spawn(Platform).id();
        let derpling = Derpling {
            attached_platform: Some(platform),
            ..Derpling::default()
        };
        world.spawn((derpling, Walking));
        assert!(check_behavior_invariants(&mut world).is_ok());
    }
}
