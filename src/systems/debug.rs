use bevy_ecs::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::components::derpling::{
    Derpling, Descending, Exploding, Grown, OnLadder, ReachedGoal, Shrunk, Victory, Walking,
};
use crate::components::motion::{BallisticMotion, LinearMotion, Stopwatch};

pub type Markers = (
    Has<Descending>,
    Has<Walking>,
    Has<OnLadder>,
    Has<Exploding>,
    Has<Grown>,
    Has<Shrunk>,
    Has<ReachedGoal>,
    Has<Victory>,
    Has<LinearMotion>,
    Has<BallisticMotion>,
    Has<Stopwatch>,
);

/// One flag per entry of [`Markers`], as the query yields them.
pub type MarkerFlags = (bool, bool, bool, bool, bool, bool, bool, bool, bool, bool, bool);

/// Sorted names of the behavior markers a derpling holds.
pub fn marker_names(markers: MarkerFlags) -> SmallVec<[&'static str; 11]> {
    let (
        descending,
        walking,
        ladder,
        exploding,
        grown,
        shrunk,
        goal,
        victory,
        linear,
        ballistic,
        stopwatch,
    ) = markers;
    let mut names: SmallVec<[&'static str; 11]> = [
        (descending, "Descending"),
        (walking, "Walking"),
        (ladder, "OnLadder"),
        (exploding, "Exploding"),
        (grown, "Grown"),
        (shrunk, "Shrunk"),
        (goal, "ReachedGoal"),
        (victory, "Victory"),
        (linear, "LinearMotion"),
        (ballistic, "BallisticMotion"),
        (stopwatch, "Stopwatch"),
    ]
    .into_iter()
    .filter_map(|(present, name)| present.then_some(name))
    .collect();
    names.sort_unstable();
    names
}

/// Log every derpling's marker set. Only scheduled while `DebugMode` exists.
pub fn debug_system(query: Query<(Entity, Markers), With<Derpling>>) {
    for (entity, markers) in query.iter() {
        debug!("derpling {entity}: [{}]", marker_names(markers).join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_sorted() {
        let mut world = World::new();
        let e = world
            .spawn((Derpling::default(), Walking, LinearMotion, Grown::default()))
            .id();
        let markers = world
            .query::<Markers>()
            .get(&world, e)
            .unwrap();
        assert_eq!(
            marker_names(markers).as_slice(),
            &["Grown", "LinearMotion", "Walking"]
        );
    }

    #[test]
    fn bare_derpling_has_no_markers() {
        let none = (false, false, false, false, false, false, false, false, false, false, false);
        assert!(marker_names(none).is_empty());
    }

    #[test]
    fn debug_system_runs_over_derplings() {
        let mut world = World::new();
        world.spawn((Derpling::default(), Descending, Stopwatch::default()));
        let mut schedule = Schedule::default();
        schedule.add_systems(debug_system);
        schedule.run(&mut world);
    }
}
