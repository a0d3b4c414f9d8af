//! Stopwatch system.
//!
//! Every [`Stopwatch`] gains the tick's delta. Stopwatches never reset
//! themselves; the state that attached one removes or replaces it.

use bevy_ecs::prelude::*;

use crate::components::motion::Stopwatch;
use crate::resources::worldtime::WorldTime;

pub fn stopwatch_system(mut query: Query<&mut Stopwatch>, time: Res<WorldTime>) {
    let delta = time.delta();
    for mut stopwatch in query.iter_mut() {
        stopwatch.elapsed_ms += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(deltas: &[u32]) -> u64 {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let e = world.spawn(Stopwatch::default()).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(stopwatch_system);
        for &d in deltas {
            world.resource_mut::<WorldTime>().delta_ms = d;
            schedule.run(&mut world);
        }
        world.get::<Stopwatch>(e).unwrap().elapsed_ms
    }

    #[test]
    fn many_small_ticks_equal_one_large_tick() {
        assert_eq!(run_ticks(&[16; 10]), run_ticks(&[160]));
        assert_eq!(run_ticks(&[16; 10]), 160);
    }

    #[test]
    fn zero_delta_leaves_stopwatch_untouched() {
        assert_eq!(run_ticks(&[0, 0, 0]), 0);
    }
}
