use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animation;
use crate::components::derpling::Exploding;

/// Play the death animation and remove the derpling once it has finished.
pub fn exploding_system(
    mut query: Query<(Entity, &mut Animation), With<Exploding>>,
    mut commands: Commands,
) {
    for (entity, mut anim) in query.iter_mut() {
        if !anim.is("death") {
            anim.change_animation("death");
        } else if anim.stopped {
            debug!("derpling {entity} removed after exploding");
            commands.entity(entity).despawn();
        }
    }
}
