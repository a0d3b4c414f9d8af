//! ECS resources that bridge the simulation with the host's audio service.
//!
//! Use [`setup_audio`] once during initialization to create the channel and
//! insert the [`AudioBridge`] and `Messages<AudioCmd>` resources. The host
//! keeps the returned receiver and plays each cue it reads.

use crate::events::audio::AudioCmd;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Shared bridge between the ECS world and the audio service.
///
/// Systems never touch it directly; they write [`AudioCmd`] messages and
/// [`crate::systems::audio::forward_audio_cmds`] sends them over `tx_cmd`.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio service).
    pub tx_cmd: Sender<AudioCmd>,
}

/// Create the command channel and register bridge resources.
///
/// Returns the receiving end for the host's audio service.
pub fn setup_audio(world: &mut World) -> Receiver<AudioCmd> {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    world.insert_resource(AudioBridge { tx_cmd });
    if !world.contains_resource::<Messages<AudioCmd>>() {
        world.insert_resource(Messages::<AudioCmd>::default());
    }
    rx_cmd
}

/// Drop the bridge; the host's receiver observes a disconnected channel.
pub fn shutdown_audio(world: &mut World) {
    world.remove_resource::<AudioBridge>();
}
