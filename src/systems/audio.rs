//! Systems bridging the ECS audio message queue to the host's audio service.
//!
//! - [`forward_audio_cmds`] sends every [`AudioCmd`] written this tick over the
//!   [`AudioBridge`] channel. Without a bridge the cues are only logged.
//! - [`update_audio_cmds`] advances the [`Messages<AudioCmd>`] double buffer so
//!   old cues are dropped.
//!
//! Run [`forward_audio_cmds`] after every system that plays a cue and
//! [`update_audio_cmds`] last.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::events::audio::AudioCmd;
use crate::resources::audio::AudioBridge;

pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        let AudioCmd::PlayFx { id } = cmd;
        debug!("play fx {id}");
        if let Some(bridge) = bridge.as_ref()
            && bridge.tx_cmd.send(cmd.clone()).is_err()
        {
            warn!("audio service disconnected, dropping cue {id}");
        }
    }
}

pub fn update_audio_cmds(mut messages: ResMut<Messages<AudioCmd>>) {
    messages.update();
}
