use bevy_ecs::message::Message;

/// Sound cue names understood by the host's audio service.
pub mod cue {
    pub const EXPLOSION: &str = "explosion01";
    pub const BOING: &str = "boing";
    pub const WIND: &str = "wind";
    pub const INFLATE: &str = "inflate";
    pub const DEFLATE: &str = "deflate";
}

/// Commands sent *to* the audio service.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    PlayFx { id: String },
}

impl AudioCmd {
    pub fn fx(id: &str) -> Self {
        AudioCmd::PlayFx { id: id.to_string() }
    }
}
