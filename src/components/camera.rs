use bevy_ecs::prelude::Component;

/// Camera rig. In free mode the player pans it; otherwise it tracks the
/// `index`-th derpling.
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraRig {
    pub free_cam: bool,
    pub index: usize,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            free_cam: true,
            index: 0,
        }
    }
}
