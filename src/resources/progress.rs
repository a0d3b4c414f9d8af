use bevy_ecs::prelude::*;

/// Level-wide bookkeeping derived from the derpling population.
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelProgress {
    /// Derplings that have been freed (not imprisoned), dead or alive.
    pub free_derplings: usize,
    pub victorious: usize,
    pub ended: bool,
    /// Last derpling launched from the goal; the camera settles on it.
    pub focus: Option<Entity>,
}

impl LevelProgress {
    /// Every freed derpling has been launched from the goal.
    pub fn all_victorious(&self) -> bool {
        self.victorious > 0 && self.victorious == self.free_derplings
    }
}
