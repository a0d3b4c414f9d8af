use bevy_ecs::prelude::Component;

/// Periodic derpling source.
///
/// Every `period_ms` while `active` and `current < amount`, one derpling is
/// created centered horizontally on the spawner. `spawn_free` spawns them
/// already freed instead of imprisoned.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spawner {
    pub amount: u32,
    pub active: bool,
    pub period_ms: u64,
    pub current: u32,
    pub spawn_free: bool,
    pub elapsed_ms: u64,
}

impl Spawner {
    pub fn new(amount: u32, period_ms: u64) -> Self {
        Self {
            amount,
            active: true,
            period_ms,
            current: 0,
            spawn_free: false,
            elapsed_ms: 0,
        }
    }

    pub fn with_spawn_free(mut self, spawn_free: bool) -> Self {
        self.spawn_free = spawn_free;
        self
    }

    pub fn exhausted(&self) -> bool {
        self.current >= self.amount
    }
}
