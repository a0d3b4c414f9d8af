//! Player tool stock.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::components::item::ItemKind;

/// Count of each placeable tool the player still holds.
#[derive(Resource, Debug, Clone, Default)]
pub struct Inventory {
    counts: FxHashMap<ItemKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ItemKind, amount: u32) -> Self {
        self.set(kind, amount);
        self
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Overwrite the stock of `kind`; this is what pickups do.
    pub fn set(&mut self, kind: ItemKind, amount: u32) {
        self.counts.insert(kind, amount);
    }

    pub fn add(&mut self, kind: ItemKind, amount: u32) {
        *self.counts.entry(kind).or_insert(0) += amount;
    }

    /// Take `amount` units if that many are in stock.
    pub fn take(&mut self, kind: ItemKind, amount: u32) -> bool {
        let current = self.count(kind);
        if current < amount {
            return false;
        }
        self.counts.insert(kind, current - amount);
        true
    }
}
