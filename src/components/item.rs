//! Placeable tools and level pickups.
//!
//! An [`Item`] is placed by the player and runs a two-state machine
//! ([`ItemPhase::Inactive`] while it follows the pointer,
//! [`ItemPhase::Active`] once dropped into the level). A [`Pickup`] is a level
//! object that refills the inventory when a walking derpling touches it.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Tool types, named as in level files and the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Ladder,
    Umbrella,
    Trampoline,
    StopSign,
    Jetpack,
    Rocket,
    Inflator,
    Deflator,
    Tnt,
}

impl ItemKind {
    /// Inventory slot order, left to right.
    pub const ALL: [ItemKind; 9] = [
        ItemKind::Ladder,
        ItemKind::Umbrella,
        ItemKind::Trampoline,
        ItemKind::StopSign,
        ItemKind::Jetpack,
        ItemKind::Rocket,
        ItemKind::Inflator,
        ItemKind::Deflator,
        ItemKind::Tnt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Ladder => "ladder",
            ItemKind::Umbrella => "umbrella",
            ItemKind::Trampoline => "trampoline",
            ItemKind::StopSign => "stop_sign",
            ItemKind::Jetpack => "jetpack",
            ItemKind::Rocket => "rocket",
            ItemKind::Inflator => "inflator",
            ItemKind::Deflator => "deflator",
            ItemKind::Tnt => "tnt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemPhase {
    #[default]
    Inactive,
    Active,
}

/// Item state machine: `Inactive --(should_activate)--> Active`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Item {
    pub kind: ItemKind,
    pub phase: ItemPhase,
    pub should_activate: bool,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            phase: ItemPhase::Inactive,
            should_activate: false,
        }
    }

    /// An item created already in place (ladder segments built in a run).
    pub fn active(kind: ItemKind) -> Self {
        Self {
            kind,
            phase: ItemPhase::Active,
            should_activate: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == ItemPhase::Active
    }
}

/// Level object that sets the inventory count of `kind` to `amount`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Pickup {
    pub kind: ItemKind,
    pub amount: u32,
}
