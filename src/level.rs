//! Level description and loading.
//!
//! A level is a JSON document listing the static placements of a map plus the
//! player's starting inventory. Rectangles are world units, top-left anchored.
//!
//! ```json
//! {
//!   "name": "first steps",
//!   "map_height": 768,
//!   "inventory": { "umbrella": 2, "ladder": 4 },
//!   "placements": [
//!     { "kind": "platform", "rect": { "x": 0, "y": 704, "w": 1344, "h": 64 } },
//!     { "kind": "spawner", "x": 96, "y": 64, "amount": 5, "spawn_free": true },
//!     { "kind": "teleporter", "rect": { "x": 640, "y": 640, "w": 64, "h": 64 },
//!       "tpid": 1, "counterpart": 2, "side": 1, "amount": 3 }
//!   ]
//! }
//! ```
//!
//! Teleporter sides are encoded as `0` (left) and `1` (right).

use std::path::Path;

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::camera::CameraRig;
use crate::components::item::ItemKind;
use crate::components::spatial::{Facing, Rect, Spatial};
use crate::components::teleporter::PortalSide;
use crate::game::{
    spawn_goal, spawn_goal_trampoline, spawn_ladder, spawn_no_item_zone, spawn_pickup,
    spawn_platform, spawn_spawner, spawn_teleporter, spawn_trigger, spawn_wall,
};
use crate::resources::gameconfig::GameConfig;
use crate::resources::inventory::Inventory;
use crate::resources::viewport::Viewport;

fn default_amount() -> u32 {
    1
}

/// One static object of a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    Platform {
        rect: Rect,
        #[serde(default)]
        weak: bool,
    },
    Wall {
        rect: Rect,
    },
    Ladder {
        rect: Rect,
    },
    Teleporter {
        rect: Rect,
        tpid: u32,
        counterpart: u32,
        #[serde(default)]
        side: u32,
        amount: u32,
    },
    Trigger {
        rect: Rect,
        trigger_id: u32,
    },
    Pickup {
        rect: Rect,
        item_type: ItemKind,
        amount: u32,
    },
    Goal {
        rect: Rect,
    },
    GoalTrampoline {
        rect: Rect,
    },
    Spawner {
        x: f32,
        y: f32,
        #[serde(default = "default_amount")]
        amount: u32,
        #[serde(default)]
        spawn_free: bool,
        #[serde(default)]
        facing: Facing,
    },
    NoItemZone {
        rect: Rect,
    },
}

/// Create the entity described by `placement`.
pub fn spawn_placement(world: &mut World, placement: &Placement) -> Entity {
    match *placement {
        Placement::Platform { rect, weak } => spawn_platform(world, rect, weak),
        Placement::Wall { rect } => spawn_wall(world, rect),
        Placement::Ladder { rect } => spawn_ladder(world, rect),
        Placement::Teleporter {
            rect,
            tpid,
            counterpart,
            side,
            amount,
        } => spawn_teleporter(
            world,
            rect,
            tpid,
            counterpart,
            PortalSide::from_index(side),
            amount,
        ),
        Placement::Trigger { rect, trigger_id } => spawn_trigger(world, rect, trigger_id),
        Placement::Pickup {
            rect,
            item_type,
            amount,
        } => spawn_pickup(world, rect, item_type, amount),
        Placement::Goal { rect } => spawn_goal(world, rect),
        Placement::GoalTrampoline { rect } => spawn_goal_trampoline(world, rect),
        Placement::Spawner {
            x,
            y,
            amount,
            spawn_free,
            facing,
        } => spawn_spawner(world, Vec2::new(x, y), amount, spawn_free, facing),
        Placement::NoItemZone { rect } => spawn_no_item_zone(world, rect),
    }
}

/// Spawn every placement in order, returning the new entities.
pub fn spawn_level(world: &mut World, placements: &[Placement]) -> Vec<Entity> {
    placements
        .iter()
        .map(|placement| spawn_placement(world, placement))
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub map_width: Option<f32>,
    #[serde(default)]
    pub map_height: Option<f32>,
    /// Starting stock per tool.
    #[serde(default)]
    pub inventory: FxHashMap<ItemKind, u32>,
    pub placements: Vec<Placement>,
}

impl Level {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }

    /// Set up `world` for this level: map size, inventory, placements, and
    /// the camera at the bottom center of the map.
    pub fn apply(&self, world: &mut World) -> Vec<Entity> {
        {
            let mut config = world.resource_mut::<GameConfig>();
            if let Some(width) = self.map_width {
                config.map_width = width;
            }
            if let Some(height) = self.map_height {
                config.map_height = height;
            }
        }

        let mut inventory = Inventory::new();
        for (&kind, &amount) in &self.inventory {
            inventory.set(kind, amount);
        }
        world.insert_resource(inventory);

        let entities = spawn_level(world, &self.placements);

        let (map_width, map_height) = {
            let config = world.resource::<GameConfig>();
            (config.map_width, config.map_height)
        };
        let start = Vec2::new(world.resource::<Viewport>().rect.w / 2.0, map_height);
        let mut rigs = world.query_filtered::<&mut Spatial, With<CameraRig>>();
        for mut spatial in rigs.iter_mut(world) {
            spatial.set_pos(start);
        }
        world
            .resource_mut::<Viewport>()
            .center_on(start, Vec2::new(map_width, map_height));

        info!(
            "level '{}' loaded: {} placements, map {}x{}",
            self.name,
            entities.len(),
            map_width,
            map_height
        );
        entities
    }
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::new(x, y, w, h)
}

/// A small built-in level: a spawner over a long ledge that ends at a wall,
/// with the goal on a lower shelf past the ledge's far end.
pub fn demo_level() -> Level {
    let placements = vec![
        Placement::NoItemZone {
            rect: rect(64.0, 0.0, 192.0, 128.0),
        },
        Placement::Spawner {
            x: 96.0,
            y: 64.0,
            amount: 5,
            spawn_free: true,
            facing: Facing::Right,
        },
        Placement::Platform {
            rect: rect(64.0, 256.0, 960.0, 32.0),
            weak: false,
        },
        Placement::Wall {
            rect: rect(992.0, 160.0, 32.0, 96.0),
        },
        Placement::Pickup {
            rect: rect(512.0, 224.0, 32.0, 32.0),
            item_type: ItemKind::Umbrella,
            amount: 2,
        },
        Placement::Platform {
            rect: rect(0.0, 448.0, 192.0, 32.0),
            weak: false,
        },
        Placement::Wall {
            rect: rect(0.0, 352.0, 32.0, 96.0),
        },
        Placement::Goal {
            rect: rect(32.0, 384.0, 64.0, 64.0),
        },
        Placement::Platform {
            rect: rect(0.0, 704.0, 1344.0, 64.0),
            weak: false,
        },
    ];
    let mut inventory = FxHashMap::default();
    inventory.insert(ItemKind::Ladder, 4);
    inventory.insert(ItemKind::Umbrella, 1);
    inventory.insert(ItemKind::Tnt, 1);
    debug!("using the built-in demo level");
    Level {
        name: "demo".to_string(),
        map_width: Some(1344.0),
        map_height: Some(768.0),
        inventory,
        placements,
    }
}
