//! Player item placement.
//!
//! These are the operations behind the pointer: pick a tool from the
//! inventory, drop it on the grid, cancel it, or take a placed one back.
//! They act on the [`World`] between ticks. A refused action is reported
//! through [`PlacementOutcome::Refused`]; only a ladder run cut short by a
//! no-item zone keeps the segments laid before the zone.
//!
//! Ladders take two placements. The first drops a single segment and
//! remembers it; the second, in the same column, fills the gap between the
//! two, paying one unit of stock per segment.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};
use smallvec::SmallVec;

use crate::components::animation::Animation;
use crate::components::derpling::{Derpling, Descending, OnLadder, Walking};
use crate::components::geometry::{Ladder, NoItemZone};
use crate::components::item::{Item, ItemKind};
use crate::components::mechanics::Tnt;
use crate::components::motion::{BallisticMotion, LinearMotion, Motion, Stopwatch};
use crate::components::spatial::Spatial;
use crate::components::sprite::Sprite;
use crate::game::item_bundle;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::inventory::Inventory;
use crate::resources::viewport::Viewport;
use crate::systems::item::{PLACED_ALPHA, snap};
use crate::systems::transitions::FALL_ANGLE;

/// Pending selection and the first end of a ladder run.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlacementState {
    pub selected: Option<Entity>,
    /// World tile of the first ladder segment, waiting for the second click.
    pub ladder_start: Option<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    NothingSelected,
    /// The tool exists in the inventory but cannot be used.
    Unavailable,
    OutOfStock,
    NoItemZone,
    Occupied,
    /// The second ladder click is not in the column of the first.
    LadderNotAligned,
    /// The ladder run needs more segments than the stock holds.
    NotEnoughStock,
    NoItemThere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    Selected(Entity),
    Placed(Entity),
    Removed(ItemKind),
    Cancelled,
    Refused(RefusalReason),
}

fn selection(world: &World) -> Option<Entity> {
    world
        .get_resource::<PlacementState>()
        .and_then(|state| state.selected)
        .filter(|&entity| world.get::<Item>(entity).is_some())
}

fn state_mut(world: &mut World) -> Mut<'_, PlacementState> {
    world.get_resource_or_insert_with(PlacementState::default)
}

/// Take `kind` into the pointer. An existing selection is re-typed.
pub fn select_item(world: &mut World, kind: ItemKind) -> PlacementOutcome {
    if kind == ItemKind::Rocket {
        return PlacementOutcome::Refused(RefusalReason::Unavailable);
    }
    if world.resource::<Inventory>().count(kind) == 0 {
        debug!("no {} left to select", kind.name());
        return PlacementOutcome::Refused(RefusalReason::OutOfStock);
    }

    let grid = world.resource::<GameConfig>().grid_size;
    let at = snap(world.resource::<InputState>().pointer, grid);
    let entity = match selection(world) {
        Some(entity) => {
            world.entity_mut(entity).insert(item_bundle(kind, at, grid));
            entity
        }
        None => world.spawn(item_bundle(kind, at, grid)).id(),
    };

    let mut state = state_mut(world);
    state.selected = Some(entity);
    if kind != ItemKind::Ladder {
        state.ladder_start = None;
    }
    debug!("selected {} as {entity}", kind.name());
    PlacementOutcome::Selected(entity)
}

fn in_no_item_zone(world: &mut World, point: Vec2) -> bool {
    world
        .query_filtered::<&Spatial, With<NoItemZone>>()
        .iter(world)
        .any(|spatial| spatial.rect().contains_point(point))
}

/// World grid tile under the screen grid tile holding `screen_pos`.
fn world_tile(world: &World, screen_pos: Vec2, grid: f32) -> Vec2 {
    let tile = snap(screen_pos, grid);
    snap(world.resource::<Viewport>().to_world(tile), grid)
}

/// Placed (or about to be placed) item whose tile holds the world `point`.
fn placed_item_at(world: &mut World, point: Vec2) -> Option<(Entity, ItemKind)> {
    world
        .query::<(Entity, &Item, &Spatial)>()
        .iter(world)
        .find(|(_, item, spatial)| {
            (item.is_active() || item.should_activate) && spatial.rect().contains_point(point)
        })
        .map(|(entity, item, _)| (entity, item.kind))
}

/// Drop the selected item on the tile under `screen_pos`.
pub fn place_selected(world: &mut World, screen_pos: Vec2) -> PlacementOutcome {
    let Some(selected) = selection(world) else {
        return PlacementOutcome::Refused(RefusalReason::NothingSelected);
    };
    let Some(kind) = world.get::<Item>(selected).map(|item| item.kind) else {
        return PlacementOutcome::Refused(RefusalReason::NothingSelected);
    };

    let (grid, fuse_ms) = {
        let config = world.resource::<GameConfig>();
        (config.grid_size, config.tnt_fuse_ms)
    };
    let at = world_tile(world, screen_pos, grid);

    if in_no_item_zone(world, at) {
        return PlacementOutcome::Refused(RefusalReason::NoItemZone);
    }
    if placed_item_at(world, at).is_some() {
        return PlacementOutcome::Refused(RefusalReason::Occupied);
    }

    match kind {
        ItemKind::Tnt => {
            world
                .entity_mut(selected)
                .insert((Tnt::new(fuse_ms), Stopwatch::default()));
        }
        ItemKind::Ladder => {
            match world.resource::<PlacementState>().ladder_start {
                Some(start) => {
                    if let Err(reason) = build_ladder_run(world, start, at, grid) {
                        return PlacementOutcome::Refused(reason);
                    }
                }
                None => state_mut(world).ladder_start = Some(at),
            }
            world.entity_mut(selected).insert(Ladder::default());
        }
        _ => {}
    }

    if let Some(mut spatial) = world.get_mut::<Spatial>(selected) {
        spatial.set_pos(at);
    }
    if let Some(mut item) = world.get_mut::<Item>(selected) {
        item.should_activate = true;
    }
    let mut inventory = world.resource_mut::<Inventory>();
    inventory.take(kind, 1);
    let remaining = inventory.count(kind);
    state_mut(world).selected = None;
    info!("placed {} at {at:?}, {remaining} left", kind.name());

    if remaining > 0 {
        select_item(world, kind);
    }
    PlacementOutcome::Placed(selected)
}

/// Fill the column strictly between `start` and `end` with ladder segments.
fn build_ladder_run(
    world: &mut World,
    start: Vec2,
    end: Vec2,
    grid: f32,
) -> Result<(), RefusalReason> {
    if start.x != end.x {
        return Err(RefusalReason::LadderNotAligned);
    }
    let steps = ((end.y - start.y).abs() / grid).round() as u32;
    if steps > world.resource::<Inventory>().count(ItemKind::Ladder) {
        return Err(RefusalReason::NotEnoughStock);
    }

    let step = if end.y < start.y { -grid } else { grid };
    for i in 1..steps {
        let at = Vec2::new(start.x, start.y + step * i as f32);
        if in_no_item_zone(world, at) {
            state_mut(world).ladder_start = None;
            return Err(RefusalReason::NoItemZone);
        }
        let mut sprite = Sprite::new(ItemKind::Ladder.name());
        sprite.alpha = PLACED_ALPHA;
        world.spawn((
            Ladder::default(),
            Item::active(ItemKind::Ladder),
            Spatial::new(at.x, at.y, grid, grid),
            sprite,
        ));
        world.resource_mut::<Inventory>().take(ItemKind::Ladder, 1);
    }
    state_mut(world).ladder_start = None;
    debug!("ladder run from {start:?} to {end:?}, {steps} segments");
    Ok(())
}

/// Discard the pending item and any half-built ladder.
pub fn cancel_selection(world: &mut World) -> PlacementOutcome {
    if let Some(selected) = selection(world) {
        world.despawn(selected);
    }
    *state_mut(world) = PlacementState::default();
    PlacementOutcome::Cancelled
}

/// Take back the placed item under `screen_pos`, refunding it.
pub fn pick_up_item_at(world: &mut World, screen_pos: Vec2) -> PlacementOutcome {
    let (grid, lift, fall_speed) = {
        let config = world.resource::<GameConfig>();
        (config.grid_size, config.ladder_exit_lift, config.fall_speed)
    };
    let point = world_tile(world, screen_pos, grid);
    let Some((item, kind)) = placed_item_at(world, point) else {
        return PlacementOutcome::Refused(RefusalReason::NoItemThere);
    };

    let climbers: SmallVec<[Entity; 8]> = world
        .query::<(Entity, &Derpling)>()
        .iter(world)
        .filter(|(_, derpling)| derpling.attached_ladder == Some(item))
        .map(|(entity, _)| entity)
        .collect();
    for climber in climbers {
        drop_from_ladder(world, climber, lift, fall_speed);
    }

    world.resource_mut::<Inventory>().add(kind, 1);
    world.despawn(item);
    info!("picked up {} {item}", kind.name());
    PlacementOutcome::Removed(kind)
}

fn drop_from_ladder(world: &mut World, entity: Entity, lift: f32, fall_speed: f32) {
    let mut climber = world.entity_mut(entity);
    climber
        .remove::<(Walking, OnLadder, BallisticMotion)>()
        .insert((Descending, LinearMotion, Stopwatch::default()));
    if let Some(mut spatial) = climber.get_mut::<Spatial>() {
        let pos = spatial.pos();
        spatial.set_pos(Vec2::new(pos.x, pos.y - lift));
    }
    if let Some(mut derpling) = climber.get_mut::<Derpling>() {
        derpling.attached_ladder = None;
        derpling.attached_platform = None;
    }
    if let Some(mut motion) = climber.get_mut::<Motion>() {
        motion.angle = FALL_ANGLE;
        motion.magnitude = fall_speed;
    }
    if let Some(mut anim) = climber.get_mut::<Animation>() {
        anim.change_animation("fall");
    }
    debug!("derpling {entity} lost its ladder");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::spatial::Rect;
    use crate::game::{build_world, spawn_no_item_zone};

    fn world_with(kind: ItemKind, amount: u32) -> World {
        let mut world = build_world(GameConfig::new());
        world.insert_resource(Inventory::new().with(kind, amount));
        world
    }

    fn ladders(world: &mut World) -> Vec<Vec2> {
        let mut tops: Vec<Vec2> = world
            .query_filtered::<&Spatial, With<Ladder>>()
            .iter(world)
            .map(|s| s.pos())
            .collect();
        tops.sort_by(|a, b| a.y.total_cmp(&b.y));
        tops
    }

    #[test]
    fn rocket_and_empty_slots_cannot_be_selected() {
        let mut world = world_with(ItemKind::Rocket, 3);
        assert_eq!(
            select_item(&mut world, ItemKind::Rocket),
            PlacementOutcome::Refused(RefusalReason::Unavailable)
        );
        assert_eq!(
            select_item(&mut world, ItemKind::Umbrella),
            PlacementOutcome::Refused(RefusalReason::OutOfStock)
        );
        assert!(world.resource::<PlacementState>().selected.is_none());
    }

    #[test]
    fn reselecting_retypes_the_pending_item() {
        let mut world = world_with(ItemKind::Umbrella, 1);
        world.resource_mut::<Inventory>().set(ItemKind::Trampoline, 1);
        world.resource_mut::<InputState>().pointer = Vec2::new(40.0, 70.0);
        let PlacementOutcome::Selected(first) = select_item(&mut world, ItemKind::Umbrella) else {
            panic!("umbrella should be selectable");
        };
        assert_eq!(world.get::<Spatial>(first).unwrap().pos(), Vec2::new(32.0, 64.0));
        let second = select_item(&mut world, ItemKind::Trampoline);
        assert_eq!(second, PlacementOutcome::Selected(first));
        assert_eq!(world.get::<Item>(first).unwrap().kind, ItemKind::Trampoline);
        assert_eq!(world.query::<&Item>().iter(&world).count(), 1);
    }

    #[test]
    fn placing_pays_stock_and_selects_the_next_one() {
        let mut world = world_with(ItemKind::Umbrella, 2);
        select_item(&mut world, ItemKind::Umbrella);
        let PlacementOutcome::Placed(placed) = place_selected(&mut world, Vec2::new(100.0, 200.0))
        else {
            panic!("placement should succeed");
        };
        let item = world.get::<Item>(placed).unwrap();
        assert!(item.should_activate);
        assert_eq!(world.get::<Spatial>(placed).unwrap().pos(), Vec2::new(96.0, 192.0));
        assert_eq!(world.resource::<Inventory>().count(ItemKind::Umbrella), 1);
        let next = world.resource::<PlacementState>().selected;
        assert!(next.is_some_and(|e| e != placed));

        place_selected(&mut world, Vec2::new(300.0, 200.0));
        assert_eq!(world.resource::<Inventory>().count(ItemKind::Umbrella), 0);
        assert!(world.resource::<PlacementState>().selected.is_none());
        assert_eq!(
            place_selected(&mut world, Vec2::new(400.0, 200.0)),
            PlacementOutcome::Refused(RefusalReason::NothingSelected)
        );
    }

    #[test]
    fn no_item_zones_and_occupied_tiles_refuse() {
        let mut world = world_with(ItemKind::StopSign, 5);
        spawn_no_item_zone(&mut world, Rect::new(0.0, 0.0, 128.0, 128.0));
        world.spawn((
            Item::active(ItemKind::Trampoline),
            Spatial::new(320.0, 320.0, 32.0, 32.0),
        ));
        select_item(&mut world, ItemKind::StopSign);
        assert_eq!(
            place_selected(&mut world, Vec2::new(10.0, 10.0)),
            PlacementOutcome::Refused(RefusalReason::NoItemZone)
        );
        assert_eq!(
            place_selected(&mut world, Vec2::new(330.0, 340.0)),
            PlacementOutcome::Refused(RefusalReason::Occupied)
        );
        assert_eq!(world.resource::<Inventory>().count(ItemKind::StopSign), 5);
    }

    #[test]
    fn placements_before_a_tick_share_world_coordinates() {
        let mut world = world_with(ItemKind::StopSign, 2);
        world.resource_mut::<Viewport>().rect.y = 320.0;
        select_item(&mut world, ItemKind::StopSign);
        let PlacementOutcome::Placed(first) = place_selected(&mut world, Vec2::new(100.0, 100.0))
        else {
            panic!("first stop sign should be placed");
        };
        assert_eq!(world.get::<Spatial>(first).unwrap().pos(), Vec2::new(96.0, 416.0));
        assert_eq!(
            place_selected(&mut world, Vec2::new(110.0, 120.0)),
            PlacementOutcome::Refused(RefusalReason::Occupied)
        );
        assert_eq!(world.resource::<Inventory>().count(ItemKind::StopSign), 1);

        let mut schedule = Schedule::default();
        schedule.add_systems(crate::systems::item::item_system);
        schedule.run(&mut world);
        let item = world.get::<Item>(first).unwrap();
        assert!(item.is_active());
        assert_eq!(world.get::<Spatial>(first).unwrap().pos(), Vec2::new(96.0, 416.0));
        assert_eq!(
            pick_up_item_at(&mut world, Vec2::new(100.0, 100.0)),
            PlacementOutcome::Removed(ItemKind::StopSign)
        );
    }

    #[test]
    fn tnt_starts_its_fuse_when_placed() {
        let mut world = world_with(ItemKind::Tnt, 1);
        select_item(&mut world, ItemKind::Tnt);
        let PlacementOutcome::Placed(tnt) = place_selected(&mut world, Vec2::new(64.0, 64.0)) else {
            panic!("tnt should be placed");
        };
        assert_eq!(world.get::<Tnt>(tnt).unwrap().fuse_ms, 3000);
        assert_eq!(world.get::<Stopwatch>(tnt).unwrap().elapsed_ms, 0);
    }

    #[test]
    fn ladder_run_fills_the_column_between_two_clicks() {
        let mut world = world_with(ItemKind::Ladder, 4);
        select_item(&mut world, ItemKind::Ladder);
        assert!(matches!(
            place_selected(&mut world, Vec2::new(70.0, 260.0)),
            PlacementOutcome::Placed(_)
        ));
        assert_eq!(
            world.resource::<PlacementState>().ladder_start,
            Some(Vec2::new(64.0, 256.0))
        );
        assert_eq!(
            place_selected(&mut world, Vec2::new(100.0, 160.0)),
            PlacementOutcome::Refused(RefusalReason::LadderNotAligned)
        );

        assert!(matches!(
            place_selected(&mut world, Vec2::new(70.0, 170.0)),
            PlacementOutcome::Placed(_)
        ));
        assert_eq!(
            ladders(&mut world),
            vec![
                Vec2::new(64.0, 160.0),
                Vec2::new(64.0, 192.0),
                Vec2::new(64.0, 224.0),
                Vec2::new(64.0, 256.0),
            ]
        );
        assert_eq!(world.resource::<Inventory>().count(ItemKind::Ladder), 0);
        assert!(world.resource::<PlacementState>().ladder_start.is_none());
    }

    #[test]
    fn ladder_run_longer_than_stock_is_refused() {
        let mut world = world_with(ItemKind::Ladder, 3);
        select_item(&mut world, ItemKind::Ladder);
        place_selected(&mut world, Vec2::new(64.0, 320.0));
        assert_eq!(
            place_selected(&mut world, Vec2::new(64.0, 160.0)),
            PlacementOutcome::Refused(RefusalReason::NotEnoughStock)
        );
        assert_eq!(world.resource::<Inventory>().count(ItemKind::Ladder), 2);
        assert_eq!(ladders(&mut world).len(), 1);
    }

    #[test]
    fn cancel_discards_the_pending_item() {
        let mut world = world_with(ItemKind::Jetpack, 1);
        let PlacementOutcome::Selected(pending) = select_item(&mut world, ItemKind::Jetpack) else {
            panic!("jetpack should be selectable");
        };
        assert_eq!(cancel_selection(&mut world), PlacementOutcome::Cancelled);
        assert!(world.get_entity(pending).is_err());
        assert_eq!(world.resource::<Inventory>().count(ItemKind::Jetpack), 1);
    }

    #[test]
    fn picking_up_a_ladder_drops_its_climber() {
        let mut world = world_with(ItemKind::Ladder, 0);
        let ladder = world
            .spawn((
                Item::active(ItemKind::Ladder),
                Ladder { in_use: true },
                Spatial::new(64.0, 160.0, 32.0, 32.0),
            ))
            .id();
        let derpling = Derpling {
            attached_ladder: Some(ladder),
            ..Derpling::new(false)
        };
        let climber = world
            .spawn((
                derpling,
                OnLadder,
                Spatial::new(64.0, 130.0, 32.0, 64.0),
                Motion::new(270.0, 175.0),
                LinearMotion,
                Animation::new("climb"),
            ))
            .id();

        assert_eq!(
            pick_up_item_at(&mut world, Vec2::new(70.0, 170.0)),
            PlacementOutcome::Removed(ItemKind::Ladder)
        );
        assert!(world.get_entity(ladder).is_err());
        assert_eq!(world.resource::<Inventory>().count(ItemKind::Ladder), 1);

        let climber = world.entity(climber);
        assert!(climber.contains::<Descending>());
        assert!(!climber.contains::<OnLadder>());
        assert!(climber.get::<Derpling>().unwrap().attached_ladder.is_none());
        assert_eq!(climber.get::<Spatial>().unwrap().pos().y, 120.0);
        assert_eq!(climber.get::<Motion>().unwrap().angle, 90.0);
        assert_eq!(climber.get::<Animation>().unwrap().anim_set, "fall");

        assert_eq!(
            pick_up_item_at(&mut world, Vec2::new(70.0, 170.0)),
            PlacementOutcome::Refused(RefusalReason::NoItemThere)
        );
    }
}
