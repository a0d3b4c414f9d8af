//! Walking derplings and everything they can bump into.
//!
//! Each walking derpling runs through its checks in a fixed order and stops at
//! the first one that changes something:
//!
//! 1. pickups refill the inventory
//! 2. walking off the end of its platform (not while grown)
//! 3. walls turn it around
//! 4. ladders start a climb
//! 5. triggers fire
//! 6. open teleporters move imprisoned derplings to their counterpart
//! 7. placed items (umbrella, stop sign, trampoline, jetpack, inflator, deflator)
//! 8. the goal
//!
//! Touching something that has no effect (an already fired trigger, a second
//! umbrella) does not stop the checks.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use glam::Vec2;
use log::{debug, info};
use smallvec::SmallVec;

use crate::components::animation::Animation;
use crate::components::derpling::{
    Derpling, Grown, OnLadder, ReachedGoal, Shrunk, Walking,
};
use crate::components::geometry::{Goal, Ladder, Platform, Wall};
use crate::components::item::{Item, ItemKind, Pickup};
use crate::components::motion::Motion;
use crate::components::particle::{ParticleEffect, ParticleGenerator};
use crate::components::spatial::{Facing, Rect, Spatial};
use crate::components::teleporter::{PortalSide, Teleporter, Trigger};
use crate::events::audio::{AudioCmd, cue};
use crate::resources::gameconfig::GameConfig;
use crate::resources::inventory::Inventory;
use crate::systems::transitions::{
    CLIMB_ANGLE, begin_arc, begin_fall, bounce_off, resize_keep_bottom,
};

pub const TRAMPOLINE_ANGLE: f32 = 60.0;
pub const TRAMPOLINE_POWER: f32 = 1600.0;
pub const JETPACK_ANGLE: f32 = 85.0;
pub const JETPACK_POWER: f32 = 3000.0;

/// Level geometry and shared state a walking derpling interacts with.
#[derive(SystemParam)]
pub struct WalkingWorld<'w, 's> {
    pub platforms: Query<'w, 's, (Entity, &'static Spatial), (With<Platform>, Without<Derpling>)>,
    pub walls: Query<'w, 's, &'static Spatial, (With<Wall>, Without<Derpling>)>,
    pub ladders: Query<'w, 's, (Entity, &'static Spatial, &'static mut Ladder), Without<Derpling>>,
    pub triggers: Query<'w, 's, (&'static Spatial, &'static mut Trigger), Without<Derpling>>,
    pub teleporters:
        Query<'w, 's, (Entity, &'static Spatial, &'static mut Teleporter), Without<Derpling>>,
    pub items: Query<'w, 's, (Entity, &'static Spatial, &'static Item), Without<Derpling>>,
    pub pickups: Query<'w, 's, (Entity, &'static Spatial, &'static Pickup), Without<Derpling>>,
    pub goals: Query<'w, 's, &'static Spatial, (With<Goal>, Without<Derpling>)>,
    pub inventory: ResMut<'w, Inventory>,
    pub config: Res<'w, GameConfig>,
    pub audio: MessageWriter<'w, AudioCmd>,
    pub commands: Commands<'w, 's>,
}

/// One walking derpling's components for the duration of its checks.
pub struct Walker<'a> {
    pub entity: Entity,
    pub spatial: Mut<'a, Spatial>,
    pub derpling: Mut<'a, Derpling>,
    pub motion: Mut<'a, Motion>,
    pub anim: Mut<'a, Animation>,
    pub grown: bool,
    pub at_goal: bool,
}

type WalkerData<'a> = (
    Entity,
    &'a mut Spatial,
    &'a mut Derpling,
    &'a mut Motion,
    &'a mut Animation,
    Has<Grown>,
    Has<ReachedGoal>,
);

pub fn walking_system(mut walkers: Query<WalkerData, With<Walking>>, mut world: WalkingWorld) {
    let mut consumed: SmallVec<[Entity; 4]> = SmallVec::new();
    for (entity, spatial, derpling, motion, anim, grown, at_goal) in walkers.iter_mut() {
        let mut walker = Walker {
            entity,
            spatial,
            derpling,
            motion,
            anim,
            grown,
            at_goal,
        };
        let _ = world.pickup(&mut walker, &mut consumed)
            || world.walk_off(&mut walker)
            || world.wall(&mut walker)
            || world.ladder(&mut walker)
            || world.trigger(&mut walker)
            || world.teleporter(&mut walker)
            || world.item(&mut walker, &mut consumed)
            || world.goal(&mut walker);
    }
}

impl WalkingWorld<'_, '_> {
    fn pickup(&mut self, w: &mut Walker, consumed: &mut SmallVec<[Entity; 4]>) -> bool {
        let rect = w.spatial.rect();
        let mut picked = false;
        for (entity, spatial, pickup) in self.pickups.iter() {
            if consumed.contains(&entity) || !spatial.rect().overlaps(&rect) {
                continue;
            }
            self.inventory.set(pickup.kind, pickup.amount);
            self.commands.entity(entity).despawn();
            consumed.push(entity);
            picked = true;
            info!(
                "derpling {} picked up {} x{}",
                w.entity,
                pickup.kind.name(),
                pickup.amount
            );
        }
        picked
    }

    fn walk_off(&mut self, w: &mut Walker) -> bool {
        let platform = w
            .derpling
            .attached_platform
            .and_then(|p| self.platforms.get(p).ok())
            .map(|(_, s)| s.rect());
        let off = match platform {
            Some(p) => {
                let rect = w.spatial.rect();
                (rect.left() > p.right() || rect.right() < p.left()) && !w.grown
            }
            None => true,
        };
        if !off {
            return false;
        }
        let speed = if w.derpling.has_umbrella {
            self.config.umbrella_speed
        } else {
            self.config.fall_speed
        };
        debug!("derpling {} walked off its platform", w.entity);
        begin_fall(
            &mut self.commands,
            w.entity,
            &mut w.derpling,
            &mut w.motion,
            &mut w.anim,
            speed,
        );
        true
    }

    fn wall(&mut self, w: &mut Walker) -> bool {
        let rect = w.spatial.rect();
        let Some(wall) = self.walls.iter().map(|s| s.rect()).find(|r| r.overlaps(&rect)) else {
            return false;
        };
        bounce_off(&mut w.spatial, &mut w.motion, &mut w.anim, wall);
        w.derpling.last_facing_direction = w.spatial.facing;
        true
    }

    fn ladder(&mut self, w: &mut Walker) -> bool {
        let rect = w.spatial.rect();
        let Some((ladder, ladder_rect, mut segment)) = self
            .ladders
            .iter_mut()
            .find(|(_, s, _)| s.rect().overlaps(&rect))
            .map(|(e, s, l)| (e, s.rect(), l))
        else {
            return false;
        };
        segment.in_use = true;
        self.commands
            .entity(w.entity)
            .remove::<Walking>()
            .insert(OnLadder);
        w.derpling.attached_platform = None;
        w.derpling.attached_ladder = Some(ladder);
        w.motion.angle = CLIMB_ANGLE;
        w.motion.magnitude = self.config.walk_speed;
        w.spatial.set_pos(Vec2::new(ladder_rect.left(), rect.y));
        w.anim.change_animation("climb");
        debug!("derpling {} climbs ladder {ladder}", w.entity);
        true
    }

    fn trigger(&mut self, w: &mut Walker) -> bool {
        let rect = w.spatial.rect();
        let mut fired = false;
        for (spatial, mut trigger) in self.triggers.iter_mut() {
            if !trigger.active && spatial.rect().overlaps(&rect) {
                trigger.active = true;
                fired = true;
                info!("trigger {} fired by derpling {}", trigger.tid, w.entity);
            }
        }
        fired
    }

    fn teleporter(&mut self, w: &mut Walker) -> bool {
        if !w.derpling.imprisoned {
            return false;
        }
        let rect = w.spatial.rect();
        let Some((portal, counterpart)) = self
            .teleporters
            .iter()
            .filter(|(_, s, tp)| tp.is_open() && s.rect().overlaps(&rect))
            .find_map(|(e, _, tp)| tp.counterpart.filter(|c| *c != e).map(|c| (e, c)))
        else {
            return false;
        };
        let Ok([(_, _, mut entry), (_, exit_spatial, mut exit)]) =
            self.teleporters.get_many_mut([portal, counterpart])
        else {
            return false;
        };
        entry.count += 1;
        exit.count += 1;

        let exit_rect = exit_spatial.rect();
        let x = match exit.side {
            PortalSide::Right => exit_rect.right(),
            PortalSide::Left => exit_rect.left() - rect.w,
        };
        w.spatial.set_pos(Vec2::new(x, exit_rect.top()));
        if exit.side == entry.side {
            let facing = w.spatial.facing.flipped();
            w.spatial.facing = facing;
            w.derpling.last_facing_direction = facing;
            w.anim.mirror = facing == Facing::Left;
        }
        w.derpling.imprisoned = false;
        info!(
            "derpling {} teleported from {} to {}",
            w.entity, entry.tpid, exit.tpid
        );
        begin_fall(
            &mut self.commands,
            w.entity,
            &mut w.derpling,
            &mut w.motion,
            &mut w.anim,
            self.config.fall_speed,
        );
        true
    }

    fn item(&mut self, w: &mut Walker, consumed: &mut SmallVec<[Entity; 4]>) -> bool {
        let rect = w.spatial.rect();
        let touching: SmallVec<[(Entity, Rect, ItemKind); 4]> = self
            .items
            .iter()
            .filter(|(e, s, item)| {
                item.is_active() && !consumed.contains(e) && s.rect().overlaps(&rect)
            })
            .map(|(e, s, item)| (e, s.rect(), item.kind))
            .collect();

        for (item, item_rect, kind) in touching {
            let applied = match kind {
                ItemKind::Umbrella if !w.derpling.has_umbrella => {
                    w.derpling.has_umbrella = true;
                    true
                }
                ItemKind::StopSign => {
                    bounce_off(&mut w.spatial, &mut w.motion, &mut w.anim, item_rect);
                    w.derpling.last_facing_direction = w.spatial.facing;
                    true
                }
                ItemKind::Trampoline => {
                    self.launch(w, TRAMPOLINE_ANGLE, TRAMPOLINE_POWER, false);
                    self.audio.write(AudioCmd::fx(cue::BOING));
                    true
                }
                ItemKind::Jetpack => {
                    self.launch(w, JETPACK_ANGLE, JETPACK_POWER, true);
                    self.audio.write(AudioCmd::fx(cue::WIND));
                    self.commands.spawn(ParticleGenerator::effect(
                        ParticleEffect::Smoke,
                        w.spatial.pos(),
                    ));
                    true
                }
                ItemKind::Inflator | ItemKind::Deflator => {
                    self.resize(w, item, kind);
                    consumed.push(item);
                    true
                }
                _ => false,
            };
            if applied {
                debug!("derpling {} used {}", w.entity, kind.name());
                return true;
            }
        }
        false
    }

    fn launch(&mut self, w: &mut Walker, angle: f32, power: f32, jetpack: bool) {
        begin_arc(
            &mut self.commands,
            w.entity,
            &mut w.derpling,
            &mut w.motion,
            &mut w.anim,
            angle,
            power,
            jetpack,
        );
    }

    fn resize(&mut self, w: &mut Walker, item: Entity, kind: ItemKind) {
        let inflate = kind == ItemKind::Inflator;
        let factor = if inflate { 2.0 } else { 0.5 };
        let (width, height) = (
            self.config.derpling_width * factor,
            self.config.derpling_height * factor,
        );
        let platform_top = w
            .derpling
            .attached_platform
            .and_then(|p| self.platforms.get(p).ok())
            .map(|(_, s)| s.rect().top());
        match platform_top {
            Some(top) => {
                let x = w.spatial.pos().x;
                w.spatial.set_size(width, height);
                w.spatial.set_pos(Vec2::new(x, top - height));
            }
            None => resize_keep_bottom(&mut w.spatial, width, height),
        }

        let mut entity = self.commands.entity(w.entity);
        if inflate {
            entity.remove::<Shrunk>().insert(Grown::default());
            self.audio.write(AudioCmd::fx(cue::INFLATE));
        } else {
            entity.remove::<Grown>().insert(Shrunk::default());
            self.audio.write(AudioCmd::fx(cue::DEFLATE));
        }
        self.commands.entity(item).despawn();
        w.anim.change_animation(kind.name());
    }

    fn goal(&mut self, w: &mut Walker) -> bool {
        if w.at_goal {
            return false;
        }
        let rect = w.spatial.rect();
        if !self.goals.iter().any(|g| g.rect().overlaps(&rect)) {
            return false;
        }
        self.commands.entity(w.entity).insert(ReachedGoal);
        w.at_goal = true;
        debug!("derpling {} reached the goal", w.entity);
        true
    }
}
