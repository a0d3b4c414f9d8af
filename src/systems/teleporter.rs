//! Teleporter lifecycle.
//!
//! Each portal walks `Begin -> Inactive -> Active -> Open`:
//! - `Begin` resolves its trigger and counterpart once, by id.
//! - `Inactive` waits for its trigger to fire and swaps to the active icon.
//! - `Active` opens as soon as the counterpart is active or open.
//! - `Open` despawns the portal once its quota of transfers is used up.
//!
//! Phases are read from a snapshot taken at the start of the pass, so a pair
//! opening in the same tick does not depend on iteration order beyond one
//! tick of latency.

use bevy_ecs::prelude::*;
use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::components::sprite::Sprite;
use crate::components::teleporter::{Teleporter, TeleporterPhase, Trigger};

pub const PORTAL_ACTIVE_ICON: &str = "portal_active";
pub const PORTAL_INACTIVE_ICON: &str = "portal_inactive";

pub fn teleporter_system(
    mut teleporters: Query<(Entity, &mut Teleporter, Option<&mut Sprite>)>,
    triggers: Query<(Entity, &Trigger)>,
    mut commands: Commands,
) {
    let snapshot: SmallVec<[(Entity, u32, TeleporterPhase); 8]> = teleporters
        .iter()
        .map(|(e, tp, _)| (e, tp.tpid, tp.phase))
        .collect();

    for (entity, mut tp, sprite) in teleporters.iter_mut() {
        match tp.phase {
            TeleporterPhase::Begin => {
                let (own_id, counterpart_id) = (tp.tpid, tp.counterpart_id);
                tp.trigger = triggers
                    .iter()
                    .filter(|(_, trigger)| trigger.tid == own_id)
                    .map(|(e, _)| e)
                    .last();
                tp.counterpart = snapshot
                    .iter()
                    .filter(|(_, tpid, _)| *tpid == counterpart_id)
                    .map(|(e, _, _)| *e)
                    .last();
                if tp.trigger.is_none() || tp.counterpart.is_none() {
                    warn!(
                        "teleporter {} is missing its trigger or counterpart {}",
                        tp.tpid, tp.counterpart_id
                    );
                }
                tp.phase = TeleporterPhase::Inactive;
            }
            TeleporterPhase::Inactive => {
                let fired = tp
                    .trigger
                    .and_then(|t| triggers.get(t).ok())
                    .is_some_and(|(_, trigger)| trigger.active);
                if fired {
                    tp.phase = TeleporterPhase::Active;
                    if let Some(mut sprite) = sprite {
                        sprite.set_icon(PORTAL_ACTIVE_ICON);
                    }
                    debug!("teleporter {} active", tp.tpid);
                }
            }
            TeleporterPhase::Active => {
                let counterpart_ready = tp.counterpart.is_some_and(|c| {
                    snapshot.iter().any(|(e, _, phase)| {
                        *e == c
                            && matches!(phase, TeleporterPhase::Active | TeleporterPhase::Open)
                    })
                });
                if counterpart_ready {
                    tp.phase = TeleporterPhase::Open;
                    debug!("teleporter {} open", tp.tpid);
                }
            }
            TeleporterPhase::Open => {
                if tp.quota_reached() {
                    info!(
                        "teleporter {} closed after {} transfers",
                        tp.tpid, tp.count
                    );
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}
