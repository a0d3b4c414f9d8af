//! Paired portals and the floor triggers that unlock them.
//!
//! A [`Teleporter`] walks `Begin -> Inactive -> Active -> Open`:
//! - `Begin` resolves its trigger and counterpart entities once, by id.
//! - `Inactive` waits for its [`Trigger`] to be stepped on.
//! - `Active` waits for the counterpart to be active or open.
//! - `Open` lets imprisoned derplings through and self-destructs once
//!   `count` reaches `quota`.

use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeleporterPhase {
    #[default]
    Begin,
    Inactive,
    Active,
    Open,
}

/// Side of the portal a derpling exits from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortalSide {
    #[default]
    Left,
    Right,
}

impl PortalSide {
    /// Level files encode the side as 0 (left) / 1 (right).
    pub fn from_index(index: u32) -> Self {
        if index == 0 {
            PortalSide::Left
        } else {
            PortalSide::Right
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Teleporter {
    /// Level id of this teleporter; also the id of the trigger that opens it.
    pub tpid: u32,
    /// Level id of the paired teleporter.
    pub counterpart_id: u32,
    pub side: PortalSide,
    /// Number of passes after which the portal closes for good.
    pub quota: u32,
    pub count: u32,
    pub phase: TeleporterPhase,
    pub counterpart: Option<Entity>,
    pub trigger: Option<Entity>,
}

impl Teleporter {
    pub fn new(tpid: u32, counterpart_id: u32, side: PortalSide, quota: u32) -> Self {
        Self {
            tpid,
            counterpart_id,
            side,
            quota,
            count: 0,
            phase: TeleporterPhase::Begin,
            counterpart: None,
            trigger: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase == TeleporterPhase::Open
    }

    /// Whether a counterpart in this phase lets an `Active` portal open.
    pub fn is_active_or_open(&self) -> bool {
        matches!(self.phase, TeleporterPhase::Active | TeleporterPhase::Open)
    }

    pub fn quota_reached(&self) -> bool {
        self.count >= self.quota
    }
}

/// Floor switch; a walking derpling overlapping it sets `active`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Trigger {
    pub tid: u32,
    pub active: bool,
}

impl Trigger {
    pub fn new(tid: u32) -> Self {
        Self { tid, active: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_teleporter_starts_in_begin_unresolved() {
        let tp = Teleporter::new(1, 2, PortalSide::Left, 3);
        assert_eq!(tp.phase, TeleporterPhase::Begin);
        assert!(tp.counterpart.is_none());
        assert!(tp.trigger.is_none());
        assert!(!tp.quota_reached());
    }

    #[test]
    fn side_index_decodes() {
        assert_eq!(PortalSide::from_index(0), PortalSide::Left);
        assert_eq!(PortalSide::from_index(1), PortalSide::Right);
    }

    #[test]
    fn quota_compares_count() {
        let mut tp = Teleporter::new(1, 2, PortalSide::Right, 1);
        tp.count = 1;
        assert!(tp.quota_reached());
    }
}
