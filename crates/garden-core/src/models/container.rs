//! Gardens, containers and their slot grids.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ContainerKind, Location};

/// A grower's garden: a named group of containers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Garden {
    pub id: u64,
    pub user: String,
    pub name: String,
    /// Retired gardens are skipped by full reconciliation passes
    #[serde(default)]
    pub retired: bool,
}

/// Occupant of a slot position.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotEntry {
    pub plant_id: Option<u64>,
    pub plant_instance_id: Option<u64>,
}

/// A slot and its optional companion sub-slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    #[serde(flatten)]
    pub entry: SlotEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_slot: Option<SlotEntry>,
}

/// A bed, pot or seed tray holding slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Container {
    pub id: u64,
    pub garden_id: u64,
    pub name: String,
    pub kind: ContainerKind,
    #[serde(default)]
    pub archived: bool,
    pub rows: u32,
    pub columns: u32,
    /// Sparse slot map keyed by slot index
    #[serde(default)]
    pub slots: BTreeMap<u32, Slot>,
}

impl Container {
    /// Coordinates of a slot in this container.
    pub fn location(&self, slot: u32, sub_slot: bool) -> Location {
        Location::new(self.id, slot, sub_slot)
    }

    /// Number of addressable slot indices.
    pub fn capacity(&self) -> u32 {
        self.rows.saturating_mul(self.columns)
    }

    /// Looks up the occupant at a location, if the location is in this
    /// container.
    pub fn entry(&self, location: &Location) -> Option<&SlotEntry> {
        if location.container_id != self.id {
            return None;
        }
        let slot = self.slots.get(&location.slot)?;
        if location.sub_slot {
            slot.sub_slot.as_ref()
        } else {
            Some(&slot.entry)
        }
    }

    /// Links an occupant into a slot position, replacing any previous one.
    pub fn link(&mut self, location: &Location, entry: SlotEntry) {
        let slot = self.slots.entry(location.slot).or_default();
        if location.sub_slot {
            slot.sub_slot = Some(entry);
        } else {
            slot.entry = entry;
        }
    }

    /// Empties a slot position and returns what was there.
    pub fn unlink(&mut self, location: &Location) -> Option<SlotEntry> {
        let slot = self.slots.get_mut(&location.slot)?;
        let entry = if location.sub_slot {
            slot.sub_slot.take()
        } else {
            Some(std::mem::take(&mut slot.entry))
        };
        if slot.entry == SlotEntry::default() && slot.sub_slot.is_none() {
            self.slots.remove(&location.slot);
        }
        entry.filter(|e| *e != SlotEntry::default())
    }

    /// Every slot and sub-slot that links a plant instance, in slot order.
    pub fn occupied(&self) -> Vec<(Location, &SlotEntry)> {
        let mut occupied = Vec::new();
        for (index, slot) in &self.slots {
            if slot.entry.plant_instance_id.is_some() {
                occupied.push((self.location(*index, false), &slot.entry));
            }
            if let Some(sub) = slot.sub_slot.as_ref() {
                if sub.plant_instance_id.is_some() {
                    occupied.push((self.location(*index, true), sub));
                }
            }
        }
        occupied
    }
}
