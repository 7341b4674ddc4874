//! Garden, container and slot operations.

use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension};

use super::utils::{id_column, optional_id_column, parse_column};
use crate::{
    error::{DatabaseResultExt, GardenError, Result},
    models::{Container, ContainerKind, Garden, Location, Slot, SlotEntry},
    store::{ContainerStore, GardenStore},
};

const INSERT_GARDEN_SQL: &str = "INSERT INTO gardens (user, name, retired) VALUES (?1, ?2, 0)";
const SELECT_GARDEN_SQL: &str = "SELECT id, user, name, retired FROM gardens WHERE id = ?1";
const SELECT_ACTIVE_GARDENS_SQL: &str =
    "SELECT id, user, name, retired FROM gardens WHERE user = ?1 AND retired = 0 ORDER BY id";
const UPDATE_GARDEN_RETIRED_SQL: &str = "UPDATE gardens SET retired = ?1 WHERE id = ?2";
const INSERT_CONTAINER_SQL: &str = "INSERT INTO containers (garden_id, name, kind, archived, row_count, column_count) VALUES (?1, ?2, ?3, 0, ?4, ?5)";
const CONTAINER_COLUMNS: &str = "id, garden_id, name, kind, archived, row_count, column_count";
const SELECT_SLOTS_SQL: &str = "SELECT slot, sub_slot, plant_id, plant_instance_id FROM slots WHERE container_id = ?1 ORDER BY slot, sub_slot";
const UPDATE_CONTAINER_ARCHIVED_SQL: &str = "UPDATE containers SET archived = ?1 WHERE id = ?2";
const SELECT_SLOT_SQL: &str = "SELECT plant_id, plant_instance_id FROM slots WHERE container_id = ?1 AND slot = ?2 AND sub_slot = ?3";
const LINK_SLOT_SQL: &str = "INSERT INTO slots (container_id, slot, sub_slot, plant_id, plant_instance_id) VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT (container_id, slot, sub_slot) DO UPDATE SET plant_id = excluded.plant_id, plant_instance_id = excluded.plant_instance_id";
const DELETE_SLOT_SQL: &str =
    "DELETE FROM slots WHERE container_id = ?1 AND slot = ?2 AND sub_slot = ?3";

impl super::Database {
    fn build_garden_from_row(row: &rusqlite::Row) -> rusqlite::Result<Garden> {
        Ok(Garden {
            id: id_column(row, 0)?,
            user: row.get(1)?,
            name: row.get(2)?,
            retired: row.get(3)?,
        })
    }

    fn build_container_from_row(row: &rusqlite::Row) -> rusqlite::Result<Container> {
        Ok(Container {
            id: id_column(row, 0)?,
            garden_id: id_column(row, 1)?,
            name: row.get(2)?,
            kind: parse_column::<ContainerKind>(row, 3)?,
            archived: row.get(4)?,
            rows: row.get::<_, i64>(5)? as u32,
            columns: row.get::<_, i64>(6)? as u32,
            slots: BTreeMap::new(),
        })
    }

    /// Reads the slot grid of a container.
    fn load_slots(&self, container_id: u64) -> Result<BTreeMap<u32, Slot>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SLOTS_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![container_id as i64], |row| {
                Ok((
                    row.get::<_, i64>(0)? as u32,
                    row.get::<_, bool>(1)?,
                    SlotEntry {
                        plant_id: optional_id_column(row, 2)?,
                        plant_instance_id: optional_id_column(row, 3)?,
                    },
                ))
            })
            .db_context("Failed to query slots")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to parse slot")?;

        let mut slots: BTreeMap<u32, Slot> = BTreeMap::new();
        for (index, sub_slot, entry) in rows {
            let slot = slots.entry(index).or_default();
            if sub_slot {
                slot.sub_slot = Some(entry);
            } else {
                slot.entry = entry;
            }
        }
        Ok(slots)
    }

    /// Creates a garden for a grower.
    pub fn create_garden(&mut self, user: &str, name: &str) -> Result<Garden> {
        self.connection
            .execute(INSERT_GARDEN_SQL, params![user, name])
            .db_context("Failed to insert garden")?;

        Ok(Garden {
            id: self.connection.last_insert_rowid() as u64,
            user: user.to_string(),
            name: name.to_string(),
            retired: false,
        })
    }

    /// Retires or reactivates a garden.
    pub fn set_garden_retired(&mut self, id: u64, retired: bool) -> Result<Garden> {
        let changed = self
            .connection
            .execute(UPDATE_GARDEN_RETIRED_SQL, params![retired, id as i64])
            .db_context("Failed to update garden")?;
        if changed == 0 {
            return Err(GardenError::GardenNotFound { id });
        }
        self.get_garden(id)?.ok_or(GardenError::GardenNotFound { id })
    }

    /// Creates an empty container in a garden.
    pub fn create_container(
        &mut self,
        garden_id: u64,
        name: &str,
        kind: ContainerKind,
        rows: u32,
        columns: u32,
    ) -> Result<Container> {
        if self.get_garden(garden_id)?.is_none() {
            return Err(GardenError::GardenNotFound { id: garden_id });
        }

        self.connection
            .execute(
                INSERT_CONTAINER_SQL,
                params![
                    garden_id as i64,
                    name,
                    kind.as_str(),
                    i64::from(rows),
                    i64::from(columns)
                ],
            )
            .db_context("Failed to insert container")?;

        Ok(Container {
            id: self.connection.last_insert_rowid() as u64,
            garden_id,
            name: name.to_string(),
            kind,
            archived: false,
            rows,
            columns,
            slots: BTreeMap::new(),
        })
    }

    /// Archives or restores a container.
    pub fn set_container_archived(&mut self, id: u64, archived: bool) -> Result<Container> {
        let changed = self
            .connection
            .execute(UPDATE_CONTAINER_ARCHIVED_SQL, params![archived, id as i64])
            .db_context("Failed to update container")?;
        if changed == 0 {
            return Err(GardenError::ContainerNotFound { id });
        }
        self.get_container(id)?
            .ok_or(GardenError::ContainerNotFound { id })
    }

    /// Current occupant of a slot position, if any.
    pub fn slot_entry(&self, location: &Location) -> Result<Option<SlotEntry>> {
        let entry = self
            .connection
            .query_row(
                SELECT_SLOT_SQL,
                params![
                    location.container_id as i64,
                    i64::from(location.slot),
                    location.sub_slot
                ],
                |row| {
                    Ok(SlotEntry {
                        plant_id: optional_id_column(row, 0)?,
                        plant_instance_id: optional_id_column(row, 1)?,
                    })
                },
            )
            .optional()
            .db_context("Failed to fetch slot")?;
        Ok(entry.filter(|e| *e != SlotEntry::default()))
    }

    /// Points a slot position at a plant and instance.
    pub fn link_slot(&mut self, location: &Location, entry: &SlotEntry) -> Result<()> {
        self.connection
            .execute(
                LINK_SLOT_SQL,
                params![
                    location.container_id as i64,
                    i64::from(location.slot),
                    location.sub_slot,
                    entry.plant_id.map(|id| id as i64),
                    entry.plant_instance_id.map(|id| id as i64),
                ],
            )
            .db_context("Failed to link slot")?;
        Ok(())
    }

    /// Empties a slot position and returns what was there.
    pub fn unlink_slot(&mut self, location: &Location) -> Result<Option<SlotEntry>> {
        let entry = self.slot_entry(location)?;
        self.connection
            .execute(
                DELETE_SLOT_SQL,
                params![
                    location.container_id as i64,
                    i64::from(location.slot),
                    location.sub_slot
                ],
            )
            .db_context("Failed to clear slot")?;
        Ok(entry)
    }
}

impl ContainerStore for super::Database {
    fn get_container(&self, id: u64) -> Result<Option<Container>> {
        let container = self
            .connection
            .query_row(
                &format!("SELECT {CONTAINER_COLUMNS} FROM containers WHERE id = ?1"),
                params![id as i64],
                Self::build_container_from_row,
            )
            .optional()
            .db_context("Failed to fetch container")?;

        match container {
            Some(mut container) => {
                container.slots = self.load_slots(container.id)?;
                Ok(Some(container))
            }
            None => Ok(None),
        }
    }

    fn list_containers(&self, garden_id: u64) -> Result<Vec<Container>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {CONTAINER_COLUMNS} FROM containers WHERE garden_id = ?1 ORDER BY id"
            ))
            .db_context("Failed to prepare query")?;
        let mut containers = stmt
            .query_map(params![garden_id as i64], Self::build_container_from_row)
            .db_context("Failed to query containers")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to parse container")?;

        for container in &mut containers {
            container.slots = self.load_slots(container.id)?;
        }
        Ok(containers)
    }
}

impl GardenStore for super::Database {
    fn get_garden(&self, id: u64) -> Result<Option<Garden>> {
        self.connection
            .query_row(SELECT_GARDEN_SQL, params![id as i64], Self::build_garden_from_row)
            .optional()
            .db_context("Failed to fetch garden")
    }

    fn list_active_gardens(&self, user: &str) -> Result<Vec<Garden>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIVE_GARDENS_SQL)
            .db_context("Failed to prepare query")?;
        let gardens = stmt
            .query_map(params![user], Self::build_garden_from_row)
            .db_context("Failed to query gardens")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to parse garden")?;
        Ok(gardens)
    }
}
