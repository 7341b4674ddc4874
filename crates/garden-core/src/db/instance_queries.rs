//! Plant instance and history operations.

use rusqlite::{params, Connection, OptionalExtension};

use super::utils::{date_text, id_column, optional_id_column, parse_column, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, GardenError, Result},
    models::{History, HistoryEvent, Location, NewPlantInstance, PlantInstance},
    store::PlantInstanceStore,
};

const SELECT_INSTANCE_SQL: &str = "SELECT id, container_id, slot, sub_slot, plant_id, started_from, planted_count, closed, created FROM plant_instances WHERE id = ?1";
const SELECT_HISTORY_SQL: &str = "SELECT status, date, from_location, to_location FROM history WHERE plant_instance_id = ?1 ORDER BY position";
const INSERT_INSTANCE_SQL: &str = "INSERT INTO plant_instances (container_id, slot, sub_slot, plant_id, started_from, planted_count, closed, created) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)";
const SHIFT_HISTORY_SQL: &str =
    "UPDATE history SET position = position + 1 WHERE plant_instance_id = ?1 AND position >= ?2";
const INSERT_HISTORY_SQL: &str = "INSERT INTO history (plant_instance_id, position, status, date, from_location, to_location) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_LOCATION_SQL: &str =
    "UPDATE plant_instances SET container_id = ?1, slot = ?2, sub_slot = ?3 WHERE id = ?4";
const UNLINK_SLOT_SQL: &str = "DELETE FROM slots WHERE container_id = ?1 AND slot = ?2 AND sub_slot = ?3 AND plant_instance_id = ?4";
const LINK_SLOT_SQL: &str = "INSERT INTO slots (container_id, slot, sub_slot, plant_id, plant_instance_id) VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT (container_id, slot, sub_slot) DO UPDATE SET plant_id = excluded.plant_id, plant_instance_id = excluded.plant_instance_id";
const UPDATE_CLOSED_SQL: &str = "UPDATE plant_instances SET closed = ?1 WHERE id = ?2";

/// Loads an instance with its history from any connection or transaction.
pub(super) fn load_instance(connection: &Connection, id: u64) -> Result<Option<PlantInstance>> {
    let instance = connection
        .query_row(SELECT_INSTANCE_SQL, params![id as i64], |row| {
            Ok(PlantInstance {
                id: id_column(row, 0)?,
                location: Location::new(
                    id_column(row, 1)?,
                    row.get::<_, i64>(2)? as u32,
                    row.get(3)?,
                ),
                plant_id: optional_id_column(row, 4)?,
                started_from: parse_column(row, 5)?,
                planted_count: row.get::<_, i64>(6)? as u32,
                closed: row.get(7)?,
                created: parse_column(row, 8)?,
                history: History::new(),
            })
        })
        .optional()
        .db_context("Failed to fetch plant instance")?;

    let Some(mut instance) = instance else {
        return Ok(None);
    };

    let mut stmt = connection
        .prepare(SELECT_HISTORY_SQL)
        .db_context("Failed to prepare query")?;
    let events = stmt
        .query_map(params![id as i64], |row| {
            Ok(HistoryEvent {
                status: parse_column(row, 0)?,
                date: parse_column(row, 1)?,
                from: parse_column(row, 2)?,
                to: parse_optional_column(row, 3)?,
            })
        })
        .db_context("Failed to query history")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to parse history event")?;
    instance.history = History::from(events);

    Ok(Some(instance))
}

impl PlantInstanceStore for super::Database {
    fn get_instance(&self, id: u64) -> Result<Option<PlantInstance>> {
        load_instance(&self.connection, id)
    }

    fn create_instance(&mut self, instance: NewPlantInstance) -> Result<PlantInstance> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let location = instance.location;
        tx.execute(
            INSERT_INSTANCE_SQL,
            params![
                location.container_id as i64,
                i64::from(location.slot),
                location.sub_slot,
                instance.plant_id.map(|id| id as i64),
                instance.started_from.as_str(),
                i64::from(instance.planted_count),
                date_text(instance.created),
            ],
        )
        .db_context("Failed to insert plant instance")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(PlantInstance {
            id,
            location,
            plant_id: instance.plant_id,
            started_from: instance.started_from,
            planted_count: instance.planted_count,
            closed: false,
            created: instance.created,
            history: History::new(),
        })
    }

    /// Inserts the event at its date-ordered position, shifting later rows
    /// down by one.
    fn append_history(&mut self, id: u64, event: HistoryEvent) -> Result<PlantInstance> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut instance =
            load_instance(&tx, id)?.ok_or(GardenError::InstanceNotFound { id })?;
        let position = instance.history.insert(event.clone());

        tx.execute(SHIFT_HISTORY_SQL, params![id as i64, position as i64])
            .db_context("Failed to reorder history")?;
        tx.execute(
            INSERT_HISTORY_SQL,
            params![
                id as i64,
                position as i64,
                event.status.as_str(),
                date_text(event.date),
                event.from.to_string(),
                event.to.map(|to| to.to_string()),
            ],
        )
        .db_context("Failed to insert history event")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(instance)
    }

    /// Moves the instance and its slot link.
    fn update_location(&mut self, id: u64, location: Location) -> Result<PlantInstance> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut instance =
            load_instance(&tx, id)?.ok_or(GardenError::InstanceNotFound { id })?;
        let previous = instance.location;

        tx.execute(
            UNLINK_SLOT_SQL,
            params![
                previous.container_id as i64,
                i64::from(previous.slot),
                previous.sub_slot,
                id as i64,
            ],
        )
        .db_context("Failed to unlink slot")?;
        tx.execute(
            LINK_SLOT_SQL,
            params![
                location.container_id as i64,
                i64::from(location.slot),
                location.sub_slot,
                instance.plant_id.map(|p| p as i64),
                id as i64,
            ],
        )
        .db_context("Failed to link slot")?;
        tx.execute(
            UPDATE_LOCATION_SQL,
            params![
                location.container_id as i64,
                i64::from(location.slot),
                location.sub_slot,
                id as i64,
            ],
        )
        .db_context("Failed to move plant instance")?;

        tx.commit().db_context("Failed to commit transaction")?;

        instance.location = location;
        Ok(instance)
    }

    fn set_closed(&mut self, id: u64, closed: bool) -> Result<PlantInstance> {
        let changed = self
            .connection
            .execute(UPDATE_CLOSED_SQL, params![closed, id as i64])
            .db_context("Failed to update plant instance")?;
        if changed == 0 {
            return Err(GardenError::InstanceNotFound { id });
        }
        load_instance(&self.connection, id)?.ok_or(GardenError::InstanceNotFound { id })
    }
}
