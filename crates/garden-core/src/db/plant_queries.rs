//! Plant operations.

use rusqlite::{params, OptionalExtension};

use super::utils::{id_column, parse_column};
use crate::{
    error::{DatabaseResultExt, GardenError, Result},
    models::{Plant, Season},
    store::PlantStore,
};

const INSERT_PLANT_SQL: &str =
    "INSERT INTO plants (user, name, plant_type, season) VALUES (?1, ?2, ?3, ?4)";
const SELECT_PLANT_SQL: &str =
    "SELECT id, user, name, plant_type, season FROM plants WHERE id = ?1";
const UPDATE_PLANT_SQL: &str =
    "UPDATE plants SET name = ?1, plant_type = ?2, season = ?3 WHERE id = ?4";
const SELECT_PLANT_CONTAINERS_SQL: &str = "SELECT DISTINCT container_id FROM plant_instances WHERE plant_id = ?1 AND closed = 0 ORDER BY container_id";

impl super::Database {
    /// Adds a plant to a grower's list.
    pub fn create_plant(
        &mut self,
        user: &str,
        name: &str,
        plant_type: &str,
        season: Season,
    ) -> Result<Plant> {
        self.connection
            .execute(
                INSERT_PLANT_SQL,
                params![user, name, plant_type, season.as_str()],
            )
            .db_context("Failed to insert plant")?;

        Ok(Plant {
            id: self.connection.last_insert_rowid() as u64,
            user: user.to_string(),
            name: name.to_string(),
            plant_type: plant_type.to_string(),
            season,
        })
    }

    /// Overwrites a plant's name, catalog key and season.
    pub fn update_plant(&mut self, plant: &Plant) -> Result<Plant> {
        let changed = self
            .connection
            .execute(
                UPDATE_PLANT_SQL,
                params![
                    &plant.name,
                    &plant.plant_type,
                    plant.season.as_str(),
                    plant.id as i64
                ],
            )
            .db_context("Failed to update plant")?;
        if changed == 0 {
            return Err(GardenError::PlantNotFound { id: plant.id });
        }
        Ok(plant.clone())
    }

    /// Containers holding an open instance of the plant.
    pub fn containers_with_plant(&self, plant_id: u64) -> Result<Vec<u64>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLANT_CONTAINERS_SQL)
            .db_context("Failed to prepare query")?;
        let ids = stmt
            .query_map(params![plant_id as i64], |row| id_column(row, 0))
            .db_context("Failed to query containers")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to parse container id")?;
        Ok(ids)
    }
}

impl PlantStore for super::Database {
    fn get_plant(&self, id: u64) -> Result<Option<Plant>> {
        self.connection
            .query_row(SELECT_PLANT_SQL, params![id as i64], |row| {
                Ok(Plant {
                    id: id_column(row, 0)?,
                    user: row.get(1)?,
                    name: row.get(2)?,
                    plant_type: row.get(3)?,
                    season: parse_column(row, 4)?,
                })
            })
            .optional()
            .db_context("Failed to fetch plant")
    }
}
