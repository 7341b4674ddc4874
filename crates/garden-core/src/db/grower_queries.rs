//! Per-grower settings: frost dates.

use jiff::civil::Date;
use rusqlite::{params, OptionalExtension};

use super::utils::{date_text, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::GrowingZoneData,
    store::GrowingZoneSource,
};

const UPSERT_FROST_SQL: &str = "INSERT INTO growers (user, last_frost, first_frost) VALUES (?1, ?2, ?3) ON CONFLICT (user) DO UPDATE SET last_frost = excluded.last_frost, first_frost = excluded.first_frost";
const SELECT_FROST_SQL: &str = "SELECT last_frost, first_frost FROM growers WHERE user = ?1";

impl super::Database {
    /// Stores a grower's frost dates, replacing any previous ones.
    pub fn set_frost_dates(
        &mut self,
        user: &str,
        last_frost: Option<Date>,
        first_frost: Option<Date>,
    ) -> Result<GrowingZoneData> {
        self.connection
            .execute(
                UPSERT_FROST_SQL,
                params![user, last_frost.map(date_text), first_frost.map(date_text)],
            )
            .db_context("Failed to store frost dates")?;

        Ok(GrowingZoneData {
            last_frost,
            first_frost,
        })
    }
}

impl GrowingZoneSource for super::Database {
    fn lookup_zone(&self, user: &str) -> Result<Option<GrowingZoneData>> {
        self.connection
            .query_row(SELECT_FROST_SQL, params![user], |row| {
                Ok(GrowingZoneData {
                    last_frost: parse_optional_column(row, 0)?,
                    first_frost: parse_optional_column(row, 1)?,
                })
            })
            .optional()
            .db_context("Failed to fetch frost dates")
    }
}
