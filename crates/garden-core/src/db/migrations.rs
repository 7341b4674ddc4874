//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    fn has_task_column(&self, name: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('tasks') WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect tasks table")
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Databases created before fertilize applications were keyed by index
        if !self.has_task_column("sequence")? {
            self.connection
                .execute(
                    "ALTER TABLE tasks ADD COLUMN sequence INTEGER NOT NULL DEFAULT 0",
                    [],
                )
                .db_context("Failed to add sequence column to tasks table")?;
        }

        // Fertilize tasks written before the schedule was recorded belong to
        // the schedule of the container they were created in
        if !self.has_task_column("schedule")? {
            self.connection
                .execute("ALTER TABLE tasks ADD COLUMN schedule TEXT", [])
                .db_context("Failed to add schedule column to tasks table")?;
            self.connection
                .execute(
                    "UPDATE tasks SET schedule = (SELECT kind FROM containers WHERE containers.id = tasks.container_id) WHERE kind = 'fertilize' AND schedule IS NULL",
                    [],
                )
                .db_context("Failed to backfill task schedules")?;
        }

        Ok(())
    }
}
