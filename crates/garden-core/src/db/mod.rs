//! SQLite persistence for gardens, containers, plant instances and tasks.
//!
//! [`Database`] implements every store trait the reconciler consumes, plus
//! the write operations the service layer needs (creating gardens and
//! containers, filling and clearing slots). Each write runs in its own
//! transaction, so a failure part way through a reconciliation pass leaves
//! earlier decisions committed and later ones for the next pass.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod container_queries;
pub mod grower_queries;
pub mod instance_queries;
pub mod migrations;
pub mod plant_queries;
pub mod task_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
