//! High-level async API for gardens, plant instances and tasks.
//!
//! [`Gardener`] is the entry point the CLI (or any other front end) talks
//! to. Every operation opens the SQLite database on a blocking thread, does
//! its work and, when it changed something a task window depends on, runs a
//! reconciliation pass before returning.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Operations    │    │   Reconciler    │    │    Database     │
//! │ (task_ops,      │───▶│ (reconcile/)    │───▶│   (via db/)     │
//! │  instance_ops…) │    │                 │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Reconciliation passes are serialized by an async mutex shared by clones of
//! the same gardener, so a periodic pass and an edit-triggered pass never
//! interleave their reads and deletes.
//!
//! # Usage
//!
//! ```rust,no_run
//! use garden_core::{GardenerBuilder, params::ListTasks};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gardener = GardenerBuilder::new()
//!     .with_database_path(Some("/tmp/garden.db"))
//!     .build()
//!     .await?;
//!
//! let report = gardener.reconcile_all().await?;
//! println!("{report}");
//!
//! let tasks = gardener.task_list(&ListTasks::default()).await?;
//! println!("{tasks}");
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use jiff::{civil::Date, Zoned};
use tokio::{sync::Mutex, task};

use crate::{
    catalog::GrowthCatalog,
    db::Database,
    error::{GardenError, Result},
    reconcile::Reconciler,
};

pub mod builder;
pub mod garden_ops;
pub mod handlers;
pub mod instance_ops;
pub mod reconcile_ops;
pub mod task_ops;


pub use builder::GardenerBuilder;

/// Main interface for managing a grower's gardens.
#[derive(Debug, Clone)]
pub struct Gardener {
    pub(crate) db_path: PathBuf,
    pub(crate) catalog: Arc<GrowthCatalog>,
    pub(crate) user: String,
    pub(crate) today: Option<Date>,
    reconcile_lock: Arc<Mutex<()>>,
}

impl Gardener {
    pub(crate) fn new(
        db_path: PathBuf,
        catalog: GrowthCatalog,
        user: String,
        today: Option<Date>,
    ) -> Self {
        Self {
            db_path,
            catalog: Arc::new(catalog),
            user,
            today,
            reconcile_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Grower whose gardens this instance manages.
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn catalog(&self) -> &GrowthCatalog {
        &self.catalog
    }

    /// The date passes run against: the pinned date if one was configured,
    /// otherwise the current date in the system time zone.
    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(|| Zoned::now().date())
    }

    /// Runs a read or an edit that does not affect task windows.
    pub(crate) async fn with_database<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(GardenError::join)?
    }

    /// Runs an edit followed by reconciliation while holding the pass lock.
    ///
    /// The closure receives the database for its edit and a reconciler over
    /// the same connection; the reconciler borrows the database, so edits
    /// go first.
    pub(crate) async fn with_reconciler<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database, &GrowthCatalog, Date) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let _guard = self.reconcile_lock.lock().await;
        let db_path = self.db_path.clone();
        let catalog = Arc::clone(&self.catalog);
        let today = self.today();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db, catalog.as_ref(), today)
        })
        .await
        .map_err(GardenError::join)?
    }
}

/// Shorthand used by the operation modules.
pub(crate) fn reconciler<'a>(
    db: &'a mut Database,
    catalog: &'a GrowthCatalog,
    today: Date,
) -> Reconciler<'a, Database, GrowthCatalog> {
    Reconciler::new(db, catalog, today)
}
