//! Core library for the garden task scheduler.
//!
//! Growers fill container slots with plants; this crate keeps each plant
//! instance's plant, transplant, harvest and fertilize tasks consistent with
//! the growth catalog, the grower's frost dates and what has already
//! happened to the plant.
//!
//! # Layers
//!
//! - Pure date logic: [`calendar`], [`window`] and [`history`] have no state
//!   and no store access.
//! - The engine: [`reconcile::Reconciler`] works against the capability
//!   traits in [`store`], so it runs the same over SQLite ([`Database`]) and
//!   in memory ([`MemoryStore`]).
//! - The facade: [`Gardener`] is async, owns configuration and triggers a
//!   reconciliation after every edit that can move a window.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use garden_core::{
//!     models::{ContainerKind, Location, Season},
//!     params::{CreateContainer, CreateGarden, CreatePlant, FillSlot, ListTasks},
//!     GardenerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gardener = GardenerBuilder::new()
//!     .with_database_path(Some("garden.db"))
//!     .with_catalog_path(Some("growth.json"))
//!     .build()
//!     .await?;
//!
//! let garden = gardener
//!     .create_garden(&CreateGarden { name: "Backyard".to_string() })
//!     .await?;
//! let bed = gardener
//!     .create_container(&CreateContainer {
//!         garden_id: garden.id,
//!         name: "Bed 1".to_string(),
//!         kind: ContainerKind::Outside,
//!         rows: 2,
//!         columns: 4,
//!     })
//!     .await?;
//! let lettuce = gardener
//!     .create_plant(&CreatePlant {
//!         name: "Lettuce".to_string(),
//!         plant_type: "lettuce".to_string(),
//!         season: Season::Spring,
//!     })
//!     .await?;
//!
//! gardener
//!     .fill_slot(&FillSlot {
//!         location: Location::new(bed.id, 0, false),
//!         plant_id: lettuce.id,
//!         started_from: Default::default(),
//!         planted_count: 6,
//!     })
//!     .await?;
//!
//! println!("{}", gardener.task_list(&ListTasks::default()).await?);
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod catalog;
pub mod db;
pub mod display;
pub mod error;
pub mod gardener;
pub mod history;
pub mod models;
pub mod params;
pub mod reconcile;
pub mod store;
pub mod window;

// Re-export commonly used types
pub use catalog::GrowthCatalog;
pub use db::Database;
pub use display::{CreateResult, DeleteResult, OperationStatus, Tasks, UpdateResult};
pub use error::{GardenError, Result};
pub use gardener::{Gardener, GardenerBuilder};
pub use models::{
    Container, Garden, Location, Plant, PlantInstance, Task, TaskFilter, TaskKind,
};
pub use reconcile::{ReconcileReport, Reconciler};
pub use store::MemoryStore;
