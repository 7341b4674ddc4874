//! Markdown display for models, collections and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes get newtype wrappers so the same data
//! can be framed differently in a list, after a create, or after an update.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Task, Instance)│───▶│ (Tasks, Create- │───▶│ (termimad in    │
//! │                 │    │  Result, ...)   │    │  the CLI)       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use garden_core::{
//!     display::{CreateResult, Tasks},
//!     models::{Task, TaskKind},
//! };
//! use jiff::civil::date;
//!
//! let task = Task {
//!     id: 3,
//!     kind: TaskKind::Custom,
//!     text: "Turn the compost".to_string(),
//!     start: date(2024, 4, 1),
//!     due: date(2024, 4, 7),
//!     completed_on: None,
//!     plant_instance_id: None,
//!     container_id: None,
//!     sequence: 0,
//!     schedule: None,
//!     path: String::new(),
//! };
//!
//! let created = format!("{}", CreateResult::new(task.clone()));
//! assert!(created.starts_with("Created task with ID: 3"));
//!
//! let listed = format!("{}", Tasks(vec![task]));
//! assert!(listed.contains("Turn the compost"));
//! assert!(listed.contains("2024-04-01 to 2024-04-07"));
//! ```

pub mod collections;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Containers, Gardens, Tasks};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
