//! Parameter structures for garden operations.
//!
//! These are the inputs to [`crate::Gardener`] methods. They carry no
//! interface-specific derives beyond serde; the CLI builds them from its own
//! clap argument types.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    CLI Args     │───▶│   Core Params   │───▶│    Gardener     │
//! │  (clap derives) │    │ (minimal deps)  │    │   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Dates are optional wherever "today" is a sensible default; the gardener
//! fills them in from its configured current date.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{
    ContainerKind, HistoryStatus, Location, Season, StartedFrom, TaskFilter, TaskKind,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

impl From<u64> for Id {
    fn from(id: u64) -> Self {
        Self { id }
    }
}

/// Parameters for completing a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteTask {
    pub id: u64,
    /// Completion date, defaults to today
    pub date: Option<Date>,
    /// Where a transplanted plant went; transplant tasks only
    pub destination: Option<Location>,
}

/// Parameters for completing every open task of a kind in a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkComplete {
    pub kind: TaskKind,
    pub container_id: u64,
    pub date: Option<Date>,
}

/// Parameters for listing tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTasks {
    pub container_id: Option<u64>,
    pub instance_id: Option<u64>,
    pub kind: Option<TaskKind>,
    /// Include completed tasks
    #[serde(default)]
    pub all: bool,
    /// Only tasks whose window opens on or before this date
    pub starting_by: Option<Date>,
}

impl From<&ListTasks> for TaskFilter {
    fn from(params: &ListTasks) -> Self {
        TaskFilter {
            container_id: params.container_id,
            plant_instance_id: params.instance_id,
            kind: params.kind,
            open_only: !params.all,
            starting_by: params.starting_by,
        }
    }
}

/// Parameters for a grower-authored task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomTask {
    pub text: String,
    pub start: Date,
    /// Defaults to `start`
    pub due: Option<Date>,
    pub container_id: Option<u64>,
}

/// Parameters for planting into an empty slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillSlot {
    pub location: Location,
    pub plant_id: u64,
    #[serde(default)]
    pub started_from: StartedFrom,
    pub planted_count: u32,
}

/// Parameters for moving a plant instance to another slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveInstance {
    pub id: u64,
    pub to: Location,
}

/// Parameters for recording a history event directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordHistory {
    pub id: u64,
    pub status: HistoryStatus,
    pub date: Option<Date>,
    /// Destination of a transplant
    pub to: Option<Location>,
}

/// Parameters for creating a garden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGarden {
    pub name: String,
}

/// Parameters for creating a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContainer {
    pub garden_id: u64,
    pub name: String,
    pub kind: ContainerKind,
    pub rows: u32,
    pub columns: u32,
}

/// Parameters for archiving or restoring a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetArchived {
    pub id: u64,
    pub archived: bool,
}

/// Parameters for adding a plant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlant {
    pub name: String,
    pub plant_type: String,
    #[serde(default)]
    pub season: Season,
}

/// Parameters for editing a plant. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlant {
    pub id: u64,
    pub name: Option<String>,
    pub plant_type: Option<String>,
    pub season: Option<Season>,
}

/// Parameters for storing the grower's frost dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetFrostDates {
    pub last_frost: Option<Date>,
    pub first_frost: Option<Date>,
}
