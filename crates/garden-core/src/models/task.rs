//! Task model definition and related functionality.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{ContainerKind, TaskKind};

/// A dated piece of work for a plant instance, or a grower-authored custom
/// task.
///
/// Reconciled tasks are identified by `(plant_instance_id, kind, sequence)`,
/// and fertilize tasks also by `schedule`; `text` is derived for display and
/// never used for matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    pub kind: TaskKind,

    /// Human-readable description, e.g. `Harvest Tomato in Bed 1`
    pub text: String,

    /// First day the work makes sense
    pub start: Date,

    /// Last day of the window
    pub due: Date,

    /// Completion date; `None` means the task is open
    pub completed_on: Option<Date>,

    /// Owning plant instance (absent for custom tasks)
    pub plant_instance_id: Option<u64>,

    /// Container the task was scheduled in, for listing
    pub container_id: Option<u64>,

    /// Application index for fertilize tasks, zero otherwise
    #[serde(default)]
    pub sequence: u32,

    /// Environment whose fertilizer schedule the application belongs to:
    /// the indoor list inside, the season list outside
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ContainerKind>,

    /// Slot locator string
    #[serde(default)]
    pub path: String,
}

impl Task {
    pub fn is_open(&self) -> bool {
        self.completed_on.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.completed_on.is_some()
    }
}

/// Values for a task about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub kind: TaskKind,
    pub text: String,
    pub start: Date,
    pub due: Date,
    pub completed_on: Option<Date>,
    pub plant_instance_id: Option<u64>,
    pub container_id: Option<u64>,
    pub sequence: u32,
    pub schedule: Option<ContainerKind>,
    pub path: String,
}

impl NewTask {
    /// Materializes the task under a freshly assigned ID.
    pub fn into_task(self, id: u64) -> Task {
        Task {
            id,
            kind: self.kind,
            text: self.text,
            start: self.start,
            due: self.due,
            completed_on: self.completed_on,
            plant_instance_id: self.plant_instance_id,
            container_id: self.container_id,
            sequence: self.sequence,
            schedule: self.schedule,
            path: self.path,
        }
    }
}

/// Partial update for a task. `None` fields are left unchanged; a
/// completion date can be set but never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub text: Option<String>,
    pub start: Option<Date>,
    pub due: Option<Date>,
    pub completed_on: Option<Date>,
    pub container_id: Option<u64>,
    pub path: Option<String>,
}

impl TaskUpdate {
    /// Update that only marks the task completed.
    pub fn completed(date: Date) -> Self {
        Self {
            completed_on: Some(date),
            ..Self::default()
        }
    }

    /// Whether applying this update would change the task.
    pub fn changes(&self, task: &Task) -> bool {
        self.text.as_ref().is_some_and(|t| *t != task.text)
            || self.start.is_some_and(|d| d != task.start)
            || self.due.is_some_and(|d| d != task.due)
            || self.completed_on.is_some_and(|d| task.completed_on != Some(d))
            || self.container_id.is_some_and(|c| task.container_id != Some(c))
            || self.path.as_ref().is_some_and(|p| *p != task.path)
    }

    /// Applies the update in place.
    pub fn apply(&self, task: &mut Task) {
        if let Some(text) = &self.text {
            task.text.clone_from(text);
        }
        if let Some(start) = self.start {
            task.start = start;
        }
        if let Some(due) = self.due {
            task.due = due;
        }
        if let Some(completed_on) = self.completed_on {
            task.completed_on = Some(completed_on);
        }
        if let Some(container_id) = self.container_id {
            task.container_id = Some(container_id);
        }
        if let Some(path) = &self.path {
            task.path.clone_from(path);
        }
    }
}
