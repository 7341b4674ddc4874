//! Filter types for querying tasks.

use jiff::civil::Date;

use super::{Task, TaskKind};

/// Filter options for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks scheduled in this container
    pub container_id: Option<u64>,

    /// Only tasks owned by this plant instance
    pub plant_instance_id: Option<u64>,

    /// Only tasks of this kind
    pub kind: Option<TaskKind>,

    /// Hide completed tasks
    pub open_only: bool,

    /// Only tasks whose window opens on or before this date
    pub starting_by: Option<Date>,
}

impl TaskFilter {
    /// Filter for the open tasks of one container.
    pub fn open_in_container(container_id: u64) -> Self {
        Self {
            container_id: Some(container_id),
            open_only: true,
            ..Self::default()
        }
    }

    /// Checks a task against every set criterion.
    pub fn matches(&self, task: &Task) -> bool {
        self.container_id.is_none_or(|id| task.container_id == Some(id))
            && self
                .plant_instance_id
                .is_none_or(|id| task.plant_instance_id == Some(id))
            && self.kind.is_none_or(|kind| task.kind == kind)
            && (!self.open_only || task.is_open())
            && self.starting_by.is_none_or(|date| task.start <= date)
    }
}
