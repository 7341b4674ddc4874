//! Grower actions that complete tasks.
//!
//! Completing an engine task records the matching history event and then
//! re-reconciles the instance, so windows that depend on the new date (a
//! harvest after planting, the next relative fertilize) are refreshed.

use jiff::civil::Date;
use log::debug;

use super::Reconciler;
use crate::{
    calendar::is_valid_date,
    error::{GardenError, Result},
    models::{HistoryEvent, Location, Task, TaskFilter, TaskKind, TaskUpdate},
    store::{check_destination, GardenRepository, GrowthDataSource},
};

impl<'a, S, G> Reconciler<'a, S, G>
where
    S: GardenRepository,
    G: GrowthDataSource,
{
    /// Marks a task completed on `date`.
    ///
    /// `destination` is only accepted for transplant tasks; the instance is
    /// moved there and the history event records the move. A new location
    /// must be an empty slot in an active container, checked before anything
    /// is written.
    pub fn complete_task(
        &mut self,
        id: u64,
        date: Date,
        destination: Option<Location>,
    ) -> Result<Task> {
        if !is_valid_date(date) {
            return Err(GardenError::invalid_input("date")
                .with_reason(format!("{date} is outside the supported range")));
        }
        let task = self
            .store
            .get_task(id)?
            .ok_or(GardenError::TaskNotFound { id })?;
        if task.is_completed() {
            return Err(GardenError::invalid_input("id")
                .with_reason(format!("Task {id} is already completed")));
        }
        if destination.is_some() && task.kind != TaskKind::Transplant {
            return Err(GardenError::invalid_input("destination")
                .with_reason("Only transplant tasks can move a plant"));
        }
        let instance = match task.plant_instance_id {
            Some(instance_id) if task.kind.history_status().is_some() => Some(
                self.store
                    .get_instance(instance_id)?
                    .ok_or(GardenError::InstanceNotFound { id: instance_id })?,
            ),
            _ => None,
        };
        let moved_to = destination
            .filter(|to| instance.as_ref().is_none_or(|i| i.location != *to));
        if let Some(to) = moved_to {
            check_destination(&*self.store, &to)?;
        }

        let task = self
            .store
            .update_task_by_id(id, &TaskUpdate::completed(date))?;
        debug!("completed {} task {id} on {date}", task.kind);

        let (Some(status), Some(instance)) = (task.kind.history_status(), instance) else {
            return Ok(task);
        };
        let instance_id = instance.id;

        let event = match destination {
            Some(to) => HistoryEvent::transplanted(date, instance.location, to),
            None => HistoryEvent::new(status, date, instance.location),
        };
        self.store.append_history(instance_id, event)?;
        if let Some(to) = moved_to {
            self.store.update_location(instance_id, to)?;
        }

        self.reconcile_instance(instance_id)?;
        Ok(task)
    }

    /// Completes every open task of `kind` in a container.
    ///
    /// Only engine-owned kinds are supported; custom tasks are completed one
    /// at a time.
    pub fn bulk_complete(
        &mut self,
        kind: TaskKind,
        container_id: u64,
        date: Date,
    ) -> Result<Vec<Task>> {
        if !kind.is_reconciled() {
            return Err(GardenError::UnsupportedTaskKind {
                kind,
                action: "bulk complete".to_string(),
            });
        }
        if self.store.get_container(container_id)?.is_none() {
            return Err(GardenError::ContainerNotFound { id: container_id });
        }

        let filter = TaskFilter {
            container_id: Some(container_id),
            kind: Some(kind),
            open_only: true,
            ..TaskFilter::default()
        };
        let open = self.store.list_tasks(&filter)?;
        let mut completed = Vec::with_capacity(open.len());
        for task in open {
            // An earlier completion may already have removed it.
            if self
                .store
                .get_task(task.id)?
                .is_none_or(|t| t.is_completed())
            {
                continue;
            }
            completed.push(self.complete_task(task.id, date, None)?);
        }
        Ok(completed)
    }
}
