//! Task operations for the Gardener.

use super::{reconciler, Gardener};
use crate::{
    calendar::is_valid_date,
    error::{GardenError, Result},
    models::{NewTask, Task, TaskFilter, TaskKind},
    params::{BulkComplete, CompleteTask, CreateCustomTask, Id, ListTasks},
    store::{ContainerStore, TaskStore},
};

impl Gardener {
    /// Marks a task completed.
    ///
    /// Engine tasks also record the matching history event on their plant
    /// instance, after which the instance is reconciled so dependent windows
    /// move. The date defaults to today.
    pub async fn complete_task(&self, params: &CompleteTask) -> Result<Task> {
        let id = params.id;
        let date = params.date.unwrap_or_else(|| self.today());
        let destination = params.destination;

        self.with_reconciler(move |db, catalog, today| {
            reconciler(db, catalog, today).complete_task(id, date, destination)
        })
        .await
    }

    /// Completes every open task of one kind in a container.
    ///
    /// # Errors
    ///
    /// `GardenError::UnsupportedTaskKind` for custom tasks.
    pub async fn bulk_complete(&self, params: &BulkComplete) -> Result<Vec<Task>> {
        let kind = params.kind;
        let container_id = params.container_id;
        let date = params.date.unwrap_or_else(|| self.today());

        self.with_reconciler(move |db, catalog, today| {
            reconciler(db, catalog, today).bulk_complete(kind, container_id, date)
        })
        .await
    }

    /// Adds a grower-authored task. Reconciliation never touches these.
    pub async fn add_custom_task(&self, params: &CreateCustomTask) -> Result<Task> {
        let text = params.text.trim().to_string();
        let start = params.start;
        let due = params.due.unwrap_or(start);
        let container_id = params.container_id;

        if text.is_empty() {
            return Err(GardenError::invalid_input("text").with_reason("Task text cannot be empty"));
        }
        for (field, date) in [("start", start), ("due", due)] {
            if !is_valid_date(date) {
                return Err(GardenError::invalid_input(field)
                    .with_reason(format!("{date} is outside the supported range")));
            }
        }
        if due < start {
            return Err(GardenError::invalid_input("due")
                .with_reason(format!("Due date {due} is before start date {start}")));
        }

        self.with_database(move |db| {
            if let Some(id) = container_id {
                if db.get_container(id)?.is_none() {
                    return Err(GardenError::ContainerNotFound { id });
                }
            }
            db.create_task(NewTask {
                kind: TaskKind::Custom,
                text,
                start,
                due,
                completed_on: None,
                plant_instance_id: None,
                container_id,
                sequence: 0,
                schedule: None,
                path: String::new(),
            })
        })
        .await
    }

    /// Deletes a custom task.
    ///
    /// # Errors
    ///
    /// `GardenError::ProtectedTask` for tasks owned by reconciliation.
    pub async fn delete_task(&self, params: &Id) -> Result<Task> {
        let id = params.id;
        self.with_database(move |db| {
            let task = db.get_task(id)?.ok_or(GardenError::TaskNotFound { id })?;
            db.delete_task_by_id(id, false)?;
            Ok(task)
        })
        .await
    }

    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let id = params.id;
        self.with_database(move |db| db.get_task(id)).await
    }

    /// Lists tasks ordered by window start.
    pub async fn list_tasks(&self, params: &ListTasks) -> Result<Vec<Task>> {
        let filter = TaskFilter::from(params);
        self.with_database(move |db| db.list_tasks(&filter)).await
    }
}
