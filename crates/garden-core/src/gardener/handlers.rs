//! Gardener operations that return display wrapper types.
//!
//! Front ends print these directly; the underlying operations in the sibling
//! modules return plain models.

use super::Gardener;
use crate::{
    display::{Containers, CreateResult, DeleteResult, Gardens, OperationStatus, Tasks, UpdateResult},
    error::Result,
    models::{Container, Garden, Plant, PlantInstance, Task},
    params::{
        BulkComplete, CompleteTask, CreateContainer, CreateCustomTask, CreateGarden, CreatePlant,
        FillSlot, Id, ListTasks, MoveInstance, SetArchived, UpdatePlant,
    },
};

impl Gardener {
    /// Tasks matching the filter, ordered by window start.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use garden_core::{params::ListTasks, GardenerBuilder};
    /// # async {
    /// let gardener = GardenerBuilder::new().build().await?;
    /// let params = ListTasks { container_id: Some(3), ..ListTasks::default() };
    /// let tasks = gardener.task_list(&params).await?;
    /// println!("{tasks}");
    /// # Result::<(), garden_core::GardenError>::Ok(())
    /// # };
    /// ```
    pub async fn task_list(&self, params: &ListTasks) -> Result<Tasks> {
        Ok(Tasks(self.list_tasks(params).await?))
    }

    pub async fn complete_task_result(&self, params: &CompleteTask) -> Result<UpdateResult<Task>> {
        let task = self.complete_task(params).await?;
        let change = match task.completed_on {
            Some(date) => format!("Completed on {date}"),
            None => "Completed".to_string(),
        };
        Ok(UpdateResult::with_changes(task, vec![change]))
    }

    /// Bulk completion summarized as a status line plus the completed tasks.
    pub async fn bulk_complete_result(
        &self,
        params: &BulkComplete,
    ) -> Result<(OperationStatus, Tasks)> {
        let tasks = self.bulk_complete(params).await?;
        let status = OperationStatus::success(format!(
            "Completed {} {} tasks in container {}",
            tasks.len(),
            params.kind,
            params.container_id
        ));
        Ok((status, Tasks(tasks)))
    }

    pub async fn add_custom_task_result(
        &self,
        params: &CreateCustomTask,
    ) -> Result<CreateResult<Task>> {
        Ok(CreateResult::new(self.add_custom_task(params).await?))
    }

    pub async fn delete_task_result(&self, params: &Id) -> Result<DeleteResult<Task>> {
        Ok(DeleteResult::new(self.delete_task(params).await?))
    }

    pub async fn fill_slot_result(&self, params: &FillSlot) -> Result<CreateResult<PlantInstance>> {
        Ok(CreateResult::new(self.fill_slot(params).await?))
    }

    pub async fn move_instance_result(
        &self,
        params: &MoveInstance,
    ) -> Result<UpdateResult<PlantInstance>> {
        let instance = self.move_instance(params).await?;
        let change = format!("Moved to {}", params.to);
        Ok(UpdateResult::with_changes(instance, vec![change]))
    }

    pub async fn create_garden_result(&self, params: &CreateGarden) -> Result<CreateResult<Garden>> {
        Ok(CreateResult::new(self.create_garden(params).await?))
    }

    pub async fn garden_list(&self) -> Result<Gardens> {
        Ok(Gardens(self.list_gardens().await?))
    }

    pub async fn create_container_result(
        &self,
        params: &CreateContainer,
    ) -> Result<CreateResult<Container>> {
        Ok(CreateResult::new(self.create_container(params).await?))
    }

    pub async fn container_list(&self, params: &Id) -> Result<Containers> {
        Ok(Containers(self.list_containers(params).await?))
    }

    pub async fn set_container_archived_result(
        &self,
        params: &SetArchived,
    ) -> Result<UpdateResult<Container>> {
        let container = self.set_container_archived(params).await?;
        let change = if params.archived { "Archived" } else { "Restored" };
        Ok(UpdateResult::with_changes(container, vec![change.to_string()]))
    }

    pub async fn create_plant_result(&self, params: &CreatePlant) -> Result<CreateResult<Plant>> {
        Ok(CreateResult::new(self.create_plant(params).await?))
    }

    /// Updates a plant, listing which fields changed.
    pub async fn update_plant_result(&self, params: &UpdatePlant) -> Result<UpdateResult<Plant>> {
        let mut changes = Vec::new();
        if let Some(name) = &params.name {
            changes.push(format!("Renamed to '{}'", name.trim()));
        }
        if let Some(plant_type) = &params.plant_type {
            changes.push(format!("Type set to '{}'", plant_type.trim()));
        }
        if let Some(season) = params.season {
            changes.push(format!("Season set to {season}"));
        }
        let plant = self.update_plant(params).await?;
        Ok(UpdateResult::with_changes(plant, changes))
    }
}
