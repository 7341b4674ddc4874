//! Store capabilities consumed by the reconciler.
//!
//! The engine never talks to SQLite directly; it is handed something that
//! implements these traits. [`crate::db::Database`] is the persistent
//! implementation and [`MemoryStore`] keeps everything in process.
//!
//! | Trait | Used for |
//! |-------|----------|
//! | [`TaskStore`] | reading and writing reconciled tasks |
//! | [`PlantInstanceStore`] | instances and their history |
//! | [`ContainerStore`] | read-only container and slot lookup |
//! | [`PlantStore`] | plant names and catalog keys |
//! | [`GardenStore`] | enumerating a grower's active gardens |
//! | [`GrowingZoneSource`] | a grower's frost dates |
//! | [`GrowthDataSource`] | the horticultural growth catalog |

use crate::{
    error::{GardenError, Result},
    models::{
        Container, Garden, GrowingZoneData, GrowthData, HistoryEvent, Location, NewPlantInstance,
        NewTask, Plant, PlantInstance, Season, SlotEntry, Task, TaskFilter, TaskKind, TaskUpdate,
    },
};

pub mod memory;

pub use memory::MemoryStore;

/// Task persistence.
pub trait TaskStore {
    fn get_task(&self, id: u64) -> Result<Option<Task>>;

    /// Every task of `kind` owned by the instance, open or completed.
    fn find_tasks_by_instance_and_kind(&self, instance_id: u64, kind: TaskKind)
        -> Result<Vec<Task>>;

    /// Open tasks of `kind` owned by the instance.
    fn find_open_tasks_by_instance_and_kind(
        &self,
        instance_id: u64,
        kind: TaskKind,
    ) -> Result<Vec<Task>>;

    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;

    fn create_task(&mut self, task: NewTask) -> Result<Task>;

    fn update_task_by_id(&mut self, id: u64, update: &TaskUpdate) -> Result<Task>;

    /// Deletes a task. Without `force`, only custom tasks may be deleted.
    fn delete_task_by_id(&mut self, id: u64, force: bool) -> Result<()>;
}

/// Plant instance persistence.
pub trait PlantInstanceStore {
    fn get_instance(&self, id: u64) -> Result<Option<PlantInstance>>;

    fn create_instance(&mut self, instance: NewPlantInstance) -> Result<PlantInstance>;

    /// Records an event, keeping history in date order.
    fn append_history(&mut self, id: u64, event: HistoryEvent) -> Result<PlantInstance>;

    fn update_location(&mut self, id: u64, location: Location) -> Result<PlantInstance>;

    fn set_closed(&mut self, id: u64, closed: bool) -> Result<PlantInstance>;
}

/// Read-only container lookup.
pub trait ContainerStore {
    fn get_container(&self, id: u64) -> Result<Option<Container>>;

    fn list_containers(&self, garden_id: u64) -> Result<Vec<Container>>;
}

/// Plant lookup.
pub trait PlantStore {
    fn get_plant(&self, id: u64) -> Result<Option<Plant>>;
}

/// Garden lookup.
pub trait GardenStore {
    fn get_garden(&self, id: u64) -> Result<Option<Garden>>;

    /// Non-retired gardens belonging to `user`.
    fn list_active_gardens(&self, user: &str) -> Result<Vec<Garden>>;
}

/// Source of a grower's frost dates.
pub trait GrowingZoneSource {
    fn lookup_zone(&self, user: &str) -> Result<Option<GrowingZoneData>>;
}

/// Source of horticultural reference data.
pub trait GrowthDataSource {
    /// Growth data for a plant type in one season, if the catalog has it.
    fn lookup(&self, plant_type: &str, season: Season) -> Option<GrowthData>;
}

/// Everything a reconciliation pass reads from or writes to.
pub trait GardenRepository:
    TaskStore + PlantInstanceStore + ContainerStore + PlantStore + GardenStore + GrowingZoneSource
{
}

impl<T> GardenRepository for T where
    T: TaskStore + PlantInstanceStore + ContainerStore + PlantStore + GardenStore + GrowingZoneSource
{
}

/// Rejects a plain delete of a task the reconciler owns.
pub(crate) fn check_delete(task: &Task, force: bool) -> Result<()> {
    if force || !task.kind.is_reconciled() {
        Ok(())
    } else {
        Err(GardenError::ProtectedTask {
            id: task.id,
            kind: task.kind,
        })
    }
}

/// Checks that `to` is an empty, addressable slot in an active container.
pub(crate) fn check_destination<S>(store: &S, to: &Location) -> Result<Container>
where
    S: ContainerStore + ?Sized,
{
    let container = store
        .get_container(to.container_id)?
        .ok_or(GardenError::ContainerNotFound {
            id: to.container_id,
        })?;
    if container.archived {
        return Err(GardenError::invalid_input("container_id")
            .with_reason(format!("Container {} is archived", container.id)));
    }
    if to.slot >= container.capacity() {
        return Err(GardenError::invalid_input("slot").with_reason(format!(
            "Slot {} is outside the {}x{} grid of container {}",
            to.slot, container.rows, container.columns, container.id
        )));
    }
    if container
        .entry(to)
        .is_some_and(|entry| *entry != SlotEntry::default())
    {
        return Err(GardenError::invalid_input("slot").with_reason(format!("Slot {to} is occupied")));
    }
    Ok(container)
}
