//! In-process store used by tests and embedders without a database.

use std::collections::{BTreeMap, HashMap};

use super::{
    check_delete, ContainerStore, GardenStore, GrowingZoneSource, PlantInstanceStore, PlantStore,
    TaskStore,
};
use crate::{
    error::{GardenError, Result},
    models::{
        Container, Garden, GrowingZoneData, HistoryEvent, Location, NewPlantInstance, NewTask,
        Plant, PlantInstance, SlotEntry, Task, TaskFilter, TaskKind, TaskUpdate,
    },
};

/// Map-backed implementation of every store trait.
///
/// Write operations bump a counter so tests can assert that a pass changed
/// nothing.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    gardens: BTreeMap<u64, Garden>,
    containers: BTreeMap<u64, Container>,
    plants: BTreeMap<u64, Plant>,
    instances: BTreeMap<u64, PlantInstance>,
    tasks: BTreeMap<u64, Task>,
    zones: HashMap<String, GrowingZoneData>,
    next_task_id: u64,
    next_instance_id: u64,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of task and instance writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn insert_garden(&mut self, garden: Garden) {
        self.gardens.insert(garden.id, garden);
    }

    /// Inserts or replaces a container, slots included.
    pub fn insert_container(&mut self, container: Container) {
        self.containers.insert(container.id, container);
    }

    pub fn insert_plant(&mut self, plant: Plant) {
        self.plants.insert(plant.id, plant);
    }

    /// Inserts or replaces an instance as-is.
    pub fn insert_instance(&mut self, instance: PlantInstance) {
        self.next_instance_id = self.next_instance_id.max(instance.id);
        self.instances.insert(instance.id, instance);
    }

    /// Inserts a task as-is, including one that duplicates another's
    /// identity.
    pub fn insert_task(&mut self, task: Task) {
        self.next_task_id = self.next_task_id.max(task.id);
        self.tasks.insert(task.id, task);
    }

    pub fn set_zone(&mut self, user: impl Into<String>, zone: GrowingZoneData) {
        self.zones.insert(user.into(), zone);
    }

    pub fn container_mut(&mut self, id: u64) -> Option<&mut Container> {
        self.containers.get_mut(&id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    fn instance_mut(&mut self, id: u64) -> Result<&mut PlantInstance> {
        self.instances
            .get_mut(&id)
            .ok_or(GardenError::InstanceNotFound { id })
    }
}

impl TaskStore for MemoryStore {
    fn get_task(&self, id: u64) -> Result<Option<Task>> {
        Ok(self.tasks.get(&id).cloned())
    }

    fn find_tasks_by_instance_and_kind(
        &self,
        instance_id: u64,
        kind: TaskKind,
    ) -> Result<Vec<Task>> {
        Ok(self
            .tasks
            .values()
            .filter(|t| t.plant_instance_id == Some(instance_id) && t.kind == kind)
            .cloned()
            .collect())
    }

    fn find_open_tasks_by_instance_and_kind(
        &self,
        instance_id: u64,
        kind: TaskKind,
    ) -> Result<Vec<Task>> {
        let mut tasks = self.find_tasks_by_instance_and_kind(instance_id, kind)?;
        tasks.retain(Task::is_open);
        Ok(tasks)
    }

    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        Ok(self
            .tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    fn create_task(&mut self, task: NewTask) -> Result<Task> {
        self.next_task_id += 1;
        self.writes += 1;
        let task = task.into_task(self.next_task_id);
        self.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    fn update_task_by_id(&mut self, id: u64, update: &TaskUpdate) -> Result<Task> {
        let task = self
            .tasks
            .get_mut(&id)
            .ok_or(GardenError::TaskNotFound { id })?;
        update.apply(task);
        self.writes += 1;
        Ok(task.clone())
    }

    fn delete_task_by_id(&mut self, id: u64, force: bool) -> Result<()> {
        let task = self
            .tasks
            .get(&id)
            .ok_or(GardenError::TaskNotFound { id })?;
        check_delete(task, force)?;
        self.tasks.remove(&id);
        self.writes += 1;
        Ok(())
    }
}

impl PlantInstanceStore for MemoryStore {
    fn get_instance(&self, id: u64) -> Result<Option<PlantInstance>> {
        Ok(self.instances.get(&id).cloned())
    }

    fn create_instance(&mut self, instance: NewPlantInstance) -> Result<PlantInstance> {
        self.next_instance_id += 1;
        self.writes += 1;
        let instance = PlantInstance {
            id: self.next_instance_id,
            location: instance.location,
            plant_id: instance.plant_id,
            started_from: instance.started_from,
            planted_count: instance.planted_count,
            closed: false,
            created: instance.created,
            history: Default::default(),
        };
        self.instances.insert(instance.id, instance.clone());
        Ok(instance)
    }

    fn append_history(&mut self, id: u64, event: HistoryEvent) -> Result<PlantInstance> {
        let instance = self.instance_mut(id)?;
        instance.history.insert(event);
        let instance = instance.clone();
        self.writes += 1;
        Ok(instance)
    }

    fn update_location(&mut self, id: u64, location: Location) -> Result<PlantInstance> {
        let instance = self.instance_mut(id)?;
        let previous = std::mem::replace(&mut instance.location, location);
        let instance = instance.clone();

        if let Some(container) = self.containers.get_mut(&previous.container_id) {
            if container
                .entry(&previous)
                .is_some_and(|e| e.plant_instance_id == Some(id))
            {
                container.unlink(&previous);
            }
        }
        let entry = SlotEntry {
            plant_id: instance.plant_id,
            plant_instance_id: Some(id),
        };
        if let Some(container) = self.containers.get_mut(&location.container_id) {
            container.link(&location, entry);
        }
        self.writes += 1;
        Ok(instance)
    }

    fn set_closed(&mut self, id: u64, closed: bool) -> Result<PlantInstance> {
        let instance = self.instance_mut(id)?;
        instance.closed = closed;
        let instance = instance.clone();
        self.writes += 1;
        Ok(instance)
    }
}

impl ContainerStore for MemoryStore {
    fn get_container(&self, id: u64) -> Result<Option<Container>> {
        Ok(self.containers.get(&id).cloned())
    }

    fn list_containers(&self, garden_id: u64) -> Result<Vec<Container>> {
        Ok(self
            .containers
            .values()
            .filter(|c| c.garden_id == garden_id)
            .cloned()
            .collect())
    }
}

impl PlantStore for MemoryStore {
    fn get_plant(&self, id: u64) -> Result<Option<Plant>> {
        Ok(self.plants.get(&id).cloned())
    }
}

impl GardenStore for MemoryStore {
    fn get_garden(&self, id: u64) -> Result<Option<Garden>> {
        Ok(self.gardens.get(&id).cloned())
    }

    fn list_active_gardens(&self, user: &str) -> Result<Vec<Garden>> {
        Ok(self
            .gardens
            .values()
            .filter(|g| g.user == user && !g.retired)
            .cloned()
            .collect())
    }
}

impl GrowingZoneSource for MemoryStore {
    fn lookup_zone(&self, user: &str) -> Result<Option<GrowingZoneData>> {
        Ok(self.zones.get(user).copied())
    }
}
