//! Entry points that load facts from the store and fan out to
//! [`Reconciler::reconcile_one`].

use log::{debug, info, warn};

use super::{ReconcileReport, Reconciler};
use crate::{
    error::{GardenError, Result},
    models::{Container, GrowingZoneData, PlantInstance, TaskFilter},
    store::{GardenRepository, GrowthDataSource},
};

impl<'a, S, G> Reconciler<'a, S, G>
where
    S: GardenRepository,
    G: GrowthDataSource,
{
    /// Reconciles one plant instance at its current location.
    ///
    /// Closed instances are reconciled too, which is how their open tasks
    /// get dropped.
    pub fn reconcile_instance(&mut self, id: u64) -> Result<ReconcileReport> {
        let instance = self
            .store
            .get_instance(id)?
            .ok_or(GardenError::InstanceNotFound { id })?;
        let container_id = instance.location.container_id;
        let container = self
            .store
            .get_container(container_id)?
            .ok_or(GardenError::ContainerNotFound { id: container_id })?;
        let zone = self.zone_for_container(&container)?;
        self.reconcile_loaded(&instance, &container, zone.as_ref())
    }

    /// Reconciles every occupied slot and sub-slot of a container.
    pub fn reconcile_container(&mut self, id: u64) -> Result<ReconcileReport> {
        let container = self
            .store
            .get_container(id)?
            .ok_or(GardenError::ContainerNotFound { id })?;
        let zone = self.zone_for_container(&container)?;
        self.reconcile_container_with(&container, zone.as_ref())
    }

    /// Reconciles every container of a garden.
    pub fn reconcile_garden(&mut self, id: u64) -> Result<ReconcileReport> {
        let garden = self
            .store
            .get_garden(id)?
            .ok_or(GardenError::GardenNotFound { id })?;
        let zone = self.store.lookup_zone(&garden.user)?;

        let mut report = ReconcileReport::default();
        for container in self.store.list_containers(garden.id)? {
            report.merge(self.reconcile_container_with(&container, zone.as_ref())?);
        }
        Ok(report)
    }

    /// Reconciles every container in each of the grower's non-retired
    /// gardens.
    pub fn reconcile_all(&mut self, user: &str) -> Result<ReconcileReport> {
        let zone = self.store.lookup_zone(user)?;
        if zone.is_none() {
            debug!("no frost dates for {user}, season-anchored windows disabled");
        }

        let mut report = ReconcileReport::default();
        let gardens = self.store.list_active_gardens(user)?;
        for garden in &gardens {
            for container in self.store.list_containers(garden.id)? {
                report.merge(self.reconcile_container_with(&container, zone.as_ref())?);
            }
        }
        info!(
            "reconciled {} instances in {} gardens for {user}: {} created, {} updated, {} deleted",
            report.instances,
            gardens.len(),
            report.created,
            report.updated,
            report.deleted
        );
        Ok(report)
    }

    fn reconcile_container_with(
        &mut self,
        container: &Container,
        zone: Option<&GrowingZoneData>,
    ) -> Result<ReconcileReport> {
        let mut report = ReconcileReport::default();
        for (location, entry) in container.occupied() {
            let Some(instance_id) = entry.plant_instance_id else {
                continue;
            };
            let Some(instance) = self.store.get_instance(instance_id)? else {
                warn!(
                    "container {}: slot {location} links missing instance {instance_id}",
                    container.id
                );
                continue;
            };
            if instance.location != location {
                warn!(
                    "container {}: slot {location} links instance {instance_id} which lives at {}",
                    container.id, instance.location
                );
                continue;
            }
            report.merge(self.reconcile_loaded(&instance, container, zone)?);
        }

        // Engine tasks whose instance no longer exists.
        let filter = TaskFilter {
            container_id: Some(container.id),
            ..TaskFilter::default()
        };
        for task in self.store.list_tasks(&filter)? {
            let Some(instance_id) = task.plant_instance_id else {
                continue;
            };
            if !task.kind.is_reconciled() || self.store.get_instance(instance_id)?.is_some() {
                continue;
            }
            warn!(
                "container {}: removing {} task {} of missing instance {instance_id}",
                container.id, task.kind, task.id
            );
            self.store.delete_task_by_id(task.id, true)?;
            report.deleted += 1;
        }

        info!(
            "container {} ({}): {} instances, {} writes",
            container.id,
            container.name,
            report.instances,
            report.writes()
        );
        Ok(report)
    }

    fn reconcile_loaded(
        &mut self,
        instance: &PlantInstance,
        container: &Container,
        zone: Option<&GrowingZoneData>,
    ) -> Result<ReconcileReport> {
        let plant = match instance.plant_id {
            Some(plant_id) => self.store.get_plant(plant_id)?,
            None => None,
        };
        let growth = plant
            .as_ref()
            .and_then(|p| self.growth.lookup(&p.plant_type, p.season));
        if plant.is_some() && growth.is_none() {
            debug!("instance {}: no growth data for its plant", instance.id);
        }
        self.reconcile_one(instance, container, plant.as_ref(), growth.as_ref(), zone)
    }

    /// Frost dates of the grower owning the container's garden.
    fn zone_for_container(&self, container: &Container) -> Result<Option<GrowingZoneData>> {
        match self.store.get_garden(container.garden_id)? {
            Some(garden) => self.store.lookup_zone(&garden.user),
            None => Ok(None),
        }
    }
}
