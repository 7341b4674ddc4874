//! Slot and plant instance operations for the Gardener.
//!
//! Every edit here changes a fact some task window depends on, so each one
//! runs under the reconciliation lock and reconciles what it touched before
//! returning.

use jiff::civil::Date;
use log::debug;

use super::{reconciler, Gardener};
use crate::{
    calendar::is_valid_date,
    db::Database,
    error::{GardenError, Result},
    models::{HistoryEvent, HistoryStatus, Location, NewPlantInstance, PlantInstance, SlotEntry},
    params::{FillSlot, Id, MoveInstance, RecordHistory},
    store::{check_destination, PlantInstanceStore, PlantStore},
};

fn check_date(date: Date) -> Result<()> {
    if is_valid_date(date) {
        Ok(())
    } else {
        Err(GardenError::invalid_input("date")
            .with_reason(format!("{date} is outside the supported range")))
    }
}

fn open_instance(db: &Database, id: u64) -> Result<PlantInstance> {
    let instance = db
        .get_instance(id)?
        .ok_or(GardenError::InstanceNotFound { id })?;
    if instance.closed {
        return Err(GardenError::invalid_input("id")
            .with_reason(format!("Plant instance {id} is closed")));
    }
    Ok(instance)
}

impl Gardener {
    /// Plants into an empty slot: creates the instance, links the slot and
    /// schedules the instance's tasks.
    pub async fn fill_slot(&self, params: &FillSlot) -> Result<PlantInstance> {
        let params = params.clone();
        if params.planted_count == 0 {
            return Err(GardenError::invalid_input("planted_count")
                .with_reason("At least one plant must be planted"));
        }

        self.with_reconciler(move |db, catalog, today| {
            let location = params.location;
            check_destination(&*db, &location)?;
            if db.get_plant(params.plant_id)?.is_none() {
                return Err(GardenError::PlantNotFound {
                    id: params.plant_id,
                });
            }

            let instance = db.create_instance(NewPlantInstance {
                location,
                plant_id: Some(params.plant_id),
                started_from: params.started_from,
                planted_count: params.planted_count,
                created: today,
            })?;
            db.link_slot(
                &location,
                &SlotEntry {
                    plant_id: Some(params.plant_id),
                    plant_instance_id: Some(instance.id),
                },
            )?;
            debug!("filled slot {location} with instance {}", instance.id);

            reconciler(db, catalog, today).reconcile_instance(instance.id)?;
            Ok(instance)
        })
        .await
    }

    /// Removes the plant from a slot. The instance is closed rather than
    /// deleted, which drops its open tasks and keeps completed ones.
    pub async fn clear_slot(&self, location: &Location) -> Result<PlantInstance> {
        let location = *location;
        self.with_reconciler(move |db, catalog, today| {
            let instance_id = db
                .slot_entry(&location)?
                .and_then(|entry| entry.plant_instance_id)
                .ok_or_else(|| {
                    GardenError::invalid_input("location")
                        .with_reason(format!("Slot {location} holds no plant instance"))
                })?;

            db.unlink_slot(&location)?;
            let instance = db.set_closed(instance_id, true)?;
            debug!("cleared slot {location}, closed instance {instance_id}");

            reconciler(db, catalog, today).reconcile_instance(instance_id)?;
            Ok(instance)
        })
        .await
    }

    /// Moves an open instance to an empty slot, possibly in another
    /// container, and reconciles both containers.
    pub async fn move_instance(&self, params: &MoveInstance) -> Result<PlantInstance> {
        let id = params.id;
        let to = params.to;
        self.with_reconciler(move |db, catalog, today| {
            let instance = open_instance(db, id)?;
            let from = instance.location;
            if from == to {
                return Err(GardenError::invalid_input("to")
                    .with_reason(format!("Plant instance {id} is already at {to}")));
            }
            check_destination(&*db, &to)?;

            let instance = db.update_location(id, to)?;
            debug!("moved instance {id} from {from} to {to}");

            let mut pass = reconciler(db, catalog, today);
            pass.reconcile_instance(id)?;
            if from.container_id != to.container_id {
                pass.reconcile_container(from.container_id)?;
            }
            Ok(instance)
        })
        .await
    }

    /// Records a history event directly, without going through a task.
    ///
    /// A destination is only accepted with [`HistoryStatus::Transplanted`];
    /// the instance moves there.
    pub async fn record_history(&self, params: &RecordHistory) -> Result<PlantInstance> {
        let id = params.id;
        let status = params.status;
        let date = params.date.unwrap_or_else(|| self.today());
        let to = params.to;

        check_date(date)?;
        if to.is_some() && status != HistoryStatus::Transplanted {
            return Err(GardenError::invalid_input("to")
                .with_reason("Only a transplant can move a plant"));
        }

        self.with_reconciler(move |db, catalog, today| {
            let instance = open_instance(db, id)?;
            let from = instance.location;
            let destination = to.filter(|to| *to != from);
            if let Some(to) = destination {
                check_destination(&*db, &to)?;
            }

            let event = match to {
                Some(to) => HistoryEvent::transplanted(date, from, to),
                None => HistoryEvent::new(status, date, from),
            };
            db.append_history(id, event)?;
            if let Some(to) = destination {
                db.update_location(id, to)?;
            }

            let mut pass = reconciler(db, catalog, today);
            pass.reconcile_instance(id)?;
            if let Some(to) = destination.filter(|to| to.container_id != from.container_id) {
                debug!("instance {id} left container {} for {}", from.container_id, to.container_id);
                pass.reconcile_container(from.container_id)?;
            }

            db.get_instance(id)?
                .ok_or(GardenError::InstanceNotFound { id })
        })
        .await
    }

    pub async fn get_instance(&self, params: &Id) -> Result<Option<PlantInstance>> {
        let id = params.id;
        self.with_database(move |db| db.get_instance(id)).await
    }
}
