//! Garden, container, plant and frost date operations for the Gardener.

use log::info;

use super::{reconciler, Gardener};
use crate::{
    calendar::is_valid_date,
    error::{GardenError, Result},
    models::{Container, Garden, GrowingZoneData, Plant},
    params::{
        CreateContainer, CreateGarden, CreatePlant, Id, SetArchived, SetFrostDates, UpdatePlant,
    },
    store::{ContainerStore, GardenStore, GrowingZoneSource, PlantStore},
};

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(GardenError::invalid_input(field).with_reason("Value cannot be empty"));
    }
    Ok(value.to_string())
}

impl Gardener {
    /// Creates a garden for the configured grower.
    pub async fn create_garden(&self, params: &CreateGarden) -> Result<Garden> {
        let name = required("name", &params.name)?;
        let user = self.user.clone();
        self.with_database(move |db| db.create_garden(&user, &name))
            .await
    }

    /// Lists the grower's non-retired gardens.
    pub async fn list_gardens(&self) -> Result<Vec<Garden>> {
        let user = self.user.clone();
        self.with_database(move |db| db.list_active_gardens(&user))
            .await
    }

    /// Retires a garden; full passes skip it from then on.
    pub async fn retire_garden(&self, params: &Id) -> Result<Garden> {
        let id = params.id;
        self.with_database(move |db| db.set_garden_retired(id, true))
            .await
    }

    /// Creates an empty container.
    pub async fn create_container(&self, params: &CreateContainer) -> Result<Container> {
        let name = required("name", &params.name)?;
        let CreateContainer {
            garden_id,
            kind,
            rows,
            columns,
            ..
        } = *params;
        if rows == 0 || columns == 0 {
            return Err(GardenError::invalid_input("rows")
                .with_reason(format!("A {rows}x{columns} container has no slots")));
        }

        self.with_database(move |db| db.create_container(garden_id, &name, kind, rows, columns))
            .await
    }

    /// Archives or restores a container and reconciles it. Archiving drops
    /// the open tasks of every instance in it.
    pub async fn set_container_archived(&self, params: &SetArchived) -> Result<Container> {
        let SetArchived { id, archived } = *params;
        self.with_reconciler(move |db, catalog, today| {
            let container = db.set_container_archived(id, archived)?;
            reconciler(db, catalog, today).reconcile_container(id)?;
            Ok(container)
        })
        .await
    }

    pub async fn get_container(&self, params: &Id) -> Result<Option<Container>> {
        let id = params.id;
        self.with_database(move |db| db.get_container(id)).await
    }

    /// Lists the containers of a garden.
    pub async fn list_containers(&self, params: &Id) -> Result<Vec<Container>> {
        let garden_id = params.id;
        self.with_database(move |db| {
            if db.get_garden(garden_id)?.is_none() {
                return Err(GardenError::GardenNotFound { id: garden_id });
            }
            db.list_containers(garden_id)
        })
        .await
    }

    /// Adds a plant to the grower's list.
    ///
    /// An unknown plant type is accepted; instances of it simply get no
    /// scheduled tasks until the catalog learns about it.
    pub async fn create_plant(&self, params: &CreatePlant) -> Result<Plant> {
        let name = required("name", &params.name)?;
        let plant_type = required("plant_type", &params.plant_type)?;
        let season = params.season;
        let user = self.user.clone();

        if self.catalog.get(&plant_type).is_none() {
            info!("plant type '{plant_type}' is not in the growth catalog");
        }

        self.with_database(move |db| db.create_plant(&user, &name, &plant_type, season))
            .await
    }

    /// Edits a plant and reconciles every container holding an open
    /// instance of it.
    pub async fn update_plant(&self, params: &UpdatePlant) -> Result<Plant> {
        let id = params.id;
        let name = params
            .name
            .as_deref()
            .map(|n| required("name", n))
            .transpose()?;
        let plant_type = params
            .plant_type
            .as_deref()
            .map(|t| required("plant_type", t))
            .transpose()?;
        let season = params.season;

        self.with_reconciler(move |db, catalog, today| {
            let mut plant = db.get_plant(id)?.ok_or(GardenError::PlantNotFound { id })?;
            if let Some(name) = name {
                plant.name = name;
            }
            if let Some(plant_type) = plant_type {
                plant.plant_type = plant_type;
            }
            if let Some(season) = season {
                plant.season = season;
            }
            let plant = db.update_plant(&plant)?;

            let containers = db.containers_with_plant(id)?;
            let mut pass = reconciler(db, catalog, today);
            for container_id in containers {
                pass.reconcile_container(container_id)?;
            }
            Ok(plant)
        })
        .await
    }

    pub async fn get_plant(&self, params: &Id) -> Result<Option<Plant>> {
        let id = params.id;
        self.with_database(move |db| db.get_plant(id)).await
    }

    /// Stores the grower's frost dates and reconciles all their gardens,
    /// since every season-anchored window may move.
    pub async fn set_frost_dates(&self, params: &SetFrostDates) -> Result<GrowingZoneData> {
        let SetFrostDates {
            last_frost,
            first_frost,
        } = *params;
        for (field, date) in [("last_frost", last_frost), ("first_frost", first_frost)] {
            if let Some(date) = date.filter(|d| !is_valid_date(*d)) {
                return Err(GardenError::invalid_input(field)
                    .with_reason(format!("{date} is outside the supported range")));
            }
        }

        let user = self.user.clone();
        self.with_reconciler(move |db, catalog, today| {
            let zone = db.set_frost_dates(&user, last_frost, first_frost)?;
            reconciler(db, catalog, today).reconcile_all(&user)?;
            Ok(zone)
        })
        .await
    }

    pub async fn get_frost_dates(&self) -> Result<Option<GrowingZoneData>> {
        let user = self.user.clone();
        self.with_database(move |db| db.lookup_zone(&user)).await
    }
}
