use garden_core::{
    models::{ContainerKind, Season},
    params::{CreateContainer, CreateGarden, CreatePlant, SetFrostDates},
    Container, Gardener, GardenerBuilder, GrowthCatalog, Plant,
};
use jiff::civil::{date, Date};
use tempfile::TempDir;

pub const CATALOG: &str = r#"{
    "lettuce": {
        "spring": {
            "outdoor": { "min": 14, "max": 7 },
            "fertilize": [
                { "start": 21 },
                { "start": 14, "end": 3, "relative": true }
            ]
        },
        "harvestable": true,
        "days_to_germinate": [7, 10],
        "days_to_maturity": [45, 55]
    },
    "tomato": {
        "spring": {
            "indoor": {
                "min": 60, "max": 50, "transplant_min": 20, "transplant_max": 14,
                "fertilize": [{ "start": 14, "description": "half-strength" }]
            },
            "fertilize": [{ "start": 10, "description": "fish emulsion" }]
        },
        "harvestable": true,
        "maturity_from": "transplant",
        "days_to_maturity": [60, 80]
    }
}"#;

/// The date every test gardener treats as today.
pub fn today() -> Date {
    date(2024, 3, 1)
}

/// Helper function to create a test gardener over a fresh database
pub async fn create_test_gardener() -> (TempDir, Gardener) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let gardener = open_gardener(&temp_dir).await;
    (temp_dir, gardener)
}

/// Opens a gardener over the database in `temp_dir`.
pub async fn open_gardener(temp_dir: &TempDir) -> Gardener {
    GardenerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_catalog(GrowthCatalog::from_json(CATALOG).expect("Failed to parse catalog"))
        .with_today(Some(today()))
        .build()
        .await
        .expect("Failed to create gardener")
}

/// Stores a May 1 last frost and an October 15 first frost.
pub async fn set_frost_dates(gardener: &Gardener) {
    gardener
        .set_frost_dates(&SetFrostDates {
            last_frost: Some(date(2020, 5, 1)),
            first_frost: Some(date(2020, 10, 15)),
        })
        .await
        .expect("Failed to set frost dates");
}

pub struct Layout {
    pub bed: Container,
    pub bed2: Container,
    pub tray: Container,
    pub lettuce: Plant,
    pub tomato: Plant,
}

/// Creates one garden with two outdoor beds, a seed tray and two plants.
pub async fn create_layout(gardener: &Gardener) -> Layout {
    let garden = gardener
        .create_garden(&CreateGarden {
            name: "Backyard".to_string(),
        })
        .await
        .expect("Failed to create garden");

    let container = |name: &str, kind: ContainerKind| CreateContainer {
        garden_id: garden.id,
        name: name.to_string(),
        kind,
        rows: 2,
        columns: 4,
    };
    let bed = gardener
        .create_container(&container("Bed 1", ContainerKind::Outside))
        .await
        .expect("Failed to create container");
    let bed2 = gardener
        .create_container(&container("Bed 2", ContainerKind::Outside))
        .await
        .expect("Failed to create container");
    let tray = gardener
        .create_container(&container("Seed Tray", ContainerKind::Inside))
        .await
        .expect("Failed to create container");

    let plant = |name: &str, plant_type: &str| CreatePlant {
        name: name.to_string(),
        plant_type: plant_type.to_string(),
        season: Season::Spring,
    };
    let lettuce = gardener
        .create_plant(&plant("Lettuce", "lettuce"))
        .await
        .expect("Failed to create plant");
    let tomato = gardener
        .create_plant(&plant("Tomato", "tomato"))
        .await
        .expect("Failed to create plant");

    Layout {
        bed,
        bed2,
        tray,
        lettuce,
        tomato,
    }
}
