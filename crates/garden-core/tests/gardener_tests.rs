mod common;

use common::{create_layout, create_test_gardener, open_gardener, set_frost_dates};
use garden_core::{
    models::{ContainerKind, HistoryStatus, Location, StartedFrom},
    params::{
        BulkComplete, CompleteTask, CreateCustomTask, FillSlot, Id, ListTasks, MoveInstance,
        RecordHistory, SetArchived, UpdatePlant,
    },
    GardenError, Gardener, PlantInstance, Task, TaskKind,
};
use jiff::civil::date;

async fn fill(gardener: &Gardener, location: Location, plant_id: u64) -> PlantInstance {
    gardener
        .fill_slot(&FillSlot {
            location,
            plant_id,
            started_from: StartedFrom::Seed,
            planted_count: 4,
        })
        .await
        .expect("Failed to fill slot")
}

async fn tasks_of(gardener: &Gardener, instance_id: u64, kind: TaskKind, all: bool) -> Vec<Task> {
    gardener
        .list_tasks(&ListTasks {
            instance_id: Some(instance_id),
            kind: Some(kind),
            all,
            ..ListTasks::default()
        })
        .await
        .expect("Failed to list tasks")
}

async fn open_tasks(gardener: &Gardener, instance_id: u64) -> Vec<Task> {
    gardener
        .list_tasks(&ListTasks {
            instance_id: Some(instance_id),
            ..ListTasks::default()
        })
        .await
        .expect("Failed to list tasks")
}

#[tokio::test]
async fn test_frost_dates_schedule_existing_plantings() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    let lettuce = fill(&gardener, Location::new(layout.bed.id, 0, false), layout.lettuce.id).await;

    // Outdoor sowing counts back from last frost, which is not known yet
    assert!(tasks_of(&gardener, lettuce.id, TaskKind::Plant, true).await.is_empty());

    set_frost_dates(&gardener).await;

    let plant = tasks_of(&gardener, lettuce.id, TaskKind::Plant, true).await;
    assert_eq!(plant.len(), 1);
    assert_eq!(plant[0].start, date(2024, 4, 17));
    assert_eq!(plant[0].due, date(2024, 4, 24));
    assert_eq!(plant[0].text, "Plant Lettuce in Bed 1");
    assert_eq!(plant[0].container_id, Some(layout.bed.id));
    assert_eq!(plant[0].path, format!("{}/0", layout.bed.id));
}

#[tokio::test]
async fn test_completing_plant_task_schedules_harvest_and_fertilize() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let lettuce = fill(&gardener, Location::new(layout.bed.id, 0, false), layout.lettuce.id).await;

    let plant_task = tasks_of(&gardener, lettuce.id, TaskKind::Plant, false).await.remove(0);
    let completed = gardener
        .complete_task(&CompleteTask {
            id: plant_task.id,
            date: Some(date(2024, 3, 10)),
            destination: None,
        })
        .await
        .expect("Failed to complete task");
    assert_eq!(completed.completed_on, Some(date(2024, 3, 10)));

    let instance = gardener
        .get_instance(&Id { id: lettuce.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(instance.history.len(), 1);
    assert_eq!(instance.history.events()[0].status, HistoryStatus::Planted);
    assert_eq!(instance.history.events()[0].date, date(2024, 3, 10));

    let harvest = tasks_of(&gardener, lettuce.id, TaskKind::Harvest, false).await;
    assert_eq!(harvest.len(), 1);
    assert_eq!((harvest[0].start, harvest[0].due), (date(2024, 5, 1), date(2024, 5, 14)));

    let fertilize = tasks_of(&gardener, lettuce.id, TaskKind::Fertilize, false).await;
    assert_eq!(fertilize.len(), 1);
    assert_eq!(fertilize[0].sequence, 0);
    assert_eq!((fertilize[0].start, fertilize[0].due), (date(2024, 3, 31), date(2024, 4, 7)));
    assert_eq!(fertilize[0].text, "Fertilize Lettuce (1st time) in Bed 1");

    // The relative application follows the first one's completion
    gardener
        .complete_task(&CompleteTask {
            id: fertilize[0].id,
            date: Some(date(2024, 4, 2)),
            destination: None,
        })
        .await
        .expect("Failed to complete task");
    let fertilize = tasks_of(&gardener, lettuce.id, TaskKind::Fertilize, false).await;
    assert_eq!(fertilize.len(), 1);
    assert_eq!(fertilize[0].sequence, 1);
    assert_eq!((fertilize[0].start, fertilize[0].due), (date(2024, 4, 16), date(2024, 4, 19)));
}

#[tokio::test]
async fn test_reconcile_all_is_idempotent() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    fill(&gardener, Location::new(layout.bed.id, 0, false), layout.lettuce.id).await;
    fill(&gardener, Location::new(layout.tray.id, 0, false), layout.tomato.id).await;

    let first = gardener.reconcile_all().await.expect("Failed to reconcile");
    assert_eq!(first.instances, 2);

    let second = gardener.reconcile_all().await.expect("Failed to reconcile");
    assert_eq!(second.instances, 2);
    assert_eq!(second.writes(), 0);
}

#[tokio::test]
async fn test_tasks_survive_reopening_the_database() {
    let (temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let lettuce = fill(&gardener, Location::new(layout.bed.id, 0, false), layout.lettuce.id).await;
    let before = open_tasks(&gardener, lettuce.id).await;
    drop(gardener);

    let reopened = open_gardener(&temp_dir).await;
    assert_eq!(open_tasks(&reopened, lettuce.id).await, before);
    assert_eq!(reopened.reconcile_all().await.unwrap().writes(), 0);
}

#[tokio::test]
async fn test_clearing_a_slot_closes_the_instance() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let location = Location::new(layout.bed.id, 3, false);
    let lettuce = fill(&gardener, location, layout.lettuce.id).await;

    let plant_task = tasks_of(&gardener, lettuce.id, TaskKind::Plant, false).await.remove(0);
    gardener
        .complete_task(&CompleteTask {
            id: plant_task.id,
            date: Some(date(2024, 3, 10)),
            destination: None,
        })
        .await
        .unwrap();
    assert!(!open_tasks(&gardener, lettuce.id).await.is_empty());

    let closed = gardener.clear_slot(&location).await.expect("Failed to clear slot");
    assert!(closed.closed);
    assert!(open_tasks(&gardener, lettuce.id).await.is_empty());

    // Completed work is kept as a record
    let plant = tasks_of(&gardener, lettuce.id, TaskKind::Plant, true).await;
    assert_eq!(plant.len(), 1);
    assert_eq!(plant[0].completed_on, Some(date(2024, 3, 10)));

    let bed = gardener
        .get_container(&Id { id: layout.bed.id })
        .await
        .unwrap()
        .unwrap();
    assert!(bed.occupied().is_empty());

    // The slot can be planted again
    fill(&gardener, location, layout.lettuce.id).await;
}

#[tokio::test]
async fn test_archiving_a_container_drops_and_restores_open_tasks() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let lettuce = fill(&gardener, Location::new(layout.bed.id, 1, false), layout.lettuce.id).await;
    let before = tasks_of(&gardener, lettuce.id, TaskKind::Plant, false).await;
    assert_eq!(before.len(), 1);

    let archived = gardener
        .set_container_archived(&SetArchived {
            id: layout.bed.id,
            archived: true,
        })
        .await
        .expect("Failed to archive container");
    assert!(archived.archived);
    assert!(open_tasks(&gardener, lettuce.id).await.is_empty());

    gardener
        .set_container_archived(&SetArchived {
            id: layout.bed.id,
            archived: false,
        })
        .await
        .expect("Failed to restore container");
    let after = tasks_of(&gardener, lettuce.id, TaskKind::Plant, false).await;
    assert_eq!(after.len(), 1);
    assert_eq!((after[0].start, after[0].due), (before[0].start, before[0].due));
}

#[tokio::test]
async fn test_moving_an_instance_rewrites_its_tasks() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let from = Location::new(layout.bed.id, 0, false);
    let to = Location::new(layout.bed2.id, 5, false);
    let lettuce = fill(&gardener, from, layout.lettuce.id).await;

    let moved = gardener
        .move_instance(&MoveInstance { id: lettuce.id, to })
        .await
        .expect("Failed to move instance");
    assert_eq!(moved.location, to);

    let plant = tasks_of(&gardener, lettuce.id, TaskKind::Plant, false).await;
    assert_eq!(plant.len(), 1);
    assert_eq!(plant[0].text, "Plant Lettuce in Bed 2");
    assert_eq!(plant[0].container_id, Some(layout.bed2.id));
    assert_eq!(plant[0].path, to.path());

    let in_old_bed = gardener
        .list_tasks(&ListTasks {
            container_id: Some(layout.bed.id),
            ..ListTasks::default()
        })
        .await
        .unwrap();
    assert!(in_old_bed.is_empty());

    let old_bed = gardener
        .get_container(&Id { id: layout.bed.id })
        .await
        .unwrap()
        .unwrap();
    assert!(old_bed.occupied().is_empty());
}

#[tokio::test]
async fn test_transplanting_seedlings_into_a_bed() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let tomato = fill(&gardener, Location::new(layout.tray.id, 0, false), layout.tomato.id).await;

    let plant = tasks_of(&gardener, tomato.id, TaskKind::Plant, false).await;
    assert_eq!((plant[0].start, plant[0].due), (date(2024, 3, 2), date(2024, 3, 12)));
    let transplant = tasks_of(&gardener, tomato.id, TaskKind::Transplant, false).await;
    assert_eq!(transplant[0].text, "Transplant Tomato in Seed Tray");

    gardener
        .complete_task(&CompleteTask {
            id: plant[0].id,
            date: Some(date(2024, 3, 5)),
            destination: None,
        })
        .await
        .unwrap();

    let fertilize = tasks_of(&gardener, tomato.id, TaskKind::Fertilize, false).await;
    assert_eq!(fertilize.len(), 1);
    assert_eq!(fertilize[0].text, "Fertilize Tomato (half-strength) in Seed Tray");
    assert_eq!(fertilize[0].schedule, Some(ContainerKind::Inside));

    let transplant = tasks_of(&gardener, tomato.id, TaskKind::Transplant, false).await;
    let to = Location::new(layout.bed.id, 2, false);
    gardener
        .complete_task(&CompleteTask {
            id: transplant[0].id,
            date: Some(date(2024, 4, 1)),
            destination: Some(to),
        })
        .await
        .expect("Failed to complete transplant");

    let instance = gardener
        .get_instance(&Id { id: tomato.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(instance.location, to);
    let last = instance.history.events().last().unwrap();
    assert_eq!(last.status, HistoryStatus::Transplanted);
    assert_eq!(last.to, Some(to));

    let harvest = tasks_of(&gardener, tomato.id, TaskKind::Harvest, false).await;
    assert_eq!(harvest.len(), 1);
    assert_eq!((harvest[0].start, harvest[0].due), (date(2024, 5, 31), date(2024, 6, 20)));
    assert_eq!(harvest[0].text, "Harvest Tomato in Bed 1");

    // The bed's schedule replaces the tray's
    let fertilize = tasks_of(&gardener, tomato.id, TaskKind::Fertilize, true).await;
    assert_eq!(fertilize.len(), 1);
    assert_eq!(fertilize[0].text, "Fertilize Tomato (fish emulsion) in Bed 1");
    assert_eq!(fertilize[0].schedule, Some(ContainerKind::Outside));
    assert_eq!((fertilize[0].start, fertilize[0].due), (date(2024, 3, 15), date(2024, 3, 22)));

    let tray = gardener
        .get_container(&Id { id: layout.tray.id })
        .await
        .unwrap()
        .unwrap();
    assert!(tray.occupied().is_empty());
}

#[tokio::test]
async fn test_transplant_into_an_occupied_slot_is_rejected() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let occupied = Location::new(layout.bed.id, 3, false);
    let lettuce = fill(&gardener, occupied, layout.lettuce.id).await;
    let tomato = fill(&gardener, Location::new(layout.tray.id, 0, false), layout.tomato.id).await;
    let plant = tasks_of(&gardener, tomato.id, TaskKind::Plant, false).await;
    gardener
        .complete_task(&CompleteTask {
            id: plant[0].id,
            date: Some(date(2024, 3, 5)),
            destination: None,
        })
        .await
        .unwrap();
    let transplant = tasks_of(&gardener, tomato.id, TaskKind::Transplant, false).await;

    let err = gardener
        .complete_task(&CompleteTask {
            id: transplant[0].id,
            date: Some(date(2024, 4, 1)),
            destination: Some(occupied),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GardenError::InvalidInput { ref field, .. } if field == "slot"));

    let transplant = tasks_of(&gardener, tomato.id, TaskKind::Transplant, false).await;
    assert_eq!(transplant.len(), 1);
    let instance = gardener
        .get_instance(&Id { id: tomato.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(instance.location.container_id, layout.tray.id);
    let bed = gardener
        .get_container(&Id { id: layout.bed.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bed.entry(&occupied).unwrap().plant_instance_id, Some(lettuce.id));
}

#[tokio::test]
async fn test_renaming_a_plant_updates_task_text() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let lettuce = fill(&gardener, Location::new(layout.bed.id, 0, false), layout.lettuce.id).await;

    let plant = gardener
        .update_plant(&UpdatePlant {
            id: layout.lettuce.id,
            name: Some("Romaine".to_string()),
            ..UpdatePlant::default()
        })
        .await
        .expect("Failed to update plant");
    assert_eq!(plant.name, "Romaine");
    assert_eq!(plant.plant_type, "lettuce");

    let tasks = tasks_of(&gardener, lettuce.id, TaskKind::Plant, false).await;
    assert_eq!(tasks[0].text, "Plant Romaine in Bed 1");

    // A type the catalog does not know leaves nothing to schedule
    gardener
        .update_plant(&UpdatePlant {
            id: layout.lettuce.id,
            plant_type: Some("okra".to_string()),
            ..UpdatePlant::default()
        })
        .await
        .unwrap();
    assert!(open_tasks(&gardener, lettuce.id).await.is_empty());
}

#[tokio::test]
async fn test_custom_tasks() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;

    let custom = gardener
        .add_custom_task(&CreateCustomTask {
            text: "Turn the compost".to_string(),
            start: date(2024, 3, 4),
            due: None,
            container_id: Some(layout.bed.id),
        })
        .await
        .expect("Failed to add task");
    assert_eq!(custom.kind, TaskKind::Custom);
    assert_eq!(custom.due, custom.start);

    // Reconciliation leaves grower-authored tasks alone
    gardener.reconcile_all().await.unwrap();
    let task = gardener.get_task(&Id { id: custom.id }).await.unwrap();
    assert_eq!(task, Some(custom.clone()));

    let deleted = gardener
        .delete_task(&Id { id: custom.id })
        .await
        .expect("Failed to delete task");
    assert_eq!(deleted.id, custom.id);
    assert!(gardener.get_task(&Id { id: custom.id }).await.unwrap().is_none());

    let err = gardener
        .add_custom_task(&CreateCustomTask {
            text: "Backwards".to_string(),
            start: date(2024, 3, 4),
            due: Some(date(2024, 3, 1)),
            container_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GardenError::InvalidInput { ref field, .. } if field == "due"));
}

#[tokio::test]
async fn test_engine_tasks_cannot_be_deleted_directly() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let lettuce = fill(&gardener, Location::new(layout.bed.id, 0, false), layout.lettuce.id).await;
    let plant = tasks_of(&gardener, lettuce.id, TaskKind::Plant, false).await.remove(0);

    let err = gardener.delete_task(&Id { id: plant.id }).await.unwrap_err();
    assert!(matches!(
        err,
        GardenError::ProtectedTask {
            kind: TaskKind::Plant,
            ..
        }
    ));
    assert!(gardener.get_task(&Id { id: plant.id }).await.unwrap().is_some());
}

#[tokio::test]
async fn test_bulk_complete() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let first = fill(&gardener, Location::new(layout.bed.id, 0, false), layout.lettuce.id).await;
    let second = fill(&gardener, Location::new(layout.bed.id, 1, false), layout.lettuce.id).await;

    let completed = gardener
        .bulk_complete(&BulkComplete {
            kind: TaskKind::Plant,
            container_id: layout.bed.id,
            date: Some(date(2024, 4, 20)),
        })
        .await
        .expect("Failed to bulk complete");
    assert_eq!(completed.len(), 2);

    for id in [first.id, second.id] {
        let instance = gardener.get_instance(&Id { id }).await.unwrap().unwrap();
        assert_eq!(instance.history.events()[0].status, HistoryStatus::Planted);
        assert!(tasks_of(&gardener, id, TaskKind::Plant, false).await.is_empty());
    }

    let err = gardener
        .bulk_complete(&BulkComplete {
            kind: TaskKind::Custom,
            container_id: layout.bed.id,
            date: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GardenError::UnsupportedTaskKind {
            kind: TaskKind::Custom,
            ..
        }
    ));
}

#[tokio::test]
async fn test_fill_slot_validation() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    let location = Location::new(layout.bed.id, 0, false);
    fill(&gardener, location, layout.lettuce.id).await;

    let attempt = |location: Location, plant_id: u64, planted_count: u32| FillSlot {
        location,
        plant_id,
        started_from: StartedFrom::Seed,
        planted_count,
    };

    let occupied = gardener
        .fill_slot(&attempt(location, layout.lettuce.id, 1))
        .await
        .unwrap_err();
    assert!(matches!(occupied, GardenError::InvalidInput { ref field, .. } if field == "slot"));

    let off_grid = gardener
        .fill_slot(&attempt(Location::new(layout.bed.id, 8, false), layout.lettuce.id, 1))
        .await
        .unwrap_err();
    assert!(matches!(off_grid, GardenError::InvalidInput { ref field, .. } if field == "slot"));

    let missing_plant = gardener
        .fill_slot(&attempt(Location::new(layout.bed.id, 1, false), 999, 1))
        .await
        .unwrap_err();
    assert!(matches!(missing_plant, GardenError::PlantNotFound { id: 999 }));

    let none_planted = gardener
        .fill_slot(&attempt(Location::new(layout.bed.id, 1, false), layout.lettuce.id, 0))
        .await
        .unwrap_err();
    assert!(matches!(none_planted, GardenError::InvalidInput { .. }));

    let missing_container = gardener
        .fill_slot(&attempt(Location::new(999, 0, false), layout.lettuce.id, 1))
        .await
        .unwrap_err();
    assert!(matches!(missing_container, GardenError::ContainerNotFound { id: 999 }));

    // A companion planting shares the slot through its sub-slot
    let companion = fill(&gardener, Location::new(layout.bed.id, 0, true), layout.lettuce.id).await;
    assert!(companion.location.sub_slot);
}

#[tokio::test]
async fn test_record_history_directly() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    set_frost_dates(&gardener).await;
    let lettuce = fill(&gardener, Location::new(layout.bed.id, 0, false), layout.lettuce.id).await;

    let err = gardener
        .record_history(&RecordHistory {
            id: lettuce.id,
            status: HistoryStatus::Harvested,
            date: Some(date(2024, 6, 1)),
            to: Some(Location::new(layout.bed2.id, 0, false)),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GardenError::InvalidInput { ref field, .. } if field == "to"));

    let instance = gardener
        .record_history(&RecordHistory {
            id: lettuce.id,
            status: HistoryStatus::Planted,
            date: Some(date(2024, 3, 10)),
            to: None,
        })
        .await
        .expect("Failed to record history");
    assert_eq!(instance.history.len(), 1);

    // The plant task picks up the recorded date as its completion
    let plant = tasks_of(&gardener, lettuce.id, TaskKind::Plant, true).await;
    assert_eq!(plant[0].completed_on, Some(date(2024, 3, 10)));
    let harvest = tasks_of(&gardener, lettuce.id, TaskKind::Harvest, false).await;
    assert_eq!(harvest[0].start, date(2024, 5, 1));
}

#[tokio::test]
async fn test_retired_gardens_are_skipped_by_full_passes() {
    let (_temp_dir, gardener) = create_test_gardener().await;
    let layout = create_layout(&gardener).await;
    fill(&gardener, Location::new(layout.bed.id, 0, false), layout.lettuce.id).await;

    let garden = gardener
        .retire_garden(&Id {
            id: layout.bed.garden_id,
        })
        .await
        .expect("Failed to retire garden");
    assert!(garden.retired);
    assert!(gardener.list_gardens().await.unwrap().is_empty());

    assert_eq!(gardener.reconcile_all().await.unwrap().instances, 0);

    // Reconciling the garden explicitly still works
    let report = gardener
        .reconcile_garden(&Id {
            id: layout.bed.garden_id,
        })
        .await
        .unwrap();
    assert_eq!(report.instances, 1);
}
