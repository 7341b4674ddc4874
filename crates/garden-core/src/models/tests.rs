#[cfg(test)]
mod model_tests {
    use std::str::FromStr;

    use jiff::civil::date;

    use crate::models::{
        Container, ContainerKind, DayRange, History, HistoryEvent, HistoryStatus, Location,
        PlantGrowthData, Season, SeasonGrowth, SlotEntry, Task, TaskFilter, TaskKind, TaskUpdate,
    };

    fn create_test_task() -> Task {
        Task {
            id: 1,
            kind: TaskKind::Harvest,
            text: "Harvest Lettuce in Bed 1".to_string(),
            start: date(2024, 5, 10),
            due: date(2024, 5, 24),
            completed_on: None,
            plant_instance_id: Some(7),
            container_id: Some(3),
            sequence: 0,
            schedule: None,
            path: "3/4".to_string(),
        }
    }

    fn create_test_container() -> Container {
        Container {
            id: 3,
            garden_id: 1,
            name: "Bed 1".to_string(),
            kind: ContainerKind::Outside,
            archived: false,
            rows: 2,
            columns: 4,
            slots: Default::default(),
        }
    }

    fn entry(plant_id: u64, instance_id: u64) -> SlotEntry {
        SlotEntry {
            plant_id: Some(plant_id),
            plant_instance_id: Some(instance_id),
        }
    }

    #[test]
    fn test_history_insert_keeps_date_order() {
        let at = Location::new(3, 4, false);
        let mut history = History::new();

        assert_eq!(
            history.insert(HistoryEvent::new(HistoryStatus::Harvested, date(2024, 7, 1), at)),
            0
        );
        assert_eq!(
            history.insert(HistoryEvent::new(HistoryStatus::Planted, date(2024, 4, 1), at)),
            0
        );
        assert_eq!(
            history.insert(HistoryEvent::new(HistoryStatus::Fertilized, date(2024, 5, 1), at)),
            1
        );

        let statuses: Vec<_> = history.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                HistoryStatus::Planted,
                HistoryStatus::Fertilized,
                HistoryStatus::Harvested
            ]
        );
        assert!(history.is_ordered());
    }

    #[test]
    fn test_history_same_day_events_keep_insertion_order() {
        let at = Location::new(3, 4, false);
        let mut history = History::new();
        history.insert(HistoryEvent::new(HistoryStatus::Planted, date(2024, 4, 1), at));
        let index =
            history.insert(HistoryEvent::new(HistoryStatus::Fertilized, date(2024, 4, 1), at));

        assert_eq!(index, 1);
        assert_eq!(history.events()[1].status, HistoryStatus::Fertilized);
    }

    #[test]
    fn test_history_deserializes_into_order() {
        let json = r#"[
            {"status": "harvested", "date": "2024-07-01", "from": {"container_id": 3, "slot": 4}},
            {"status": "planted", "date": "2024-04-01", "from": {"container_id": 3, "slot": 4}}
        ]"#;
        let history: History = serde_json::from_str(json).unwrap();
        assert!(history.is_ordered());
        assert_eq!(history.events()[0].status, HistoryStatus::Planted);
        assert!(!history.events()[0].from.sub_slot);
    }

    #[test]
    fn test_location_parse_and_display() {
        let location = Location::from_str("12/5/sub").unwrap();
        assert_eq!(location, Location::new(12, 5, true));
        assert_eq!(location.to_string(), "12/5/sub");
        assert_eq!(Location::new(12, 5, false).path(), "12/5");

        assert!(Location::from_str("12").is_err());
        assert!(Location::from_str("x/5").is_err());
        assert!(Location::from_str("12/5/side").is_err());
        assert!(Location::from_str("12/5/sub/extra").is_err());
    }

    #[test]
    fn test_task_update_detects_changes() {
        let task = create_test_task();

        assert!(!TaskUpdate::default().changes(&task));
        let same = TaskUpdate {
            text: Some(task.text.clone()),
            start: Some(task.start),
            ..TaskUpdate::default()
        };
        assert!(!same.changes(&task));

        let moved = TaskUpdate {
            due: Some(date(2024, 5, 30)),
            ..TaskUpdate::default()
        };
        assert!(moved.changes(&task));
    }

    #[test]
    fn test_task_update_apply() {
        let mut task = create_test_task();
        let update = TaskUpdate {
            text: Some("Harvest Lettuce in Bed 2".to_string()),
            container_id: Some(4),
            path: Some("4/0".to_string()),
            ..TaskUpdate::completed(date(2024, 5, 12))
        };
        update.apply(&mut task);

        assert_eq!(task.text, "Harvest Lettuce in Bed 2");
        assert_eq!(task.container_id, Some(4));
        assert_eq!(task.path, "4/0");
        assert_eq!(task.completed_on, Some(date(2024, 5, 12)));
        assert_eq!(task.start, date(2024, 5, 10));

        // An update without a completion date never reopens a task
        TaskUpdate {
            start: Some(date(2024, 5, 11)),
            ..TaskUpdate::default()
        }
        .apply(&mut task);
        assert!(task.is_completed());
    }

    #[test]
    fn test_task_filter_matches() {
        let task = create_test_task();

        assert!(TaskFilter::default().matches(&task));
        assert!(TaskFilter::open_in_container(3).matches(&task));
        assert!(!TaskFilter::open_in_container(4).matches(&task));

        let by_kind = TaskFilter {
            kind: Some(TaskKind::Plant),
            ..TaskFilter::default()
        };
        assert!(!by_kind.matches(&task));

        let starting = TaskFilter {
            starting_by: Some(date(2024, 5, 1)),
            ..TaskFilter::default()
        };
        assert!(!starting.matches(&task));

        let mut done = task;
        done.completed_on = Some(date(2024, 5, 11));
        assert!(!TaskFilter::open_in_container(3).matches(&done));
    }

    #[test]
    fn test_container_link_and_unlink() {
        let mut container = create_test_container();
        let main = container.location(2, false);
        let sub = container.location(2, true);

        container.link(&main, entry(1, 10));
        container.link(&sub, entry(2, 11));
        assert_eq!(container.entry(&sub), Some(&entry(2, 11)));
        assert_eq!(container.occupied().len(), 2);
        assert_eq!(container.occupied()[0].0, main);

        // A location in another container never matches
        assert_eq!(container.entry(&Location::new(99, 2, false)), None);

        assert_eq!(container.unlink(&main), Some(entry(1, 10)));
        assert!(container.slots.contains_key(&2));
        assert_eq!(container.unlink(&sub), Some(entry(2, 11)));
        assert!(container.slots.is_empty());
        assert_eq!(container.unlink(&main), None);
    }

    #[test]
    fn test_container_capacity() {
        let container = create_test_container();
        assert_eq!(container.capacity(), 8);
    }

    #[test]
    fn test_day_range_bounds() {
        assert_eq!(DayRange::new(45, 55).bounds(), Some((45, 55)));
        assert_eq!(DayRange::new(55, 45).bounds(), Some((45, 55)));
        assert_eq!(DayRange(None, Some(60)).bounds(), Some((60, 60)));
        assert_eq!(DayRange::default().bounds(), None);

        assert!(DayRange(Some(60), None).is_collapsed());
        assert!(DayRange::new(30, 30).is_collapsed());
        assert!(!DayRange::new(30, 40).is_collapsed());
        assert!(!DayRange::default().is_collapsed());
    }

    #[test]
    fn test_growth_data_for_season() {
        let data = PlantGrowthData {
            fall: Some(SeasonGrowth::default()),
            harvestable: true,
            days_to_maturity: DayRange::new(90, 100),
            ..PlantGrowthData::default()
        };

        assert!(data.for_season(Season::Spring).is_none());
        let fall = data.for_season(Season::Fall).unwrap();
        assert_eq!(fall.season, Season::Fall);
        assert!(fall.harvestable);
        assert_eq!(fall.days_to_maturity, DayRange::new(90, 100));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(TaskKind::from_str("Harvest").unwrap(), TaskKind::Harvest);
        assert!(TaskKind::from_str("weed").is_err());
        assert_eq!(Season::from_str("autumn").unwrap(), Season::Fall);
        assert_eq!(ContainerKind::from_str("indoor").unwrap(), ContainerKind::Inside);
        assert_eq!(
            HistoryStatus::from_str("transplanted").unwrap(),
            HistoryStatus::Transplanted
        );

        assert_eq!(serde_json::to_string(&TaskKind::Fertilize).unwrap(), "\"fertilize\"");
    }

    #[test]
    fn test_task_kind_ownership() {
        for kind in TaskKind::RECONCILED {
            assert!(kind.is_reconciled());
            assert!(kind.history_status().is_some());
        }
        assert!(!TaskKind::Custom.is_reconciled());
        assert_eq!(TaskKind::Custom.history_status(), None);
        assert_eq!(
            TaskKind::Transplant.history_status(),
            Some(HistoryStatus::Transplanted)
        );
    }
}
