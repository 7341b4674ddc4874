//! Fertilize schedule sequencing.
//!
//! Fertilizer applications form an ordered list per plant, season and
//! environment. Each application owns at most one task, identified by the
//! schedule it comes from (`Task::schedule`, the indoor list inside and the
//! season list outside) and its index in that list (`Task::sequence`).
//! Relative applications are scheduled from the completion of the previous
//! application's task, so the list is walked strictly in order.

use std::collections::BTreeMap;

use jiff::civil::Date;
use log::{debug, warn};

use super::{PassContext, ReconcileReport, Reconciler};
use crate::{
    calendar::add_days,
    error::Result,
    models::{
        ContainerKind, FertilizeFrom, FertilizerApplication, GrowthData, Task, TaskKind,
        TaskUpdate,
    },
    store::{GardenRepository, GrowthDataSource},
    window::Window,
};

/// Applications that apply to a container environment: the indoor schedule
/// inside, the season schedule outside.
pub(super) fn applications_for(
    growth: Option<&GrowthData>,
    kind: ContainerKind,
) -> &[FertilizerApplication] {
    let Some(growth) = growth else {
        return &[];
    };
    let applications = match kind {
        ContainerKind::Inside => growth
            .growth
            .indoor
            .as_ref()
            .and_then(|indoor| indoor.fertilize.as_deref()),
        ContainerKind::Outside => growth.growth.fertilize.as_deref(),
    };
    applications.unwrap_or_default()
}

/// English ordinal for a 1-based position.
fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Identifying text for an application, before the container suffix.
///
/// `undescribed_position` is the 1-based position among applications
/// without a description and `undescribed_total` their count.
pub(super) fn fertilize_text(
    plant: &str,
    application: &FertilizerApplication,
    undescribed_position: usize,
    undescribed_total: usize,
) -> String {
    match &application.description {
        Some(description) => format!("Fertilize {plant} ({description})"),
        None if undescribed_total > 1 => {
            format!("Fertilize {plant} ({} time)", ordinal(undescribed_position))
        }
        None => format!("Fertilize {plant}"),
    }
}

/// Window for one application.
///
/// `previous` is the task of the application just before this one in the
/// walk; relative applications need it completed.
fn application_window(
    application: &FertilizerApplication,
    anchor: Date,
    previous: Option<&Task>,
) -> Option<Window> {
    let base = if application.relative {
        previous?.completed_on?
    } else {
        anchor
    };
    let start = add_days(base, i64::from(application.start))?;
    Window::between(
        Some(start),
        add_days(start, i64::from(application.window_days())),
    )
}

impl<'a, S, G> Reconciler<'a, S, G>
where
    S: GardenRepository,
    G: GrowthDataSource,
{
    /// Walks the instance's fertilizer schedule, creating, refreshing and
    /// removing fertilize tasks.
    pub(super) fn reconcile_fertilize(
        &mut self,
        ctx: &PassContext<'_>,
        report: &mut ReconcileReport,
    ) -> Result<()> {
        let instance_id = ctx.instance.id;

        let schedule = ctx.container.kind;
        let mut grouped: BTreeMap<u32, Vec<Task>> = BTreeMap::new();
        let mut other_schedule = Vec::new();
        for task in self
            .store
            .find_tasks_by_instance_and_kind(instance_id, TaskKind::Fertilize)?
        {
            if task.schedule == Some(schedule) {
                grouped.entry(task.sequence).or_default().push(task);
            } else {
                other_schedule.push(task);
            }
        }

        let mut existing = BTreeMap::new();
        for (sequence, tasks) in grouped {
            if tasks.len() > 1 {
                warn!(
                    "instance {instance_id}: {} fertilize tasks share application {sequence}, rebuilding",
                    tasks.len()
                );
                for task in tasks {
                    self.store.delete_task_by_id(task.id, true)?;
                    report.deleted += 1;
                }
            } else if let Some(task) = tasks.into_iter().next() {
                existing.insert(sequence, task);
            }
        }

        let applications = ctx.fertilize_applications();
        let undescribed_total = applications
            .iter()
            .filter(|a| a.description.is_none())
            .count();
        let planted = ctx.planted_date();
        let transplanted = ctx
            .history
            .transplanted_into(ctx.location())
            .map(|e| e.date);

        let mut previous: Option<Task> = None;
        let mut undescribed_position = 0;
        for (index, application) in applications.iter().enumerate() {
            if application.description.is_none() {
                undescribed_position += 1;
            }
            let Ok(sequence) = u32::try_from(index) else {
                break;
            };

            let current = existing.remove(&sequence);
            if let Some(task) = current.as_ref().filter(|t| t.is_completed()) {
                report.kept += 1;
                previous = Some(task.clone());
                continue;
            }

            let anchor = match application.from {
                FertilizeFrom::Transplanted if ctx.container.kind == ContainerKind::Inside => {
                    transplanted
                }
                _ => planted,
            };
            let window = match anchor {
                Some(anchor) if ctx.is_active() => {
                    application_window(application, anchor, previous.as_ref())
                }
                _ => None,
            };
            let text = ctx.with_container(fertilize_text(
                ctx.plant_name(),
                application,
                undescribed_position,
                undescribed_total,
            ));

            previous = match (current, window) {
                (Some(task), Some(window)) => {
                    let update = TaskUpdate {
                        text: Some(text),
                        start: Some(window.start),
                        due: Some(window.due),
                        completed_on: None,
                        container_id: Some(ctx.container.id),
                        path: Some(ctx.location().path()),
                    };
                    if update.changes(&task) {
                        debug!("instance {instance_id}: updating fertilize task {}", task.id);
                        report.updated += 1;
                        Some(self.store.update_task_by_id(task.id, &update)?)
                    } else {
                        Some(task)
                    }
                }
                (Some(task), None) => {
                    debug!("instance {instance_id}: removing fertilize task {}", task.id);
                    self.store.delete_task_by_id(task.id, true)?;
                    report.deleted += 1;
                    None
                }
                (None, Some(window)) => {
                    let mut new_task = ctx.new_task(TaskKind::Fertilize, sequence, window);
                    new_task.text = text;
                    let task = self.store.create_task(new_task)?;
                    debug!("instance {instance_id}: created fertilize task {}", task.id);
                    report.created += 1;
                    Some(task)
                }
                (None, None) => None,
            };
        }

        // Tasks whose application no longer exists, or that belong to the
        // schedule of an environment the instance has left.
        for task in existing.into_values().chain(other_schedule) {
            if ctx.instance.closed && task.is_completed() {
                report.kept += 1;
                continue;
            }
            debug!("instance {instance_id}: removing stale fertilize task {}", task.id);
            self.store.delete_task_by_id(task.id, true)?;
            report.deleted += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application(description: Option<&str>) -> FertilizerApplication {
        FertilizerApplication {
            start: 14,
            end: None,
            from: FertilizeFrom::Planted,
            relative: false,
            description: description.map(String::from),
        }
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(22), "22nd");
    }

    #[test]
    fn test_fertilize_text() {
        let plain = application(None);
        assert_eq!(fertilize_text("Tomato", &plain, 1, 1), "Fertilize Tomato");
        assert_eq!(
            fertilize_text("Tomato", &plain, 2, 3),
            "Fertilize Tomato (2nd time)"
        );
        let described = application(Some("bone meal"));
        assert_eq!(
            fertilize_text("Tomato", &described, 0, 3),
            "Fertilize Tomato (bone meal)"
        );
    }

    #[test]
    fn test_application_window_from_anchor() {
        let anchor = jiff::civil::date(2024, 5, 1);
        let window = application_window(&application(None), anchor, None).unwrap();
        assert_eq!(window.start, jiff::civil::date(2024, 5, 15));
        assert_eq!(window.due, jiff::civil::date(2024, 5, 22));
    }

    #[test]
    fn test_relative_application_needs_completed_predecessor() {
        let anchor = jiff::civil::date(2024, 5, 1);
        let mut relative = application(None);
        relative.relative = true;
        relative.start = 10;
        relative.end = Some(3);
        assert_eq!(application_window(&relative, anchor, None), None);

        let previous = Task {
            id: 1,
            kind: TaskKind::Fertilize,
            text: String::new(),
            start: anchor,
            due: anchor,
            completed_on: None,
            plant_instance_id: Some(1),
            container_id: Some(1),
            sequence: 0,
            schedule: Some(ContainerKind::Outside),
            path: String::new(),
        };
        assert_eq!(application_window(&relative, anchor, Some(&previous)), None);

        let done = Task {
            completed_on: Some(jiff::civil::date(2024, 6, 1)),
            ..previous
        };
        let window = application_window(&relative, anchor, Some(&done)).unwrap();
        assert_eq!(window.start, jiff::civil::date(2024, 6, 11));
        assert_eq!(window.due, jiff::civil::date(2024, 6, 14));
    }
}
