//! Task reconciliation engine.
//!
//! A reconciliation pass looks at one plant instance, its container, its
//! plant's growth data and the grower's frost dates, and brings the
//! instance's plant, transplant, harvest and fertilize tasks in line with
//! them. Every decision is recomputed from stored facts, so a pass can be
//! repeated at any time and converges.
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────┐   ┌────────────────┐
//! │   trigger    │──▶│  reconcile_one  │──▶│   TaskStore    │
//! │ (all/garden/ │   │ plant, transpl, │   │ create/update/ │
//! │  container)  │   │ harvest, fert.  │   │  force-delete  │
//! └──────────────┘   └─────────────────┘   └────────────────┘
//! ```
//!
//! Per task kind the states are `Absent`, `Open` and `Completed`:
//!
//! - `Absent -> Open` when a window is computable and the instance is open
//!   and its container not archived.
//! - `Open -> Open` rewrites text and window in place; a completion date is
//!   filled in from history when one appears.
//! - `Open -> Absent` when the window disappears or a guard fails.
//! - `Completed` tasks are kept as a record of what happened.
//! - More than one task of a kind for an instance is corrupt state: all are
//!   removed and the kind is rebuilt from scratch.

use jiff::civil::Date;
use log::{debug, warn};
use serde::Serialize;

use crate::{
    calendar::season_anchor_date,
    error::Result,
    history::HistoryQuery,
    models::{
        Container, FertilizerApplication, GrowingZoneData, GrowthData, HistoryStatus, Location,
        NewTask, Plant, PlantInstance, Task, TaskKind, TaskUpdate,
    },
    store::{GardenRepository, GrowthDataSource},
    window::{GrowthWindowResolver, Window},
};

mod actions;
mod fertilize;
mod trigger;


/// Counts of the decisions taken by one or more passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Plant instances evaluated
    pub instances: usize,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Completed tasks left untouched
    pub kept: usize,
}

impl ReconcileReport {
    /// Folds another report into this one.
    pub fn merge(&mut self, other: ReconcileReport) {
        self.instances += other.instances;
        self.created += other.created;
        self.updated += other.updated;
        self.deleted += other.deleted;
        self.kept += other.kept;
    }

    /// Number of task writes the passes performed.
    pub fn writes(&self) -> usize {
        self.created + self.updated + self.deleted
    }
}

/// Runs reconciliation passes against a store.
///
/// "Today" is fixed at construction so every decision in a pass sees the
/// same date.
pub struct Reconciler<'a, S, G> {
    store: &'a mut S,
    growth: &'a G,
    today: Date,
}

impl<'a, S, G> Reconciler<'a, S, G>
where
    S: GardenRepository,
    G: GrowthDataSource,
{
    pub fn new(store: &'a mut S, growth: &'a G, today: Date) -> Self {
        Self {
            store,
            growth,
            today,
        }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// Reconciles every task kind for one instance in its container.
    ///
    /// Kinds run in order (plant, transplant, harvest, fertilize) and each
    /// store write completes before the next decision is taken.
    pub fn reconcile_one(
        &mut self,
        instance: &PlantInstance,
        container: &Container,
        plant: Option<&Plant>,
        growth: Option<&GrowthData>,
        zone: Option<&GrowingZoneData>,
    ) -> Result<ReconcileReport> {
        let anchor = match (growth, zone) {
            (Some(growth), Some(zone)) => season_anchor_date(growth.season, zone, self.today),
            _ => None,
        };
        let ctx = PassContext {
            instance,
            container,
            plant,
            growth,
            anchor,
            history: HistoryQuery::new(&instance.history),
        };

        let mut report = ReconcileReport {
            instances: 1,
            ..ReconcileReport::default()
        };
        for kind in [TaskKind::Plant, TaskKind::Transplant, TaskKind::Harvest] {
            self.reconcile_kind(&ctx, kind, &mut report)?;
        }
        self.reconcile_fertilize(&ctx, &mut report)?;

        debug!(
            "instance {}: {} created, {} updated, {} deleted, {} kept",
            instance.id, report.created, report.updated, report.deleted, report.kept
        );
        Ok(report)
    }

    /// Drives one single-shot task kind through its state machine.
    fn reconcile_kind(
        &mut self,
        ctx: &PassContext<'_>,
        kind: TaskKind,
        report: &mut ReconcileReport,
    ) -> Result<()> {
        let instance_id = ctx.instance.id;
        let mut existing = self
            .store
            .find_tasks_by_instance_and_kind(instance_id, kind)?;

        if existing.len() > 1 {
            warn!(
                "instance {instance_id}: {} duplicate {kind} tasks, rebuilding",
                existing.len()
            );
            for task in existing.drain(..) {
                self.store.delete_task_by_id(task.id, true)?;
                report.deleted += 1;
            }
        }

        let window = if ctx.is_active() {
            ctx.window(kind)
        } else {
            None
        };

        match (existing.pop(), window) {
            (Some(task), _) if task.is_completed() => {
                report.kept += 1;
            }
            (Some(task), Some(window)) => {
                let update = ctx.update_for(&task, kind, window);
                if update.changes(&task) {
                    debug!("instance {instance_id}: updating {kind} task {}", task.id);
                    self.store.update_task_by_id(task.id, &update)?;
                    report.updated += 1;
                }
            }
            (Some(task), None) => {
                debug!("instance {instance_id}: removing {kind} task {}", task.id);
                self.store.delete_task_by_id(task.id, true)?;
                report.deleted += 1;
            }
            (None, Some(window)) => {
                let task = self.store.create_task(ctx.new_task(kind, 0, window))?;
                debug!("instance {instance_id}: created {kind} task {}", task.id);
                report.created += 1;
            }
            (None, None) => {}
        }
        Ok(())
    }
}

/// Facts about one instance gathered once per pass.
struct PassContext<'p> {
    instance: &'p PlantInstance,
    container: &'p Container,
    plant: Option<&'p Plant>,
    growth: Option<&'p GrowthData>,
    anchor: Option<Date>,
    history: HistoryQuery<'p>,
}

impl<'p> PassContext<'p> {
    /// Open instance in a container that is still in use.
    fn is_active(&self) -> bool {
        !self.instance.closed && !self.container.archived
    }

    fn location(&self) -> &Location {
        &self.instance.location
    }

    fn planted_date(&self) -> Option<Date> {
        self.history.planted_date()
    }

    fn resolver(&self) -> Option<GrowthWindowResolver<'p>> {
        Some(GrowthWindowResolver {
            growth: self.growth?,
            container_kind: self.container.kind,
            anchor: self.anchor,
            created: self.instance.created,
            started_from: self.instance.started_from,
        })
    }

    fn window(&self, kind: TaskKind) -> Option<Window> {
        self.plant?;
        let resolver = self.resolver()?;
        match kind {
            TaskKind::Plant => resolver.planted(),
            TaskKind::Transplant => resolver.transplanted(self.planted_date()),
            TaskKind::Harvest => resolver.harvest(
                self.planted_date(),
                self.history.transplant_date(self.location()),
            ),
            TaskKind::Fertilize | TaskKind::Custom => None,
        }
    }

    /// Completion date implied by history recorded at this location.
    fn derived_completion(&self, kind: TaskKind) -> Option<Date> {
        let status = match kind {
            TaskKind::Plant => HistoryStatus::Planted,
            TaskKind::Transplant => HistoryStatus::Transplanted,
            TaskKind::Harvest => HistoryStatus::Harvested,
            TaskKind::Fertilize | TaskKind::Custom => return None,
        };
        self.history
            .event_at(status, self.location())
            .map(|e| e.date)
    }

    fn plant_name(&self) -> &str {
        self.plant.map(|p| p.name.as_str()).unwrap_or("plant")
    }

    /// Display text: the identifying part plus the container suffix.
    fn text(&self, kind: TaskKind) -> String {
        let verb = match kind {
            TaskKind::Plant => "Plant",
            TaskKind::Transplant => "Transplant",
            TaskKind::Harvest => "Harvest",
            TaskKind::Fertilize => "Fertilize",
            TaskKind::Custom => "Tend",
        };
        self.with_container(format!("{verb} {}", self.plant_name()))
    }

    fn with_container(&self, text: String) -> String {
        format!("{text} in {}", self.container.name)
    }

    fn fertilize_applications(&self) -> &'p [FertilizerApplication] {
        fertilize::applications_for(self.growth, self.container.kind)
    }

    fn new_task(&self, kind: TaskKind, sequence: u32, window: Window) -> NewTask {
        NewTask {
            kind,
            text: self.text(kind),
            start: window.start,
            due: window.due,
            completed_on: self.derived_completion(kind),
            plant_instance_id: Some(self.instance.id),
            container_id: Some(self.container.id),
            sequence,
            schedule: (kind == TaskKind::Fertilize).then_some(self.container.kind),
            path: self.location().path(),
        }
    }

    fn update_for(&self, task: &Task, kind: TaskKind, window: Window) -> TaskUpdate {
        TaskUpdate {
            text: Some(self.text(kind)),
            start: Some(window.start),
            due: Some(window.due),
            completed_on: task
                .completed_on
                .is_none()
                .then(|| self.derived_completion(kind))
                .flatten(),
            container_id: Some(self.container.id),
            path: Some(self.location().path()),
        }
    }
}
