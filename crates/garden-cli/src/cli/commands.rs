//! Clap argument wrappers.
//!
//! Core parameter types stay free of clap derives; each wrapper here owns the
//! CLI-specific parsing (flags, help text, value enums) and converts into the
//! matching `garden_core::params` type.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Gardener
//! ```

use clap::{Args, Subcommand, ValueEnum};
use garden_core::{
    models::{ContainerKind, HistoryStatus, Location, Season, StartedFrom, TaskKind},
    params::*,
};
use jiff::civil::Date;

// ============================================================================
// Reconcile
// ============================================================================

/// Bring tasks in line with the current plantings
#[derive(Args)]
pub struct ReconcileArgs {
    /// Only reconcile this container
    #[arg(long, help = "Only reconcile plant instances in this container")]
    pub container: Option<u64>,
    /// Keep running, reconciling every SECS seconds until Ctrl-C
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub every: Option<u64>,
}

// ============================================================================
// Tasks
// ============================================================================

/// List tasks
#[derive(Args)]
pub struct ListTasksArgs {
    #[arg(long, help = "Only tasks in this container")]
    pub container: Option<u64>,
    #[arg(long, help = "Only tasks for this plant instance")]
    pub instance: Option<u64>,
    #[arg(short, long, help = "Only tasks of this kind")]
    pub kind: Option<TaskKindArg>,
    #[arg(short, long, help = "Include completed tasks")]
    pub all: bool,
    #[arg(long, help = "Only tasks whose window opens on or before this date")]
    pub starting_by: Option<Date>,
}

impl From<ListTasksArgs> for ListTasks {
    fn from(val: ListTasksArgs) -> Self {
        ListTasks {
            container_id: val.container,
            instance_id: val.instance,
            kind: val.kind.map(Into::into),
            all: val.all,
            starting_by: val.starting_by,
        }
    }
}

/// Mark a task as done
///
/// Completing a plant, transplant, harvest or fertilize task records the
/// matching event in the plant's history and reschedules what follows.
#[derive(Args)]
pub struct CompleteTaskArgs {
    #[arg(help = "Unique identifier of the task to complete")]
    pub id: u64,
    #[arg(short, long, help = "Completion date, defaults to today")]
    pub date: Option<Date>,
    #[arg(
        long,
        value_name = "CONTAINER/SLOT[/sub]",
        help = "Where a transplanted plant went"
    )]
    pub to: Option<Location>,
}

impl From<CompleteTaskArgs> for CompleteTask {
    fn from(val: CompleteTaskArgs) -> Self {
        CompleteTask {
            id: val.id,
            date: val.date,
            destination: val.to,
        }
    }
}

/// Complete every open task of one kind in a container
#[derive(Args)]
pub struct BulkCompleteArgs {
    #[arg(help = "Container whose tasks to complete")]
    pub container_id: u64,
    #[arg(help = "Kind of task to complete")]
    pub kind: TaskKindArg,
    #[arg(short, long, help = "Completion date, defaults to today")]
    pub date: Option<Date>,
}

impl From<BulkCompleteArgs> for BulkComplete {
    fn from(val: BulkCompleteArgs) -> Self {
        BulkComplete {
            kind: val.kind.into(),
            container_id: val.container_id,
            date: val.date,
        }
    }
}

/// Add a custom task
#[derive(Args)]
pub struct AddTaskArgs {
    /// What needs doing
    pub text: String,
    #[arg(short, long, help = "First day of the window, defaults to today")]
    pub start: Option<Date>,
    #[arg(short, long, help = "Last day of the window, defaults to the start")]
    pub due: Option<Date>,
    #[arg(long, help = "Container the task belongs to")]
    pub container: Option<u64>,
}

impl AddTaskArgs {
    pub fn into_params(self, today: Date) -> CreateCustomTask {
        CreateCustomTask {
            text: self.text,
            start: self.start.unwrap_or(today),
            due: self.due,
            container_id: self.container,
        }
    }
}

/// Delete a custom task
#[derive(Args)]
pub struct DeleteTaskArgs {
    #[arg(help = "Unique identifier of the task to delete")]
    pub id: u64,
}

impl From<DeleteTaskArgs> for Id {
    fn from(val: DeleteTaskArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Mark a task as done
    #[command(alias = "c")]
    Complete(CompleteTaskArgs),
    /// Complete every open task of one kind in a container
    #[command(alias = "ca")]
    CompleteAll(BulkCompleteArgs),
    /// Add a custom task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Delete a custom task
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTaskArgs),
}

// ============================================================================
// Slots and plant instances
// ============================================================================

/// Plant into an empty slot
#[derive(Args)]
pub struct FillSlotArgs {
    #[arg(value_name = "CONTAINER/SLOT[/sub]", help = "Slot to plant into")]
    pub location: Location,
    #[arg(help = "Plant to put in the slot")]
    pub plant_id: u64,
    #[arg(short, long, default_value = "1", help = "Number of seeds or plants")]
    pub count: u32,
    #[arg(long, value_enum, default_value_t = StartedFromArg::Seed)]
    pub from: StartedFromArg,
}

impl From<FillSlotArgs> for FillSlot {
    fn from(val: FillSlotArgs) -> Self {
        FillSlot {
            location: val.location,
            plant_id: val.plant_id,
            started_from: val.from.into(),
            planted_count: val.count,
        }
    }
}

/// Empty a slot, closing the plant instance in it
#[derive(Args)]
pub struct ClearSlotArgs {
    #[arg(value_name = "CONTAINER/SLOT[/sub]", help = "Slot to clear")]
    pub location: Location,
}

#[derive(Subcommand)]
pub enum SlotCommands {
    /// Plant into an empty slot
    #[command(alias = "f")]
    Fill(FillSlotArgs),
    /// Empty a slot
    #[command(alias = "c")]
    Clear(ClearSlotArgs),
}

/// Show a plant instance with its history and tasks
#[derive(Args)]
pub struct ShowInstanceArgs {
    #[arg(help = "Unique identifier of the plant instance")]
    pub id: u64,
}

impl From<ShowInstanceArgs> for Id {
    fn from(val: ShowInstanceArgs) -> Self {
        Id { id: val.id }
    }
}

/// Move a plant instance to another slot
#[derive(Args)]
pub struct MoveInstanceArgs {
    #[arg(help = "Unique identifier of the plant instance")]
    pub id: u64,
    #[arg(value_name = "CONTAINER/SLOT[/sub]", help = "Destination slot")]
    pub to: Location,
}

impl From<MoveInstanceArgs> for MoveInstance {
    fn from(val: MoveInstanceArgs) -> Self {
        MoveInstance {
            id: val.id,
            to: val.to,
        }
    }
}

/// Record something that happened to a plant without a task
#[derive(Args)]
pub struct RecordHistoryArgs {
    #[arg(help = "Unique identifier of the plant instance")]
    pub id: u64,
    #[arg(help = "What happened")]
    pub status: HistoryStatusArg,
    #[arg(short, long, help = "When it happened, defaults to today")]
    pub date: Option<Date>,
    #[arg(
        long,
        value_name = "CONTAINER/SLOT[/sub]",
        help = "Where a transplanted plant went"
    )]
    pub to: Option<Location>,
}

impl From<RecordHistoryArgs> for RecordHistory {
    fn from(val: RecordHistoryArgs) -> Self {
        RecordHistory {
            id: val.id,
            status: val.status.into(),
            date: val.date,
            to: val.to,
        }
    }
}

#[derive(Subcommand)]
pub enum InstanceCommands {
    /// Show a plant instance with its history and tasks
    #[command(alias = "s")]
    Show(ShowInstanceArgs),
    /// Move a plant instance to another slot
    #[command(alias = "m")]
    Move(MoveInstanceArgs),
    /// Record a history event
    #[command(alias = "r")]
    Record(RecordHistoryArgs),
}

// ============================================================================
// Gardens, containers and plants
// ============================================================================

/// Add a garden
#[derive(Args)]
pub struct AddGardenArgs {
    pub name: String,
}

impl From<AddGardenArgs> for CreateGarden {
    fn from(val: AddGardenArgs) -> Self {
        CreateGarden { name: val.name }
    }
}

/// Retire a garden
#[derive(Args)]
pub struct RetireGardenArgs {
    #[arg(help = "Unique identifier of the garden to retire")]
    pub id: u64,
}

impl From<RetireGardenArgs> for Id {
    fn from(val: RetireGardenArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum GardenCommands {
    /// Add a garden
    #[command(alias = "a")]
    Add(AddGardenArgs),
    /// List active gardens
    #[command(aliases = ["l", "ls"])]
    List,
    /// Retire a garden; its plantings are no longer scheduled
    Retire(RetireGardenArgs),
}

/// Add a container to a garden
#[derive(Args)]
pub struct AddContainerArgs {
    #[arg(help = "Garden the container belongs to")]
    pub garden_id: u64,
    pub name: String,
    #[arg(short, long, value_enum, default_value_t = ContainerKindArg::Outside)]
    pub kind: ContainerKindArg,
    #[arg(short, long, default_value = "1", help = "Rows in the slot grid")]
    pub rows: u32,
    #[arg(short, long, default_value = "1", help = "Columns in the slot grid")]
    pub columns: u32,
}

impl From<AddContainerArgs> for CreateContainer {
    fn from(val: AddContainerArgs) -> Self {
        CreateContainer {
            garden_id: val.garden_id,
            name: val.name,
            kind: val.kind.into(),
            rows: val.rows,
            columns: val.columns,
        }
    }
}

/// List the containers of a garden
#[derive(Args)]
pub struct ListContainersArgs {
    pub garden_id: u64,
}

impl From<ListContainersArgs> for Id {
    fn from(val: ListContainersArgs) -> Self {
        Id { id: val.garden_id }
    }
}

/// Archive or restore a container
#[derive(Args)]
pub struct ArchiveContainerArgs {
    #[arg(help = "Unique identifier of the container")]
    pub id: u64,
    #[arg(long, help = "Restore an archived container instead")]
    pub restore: bool,
}

impl From<ArchiveContainerArgs> for SetArchived {
    fn from(val: ArchiveContainerArgs) -> Self {
        SetArchived {
            id: val.id,
            archived: !val.restore,
        }
    }
}

#[derive(Subcommand)]
pub enum ContainerCommands {
    /// Add a container to a garden
    #[command(alias = "a")]
    Add(AddContainerArgs),
    /// List the containers of a garden
    #[command(aliases = ["l", "ls"])]
    List(ListContainersArgs),
    /// Archive or restore a container
    Archive(ArchiveContainerArgs),
}

/// Add a plant
#[derive(Args)]
pub struct AddPlantArgs {
    /// Display name, e.g. "Buttercrunch"
    pub name: String,
    /// Growth catalog key, e.g. "lettuce"
    pub plant_type: String,
    #[arg(short, long, value_enum, default_value_t = SeasonArg::Spring)]
    pub season: SeasonArg,
}

impl From<AddPlantArgs> for CreatePlant {
    fn from(val: AddPlantArgs) -> Self {
        CreatePlant {
            name: val.name,
            plant_type: val.plant_type,
            season: val.season.into(),
        }
    }
}

/// Change a plant's name, type or season
#[derive(Args)]
pub struct UpdatePlantArgs {
    #[arg(help = "Unique identifier of the plant")]
    pub id: u64,
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short = 't', long = "type", help = "Growth catalog key")]
    pub plant_type: Option<String>,
    #[arg(short, long, value_enum)]
    pub season: Option<SeasonArg>,
}

impl From<UpdatePlantArgs> for UpdatePlant {
    fn from(val: UpdatePlantArgs) -> Self {
        UpdatePlant {
            id: val.id,
            name: val.name,
            plant_type: val.plant_type,
            season: val.season.map(Into::into),
        }
    }
}

#[derive(Subcommand)]
pub enum PlantCommands {
    /// Add a plant
    #[command(alias = "a")]
    Add(AddPlantArgs),
    /// Change a plant's name, type or season
    #[command(alias = "u")]
    Update(UpdatePlantArgs),
}

// ============================================================================
// Frost dates
// ============================================================================

/// Store frost dates; every planting is rescheduled
#[derive(Args)]
pub struct SetFrostArgs {
    #[arg(long, help = "Average last spring frost (YYYY-MM-DD)")]
    pub last: Option<Date>,
    #[arg(long, help = "Average first fall frost (YYYY-MM-DD)")]
    pub first: Option<Date>,
}

impl From<SetFrostArgs> for SetFrostDates {
    fn from(val: SetFrostArgs) -> Self {
        SetFrostDates {
            last_frost: val.last,
            first_frost: val.first,
        }
    }
}

#[derive(Subcommand)]
pub enum FrostCommands {
    /// Store frost dates
    Set(SetFrostArgs),
    /// Show the stored frost dates
    Show,
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskKindArg {
    Plant,
    Transplant,
    Harvest,
    Fertilize,
    Custom,
}

impl From<TaskKindArg> for TaskKind {
    fn from(val: TaskKindArg) -> Self {
        match val {
            TaskKindArg::Plant => TaskKind::Plant,
            TaskKindArg::Transplant => TaskKind::Transplant,
            TaskKindArg::Harvest => TaskKind::Harvest,
            TaskKindArg::Fertilize => TaskKind::Fertilize,
            TaskKindArg::Custom => TaskKind::Custom,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum HistoryStatusArg {
    Planted,
    Transplanted,
    Harvested,
    Fertilized,
}

impl From<HistoryStatusArg> for HistoryStatus {
    fn from(val: HistoryStatusArg) -> Self {
        match val {
            HistoryStatusArg::Planted => HistoryStatus::Planted,
            HistoryStatusArg::Transplanted => HistoryStatus::Transplanted,
            HistoryStatusArg::Harvested => HistoryStatus::Harvested,
            HistoryStatusArg::Fertilized => HistoryStatus::Fertilized,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ContainerKindArg {
    /// Seed trays and pots under cover
    Inside,
    /// Beds and pots in the open
    Outside,
}

impl From<ContainerKindArg> for ContainerKind {
    fn from(val: ContainerKindArg) -> Self {
        match val {
            ContainerKindArg::Inside => ContainerKind::Inside,
            ContainerKindArg::Outside => ContainerKind::Outside,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SeasonArg {
    Spring,
    Fall,
}

impl From<SeasonArg> for Season {
    fn from(val: SeasonArg) -> Self {
        match val {
            SeasonArg::Spring => Season::Spring,
            SeasonArg::Fall => Season::Fall,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StartedFromArg {
    Seed,
    Transplant,
}

impl From<StartedFromArg> for StartedFrom {
    fn from(val: StartedFromArg) -> Self {
        match val {
            StartedFromArg::Seed => StartedFrom::Seed,
            StartedFromArg::Transplant => StartedFrom::Transplant,
        }
    }
}
