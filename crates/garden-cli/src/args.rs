use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::Date;

use crate::cli::{
    ContainerCommands, FrostCommands, GardenCommands, InstanceCommands, PlantCommands,
    ReconcileArgs, SlotCommands, TaskCommands,
};

/// Command-line interface for the garden task scheduler
///
/// Fill container slots with plants and garden keeps each planting's plant,
/// transplant, harvest and fertilize tasks in step with the growth catalog,
/// your frost dates and what you have already done.
#[derive(Parser)]
#[command(version, about, name = "garden")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/garden/garden.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to the growth catalog JSON file. Defaults to
    /// $XDG_CONFIG_HOME/garden/growth.json
    #[arg(long, global = true)]
    pub catalog_file: Option<PathBuf>,

    /// Grower whose frost dates and gardens are used
    #[arg(long, global = true, default_value = "default")]
    pub user: String,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    pub today: Option<Date>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the garden CLI
///
/// Running `garden` with no command lists open tasks.
#[derive(Subcommand)]
pub enum Commands {
    /// Bring tasks in line with the current plantings
    #[command(alias = "r")]
    Reconcile(ReconcileArgs),
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Plant into and clear container slots
    #[command(alias = "s")]
    Slot {
        #[command(subcommand)]
        command: SlotCommands,
    },
    /// Inspect and move plant instances
    #[command(alias = "i")]
    Instance {
        #[command(subcommand)]
        command: InstanceCommands,
    },
    /// Manage containers
    #[command(alias = "c")]
    Container {
        #[command(subcommand)]
        command: ContainerCommands,
    },
    /// Manage gardens
    #[command(alias = "g")]
    Garden {
        #[command(subcommand)]
        command: GardenCommands,
    },
    /// Manage plants
    #[command(alias = "p")]
    Plant {
        #[command(subcommand)]
        command: PlantCommands,
    },
    /// Manage frost dates
    #[command(alias = "f")]
    Frost {
        #[command(subcommand)]
        command: FrostCommands,
    },
}
