//! Garden CLI Application
//!
//! Command-line interface for the garden task scheduler.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use garden_core::{params::ListTasks, GardenerBuilder};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        catalog_file,
        user,
        today,
        no_color,
        command,
    } = Args::parse();

    let gardener = GardenerBuilder::new()
        .with_database_path(database_file)
        .with_catalog_path(catalog_file)
        .with_user(user)
        .with_today(today)
        .build()
        .await
        .context("Failed to initialize gardener")?;

    info!("Garden started for {}", gardener.user());

    let cli = Cli::new(gardener, TerminalRenderer::new(!no_color));
    match command {
        Some(Reconcile(args)) => cli.handle_reconcile(args).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Slot { command }) => cli.handle_slot_command(command).await,
        Some(Instance { command }) => cli.handle_instance_command(command).await,
        Some(Container { command }) => cli.handle_container_command(command).await,
        Some(Garden { command }) => cli.handle_garden_command(command).await,
        Some(Plant { command }) => cli.handle_plant_command(command).await,
        Some(Frost { command }) => cli.handle_frost_command(command).await,
        None => cli.list_tasks(&ListTasks::default()).await,
    }
}
