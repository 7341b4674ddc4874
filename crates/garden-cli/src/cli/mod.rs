//! Command execution.
//!
//! [`Cli`] turns parsed commands into gardener calls and renders the
//! markdown the display wrappers produce.

mod commands;

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
pub use commands::*;
use garden_core::{
    params::{Id, ListTasks},
    Gardener, ReconcileReport,
};
use log::info;

use crate::renderer::TerminalRenderer;

pub struct Cli {
    gardener: Gardener,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(gardener: Gardener, renderer: TerminalRenderer) -> Self {
        Self { gardener, renderer }
    }

    pub async fn handle_reconcile(&self, args: ReconcileArgs) -> Result<()> {
        let Some(seconds) = args.every else {
            let report = self.reconcile_once(args.container).await?;
            self.renderer.render(&report.to_string());
            return Ok(());
        };

        info!("Reconciling every {seconds}s, press Ctrl-C to stop");
        let mut ticker = tokio::time::interval(Duration::from_secs(seconds));
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = self.reconcile_once(args.container).await?;
                    self.renderer.render(&report.to_string());
                }
                result = &mut shutdown => {
                    result.context("Failed to listen for Ctrl-C")?;
                    info!("Stopping periodic reconciliation");
                    return Ok(());
                }
            }
        }
    }

    async fn reconcile_once(&self, container: Option<u64>) -> Result<ReconcileReport> {
        match container {
            Some(id) => self
                .gardener
                .reconcile_container(&Id { id })
                .await
                .with_context(|| format!("Failed to reconcile container {id}")),
            None => self
                .gardener
                .reconcile_all()
                .await
                .context("Failed to reconcile gardens"),
        }
    }

    pub async fn list_tasks(&self, params: &ListTasks) -> Result<()> {
        let tasks = self
            .gardener
            .task_list(params)
            .await
            .context("Failed to list tasks")?;
        self.renderer.render(&tasks.to_string());
        Ok(())
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::List(args) => self.list_tasks(&args.into()).await,
            TaskCommands::Complete(args) => {
                let id = args.id;
                let result = self
                    .gardener
                    .complete_task_result(&args.into())
                    .await
                    .with_context(|| format!("Failed to complete task {id}"))?;
                self.renderer.render(&result.to_string());
                Ok(())
            }
            TaskCommands::CompleteAll(args) => {
                let (status, tasks) = self
                    .gardener
                    .bulk_complete_result(&args.into())
                    .await
                    .context("Failed to complete tasks")?;
                self.renderer.render(&format!("{status}\n{tasks}"));
                Ok(())
            }
            TaskCommands::Add(args) => {
                let params = args.into_params(self.gardener.today());
                let result = self
                    .gardener
                    .add_custom_task_result(&params)
                    .await
                    .context("Failed to add task")?;
                self.renderer.render(&result.to_string());
                Ok(())
            }
            TaskCommands::Delete(args) => {
                let id = args.id;
                let result = self
                    .gardener
                    .delete_task_result(&args.into())
                    .await
                    .with_context(|| format!("Failed to delete task {id}"))?;
                self.renderer.render(&result.to_string());
                Ok(())
            }
        }
    }

    pub async fn handle_slot_command(&self, command: SlotCommands) -> Result<()> {
        match command {
            SlotCommands::Fill(args) => {
                let location = args.location;
                let result = self
                    .gardener
                    .fill_slot_result(&args.into())
                    .await
                    .with_context(|| format!("Failed to fill slot {location}"))?;
                self.renderer.render(&result.to_string());
            }
            SlotCommands::Clear(args) => {
                let instance = self
                    .gardener
                    .clear_slot(&args.location)
                    .await
                    .with_context(|| format!("Failed to clear slot {}", args.location))?;
                self.renderer
                    .render(&format!("Cleared slot {}\n\n{instance}", args.location));
            }
        }
        Ok(())
    }

    pub async fn handle_instance_command(&self, command: InstanceCommands) -> Result<()> {
        match command {
            InstanceCommands::Show(args) => {
                let id = args.id;
                let instance = self
                    .gardener
                    .get_instance(&args.into())
                    .await
                    .context("Failed to load plant instance")?
                    .ok_or_else(|| anyhow!("Plant instance {id} not found"))?;
                let tasks = self
                    .gardener
                    .task_list(&ListTasks {
                        instance_id: Some(id),
                        all: true,
                        ..ListTasks::default()
                    })
                    .await
                    .context("Failed to list tasks")?;
                self.renderer.render(&format!("{instance}\n{tasks}"));
            }
            InstanceCommands::Move(args) => {
                let id = args.id;
                let result = self
                    .gardener
                    .move_instance_result(&args.into())
                    .await
                    .with_context(|| format!("Failed to move plant instance {id}"))?;
                self.renderer.render(&result.to_string());
            }
            InstanceCommands::Record(args) => {
                let id = args.id;
                let instance = self
                    .gardener
                    .record_history(&args.into())
                    .await
                    .with_context(|| format!("Failed to record history for {id}"))?;
                self.renderer.render(&instance.to_string());
            }
        }
        Ok(())
    }

    pub async fn handle_garden_command(&self, command: GardenCommands) -> Result<()> {
        let output = match command {
            GardenCommands::Add(args) => self
                .gardener
                .create_garden_result(&args.into())
                .await
                .context("Failed to add garden")?
                .to_string(),
            GardenCommands::List => self
                .gardener
                .garden_list()
                .await
                .context("Failed to list gardens")?
                .to_string(),
            GardenCommands::Retire(args) => {
                let garden = self
                    .gardener
                    .retire_garden(&args.into())
                    .await
                    .context("Failed to retire garden")?;
                format!("Retired garden {}\n", garden.name)
            }
        };
        self.renderer.render(&output);
        Ok(())
    }

    pub async fn handle_container_command(&self, command: ContainerCommands) -> Result<()> {
        let output = match command {
            ContainerCommands::Add(args) => self
                .gardener
                .create_container_result(&args.into())
                .await
                .context("Failed to add container")?
                .to_string(),
            ContainerCommands::List(args) => self
                .gardener
                .container_list(&args.into())
                .await
                .context("Failed to list containers")?
                .to_string(),
            ContainerCommands::Archive(args) => {
                let id = args.id;
                self.gardener
                    .set_container_archived_result(&args.into())
                    .await
                    .with_context(|| format!("Failed to archive container {id}"))?
                    .to_string()
            }
        };
        self.renderer.render(&output);
        Ok(())
    }

    pub async fn handle_plant_command(&self, command: PlantCommands) -> Result<()> {
        let output = match command {
            PlantCommands::Add(args) => self
                .gardener
                .create_plant_result(&args.into())
                .await
                .context("Failed to add plant")?
                .to_string(),
            PlantCommands::Update(args) => {
                let id = args.id;
                self.gardener
                    .update_plant_result(&args.into())
                    .await
                    .with_context(|| format!("Failed to update plant {id}"))?
                    .to_string()
            }
        };
        self.renderer.render(&output);
        Ok(())
    }

    pub async fn handle_frost_command(&self, command: FrostCommands) -> Result<()> {
        let output = match command {
            FrostCommands::Set(args) => {
                let zone = self
                    .gardener
                    .set_frost_dates(&args.into())
                    .await
                    .context("Failed to set frost dates")?;
                format!("# Frost dates for {}\n\n{zone}", self.gardener.user())
            }
            FrostCommands::Show => match self
                .gardener
                .get_frost_dates()
                .await
                .context("Failed to load frost dates")?
            {
                Some(zone) => format!("# Frost dates for {}\n\n{zone}", self.gardener.user()),
                None => "No frost dates set.\n".to_string(),
            },
        };
        self.renderer.render(&output);
        Ok(())
    }
}
