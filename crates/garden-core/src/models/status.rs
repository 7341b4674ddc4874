//! Enumerations shared by tasks, containers, instances and growth data.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Kind of a task. Every kind except [`TaskKind::Custom`] is owned by the
/// reconciler.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Sow seeds or set out a purchased transplant
    Plant,
    /// Move a seedling out of an indoor container
    Transplant,
    /// Harvest a mature plant
    Harvest,
    /// Apply fertilizer
    Fertilize,
    /// Grower-authored task the reconciler never touches
    Custom,
}

impl TaskKind {
    /// Task kinds evaluated by a reconciliation pass, in evaluation order.
    pub const RECONCILED: [TaskKind; 4] = [
        TaskKind::Plant,
        TaskKind::Transplant,
        TaskKind::Harvest,
        TaskKind::Fertilize,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Plant => "plant",
            TaskKind::Transplant => "transplant",
            TaskKind::Harvest => "harvest",
            TaskKind::Fertilize => "fertilize",
            TaskKind::Custom => "custom",
        }
    }

    /// Whether tasks of this kind are created and removed by reconciliation.
    pub fn is_reconciled(&self) -> bool {
        !matches!(self, TaskKind::Custom)
    }

    /// The history status recorded when a task of this kind is completed.
    pub fn history_status(&self) -> Option<HistoryStatus> {
        match self {
            TaskKind::Plant => Some(HistoryStatus::Planted),
            TaskKind::Transplant => Some(HistoryStatus::Transplanted),
            TaskKind::Harvest => Some(HistoryStatus::Harvested),
            TaskKind::Fertilize => Some(HistoryStatus::Fertilized),
            TaskKind::Custom => None,
        }
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plant" => Ok(TaskKind::Plant),
            "transplant" => Ok(TaskKind::Transplant),
            "harvest" => Ok(TaskKind::Harvest),
            "fertilize" => Ok(TaskKind::Fertilize),
            "custom" => Ok(TaskKind::Custom),
            _ => Err(format!("Invalid task kind: {s}")),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one entry in a plant instance's history log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Planted,
    Transplanted,
    Harvested,
    Fertilized,
}

impl HistoryStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryStatus::Planted => "planted",
            HistoryStatus::Transplanted => "transplanted",
            HistoryStatus::Harvested => "harvested",
            HistoryStatus::Fertilized => "fertilized",
        }
    }
}

impl FromStr for HistoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planted" => Ok(HistoryStatus::Planted),
            "transplanted" => Ok(HistoryStatus::Transplanted),
            "harvested" => Ok(HistoryStatus::Harvested),
            "fertilized" => Ok(HistoryStatus::Fertilized),
            _ => Err(format!("Invalid history status: {s}")),
        }
    }
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Growing season a plant is scheduled for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Anchored on the grower's last frost
    #[default]
    Spring,
    /// Anchored on the grower's first frost
    Fall,
}

impl Season {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Fall => "fall",
        }
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "fall" | "autumn" => Ok(Season::Fall),
            _ => Err(format!("Invalid season: {s}")),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Growing environment of a container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Inside,
    Outside,
}

impl ContainerKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Inside => "inside",
            ContainerKind::Outside => "outside",
        }
    }
}

impl FromStr for ContainerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inside" | "indoor" => Ok(ContainerKind::Inside),
            "outside" | "outdoor" => Ok(ContainerKind::Outside),
            _ => Err(format!("Invalid container kind: {s}")),
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a plant instance began, and where a plant's maturity is counted from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StartedFrom {
    #[default]
    Seed,
    Transplant,
}

impl StartedFrom {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StartedFrom::Seed => "seed",
            StartedFrom::Transplant => "transplant",
        }
    }
}

impl FromStr for StartedFrom {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seed" => Ok(StartedFrom::Seed),
            "transplant" => Ok(StartedFrom::Transplant),
            _ => Err(format!("Invalid start: {s}")),
        }
    }
}

impl fmt::Display for StartedFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
