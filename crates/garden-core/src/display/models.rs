//! Display implementations for domain models.
//!
//! Output is markdown: headings for standalone resources, bullet metadata
//! underneath.

use std::fmt;

use crate::{
    models::{Container, Garden, GrowingZoneData, HistoryEvent, Plant, PlantInstance, Task},
    reconcile::ReconcileReport,
};

impl Task {
    /// Short completion marker for list output.
    pub fn status_icon(&self) -> &'static str {
        if self.is_completed() {
            "✓"
        } else {
            "○"
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} {}. {} ({})",
            self.status_icon(),
            self.id,
            self.text,
            self.kind
        )?;
        writeln!(f)?;

        if self.start == self.due {
            writeln!(f, "- Window: {}", self.start)?;
        } else {
            writeln!(f, "- Window: {} to {}", self.start, self.due)?;
        }
        if let Some(completed_on) = self.completed_on {
            writeln!(f, "- Completed: {completed_on}")?;
        }
        if !self.path.is_empty() {
            writeln!(f, "- Slot: {}", self.path)?;
        }
        if let Some(instance_id) = self.plant_instance_id {
            writeln!(f, "- Plant instance: {instance_id}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for HistoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to {
            Some(to) => write!(f, "{} {} from {} to {to}", self.date, self.status, self.from),
            None => write!(f, "{} {} at {}", self.date, self.status, self.from),
        }
    }
}

impl fmt::Display for PlantInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Plant instance {} at {}", self.id, self.location)?;
        writeln!(f)?;

        match self.plant_id {
            Some(plant_id) => writeln!(f, "- Plant: {plant_id}")?,
            None => writeln!(f, "- Plant: unknown")?,
        }
        writeln!(f, "- Started from: {}", self.started_from)?;
        writeln!(f, "- Count: {}", self.planted_count)?;
        writeln!(f, "- Created: {}", self.created)?;
        if self.closed {
            writeln!(f, "- Closed")?;
        }

        if self.history.is_empty() {
            writeln!(f, "\nNo history recorded.")?;
        } else {
            writeln!(f, "\n## History")?;
            writeln!(f)?;
            for event in &self.history {
                writeln!(f, "- {event}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- Garden: {}", self.garden_id)?;
        writeln!(f, "- Kind: {}", self.kind)?;
        writeln!(
            f,
            "- Grid: {}x{} ({} of {} slots planted)",
            self.rows,
            self.columns,
            self.occupied().len(),
            self.capacity()
        )?;
        if self.archived {
            writeln!(f, "- Archived")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Garden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "## {} (ID: {})", self.name, self.id)?;
        if self.retired {
            write!(f, " [retired]")?;
        }
        writeln!(f)?;
        writeln!(f)
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- Type: {}", self.plant_type)?;
        writeln!(f, "- Season: {}", self.season)?;
        writeln!(f)
    }
}

impl fmt::Display for GrowingZoneData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month_day = |date: Option<jiff::civil::Date>| match date {
            Some(d) => d.strftime("%B %-d").to_string(),
            None => "not set".to_string(),
        };
        writeln!(f, "- Last frost: {}", month_day(self.last_frost))?;
        writeln!(f, "- First frost: {}", month_day(self.first_frost))
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Reconciled {} plant instances: {} created, {} updated, {} deleted, {} kept",
            self.instances, self.created, self.updated, self.deleted, self.kept
        )
    }
}
