//! Data models for gardens, containers, plant instances, tasks and growth
//! data.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so presentation stays separate from the data
//! structures the reconciler works on.
//!
//! # Examples
//!
//! ```rust
//! use garden_core::models::{History, HistoryEvent, HistoryStatus, Location};
//! use jiff::civil::date;
//!
//! let at = Location::new(1, 4, false);
//! let mut history = History::new();
//! history.insert(HistoryEvent::new(HistoryStatus::Harvested, date(2024, 8, 1), at));
//! history.insert(HistoryEvent::new(HistoryStatus::Planted, date(2024, 5, 1), at));
//!
//! // Always kept in date order
//! assert_eq!(history.events()[0].status, HistoryStatus::Planted);
//! assert!(history.is_ordered());
//! ```

pub mod container;
pub mod filters;
pub mod growth;
pub mod instance;
pub mod location;
pub mod plant;
pub mod status;
pub mod task;
pub mod zone;

#[cfg(test)]
mod tests;

pub use container::{Container, Garden, Slot, SlotEntry};
pub use filters::TaskFilter;
pub use growth::{
    DayRange, FertilizeFrom, FertilizerApplication, GrowthData, IndoorRange, OffsetRange,
    PlantGrowthData, SeasonGrowth,
};
pub use instance::{History, HistoryEvent, NewPlantInstance, PlantInstance};
pub use location::Location;
pub use plant::Plant;
pub use status::{ContainerKind, HistoryStatus, Season, StartedFrom, TaskKind};
pub use task::{NewTask, Task, TaskUpdate};
pub use zone::GrowingZoneData;
