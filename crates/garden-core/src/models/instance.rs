//! Plant instances and their history log.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{HistoryStatus, Location, StartedFrom};

/// One entry of a plant instance's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEvent {
    pub status: HistoryStatus,
    pub date: Date,
    /// Where the instance was when the event happened
    pub from: Location,
    /// Destination of a transplant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Location>,
}

impl HistoryEvent {
    pub fn new(status: HistoryStatus, date: Date, from: Location) -> Self {
        Self {
            status,
            date,
            from,
            to: None,
        }
    }

    /// Builds a transplant event moving the instance from `from` to `to`.
    pub fn transplanted(date: Date, from: Location, to: Location) -> Self {
        Self {
            status: HistoryStatus::Transplanted,
            date,
            from,
            to: Some(to),
        }
    }
}

/// Append-only history log kept in ascending date order.
///
/// Events sharing a date keep their insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<HistoryEvent>", into = "Vec<HistoryEvent>")]
pub struct History(Vec<HistoryEvent>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an event at its date-ordered position and returns that index.
    pub fn insert(&mut self, event: HistoryEvent) -> usize {
        let index = self.0.partition_point(|e| e.date <= event.date);
        self.0.insert(index, event);
        index
    }

    pub fn events(&self) -> &[HistoryEvent] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEvent> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks the ordering invariant.
    pub fn is_ordered(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0].date <= pair[1].date)
    }
}

impl From<Vec<HistoryEvent>> for History {
    fn from(mut events: Vec<HistoryEvent>) -> Self {
        events.sort_by_key(|e| e.date);
        Self(events)
    }
}

impl From<History> for Vec<HistoryEvent> {
    fn from(history: History) -> Self {
        history.0
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEvent;
    type IntoIter = std::slice::Iter<'a, HistoryEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One physical planting occupying a slot over its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantInstance {
    /// Unique identifier for the instance
    pub id: u64,

    /// Current slot coordinates
    pub location: Location,

    /// Plant growing in the slot, if still known
    pub plant_id: Option<u64>,

    pub started_from: StartedFrom,

    pub planted_count: u32,

    /// Closed instances were removed from their container and get no new work
    #[serde(default)]
    pub closed: bool,

    /// Date the slot was filled
    pub created: Date,

    #[serde(default)]
    pub history: History,
}

/// Values needed to create a plant instance.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlantInstance {
    pub location: Location,
    pub plant_id: Option<u64>,
    pub started_from: StartedFrom,
    pub planted_count: u32,
    pub created: Date,
}
