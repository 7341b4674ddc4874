//! Read-only queries over a plant instance's history log.

use jiff::civil::Date;

use crate::models::{History, HistoryEvent, HistoryStatus, Location};

/// Query view over a date-ordered history.
#[derive(Debug, Clone, Copy)]
pub struct HistoryQuery<'a> {
    events: &'a [HistoryEvent],
}

impl<'a> HistoryQuery<'a> {
    pub fn new(history: &'a History) -> Self {
        Self {
            events: history.events(),
        }
    }

    /// Earliest planted event, wherever it happened.
    pub fn first_planted(&self) -> Option<&'a HistoryEvent> {
        self.events
            .iter()
            .find(|e| e.status == HistoryStatus::Planted)
    }

    /// Date the instance was first planted.
    pub fn planted_date(&self) -> Option<Date> {
        self.first_planted().map(|e| e.date)
    }

    /// Most recent transplant that moved the instance into `location`.
    pub fn transplanted_into(&self, location: &Location) -> Option<&'a HistoryEvent> {
        self.events
            .iter()
            .rev()
            .find(|e| e.status == HistoryStatus::Transplanted && e.to.as_ref() == Some(location))
    }

    /// Earliest event with `status` recorded while the instance was at
    /// `location`.
    pub fn event_at(&self, status: HistoryStatus, location: &Location) -> Option<&'a HistoryEvent> {
        self.events
            .iter()
            .find(|e| e.status == status && e.from == *location)
    }

    /// Date of the transplant that brought the instance into `location`, or
    /// failing that the transplant that took it out of `location`.
    pub fn transplant_date(&self, location: &Location) -> Option<Date> {
        self.transplanted_into(location)
            .or_else(|| self.event_at(HistoryStatus::Transplanted, location))
            .map(|e| e.date)
    }

    /// Every event with the given status, oldest first.
    pub fn with_status(&self, status: HistoryStatus) -> impl Iterator<Item = &'a HistoryEvent> {
        self.events.iter().filter(move |e| e.status == status)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn inside() -> Location {
        Location::new(1, 0, false)
    }

    fn bed() -> Location {
        Location::new(2, 5, false)
    }

    fn history() -> History {
        let mut history = History::new();
        history.insert(HistoryEvent::transplanted(date(2024, 4, 20), inside(), bed()));
        history.insert(HistoryEvent::new(HistoryStatus::Planted, date(2024, 3, 5), inside()));
        history.insert(HistoryEvent::new(HistoryStatus::Harvested, date(2024, 7, 1), bed()));
        history.insert(HistoryEvent::new(HistoryStatus::Harvested, date(2024, 7, 9), bed()));
        history
    }

    #[test]
    fn test_planted_date_is_earliest_planted_event() {
        let mut history = history();
        history.insert(HistoryEvent::new(HistoryStatus::Planted, date(2024, 5, 1), bed()));
        assert_eq!(HistoryQuery::new(&history).planted_date(), Some(date(2024, 3, 5)));
        assert_eq!(HistoryQuery::new(&History::new()).planted_date(), None);
    }

    #[test]
    fn test_transplanted_into_location() {
        let history = history();
        let query = HistoryQuery::new(&history);
        assert_eq!(
            query.transplanted_into(&bed()).map(|e| e.date),
            Some(date(2024, 4, 20))
        );
        assert!(query.transplanted_into(&inside()).is_none());
    }

    #[test]
    fn test_transplant_date_checks_both_directions() {
        let history = history();
        let query = HistoryQuery::new(&history);
        assert_eq!(query.transplant_date(&bed()), Some(date(2024, 4, 20)));
        assert_eq!(query.transplant_date(&inside()), Some(date(2024, 4, 20)));
        assert_eq!(query.transplant_date(&Location::new(9, 9, true)), None);
    }

    #[test]
    fn test_event_at_returns_first_match_at_location() {
        let history = history();
        let query = HistoryQuery::new(&history);
        assert_eq!(
            query.event_at(HistoryStatus::Harvested, &bed()).map(|e| e.date),
            Some(date(2024, 7, 1))
        );
        assert!(query.event_at(HistoryStatus::Harvested, &inside()).is_none());
        assert_eq!(query.with_status(HistoryStatus::Harvested).count(), 2);
    }
}
