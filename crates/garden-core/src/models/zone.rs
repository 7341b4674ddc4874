//! Per-grower frost dates.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A grower's frost dates. Only the month and day are meaningful; the year
/// is chosen per pass by [`crate::calendar::season_anchor_date`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrowingZoneData {
    /// Anchor for spring schedules
    pub last_frost: Option<Date>,
    /// Anchor for fall schedules
    pub first_frost: Option<Date>,
}
