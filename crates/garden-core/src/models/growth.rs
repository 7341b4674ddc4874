//! Horticultural growth data as read from the growth catalog.
//!
//! Offsets in [`OffsetRange`] and [`IndoorRange`] count days *before* the
//! season anchor date (so `min` is normally the larger number), while
//! [`DayRange`] counts durations forward.

use serde::{Deserialize, Serialize};

use super::{Season, StartedFrom};

/// A `[min, max]` duration in days where either side may be unknown.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayRange(pub Option<i32>, pub Option<i32>);

impl DayRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self(Some(min), Some(max))
    }

    /// Ordered `(low, high)` bounds, filling a missing side from the other.
    /// `None` when neither side is known.
    pub fn bounds(&self) -> Option<(i32, i32)> {
        let (low, high) = match (self.0, self.1) {
            (Some(min), Some(max)) => (min, max),
            (Some(only), None) | (None, Some(only)) => (only, only),
            (None, None) => return None,
        };
        Some((low.min(high), low.max(high)))
    }

    /// True when the range pins a single day.
    pub fn is_collapsed(&self) -> bool {
        self.bounds().is_some_and(|(low, high)| low == high)
    }
}

/// Pair of day offsets before the season anchor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OffsetRange {
    pub min: i32,
    pub max: i32,
}

/// Indoor seed-starting schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndoorRange {
    /// Earliest sowing, in days before the anchor
    pub min: i32,
    /// Latest sowing, in days before the anchor
    pub max: i32,
    /// Days after sowing the seedling can move out, paired with `min`
    pub transplant_min: i32,
    /// Days after sowing the seedling can move out, paired with `max`
    pub transplant_max: i32,
    /// Fertilizer schedule while the plant is indoors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilize: Option<Vec<FertilizerApplication>>,
}

/// Date a fertilizer application is counted from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FertilizeFrom {
    #[default]
    Planted,
    Transplanted,
}

/// One fertilizer application in an ordered schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FertilizerApplication {
    /// Days after the anchor the window opens
    pub start: i32,
    /// Length of the window in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i32>,
    #[serde(default)]
    pub from: FertilizeFrom,
    /// Count from the previous application's completion instead of the anchor
    #[serde(default)]
    pub relative: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FertilizerApplication {
    pub const DEFAULT_WINDOW_DAYS: i32 = 7;

    /// Window length, defaulting to a week.
    pub fn window_days(&self) -> i32 {
        self.end.unwrap_or(Self::DEFAULT_WINDOW_DAYS)
    }
}

/// Scheduling rules for one season.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonGrowth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indoor: Option<IndoorRange>,
    /// Direct-sow offsets in days after the slot was filled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant: Option<OffsetRange>,
    /// Outdoor planting offsets before the anchor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdoor: Option<OffsetRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilize: Option<Vec<FertilizerApplication>>,
}

/// Catalog entry for one plant type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantGrowthData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spring: Option<SeasonGrowth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fall: Option<SeasonGrowth>,
    #[serde(default)]
    pub harvestable: bool,
    #[serde(default)]
    pub maturity_from: StartedFrom,
    #[serde(default)]
    pub days_to_germinate: DayRange,
    #[serde(default)]
    pub days_to_maturity: DayRange,
}

impl PlantGrowthData {
    /// Resolves the entry for one season. `None` when the season has no
    /// block.
    pub fn for_season(&self, season: Season) -> Option<GrowthData> {
        let block = match season {
            Season::Spring => self.spring.as_ref(),
            Season::Fall => self.fall.as_ref(),
        }?;
        Some(GrowthData {
            season,
            growth: block.clone(),
            harvestable: self.harvestable,
            maturity_from: self.maturity_from,
            days_to_germinate: self.days_to_germinate,
            days_to_maturity: self.days_to_maturity,
        })
    }
}

/// Growth data resolved for one season, as handed to the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthData {
    pub season: Season,
    pub growth: SeasonGrowth,
    pub harvestable: bool,
    pub maturity_from: StartedFrom,
    pub days_to_germinate: DayRange,
    pub days_to_maturity: DayRange,
}
