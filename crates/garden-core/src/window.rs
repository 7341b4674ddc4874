//! Growth window resolution.
//!
//! Maps growth data, container environment and known history dates to the
//! `{start, due}` window of each single-shot task kind. A `None` result means
//! "this task should not exist", never an error.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{add_days, is_valid_date, sub_days},
    models::{ContainerKind, GrowthData, OffsetRange, StartedFrom},
};

/// Days added to `due` when a maturity range pins a single day.
pub const HARVEST_GRACE_DAYS: i64 = 14;

/// A validated task window with `start <= due`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Window {
    pub start: Date,
    pub due: Date,
}

impl Window {
    /// Builds a window from two computed dates in either order. Rejects
    /// missing or implausible dates.
    pub fn between(a: Option<Date>, b: Option<Date>) -> Option<Self> {
        let (a, b) = (a?, b?);
        if !is_valid_date(a) || !is_valid_date(b) {
            return None;
        }
        Some(Self {
            start: a.min(b),
            due: a.max(b),
        })
    }

    /// Shifts both ends by their own offsets.
    fn offset(&self, start_days: i64, due_days: i64) -> Option<Self> {
        Self::between(add_days(self.start, start_days), add_days(self.due, due_days))
    }
}

/// Inputs shared by every window computation for one plant instance.
#[derive(Debug, Clone, Copy)]
pub struct GrowthWindowResolver<'a> {
    pub growth: &'a GrowthData,
    pub container_kind: ContainerKind,
    /// Frost-derived season anchor, when the grower has one
    pub anchor: Option<Date>,
    /// Date the slot was filled, anchoring direct-sow offsets
    pub created: Date,
    pub started_from: StartedFrom,
}

impl<'a> GrowthWindowResolver<'a> {
    /// Window for sowing or setting out the plant.
    ///
    /// Outside containers use the `outdoor` offsets whether the instance
    /// started from seed or from a bought transplant.
    pub fn planted(&self) -> Option<Window> {
        let season = &self.growth.growth;
        match self.container_kind {
            ContainerKind::Inside => {
                let indoor = season.indoor.as_ref()?;
                self.before_anchor(indoor.min, indoor.max)
            }
            ContainerKind::Outside => season
                .outdoor
                .and_then(|outdoor| self.before_anchor(outdoor.min, outdoor.max))
                .or_else(|| season.plant.and_then(|plant| self.direct_sow(plant))),
        }
    }

    /// Window for moving a seedling out of an inside container.
    ///
    /// Once a planted date is known the window counts forward from it;
    /// before that it is previewed from the anchor so the task can show up
    /// alongside the plant task.
    pub fn transplanted(&self, planted: Option<Date>) -> Option<Window> {
        if self.container_kind != ContainerKind::Inside {
            return None;
        }
        let indoor = self.growth.growth.indoor.as_ref()?;
        match planted {
            Some(planted) => Window::between(
                add_days(planted, i64::from(indoor.transplant_min)),
                add_days(planted, i64::from(indoor.transplant_max)),
            ),
            None => self.transplant_preview(),
        }
    }

    /// Window for harvesting.
    ///
    /// Counts `planted + germination + maturity`, or `transplant + maturity`
    /// when maturity is measured from transplanting and the plant is (or
    /// will be) moved. An unknown transplant date is previewed from the
    /// transplant window.
    pub fn harvest(&self, planted: Option<Date>, transplanted: Option<Date>) -> Option<Window> {
        if !self.growth.harvestable {
            return None;
        }
        let (maturity_low, maturity_high) = self.growth.days_to_maturity.bounds()?;

        let counts_from_transplant = self.growth.maturity_from == StartedFrom::Transplant
            || self.started_from == StartedFrom::Transplant;

        let base = if let (true, Some(transplanted)) = (counts_from_transplant, transplanted) {
            Window::between(Some(transplanted), Some(transplanted))?
        } else if counts_from_transplant && self.started_from == StartedFrom::Transplant {
            let planted = planted?;
            Window::between(Some(planted), Some(planted))?
        } else if counts_from_transplant && self.container_kind == ContainerKind::Inside {
            self.transplanted(planted)?
        } else {
            let planted = planted?;
            let (germ_low, germ_high) = self.growth.days_to_germinate.bounds().unwrap_or((0, 0));
            Window::between(
                add_days(planted, i64::from(germ_low)),
                add_days(planted, i64::from(germ_high)),
            )?
        };

        let grace = if self.growth.days_to_maturity.is_collapsed() {
            HARVEST_GRACE_DAYS
        } else {
            0
        };
        base.offset(
            i64::from(maturity_low),
            i64::from(maturity_high).checked_add(grace)?,
        )
    }

    fn before_anchor(&self, min: i32, max: i32) -> Option<Window> {
        let anchor = self.anchor?;
        Window::between(
            sub_days(anchor, i64::from(min)),
            sub_days(anchor, i64::from(max)),
        )
    }

    fn transplant_preview(&self) -> Option<Window> {
        let indoor = self.growth.growth.indoor.as_ref()?;
        self.before_anchor(
            indoor.min.checked_sub(indoor.transplant_min)?,
            indoor.max.checked_sub(indoor.transplant_max)?,
        )
    }

    fn direct_sow(&self, plant: OffsetRange) -> Option<Window> {
        Window::between(
            add_days(self.created, i64::from(plant.min)),
            add_days(self.created, i64::from(plant.max)),
        )
    }
}
