//! Grower-defined plants.

use serde::{Deserialize, Serialize};

use super::Season;

/// A plant a grower has added to their list, keyed into the growth catalog
/// by `plant_type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plant {
    pub id: u64,
    pub user: String,
    /// Display name used in task text
    pub name: String,
    /// Growth catalog key
    pub plant_type: String,
    /// Which season block of the catalog entry applies
    #[serde(default)]
    pub season: Season,
}
