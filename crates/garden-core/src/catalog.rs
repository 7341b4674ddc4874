//! Growth catalog backed by a JSON document.
//!
//! The document maps a plant type to its [`PlantGrowthData`]:
//!
//! ```json
//! {
//!   "tomato": {
//!     "spring": {
//!       "indoor": { "min": 60, "max": 50, "transplant_min": 20, "transplant_max": 14 },
//!       "outdoor": { "min": 14, "max": 7 },
//!       "fertilize": [{ "start": 14, "from": "transplanted", "description": "fish emulsion" }]
//!     },
//!     "harvestable": true,
//!     "maturity_from": "transplant",
//!     "days_to_germinate": [5, 10],
//!     "days_to_maturity": [60, 80]
//!   }
//! }
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{GardenError, Result},
    models::{GrowthData, PlantGrowthData, Season},
    store::GrowthDataSource,
};

/// Read-only lookup of growth data by plant type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct GrowthCatalog {
    entries: BTreeMap<String, PlantGrowthData>,
}

impl GrowthCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a catalog file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| GardenError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// Adds or replaces the entry for a plant type.
    pub fn insert(&mut self, plant_type: impl Into<String>, data: PlantGrowthData) {
        self.entries.insert(plant_type.into(), data);
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, plant_type: impl Into<String>, data: PlantGrowthData) -> Self {
        self.insert(plant_type, data);
        self
    }

    pub fn get(&self, plant_type: &str) -> Option<&PlantGrowthData> {
        self.entries.get(plant_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GrowthDataSource for GrowthCatalog {
    fn lookup(&self, plant_type: &str, season: Season) -> Option<GrowthData> {
        self.entries.get(plant_type)?.for_season(season)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayRange, FertilizeFrom, StartedFrom};

    const CATALOG: &str = r#"{
        "tomato": {
            "spring": {
                "indoor": { "min": 60, "max": 50, "transplant_min": 20, "transplant_max": 14 },
                "outdoor": { "min": 14, "max": 7 },
                "fertilize": [
                    { "start": 14, "from": "transplanted", "description": "fish emulsion" },
                    { "start": 21, "end": 3, "relative": true }
                ]
            },
            "harvestable": true,
            "maturity_from": "transplant",
            "days_to_germinate": [5, 10],
            "days_to_maturity": [60, null]
        },
        "garlic": {
            "fall": { "plant": { "min": 0, "max": 14 } }
        }
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = GrowthCatalog::from_json(CATALOG).expect("catalog should parse");
        assert_eq!(catalog.len(), 2);

        let tomato = catalog.get("tomato").unwrap();
        assert!(tomato.harvestable);
        assert_eq!(tomato.maturity_from, StartedFrom::Transplant);
        assert_eq!(tomato.days_to_germinate, DayRange::new(5, 10));
        assert_eq!(tomato.days_to_maturity, DayRange(Some(60), None));

        let fertilize = tomato.spring.as_ref().unwrap().fertilize.as_ref().unwrap();
        assert_eq!(fertilize[0].from, FertilizeFrom::Transplanted);
        assert_eq!(fertilize[0].window_days(), 7);
        assert!(fertilize[1].relative);
        assert_eq!(fertilize[1].window_days(), 3);
    }

    #[test]
    fn test_lookup_by_season() {
        let catalog = GrowthCatalog::from_json(CATALOG).unwrap();

        let spring = catalog.lookup("tomato", Season::Spring).unwrap();
        assert_eq!(spring.season, Season::Spring);
        assert!(spring.growth.indoor.is_some());

        assert!(catalog.lookup("tomato", Season::Fall).is_none());
        assert!(catalog.lookup("garlic", Season::Fall).is_some());
        assert!(catalog.lookup("okra", Season::Spring).is_none());
    }

    #[test]
    fn test_invalid_json_is_a_serialization_error() {
        let err = GrowthCatalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GardenError::Serialization { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GrowthCatalog::load("/definitely/not/here/growth.json").unwrap_err();
        assert!(matches!(err, GardenError::FileSystem { .. }));
    }
}
