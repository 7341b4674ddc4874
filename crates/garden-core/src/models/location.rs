//! Slot coordinates.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Coordinates of a slot or sub-slot: the identity key for "where a plant
/// instance lives".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    /// Container holding the slot
    pub container_id: u64,

    /// Index of the slot inside the container (`row * columns + column`)
    pub slot: u32,

    /// Whether this addresses the companion planting sharing the slot
    #[serde(default)]
    pub sub_slot: bool,
}

impl Location {
    pub fn new(container_id: u64, slot: u32, sub_slot: bool) -> Self {
        Self {
            container_id,
            slot,
            sub_slot,
        }
    }

    /// Slot locator string stored on tasks, e.g. `3/12` or `3/12/sub`.
    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container_id, self.slot)?;
        if self.sub_slot {
            f.write_str("/sub")?;
        }
        Ok(())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let container_id = parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .ok_or_else(|| format!("Invalid location '{s}': expected CONTAINER/SLOT[/sub]"))?;
        let slot = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(|| format!("Invalid location '{s}': missing slot index"))?;
        let sub_slot = match parts.next() {
            None => false,
            Some("sub") => true,
            Some(other) => return Err(format!("Invalid location '{s}': unexpected '{other}'")),
        };
        if parts.next().is_some() {
            return Err(format!("Invalid location '{s}': too many segments"));
        }
        Ok(Self::new(container_id, slot, sub_slot))
    }
}
