//! Result wrapper types for displaying operation outcomes.
//!
//! Each wrapper prints a one-line confirmation naming the resource kind and
//! ID, followed by the resource itself.

use std::fmt;

use crate::models::{Container, Garden, Plant, PlantInstance, Task};

/// A resource that operation results can name.
pub trait Resource: fmt::Display {
    /// Lowercase noun used in confirmation lines
    const KIND: &'static str;

    fn resource_id(&self) -> u64;
}

impl Resource for Task {
    const KIND: &'static str = "task";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

impl Resource for PlantInstance {
    const KIND: &'static str = "plant instance";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

impl Resource for Container {
    const KIND: &'static str = "container";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

impl Resource for Garden {
    const KIND: &'static str = "garden";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

impl Resource for Plant {
    const KIND: &'static str = "plant";

    fn resource_id(&self) -> u64 {
        self.id
    }
}

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::KIND, self.resource.resource_id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// Can carry a list of human-readable changes shown above the resource.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.resource_id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted task '{}' (ID: {})",
            self.resource.text, self.resource.id
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{Season, TaskKind};

    #[test]
    fn test_create_result_names_the_resource() {
        let plant = Plant {
            id: 5,
            user: "default".to_string(),
            name: "Sungold".to_string(),
            plant_type: "tomato".to_string(),
            season: Season::Spring,
        };
        let output = format!("{}", CreateResult::new(plant));
        assert!(output.starts_with("Created plant with ID: 5\n"));
        assert!(output.contains("- Type: tomato"));
    }

    #[test]
    fn test_update_result_lists_changes() {
        let garden = Garden {
            id: 2,
            user: "default".to_string(),
            name: "Allotment".to_string(),
            retired: true,
        };
        let output = format!(
            "{}",
            UpdateResult::with_changes(garden, vec!["Retired".to_string()])
        );
        assert!(output.starts_with("Updated garden with ID: 2"));
        assert!(output.contains("Changes made:\n- Retired"));
        assert!(output.contains("[retired]"));
    }

    #[test]
    fn test_delete_result() {
        let task = Task {
            id: 9,
            kind: TaskKind::Custom,
            text: "Order seeds".to_string(),
            start: date(2024, 1, 10),
            due: date(2024, 1, 10),
            completed_on: None,
            plant_instance_id: None,
            container_id: None,
            sequence: 0,
            schedule: None,
            path: String::new(),
        };
        assert_eq!(
            format!("{}", DeleteResult::new(task)),
            "Deleted task 'Order seeds' (ID: 9)\n"
        );
    }
}
