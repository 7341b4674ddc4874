//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{Container, Garden, Task};

/// Newtype wrapper for displaying a list of tasks.
///
/// Handles empty lists with a short notice instead of printing nothing.
#[derive(Debug, Clone, Default)]
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }

    /// Number of tasks still open.
    pub fn open_count(&self) -> usize {
        self.0.iter().filter(|t| t.is_open()).count()
    }
}

impl Index<usize> for Tasks {
    type Output = Task;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Tasks {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No tasks found.")
        } else {
            for task in &self.0 {
                write!(f, "{task}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the containers of a garden.
#[derive(Debug, Clone, Default)]
pub struct Containers(pub Vec<Container>);

impl fmt::Display for Containers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No containers found.")
        } else {
            for container in &self.0 {
                write!(f, "{container}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a grower's gardens.
#[derive(Debug, Clone, Default)]
pub struct Gardens(pub Vec<Garden>);

impl fmt::Display for Gardens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No gardens found.")
        } else {
            for garden in &self.0 {
                write!(f, "{garden}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::TaskKind;

    fn task(id: u64, text: &str, completed: bool) -> Task {
        Task {
            id,
            kind: TaskKind::Custom,
            text: text.to_string(),
            start: date(2024, 4, 1),
            due: date(2024, 4, 3),
            completed_on: completed.then(|| date(2024, 4, 2)),
            plant_instance_id: None,
            container_id: None,
            sequence: 0,
            schedule: None,
            path: String::new(),
        }
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(format!("{}", Tasks::default()), "No tasks found.\n");
        assert_eq!(format!("{}", Containers::default()), "No containers found.\n");
        assert_eq!(format!("{}", Gardens::default()), "No gardens found.\n");
    }

    #[test]
    fn test_tasks_keep_order() {
        let tasks = Tasks(vec![task(2, "Weed", false), task(1, "Water", true)]);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks.open_count(), 1);
        assert_eq!(tasks[1].text, "Water");

        let output = format!("{tasks}");
        let weed = output.find("Weed").unwrap();
        let water = output.find("Water").unwrap();
        assert!(weed < water);
    }
}
