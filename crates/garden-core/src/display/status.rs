//! One-line confirmation messages.

use std::fmt;

/// Outcome line printed after commands that have no resource to show, such
/// as a reconciliation pass or a bulk completion.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "**{label}** {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Completed 3 harvest tasks");
        assert_eq!(format!("{success}"), "**Success:** Completed 3 harvest tasks\n");

        let failure = OperationStatus::failure("Nothing to complete");
        assert!(format!("{failure}").starts_with("**Error:**"));
    }
}
