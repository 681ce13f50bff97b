use serde::{Deserialize, Serialize};

/// What happened to the resource file of one input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Created,
    Overwritten,
    Skipped,
}

/// Aggregate counts for one generator run
///
/// Threaded through the pipeline by mutable reference and returned at the
/// end; counters only ever increase and errors are only appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub created: usize,
    pub overwritten: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created => self.created += 1,
            Outcome::Overwritten => self.overwritten += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    /// An abandoned input: counted as failed, message kept for the report
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(message.into());
    }

    /// An abandoned input that is reported as a warning (e.g. not a model)
    pub fn record_warning(&mut self, message: impl Into<String>) {
        self.failed += 1;
        self.warnings.push(message.into());
    }

    /// A non-fatal error that did not stop the input from being written
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let mut summary = RunSummary::new(4);
        summary.record(Outcome::Created);
        summary.record(Outcome::Created);
        summary.record(Outcome::Skipped);
        summary.record_failure("App\\Models\\Ghost could not be loaded");

        assert_eq!(summary.created, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.overwritten, 0);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.errors.len(), 1);
    }

    #[test]
    fn test_warnings_count_as_failed_but_not_errors() {
        let mut summary = RunSummary::new(1);
        summary.record_warning("App\\Models\\Money is not a valid model class.");

        assert_eq!(summary.failed, 1);
        assert!(!summary.has_errors());
        assert_eq!(summary.warnings.len(), 1);
    }

    #[test]
    fn test_record_error_does_not_count_as_failure() {
        let mut summary = RunSummary::new(1);
        summary.record_error("Error while executing method App\\Models\\Post::author");
        summary.record(Outcome::Overwritten);

        assert!(summary.has_errors());
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.overwritten, 1);
    }
}
