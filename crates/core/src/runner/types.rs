//! Types for the runner module.

use serde::{Deserialize, Serialize};

use crate::job::TaskResult;

/// Outcome of running a task list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of tasks run.
    pub total: usize,
    /// Tasks that finished without an error.
    pub success_count: usize,
    /// Tasks that finished with an error.
    pub failure_count: usize,
    /// Warnings across all results.
    pub warning_count: usize,
    /// One result per task, in task order.
    pub results: Vec<TaskResult>,
}

impl RunSummary {
    /// Tallies `results`, which must already be in task order.
    pub fn from_results(results: Vec<TaskResult>) -> Self {
        let failure_count = results.iter().filter(|r| !r.is_success()).count();
        Self {
            total: results.len(),
            success_count: results.len() - failure_count,
            failure_count,
            warning_count: results.iter().map(|r| r.warnings.len()).sum(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::Task;

    #[test]
    fn test_from_results_counts() {
        let results = vec![
            TaskResult::success(Task::new("/a.md", "/a.docx")).with_warnings(["w1", "w2"]),
            TaskResult::failure(Task::new("/b.md", "/b.docx"), "boom").with_warnings(["w3"]),
            TaskResult::success(Task::new("/c.md", "/c.docx")),
        ];
        let summary = RunSummary::from_results(results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failure_count, 1);
        assert_eq!(summary.warning_count, 3);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(RunSummary::from_results(vec![]), RunSummary::default());
    }
}
