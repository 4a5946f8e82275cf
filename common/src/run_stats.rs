//! Aggregate statistics over repeated independent searches.

use super::*;
use serde::Serialize;

/// Summary of many searches over the same config.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub runs: usize,
    pub found: usize,
    pub bound_reached: usize,
    pub space_exhausted: usize,
    pub success_rate: f64,
    /// Iteration stats only cover runs that found the answer.
    pub min_iterations: Option<u64>,
    pub max_iterations: Option<u64>,
    pub mean_iterations: Option<f64>,
    pub mean_prefix_length: f64,
}

impl RunSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_outcomes(outcomes: &[SearchOutcome]) -> Self {
        let runs = outcomes.len();
        let successful: Vec<u64> = outcomes
            .iter()
            .filter(|o| o.status == SearchStatus::Found)
            .map(|o| o.iterations)
            .collect();
        let found = successful.len();
        let space_exhausted = outcomes.iter().filter(|o| o.space_exhausted).count();

        let mean = |total: f64, count: usize| {
            if count == 0 { 0.0 } else { total / count as f64 }
        };

        let mean_iterations = if successful.is_empty() {
            None
        } else {
            Some(mean(successful.iter().sum::<u64>() as f64, found))
        };
        let prefix_total: usize = outcomes.iter().map(|o| o.prefix.chars().count()).sum();

        Self {
            runs,
            found,
            bound_reached: runs - found - space_exhausted,
            space_exhausted,
            success_rate: mean(found as f64, runs),
            min_iterations: successful.iter().min().copied(),
            max_iterations: successful.iter().max().copied(),
            mean_iterations,
            mean_prefix_length: mean(prefix_total as f64, runs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: SearchStatus, iterations: u64, prefix: &str, space: bool) -> SearchOutcome {
        SearchOutcome {
            status,
            iterations,
            duplicates_skipped: 0,
            prefix: prefix.to_string(),
            solution: None,
            space_exhausted: space,
        }
    }

    #[test_log::test]
    fn test_summary() {
        let outcomes = vec![
            outcome(SearchStatus::Found, 260, "nsans", false),
            outcome(SearchStatus::Found, 2200, "nsa", false),
            outcome(SearchStatus::Exhausted, 5000, "ns", false),
            outcome(SearchStatus::Exhausted, 140, "nsanww", true),
        ];
        let summary = RunSummary::from_outcomes(&outcomes);
        assert_eq!(summary.runs, 4);
        assert_eq!(summary.found, 2);
        assert_eq!(summary.bound_reached, 1);
        assert_eq!(summary.space_exhausted, 1);
        assert!((summary.success_rate - 0.5).abs() < f64::EPSILON);
        assert_eq!(summary.min_iterations, Some(260));
        assert_eq!(summary.max_iterations, Some(2200));
        assert_eq!(summary.mean_iterations, Some(1230.0));
        assert!((summary.mean_prefix_length - 4.0).abs() < f64::EPSILON);
    }

    #[test_log::test]
    fn test_empty_summary() {
        let summary = RunSummary::from_outcomes(&[]);
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.found, 0);
        assert_eq!(summary.mean_iterations, None);
        assert_eq!(summary.min_iterations, None);
        assert!(summary.success_rate.abs() < f64::EPSILON);
    }

    #[test_log::test]
    fn test_no_successes() {
        let outcomes = vec![outcome(SearchStatus::Exhausted, 5000, "", false)];
        let summary = RunSummary::from_outcomes(&outcomes);
        assert_eq!(summary.bound_reached, 1);
        assert_eq!(summary.max_iterations, None);
        assert_eq!(summary.mean_prefix_length, 0.0);
    }
}
