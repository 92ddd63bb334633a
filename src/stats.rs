//! Convergence trace statistics.

use crate::engine::ResultRecord;
use crate::problem::Objective;

/// Summary of how far a run moved from its first convergence point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceSummary {
    pub initial: f64,
    pub final_value: f64,
    /// Progress in the direction of the objective; never negative for a
    /// monotone trace.
    pub improvement: f64,
    /// `improvement / |initial| · 100`, or 0 when `initial` is 0.
    pub improvement_percent: f64,
}

impl ConvergenceSummary {
    /// Summarizes `trace`, or returns `None` if it is empty.
    pub fn from_trace(trace: &[f64], objective: Objective) -> Option<Self> {
        let (&initial, &final_value) = (trace.first()?, trace.last()?);
        let improvement = match objective {
            Objective::Minimize => initial - final_value,
            Objective::Maximize => final_value - initial,
        };
        let improvement_percent = if initial == 0.0 {
            0.0
        } else {
            improvement / initial.abs() * 100.0
        };
        Some(Self {
            initial,
            final_value,
            improvement,
            improvement_percent,
        })
    }

    pub fn from_record(record: &ResultRecord) -> Option<Self> {
        Self::from_trace(&record.convergence, record.objective)
    }
}

/// Keeps at most `max_points` evenly spaced points of `trace`, always
/// including the first and last.
///
/// ```
/// use optimize_hub::stats::downsample;
///
/// let trace: Vec<f64> = (0..10).map(f64::from).collect();
/// assert_eq!(downsample(&trace, 4), vec![0.0, 3.0, 6.0, 9.0]);
/// assert_eq!(downsample(&trace, 20).len(), 10);
/// ```
pub fn downsample(trace: &[f64], max_points: usize) -> Vec<f64> {
    if trace.len() <= max_points {
        return trace.to_vec();
    }
    match max_points {
        0 => Vec::new(),
        1 => vec![trace[0]],
        _ => {
            let last = trace.len() - 1;
            (0..max_points)
                .map(|i| trace[i * last / (max_points - 1)])
                .collect()
        }
    }
}
