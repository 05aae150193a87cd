//! Append-only record of a run, handed to the caller at termination.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};

/// State of the swarm at the end of one iteration.
#[derive(Debug, Clone)]
pub struct IterationSnapshot {
    /// 1-based iteration number.
    pub iter: usize,
    /// All particle positions that iteration, one row per particle.
    pub positions: Array2<f64>,
    /// Global-best position at the end of the iteration.
    pub best_position: Array1<f64>,
    /// Global-best fitness at the end of the iteration. Non-increasing
    /// across snapshots.
    pub best_fitness: f64,
    /// Auxiliary metrics recorded when the current global best was set.
    pub best_metrics: BTreeMap<String, f64>,
}

/// Ordered sequence of per-iteration snapshots.
///
/// Owned exclusively by the engine while the run is in progress and
/// returned read-only inside the report. The engine performs no I/O;
/// exporting or plotting the history is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct RunHistory {
    snapshots: Vec<IterationSnapshot>,
}

impl RunHistory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, snapshot: IterationSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Number of recorded iterations.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` if no iterations were recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots in iteration order.
    pub fn iterations(&self) -> &[IterationSnapshot] {
        &self.snapshots
    }

    /// The most recent snapshot, if any.
    pub fn last(&self) -> Option<&IterationSnapshot> {
        self.snapshots.last()
    }

    /// Global-best fitness per iteration, in iteration order.
    pub fn best_fitness_trajectory(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.best_fitness).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn snapshot(iter: usize, best_fitness: f64) -> IterationSnapshot {
        IterationSnapshot {
            iter,
            positions: Array2::zeros((2, 1)),
            best_position: array![0.0],
            best_fitness,
            best_metrics: BTreeMap::new(),
        }
    }

    #[test]
    fn test_trajectory_follows_push_order() {
        let mut history = RunHistory::new();
        history.push(snapshot(1, 9.0));
        history.push(snapshot(2, 4.0));
        history.push(snapshot(3, 4.0));

        assert_eq!(history.len(), 3);
        assert_eq!(history.best_fitness_trajectory(), vec![9.0, 4.0, 4.0]);
        assert_eq!(history.last().unwrap().iter, 3);
    }

    #[test]
    fn test_empty_history() {
        let history = RunHistory::new();
        assert!(history.is_empty());
        assert!(history.last().is_none());
        assert!(history.best_fitness_trajectory().is_empty());
    }
}
