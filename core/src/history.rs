//! Per-category time series of assigned and performed work.
//!
//! One value is appended per category per steady tick, zero-filled when
//! a category is absent, so all series of a run always have equal length.

use crate::work::{CategoryCounts, WorkCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which of the two parallel series to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Tokens sitting in the queue at the end of the tick.
    Assigned,
    /// Tokens processed during the tick.
    Performed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHistory {
    pub assigned:  BTreeMap<WorkCategory, Vec<u32>>,
    pub performed: BTreeMap<WorkCategory, Vec<u32>>,
}

impl Default for WorkHistory {
    fn default() -> Self {
        let empty = || WorkCategory::ALL.into_iter().map(|c| (c, Vec::new())).collect();
        Self {
            assigned:  empty(),
            performed: empty(),
        }
    }
}

impl WorkHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one tick's queue census and performed tally.
    pub fn record(&mut self, assigned: &CategoryCounts, performed: &CategoryCounts) {
        for category in WorkCategory::ALL {
            self.assigned.entry(category).or_default().push(assigned.get(category));
            self.performed.entry(category).or_default().push(performed.get(category));
        }
    }

    /// Number of ticks recorded.
    pub fn len(&self) -> usize {
        self.assigned
            .get(&WorkCategory::Operational)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn series(&self, kind: SeriesKind, category: WorkCategory) -> &[u32] {
        let map = match kind {
            SeriesKind::Assigned  => &self.assigned,
            SeriesKind::Performed => &self.performed,
        };
        map.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The counts for the `index`-th recorded tick.
    pub fn at(&self, kind: SeriesKind, index: usize) -> Option<CategoryCounts> {
        if index >= self.len() {
            return None;
        }
        let mut counts = CategoryCounts::new();
        for category in WorkCategory::ALL {
            counts.add(category, self.series(kind, category)[index]);
        }
        Some(counts)
    }

    /// Per-tick total across all categories.
    pub fn totals(&self, kind: SeriesKind) -> Vec<u32> {
        (0..self.len())
            .map(|i| {
                WorkCategory::ALL
                    .into_iter()
                    .map(|c| self.series(kind, c)[i])
                    .sum()
            })
            .collect()
    }

    pub fn total_assigned(&self) -> Vec<u32> {
        self.totals(SeriesKind::Assigned)
    }

    pub fn total_performed(&self) -> Vec<u32> {
        self.totals(SeriesKind::Performed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use WorkCategory::*;

    #[test]
    fn empty_history_has_all_categories() {
        let history = WorkHistory::new();
        assert!(history.is_empty());
        for category in WorkCategory::ALL {
            assert!(history.series(SeriesKind::Assigned, category).is_empty());
            assert!(history.series(SeriesKind::Performed, category).is_empty());
        }
    }

    #[test]
    fn record_zero_fills_every_category() {
        let mut history = WorkHistory::new();
        let assigned: CategoryCounts = [InTeamProject, InTeamProject].into_iter().collect();
        let performed: CategoryCounts = [Operational].into_iter().collect();

        history.record(&assigned, &performed);
        history.record(&CategoryCounts::new(), &CategoryCounts::new());

        assert_eq!(history.len(), 2);
        assert_eq!(history.series(SeriesKind::Assigned, InTeamProject), &[2, 0]);
        assert_eq!(history.series(SeriesKind::Assigned, Onboarding), &[0, 0]);
        assert_eq!(history.series(SeriesKind::Performed, Operational), &[1, 0]);
        for category in WorkCategory::ALL {
            assert_eq!(history.series(SeriesKind::Assigned, category).len(), 2);
            assert_eq!(history.series(SeriesKind::Performed, category).len(), 2);
        }
    }

    #[test]
    fn totals_sum_across_categories() {
        let mut history = WorkHistory::new();
        let assigned: CategoryCounts =
            [Operational, InTeamProject, CrossTeamProject].into_iter().collect();
        history.record(&assigned, &CategoryCounts::new());

        assert_eq!(history.total_assigned(), vec![3]);
        assert_eq!(history.total_performed(), vec![0]);
        assert_eq!(history.at(SeriesKind::Assigned, 0), Some(assigned));
        assert_eq!(history.at(SeriesKind::Assigned, 1), None);
    }
}
