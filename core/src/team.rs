//! The mutable state of one simulated team.
//!
//! A `TeamState` is constructed explicitly per run. Nothing in the crate
//! holds team state globally, so several teams can run side by side
//! with independently seeded random sources.

use crate::{
    config::TeamConfig,
    history::WorkHistory,
    queue::WorkQueue,
    types::Tick,
    work::{CategoryCounts, WorkCategory},
};
use serde::{Deserialize, Serialize};

/// Work handed to a team starting from scratch.
pub const DEFAULT_DISTRIBUTION: [WorkCategory; 10] = [
    WorkCategory::Operational,
    WorkCategory::Operational,
    WorkCategory::Operational,
    WorkCategory::Operational,
    WorkCategory::InTeamProject,
    WorkCategory::InTeamProject,
    WorkCategory::InTeamProject,
    WorkCategory::InTeamProject,
    WorkCategory::CrossTeamProject,
    WorkCategory::CrossTeamProject,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamState {
    pub queue: WorkQueue,
    /// True while exactly one onboarding token is unresolved.
    pub onboarding_in_progress: bool,
    pub onboarding_count: u32,
    pub operational_baseline: u64,
    pub tick: Tick,
    /// What processing performed during the last steady tick.
    pub performed: CategoryCounts,
    /// OPERATIONAL tokens discarded over the cap during the last steady tick.
    pub dropped_operational: u32,
    pub history: WorkHistory,
}

impl TeamState {
    pub fn new(config: &TeamConfig) -> Self {
        Self {
            queue:                  WorkQueue::new(),
            onboarding_in_progress: false,
            onboarding_count:       0,
            operational_baseline:   config.baseline_operational,
            tick:                   0,
            performed:              CategoryCounts::new(),
            dropped_operational:    0,
            history:                WorkHistory::new(),
        }
    }

    /// Refill an empty queue with the default distribution.
    ///
    /// Nothing is processed on a bootstrap tick, so the per-tick tallies
    /// are reset too.
    pub fn bootstrap(&mut self) {
        self.queue.refill(&DEFAULT_DISTRIBUTION);
        self.performed.clear();
        self.dropped_operational = 0;
    }

    /// Snapshot the queue and the last performed tally into the history.
    pub fn record_history(&mut self) {
        let assigned = self.queue.census();
        self.history.record(&assigned, &self.performed);
    }
}
