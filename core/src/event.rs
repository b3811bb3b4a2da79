//! Everything that happens during a run is recorded as a `SimEvent`.
//!
//! Policies describe the queue deltas they made by returning events;
//! the engine persists every event to the event log in emission order.

use crate::{
    types::{RunId, Tick},
    work::CategoryCounts,
};
use serde::{Deserialize, Serialize};

/// Variants are appended over time, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    TickStarted {
        tick: Tick,
    },
    TickCompleted {
        tick: Tick,
    },
    RunInitialized {
        run_id: RunId,
        seed: u64,
    },
    QueueBootstrapped {
        tick: Tick,
        tokens: usize,
    },

    // ── Admission events ───────────────────────────
    CrossTeamEscalated {
        tick: Tick,
        displaced_operational: u32,
        displaced_in_team: u32,
    },
    OnboardingAdmitted {
        tick: Tick,
        onboarding_count: u32,
    },
    OperationalGrowth {
        tick: Tick,
        baseline_before: u64,
        baseline_after: u64,
        injected: u64,
    },

    // ── Processing events ──────────────────────────
    CrossTeamCarryover {
        tick: Tick,
    },
    OnboardingCompleted {
        tick: Tick,
    },
    WorkProcessed {
        tick: Tick,
        performed: CategoryCounts,
        dropped_operational: u32,
        capacity_used: u32,
        queue_exhausted: bool,
    },

    // ── History events ─────────────────────────────
    HistoryRecorded {
        tick: Tick,
        assigned: CategoryCounts,
        performed: CategoryCounts,
    },
}

impl SimEvent {
    /// Stable string name, used for the event_type column in event_log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::TickStarted { .. }         => "tick_started",
            Self::TickCompleted { .. }       => "tick_completed",
            Self::RunInitialized { .. }      => "run_initialized",
            Self::QueueBootstrapped { .. }   => "queue_bootstrapped",
            Self::CrossTeamEscalated { .. }  => "cross_team_escalated",
            Self::OnboardingAdmitted { .. }  => "onboarding_admitted",
            Self::OperationalGrowth { .. }   => "operational_growth",
            Self::CrossTeamCarryover { .. }  => "cross_team_carryover",
            Self::OnboardingCompleted { .. } => "onboarding_completed",
            Self::WorkProcessed { .. }       => "work_processed",
            Self::HistoryRecorded { .. }     => "history_recorded",
        }
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub run_id: RunId,
    pub tick: Tick,
    pub source: String,
    pub event_type: String,
    pub payload: String, // JSON-serialized SimEvent
}
