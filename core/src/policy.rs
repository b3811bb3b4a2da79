//! Policy trait and registry slots.
//!
//! RULE: Every per-tick rule that changes the queue implements TeamPolicy.
//! The pipeline calls apply() on each registered policy in slot order,
//! every steady tick. Execution order is fixed and documented in pipeline.rs.

use crate::{
    error::SimResult,
    event::SimEvent,
    rng::RandomSource,
    team::TeamState,
    types::Tick,
};

/// The contract every policy must fulfill.
pub trait TeamPolicy: Send {
    /// Unique stable name for this policy.
    fn name(&self) -> &'static str;

    /// Called once per steady tick by the pipeline.
    ///
    /// - `tick`: the current tick number
    /// - `team`: the team state, mutated in place
    /// - `rng`:  the run's random source, drawn in the documented order
    ///
    /// Returns the events describing what the policy changed.
    fn apply(
        &mut self,
        tick: Tick,
        team: &mut TeamState,
        rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>>;
}

/// Stable policy slot assignments.
/// NEVER reorder: the slot order is the draw order of the random stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PolicySlot {
    Admission = 0,
    Processing = 1,
}
