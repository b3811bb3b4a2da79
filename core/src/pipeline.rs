//! The tick pipeline: one pure step of the team simulation.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   0. Tick counter advances.
//!   1. Bootstrap, if the queue is empty. Refills the default
//!      distribution and ends the tick: no policies, no history.
//!   2. Admission policy.
//!   3. Processing policy.
//!   4. History snapshot of the queue and the performed tally.
//!
//! RULES:
//!   - Policies execute in slot order, every steady tick.
//!   - All randomness flows through the single RandomSource passed in.
//!   - Every queue change is described by a returned event.

use crate::{
    admission::AdmissionPolicy,
    config::TeamConfig,
    error::SimResult,
    event::SimEvent,
    policy::{PolicySlot, TeamPolicy},
    processing::ProcessingPolicy,
    rng::RandomSource,
    team::TeamState,
};

pub struct TickPipeline {
    policies: Vec<(PolicySlot, Box<dyn TeamPolicy>)>,
}

impl TickPipeline {
    /// An empty pipeline. Steady ticks only record history.
    pub fn new() -> Self {
        Self { policies: Vec::new() }
    }

    /// Build the standard pipeline with both policies registered.
    pub fn build(config: &TeamConfig) -> Self {
        let mut pipeline = TickPipeline::new();
        pipeline.register(
            PolicySlot::Admission,
            Box::new(AdmissionPolicy::new(config.clone())),
        );
        pipeline.register(
            PolicySlot::Processing,
            Box::new(ProcessingPolicy::new(config)),
        );
        pipeline
    }

    /// Register a policy. Keeps the list sorted by slot so registration
    /// order cannot change the draw order.
    pub fn register(&mut self, slot: PolicySlot, policy: Box<dyn TeamPolicy>) {
        let pos = self.policies.partition_point(|(s, _)| *s <= slot);
        self.policies.insert(pos, (slot, policy));
    }

    /// Names of registered policies, in execution order.
    pub fn policy_names(&self) -> Vec<&'static str> {
        self.policies.iter().map(|(_, p)| p.name()).collect()
    }

    /// Advance `team` by one tick.
    pub fn step(
        &mut self,
        team: &mut TeamState,
        rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>> {
        team.tick += 1;
        let tick = team.tick;

        if team.queue.is_empty() {
            team.bootstrap();
            if tick > 1 {
                log::warn!("tick={tick} queue drained; reassigning default distribution");
            } else {
                log::info!("tick={tick} assigning default distribution");
            }
            return Ok(vec![SimEvent::QueueBootstrapped {
                tick,
                tokens: team.queue.len(),
            }]);
        }

        let mut events = Vec::new();
        for (_, policy) in &mut self.policies {
            events.extend(policy.apply(tick, team, rng)?);
        }

        team.record_history();
        events.push(SimEvent::HistoryRecorded {
            tick,
            assigned: team.queue.census(),
            performed: team.performed,
        });
        Ok(events)
    }
}

impl Default for TickPipeline {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;

    #[test]
    fn registration_order_does_not_change_execution_order() {
        let config = TeamConfig::default();
        let mut pipeline = TickPipeline::new();
        pipeline.register(PolicySlot::Processing, Box::new(ProcessingPolicy::new(&config)));
        pipeline.register(PolicySlot::Admission, Box::new(AdmissionPolicy::new(config.clone())));

        assert_eq!(pipeline.policy_names(), vec!["admission", "processing"]);
    }

    #[test]
    fn first_step_bootstraps_without_history() {
        let config = TeamConfig::default();
        let mut pipeline = TickPipeline::build(&config);
        let mut team = TeamState::new(&config);
        let mut rng = SimRng::new(1);

        let events = pipeline.step(&mut team, &mut rng).unwrap();

        assert_eq!(team.tick, 1);
        assert_eq!(events, vec![SimEvent::QueueBootstrapped { tick: 1, tokens: 10 }]);
        assert!(team.history.is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn steady_step_records_one_history_entry() {
        let config = TeamConfig::default();
        let mut pipeline = TickPipeline::build(&config);
        let mut team = TeamState::new(&config);
        let mut rng = SimRng::new(1);

        pipeline.step(&mut team, &mut rng).unwrap();
        let events = pipeline.step(&mut team, &mut rng).unwrap();

        assert_eq!(team.tick, 2);
        assert_eq!(team.history.len(), 1);
        assert!(matches!(events.last(), Some(SimEvent::HistoryRecorded { tick: 2, .. })));
    }

    #[test]
    fn mid_run_bootstrap_resets_tallies_and_skips_history() {
        let config = TeamConfig::deterministic();
        let mut pipeline = TickPipeline::build(&config);
        let mut team = TeamState::new(&config);
        let mut rng = SimRng::new(1);

        pipeline.step(&mut team, &mut rng).unwrap();
        pipeline.step(&mut team, &mut rng).unwrap();
        assert!(team.performed.total() > 0);

        team.queue.refill(&[]);
        let events = pipeline.step(&mut team, &mut rng).unwrap();

        assert_eq!(events, vec![SimEvent::QueueBootstrapped { tick: 3, tokens: 10 }]);
        assert_eq!(team.performed.total(), 0);
        assert_eq!(team.dropped_operational, 0);
        assert_eq!(team.history.len(), 1);
    }
}
