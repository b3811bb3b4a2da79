//! Processing policy: what the team gets done in one steady tick.
//!
//! Tokens are popped from the head while used capacity is below the
//! team's capacity. Exactly one rule applies per token:
//!
//! | category     | effect                                   | capacity | tally |
//! |--------------|------------------------------------------|----------|-------|
//! | in-team      | requeued at the tail                     | +1       | +1    |
//! | operational  | consumed, while under the operational cap | +1      | +1    |
//! | operational  | dropped, once the cap is reached         | 0        | 0     |
//! | cross-team   | consumed; may carry over to a new token  | +1       | +1    |
//! | onboarding   | consumed; spawns in-team + operational   | +2       | +1    |
//!
//! An exhausted queue ends the tick early. That is normal, not an error.
//!
//! Execution: every steady tick, after admission.

use crate::{
    config::TeamConfig,
    error::{SimError, SimResult},
    event::SimEvent,
    policy::TeamPolicy,
    rng::RandomSource,
    team::TeamState,
    types::Tick,
    work::WorkCategory,
};

pub struct ProcessingPolicy {
    capacity:              u32,
    operational_cap:       u32,
    carryover_probability: f64,
}

impl ProcessingPolicy {
    pub fn new(config: &TeamConfig) -> Self {
        Self {
            capacity:              config.capacity,
            operational_cap:       config.operational_cap(),
            carryover_probability: config.carryover_probability,
        }
    }
}

impl TeamPolicy for ProcessingPolicy {
    fn name(&self) -> &'static str { "processing" }

    fn apply(
        &mut self,
        tick: Tick,
        team: &mut TeamState,
        rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        let mut capacity_used = 0u32;
        let mut operational_done = 0u32;
        let mut queue_exhausted = false;

        team.performed.clear();
        team.dropped_operational = 0;

        while capacity_used < self.capacity {
            let item = match team.queue.pop_head() {
                Ok(item) => item,
                Err(SimError::EmptyQueue) => {
                    queue_exhausted = true;
                    break;
                }
                Err(e) => return Err(e),
            };

            match item {
                WorkCategory::InTeamProject => {
                    team.queue.append(item);
                    team.performed.increment(item);
                    capacity_used += 1;
                }
                WorkCategory::Operational if operational_done < self.operational_cap => {
                    operational_done += 1;
                    team.performed.increment(item);
                    capacity_used += 1;
                }
                WorkCategory::Operational => {
                    team.dropped_operational += 1;
                }
                WorkCategory::CrossTeamProject => {
                    if rng.chance(self.carryover_probability) {
                        team.queue.append(WorkCategory::CrossTeamProject);
                        events.push(SimEvent::CrossTeamCarryover { tick });
                    }
                    team.performed.increment(item);
                    capacity_used += 1;
                }
                WorkCategory::Onboarding => {
                    team.queue.append(WorkCategory::InTeamProject);
                    team.queue.append(WorkCategory::Operational);
                    team.onboarding_in_progress = false;
                    team.performed.increment(item);
                    capacity_used += 2;
                    log::info!("tick={tick} processing: onboarding completed");
                    events.push(SimEvent::OnboardingCompleted { tick });
                }
            }
        }

        if team.dropped_operational > 0 {
            log::debug!(
                "tick={tick} processing: dropped {} operational over the cap of {}",
                team.dropped_operational,
                self.operational_cap
            );
        }
        log::debug!(
            "tick={tick} processing: performed [{}] capacity={capacity_used}/{} queue_len={}",
            team.performed,
            self.capacity,
            team.queue.len()
        );

        events.push(SimEvent::WorkProcessed {
            tick,
            performed: team.performed,
            dropped_operational: team.dropped_operational,
            capacity_used,
            queue_exhausted,
        });
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;
    use WorkCategory::*;

    fn run(config: &TeamConfig, tokens: &[WorkCategory], seed: u64) -> (TeamState, Vec<SimEvent>) {
        let mut team = TeamState::new(config);
        team.queue.refill(tokens);
        let mut policy = ProcessingPolicy::new(config);
        let mut rng = SimRng::new(seed);
        let events = policy.apply(2, &mut team, &mut rng).unwrap();
        (team, events)
    }

    #[test]
    fn in_team_work_is_requeued() {
        let config = TeamConfig::deterministic();
        let (team, _) = run(&config, &[InTeamProject, InTeamProject], 1);

        // two tokens cycle until capacity is spent
        assert_eq!(team.performed.get(InTeamProject), 10);
        assert_eq!(team.queue.len(), 2);
    }

    #[test]
    fn operational_work_is_capped_and_dropped() {
        let config = TeamConfig::deterministic();
        let tokens = [Operational; 8];
        let (team, events) = run(&config, &tokens, 1);

        assert_eq!(team.performed.get(Operational), 5);
        assert_eq!(team.dropped_operational, 3);
        assert!(team.queue.is_empty());
        assert!(matches!(
            events.last(),
            Some(SimEvent::WorkProcessed { capacity_used: 5, queue_exhausted: true, .. })
        ));
    }

    #[test]
    fn dropped_operational_does_not_use_capacity() {
        let config = TeamConfig::deterministic();
        let mut tokens = vec![Operational; 7];
        tokens.extend([CrossTeamProject; 5]);
        let (team, _) = run(&config, &tokens, 1);

        assert_eq!(team.performed.get(Operational), 5);
        assert_eq!(team.performed.get(CrossTeamProject), 5);
        assert_eq!(team.dropped_operational, 2);
        assert!(team.queue.is_empty());
    }

    #[test]
    fn onboarding_costs_double_and_spawns_follow_on_work() {
        let config = TeamConfig::deterministic();
        let mut team = TeamState::new(&config);
        team.queue.refill(&[Onboarding]);
        team.onboarding_in_progress = true;
        let mut policy = ProcessingPolicy::new(&config);
        let mut rng = SimRng::new(1);

        let events = policy.apply(2, &mut team, &mut rng).unwrap();

        assert!(!team.onboarding_in_progress);
        assert_eq!(team.performed.get(Onboarding), 1);
        assert_eq!(team.performed.get(CrossTeamProject), 0);
        assert!(events.contains(&SimEvent::OnboardingCompleted { tick: 2 }));
        // follow-on work is processed in the same tick: 2 + 1 (operational)
        // + 7 (in-team cycling) reaches the capacity of 10
        assert_eq!(team.performed.get(Operational), 1);
        assert_eq!(team.performed.get(InTeamProject), 7);
    }

    #[test]
    fn certain_carryover_keeps_cross_team_work_alive() {
        let config = TeamConfig { carryover_probability: 1.0, ..TeamConfig::deterministic() };
        let (team, events) = run(&config, &[CrossTeamProject], 1);

        assert_eq!(team.performed.get(CrossTeamProject), 10);
        assert_eq!(team.queue.census().get(CrossTeamProject), 1);
        let carryovers = events
            .iter()
            .filter(|e| matches!(e, SimEvent::CrossTeamCarryover { .. }))
            .count();
        assert_eq!(carryovers, 10);
    }

    #[test]
    fn empty_queue_ends_processing_quietly() {
        let config = TeamConfig::deterministic();
        let (team, events) = run(&config, &[], 1);

        assert_eq!(team.performed.total(), 0);
        assert!(matches!(
            events.last(),
            Some(SimEvent::WorkProcessed { capacity_used: 0, queue_exhausted: true, .. })
        ));
    }
}
