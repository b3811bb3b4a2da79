//! Admission policy: what new work enters the queue each steady tick.
//!
//! Steps, in draw order:
//!   1. Cross-team escalation. Appends one CROSS_TEAM_PROJECT, then
//!      displaces up to two OPERATIONAL and one IN_TEAM_PROJECT token.
//!      Displacement is best effort.
//!   2. Onboarding. The draw is always taken; admission also needs no
//!      onboarding in progress and the lifetime limit not yet reached.
//!   3. Operational growth. Unconditional; may inject zero tokens.
//!
//! Execution: every steady tick, before processing.

use crate::{
    config::TeamConfig,
    error::SimResult,
    event::SimEvent,
    growth::OperationalGrowth,
    policy::TeamPolicy,
    rng::RandomSource,
    team::TeamState,
    types::Tick,
    work::WorkCategory,
};

pub struct AdmissionPolicy {
    config: TeamConfig,
}

impl AdmissionPolicy {
    pub fn new(config: TeamConfig) -> Self {
        Self { config }
    }

    fn escalate_cross_team(&self, tick: Tick, team: &mut TeamState) -> SimEvent {
        team.queue.append(WorkCategory::CrossTeamProject);

        let displaced_operational = (0..2)
            .filter(|_| team.queue.remove_first(WorkCategory::Operational))
            .count() as u32;
        let displaced_in_team = u32::from(team.queue.remove_first(WorkCategory::InTeamProject));

        log::debug!(
            "tick={tick} admission: cross-team escalation displaced \
             {displaced_operational} operational, {displaced_in_team} in-team"
        );

        SimEvent::CrossTeamEscalated {
            tick,
            displaced_operational,
            displaced_in_team,
        }
    }

    fn can_onboard(&self, team: &TeamState) -> bool {
        !team.onboarding_in_progress && team.onboarding_count < self.config.onboarding_limit
    }
}

impl TeamPolicy for AdmissionPolicy {
    fn name(&self) -> &'static str { "admission" }

    fn apply(
        &mut self,
        tick: Tick,
        team: &mut TeamState,
        rng: &mut dyn RandomSource,
    ) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();

        if rng.chance(self.config.cross_team_probability) {
            events.push(self.escalate_cross_team(tick, team));
        }

        let onboarding_roll = rng.chance(self.config.onboarding_probability);
        if onboarding_roll && self.can_onboard(team) {
            team.onboarding_in_progress = true;
            team.onboarding_count += 1;
            team.queue.append(WorkCategory::Onboarding);
            log::info!(
                "tick={tick} admission: onboarding {} of {} admitted",
                team.onboarding_count,
                self.config.onboarding_limit
            );
            events.push(SimEvent::OnboardingAdmitted {
                tick,
                onboarding_count: team.onboarding_count,
            });
        }

        let baseline_before = team.operational_baseline;
        let step = OperationalGrowth::apply(baseline_before, team.onboarding_count, &self.config);
        team.queue.append_many(WorkCategory::Operational, step.injected);
        team.operational_baseline = step.baseline;
        events.push(SimEvent::OperationalGrowth {
            tick,
            baseline_before,
            baseline_after: step.baseline,
            injected: step.injected,
        });

        Ok(events)
    }
}
