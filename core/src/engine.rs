//! The simulation engine — the finite-tick driver.
//!
//! The engine owns everything a run needs: the clock, the run's single
//! random stream, the team state, the tick pipeline and the store. It
//! calls the pipeline exactly once per tick, in strictly increasing
//! order, until the configured horizon is reached.
//!
//! RULES:
//!   - The config is validated before the engine exists.
//!   - All randomness flows through the engine's SimRng.
//!   - Every event a tick emits lands in the event log.
//!   - Every steady tick lands in tick_history.

use crate::{
    clock::SimClock,
    config::TeamConfig,
    error::{SimError, SimResult},
    event::{EventLogEntry, SimEvent},
    history::WorkHistory,
    pipeline::TickPipeline,
    rng::SimRng,
    snapshot::{SimSnapshot, SNAPSHOT_INTERVAL},
    store::SimStore,
    team::TeamState,
    types::{RunId, Tick},
};

pub struct SimEngine {
    pub run_id: RunId,
    pub clock:  SimClock,
    config:     TeamConfig,
    team:       TeamState,
    rng:        SimRng,
    pipeline:   TickPipeline,
    store:      SimStore,
}

impl SimEngine {
    /// Build a fully wired engine with the standard policies registered.
    ///
    /// Fails with a configuration error before any tick can run.
    pub fn new(run_id: RunId, seed: u64, config: TeamConfig, store: SimStore) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            clock:    SimClock::new(run_id.clone()),
            team:     TeamState::new(&config),
            rng:      SimRng::new(seed),
            pipeline: TickPipeline::build(&config),
            config,
            store,
            run_id,
        })
    }

    /// In-memory store, migrated, with the run registered. For tests and
    /// quick experiments.
    pub fn build_test(run_id: RunId, seed: u64, config: TeamConfig) -> SimResult<Self> {
        let store = SimStore::in_memory()?;
        store.migrate()?;
        store.insert_run(
            &run_id,
            seed,
            env!("CARGO_PKG_VERSION"),
            &serde_json::to_string(&config)?,
            0,
        )?;
        SimEngine::new(run_id, seed, config, store)
    }

    /// Advance exactly one tick and return its events.
    ///
    /// Works from a fresh or paused engine: the clock is resumed for the
    /// step and paused again afterwards, so single ticks and `run_ticks`
    /// can be interleaved freely.
    pub fn tick(&mut self) -> SimResult<Vec<SimEvent>> {
        self.log_run_initialized()?;
        self.clock.resume();
        let result = self.step();
        self.clock.pause();
        result
    }

    /// Run n ticks in a loop. Used for testing and fast-forward.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<()> {
        self.log_run_initialized()?;
        self.clock.resume();
        let result = (0..n).try_for_each(|_| self.step().map(drop));
        self.clock.pause();
        result?;
        log::debug!(
            "run={} paused at tick {} after {} random draws",
            self.run_id,
            self.clock.current_tick,
            self.rng.draws()
        );
        Ok(())
    }

    /// Run until the tick counter reaches the configured horizon.
    pub fn run_to_horizon(&mut self) -> SimResult<()> {
        let remaining = self.config.horizon.saturating_sub(self.clock.current_tick);
        self.run_ticks(remaining)?;
        log::info!(
            "run={} reached horizon {}: {} steady ticks, {} onboardings, baseline {}",
            self.run_id,
            self.config.horizon,
            self.team.history.len(),
            self.team.onboarding_count,
            self.team.operational_baseline
        );
        Ok(())
    }

    pub fn team(&self) -> &TeamState {
        &self.team
    }

    pub fn history(&self) -> &WorkHistory {
        &self.team.history
    }

    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn store(&self) -> &SimStore {
        &self.store
    }

    /// Query events for a specific tick from the store.
    /// Used by the determinism test and replay tooling.
    pub fn store_events_for_tick(&self, tick: Tick) -> SimResult<Vec<EventLogEntry>> {
        self.store.events_for_tick(&self.run_id, tick)
    }

    /// The most recent snapshot taken at or before `tick`.
    pub fn snapshot_at_or_before(&self, tick: Tick) -> SimResult<Option<SimSnapshot>> {
        match self.store.latest_snapshot_before(&self.run_id, tick)? {
            Some((_, json)) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Emit RunInitialized at tick 0 so seed differences are observable.
    fn log_run_initialized(&self) -> SimResult<()> {
        if self.clock.current_tick != 0 {
            return Ok(());
        }
        let init_event = SimEvent::RunInitialized {
            run_id: self.run_id.clone(),
            seed:   self.rng.seed(),
        };
        self.log_event(0, "engine", &init_event)
    }

    /// The core simulation step. The clock must already be running.
    fn step(&mut self) -> SimResult<Vec<SimEvent>> {
        let current_tick = self.clock.advance();
        let mut tick_events: Vec<SimEvent> = vec![
            SimEvent::TickStarted { tick: current_tick }
        ];

        let history_len = self.team.history.len();
        tick_events.extend(self.pipeline.step(&mut self.team, &mut self.rng)?);

        if self.team.tick != current_tick {
            return Err(SimError::TickMismatch {
                expected: current_tick,
                actual:   self.team.tick,
            });
        }

        tick_events.push(SimEvent::TickCompleted { tick: current_tick });

        for event in &tick_events {
            self.log_event(current_tick, source_of(event), event)?;
        }

        if self.team.history.len() > history_len {
            self.store.record_history(
                &self.run_id,
                current_tick,
                &self.team.queue.census(),
                &self.team.performed,
            )?;
        }

        if current_tick.is_multiple_of(SNAPSHOT_INTERVAL) {
            self.take_snapshot(current_tick)?;
        }

        Ok(tick_events)
    }

    fn log_event(&self, tick: Tick, source: &str, event: &SimEvent) -> SimResult<()> {
        let entry = EventLogEntry {
            id:         None,
            run_id:     self.run_id.clone(),
            tick,
            source:     source.to_string(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(event)?,
        };
        self.store.append_event(&entry)
    }

    fn take_snapshot(&self, tick: Tick) -> SimResult<()> {
        let snapshot = SimSnapshot {
            run_id: self.run_id.clone(),
            tick,
            clock:  self.clock.clone(),
            team:   self.team.clone(),
        };
        let json = serde_json::to_string(&snapshot)?;
        self.store.save_snapshot(&self.run_id, tick, &json)?;
        log::debug!("Snapshot saved at tick {tick}");
        Ok(())
    }
}

/// Which component emitted an event. Used for the source column in event_log.
fn source_of(event: &SimEvent) -> &'static str {
    match event {
        SimEvent::CrossTeamEscalated { .. }
        | SimEvent::OnboardingAdmitted { .. }
        | SimEvent::OperationalGrowth { .. } => "admission",
        SimEvent::CrossTeamCarryover { .. }
        | SimEvent::OnboardingCompleted { .. }
        | SimEvent::WorkProcessed { .. } => "processing",
        SimEvent::HistoryRecorded { .. } => "history",
        SimEvent::TickStarted { .. }
        | SimEvent::TickCompleted { .. }
        | SimEvent::RunInitialized { .. }
        | SimEvent::QueueBootstrapped { .. } => "engine",
    }
}
