//! sim-runner: headless simulation runner for SimSRE.
//!
//! Usage:
//!   sim-runner --seed 12345 --ticks 100
//!   sim-runner --seed 12345 --config data/team_config.json --db run.db --json series.json

use anyhow::Result;
use simsre_core::{
    engine::SimEngine,
    history::{SeriesKind, WorkHistory},
    store::SimStore,
    types::Tick,
    work::WorkCategory,
    TeamConfig,
};
use std::collections::BTreeMap;
use std::env;

#[derive(serde::Serialize)]
struct RunReport<'a> {
    run_id: &'a str,
    seed: u64,
    config: &'a TeamConfig,
    final_tick: Tick,
    assigned_series: &'a BTreeMap<WorkCategory, Vec<u32>>,
    performed_series: &'a BTreeMap<WorkCategory, Vec<u32>>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed").unwrap_or(42u64);
    let db = flag_value(&args, "--db").unwrap_or(":memory:");
    let json_out = flag_value(&args, "--json");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => TeamConfig::load(path)?,
        None => TeamConfig::default(),
    };
    if let Some(ticks) = parse_arg(&args, "--ticks") {
        config.horizon = ticks;
    }

    println!("SimSRE — sim-runner");
    println!("  seed:      {seed}");
    println!("  horizon:   {}", config.horizon);
    println!("  capacity:  {}", config.capacity);
    println!("  db:        {db}");
    println!();

    let store = if db == ":memory:" {
        SimStore::in_memory()?
    } else {
        SimStore::open(db)?
    };
    store.migrate()?;

    let run_id = format!("run-{seed}-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    store.insert_run(
        &run_id,
        seed,
        env!("CARGO_PKG_VERSION"),
        &serde_json::to_string(&config)?,
        chrono::Utc::now().timestamp(),
    )?;

    let mut engine = SimEngine::new(run_id, seed, config, store)?;

    engine.run_to_horizon()?;
    print_series(engine.history());
    print_summary(&engine)?;

    if let Some(path) = json_out {
        write_report(&engine, path)?;
        log::info!("series written to {path}");
    }

    Ok(())
}

/// Text stand-in for the stacked bar charts: one row per steady tick.
fn print_series(history: &WorkHistory) {
    println!("=== WORK BY STEADY TICK (assigned | performed) ===");
    println!("  step |   op  in  xt  ob |   op  in  xt  ob");
    for i in 0..history.len() {
        let row = |kind| {
            WorkCategory::ALL
                .iter()
                .map(|c| format!("{:>4}", history.series(kind, *c)[i]))
                .collect::<String>()
        };
        println!(
            "  {:>4} | {} | {}",
            i + 1,
            row(SeriesKind::Assigned),
            row(SeriesKind::Performed)
        );
    }
    println!();
}

fn print_summary(engine: &SimEngine) -> Result<()> {
    let team = engine.team();
    let history = engine.history();
    let assigned_totals = history.total_assigned();
    let performed_totals = history.total_performed();
    let performed_sum: u32 = performed_totals.iter().sum();
    let avg_performed = if performed_totals.is_empty() {
        0.0
    } else {
        performed_sum as f64 / performed_totals.len() as f64
    };
    let carryovers = engine.store().event_count(&engine.run_id, "cross_team_carryover")?;
    let escalations = engine.store().event_count(&engine.run_id, "cross_team_escalated")?;

    println!("=== RUN SUMMARY ===");
    println!("  run_id:          {}", engine.run_id);
    println!("  final tick:      {}", engine.clock.current_tick);
    println!("  steady ticks:    {}", history.len());
    println!("  onboardings:     {}", team.onboarding_count);
    println!("  op baseline:     {}", team.operational_baseline);
    println!("  escalations:     {escalations}");
    println!("  carryovers:      {carryovers}");
    println!("  final backlog:   {}", assigned_totals.last().copied().unwrap_or(0));
    println!("  avg performed:   {avg_performed:.1}");
    println!("  queue now:       {}", team.queue.census());
    Ok(())
}

fn write_report(engine: &SimEngine, path: &str) -> Result<()> {
    let history = engine.history();
    let report = RunReport {
        run_id: &engine.run_id,
        seed: engine.seed(),
        config: engine.config(),
        final_tick: engine.clock.current_tick,
        assigned_series: &history.assigned,
        performed_series: &history.performed,
    };
    std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    flag_value(args, flag).and_then(|v| v.parse().ok())
}
