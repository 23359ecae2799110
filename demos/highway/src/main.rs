//! highway — single-lane motorway scenario for the rust_ds simulator.
//!
//! Loads a TOML scenario (see `scenario.toml` next to this crate), runs it to
//! completion, and prints the collision summary.  Logging goes through
//! `tracing`; set `RUST_LOG=debug` for per-tick detail.
//!
//! ```text
//! cargo run -p highway -- demos/highway/scenario.toml --out output/highway
//! ```

mod scenario;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ds_core::ExecutionMode;
use ds_output::{CsvWriter, JsonWriter, SimOutputObserver};
use ds_result::{RunResult, RunStatus};
use ds_sim::{NoopObserver, SimBuilder, SimError, SimObserver};
use ds_spawn::{PipelineFactory, SpawnItem};

use scenario::{Scenario, ramp_pipeline};

#[derive(Parser, Debug)]
#[command(name = "highway")]
#[command(about = "Run a motorway driving scenario", long_about = None)]
struct Args {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Write CSV and JSON output into this directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Override the scenario seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the scenario horizon (ticks)
    #[arg(long)]
    horizon: Option<u64>,

    /// Step agent pipelines in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Print the run result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut scenario = Scenario::load(&args.scenario)?;
    if let Some(seed) = args.seed {
        scenario.sim.seed = seed;
    }
    if let Some(horizon) = args.horizon {
        scenario.sim.horizon_ticks = horizon;
    }
    if args.parallel {
        scenario.sim.execution = ExecutionMode::Parallel;
    }
    info!(
        vehicles = scenario.vehicles.len(),
        horizon = scenario.sim.horizon_ticks,
        seed = scenario.sim.seed,
        "scenario loaded"
    );

    let t0 = Instant::now();
    let result = match &args.out {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let writer = (CsvWriter::new(dir)?, JsonWriter::new(dir)?);
            let mut obs = SimOutputObserver::new(writer, &scenario.sim);
            let result = run(&scenario, &mut obs);
            if let Some(e) = obs.take_error() {
                warn!(error = %e, "output incomplete");
            }
            result?
        }
        None => run(&scenario, &mut NoopObserver)?,
    };
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "run finished");

    if args.json {
        println!("{}", result.to_json()?);
    } else {
        print_summary(&result);
    }

    if let RunStatus::Failed { diagnostic } = &result.status {
        bail!("run failed: {diagnostic}");
    }
    Ok(())
}

/// Build and run the scenario.  A run that fails mid-way still returns its
/// flushed result; only build errors are propagated.
fn run<O: SimObserver>(scenario: &Scenario, obs: &mut O) -> Result<RunResult> {
    let desired_speed = scenario.spawn.as_ref().map_or(25.0, |s| s.desired_speed);
    let factory = move |_item: &SpawnItem| -> Result<Vec<Box<dyn ds_component::Component>>, String> {
        Ok(ramp_pipeline(desired_speed))
    };
    run_with(scenario, factory, obs)
}

fn run_with<F, O>(scenario: &Scenario, factory: F, obs: &mut O) -> Result<RunResult>
where
    F: PipelineFactory,
    O: SimObserver,
{
    let mut builder = SimBuilder::new(scenario.sim.clone(), scenario.agents(), scenario.pipelines())
        .world(scenario.world.clone())
        .collision(scenario.collision.clone())
        .events(scenario.detector())
        .factory(factory);
    if let Some(point) = scenario.spawn_point()? {
        builder = builder.spawn_point(point);
    }
    let mut sim = builder.build()?;

    match sim.run(obs) {
        Ok(result) => Ok(result),
        Err(e) => {
            report(&e);
            sim.result().cloned().ok_or_else(|| e.into())
        }
    }
}

fn report(e: &SimError) {
    warn!(class = ?e.class(), "{}", e.diagnostic());
}

fn print_summary(result: &RunResult) {
    println!("library   : {}", result.library_id);
    println!("seed      : {}", result.seed);
    println!("final tick: {}", result.final_tick);
    println!("status    : {:?}", result.status);
    println!("log       : {} entries", result.log.len());
    println!();

    if result.collisions.is_empty() {
        println!("no collisions");
        return;
    }
    println!("{:<8} {:<10} {:<10} {:>10}", "Tick", "Agent", "Other", "Depth (m)");
    println!("{}", "-".repeat(41));
    for c in &result.collisions {
        println!(
            "{:<8} {:<10} {:<10} {:>10.3}",
            c.tick.to_string(),
            c.agent.to_string(),
            c.other.to_string(),
            c.record.distance
        );
    }
}
