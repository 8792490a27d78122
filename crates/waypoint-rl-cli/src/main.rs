//! waypoint-rl: run long-horizon trajectory rollouts
//!
//! Usage: `waypoint-rl [config.json]`
//!
//! Each rollout owns its own sequencer and point-mass environment and runs on
//! a blocking worker. Summaries are printed to stdout as JSON lines; logs go to
//! stderr (filter with `RUST_LOG`).

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use waypoint_rl_core::Trajectory;
use waypoint_rl_env::{
    EpisodeSummary, PointMassEnv, RunConfig, TargetHoldPolicy, WaypointSequencer, run_episode,
};

/// Run one rollout on an environment and sequencer of its own
fn rollout(config: &RunConfig) -> Result<EpisodeSummary> {
    let env = PointMassEnv::new(config.env.clone())?;
    let mut sequencer =
        WaypointSequencer::with_config(config.waypoints.clone(), env, config.sequencer.clone())?;
    Ok(run_episode(
        &mut sequencer,
        &mut TargetHoldPolicy,
        config.max_steps,
    )?)
}

fn default_config() -> Result<RunConfig> {
    let waypoints = Trajectory::from_points([[5.0, 0.0, 0.0], [5.0, 5.0, 0.0]])?;
    Ok(RunConfig::new(waypoints))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let config = if args.len() > 1 {
        RunConfig::from_path(&args[1]).with_context(|| format!("loading {}", args[1]))?
    } else {
        default_config()?
    };

    info!(
        "Starting {} rollout(s) over {} waypoints, max {} steps",
        config.rollouts,
        config.waypoints.len(),
        config.max_steps
    );

    let mut handles = Vec::with_capacity(config.rollouts);
    for _ in 0..config.rollouts {
        let config = config.clone();
        handles.push(tokio::task::spawn_blocking(move || rollout(&config)));
    }

    let mut summaries = Vec::with_capacity(handles.len());
    for (i, handle) in handles.into_iter().enumerate() {
        let summary = handle
            .await
            .with_context(|| format!("rollout {} panicked", i))??;
        println!("{}", serde_json::to_string(&summary)?);
        summaries.push(summary);
    }

    // identical configs must replay identically
    if summaries
        .windows(2)
        .any(|pair| pair[0].fingerprint != pair[1].fingerprint)
    {
        warn!("Rollouts diverged despite identical configuration");
        bail!("non-deterministic rollouts");
    }

    let completed = summaries
        .iter()
        .filter(|s| s.waypoints_reached == s.waypoint_count)
        .count();
    info!("{}/{} rollouts completed the trajectory", completed, summaries.len());

    Ok(())
}
