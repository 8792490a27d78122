//! Episode rollouts and bookkeeping

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;
use waypoint_rl_core::{Result, StepResult, TerminationReason};

use crate::environment::FlightEnvironment;
use crate::sequencer::{TARGET_DIM, WaypointSequencer};

/// Maps observations to policy-space actions
pub trait Policy {
    fn act(&mut self, observation: &[f64]) -> Vec<f64>;
}

impl<F> Policy for F
where
    F: FnMut(&[f64]) -> Vec<f64>,
{
    fn act(&mut self, observation: &[f64]) -> Vec<f64> {
        self(observation)
    }
}

/// Zero displacement: always command the active target itself
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetHoldPolicy;

impl Policy for TargetHoldPolicy {
    fn act(&mut self, _observation: &[f64]) -> Vec<f64> {
        vec![0.0; TARGET_DIM]
    }
}

/// Outcome of one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub steps: u64,
    pub total_reward: f64,
    pub waypoints_reached: usize,
    pub waypoint_count: usize,
    /// Why the episode ended; `None` when cut off by the step limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_reason: Option<TerminationReason>,
    /// Step limit hit before the episode ended
    pub truncated: bool,
    /// SHA-256 over every observation and reward, for determinism checks
    pub fingerprint: String,
}

/// Accumulates per-step statistics for one episode
pub struct EpisodeTracker {
    steps: u64,
    total_reward: f64,
    waypoints_reached: usize,
    waypoint_count: usize,
    hasher: Sha256,
}

impl EpisodeTracker {
    pub fn new(waypoint_count: usize) -> Self {
        Self {
            steps: 0,
            total_reward: 0.0,
            waypoints_reached: 0,
            waypoint_count,
            hasher: Sha256::new(),
        }
    }

    /// Record the observation returned by reset
    pub fn record_reset(&mut self, observation: &[f64]) {
        self.hash(observation);
    }

    /// Record a step
    pub fn record_step(&mut self, result: &StepResult) {
        self.steps += 1;
        self.total_reward += result.reward;
        self.waypoints_reached = self.waypoints_reached.max(result.waypoint_index);
        self.hash(&result.observation);
        self.hasher.update(result.reward.to_le_bytes());
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn finish(self, termination_reason: Option<TerminationReason>) -> EpisodeSummary {
        EpisodeSummary {
            steps: self.steps,
            total_reward: self.total_reward,
            waypoints_reached: self.waypoints_reached,
            waypoint_count: self.waypoint_count,
            termination_reason,
            truncated: termination_reason.is_none(),
            fingerprint: hex::encode(self.hasher.finalize()),
        }
    }

    fn hash(&mut self, values: &[f64]) {
        for v in values {
            self.hasher.update(v.to_le_bytes());
        }
    }
}

/// Run one episode from reset until it ends or `max_steps` is reached
pub fn run_episode<E, P>(
    sequencer: &mut WaypointSequencer<E>,
    policy: &mut P,
    max_steps: u64,
) -> Result<EpisodeSummary>
where
    E: FlightEnvironment,
    P: Policy + ?Sized,
{
    let mut tracker = EpisodeTracker::new(sequencer.trajectory().len());
    let mut observation = sequencer.reset()?;
    tracker.record_reset(&observation);

    let mut termination_reason = None;
    while tracker.steps() < max_steps {
        let action = policy.act(&observation);
        let result = sequencer.step(&action)?;
        tracker.record_step(&result);
        if result.done {
            termination_reason = result.termination_reason;
            break;
        }
        observation = result.observation;
    }

    let summary = tracker.finish(termination_reason);
    info!(
        "Episode finished: {:?} after {} steps, reward {:.3}, {}/{} waypoints",
        summary.termination_reason,
        summary.steps,
        summary.total_reward,
        summary.waypoints_reached,
        summary.waypoint_count
    );
    Ok(summary)
}
