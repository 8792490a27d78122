//! Long-horizon waypoint sequencing
//!
//! Splits a multi-waypoint trajectory into single-waypoint segments, each one
//! flown by the wrapped [`FlightEnvironment`]. Actions are interpreted as
//! displacements from the active target, and every observation carries a
//! waypoint normalized by the environment's positional span.

use tracing::{debug, warn};
use waypoint_rl_core::{
    Result, SegmentStep, SequencerConfig, StepResult, TerminationReason, Trajectory, TrajRLError,
    clip_unit, normalize_waypoint, reward,
};

use crate::environment::{FlightEnvironment, SegmentStart};

/// Number of target coordinates appended to every observation
pub const TARGET_DIM: usize = 3;

/// Drives a flight environment through an ordered list of waypoints
pub struct WaypointSequencer<E: FlightEnvironment> {
    trajectory: Trajectory,
    env: E,
    config: SequencerConfig,
    /// `None` until the first reset
    current_index: Option<usize>,
    finished: bool,
}

impl<E: FlightEnvironment> WaypointSequencer<E> {
    /// Create a sequencer with default configuration
    pub fn new(trajectory: Trajectory, env: E) -> Result<Self> {
        Self::with_config(trajectory, env, SequencerConfig::default())
    }

    /// Create a sequencer with custom configuration
    pub fn with_config(trajectory: Trajectory, env: E, config: SequencerConfig) -> Result<Self> {
        if env.state_range().len() < TARGET_DIM {
            return Err(TrajRLError::InvalidConfig(format!(
                "state range has {} entries, need at least {}",
                env.state_range().len(),
                TARGET_DIM
            )));
        }
        if env.action_dim() != TARGET_DIM {
            return Err(TrajRLError::InvalidConfig(format!(
                "actions are displacements from a 3D target, environment takes {} dimensions",
                env.action_dim()
            )));
        }

        Ok(Self {
            trajectory,
            env,
            config,
            current_index: None,
            finished: false,
        })
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Index of the active waypoint; equals the waypoint count once the trajectory is complete
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Whether the current episode has ended
    pub fn is_done(&self) -> bool {
        self.finished
    }

    /// Reset for a new episode and return the initial observation
    pub fn reset(&mut self) -> Result<Vec<f64>> {
        self.current_index = None;
        self.finished = false;

        let start = self.segment_start(self.env.rest_state(), 0);
        let state = self.env.reset(&start)?;
        self.current_index = Some(0);

        debug!(
            "Episode reset, {} waypoints, first target {:?}",
            self.trajectory.len(),
            start.target.as_slice()
        );
        Ok(self.observe(state, 0))
    }

    /// Apply a policy action and advance the environment by one step
    pub fn step(&mut self, action: &[f64]) -> Result<StepResult> {
        let index = self.current_index.ok_or(TrajRLError::NotReset)?;
        if self.finished {
            return Err(TrajRLError::EpisodeTerminated);
        }
        if action.len() != TARGET_DIM {
            return Err(TrajRLError::ActionSpaceViolation(format!(
                "expected {} dimensions, got {}",
                TARGET_DIM,
                action.len()
            )));
        }

        let target = *self.trajectory.get(index).ok_or(TrajRLError::EpisodeTerminated)?;
        let displacement = self.env.unnormalize_action(&clip_unit(action));
        let command: Vec<f64> = displacement
            .iter()
            .zip(target.iter())
            .map(|(d, w)| d + w)
            .collect();
        let command = self.env.normalize_action(&command);

        // segment completion is not episode completion; `done` is recomputed below
        let SegmentStep {
            state,
            reward: segment_reward,
            info,
            ..
        } = self.env.step(&command)?;

        let mut done = false;
        let mut bonus = 0.0;
        let mut termination_reason = None;

        let len = self.trajectory.len();
        let echoed = if info.reached {
            let next = index + 1;
            if next == len {
                self.current_index = Some(next);
                done = true;
                bonus = self.config.completion_bonus;
                termination_reason = Some(TerminationReason::Completed);
                next - 1
            } else {
                let start = self.segment_start(self.env.kinematic_state(), next);
                debug!(
                    "Waypoint {} reached, next target {:?}",
                    index,
                    start.target.as_slice()
                );
                // the environment may be half-reseeded; only a full reset recovers
                if let Err(e) = self.env.reset(&start) {
                    self.finished = true;
                    warn!("Reseed for waypoint {} failed: {}", next, e);
                    return Err(e);
                }
                self.current_index = Some(next);
                next
            }
        } else {
            // previous waypoint, wrapping to the last one on the first segment
            (index + len - 1) % len
        };

        if !done {
            if let Some(reason) = info.failure() {
                done = true;
                termination_reason = Some(reason);
            }
        }

        if let Some(reason) = termination_reason {
            self.finished = true;
            let reached = self.current_index.unwrap_or(0);
            if reason == TerminationReason::Completed {
                debug!("Episode completed, {} waypoints", len);
            } else {
                warn!(
                    "Episode ended: {:?} after {} of {} waypoints",
                    reason, reached, len
                );
            }
        }

        Ok(StepResult {
            observation: self.observe(state, echoed),
            reward: segment_reward + bonus,
            reward_components: reward::decompose(segment_reward, bonus),
            done,
            termination_reason,
            waypoint_index: self.current_index.unwrap_or(index),
            info,
        })
    }

    /// Segment start at `pose`, flying to waypoint `index`
    fn segment_start(&self, pose: Vec<f64>, index: usize) -> SegmentStart {
        SegmentStart {
            pose,
            target: *self.trajectory.get(index).unwrap_or_else(|| self.trajectory.last()),
            heading: self.trajectory.heading(index, self.config.epsilon),
        }
    }

    /// Append waypoint `index`, normalized, to a state vector
    fn observe(&self, mut state: Vec<f64>, index: usize) -> Vec<f64> {
        let waypoint = self
            .trajectory
            .get(index)
            .unwrap_or_else(|| self.trajectory.last());
        state.extend(normalize_waypoint(
            waypoint,
            self.env.state_range(),
            self.config.epsilon,
        ));
        state
    }
}
