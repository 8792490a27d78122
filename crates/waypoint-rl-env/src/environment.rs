//! Flight environment trait

use nalgebra::Vector3;
use waypoint_rl_core::{Result, SegmentStep, Waypoint};

/// Length of the kinematic state: position, velocity, attitude, body rates
pub const KINEMATIC_STATE_LEN: usize = 12;

/// Initial conditions for one segment of a trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentStart {
    /// Kinematic state the vehicle starts the segment in
    pub pose: Vec<f64>,
    /// Waypoint the segment flies to
    pub target: Waypoint,
    /// Unit direction from the previous waypoint to `target` (zero if degenerate)
    pub heading: Vector3<f64>,
}

impl SegmentStart {
    /// Pose followed by the target coordinates
    pub fn to_vec(&self) -> Vec<f64> {
        self.pose
            .iter()
            .copied()
            .chain(self.target.iter().copied())
            .collect()
    }
}

/// Trait for single-segment flight simulations
///
/// Implement this trait to drive a simulator through a waypoint sequencer.
/// Every instance is owned by exactly one sequencer.
pub trait FlightEnvironment: Send {
    /// Current state vector as reported to the policy
    fn state(&self) -> &[f64];

    /// Span of the valid state; the first three entries bound position
    fn state_range(&self) -> &[f64];

    /// Full kinematic state (`KINEMATIC_STATE_LEN` entries), without target context
    fn kinematic_state(&self) -> Vec<f64>;

    /// Zero-velocity, zero-rotation state at the origin used for the first segment
    fn rest_state(&self) -> Vec<f64> {
        vec![0.0; KINEMATIC_STATE_LEN]
    }

    /// Number of action dimensions
    fn action_dim(&self) -> usize;

    /// Map a physical action into policy space
    fn normalize_action(&self, action: &[f64]) -> Vec<f64>;

    /// Map a policy-space action into physical units
    fn unnormalize_action(&self, action: &[f64]) -> Vec<f64>;

    /// Start a new segment and return the resulting state vector
    fn reset(&mut self, start: &SegmentStart) -> Result<Vec<f64>>;

    /// Advance the simulation by one step
    fn step(&mut self, action: &[f64]) -> Result<SegmentStep>;
}
