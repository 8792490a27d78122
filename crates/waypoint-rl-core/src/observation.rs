//! Step results and the typed info channel

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::reward::RewardComponents;

/// Conditions a flight environment reports after one step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Current waypoint attained within tolerance
    #[serde(default)]
    pub reached: bool,

    /// Vehicle attitude exceeded its limit
    #[serde(default)]
    pub tipped: bool,

    /// Vehicle left the allowed volume
    #[serde(default)]
    pub out_of_bounds: bool,

    /// Segment time limit expired
    #[serde(default)]
    pub out_of_time: bool,

    /// Environment-specific diagnostics, passed through untouched
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

impl StepInfo {
    pub fn reached() -> Self {
        Self {
            reached: true,
            ..Default::default()
        }
    }

    /// Failure condition ending the episode, if any.
    ///
    /// Checked in order tipped, out of bounds, out of time.
    pub fn failure(&self) -> Option<TerminationReason> {
        if self.tipped {
            Some(TerminationReason::Tipped)
        } else if self.out_of_bounds {
            Some(TerminationReason::OutOfBounds)
        } else if self.out_of_time {
            Some(TerminationReason::OutOfTime)
        } else {
            None
        }
    }
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Final waypoint reached
    Completed,
    Tipped,
    OutOfBounds,
    OutOfTime,
}

/// Native result of one flight environment step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentStep {
    /// Environment state vector after the step
    pub state: Vec<f64>,

    /// Segment reward
    pub reward: f64,

    /// Segment-level done flag (the sequencer recomputes termination)
    pub done: bool,

    pub info: StepInfo,
}

/// Result of one sequencer step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Base state followed by the normalized target `[nx, ny, nz]`
    pub observation: Vec<f64>,

    /// Segment reward plus any completion bonus
    pub reward: f64,

    /// Decomposed reward for analysis
    #[serde(default)]
    pub reward_components: RewardComponents,

    /// Episode over (trajectory finished or failed)
    pub done: bool,

    /// Why the episode ended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_reason: Option<TerminationReason>,

    /// Index of the active target after this step; equals the waypoint count once complete
    pub waypoint_index: usize,

    /// Environment info, unmodified
    pub info: StepInfo,
}
