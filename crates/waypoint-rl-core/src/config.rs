//! Sequencer configuration

use serde::{Deserialize, Serialize};

use crate::reward::COMPLETION_BONUS;
use crate::waypoint::NORMALIZATION_EPSILON;

/// Tunables of the waypoint sequencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Reward added when the final waypoint is reached
    #[serde(default = "default_completion_bonus")]
    pub completion_bonus: f64,
    /// Denominator guard for target normalization and headings
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_completion_bonus() -> f64 {
    COMPLETION_BONUS
}

fn default_epsilon() -> f64 {
    NORMALIZATION_EPSILON
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            completion_bonus: COMPLETION_BONUS,
            epsilon: NORMALIZATION_EPSILON,
        }
    }
}
