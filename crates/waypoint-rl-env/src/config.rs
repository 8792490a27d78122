//! Rollout configuration loaded from JSON

use serde::{Deserialize, Serialize};
use std::path::Path;
use waypoint_rl_core::{Result, SequencerConfig, Trajectory, TrajRLError};

use crate::kinematic::PointMassConfig;

/// Everything needed to build and run point-mass rollouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Waypoints flown in order
    pub waypoints: Trajectory,
    /// Completion bonus and normalization guard
    #[serde(flatten)]
    pub sequencer: SequencerConfig,
    /// Step limit per episode
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,
    /// Number of independent rollouts
    #[serde(default = "default_rollouts")]
    pub rollouts: usize,
    /// Point-mass environment parameters
    #[serde(default)]
    pub env: PointMassConfig,
}

fn default_max_steps() -> u64 {
    2_000
}

fn default_rollouts() -> usize {
    1
}

impl RunConfig {
    /// Config with default settings for the given waypoints
    pub fn new(waypoints: Trajectory) -> Self {
        Self {
            waypoints,
            sequencer: SequencerConfig::default(),
            max_steps: default_max_steps(),
            rollouts: default_rollouts(),
            env: PointMassConfig::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.rollouts == 0 {
            return Err(TrajRLError::InvalidConfig("rollouts must be at least 1".into()));
        }
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = RunConfig::from_json(r#"{"waypoints": [[5,0,0],[5,5,0]]}"#).unwrap();
        assert_eq!(config.waypoints.len(), 2);
        assert_eq!(config.sequencer, SequencerConfig::default());
        assert_eq!(config.max_steps, 2_000);
        assert_eq!(config.rollouts, 1);
        assert_eq!(config.env, PointMassConfig::default());
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "waypoints": [[1, 2, 3]],
            "completion_bonus": 50.0,
            "epsilon": 1e-3,
            "max_steps": 10,
            "rollouts": 4,
            "env": { "dt": 0.05, "tip_accel": 30.0 }
        }"#;
        let config = RunConfig::from_json(json).unwrap();
        assert_eq!(config.sequencer.completion_bonus, 50.0);
        assert_eq!(config.sequencer.epsilon, 1e-3);
        assert_eq!(config.max_steps, 10);
        assert_eq!(config.rollouts, 4);
        assert_eq!(config.env.dt, 0.05);
        assert_eq!(config.env.tip_accel, Some(30.0));
        assert_eq!(config.env.max_velocity, 7.0);
    }

    #[test]
    fn test_rejects_bad_configs() {
        assert!(matches!(
            RunConfig::from_json(r#"{"waypoints": []}"#),
            Err(TrajRLError::Serialization(_))
        ));
        assert!(matches!(
            RunConfig::from_json(r#"{"waypoints": [[1,0,0]], "rollouts": 0}"#),
            Err(TrajRLError::InvalidConfig(_))
        ));
        assert!(matches!(
            RunConfig::from_path("/nonexistent/waypoint-rl.json"),
            Err(TrajRLError::Io(_))
        ));
    }
}
