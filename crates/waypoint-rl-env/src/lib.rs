//! # waypoint-rl-env
//!
//! Long-horizon trajectory environments built from single-segment flight simulations.
//!
//! This crate provides:
//! - `FlightEnvironment` trait for plugging in segment simulators
//! - `WaypointSequencer`, which flies a trajectory one waypoint at a time
//! - `PointMassEnv`, a minimal reference simulator
//! - Episode rollouts with determinism fingerprints
//! - JSON run configuration

pub mod config;
pub mod environment;
pub mod kinematic;
pub mod rollout;
pub mod sequencer;

pub use config::RunConfig;
pub use environment::{FlightEnvironment, KINEMATIC_STATE_LEN, SegmentStart};
pub use kinematic::{PointMassConfig, PointMassEnv};
pub use rollout::{EpisodeSummary, EpisodeTracker, Policy, TargetHoldPolicy, run_episode};
pub use sequencer::{TARGET_DIM, WaypointSequencer};
