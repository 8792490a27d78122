//! # waypoint-rl-core
//!
//! Core types for long-horizon waypoint trajectory environments.
//!
//! This crate provides the types shared by sequencers, flight environments and runners:
//! - Waypoints and trajectories
//! - Action spaces and normalization
//! - Step results and the typed info channel
//! - Reward constants
//! - Sequencer configuration

pub mod action;
pub mod config;
pub mod error;
pub mod observation;
pub mod reward;
pub mod waypoint;

pub use action::{ActionSpace, clip_unit};
pub use config::SequencerConfig;
pub use error::{Result, TrajRLError};
pub use observation::{SegmentStep, StepInfo, StepResult, TerminationReason};
pub use reward::{COMPLETION_BONUS, RewardComponents};
pub use waypoint::{NORMALIZATION_EPSILON, Trajectory, Waypoint, normalize_waypoint};
