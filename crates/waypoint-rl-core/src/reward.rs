//! Reward constants and decomposition

use std::collections::BTreeMap;

/// Bonus granted on the step that reaches the final waypoint
pub const COMPLETION_BONUS: f64 = 100.0;

/// Reward component key for the flight environment's own reward
pub const SEGMENT_COMPONENT: &str = "segment";

/// Reward component key for the trajectory completion bonus
pub const COMPLETION_COMPONENT: &str = "completion";

/// Decomposed reward components
pub type RewardComponents = BTreeMap<String, f64>;

/// Split a step reward into its segment and completion parts
pub fn decompose(segment: f64, bonus: f64) -> RewardComponents {
    let mut components = RewardComponents::new();
    components.insert(SEGMENT_COMPONENT.to_string(), segment);
    if bonus != 0.0 {
        components.insert(COMPLETION_COMPONENT.to_string(), bonus);
    }
    components
}
