//! Action spaces and policy/physical action transforms

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrajRLError};

/// Bounded continuous action space (Box).
///
/// Policy-space actions live in `[-1, 1]`; physical actions live in `[low, high]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpace {
    /// Lower bounds
    pub low: Vec<f64>,
    /// Upper bounds
    pub high: Vec<f64>,
}

impl ActionSpace {
    /// Create a space from explicit bounds
    pub fn new(low: Vec<f64>, high: Vec<f64>) -> Result<Self> {
        if low.len() != high.len() {
            return Err(TrajRLError::InvalidConfig(format!(
                "action bounds differ in length: {} vs {}",
                low.len(),
                high.len()
            )));
        }
        if low.iter().zip(&high).any(|(l, h)| !(l < h)) {
            return Err(TrajRLError::InvalidConfig(
                "action bounds need low < high in every dimension".into(),
            ));
        }
        Ok(Self { low, high })
    }

    /// Space spanning `[-span, span]` in every dimension
    pub fn symmetric(dim: usize, span: f64) -> Self {
        Self {
            low: vec![-span; dim],
            high: vec![span; dim],
        }
    }

    /// Number of action dimensions
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// Reject actions of the wrong length
    pub fn check_dim(&self, action: &[f64]) -> Result<()> {
        if action.len() != self.dim() {
            return Err(TrajRLError::ActionSpaceViolation(format!(
                "expected {} dimensions, got {}",
                self.dim(),
                action.len()
            )));
        }
        Ok(())
    }

    /// Map a physical action into policy space
    pub fn normalize(&self, action: &[f64]) -> Vec<f64> {
        action
            .iter()
            .zip(self.low.iter().zip(&self.high))
            .map(|(a, (l, h))| 2.0 * (a - l) / (h - l) - 1.0)
            .collect()
    }

    /// Map a policy-space action into physical units
    pub fn unnormalize(&self, action: &[f64]) -> Vec<f64> {
        action
            .iter()
            .zip(self.low.iter().zip(&self.high))
            .map(|(a, (l, h))| l + (a + 1.0) * 0.5 * (h - l))
            .collect()
    }
}

/// Clip every component into `[-1, 1]` (bounded policy output convention)
pub fn clip_unit(action: &[f64]) -> Vec<f64> {
    action.iter().map(|a| a.clamp(-1.0, 1.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_validated() {
        assert!(ActionSpace::new(vec![0.0], vec![1.0, 2.0]).is_err());
        assert!(ActionSpace::new(vec![1.0], vec![1.0]).is_err());
        assert!(ActionSpace::new(vec![-1.0, 0.0], vec![1.0, 4.0]).is_ok());
    }

    #[test]
    fn test_normalize_maps_bounds_to_unit_range() {
        let space = ActionSpace::new(vec![0.0, -10.0], vec![4.0, 10.0]).unwrap();
        assert_eq!(space.normalize(&[0.0, 10.0]), vec![-1.0, 1.0]);
        assert_eq!(space.normalize(&[2.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(space.unnormalize(&[1.0, -1.0]), vec![4.0, -10.0]);
    }

    #[test]
    fn test_symmetric_midpoint_is_zero() {
        let space = ActionSpace::symmetric(3, 5.0);
        assert_eq!(space.dim(), 3);
        assert_eq!(space.unnormalize(&[0.0, 0.0, 0.0]), vec![0.0, 0.0, 0.0]);
        // out-of-range physical commands extrapolate linearly
        assert_eq!(space.normalize(&[10.0, -5.0, 0.0]), vec![2.0, -1.0, 0.0]);
    }

    #[test]
    fn test_check_dim() {
        let space = ActionSpace::symmetric(3, 1.0);
        assert!(space.check_dim(&[0.0; 3]).is_ok());
        match space.check_dim(&[0.0; 2]) {
            Err(TrajRLError::ActionSpaceViolation(msg)) => assert!(msg.contains("got 2")),
            other => panic!("Expected ActionSpaceViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_clip_unit() {
        assert_eq!(clip_unit(&[-3.0, 0.25, 7.5]), vec![-1.0, 0.25, 1.0]);
    }

    #[test]
    fn test_action_space_json_fields() {
        let space = ActionSpace::symmetric(2, 1.5);
        let json = serde_json::to_value(&space).unwrap();
        assert_eq!(json["low"], serde_json::json!([-1.5, -1.5]));
        assert_eq!(json["high"], serde_json::json!([1.5, 1.5]));

        let back: ActionSpace = serde_json::from_str(r#"{"low":[-1.5,-1.5],"high":[1.5,1.5]}"#).unwrap();
        assert_eq!(back, space);
    }
}
