//! Waypoints and multi-waypoint trajectories

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrajRLError};

/// A 3D position target
pub type Waypoint = Vector3<f64>;

/// Additive guard used in every normalization denominator
pub const NORMALIZATION_EPSILON: f64 = 1e-6;

/// Ordered, non-empty list of waypoints flown in sequence.
///
/// Immutable once built. Serializes as a plain list of `[x, y, z]` triples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 3]>", into = "Vec<[f64; 3]>")]
pub struct Trajectory {
    waypoints: Vec<Waypoint>,
}

impl Trajectory {
    /// Build a trajectory, rejecting empty lists and non-finite coordinates
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(TrajRLError::InvalidConfig(
                "trajectory needs at least one waypoint".into(),
            ));
        }
        if let Some(i) = waypoints.iter().position(|w| !w.iter().all(|c| c.is_finite())) {
            return Err(TrajRLError::InvalidConfig(format!(
                "waypoint {} has non-finite coordinates",
                i
            )));
        }
        Ok(Self { waypoints })
    }

    /// Build a trajectory from raw `[x, y, z]` triples
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        Self::new(points.into_iter().map(Waypoint::from).collect())
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether there are no waypoints; never true for a built trajectory
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn last(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }

    /// Unit direction of the segment ending at `index`.
    ///
    /// The segment starts at the previous waypoint, or at the origin for the
    /// first one. Coincident endpoints yield the zero vector instead of NaN.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn heading(&self, index: usize, eps: f64) -> Vector3<f64> {
        let start = match index {
            0 => Vector3::zeros(),
            i => self.waypoints[i - 1],
        };
        let segment = self.waypoints[index] - start;
        segment / (segment.norm() + eps)
    }
}

impl TryFrom<Vec<[f64; 3]>> for Trajectory {
    type Error = TrajRLError;

    fn try_from(points: Vec<[f64; 3]>) -> Result<Self> {
        Self::from_points(points)
    }
}

impl From<Trajectory> for Vec<[f64; 3]> {
    fn from(trajectory: Trajectory) -> Self {
        trajectory.waypoints.iter().map(|w| [w.x, w.y, w.z]).collect()
    }
}

/// Scale a waypoint into observation space: `2 * w / (range[..3] + eps)`.
///
/// `state_range` must hold at least three entries (the positional span).
pub fn normalize_waypoint(waypoint: &Waypoint, state_range: &[f64], eps: f64) -> [f64; 3] {
    [0usize, 1, 2].map(|i| waypoint[i] * 2.0 / (state_range[i] + eps))
}
