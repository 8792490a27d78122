//! First-order point-mass flight environment
//!
//! Stand-in for a full multirotor simulation. The vehicle tracks a position
//! setpoint with a proportional, speed-limited velocity command; attitude and
//! body rates stay zero. Useful for exercising sequencers and policies without
//! a rigid-body integrator.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use waypoint_rl_core::{ActionSpace, Result, SegmentStep, StepInfo, TrajRLError, Waypoint};

use crate::environment::{FlightEnvironment, KINEMATIC_STATE_LEN, SegmentStart};

/// Point-mass environment parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMassConfig {
    /// Integration step [s]
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Proportional gain from position error to velocity [1/s]
    #[serde(default = "default_gain")]
    pub gain: f64,
    /// Speed limit [m/s]
    #[serde(default = "default_max_velocity")]
    pub max_velocity: f64,
    /// Distance at which the target counts as reached [m]
    #[serde(default = "default_reach_tolerance")]
    pub reach_tolerance: f64,
    /// Half-width of the flight volume on every axis [m]
    #[serde(default = "default_bounds")]
    pub bounds: f64,
    /// Segment time limit [s]
    #[serde(default = "default_max_time")]
    pub max_time: f64,
    /// Physical action range `[-span, span]` on every axis [m]
    #[serde(default = "default_action_span")]
    pub action_span: f64,
    /// Weight of the heading-alignment reward term
    #[serde(default = "default_heading_weight")]
    pub heading_weight: f64,
    /// Commanded acceleration above which the vehicle counts as tipped [m/s²]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_accel: Option<f64>,
}

fn default_dt() -> f64 {
    0.1
}

fn default_gain() -> f64 {
    1.0
}

fn default_max_velocity() -> f64 {
    7.0
}

fn default_reach_tolerance() -> f64 {
    0.5
}

fn default_bounds() -> f64 {
    50.0
}

fn default_max_time() -> f64 {
    200.0
}

fn default_action_span() -> f64 {
    5.0
}

fn default_heading_weight() -> f64 {
    0.1
}

impl Default for PointMassConfig {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            gain: default_gain(),
            max_velocity: default_max_velocity(),
            reach_tolerance: default_reach_tolerance(),
            bounds: default_bounds(),
            max_time: default_max_time(),
            action_span: default_action_span(),
            heading_weight: default_heading_weight(),
            tip_accel: None,
        }
    }
}

/// Point-mass vehicle flying one segment toward a target
pub struct PointMassEnv {
    config: PointMassConfig,
    actions: ActionSpace,
    /// position, velocity, attitude, body rates
    x: Vec<f64>,
    state_range: Vec<f64>,
    target: Waypoint,
    heading: Vector3<f64>,
    steps: u64,
}

impl PointMassEnv {
    pub fn new(config: PointMassConfig) -> Result<Self> {
        let positive = [
            ("dt", config.dt),
            ("gain", config.gain),
            ("max_velocity", config.max_velocity),
            ("reach_tolerance", config.reach_tolerance),
            ("bounds", config.bounds),
            ("max_time", config.max_time),
            ("action_span", config.action_span),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(TrajRLError::InvalidConfig(format!(
                "point-mass {} must be positive",
                name
            )));
        }

        let angle_span = 2.0 * std::f64::consts::PI;
        let mut state_range = vec![2.0 * config.bounds; 3];
        state_range.extend([2.0 * config.max_velocity; 3]);
        state_range.extend([angle_span; 6]);

        Ok(Self {
            actions: ActionSpace::symmetric(3, config.action_span),
            x: vec![0.0; KINEMATIC_STATE_LEN],
            state_range,
            target: Waypoint::zeros(),
            heading: Vector3::zeros(),
            steps: 0,
            config,
        })
    }

    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x[0], self.x[1], self.x[2])
    }

    pub fn velocity(&self) -> Vector3<f64> {
        Vector3::new(self.x[3], self.x[4], self.x[5])
    }

    pub fn target(&self) -> &Waypoint {
        &self.target
    }

    fn elapsed(&self) -> f64 {
        self.steps as f64 * self.config.dt
    }
}

impl FlightEnvironment for PointMassEnv {
    fn state(&self) -> &[f64] {
        &self.x
    }

    fn state_range(&self) -> &[f64] {
        &self.state_range
    }

    fn kinematic_state(&self) -> Vec<f64> {
        self.x[..KINEMATIC_STATE_LEN].to_vec()
    }

    fn action_dim(&self) -> usize {
        self.actions.dim()
    }

    fn normalize_action(&self, action: &[f64]) -> Vec<f64> {
        self.actions.normalize(action)
    }

    fn unnormalize_action(&self, action: &[f64]) -> Vec<f64> {
        self.actions.unnormalize(action)
    }

    fn reset(&mut self, start: &SegmentStart) -> Result<Vec<f64>> {
        if start.pose.len() != KINEMATIC_STATE_LEN {
            return Err(TrajRLError::Environment(format!(
                "reset pose has {} entries, expected {}",
                start.pose.len(),
                KINEMATIC_STATE_LEN
            )));
        }
        self.x = start.pose.clone();
        self.target = start.target;
        self.heading = start.heading;
        self.steps = 0;
        Ok(self.x.clone())
    }

    fn step(&mut self, action: &[f64]) -> Result<SegmentStep> {
        self.actions.check_dim(action)?;
        let command = self.actions.unnormalize(action);
        let setpoint = Vector3::new(command[0], command[1], command[2]);
        let dt = self.config.dt;

        let position = self.position();
        let previous_distance = (self.target - position).norm();

        let mut velocity = (setpoint - position) * self.config.gain;
        let speed = velocity.norm();
        if speed > self.config.max_velocity {
            velocity *= self.config.max_velocity / speed;
        }
        let accel = (velocity - self.velocity()).norm() / dt;
        let position = position + velocity * dt;

        self.x[..3].copy_from_slice(position.as_slice());
        self.x[3..6].copy_from_slice(velocity.as_slice());
        self.steps += 1;

        let distance = (self.target - position).norm();
        let progress = previous_distance - distance;
        let alignment = velocity.dot(&self.heading) * dt;
        let reward = progress + self.config.heading_weight * alignment;

        let mut info = StepInfo {
            reached: distance < self.config.reach_tolerance,
            tipped: self.config.tip_accel.is_some_and(|limit| accel > limit),
            out_of_bounds: position.iter().any(|p| p.abs() > self.config.bounds),
            out_of_time: self.elapsed() >= self.config.max_time - 1e-9,
            ..Default::default()
        };
        info.extra.insert("distance".into(), distance);
        info.extra.insert("accel".into(), accel);

        Ok(SegmentStep {
            state: self.x.clone(),
            reward,
            done: info.reached || info.failure().is_some(),
            info,
        })
    }
}
