//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::geom::Point3;

use super::{PatientPosition, PlanError};

/// How to treat a forbidden-zone ray query that fails.
///
/// `FailOpen` keeps the original backend's behavior: the erroring zone is
/// treated as "no intersection" for that single check and the computation
/// continues, trading safety conservatism for availability. `FailClosed`
/// treats the error as a hit, vetoing the candidate. Either way the
/// degradation is logged at warn level; pick one policy per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RayFailurePolicy {
    #[default]
    FailOpen,
    FailClosed,
}

/// Configuration for one planning invocation. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlanConfig {
    /// Number of ports to place. Must be at least 1.
    pub num_ports: usize,
    /// Minimum pairwise distance between placed ports, in mesh units.
    pub min_distance: f64,
    /// Maximum angle between a candidate normal and the outward axis.
    pub max_angle_deg: f64,
    /// Patient position on the table.
    pub position: PatientPosition,
    /// Table pitch in degrees (rotation about X, applied first).
    pub table_pitch_deg: f64,
    /// Table roll in degrees (rotation about Y, applied second).
    pub table_roll_deg: f64,
    /// Optional target organ point; when set, short straight instrument
    /// paths toward it are rewarded.
    pub target: Option<Point3>,
    /// Weight of the landmark/port spread term.
    pub w_dist: f64,
    /// Weight of the target-distance penalty.
    pub w_len: f64,
    /// Weight of the target-angle penalty.
    pub w_angle: f64,
    /// Surface samples to draw; `None` means `10 * num_ports`.
    pub sample_count: Option<usize>,
    /// Seed for the sampling RNG; identical inputs and seed reproduce the
    /// exact same plan.
    pub seed: u64,
    /// Policy for forbidden-zone ray query failures.
    pub ray_failure: RayFailurePolicy,
    /// Safety-net cap on greedy selection iterations; `None` relies on the
    /// pool shrinking every iteration.
    pub max_iterations: Option<usize>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            num_ports: 3,
            min_distance: 0.04,
            max_angle_deg: 30.0,
            position: PatientPosition::Supine,
            table_pitch_deg: 0.0,
            table_roll_deg: 0.0,
            target: None,
            w_dist: 1.0,
            w_len: 1.0,
            w_angle: 0.5,
            sample_count: None,
            seed: 0,
            ray_failure: RayFailurePolicy::FailOpen,
            max_iterations: None,
        }
    }
}

impl PlanConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn num_ports(mut self, num_ports: usize) -> Self {
        self.num_ports = num_ports;
        self
    }

    #[must_use]
    pub const fn min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    #[must_use]
    pub const fn max_angle_deg(mut self, max_angle_deg: f64) -> Self {
        self.max_angle_deg = max_angle_deg;
        self
    }

    #[must_use]
    pub const fn position(mut self, position: PatientPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub const fn table_tilt(mut self, pitch_deg: f64, roll_deg: f64) -> Self {
        self.table_pitch_deg = pitch_deg;
        self.table_roll_deg = roll_deg;
        self
    }

    #[must_use]
    pub const fn target(mut self, target: Point3) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub const fn weights(mut self, w_dist: f64, w_len: f64, w_angle: f64) -> Self {
        self.w_dist = w_dist;
        self.w_len = w_len;
        self.w_angle = w_angle;
        self
    }

    #[must_use]
    pub const fn sample_count(mut self, count: usize) -> Self {
        self.sample_count = Some(count);
        self
    }

    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn ray_failure(mut self, policy: RayFailurePolicy) -> Self {
        self.ray_failure = policy;
        self
    }

    #[must_use]
    pub const fn max_iterations(mut self, cap: usize) -> Self {
        self.max_iterations = Some(cap);
        self
    }

    /// Number of surface samples to draw for this configuration.
    #[must_use]
    pub fn effective_sample_count(&self) -> usize {
        self.sample_count
            .unwrap_or_else(|| self.num_ports.saturating_mul(10))
    }

    /// Reject malformed configurations before any geometric work happens.
    pub(crate) fn validate(&self) -> Result<(), PlanError> {
        if self.num_ports < 1 {
            return Err(PlanError::InvalidArgument(
                "num_ports must be at least 1".to_owned(),
            ));
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(PlanError::InvalidArgument(format!(
                "min_distance must be finite and non-negative, got {}",
                self.min_distance
            )));
        }
        if !self.max_angle_deg.is_finite() || self.max_angle_deg <= 0.0 {
            return Err(PlanError::InvalidArgument(format!(
                "max_angle_deg must be finite and positive, got {}",
                self.max_angle_deg
            )));
        }
        if !self.table_pitch_deg.is_finite() || !self.table_roll_deg.is_finite() {
            return Err(PlanError::InvalidArgument(
                "table tilt angles must be finite".to_owned(),
            ));
        }
        if ![self.w_dist, self.w_len, self.w_angle]
            .iter()
            .all(|w| w.is_finite())
        {
            return Err(PlanError::InvalidArgument(
                "score weights must be finite".to_owned(),
            ));
        }
        if let Some(target) = self.target {
            if !target.is_finite() {
                return Err(PlanError::InvalidArgument(
                    "target point must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }
}
