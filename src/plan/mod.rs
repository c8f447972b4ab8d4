//! Port planning: pose transform, candidate generation, scoring, and the
//! greedy constrained selector.

use std::collections::BTreeMap;

use crate::geom::Point3;

mod candidate;
mod config;
mod error;
mod pose;
mod score;
mod selector;

pub use config::{PlanConfig, RayFailurePolicy};
pub use error::PlanError;
pub use pose::{PatientPosition, outward_axis};
pub use selector::{PortSet, plan_ports};

/// Named anatomical landmarks, in the mesh's coordinate frame. Names are
/// for the caller's bookkeeping only; every value weighs equally in scoring.
pub type Landmarks = BTreeMap<String, Point3>;
