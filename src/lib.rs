#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Trocar port placement engine.
//!
//! Given a patient surface mesh, anatomical landmarks, the patient's pose on
//! the table, and optional forbidden organ meshes, [`plan_ports`] computes a
//! set of entry ports that are well spread, reachable from the surgeon's
//! side of the table, mutually separated, and whose outward trajectories
//! avoid every forbidden zone. All geometry stays in the caller's mesh
//! coordinate frame.

pub mod geom;
pub mod plan;

pub use geom::{ForbiddenZone, GeomError, Point3, RayOcclusion, SampleSurface, SurfaceMesh, Vec3};
pub use plan::{
    Landmarks, PatientPosition, PlanConfig, PlanError, PortSet, RayFailurePolicy, outward_axis,
    plan_ports,
};
