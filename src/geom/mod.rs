mod bvh;
mod core;
mod mesh;
mod ray;

pub use core::{BBox, Point3, Tolerance, Transform, Vec3};
pub use mesh::{SampleSurface, SurfaceMesh};
pub use ray::{ForbiddenZone, RayOcclusion};

/// Errors raised by mesh construction and ray queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeomError {
    #[error("mesh is empty")]
    EmptyMesh,
    #[error("mesh contains invalid indices")]
    InvalidIndices,
    #[error("geometry contains invalid (non-finite) coordinates")]
    InvalidGeometry,
    #[error("mesh has zero total surface area")]
    ZeroArea,
}

#[cfg(test)]
mod tests;
