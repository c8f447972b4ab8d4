//! Ray queries against forbidden-organ meshes.
//!
//! A [`ForbiddenZone`] wraps a validated [`SurfaceMesh`] in a BVH so the
//! planner can ask "does this trajectory hit the organ?" per candidate. The
//! planner consumes zones through [`RayOcclusion`], which is fallible:
//! degenerate ray input surfaces as an error the caller's failure policy can
//! act on instead of being silently swallowed.

use super::bvh::Bvh;
use super::{BBox, GeomError, Point3, SurfaceMesh, Tolerance, Vec3};

/// Ray-occlusion capability required by the port planner.
pub trait RayOcclusion {
    /// Whether the half-line from `origin` along `dir` intersects this zone.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::InvalidGeometry`] when the ray itself is
    /// degenerate (non-finite components or zero direction).
    fn ray_intersects(&self, origin: Point3, dir: Vec3) -> Result<bool, GeomError>;
}

/// Möller–Trumbore ray/triangle intersection.
///
/// Returns the hit parameter `t` along `dir`, or `None` for misses, grazes
/// within tolerance of the origin, and degenerate (parallel or zero-area)
/// configurations.
pub(crate) fn ray_triangle_intersection(
    origin: Point3,
    dir: Vec3,
    a: Point3,
    b: Point3,
    c: Point3,
    tol: Tolerance,
) -> Option<f64> {
    let edge1 = b - a;
    let edge2 = c - a;
    let h = dir.cross(edge2);
    let det = edge1.dot(h);
    let det_eps = tol.eps * edge1.length() * h.length();
    if !det.is_finite() || det.abs() <= det_eps {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = inv_det * s.dot(h);
    if u < -tol.eps || u > 1.0 + tol.eps {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * dir.dot(q);
    if v < -tol.eps || u + v > 1.0 + tol.eps {
        return None;
    }

    let t = inv_det * edge2.dot(q);
    if !t.is_finite() || t < tol.eps {
        return None;
    }
    Some(t)
}

/// An organ mesh that port trajectories must not cross.
#[derive(Debug, Clone)]
pub struct ForbiddenZone {
    mesh: SurfaceMesh,
    bvh: Bvh,
    tol: Tolerance,
}

impl ForbiddenZone {
    /// Wrap a mesh for ray queries. Builds the acceleration structure once.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::EmptyMesh`] when the mesh has no triangles.
    pub fn new(mesh: SurfaceMesh) -> Result<Self, GeomError> {
        let mut bboxes = Vec::with_capacity(mesh.triangle_count());
        for face in 0..mesh.triangle_count() {
            let (a, b, c) = mesh.triangle(face as u32);
            bboxes.push(
                BBox::from_points(&[a, b, c]).ok_or(GeomError::InvalidGeometry)?,
            );
        }
        let bvh = Bvh::build(&bboxes).ok_or(GeomError::EmptyMesh)?;
        Ok(Self {
            mesh,
            bvh,
            tol: Tolerance::DEFAULT,
        })
    }

    /// Build a zone directly from raw mesh buffers.
    ///
    /// # Errors
    ///
    /// Propagates [`SurfaceMesh::new`] validation failures.
    pub fn from_buffers(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Result<Self, GeomError> {
        Self::new(SurfaceMesh::new(positions, indices)?)
    }

    #[must_use]
    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }
}

impl RayOcclusion for ForbiddenZone {
    fn ray_intersects(&self, origin: Point3, dir: Vec3) -> Result<bool, GeomError> {
        if !origin.is_finite() || !dir.is_finite() || dir == Vec3::ZERO {
            return Err(GeomError::InvalidGeometry);
        }

        let mut hit = false;
        self.bvh.query_ray(origin, dir, |face| {
            let (a, b, c) = self.mesh.triangle(face as u32);
            if ray_triangle_intersection(origin, dir, a, b, c, self.tol).is_some() {
                hit = true;
                return false;
            }
            true
        });
        Ok(hit)
    }
}
