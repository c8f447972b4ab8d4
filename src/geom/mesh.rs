//! Triangulated body-surface meshes and area-weighted surface sampling.
//!
//! A [`SurfaceMesh`] is validated once at construction and then read-only:
//! per-face unit normals and a cumulative-area table are derived up front so
//! sampling is a binary search plus one barycentric draw per point. The
//! planner consumes meshes through the [`SampleSurface`] trait, which keeps
//! the geometry provider swappable in tests.

use std::f64::consts::{PI, TAU};

use rand::Rng;
use rand::rngs::StdRng;

use super::{GeomError, Point3, Vec3};

/// Surface-sampling capability required by the port planner.
///
/// `sample_surface` returns `(point, face_index)` pairs distributed uniformly
/// by surface area; `face_normal` resolves a face index to its unit outward
/// normal.
pub trait SampleSurface {
    fn sample_surface(&self, count: usize, rng: &mut StdRng) -> Vec<(Point3, u32)>;

    fn face_normal(&self, face: u32) -> Option<Vec3>;
}

/// An immutable triangle mesh with per-face derived data.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    positions: Vec<[f64; 3]>,
    indices: Vec<u32>,
    face_normals: Vec<Vec3>,
    // cumulative_area[k] is the total area of faces 0..=k.
    cumulative_area: Vec<f64>,
}

impl SurfaceMesh {
    /// Build a mesh from a vertex buffer and a triangle-list index buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::EmptyMesh`] for empty buffers,
    /// [`GeomError::InvalidIndices`] when `indices` is not a triangle list or
    /// references out-of-bounds vertices, [`GeomError::InvalidGeometry`] for
    /// non-finite vertex coordinates, and [`GeomError::ZeroArea`] when the
    /// whole surface is degenerate.
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Result<Self, GeomError> {
        if positions.is_empty() || indices.is_empty() {
            return Err(GeomError::EmptyMesh);
        }
        if indices.len() % 3 != 0 {
            return Err(GeomError::InvalidIndices);
        }
        let vertex_count = positions.len() as u32;
        if indices.iter().any(|&i| i >= vertex_count) {
            return Err(GeomError::InvalidIndices);
        }
        if positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
        {
            return Err(GeomError::InvalidGeometry);
        }

        let face_count = indices.len() / 3;
        let mut face_normals = Vec::with_capacity(face_count);
        let mut cumulative_area = Vec::with_capacity(face_count);
        let mut total = 0.0_f64;
        for tri in indices.chunks_exact(3) {
            let a = Point3::from(positions[tri[0] as usize]);
            let b = Point3::from(positions[tri[1] as usize]);
            let c = Point3::from(positions[tri[2] as usize]);
            let cross = (b - a).cross(c - a);
            total += 0.5 * cross.length();
            cumulative_area.push(total);
            // Zero-area faces keep a zero normal; they carry no sampling weight.
            face_normals.push(cross.normalized().unwrap_or(Vec3::ZERO));
        }
        if !(total > 0.0) {
            return Err(GeomError::ZeroArea);
        }

        Ok(Self {
            positions,
            indices,
            face_normals,
            cumulative_area,
        })
    }

    /// A square plane of the given edge length, centered at the origin in the
    /// z = 0 plane, facing +Z. Two triangles.
    pub fn plane(size: f64) -> Result<Self, GeomError> {
        let half = size / 2.0;
        let positions = vec![
            [-half, -half, 0.0],
            [half, -half, 0.0],
            [half, half, 0.0],
            [-half, half, 0.0],
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];
        Self::new(positions, indices)
    }

    /// A UV sphere with outward-facing triangles.
    ///
    /// `rings` is the number of latitude bands (minimum 3) and `segments` the
    /// number of longitude steps (minimum 3). Pole caps are triangle fans, so
    /// the mesh contains no degenerate faces.
    pub fn uv_sphere(
        center: Point3,
        radius: f64,
        rings: u32,
        segments: u32,
    ) -> Result<Self, GeomError> {
        let rings = rings.max(3) as usize;
        let segments = segments.max(3) as usize;

        let mut positions = Vec::with_capacity((rings + 1) * segments);
        for i in 0..=rings {
            let phi = PI * i as f64 / rings as f64;
            for j in 0..segments {
                let theta = TAU * j as f64 / segments as f64;
                positions.push([
                    center.x + radius * phi.sin() * theta.cos(),
                    center.y + radius * phi.sin() * theta.sin(),
                    center.z + radius * phi.cos(),
                ]);
            }
        }

        let vertex = |i: usize, j: usize| (i * segments + j % segments) as u32;
        let mut indices = Vec::with_capacity(rings * segments * 6);
        for i in 0..rings {
            for j in 0..segments {
                let a = vertex(i, j);
                let b = vertex(i + 1, j);
                let c = vertex(i + 1, j + 1);
                let d = vertex(i, j + 1);
                if i + 1 < rings {
                    indices.extend_from_slice(&[a, b, c]);
                }
                if i > 0 {
                    indices.extend_from_slice(&[a, c, d]);
                }
            }
        }

        Self::new(positions, indices)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Total surface area.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.cumulative_area.last().copied().unwrap_or(0.0)
    }

    /// Corner points of a triangle. Face index must be in range.
    pub(crate) fn triangle(&self, face: u32) -> (Point3, Point3, Point3) {
        let base = face as usize * 3;
        (
            Point3::from(self.positions[self.indices[base] as usize]),
            Point3::from(self.positions[self.indices[base + 1] as usize]),
            Point3::from(self.positions[self.indices[base + 2] as usize]),
        )
    }
}

impl SampleSurface for SurfaceMesh {
    fn sample_surface(&self, count: usize, rng: &mut StdRng) -> Vec<(Point3, u32)> {
        let total = self.total_area();
        let last_face = self.triangle_count() - 1;

        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            // Pick a face proportionally to its area.
            let r = rng.random::<f64>() * total;
            let face = self
                .cumulative_area
                .partition_point(|&area| area <= r)
                .min(last_face) as u32;

            // Uniform barycentric draw inside the face.
            let (a, b, c) = self.triangle(face);
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            let sqrt_r1 = r1.sqrt();
            let u = 1.0 - sqrt_r1;
            let v = r2 * sqrt_r1;
            let w = 1.0 - u - v;
            let point = Point3::new(
                a.x * u + b.x * v + c.x * w,
                a.y * u + b.y * v + c.y * w,
                a.z * u + b.z * v + c.z * w,
            );
            samples.push((point, face));
        }
        samples
    }

    fn face_normal(&self, face: u32) -> Option<Vec3> {
        let normal = self.face_normals.get(face as usize).copied()?;
        if normal == Vec3::ZERO { None } else { Some(normal) }
    }
}
