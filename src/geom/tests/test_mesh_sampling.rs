use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::geom::{GeomError, Point3, SampleSurface, SurfaceMesh, Vec3};

#[test]
fn construction_validates_buffers() {
    assert_eq!(
        SurfaceMesh::new(vec![], vec![]).unwrap_err(),
        GeomError::EmptyMesh
    );
    assert_eq!(
        SurfaceMesh::new(vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], vec![0, 1]).unwrap_err(),
        GeomError::InvalidIndices
    );
    assert_eq!(
        SurfaceMesh::new(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 7]
        )
        .unwrap_err(),
        GeomError::InvalidIndices
    );
    assert_eq!(
        SurfaceMesh::new(
            vec![[0.0; 3], [f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2]
        )
        .unwrap_err(),
        GeomError::InvalidGeometry
    );
    // Collinear vertices span no area.
    assert_eq!(
        SurfaceMesh::new(
            vec![[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            vec![0, 1, 2]
        )
        .unwrap_err(),
        GeomError::ZeroArea
    );
}

#[test]
fn plane_fixture_has_expected_area_and_normals() {
    let mesh = SurfaceMesh::plane(0.4).expect("plane");
    assert_eq!(mesh.triangle_count(), 2);
    assert!((mesh.total_area() - 0.16).abs() < 1e-12);
    for face in 0..2 {
        let n = mesh.face_normal(face).expect("normal");
        assert!((n - Vec3::Z).length() < 1e-12);
    }
    assert!(mesh.face_normal(2).is_none());
}

#[test]
fn plane_samples_stay_on_the_surface() {
    let mesh = SurfaceMesh::plane(0.4).expect("plane");
    let mut rng = StdRng::seed_from_u64(7);

    let samples = mesh.sample_surface(256, &mut rng);
    assert_eq!(samples.len(), 256);
    for (point, face) in samples {
        assert!((face as usize) < mesh.triangle_count());
        assert!(point.z.abs() < 1e-12);
        assert!(point.x.abs() <= 0.2 + 1e-12);
        assert!(point.y.abs() <= 0.2 + 1e-12);
    }
}

#[test]
fn sampling_is_weighted_by_face_area() {
    // One triangle 100x the area of the other; the small one should receive
    // roughly one percent of the samples.
    let positions = vec![
        [0.0, 0.0, 0.0],
        [10.0, 0.0, 0.0],
        [0.0, 2.0, 0.0],
        [0.0, -0.1, 0.0],
        [1.0, -0.1, 0.0],
        [0.0, -0.3, 0.0],
    ];
    let indices = vec![0, 1, 2, 3, 4, 5];
    let mesh = SurfaceMesh::new(positions, indices).expect("mesh");
    let mut rng = StdRng::seed_from_u64(11);

    let samples = mesh.sample_surface(2000, &mut rng);
    let big = samples.iter().filter(|(_, face)| *face == 0).count();
    assert!(big >= 1900, "big face drew only {big} of 2000 samples");
}

#[test]
fn sampling_is_reproducible_for_a_seed() {
    let mesh = SurfaceMesh::uv_sphere(Point3::ORIGIN, 0.5, 8, 12).expect("sphere");
    let a = mesh.sample_surface(64, &mut StdRng::seed_from_u64(3));
    let b = mesh.sample_surface(64, &mut StdRng::seed_from_u64(3));
    assert_eq!(a, b);
}

#[test]
fn sphere_fixture_is_closed_and_outward_facing() {
    let center = Point3::new(0.1, -0.2, 0.3);
    let mesh = SurfaceMesh::uv_sphere(center, 0.5, 8, 12).expect("sphere");
    let mut rng = StdRng::seed_from_u64(5);

    for (point, face) in mesh.sample_surface(200, &mut rng) {
        let offset = point - center;
        // Chord points sit slightly inside the radius, never outside.
        assert!(offset.length() <= 0.5 + 1e-9);
        assert!(offset.length() >= 0.4);

        // Outward normal roughly parallel to the radial direction.
        let normal = mesh.face_normal(face).expect("normal");
        let radial = offset.normalized().expect("radial");
        assert!(normal.dot(radial) > 0.7, "inward-facing face {face}");
    }
}
