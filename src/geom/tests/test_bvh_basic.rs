use crate::geom::bvh::Bvh;
use crate::geom::{BBox, Point3, Vec3};

fn unit_grid_bboxes(n: usize) -> Vec<BBox> {
    // A row of unit cubes along +X: cube k spans [k, k+1] in x.
    (0..n)
        .map(|k| {
            let k = k as f64;
            BBox::new(Point3::new(k, 0.0, 0.0), Point3::new(k + 1.0, 1.0, 1.0))
        })
        .collect()
}

#[test]
fn build_rejects_empty_input() {
    assert!(Bvh::build(&[]).is_none());
}

#[test]
fn ray_visits_only_boxes_on_its_path() {
    let bboxes = unit_grid_bboxes(32);
    let bvh = Bvh::build(&bboxes).expect("bvh");

    // Straight down through cube 10 only.
    let mut visited = Vec::new();
    bvh.query_ray(
        Point3::new(10.5, 0.5, 5.0),
        Vec3::new(0.0, 0.0, -1.0),
        |prim| {
            visited.push(prim);
            true
        },
    );
    assert_eq!(visited, vec![10]);
}

#[test]
fn ray_along_the_row_visits_every_box() {
    let bboxes = unit_grid_bboxes(16);
    let bvh = Bvh::build(&bboxes).expect("bvh");

    let mut visited = Vec::new();
    bvh.query_ray(
        Point3::new(-1.0, 0.5, 0.5),
        Vec3::new(1.0, 0.0, 0.0),
        |prim| {
            visited.push(prim);
            true
        },
    );
    visited.sort_unstable();
    assert_eq!(visited, (0..16).collect::<Vec<_>>());
}

#[test]
fn ray_behind_the_boxes_misses() {
    let bboxes = unit_grid_bboxes(8);
    let bvh = Bvh::build(&bboxes).expect("bvh");

    // The half-line points away from the whole row.
    let mut count = 0;
    bvh.query_ray(
        Point3::new(-1.0, 0.5, 0.5),
        Vec3::new(-1.0, 0.0, 0.0),
        |_| {
            count += 1;
            true
        },
    );
    assert_eq!(count, 0);
}

#[test]
fn visitor_can_stop_traversal_early() {
    let bboxes = unit_grid_bboxes(16);
    let bvh = Bvh::build(&bboxes).expect("bvh");

    let mut count = 0;
    bvh.query_ray(
        Point3::new(-1.0, 0.5, 0.5),
        Vec3::new(1.0, 0.0, 0.0),
        |_| {
            count += 1;
            false
        },
    );
    assert_eq!(count, 1);
}
