use super::{BBox, Point3, Vec3};

#[derive(Debug, Clone, Copy)]
struct Node {
    bbox: BBox,
    left: u32,
    right: u32,
    start: u32,
    count: u32,
}

impl Node {
    const fn is_leaf(self) -> bool {
        self.count != 0
    }
}

/// Median-split bounding-volume hierarchy over triangle bboxes.
#[derive(Debug, Clone)]
pub(crate) struct Bvh {
    nodes: Vec<Node>,
    order: Vec<u32>,
}

impl Bvh {
    const LEAF_SIZE: usize = 8;

    #[must_use]
    pub(crate) fn build(bboxes: &[BBox]) -> Option<Self> {
        if bboxes.is_empty() {
            return None;
        }
        let order: Vec<u32> = (0..bboxes.len() as u32).collect();
        let mut bvh = Self {
            nodes: Vec::with_capacity(bboxes.len().saturating_mul(2)),
            order,
        };
        bvh.split(bboxes, 0, bboxes.len());
        Some(bvh)
    }

    fn split(&mut self, bboxes: &[BBox], start: usize, end: usize) -> u32 {
        let index = self.nodes.len() as u32;
        let mut bbox = bboxes[self.order[start] as usize];
        for &prim in &self.order[start + 1..end] {
            bbox = bbox.union(bboxes[prim as usize]);
        }
        self.nodes.push(Node {
            bbox,
            left: 0,
            right: 0,
            start: start as u32,
            count: (end - start) as u32,
        });

        if end - start <= Self::LEAF_SIZE {
            return index;
        }

        // Median split along the widest centroid axis.
        let axis = widest_centroid_axis(bboxes, &self.order[start..end]);
        let mid = start + (end - start) / 2;
        self.order[start..end].select_nth_unstable_by(mid - start, |a, b| {
            let ca = centroid_component(bboxes[*a as usize], axis);
            let cb = centroid_component(bboxes[*b as usize], axis);
            ca.total_cmp(&cb)
        });

        let left = self.split(bboxes, start, mid);
        let right = self.split(bboxes, mid, end);
        let node = &mut self.nodes[index as usize];
        node.left = left;
        node.right = right;
        node.count = 0;
        index
    }

    /// Visit every primitive whose bbox the ray `origin + t·dir` (t ≥ 0)
    /// touches. The visitor returns `false` to stop the traversal early.
    pub(crate) fn query_ray<F>(&self, origin: Point3, dir: Vec3, mut visit: F)
    where
        F: FnMut(usize) -> bool,
    {
        let mut stack = vec![0u32];
        while let Some(node_idx) = stack.pop() {
            let node = self.nodes[node_idx as usize];
            if !ray_hits_bbox(origin, dir, node.bbox) {
                continue;
            }
            if node.is_leaf() {
                let start = node.start as usize;
                let end = start + node.count as usize;
                for &prim in &self.order[start..end] {
                    if !visit(prim as usize) {
                        return;
                    }
                }
                continue;
            }
            stack.push(node.left);
            stack.push(node.right);
        }
    }
}

fn centroid_component(bbox: BBox, axis: u8) -> f64 {
    let c = bbox.center();
    match axis {
        0 => c.x,
        1 => c.y,
        _ => c.z,
    }
}

fn widest_centroid_axis(bboxes: &[BBox], order: &[u32]) -> u8 {
    let first = bboxes[order[0] as usize].center();
    let mut min = first;
    let mut max = first;
    for &prim in &order[1..] {
        let c = bboxes[prim as usize].center();
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        min.z = min.z.min(c.z);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
        max.z = max.z.max(c.z);
    }

    let ex = max.x - min.x;
    let ey = max.y - min.y;
    let ez = max.z - min.z;
    if ex >= ey && ex >= ez {
        0
    } else if ey >= ez {
        1
    } else {
        2
    }
}

/// Slab test for the half-line t ∈ [0, ∞).
fn ray_hits_bbox(origin: Point3, dir: Vec3, bbox: BBox) -> bool {
    let mut tmin = 0.0_f64;
    let mut tmax = f64::INFINITY;
    let eps = 1e-15;

    for axis in 0..3u8 {
        let (o, d, min, max) = match axis {
            0 => (origin.x, dir.x, bbox.min.x, bbox.max.x),
            1 => (origin.y, dir.y, bbox.min.y, bbox.max.y),
            _ => (origin.z, dir.z, bbox.min.z, bbox.max.z),
        };

        if !o.is_finite() || !d.is_finite() {
            return false;
        }

        if d.abs() <= eps {
            if o < min || o > max {
                return false;
            }
            continue;
        }

        let inv_d = 1.0 / d;
        let mut t0 = (min - o) * inv_d;
        let mut t1 = (max - o) * inv_d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        tmin = tmin.max(t0);
        tmax = tmax.min(t1);
        if tmax < tmin {
            return false;
        }
    }

    true
}
