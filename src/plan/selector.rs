//! Greedy constrained port selection.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::geom::{Point3, RayOcclusion, SampleSurface, Vec3};

use super::candidate::{Candidate, generate_candidates};
use super::config::RayFailurePolicy;
use super::pose::outward_axis;
use super::score::score_candidate;
use super::{Landmarks, PlanConfig, PlanError};

/// Offset along the candidate normal at which the trajectory ray starts,
/// so the ray does not re-hit the skin mesh the candidate lies on.
const RAY_OFFSET: f64 = 1e-4;

/// The planned ports: parallel point and normal arrays in the mesh's
/// coordinate frame, in selection order. Immutable once returned.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PortSet {
    pub points: Vec<Point3>,
    pub normals: Vec<Vec3>,
}

impl PortSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Plan `config.num_ports` trocar ports on `mesh`.
///
/// Candidates are sampled uniformly by area, filtered by alignment with the
/// pose-derived outward axis, then picked greedily by score under two hard
/// constraints: pairwise separation of at least `min_distance`, and no
/// outward trajectory crossing any of `zones`.
///
/// Deterministic for identical inputs and `config.seed`.
///
/// # Errors
///
/// - [`PlanError::InvalidArgument`] for a malformed configuration, before
///   any sampling happens.
/// - [`PlanError::InsufficientCandidates`] when the orientation filter
///   leaves fewer candidates than ports.
/// - [`PlanError::InfeasiblePlacement`] when the pool runs out before
///   `num_ports` ports satisfy the constraints. No partial result.
pub fn plan_ports(
    mesh: &impl SampleSurface,
    landmarks: &Landmarks,
    zones: &[&dyn RayOcclusion],
    config: &PlanConfig,
) -> Result<PortSet, PlanError> {
    config.validate()?;

    let outward = outward_axis(config.position, config.table_pitch_deg, config.table_roll_deg);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let candidates = generate_candidates(mesh, outward, config, &mut rng)?;
    select_ports(&candidates, landmarks, zones, config)
}

fn select_ports(
    candidates: &[Candidate],
    landmarks: &Landmarks,
    zones: &[&dyn RayOcclusion],
    config: &PlanConfig,
) -> Result<PortSet, PlanError> {
    // Live-index pool; ascending order doubles as the deterministic
    // tie-breaker (first-sampled wins).
    let mut pool: Vec<usize> = (0..candidates.len()).collect();
    let mut chosen: Vec<Candidate> = Vec::with_capacity(config.num_ports);
    let mut iterations = 0usize;

    while chosen.len() < config.num_ports {
        if let Some(cap) = config.max_iterations {
            if iterations >= cap {
                log::warn!("selection iteration cap {cap} reached with {} ports", chosen.len());
                return Err(infeasible(chosen.len(), config.num_ports));
            }
        }
        iterations += 1;

        let Some(best) = best_candidate(candidates, &pool, &chosen, landmarks, zones, config)
        else {
            return Err(infeasible(chosen.len(), config.num_ports));
        };

        let point = candidates[best].point;
        let separated = chosen
            .iter()
            .all(|port| port.point.distance_to(point) >= config.min_distance);
        if separated {
            chosen.push(candidates[best]);
            pool.retain(|&i| {
                i != best && candidates[i].point.distance_to(point) >= config.min_distance
            });
            log::debug!(
                "accepted port {} at ({:.4}, {:.4}, {:.4}), pool {} remaining",
                chosen.len(),
                point.x,
                point.y,
                point.z,
                pool.len()
            );
        } else {
            // Too close to an accepted port: drop this one and try the next
            // best. Other scores are unaffected.
            pool.retain(|&i| i != best);
        }
    }

    Ok(PortSet {
        points: chosen.iter().map(|c| c.point).collect(),
        normals: chosen.iter().map(|c| c.normal).collect(),
    })
}

/// Highest-scoring live candidate, or `None` when the pool is empty or every
/// live candidate is vetoed by a forbidden zone.
fn best_candidate(
    candidates: &[Candidate],
    pool: &[usize],
    chosen: &[Candidate],
    landmarks: &Landmarks,
    zones: &[&dyn RayOcclusion],
    config: &PlanConfig,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &index in pool {
        let candidate = &candidates[index];
        let score = if trajectory_blocked(candidate, zones, config.ray_failure) {
            f64::NEG_INFINITY
        } else {
            score_candidate(candidate, chosen, landmarks, config)
        };
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    match best {
        // A pool where even the best pick is vetoed is as good as empty:
        // the veto must never lose to "least bad" reasoning.
        Some((_, score)) if score == f64::NEG_INFINITY => None,
        Some((index, _)) => Some(index),
        None => None,
    }
}

/// Whether the outward trajectory from `candidate` hits any forbidden zone.
fn trajectory_blocked(
    candidate: &Candidate,
    zones: &[&dyn RayOcclusion],
    policy: RayFailurePolicy,
) -> bool {
    let origin = candidate.point + candidate.normal * RAY_OFFSET;
    for zone in zones {
        match zone.ray_intersects(origin, candidate.normal) {
            Ok(true) => return true,
            Ok(false) => {}
            Err(err) => match policy {
                RayFailurePolicy::FailOpen => {
                    log::warn!("forbidden-zone query failed ({err}), treating as clear");
                }
                RayFailurePolicy::FailClosed => {
                    log::warn!("forbidden-zone query failed ({err}), vetoing candidate");
                    return true;
                }
            },
        }
    }
    false
}

fn infeasible(placed: usize, required: usize) -> PlanError {
    log::warn!("candidate pool exhausted with {placed} of {required} ports placed");
    PlanError::InfeasiblePlacement { placed, required }
}
