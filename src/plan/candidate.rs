//! Candidate generation: area-weighted surface samples filtered by
//! alignment with the outward approach axis.

use rand::rngs::StdRng;

use crate::geom::{Point3, SampleSurface, Vec3};

use super::{PlanConfig, PlanError};

/// A transient surface point plus its face normal. Candidates exist only for
/// the duration of one selection run; the output [`super::PortSet`] copies
/// the accepted ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    pub point: Point3,
    pub normal: Vec3,
}

/// Draw surface samples and keep those facing close enough to `outward`.
///
/// Candidates retain sampling order, which later serves as the deterministic
/// tie-breaker during selection.
pub(crate) fn generate_candidates(
    mesh: &impl SampleSurface,
    outward: Vec3,
    config: &PlanConfig,
    rng: &mut StdRng,
) -> Result<Vec<Candidate>, PlanError> {
    let samples = mesh.sample_surface(config.effective_sample_count(), rng);
    let min_alignment = config.max_angle_deg.to_radians().cos();

    let mut candidates = Vec::with_capacity(samples.len());
    for (point, face) in &samples {
        let Some(normal) = mesh.face_normal(*face) else {
            continue;
        };
        if normal.dot(outward) >= min_alignment {
            candidates.push(Candidate {
                point: *point,
                normal,
            });
        }
    }

    log::debug!(
        "orientation filter kept {} of {} surface samples",
        candidates.len(),
        samples.len()
    );

    if candidates.len() < config.num_ports {
        return Err(PlanError::InsufficientCandidates {
            sampled: samples.len(),
            kept: candidates.len(),
            required: config.num_ports,
        });
    }
    Ok(candidates)
}
