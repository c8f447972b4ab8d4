//! Candidate scoring. Higher is better.

use std::collections::BTreeMap;

use crate::geom::Point3;

use super::PlanConfig;
use super::candidate::Candidate;

/// Score one candidate against the landmarks, the ports accepted so far,
/// and the optional internal target.
///
/// Spread terms reward distance from anatomical landmarks and from already
/// chosen ports; target terms penalise trajectory length and the angle
/// between the target direction and the surface normal. A candidate sitting
/// exactly on the target has no defined trajectory direction, so the angle
/// term is skipped there.
pub(crate) fn score_candidate(
    candidate: &Candidate,
    chosen: &[Candidate],
    landmarks: &BTreeMap<String, Point3>,
    config: &PlanConfig,
) -> f64 {
    let mut spread = 0.0;
    for landmark in landmarks.values() {
        spread += candidate.point.distance_to(*landmark);
    }
    for port in chosen {
        spread += candidate.point.distance_to(port.point);
    }

    let mut score = config.w_dist * spread;

    if let Some(target) = config.target {
        let to_target = target - candidate.point;
        let depth = to_target.length();
        score -= config.w_len * depth;
        if depth > 0.0 {
            let trajectory = to_target / depth;
            let angle = trajectory.angle_to(candidate.normal);
            score -= config.w_angle * angle;
        }
    }

    score
}
