/// Failure taxonomy for port planning.
///
/// All variants are deterministic for identical inputs and seed; none is an
/// internally retryable condition. `InsufficientCandidates` and
/// `InfeasiblePlacement` carry the counts a caller needs to retry with
/// relaxed parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Malformed configuration, rejected before any geometric work.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The orientation filter left fewer candidates than ports requested.
    /// Relax `max_angle_deg` or raise the sample count.
    #[error("orientation filter kept {kept} of {sampled} samples, fewer than the {required} ports requested")]
    InsufficientCandidates {
        sampled: usize,
        kept: usize,
        required: usize,
    },

    /// The candidate pool ran out before all ports were placed; no partial
    /// result is returned.
    #[error("candidate pool exhausted after placing {placed} of {required} ports")]
    InfeasiblePlacement { placed: usize, required: usize },
}
