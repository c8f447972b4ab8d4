//! Patient positioning and the pose-derived outward approach axis.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geom::{Transform, Vec3};

use super::PlanError;

/// Canonical patient position on the operating table.
///
/// The four variants are the only valid positions; string inputs from an
/// embedding service go through [`FromStr`], which rejects anything else
/// with [`PlanError::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientPosition {
    #[default]
    Supine,
    Prone,
    LeftLateral,
    RightLateral,
}

impl PatientPosition {
    /// Outward ("away from the table") direction before any table tilt.
    #[must_use]
    pub const fn canonical_axis(self) -> Vec3 {
        match self {
            Self::Supine => Vec3::new(0.0, 0.0, 1.0),
            Self::Prone => Vec3::new(0.0, 0.0, -1.0),
            Self::LeftLateral => Vec3::new(-1.0, 0.0, 0.0),
            Self::RightLateral => Vec3::new(1.0, 0.0, 0.0),
        }
    }
}

impl FromStr for PatientPosition {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, PlanError> {
        match s {
            "supine" => Ok(Self::Supine),
            "prone" => Ok(Self::Prone),
            "left" | "left-lateral" => Ok(Self::LeftLateral),
            "right" | "right-lateral" => Ok(Self::RightLateral),
            other => Err(PlanError::InvalidArgument(format!(
                "unknown patient position '{other}'"
            ))),
        }
    }
}

/// Outward approach axis in mesh coordinates for a positioned, tilted table.
///
/// Pitch rotates about X first, roll about Y second; both in degrees,
/// right-handed. The result is unit length.
#[must_use]
pub fn outward_axis(position: PatientPosition, pitch_deg: f64, roll_deg: f64) -> Vec3 {
    let rotation = Transform::rotate_y(roll_deg.to_radians())
        .compose(Transform::rotate_x(pitch_deg.to_radians()));
    let axis = rotation.apply_vec(position.canonical_axis());
    // Rotations preserve length; the fallback only covers non-finite tilt
    // input slipping past config validation.
    axis.normalized().unwrap_or_else(|| position.canonical_axis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(got: Vec3, want: Vec3) {
        assert!(
            (got - want).length() < 1e-12,
            "expected {want:?}, got {got:?}"
        );
    }

    #[test]
    fn canonical_axes_without_tilt() {
        assert_close(outward_axis(PatientPosition::Supine, 0.0, 0.0), Vec3::Z);
        assert_close(outward_axis(PatientPosition::Prone, 0.0, 0.0), -Vec3::Z);
        assert_close(outward_axis(PatientPosition::LeftLateral, 0.0, 0.0), -Vec3::X);
        assert_close(outward_axis(PatientPosition::RightLateral, 0.0, 0.0), Vec3::X);
    }

    #[test]
    fn pitch_rotates_supine_axis_about_x() {
        assert_close(
            outward_axis(PatientPosition::Supine, 90.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        );
    }

    #[test]
    fn roll_rotates_supine_axis_about_y() {
        assert_close(
            outward_axis(PatientPosition::Supine, 0.0, 90.0),
            Vec3::X,
        );
    }

    #[test]
    fn pitch_applies_before_roll() {
        // Rx(90°) sends +Z to -Y, which Ry leaves untouched.
        assert_close(
            outward_axis(PatientPosition::Supine, 90.0, 90.0),
            Vec3::new(0.0, -1.0, 0.0),
        );
    }

    #[test]
    fn tilted_axis_stays_unit_length() {
        let axis = outward_axis(PatientPosition::LeftLateral, 17.0, -33.0);
        assert!((axis.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn position_parses_known_names_only() {
        assert_eq!(
            "supine".parse::<PatientPosition>().unwrap(),
            PatientPosition::Supine
        );
        assert_eq!(
            "left".parse::<PatientPosition>().unwrap(),
            PatientPosition::LeftLateral
        );
        assert_eq!(
            "right-lateral".parse::<PatientPosition>().unwrap(),
            PatientPosition::RightLateral
        );
        assert!(matches!(
            "sideways".parse::<PatientPosition>(),
            Err(PlanError::InvalidArgument(_))
        ));
    }
}
