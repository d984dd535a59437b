//! Per-frame validation output

use serde::{Deserialize, Serialize};

use crate::physics::{AngleMap, FormError};

/// What the host gets back for every frame
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Angles measured this frame; occluded joints are absent
    pub angles: AngleMap,
    /// Out-of-band joints, in exercise band order
    pub errors: Vec<FormError>,
    /// True only on the frame a rep is counted
    pub rep_detected: bool,
    pub rep_count: u32,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Same frame outcome with every angle within `tolerance` degrees
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        let angles_match = self.angles.len() == other.angles.len()
            && self.angles.iter().all(|(joint, a)| {
                other
                    .angles
                    .get(joint)
                    .is_some_and(|b| (a - b).abs() <= tolerance)
            });
        let errors_match = self.errors.len() == other.errors.len()
            && self
                .errors
                .iter()
                .zip(&other.errors)
                .all(|(a, b)| a.joint == b.joint && (a.angle - b.angle).abs() <= tolerance);

        angles_match
            && errors_match
            && self.rep_detected == other.rep_detected
            && self.rep_count == other.rep_count
    }
}
