//! Form checker - compares measured angles against tolerance bands

use serde::{Deserialize, Serialize};

use super::state::AngleMap;
use crate::exercise::IdealAngle;

/// One out-of-band joint for the current frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormError {
    pub joint: String,
    pub angle: f32,
    pub message: String,
}

impl FormError {
    pub fn out_of_band(band: &IdealAngle, angle: f32) -> Self {
        Self {
            joint: band.joint.clone(),
            angle,
            message: format!(
                "{} angle should be between {}°-{}° (current: {:.1}°)",
                band.joint, band.min, band.max, angle
            ),
        }
    }
}

/// One error per band whose joint is measured and out of range, in band order.
/// Unmeasured joints are skipped.
pub fn check_form(angles: &AngleMap, ideal_angles: &[IdealAngle]) -> Vec<FormError> {
    ideal_angles
        .iter()
        .filter_map(|band| {
            let angle = *angles.get(&band.joint)?;
            band.is_violated_by(angle)
                .then(|| FormError::out_of_band(band, angle))
        })
        .collect()
}
