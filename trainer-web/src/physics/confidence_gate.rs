//! Confidence gate - decides whether a keypoint counts as present
//!
//! Pose estimators keep emitting coordinates for occluded joints, just with
//! a low score. Anything under the threshold is treated exactly like a
//! keypoint missing from the frame.

use super::state::{Keypoint, Keypoints};
use crate::config::DEFAULT_MIN_KEYPOINT_SCORE;

#[derive(Clone, Copy, Debug)]
pub struct ConfidenceGate {
    /// Minimum score (inclusive) to accept a keypoint
    threshold: f32,
}

impl ConfidenceGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Score at or above threshold and finite coordinates.
    /// A NaN score never passes.
    pub fn accepts(&self, keypoint: &Keypoint) -> bool {
        keypoint.score >= self.threshold && keypoint.x.is_finite() && keypoint.y.is_finite()
    }

    /// Position of `name` in `frame`, if present and trusted
    pub fn point(&self, frame: &Keypoints, name: &str) -> Option<(f32, f32)> {
        frame
            .get(name)
            .filter(|kp| self.accepts(kp))
            .map(Keypoint::position)
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_KEYPOINT_SCORE)
    }
}
