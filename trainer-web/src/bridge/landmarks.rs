//! Landmark vocabulary and flat-array decoding
//!
//! The pose model hands JavaScript 33 BlazePose landmarks per frame. They
//! reach Rust either as a named map or as a flat `Float32Array`; this module
//! owns the index ↔ name table both paths share.

use crate::physics::{Keypoint, Keypoints};

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const LANDMARK_COUNT: usize = 33;

/// Floats per landmark in flat input: x, y, score
pub const LANDMARK_STRIDE: usize = 3;

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// Landmark names in model output order
pub const LANDMARK_NAMES: [&str; LANDMARK_COUNT] = [
    "nose",
    "left_eye_inner",
    "left_eye",
    "left_eye_outer",
    "right_eye_inner",
    "right_eye",
    "right_eye_outer",
    "left_ear",
    "right_ear",
    "mouth_left",
    "mouth_right",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_pinky",
    "right_pinky",
    "left_index",
    "right_index",
    "left_thumb",
    "right_thumb",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
    "left_heel",
    "right_heel",
    "left_foot_index",
    "right_foot_index",
];

/// Model index of a landmark name
pub fn landmark_index(name: &str) -> Option<usize> {
    LANDMARK_NAMES.iter().position(|n| *n == name)
}

/// Decode 33 × (x, y, score) floats into a named frame.
///
/// Returns `None` unless `data` holds exactly 99 values.
pub fn keypoints_from_flat(data: &[f32]) -> Option<Keypoints> {
    if data.len() != LANDMARK_COUNT * LANDMARK_STRIDE {
        return None;
    }

    let frame = data
        .chunks_exact(LANDMARK_STRIDE)
        .zip(LANDMARK_NAMES)
        .map(|(values, name)| {
            (
                name.to_string(),
                Keypoint::new(name, values[0], values[1], values[2]),
            )
        })
        .collect();
    Some(frame)
}
