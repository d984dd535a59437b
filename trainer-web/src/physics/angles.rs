//! Joint angle calculation
//!
//! Signed angle at a vertex from the two segments leaving it, via
//! `atan2(cross, dot)`. Unlike the `acos(dot / |v1||v2|)` form this never
//! leaves its domain on rounding error and keeps the bend direction.

use super::confidence_gate::ConfidenceGate;
use super::state::{AngleMap, Keypoints};
use crate::exercise::JointTriple;

/// Segments shorter than this are considered collapsed
pub const MIN_SEGMENT_LENGTH: f32 = 1e-6;

/// Signed angle in degrees at `vertex` from segment `vertex→a` to `vertex→c`.
///
/// Range is (-180, 180]. Returns `None` when either segment has zero length
/// or any coordinate is non-finite.
pub fn angle_at(a: (f32, f32), vertex: (f32, f32), c: (f32, f32)) -> Option<f32> {
    let v1 = (a.0 - vertex.0, a.1 - vertex.1);
    let v2 = (c.0 - vertex.0, c.1 - vertex.1);

    if !(v1.0.is_finite() && v1.1.is_finite() && v2.0.is_finite() && v2.1.is_finite()) {
        return None;
    }

    // Products of large f32 coordinates overflow; f64 holds any finite f32 squared
    let v1 = (f64::from(v1.0), f64::from(v1.1));
    let v2 = (f64::from(v2.0), f64::from(v2.1));

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    let min_len = f64::from(MIN_SEGMENT_LENGTH);
    if mag1 < min_len || mag2 < min_len {
        return None;
    }

    let cross = v1.0 * v2.1 - v1.1 * v2.0;
    let dot = v1.0 * v2.0 + v1.1 * v2.1;

    Some(wrap_degrees(cross.atan2(dot).to_degrees() as f32))
}

/// Fold atan2 output into (-180, 180]
pub(crate) fn wrap_degrees(degrees: f32) -> f32 {
    let clamped = degrees.clamp(-180.0, 180.0);
    if clamped <= -180.0 {
        180.0
    } else {
        clamped
    }
}

/// Angle for every joint whose three keypoints pass the gate
pub fn compute_angles(frame: &Keypoints, joints: &[JointTriple], gate: &ConfidenceGate) -> AngleMap {
    let mut angles = AngleMap::new();

    for triple in joints {
        let [start, vertex, end] = triple.points();
        let points = (
            gate.point(frame, start),
            gate.point(frame, vertex),
            gate.point(frame, end),
        );
        if let (Some(a), Some(b), Some(c)) = points {
            if let Some(angle) = angle_at(a, b, c) {
                angles.insert(triple.joint.clone(), angle);
            }
        }
    }

    angles
}
