//! Per-frame pose data shared by the angle engine, form checker and
//! rep detector

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// One detected body joint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Landmark name, e.g. `left_shoulder`. Empty when the frame map key is
    /// the only name supplied.
    #[serde(default)]
    pub name: String,
    /// Horizontal position (pixels or normalized 0-1)
    pub x: f32,
    /// Vertical position, same space as `x`
    pub y: f32,
    /// Detection confidence (0-1)
    #[serde(default = "full_confidence")]
    pub score: f32,
}

fn full_confidence() -> f32 {
    1.0
}

impl Keypoint {
    pub fn new(name: &str, x: f32, y: f32, score: f32) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            score,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// One frame of keypoints, keyed by landmark name
pub type Keypoints = HashMap<String, Keypoint>;

/// A frame as hosts send it, where a lookup that found nothing arrives as
/// `null` or `undefined`
pub type SparseKeypoints = HashMap<String, Option<Keypoint>>;

/// Joint name -> signed angle in degrees, range (-180, 180]
pub type AngleMap = BTreeMap<String, f32>;

/// Build a frame from keypoints, keying each by its own name
pub fn frame_from<I>(keypoints: I) -> Keypoints
where
    I: IntoIterator<Item = Keypoint>,
{
    keypoints
        .into_iter()
        .map(|kp| (kp.name.clone(), kp))
        .collect()
}

/// Drop empty slots from a host frame. An empty slot is a missing keypoint.
pub fn frame_from_sparse(sparse: SparseKeypoints) -> Keypoints {
    sparse
        .into_iter()
        .filter_map(|(name, kp)| kp.map(|kp| (name, kp)))
        .collect()
}
