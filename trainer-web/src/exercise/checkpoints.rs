//! Standard joint triples
//!
//! Each measured joint is the angle at `vertex` between the segments to
//! `start` and `end`.

/// Keypoint names measuring one joint angle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JointTriple {
    /// Name the angle is reported under
    pub joint: String,
    pub start: String,
    pub vertex: String,
    pub end: String,
}

impl JointTriple {
    pub fn new(joint: &str, start: &str, vertex: &str, end: &str) -> Self {
        Self {
            joint: joint.to_string(),
            start: start.to_string(),
            vertex: vertex.to_string(),
            end: end.to_string(),
        }
    }

    /// Keypoint names in [start, vertex, end] order
    pub fn points(&self) -> [&str; 3] {
        [&self.start, &self.vertex, &self.end]
    }
}

/// (joint, start, vertex, end)
const STANDARD_JOINTS: [(&str, &str, &str, &str); 8] = [
    ("left_elbow", "left_wrist", "left_elbow", "left_shoulder"),
    ("right_elbow", "right_wrist", "right_elbow", "right_shoulder"),
    ("left_shoulder", "left_elbow", "left_shoulder", "left_hip"),
    ("right_shoulder", "right_elbow", "right_shoulder", "right_hip"),
    ("left_hip", "left_shoulder", "left_hip", "left_knee"),
    ("right_hip", "right_shoulder", "right_hip", "right_knee"),
    ("left_knee", "left_hip", "left_knee", "left_ankle"),
    ("right_knee", "right_hip", "right_knee", "right_ankle"),
];

/// Look up the standard triple for a joint name
pub fn standard_triple(joint: &str) -> Option<JointTriple> {
    STANDARD_JOINTS
        .iter()
        .find(|(name, ..)| *name == joint)
        .map(|(name, start, vertex, end)| JointTriple::new(name, start, vertex, end))
}
