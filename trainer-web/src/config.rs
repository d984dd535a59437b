//! Validator configuration
//!
//! Host pages pass this as JSON (camelCase keys); every field has a default.

use serde::{Deserialize, Serialize};

use crate::error::TrainerResult;

/// Keypoints scoring below this are treated as absent.
///
/// Matches the cutoff the skeleton overlay uses to decide whether a joint
/// is drawn at all.
pub const DEFAULT_MIN_KEYPOINT_SCORE: f32 = 0.3;

/// Which validator implementation `create_validator` may hand out
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// Native first, fallback on any init failure
    #[default]
    Auto,
    /// Native only
    Native,
    /// Fallback only
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Minimum keypoint confidence (inclusive) for a joint to be measured
    pub min_keypoint_score: f32,
    pub backend: BackendPreference,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_keypoint_score: DEFAULT_MIN_KEYPOINT_SCORE,
            backend: BackendPreference::Auto,
        }
    }
}

impl ValidatorConfig {
    /// Parse a config object; missing keys keep their defaults
    pub fn from_json(json: &str) -> TrainerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style override of the confidence cutoff
    pub fn with_min_keypoint_score(mut self, score: f32) -> Self {
        self.min_keypoint_score = score;
        self
    }

    pub fn with_backend(mut self, backend: BackendPreference) -> Self {
        self.backend = backend;
        self
    }
}
