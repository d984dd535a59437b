//! Compiled validator
//!
//! Resolves every measured joint to BlazePose landmark indices once, then
//! evaluates frames over a fixed 33-slot array with `nalgebra` vectors.
//! Must agree with `ValidatorSession` on every output.

use std::sync::Arc;

use nalgebra::Vector2;
use thiserror::Error;

use super::result::ValidationResult;
use crate::bridge::{landmark_index, LANDMARK_COUNT, LANDMARK_NAMES};
use crate::config::ValidatorConfig;
use crate::error::TrainerError;
use crate::exercise::ExerciseDefinition;
use crate::physics::{wrap_degrees, AngleMap, ConfidenceGate, FormError, Keypoints, RepDetector, MIN_SEGMENT_LENGTH};

#[derive(Debug, Error)]
pub enum NativeInitError {
    #[error("joint '{joint}' uses keypoint '{keypoint}' outside the landmark set")]
    UnsupportedKeypoint { joint: String, keypoint: String },

    #[error(transparent)]
    Definition(#[from] TrainerError),
}

#[derive(Debug)]
struct CompiledJoint {
    name: String,
    /// Landmark indices: [start, vertex, end]
    slots: [usize; 3],
}

#[derive(Debug)]
pub struct NativeValidator {
    definition: Arc<ExerciseDefinition>,
    joints: Vec<CompiledJoint>,
    /// Joint index for each ideal angle, in band order
    band_joints: Vec<usize>,
    trigger_joint: usize,
    /// Landmarks any joint reads, deduplicated
    inputs: Vec<usize>,
    gate: ConfidenceGate,
    detector: RepDetector,
    points: [Option<Vector2<f32>>; LANDMARK_COUNT],
    last_angles: AngleMap,
}

impl NativeValidator {
    pub fn new(
        definition: Arc<ExerciseDefinition>,
        config: &ValidatorConfig,
    ) -> Result<Self, NativeInitError> {
        let mut joints = Vec::new();
        for triple in definition.measured_joints()? {
            let mut slots = [0; 3];
            for (slot, keypoint) in slots.iter_mut().zip(triple.points()) {
                *slot = landmark_index(keypoint).ok_or_else(|| {
                    NativeInitError::UnsupportedKeypoint {
                        joint: triple.joint.clone(),
                        keypoint: keypoint.to_string(),
                    }
                })?;
            }
            joints.push(CompiledJoint {
                name: triple.joint.clone(),
                slots,
            });
        }

        let position = |name: &str| joints.iter().position(|j| j.name == name);
        // measured_joints() covers every band and the trigger, so these resolve
        let band_joints = definition
            .ideal_angles
            .iter()
            .filter_map(|band| position(&band.joint))
            .collect();
        let trigger_joint = position(&definition.rep_trigger.joint).ok_or_else(|| {
            TrainerError::invalid(&definition.id, "trigger joint was not compiled")
        })?;

        let mut inputs: Vec<usize> = joints.iter().flat_map(|j| j.slots).collect();
        inputs.sort_unstable();
        inputs.dedup();

        Ok(Self {
            detector: RepDetector::new(definition.rep_trigger.clone()),
            gate: ConfidenceGate::new(config.min_keypoint_score),
            definition,
            joints,
            band_joints,
            trigger_joint,
            inputs,
            points: [None; LANDMARK_COUNT],
            last_angles: AngleMap::new(),
        })
    }

    pub fn validate_pose(&mut self, keypoints: &Keypoints) -> ValidationResult {
        self.load(keypoints);

        let measured: Vec<Option<f32>> = self
            .joints
            .iter()
            .map(|joint| {
                let [a, b, c] = joint.slots;
                joint_angle(self.points[a]?, self.points[b]?, self.points[c]?)
            })
            .collect();

        let errors = self
            .definition
            .ideal_angles
            .iter()
            .zip(&self.band_joints)
            .filter_map(|(band, &joint)| {
                let angle = measured[joint]?;
                band.is_violated_by(angle)
                    .then(|| FormError::out_of_band(band, angle))
            })
            .collect();

        let rep_detected = self.detector.update(measured[self.trigger_joint]);

        let angles: AngleMap = self
            .joints
            .iter()
            .zip(&measured)
            .filter_map(|(joint, angle)| angle.map(|a| (joint.name.clone(), a)))
            .collect();
        self.last_angles.clone_from(&angles);

        ValidationResult {
            angles,
            errors,
            rep_detected,
            rep_count: self.detector.rep_count(),
        }
    }

    fn load(&mut self, keypoints: &Keypoints) {
        self.points = [None; LANDMARK_COUNT];
        for &slot in &self.inputs {
            self.points[slot] = keypoints
                .get(LANDMARK_NAMES[slot])
                .filter(|kp| self.gate.accepts(kp))
                .map(|kp| Vector2::new(kp.x, kp.y));
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.detector.rep_count()
    }

    pub fn last_angles(&self) -> &AngleMap {
        &self.last_angles
    }

    pub fn definition(&self) -> &ExerciseDefinition {
        &self.definition
    }
}

fn joint_angle(a: Vector2<f32>, vertex: Vector2<f32>, c: Vector2<f32>) -> Option<f32> {
    let v1 = a - vertex;
    let v2 = c - vertex;
    if !(v1.iter().chain(v2.iter()).all(|v| v.is_finite())) {
        return None;
    }
    let v1 = v1.cast::<f64>();
    let v2 = v2.cast::<f64>();
    let min_len = f64::from(MIN_SEGMENT_LENGTH);
    if v1.norm() < min_len || v2.norm() < min_len {
        return None;
    }
    Some(wrap_degrees(v1.perp(&v2).atan2(v1.dot(&v2)).to_degrees() as f32))
}
