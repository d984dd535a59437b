//! Validator session - the map-based reference implementation
//!
//! One session per active exercise screen. Every call takes `&mut self`;
//! the latch and counter are not meant to be shared.

use std::sync::Arc;

use super::result::ValidationResult;
use crate::config::ValidatorConfig;
use crate::error::TrainerResult;
use crate::exercise::{ExerciseDefinition, ExerciseRegistry, JointTriple};
use crate::physics::{check_form, compute_angles, AngleMap, ConfidenceGate, Keypoints, RepDetector};

#[derive(Debug)]
pub struct ValidatorSession {
    definition: Arc<ExerciseDefinition>,
    /// Resolved once; ideal-angle joints then the trigger joint
    joints: Vec<JointTriple>,
    gate: ConfidenceGate,
    detector: RepDetector,
    last_angles: AngleMap,
}

impl ValidatorSession {
    pub fn new(definition: Arc<ExerciseDefinition>, config: &ValidatorConfig) -> TrainerResult<Self> {
        let joints = definition.measured_joints()?;
        Ok(Self {
            detector: RepDetector::new(definition.rep_trigger.clone()),
            gate: ConfidenceGate::new(config.min_keypoint_score),
            joints,
            definition,
            last_angles: AngleMap::new(),
        })
    }

    /// Angles, form errors and rep edge for one frame
    pub fn validate_pose(&mut self, keypoints: &Keypoints) -> ValidationResult {
        let angles = compute_angles(keypoints, &self.joints, &self.gate);
        let errors = check_form(&angles, &self.definition.ideal_angles);
        let trigger_angle = angles.get(&self.definition.rep_trigger.joint).copied();
        let rep_detected = self.detector.update(trigger_angle);

        self.last_angles.clone_from(&angles);

        ValidationResult {
            angles,
            errors,
            rep_detected,
            rep_count: self.detector.rep_count(),
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.detector.rep_count()
    }

    /// Angles from the most recent frame
    pub fn last_angles(&self) -> &AngleMap {
        &self.last_angles
    }

    pub fn definition(&self) -> &ExerciseDefinition {
        &self.definition
    }
}

/// Start a session for a registered exercise
pub fn create_session(
    registry: &ExerciseRegistry,
    exercise_id: &str,
    config: &ValidatorConfig,
) -> TrainerResult<ValidatorSession> {
    let definition = registry.require(exercise_id)?;
    ValidatorSession::new(definition, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrainerError;
    use crate::exercise::{Direction, IdealAngle, RepTrigger};
    use crate::physics::{frame_from, Keypoint};

    fn registry() -> ExerciseRegistry {
        let mut registry = ExerciseRegistry::new();
        registry
            .register(ExerciseDefinition::new(
                "curl",
                vec![IdealAngle::new("left_elbow", 20.0, 170.0, 45.0)],
                RepTrigger::new("left_elbow", Direction::Below, 50.0),
            ))
            .unwrap();
        registry
            .register(ExerciseDefinition::new(
                "squat",
                vec![
                    IdealAngle::new("left_knee", 80.0, 160.0, 120.0),
                    IdealAngle::new("right_knee", 80.0, 160.0, 120.0),
                ],
                RepTrigger::new("left_knee", Direction::Below, 100.0),
            ))
            .unwrap();
        registry
    }

    /// Frame whose `vertex` joint measures `degrees`
    fn frame_at(start: &str, vertex: &str, end: &str, degrees: f32) -> Keypoints {
        let rad = degrees.to_radians();
        frame_from(vec![
            Keypoint::new(start, 0.7, 0.5, 0.9),
            Keypoint::new(vertex, 0.5, 0.5, 0.9),
            Keypoint::new(end, 0.5 + 0.2 * rad.cos(), 0.5 + 0.2 * rad.sin(), 0.9),
        ])
    }

    fn elbow(degrees: f32) -> Keypoints {
        frame_at("left_wrist", "left_elbow", "left_shoulder", degrees)
    }

    fn knees(left: f32, right: f32) -> Keypoints {
        let mut frame = frame_at("left_hip", "left_knee", "left_ankle", left);
        frame.extend(frame_at("right_hip", "right_knee", "right_ankle", right));
        frame
    }

    #[test]
    fn test_unknown_exercise() {
        let err = create_session(&registry(), "burpee", &ValidatorConfig::default()).unwrap_err();
        assert!(matches!(err, TrainerError::UnknownExercise { .. }));
    }

    #[test]
    fn test_rep_sequence() {
        let mut session = create_session(&registry(), "curl", &ValidatorConfig::default()).unwrap();
        let events: Vec<bool> = [90.0, 90.0, 40.0, 40.0, 90.0]
            .into_iter()
            .map(|a| session.validate_pose(&elbow(a)).rep_detected)
            .collect();
        assert_eq!(events, vec![false, false, true, false, false]);
        assert_eq!(session.rep_count(), 1);

        for a in [90.0, 90.0, 40.0, 40.0, 90.0] {
            session.validate_pose(&elbow(a));
        }
        assert_eq!(session.rep_count(), 2);
    }

    #[test]
    fn test_same_frame_twice_counts_once() {
        let mut session = create_session(&registry(), "curl", &ValidatorConfig::default()).unwrap();
        let frame = elbow(30.0);
        assert!(session.validate_pose(&frame).rep_detected);
        let again = session.validate_pose(&frame);
        assert!(!again.rep_detected);
        assert_eq!(again.rep_count, 1);
    }

    #[test]
    fn test_knee_band() {
        let mut session = create_session(&registry(), "squat", &ValidatorConfig::default()).unwrap();

        let bad = session.validate_pose(&knees(70.0, 120.0));
        assert_eq!(bad.errors.len(), 1);
        assert_eq!(bad.errors[0].joint, "left_knee");
        assert!((bad.errors[0].angle - 70.0).abs() < 1e-3);

        let good = session.validate_pose(&knees(120.0, 120.0));
        assert!(good.errors.is_empty());
    }

    #[test]
    fn test_missing_right_knee() {
        let mut session = create_session(&registry(), "squat", &ValidatorConfig::default()).unwrap();
        let mut frame = knees(70.0, 70.0);
        frame.remove("right_knee");

        let result = session.validate_pose(&frame);
        assert!(!result.angles.contains_key("right_knee"));
        assert!(result.errors.iter().all(|e| e.joint != "right_knee"));
        assert!(result.angles.contains_key("left_knee"));
    }

    #[test]
    fn test_low_confidence_is_absent() {
        let mut session = create_session(&registry(), "curl", &ValidatorConfig::default()).unwrap();
        let mut frame = elbow(30.0);
        frame.get_mut("left_elbow").unwrap().score = 0.1;

        let result = session.validate_pose(&frame);
        assert!(result.angles.is_empty());
        assert!(!result.rep_detected);

        let lenient = ValidatorConfig::default().with_min_keypoint_score(0.0);
        let mut session = create_session(&registry(), "curl", &lenient).unwrap();
        assert!(session.validate_pose(&frame).rep_detected);
    }

    #[test]
    fn test_angle_keys_limited_to_measured_joints() {
        let mut session = create_session(&registry(), "curl", &ValidatorConfig::default()).unwrap();
        let mut frame = elbow(90.0);
        frame.extend(knees(90.0, 90.0));

        let result = session.validate_pose(&frame);
        assert_eq!(result.angles.keys().collect::<Vec<_>>(), vec!["left_elbow"]);
        assert_eq!(session.last_angles(), &result.angles);
    }
}
