//! Backend selection
//!
//! `create_validator` picks the compiled validator when it can be built and
//! the map-based session otherwise. The choice is made once; a `Validator`
//! never switches backend mid-exercise.

use std::sync::Arc;

#[cfg(feature = "native")]
use super::native::NativeValidator;
use super::result::ValidationResult;
use super::session::ValidatorSession;
use crate::config::{BackendPreference, ValidatorConfig};
use crate::error::{TrainerError, TrainerResult};
use crate::exercise::{ExerciseDefinition, ExerciseRegistry};
use crate::physics::{AngleMap, Keypoints};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Native,
    Fallback,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Native => "native",
            Backend::Fallback => "fallback",
        }
    }
}

/// A validator for one exercise screen, backed by either implementation
#[derive(Debug)]
pub enum Validator {
    #[cfg(feature = "native")]
    Native(NativeValidator),
    Fallback(ValidatorSession),
}

impl Validator {
    pub fn validate_pose(&mut self, keypoints: &Keypoints) -> ValidationResult {
        match self {
            #[cfg(feature = "native")]
            Validator::Native(v) => v.validate_pose(keypoints),
            Validator::Fallback(v) => v.validate_pose(keypoints),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            #[cfg(feature = "native")]
            Validator::Native(_) => Backend::Native,
            Validator::Fallback(_) => Backend::Fallback,
        }
    }

    pub fn rep_count(&self) -> u32 {
        match self {
            #[cfg(feature = "native")]
            Validator::Native(v) => v.rep_count(),
            Validator::Fallback(v) => v.rep_count(),
        }
    }

    pub fn last_angles(&self) -> &AngleMap {
        match self {
            #[cfg(feature = "native")]
            Validator::Native(v) => v.last_angles(),
            Validator::Fallback(v) => v.last_angles(),
        }
    }

    pub fn definition(&self) -> &ExerciseDefinition {
        match self {
            #[cfg(feature = "native")]
            Validator::Native(v) => v.definition(),
            Validator::Fallback(v) => v.definition(),
        }
    }
}

/// Build a validator for `exercise_id`.
///
/// Unknown ids fail with `UnknownExercise`. Native init failures are logged
/// and absorbed; `ValidatorUnavailable` means no permitted backend could be
/// built.
pub fn create_validator(
    registry: &ExerciseRegistry,
    exercise_id: &str,
    config: &ValidatorConfig,
) -> TrainerResult<Validator> {
    let definition = registry.require(exercise_id)?;

    let native_failure = if config.backend == BackendPreference::Fallback {
        "disabled by configuration".to_string()
    } else {
        match try_native(&definition, config) {
            Ok(validator) => {
                log::debug!("Native validator ready for '{}'", exercise_id);
                return Ok(validator);
            }
            Err(reason) => reason,
        }
    };

    if config.backend == BackendPreference::Native {
        return Err(TrainerError::ValidatorUnavailable {
            exercise_id: exercise_id.to_string(),
            native: native_failure,
            fallback: "disabled by configuration".to_string(),
        });
    }
    if config.backend == BackendPreference::Auto {
        log::warn!(
            "Native validator unavailable for '{}' ({}), using fallback",
            exercise_id,
            native_failure
        );
    }

    ValidatorSession::new(definition, config)
        .map(Validator::Fallback)
        .map_err(|e| TrainerError::ValidatorUnavailable {
            exercise_id: exercise_id.to_string(),
            native: native_failure,
            fallback: e.to_string(),
        })
}

#[cfg(feature = "native")]
fn try_native(definition: &Arc<ExerciseDefinition>, config: &ValidatorConfig) -> Result<Validator, String> {
    NativeValidator::new(Arc::clone(definition), config)
        .map(Validator::Native)
        .map_err(|e| e.to_string())
}

#[cfg(not(feature = "native"))]
fn try_native(_definition: &Arc<ExerciseDefinition>, _config: &ValidatorConfig) -> Result<Validator, String> {
    Err("native backend not compiled in".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::{Direction, FormCheckpoint, IdealAngle, RepTrigger};

    fn registry() -> ExerciseRegistry {
        let mut registry = ExerciseRegistry::builtin().unwrap();
        registry
            .register(
                ExerciseDefinition::new(
                    "barbell-row",
                    vec![IdealAngle::new("bar_path", 0.0, 30.0, 10.0)],
                    RepTrigger::new("left_elbow", Direction::Below, 90.0),
                )
                .with_checkpoint(FormCheckpoint::new(
                    "bar_path",
                    "bar_left",
                    "left_wrist",
                    "left_elbow",
                )),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_unknown_exercise_before_dispatch() {
        let err = create_validator(&registry(), "burpee", &ValidatorConfig::default()).unwrap_err();
        assert!(matches!(err, TrainerError::UnknownExercise { .. }));
    }

    #[test]
    fn test_forced_fallback() {
        let config = ValidatorConfig::default().with_backend(BackendPreference::Fallback);
        let validator = create_validator(&registry(), "squat", &config).unwrap();
        assert_eq!(validator.backend(), Backend::Fallback);
        assert_eq!(validator.definition().id, "squat");
    }

    #[test]
    fn test_custom_keypoints_fall_back() {
        let validator = create_validator(&registry(), "barbell-row", &ValidatorConfig::default()).unwrap();
        assert_eq!(validator.backend(), Backend::Fallback);
        assert_eq!(validator.rep_count(), 0);
    }

    #[test]
    fn test_forced_native_unavailable() {
        let config = ValidatorConfig::default().with_backend(BackendPreference::Native);
        let err = create_validator(&registry(), "barbell-row", &config).unwrap_err();
        assert!(matches!(err, TrainerError::ValidatorUnavailable { .. }));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_auto_prefers_native() {
        let validator = create_validator(&registry(), "squat", &ValidatorConfig::default()).unwrap();
        assert_eq!(validator.backend(), Backend::Native);
        assert!(validator.last_angles().is_empty());
    }

    #[cfg(not(feature = "native"))]
    #[test]
    fn test_auto_without_native_feature() {
        let validator = create_validator(&registry(), "squat", &ValidatorConfig::default()).unwrap();
        assert_eq!(validator.backend(), Backend::Fallback);
    }
}
