//! Trainer Web - real-time pose exercise validator
//!
//! Turns per-frame body keypoints into joint angles, form errors and rep
//! events for the camera coach. Only contains:
//! - Module declarations and re-exports
//! - wasm_bindgen entry points that delegate to submodules
//!
//! ```
//! use trainer_web::{create_validator, ExerciseRegistry, Keypoints, ValidatorConfig};
//!
//! let registry = ExerciseRegistry::builtin()?;
//! let mut validator = create_validator(&registry, "squat", &ValidatorConfig::default())?;
//! let result = validator.validate_pose(&Keypoints::new());
//! assert!(result.angles.is_empty());
//! assert_eq!(result.rep_count, 0);
//! # Ok::<(), trainer_web::TrainerError>(())
//! ```

mod bridge;
mod config;
mod error;
mod exercise;
mod physics;
mod validator;

pub use bridge::{keypoints_from_flat, landmark_index, landmarks, LANDMARK_COUNT, LANDMARK_NAMES};
pub use config::{BackendPreference, ValidatorConfig, DEFAULT_MIN_KEYPOINT_SCORE};
pub use error::{TrainerError, TrainerResult};
pub use exercise::{
    standard_triple, Direction, ExerciseDefinition, ExerciseRegistry, FormCheckpoint, IdealAngle,
    JointTriple, RepTrigger,
};
pub use physics::{
    angle_at, check_form, compute_angles, frame_from, frame_from_sparse, AngleMap, ConfidenceGate,
    FormError, Keypoint, KeypointSmoother, Keypoints, LatchState, OneEuroFilter, OneEuroFilter2D,
    RepDetector, SparseKeypoints, MIN_SEGMENT_LENGTH,
};
pub use validator::{
    create_session, create_validator, Backend, ValidationResult, Validator, ValidatorSession,
};
#[cfg(feature = "native")]
pub use validator::{NativeInitError, NativeValidator};

#[cfg(feature = "wasm")]
pub use bridge::{exercise_ids, init_logging, register_exercises, set_validator_config, ExerciseValidator};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when the WASM module loads
#[cfg(feature = "wasm")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
