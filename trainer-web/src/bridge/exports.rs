//! WASM exports - the `ExerciseValidator` class and catalog setup
//!
//! The host page owns one registry and one config per module instance,
//! kept here in thread-local storage (WASM is single-threaded). Sessions are
//! owned by the JS object that created them.

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::landmarks::{keypoints_from_flat, LANDMARK_COUNT, LANDMARK_STRIDE};
use crate::config::ValidatorConfig;
use crate::error::TrainerError;
use crate::exercise::ExerciseRegistry;
use crate::physics::{frame_from_sparse, KeypointSmoother, Keypoints, SparseKeypoints};
use crate::validator::{create_validator, ValidationResult, Validator};

impl From<TrainerError> for JsValue {
    fn from(err: TrainerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

thread_local! {
    static REGISTRY: RefCell<ExerciseRegistry> = RefCell::new(builtin_registry());
    static CONFIG: RefCell<ValidatorConfig> = RefCell::new(ValidatorConfig::default());
}

fn builtin_registry() -> ExerciseRegistry {
    ExerciseRegistry::builtin().unwrap_or_else(|e| {
        log::error!("Built-in exercise catalog rejected: {}", e);
        ExerciseRegistry::new()
    })
}

/// `{ name: {x, y, score} }`, with `null`/`undefined` slots treated as missing
fn frame_from_js(keypoints: JsValue) -> Result<Keypoints, JsValue> {
    let sparse: SparseKeypoints = serde_wasm_bindgen::from_value(keypoints)?;
    Ok(frame_from_sparse(sparse))
}

fn to_js(result: &ValidationResult) -> Result<JsValue, JsValue> {
    // Plain objects rather than ES Maps for `angles`
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    result.serialize(&serializer).map_err(JsValue::from)
}

// ============================================================================
// CATALOG & CONFIG
// ============================================================================

/// Add exercise definitions from a JSON array. Returns how many were accepted.
#[wasm_bindgen(js_name = registerExercises)]
pub fn register_exercises(json: &str) -> Result<usize, JsValue> {
    let loaded = REGISTRY.with(|registry| registry.borrow_mut().load_json(json))?;
    log::info!("Registered {} exercises", loaded);
    Ok(loaded)
}

/// Replace the config used by validators created from now on
#[wasm_bindgen(js_name = setValidatorConfig)]
pub fn set_validator_config(json: &str) -> Result<(), JsValue> {
    let config = ValidatorConfig::from_json(json)?;
    CONFIG.with(|current| *current.borrow_mut() = config);
    Ok(())
}

/// Sorted ids of every registered exercise
#[wasm_bindgen(js_name = exerciseIds)]
pub fn exercise_ids() -> Result<JsValue, JsValue> {
    let ids = REGISTRY.with(|registry| registry.borrow().ids());
    serde_wasm_bindgen::to_value(&ids).map_err(JsValue::from)
}

/// Route `log` output to the browser console.
///
/// @param {string} level - "trace", "debug", "info", "warn" or "error"
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("trainer-web {} logging at {}", env!("CARGO_PKG_VERSION"), level);
}

// ============================================================================
// EXERCISE VALIDATOR
// ============================================================================

/// Validator for one exercise screen
#[wasm_bindgen]
pub struct ExerciseValidator {
    inner: Validator,
    smoother: Option<KeypointSmoother>,
}

#[wasm_bindgen]
impl ExerciseValidator {
    /// Throws on unknown ids or when no backend can be built
    #[wasm_bindgen(constructor)]
    pub fn new(exercise_id: &str) -> Result<ExerciseValidator, JsValue> {
        let config = CONFIG.with(|config| config.borrow().clone());
        let inner = REGISTRY.with(|registry| create_validator(&registry.borrow(), exercise_id, &config))?;
        log::info!("Validator for '{}' using {} backend", exercise_id, inner.backend().name());
        Ok(Self {
            inner,
            smoother: None,
        })
    }

    /// Validate a `{ name: {x, y, score} }` frame
    #[wasm_bindgen(js_name = validatePose)]
    pub fn validate_pose(&mut self, keypoints: JsValue) -> Result<JsValue, JsValue> {
        let frame = frame_from_js(keypoints)?;
        to_js(&self.inner.validate_pose(&frame))
    }

    /// Like `validatePose`, smoothing first when smoothing is enabled
    #[wasm_bindgen(js_name = validatePoseAt)]
    pub fn validate_pose_at(&mut self, keypoints: JsValue, timestamp_ms: f64) -> Result<JsValue, JsValue> {
        let frame = frame_from_js(keypoints)?;
        let result = match self.smoother.as_mut() {
            Some(smoother) => {
                let smoothed = smoother.smooth(timestamp_ms / 1000.0, &frame);
                self.inner.validate_pose(&smoothed)
            }
            None => self.inner.validate_pose(&frame),
        };
        to_js(&result)
    }

    /// Validate a flat Float32Array of 33 × (x, y, score)
    #[wasm_bindgen(js_name = validateFlat)]
    pub fn validate_flat(&mut self, data: &[f32]) -> Result<JsValue, JsValue> {
        let Some(frame) = keypoints_from_flat(data) else {
            log::warn!(
                "Invalid landmark data length: {} (expected {})",
                data.len(),
                LANDMARK_COUNT * LANDMARK_STRIDE
            );
            return Err(JsValue::from_str("Invalid landmark data length"));
        };
        to_js(&self.inner.validate_pose(&frame))
    }

    /// Run frames given to `validatePoseAt` through a One Euro filter
    #[wasm_bindgen(js_name = enableSmoothing)]
    pub fn enable_smoothing(&mut self, min_cutoff: f32, beta: f32) {
        self.smoother = Some(KeypointSmoother::new(min_cutoff, beta));
    }

    #[wasm_bindgen(js_name = disableSmoothing)]
    pub fn disable_smoothing(&mut self) {
        self.smoother = None;
    }

    #[wasm_bindgen(getter, js_name = repCount)]
    pub fn rep_count(&self) -> u32 {
        self.inner.rep_count()
    }

    /// "native" or "fallback"
    #[wasm_bindgen(getter)]
    pub fn backend(&self) -> String {
        self.inner.backend().name().to_string()
    }

    #[wasm_bindgen(getter, js_name = exerciseId)]
    pub fn exercise_id(&self) -> String {
        self.inner.definition().id.clone()
    }
}
