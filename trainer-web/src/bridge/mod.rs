//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live in `exports`, compiled with the
//! `wasm` feature. Landmark decoding is plain Rust and always available.

pub mod landmarks;
#[cfg(feature = "wasm")]
mod exports;

pub use landmarks::{
    keypoints_from_flat,
    landmark_index,
    LANDMARK_COUNT,
    LANDMARK_NAMES,
};

#[cfg(feature = "wasm")]
pub use exports::{
    exercise_ids,
    init_logging,
    register_exercises,
    set_validator_config,
    ExerciseValidator,
};
