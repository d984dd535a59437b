//! Physics module - joint angles, form bands and rep latching
//!
//! Re-exports only. All logic in submodules.

mod state;
mod angles;
mod confidence_gate;
mod form_check;
mod rep_detector;
mod one_euro;

pub use state::{frame_from, frame_from_sparse, AngleMap, Keypoint, Keypoints, SparseKeypoints};
pub use angles::{angle_at, compute_angles, MIN_SEGMENT_LENGTH};
pub(crate) use angles::wrap_degrees;
pub use confidence_gate::ConfidenceGate;
pub use form_check::{check_form, FormError};
pub use rep_detector::{LatchState, RepDetector};
pub use one_euro::{KeypointSmoother, OneEuroFilter, OneEuroFilter2D};
