//! Exercise definition store
//!
//! Re-exports only. All logic in submodules.

mod checkpoints;
mod definition;
mod registry;

pub use checkpoints::{standard_triple, JointTriple};
pub use definition::{Direction, ExerciseDefinition, FormCheckpoint, IdealAngle, RepTrigger};
pub use registry::ExerciseRegistry;
