//! Validator module - per-exercise sessions and backend dispatch
//!
//! Re-exports only. All logic in submodules.

mod result;
mod session;
#[cfg(feature = "native")]
mod native;
mod dispatch;

pub use result::ValidationResult;
pub use session::{create_session, ValidatorSession};
#[cfg(feature = "native")]
pub use native::{NativeInitError, NativeValidator};
pub use dispatch::{create_validator, Backend, Validator};
