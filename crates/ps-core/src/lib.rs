//! ps-core: stable foundation for pendsim.
//!
//! Contains:
//! - matrix (fixed-shape dense matrix used for states and state-space pairs)
//! - numeric (Real + tolerances + float helpers + angle wrapping)
//! - units (uom SI types + constructors)
//! - timing (wall-clock timers for run summaries)
//! - error (shared error types)

pub mod error;
pub mod matrix;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use matrix::Matrix;
pub use numeric::*;
pub use units::*;
