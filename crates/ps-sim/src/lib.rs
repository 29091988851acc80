//! Fixed-step simulation of pendulum plants under feedback control.
//!
//! Provides:
//! - Classical RK4 integration over [`ps_core::Matrix`] states
//! - An integer-nanosecond clock so sample boundaries are exact
//! - The run driver: angle wrapping, saturation, disturbances, recording
//! - A down-sampled [`History`] keyed by sample time

pub mod clock;
pub mod error;
pub mod history;
pub mod integrator;
pub mod sim;

pub use clock::{NANOS_PER_SECOND, SimClock, ns_to_secs, secs_to_ns};
pub use error::{SimError, SimResult};
pub use history::History;
pub use integrator::{Integrator, Rk4};
pub use sim::{SimOptions, SimProgress, SimRecord, Simulation};
