//! Control laws and disturbance scheduling for pendsim.
//!
//! # Architecture
//!
//! A run uses exactly one [`ControlLaw`]:
//! - **PID** in one of two named forms ([`PidForm::Continuous`] for the pivoted
//!   pendulum, [`PidForm::Discrete`] for the cart-pole)
//! - **State feedback** `u = -K x`, with `K` either given explicitly or placed
//!   from two eigenvalues for the pendulum
//! - **None**, for free response
//!
//! Controller output may be saturated to a symmetric bound, after which the
//! [`PerturbationSchedule`] adds any scheduled disturbance.
//!
//! Controllers are evaluated once per integration step against the simulated
//! state; nothing here reads live sensors.

pub mod controller;
pub mod error;
pub mod perturbation;
pub mod pole_placement;
pub mod tuning;

pub use controller::{
    ControlLaw, PidController, PidForm, PidGains, PidState, StateFeedbackController, saturate,
};
pub use error::{ControlError, ControlResult};
pub use perturbation::{Perturbation, PerturbationSchedule};
pub use pole_placement::{place_pendulum_poles, place_poles};
pub use tuning::{TuningRule, UltimateGain, ziegler_nichols};
