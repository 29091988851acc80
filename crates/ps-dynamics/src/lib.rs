//! Plant models for pendsim.
//!
//! Two physical variants share one abstraction:
//! - [`PendulumModel`]: bar pivoted at a fixed axle, state `[theta, theta_dot]`,
//!   nonlinear or linearized about the upright position
//! - [`CartPoleModel`]: pendulum on a sliding cart, state
//!   `[x, x_dot, theta, theta_dot]`
//!
//! Both implement [`Plant`]; [`DynamicsModel`] is the tagged variant a run
//! selects once at construction.

pub mod cart_pole;
pub mod common;
pub mod error;
pub mod model;
pub mod pendulum;
pub mod state_space;
pub mod traits;

pub use cart_pole::{CartPoleModel, CartPoleParams};
pub use error::{DynamicsError, DynamicsResult};
pub use model::DynamicsModel;
pub use pendulum::{ModelForm, PendulumModel, PendulumParams};
pub use state_space::StateSpace;
pub use traits::{Plant, StateLayout};
