//! Core trait for plant models.

use crate::error::DynamicsResult;
use ps_core::{Matrix, Real};

/// Where the named quantities live inside a state vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateLayout {
    /// Row of the pendulum angle.
    pub theta: usize,
    /// Row of the pendulum angular rate.
    pub theta_dot: usize,
    /// Row of the cart position, if the plant has one.
    pub position: Option<usize>,
    /// Row of the cart velocity, if the plant has one.
    pub velocity: Option<usize>,
}

/// A time-invariant plant `state_dot = f(state, u)`.
///
/// Implementations are pure: the same state and input always give the same
/// derivative, so a model can be shared by any number of independent runs.
pub trait Plant: Send + Sync {
    /// Model name for logs and error messages.
    fn name(&self) -> &'static str;

    /// Number of rows in the state column vector.
    fn state_dim(&self) -> usize;

    fn layout(&self) -> StateLayout;

    /// Human readable names of each state row, in order.
    fn state_labels(&self) -> &'static [&'static str];

    /// Whether the driver should re-wrap theta into (-pi, pi] before each step.
    ///
    /// Default `true`; a linear model has no 2*pi periodicity and opts out.
    fn wraps_angle(&self) -> bool {
        true
    }

    /// Compute the state derivative for a control input held at `input`.
    fn derivative(&self, state: &Matrix, input: Real) -> DynamicsResult<Matrix>;
}
