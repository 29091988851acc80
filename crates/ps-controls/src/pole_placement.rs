//! Closed-form pole placement for the pivoted pendulum.
//!
//! With `D = w^2 + 4 L^2` the gains that put the closed-loop poles at
//! `lambda1`, `lambda2` are
//!
//! ```text
//! K1 = (lambda1 lambda2 D + 12 m g L) / 24
//! K2 = ((-lambda1 - lambda2) D - b) / 24
//! ```

use crate::controller::StateFeedbackController;
use crate::error::{ControlError, ControlResult};
use ps_core::{Matrix, Real};
use ps_dynamics::{DynamicsModel, PendulumParams, Plant};

/// Gain row `[K1, K2]` placing the pendulum poles at `lambda1`, `lambda2`.
pub fn place_pendulum_poles(
    params: &PendulumParams,
    lambda1: Real,
    lambda2: Real,
) -> ControlResult<Matrix> {
    if !(lambda1.is_finite() && lambda2.is_finite()) {
        return Err(ControlError::InvalidArg {
            what: "eigenvalues must be finite",
        });
    }
    let d = params.inertia_term();
    let k1 = (lambda1 * lambda2 * d
        + 12.0 * params.mass_kg * params.gravity_mps2 * params.length_m)
        / 24.0;
    let k2 = ((-lambda1 - lambda2) * d - params.friction) / 24.0;
    Ok(Matrix::row_vector(&[k1, k2]))
}

/// State feedback controller placed from two eigenvalues.
///
/// Only the pendulum has a closed form; any other plant is rejected.
pub fn place_poles(
    model: &DynamicsModel,
    lambda1: Real,
    lambda2: Real,
) -> ControlResult<StateFeedbackController> {
    let pendulum = model
        .as_pendulum()
        .ok_or(ControlError::PolePlacementUnsupported { plant: model.name() })?;
    StateFeedbackController::from_matrix(place_pendulum_poles(pendulum.params(), lambda1, lambda2)?)
}
