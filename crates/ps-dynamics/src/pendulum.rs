//! Bar pendulum pivoted at a fixed axle.
//!
//! State is `[theta, theta_dot]` with `theta = 0` upright. The bar has mass
//! `m`, length term `L`, width `w` and viscous axle friction `b`:
//!
//! ```text
//! theta_ddot = 12 (m g L sin(theta) + 2 u - 2 b theta_dot) / (w^2 + 4 L^2)
//! ```

use crate::common::{check_non_negative, check_positive, check_state};
use crate::error::DynamicsResult;
use crate::state_space::StateSpace;
use crate::traits::{Plant, StateLayout};
use ps_core::units::{Accel, Length, Mass, si};
use ps_core::{Matrix, Real};

const LABELS: &[&str] = &["theta", "theta_dot"];

/// Physical constants of the pivoted bar, in SI units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendulumParams {
    pub mass_kg: Real,
    pub length_m: Real,
    pub width_m: Real,
    pub gravity_mps2: Real,
    /// Viscous friction coefficient at the axle.
    pub friction: Real,
}

impl PendulumParams {
    /// Build from typed quantities.
    pub fn new(
        mass: Mass,
        length: Length,
        width: Length,
        gravity: Accel,
        friction: Real,
    ) -> DynamicsResult<Self> {
        Self::from_si(
            si::kilograms(mass),
            si::meters(length),
            si::meters(width),
            si::mps2(gravity),
            friction,
        )
    }

    /// Build from raw SI values (as read from a config file).
    pub fn from_si(
        mass_kg: Real,
        length_m: Real,
        width_m: Real,
        gravity_mps2: Real,
        friction: Real,
    ) -> DynamicsResult<Self> {
        Ok(Self {
            mass_kg: check_positive(mass_kg, "pendulum mass")?,
            length_m: check_positive(length_m, "pendulum length")?,
            width_m: check_non_negative(width_m, "pendulum width")?,
            gravity_mps2: check_positive(gravity_mps2, "gravity")?,
            friction: check_non_negative(friction, "viscous friction")?,
        })
    }

    /// `w^2 + 4 L^2`, the denominator shared by every term of the model.
    pub fn inertia_term(&self) -> Real {
        self.width_m * self.width_m + 4.0 * self.length_m * self.length_m
    }

    /// Length of the simple pendulum with the same small-angle period.
    pub fn equivalent_length_m(&self) -> Real {
        self.inertia_term() / (12.0 * self.length_m)
    }

    /// Small-angle period of free swinging about the hanging equilibrium.
    pub fn small_angle_period_s(&self) -> Real {
        std::f64::consts::TAU * (self.equivalent_length_m() / self.gravity_mps2).sqrt()
    }

    /// Linearization about `theta = 0`, friction left out:
    ///
    /// ```text
    /// A = [[0, 1], [12 m g L / D, 0]],  B = [0, 24 / D]^T,  D = w^2 + 4 L^2
    /// ```
    pub fn linearize(&self) -> DynamicsResult<StateSpace> {
        let d = self.inertia_term();
        let a = Matrix::from_rows(vec![
            vec![0.0, 1.0],
            vec![12.0 * self.mass_kg * self.gravity_mps2 * self.length_m / d, 0.0],
        ])?;
        let b = Matrix::column_vector(&[0.0, 24.0 / d]);
        StateSpace::new(a, b)
    }

    fn angular_acceleration(&self, theta: Real, theta_dot: Real, input: Real) -> Real {
        12.0 * (self.mass_kg * self.gravity_mps2 * self.length_m * theta.sin() + 2.0 * input
            - 2.0 * theta_dot * self.friction)
            / self.inertia_term()
    }
}

/// Which equations a pendulum run integrates. Chosen once per run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelForm {
    #[default]
    Nonlinear,
    Linearized,
}

/// Pivoted pendulum plant.
#[derive(Clone, Debug)]
pub struct PendulumModel {
    params: PendulumParams,
    form: ModelForm,
    linear: StateSpace,
}

impl PendulumModel {
    pub fn new(params: PendulumParams, form: ModelForm) -> DynamicsResult<Self> {
        let linear = params.linearize()?;
        Ok(Self {
            params,
            form,
            linear,
        })
    }

    pub fn nonlinear(params: PendulumParams) -> DynamicsResult<Self> {
        Self::new(params, ModelForm::Nonlinear)
    }

    pub fn linearized(params: PendulumParams) -> DynamicsResult<Self> {
        Self::new(params, ModelForm::Linearized)
    }

    pub fn params(&self) -> &PendulumParams {
        &self.params
    }

    pub fn form(&self) -> ModelForm {
        self.form
    }

    /// The `(A, B)` pair, available whichever form is integrated.
    pub fn state_space(&self) -> &StateSpace {
        &self.linear
    }
}

impl Plant for PendulumModel {
    fn name(&self) -> &'static str {
        match self.form {
            ModelForm::Nonlinear => "pendulum",
            ModelForm::Linearized => "pendulum (linearized)",
        }
    }

    fn state_dim(&self) -> usize {
        2
    }

    fn layout(&self) -> StateLayout {
        StateLayout {
            theta: 0,
            theta_dot: 1,
            position: None,
            velocity: None,
        }
    }

    fn state_labels(&self) -> &'static [&'static str] {
        LABELS
    }

    fn wraps_angle(&self) -> bool {
        self.form == ModelForm::Nonlinear
    }

    fn derivative(&self, state: &Matrix, input: Real) -> DynamicsResult<Matrix> {
        check_state(state, self.name(), 2)?;
        match self.form {
            ModelForm::Linearized => self.linear.derivative(state, input),
            ModelForm::Nonlinear => {
                let theta = state.get(0, 0);
                let theta_dot = state.get(0, 1);
                Ok(Matrix::column_vector(&[
                    theta_dot,
                    self.params.angular_acceleration(theta, theta_dot, input),
                ]))
            }
        }
    }
}
