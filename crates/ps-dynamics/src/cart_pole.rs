//! Pendulum mounted on a horizontally sliding cart.
//!
//! State is `[x, x_dot, theta, theta_dot]`, `theta = 0` upright, `u` the
//! horizontal force on the cart.

use crate::common::{check_positive, check_state};
use crate::error::DynamicsResult;
use crate::traits::{Plant, StateLayout};
use ps_core::units::{Accel, Length, Mass, si};
use ps_core::{Matrix, Real};

const LABELS: &[&str] = &["x", "x_dot", "theta", "theta_dot"];

/// Physical constants of the cart-pole, in SI units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartPoleParams {
    pub cart_mass_kg: Real,
    pub pendulum_mass_kg: Real,
    pub length_m: Real,
    pub gravity_mps2: Real,
}

impl CartPoleParams {
    pub fn new(
        cart_mass: Mass,
        pendulum_mass: Mass,
        length: Length,
        gravity: Accel,
    ) -> DynamicsResult<Self> {
        Self::from_si(
            si::kilograms(cart_mass),
            si::kilograms(pendulum_mass),
            si::meters(length),
            si::mps2(gravity),
        )
    }

    pub fn from_si(
        cart_mass_kg: Real,
        pendulum_mass_kg: Real,
        length_m: Real,
        gravity_mps2: Real,
    ) -> DynamicsResult<Self> {
        Ok(Self {
            cart_mass_kg: check_positive(cart_mass_kg, "cart mass")?,
            pendulum_mass_kg: check_positive(pendulum_mass_kg, "pendulum mass")?,
            length_m: check_positive(length_m, "pendulum length")?,
            gravity_mps2: check_positive(gravity_mps2, "gravity")?,
        })
    }
}

/// Nonlinear cart-pole plant. There is no linearized form.
#[derive(Clone, Debug)]
pub struct CartPoleModel {
    params: CartPoleParams,
}

impl CartPoleModel {
    pub fn new(params: CartPoleParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CartPoleParams {
        &self.params
    }
}

impl Plant for CartPoleModel {
    fn name(&self) -> &'static str {
        "cart-pole"
    }

    fn state_dim(&self) -> usize {
        4
    }

    fn layout(&self) -> StateLayout {
        StateLayout {
            theta: 2,
            theta_dot: 3,
            position: Some(0),
            velocity: Some(1),
        }
    }

    fn state_labels(&self) -> &'static [&'static str] {
        LABELS
    }

    fn derivative(&self, state: &Matrix, input: Real) -> DynamicsResult<Matrix> {
        check_state(state, self.name(), 4)?;

        let CartPoleParams {
            cart_mass_kg: big_m,
            pendulum_mass_kg: m,
            length_m: l,
            gravity_mps2: g,
        } = self.params;

        let x_dot = state.get(0, 1);
        let theta = state.get(0, 2);
        let theta_dot = state.get(0, 3);

        let (sin, cos) = theta.sin_cos();
        let effective_mass = big_m + m * sin * sin;
        let spin = m * l * theta_dot * theta_dot * sin;

        let x_ddot = (2.0 * input + 2.0 * m * g * sin * cos - spin) / (2.0 * effective_mass);
        let theta_ddot = (2.0 * input * cos - spin * cos + 2.0 * big_m * g * sin
            + 2.0 * m * g * sin)
            / (l * effective_mass);

        Ok(Matrix::column_vector(&[x_dot, x_ddot, theta_dot, theta_ddot]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_core::units::{kg, m, mps2};

    fn reference_model() -> CartPoleModel {
        CartPoleModel::new(CartPoleParams::new(kg(5.0), kg(0.5), m(0.4), mps2(9.81)).unwrap())
    }

    #[test]
    fn rest_at_upright_is_equilibrium() {
        let dx = reference_model()
            .derivative(&Matrix::column_vector(&[1.5, 0.0, 0.0, 0.0]), 0.0)
            .unwrap();
        assert_eq!(dx.column(0), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn push_accelerates_cart_and_tips_pole() {
        let dx = reference_model()
            .derivative(&Matrix::column_vector(&[0.0, 0.0, 0.0, 0.0]), 10.0)
            .unwrap();
        // x_ddot = 2u / 2M, theta_ddot = 2u / (L M)
        assert!((dx.get(0, 1) - 2.0).abs() < 1e-12);
        assert!((dx.get(0, 3) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn derivative_matches_equations() {
        let model = reference_model();
        let (x_dot, theta, theta_dot, u) = (0.3, 0.4, -0.9, 2.0);
        let dx = model
            .derivative(&Matrix::column_vector(&[0.0, x_dot, theta, theta_dot]), u)
            .unwrap();

        let (big_m, m, l, g) = (5.0, 0.5, 0.4, 9.81);
        let (s, c) = (f64::sin(theta), f64::cos(theta));
        let den = big_m + m * s * s;
        let x_ddot = (2.0 * u + 2.0 * m * g * s * c - m * l * theta_dot * theta_dot * s) / (2.0 * den);
        let theta_ddot = (2.0 * u * c - m * l * theta_dot * theta_dot * s * c
            + 2.0 * big_m * g * s
            + 2.0 * m * g * s)
            / (l * den);

        assert_eq!(dx.get(0, 0), x_dot);
        assert!((dx.get(0, 1) - x_ddot).abs() < 1e-12);
        assert_eq!(dx.get(0, 2), theta_dot);
        assert!((dx.get(0, 3) - theta_ddot).abs() < 1e-12);
    }

    #[test]
    fn layout_points_at_angle_rows() {
        let model = reference_model();
        let layout = model.layout();
        assert_eq!(layout.theta, 2);
        assert_eq!(layout.theta_dot, 3);
        assert_eq!(model.state_labels()[layout.theta], "theta");
        assert!(model.wraps_angle());
    }

    #[test]
    fn two_state_vector_is_rejected() {
        let err = reference_model()
            .derivative(&Matrix::column_vector(&[0.0, 0.0]), 0.0)
            .unwrap_err();
        assert!(err.to_string().contains("cart-pole"));
    }
}
