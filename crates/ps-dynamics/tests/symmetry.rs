//! Structural properties both plants must satisfy.

use proptest::prelude::*;
use ps_core::Matrix;
use ps_dynamics::{CartPoleModel, CartPoleParams, PendulumModel, PendulumParams, Plant};
use std::f64::consts::TAU;

fn pendulum() -> PendulumModel {
    PendulumModel::nonlinear(PendulumParams::from_si(1.0, 0.8, 0.05, 9.81, 0.01).unwrap()).unwrap()
}

fn cart_pole() -> CartPoleModel {
    CartPoleModel::new(CartPoleParams::from_si(5.0, 0.5, 0.4, 9.81).unwrap())
}

proptest! {
    #[test]
    fn pendulum_is_mirror_symmetric(theta in -3.0f64..3.0, rate in -10.0f64..10.0, u in -5.0f64..5.0) {
        let model = pendulum();
        let a = model.derivative(&Matrix::column_vector(&[theta, rate]), u).unwrap();
        let b = model.derivative(&Matrix::column_vector(&[-theta, -rate]), -u).unwrap();
        prop_assert!((a.get(0, 1) + b.get(0, 1)).abs() < 1e-9);
    }

    #[test]
    fn pendulum_is_periodic_in_theta(theta in -3.0f64..3.0, rate in -10.0f64..10.0) {
        let model = pendulum();
        let a = model.derivative(&Matrix::column_vector(&[theta, rate]), 0.0).unwrap();
        let b = model.derivative(&Matrix::column_vector(&[theta + TAU, rate]), 0.0).unwrap();
        prop_assert!((a.get(0, 1) - b.get(0, 1)).abs() < 1e-9);
    }

    #[test]
    fn cart_pole_ignores_cart_position(x in -100.0f64..100.0, theta in -3.0f64..3.0, rate in -5.0f64..5.0) {
        let model = cart_pole();
        let a = model.derivative(&Matrix::column_vector(&[0.0, 0.2, theta, rate]), 1.0).unwrap();
        let b = model.derivative(&Matrix::column_vector(&[x, 0.2, theta, rate]), 1.0).unwrap();
        prop_assert_eq!(a, b);
    }
}
