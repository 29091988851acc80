//! Tagged plant variant selected once per run.

use crate::cart_pole::CartPoleModel;
use crate::error::DynamicsResult;
use crate::pendulum::PendulumModel;
use crate::traits::{Plant, StateLayout};
use ps_core::{Matrix, Real};

/// The plant a run integrates.
#[derive(Clone, Debug)]
pub enum DynamicsModel {
    Pendulum(PendulumModel),
    CartPole(CartPoleModel),
}

impl DynamicsModel {
    pub fn as_pendulum(&self) -> Option<&PendulumModel> {
        match self {
            DynamicsModel::Pendulum(p) => Some(p),
            DynamicsModel::CartPole(_) => None,
        }
    }

    fn plant(&self) -> &dyn Plant {
        match self {
            DynamicsModel::Pendulum(p) => p,
            DynamicsModel::CartPole(c) => c,
        }
    }
}

impl From<PendulumModel> for DynamicsModel {
    fn from(model: PendulumModel) -> Self {
        DynamicsModel::Pendulum(model)
    }
}

impl From<CartPoleModel> for DynamicsModel {
    fn from(model: CartPoleModel) -> Self {
        DynamicsModel::CartPole(model)
    }
}

impl Plant for DynamicsModel {
    fn name(&self) -> &'static str {
        self.plant().name()
    }

    fn state_dim(&self) -> usize {
        self.plant().state_dim()
    }

    fn layout(&self) -> StateLayout {
        self.plant().layout()
    }

    fn state_labels(&self) -> &'static [&'static str] {
        self.plant().state_labels()
    }

    fn wraps_angle(&self) -> bool {
        self.plant().wraps_angle()
    }

    fn derivative(&self, state: &Matrix, input: Real) -> DynamicsResult<Matrix> {
        self.plant().derivative(state, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CartPoleParams, PendulumParams};

    #[test]
    fn dispatches_to_variant() {
        let pendulum: DynamicsModel = PendulumModel::nonlinear(
            PendulumParams::from_si(1.0, 0.8, 0.05, 9.81, 0.01).unwrap(),
        )
        .unwrap()
        .into();
        let cart: DynamicsModel =
            CartPoleModel::new(CartPoleParams::from_si(5.0, 0.5, 0.4, 9.81).unwrap()).into();

        assert_eq!(pendulum.state_dim(), 2);
        assert_eq!(cart.state_dim(), 4);
        assert!(pendulum.as_pendulum().is_some());
        assert!(cart.as_pendulum().is_none());
        assert_eq!(cart.layout().theta, 2);
        assert_eq!(pendulum.name(), "pendulum");
    }
}
