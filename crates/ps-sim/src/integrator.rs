//! Fixed-step time integrators.

use crate::error::SimResult;
use ps_core::{Matrix, Real};

/// Trait for time integrators.
pub trait Integrator {
    /// Advance `x` by one step of size `h`.
    ///
    /// `f` maps a state to its derivative; any control input is captured by
    /// the closure and therefore held constant across the step.
    fn step<F>(&self, f: F, x: &Matrix, h: Real) -> SimResult<Matrix>
    where
        F: FnMut(&Matrix) -> SimResult<Matrix>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn step<F>(&self, mut f: F, x: &Matrix, h: Real) -> SimResult<Matrix>
    where
        F: FnMut(&Matrix) -> SimResult<Matrix>,
    {
        let k1 = f(x)?;

        let x2 = x.add(&k1.scale(0.5 * h))?;
        let k2 = f(&x2)?;

        let x3 = x.add(&k2.scale(0.5 * h))?;
        let k3 = f(&x3)?;

        let x4 = x.add(&k3.scale(h))?;
        let k4 = f(&x4)?;

        // x_new = x + (h/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = k1
            .add(&k2.scale(2.0))?
            .add(&k3.scale(2.0))?
            .add(&k4)?;

        Ok(x.add(&k_sum.scale(h / 6.0))?)
    }
}
