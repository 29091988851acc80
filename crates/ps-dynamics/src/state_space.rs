//! Linear time-invariant state-space pair `x_dot = A x + B u`.

use crate::error::{DynamicsError, DynamicsResult};
use ps_core::{Matrix, Real};

/// Constant `(A, B)` pair for a single-input plant.
///
/// `A` is `n x n`, `B` is a single column of `n` rows.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSpace {
    a: Matrix,
    b: Matrix,
}

impl StateSpace {
    pub fn new(a: Matrix, b: Matrix) -> DynamicsResult<Self> {
        let n = a.rows();
        if a.columns() != n {
            return Err(DynamicsError::NotSupported {
                what: "state matrix A must be square",
            });
        }
        if b.shape() != (1, n) {
            return Err(DynamicsError::StateSize {
                model: "state-space input matrix B",
                expected: n,
                actual: b.rows(),
            });
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> &Matrix {
        &self.a
    }

    pub fn b(&self) -> &Matrix {
        &self.b
    }

    pub fn dim(&self) -> usize {
        self.a.rows()
    }

    /// `A x + B u`.
    pub fn derivative(&self, state: &Matrix, input: Real) -> DynamicsResult<Matrix> {
        let free = self.a.multiply(state)?;
        Ok(free.add(&self.b.scale(input))?)
    }

    /// Closed-loop matrix `A - B K` for the feedback law `u = -K x`.
    pub fn closed_loop(&self, gain: &Matrix) -> DynamicsResult<Matrix> {
        let bk = self.b.multiply(gain)?;
        Ok(self.a.subtract(&bk)?)
    }
}
