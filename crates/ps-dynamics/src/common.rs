//! Shared parameter and state checks.

use crate::error::{DynamicsError, DynamicsResult};
use ps_core::Matrix;

/// Parameter must be finite and strictly positive.
pub(crate) fn check_positive(v: f64, what: &'static str) -> DynamicsResult<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(DynamicsError::NonPhysical { what })
    }
}

/// Parameter must be finite and not negative.
pub(crate) fn check_non_negative(v: f64, what: &'static str) -> DynamicsResult<f64> {
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(DynamicsError::NonPhysical { what })
    }
}

/// State must be a single column with `expected` rows.
pub(crate) fn check_state(
    state: &Matrix,
    model: &'static str,
    expected: usize,
) -> DynamicsResult<()> {
    if state.columns() != 1 || state.rows() != expected {
        return Err(DynamicsError::StateSize {
            model,
            expected,
            actual: state.rows(),
        });
    }
    Ok(())
}
