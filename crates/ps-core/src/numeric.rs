use crate::CoreError;
use std::f64::consts::{PI, TAU};

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Round seconds to the nearest whole nanosecond.
pub fn secs_to_ns(seconds: Real) -> Result<u64, CoreError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(CoreError::InvalidArg {
            what: "time must be finite and non-negative",
        });
    }
    let ns = (seconds * NANOS_PER_SECOND as Real).round();
    if ns > u64::MAX as Real {
        return Err(CoreError::InvalidArg {
            what: "time does not fit in nanoseconds",
        });
    }
    Ok(ns as u64)
}

pub fn ns_to_secs(ns: u64) -> Real {
    ns as Real / NANOS_PER_SECOND as Real
}

/// Wrap an angle into (-pi, pi] by removing the nearest multiple of 2*pi.
///
/// Already wrapped angles come back bit-for-bit unchanged.
pub fn wrap_angle(angle: Real) -> Real {
    let wrapped = angle - TAU * (angle / TAU).round();
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Signed shortest angular distance from `b` to `a`, in (-pi, pi].
pub fn angle_difference(a: Real, b: Real) -> Real {
    wrap_angle(a - b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn wrap_angle_interval_edges() {
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn wrap_angle_many_rotations() {
        let theta = 0.3;
        let spun = theta + 7.0 * TAU;
        assert!((wrap_angle(spun) - theta).abs() < 1e-12);
    }

    #[test]
    fn angle_difference_crosses_branch_cut() {
        let d = angle_difference(-PI + 0.1, PI - 0.1);
        assert!((d - 0.2).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn wrap_angle_lands_in_half_open_interval(angle in -1.0e4f64..1.0e4) {
            let w = wrap_angle(angle);
            prop_assert!(w > -PI && w <= PI);
        }

        #[test]
        fn wrap_angle_is_idempotent(angle in -1.0e4f64..1.0e4) {
            let once = wrap_angle(angle);
            prop_assert_eq!(wrap_angle(once), once);
        }

        #[test]
        fn wrap_angle_ignores_full_turns(theta in -3.0f64..3.0, k in -50i32..50) {
            let shifted = theta + TAU * k as f64;
            prop_assert!((wrap_angle(shifted) - wrap_angle(theta)).abs() < 1e-9);
        }
    }
}
