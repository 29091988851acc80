//! Angle unwrapping for continuous plots.

use std::f64::consts::{PI, TAU};

/// Remove the `2π` jumps that wrapping introduces between consecutive samples.
///
/// A step larger than `π` between neighbours is taken as a wrap and undone by
/// shifting the rest of the series by a whole turn.
pub fn unwrap_angles(series: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(series.len());
    let mut offset = 0.0;
    let mut previous: Option<f64> = None;

    for &(t, theta) in series {
        if let Some(prev) = previous {
            let jump = theta - prev;
            if jump > PI {
                offset -= TAU;
            } else if jump < -PI {
                offset += TAU;
            }
        }
        previous = Some(theta);
        out.push((t, theta + offset));
    }
    out
}
