//! Ziegler–Nichols gain derivation.
//!
//! Tuning starts from a P-only probe: raise `Kp` until the loop oscillates
//! steadily. That gain is the ultimate gain `Ku`, the oscillation period is
//! `Tu`, and the rules below turn the pair into PID or PD gains.

use crate::controller::PidGains;
use crate::error::{ControlError, ControlResult};
use ps_core::Real;
use serde::{Deserialize, Serialize};

/// Ultimate gain and oscillation period measured from a P-only probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UltimateGain {
    pub ku: Real,
    pub tu: Real,
}

impl UltimateGain {
    pub fn new(ku: Real, tu: Real) -> ControlResult<Self> {
        if !(ku.is_finite() && ku > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "ultimate gain must be positive",
            });
        }
        if !(tu.is_finite() && tu > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "oscillation period must be positive",
            });
        }
        Ok(Self { ku, tu })
    }
}

/// Which gain set to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TuningRule {
    /// `Kp = 0.6 Ku`, `Ki = 1.2 Ku / Tu`, `Kd = 3 Ku Tu / 40`.
    #[default]
    Pid,
    /// `Kp = 0.8 Ku`, `Kd = Ku Tu / 10`.
    Pd,
    /// `Kp = Ku`; the configuration used to find `Ku` in the first place.
    UltimateProbe,
}

/// Derive gains from a measured ultimate gain.
pub fn ziegler_nichols(ultimate: UltimateGain, rule: TuningRule) -> PidGains {
    let UltimateGain { ku, tu } = ultimate;
    match rule {
        TuningRule::Pid => PidGains {
            kp: 0.6 * ku,
            ki: 1.2 * ku / tu,
            kd: 3.0 * ku * tu / 40.0,
        },
        TuningRule::Pd => PidGains {
            kp: 0.8 * ku,
            ki: 0.0,
            kd: ku * tu / 10.0,
        },
        TuningRule::UltimateProbe => PidGains {
            kp: ku,
            ki: 0.0,
            kd: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench() -> UltimateGain {
        UltimateGain::new(20.0, 0.57).unwrap()
    }

    #[test]
    fn pid_rule() {
        let g = ziegler_nichols(bench(), TuningRule::Pid);
        assert!((g.kp - 12.0).abs() < 1e-12);
        assert!((g.ki - 24.0 / 0.57).abs() < 1e-12);
        assert!((g.kd - 0.855).abs() < 1e-12);
    }

    #[test]
    fn pd_rule() {
        let g = ziegler_nichols(bench(), TuningRule::Pd);
        assert!((g.kp - 16.0).abs() < 1e-12);
        assert_eq!(g.ki, 0.0);
        assert!((g.kd - 1.14).abs() < 1e-12);
    }

    #[test]
    fn probe_is_proportional_only() {
        let g = ziegler_nichols(bench(), TuningRule::UltimateProbe);
        assert_eq!(g, PidGains { kp: 20.0, ki: 0.0, kd: 0.0 });
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(UltimateGain::new(0.0, 0.5).is_err());
        assert!(UltimateGain::new(10.0, -0.5).is_err());
    }
}
