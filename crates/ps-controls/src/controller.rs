//! Controller implementations.
//!
//! Provides the control laws a run can select:
//! - **PID**: two explicitly named discretizations (see [`PidForm`])
//! - **State feedback**: `u = -K x` with a static gain row
//!
//! PID configuration is immutable; its memory lives in a separate
//! [`PidState`] that is zeroed at the start of every run.

use crate::error::{ControlError, ControlResult};
use ps_core::{Matrix, Real};
use ps_dynamics::StateLayout;
use serde::{Deserialize, Serialize};

/// Proportional, integral and derivative gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: Real,
    pub ki: Real,
    pub kd: Real,
}

impl PidGains {
    pub fn new(kp: Real, ki: Real, kd: Real) -> ControlResult<Self> {
        if !(kp.is_finite() && ki.is_finite() && kd.is_finite()) {
            return Err(ControlError::InvalidArg {
                what: "PID gains must be finite",
            });
        }
        Ok(Self { kp, ki, kd })
    }

    /// PD gains (no integral action).
    pub fn pd(kp: Real, kd: Real) -> ControlResult<Self> {
        Self::new(kp, 0.0, kd)
    }
}

/// How the PID terms are discretized.
///
/// The two forms are not interchangeable: they integrate and differentiate
/// differently, so gains tuned for one do not carry over to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PidForm {
    /// Pendulum form. The integral accumulates `ki * theta * dt` and the
    /// derivative term uses the measured rate:
    /// `u = -(kp * theta + I + kd * theta_dot)`.
    #[default]
    Continuous,
    /// Cart-pole form. With `e = -theta`, the integral accumulates `ki * e`
    /// per step (not scaled by `dt`) and the derivative is the per-step error
    /// difference: `u = kp * e + I + kd * (e - e_prev)`.
    Discrete,
}

/// PID memory, reset at the start of every run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidState {
    /// Integral accumulator (already multiplied by `ki`).
    pub integral: Real,
    /// Error seen on the previous update.
    pub previous_error: Real,
}

/// PID controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidController {
    pub gains: PidGains,
    pub form: PidForm,
}

impl PidController {
    pub fn new(gains: PidGains, form: PidForm) -> Self {
        Self { gains, form }
    }

    /// Compute controller output from the pendulum angle and rate.
    ///
    /// # Returns
    ///
    /// Updated state and the unsaturated output.
    pub fn update(
        &self,
        state: &PidState,
        theta: Real,
        theta_dot: Real,
        dt: Real,
    ) -> (PidState, Real) {
        let PidGains { kp, ki, kd } = self.gains;
        match self.form {
            PidForm::Continuous => {
                let p = kp * theta;
                let i = ki * theta * dt + state.integral;
                let d = kd * theta_dot;
                let new_state = PidState {
                    integral: i,
                    previous_error: -theta,
                };
                (new_state, -(p + i + d))
            }
            PidForm::Discrete => {
                let error = -theta;
                let i = ki * error + state.integral;
                let d = kd * (error - state.previous_error);
                let new_state = PidState {
                    integral: i,
                    previous_error: error,
                };
                (new_state, kp * error + i + d)
            }
        }
    }
}

/// Linear state feedback `u = -K x`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateFeedbackController {
    gain: Matrix,
}

impl StateFeedbackController {
    /// Build from gain entries in state order.
    pub fn new(gains: &[Real]) -> ControlResult<Self> {
        if gains.is_empty() {
            return Err(ControlError::InvalidArg {
                what: "state feedback needs at least one gain",
            });
        }
        if gains.iter().any(|k| !k.is_finite()) {
            return Err(ControlError::InvalidArg {
                what: "state feedback gains must be finite",
            });
        }
        Ok(Self {
            gain: Matrix::row_vector(gains),
        })
    }

    /// Build from a `1 x n` gain row.
    pub fn from_matrix(gain: Matrix) -> ControlResult<Self> {
        if gain.rows() != 1 {
            return Err(ControlError::InvalidArg {
                what: "state feedback gain must be a single row",
            });
        }
        Self::new(gain.values())
    }

    pub fn gain(&self) -> &Matrix {
        &self.gain
    }

    /// `-K x`; the `1 x 1` product is read as a scalar.
    pub fn output(&self, state: &Matrix) -> ControlResult<Real> {
        Ok(-self.gain.multiply(state)?.as_scalar()?)
    }
}

/// The single control law used for a run.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ControlLaw {
    /// Free response, `u = 0`.
    #[default]
    None,
    Pid {
        controller: PidController,
        state: PidState,
    },
    StateFeedback(StateFeedbackController),
}

impl ControlLaw {
    pub fn pid(gains: PidGains, form: PidForm) -> Self {
        ControlLaw::Pid {
            controller: PidController::new(gains, form),
            state: PidState::default(),
        }
    }

    pub fn state_feedback(controller: StateFeedbackController) -> Self {
        ControlLaw::StateFeedback(controller)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ControlLaw::None => "none",
            ControlLaw::Pid {
                controller:
                    PidController {
                        form: PidForm::Continuous,
                        ..
                    },
                ..
            } => "pid (continuous)",
            ControlLaw::Pid { .. } => "pid (discrete)",
            ControlLaw::StateFeedback(_) => "state feedback",
        }
    }

    /// Clear controller memory. Called at the start of every run.
    pub fn reset(&mut self) {
        if let ControlLaw::Pid { state, .. } = self {
            *state = PidState::default();
        }
    }

    /// Check the law can act on a state of `state_dim` rows.
    pub fn check_state_dim(&self, state_dim: usize) -> ControlResult<()> {
        match self {
            ControlLaw::StateFeedback(sf) if sf.gain.columns() != state_dim => {
                Err(ControlError::GainSize {
                    gains: sf.gain.columns(),
                    states: state_dim,
                })
            }
            _ => Ok(()),
        }
    }

    /// Evaluate the law once, advancing any controller memory.
    ///
    /// Returns the raw (unsaturated) output.
    pub fn evaluate(
        &mut self,
        state: &Matrix,
        layout: &StateLayout,
        dt: Real,
    ) -> ControlResult<Real> {
        match self {
            ControlLaw::None => Ok(0.0),
            ControlLaw::Pid { controller, state: memory } => {
                let theta = state.try_get(0, layout.theta)?;
                let theta_dot = state.try_get(0, layout.theta_dot)?;
                let (next, u) = controller.update(memory, theta, theta_dot, dt);
                *memory = next;
                Ok(u)
            }
            ControlLaw::StateFeedback(sf) => sf.output(state),
        }
    }
}

/// Clamp `u` to `[-limit, limit]` when a limit is configured.
///
/// Returns the clamped value and whether clamping changed it.
pub fn saturate(u: Real, limit: Option<Real>) -> (Real, bool) {
    match limit {
        Some(max) if u.abs() > max => (max.copysign(u), true),
        _ => (u, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PENDULUM: StateLayout = StateLayout {
        theta: 0,
        theta_dot: 1,
        position: None,
        velocity: None,
    };

    const CART_POLE: StateLayout = StateLayout {
        theta: 2,
        theta_dot: 3,
        position: Some(0),
        velocity: Some(1),
    };

    #[test]
    fn gains_must_be_finite() {
        assert!(PidGains::new(1.0, f64::NAN, 0.0).is_err());
        let pd = PidGains::pd(20.0, 6.0).unwrap();
        assert_eq!(pd.ki, 0.0);
    }

    #[test]
    fn continuous_pid_terms() {
        let pid = PidController::new(PidGains::new(20.0, 10.0, 6.0).unwrap(), PidForm::Continuous);
        let (state, u) = pid.update(&PidState::default(), 0.1, -0.5, 1e-3);
        // P = 2.0, I = 10 * 0.1 * 1e-3 = 1e-3, D = -3.0
        assert!((state.integral - 1e-3).abs() < 1e-15);
        assert!((u - -(2.0 + 1e-3 - 3.0)).abs() < 1e-12);

        let (state, _) = pid.update(&state, 0.1, 0.0, 1e-3);
        assert!((state.integral - 2e-3).abs() < 1e-15);
    }

    #[test]
    fn discrete_pid_terms() {
        let pid = PidController::new(PidGains::new(2.0, 0.5, 3.0).unwrap(), PidForm::Discrete);
        let (state, u) = pid.update(&PidState::default(), 0.2, 0.0, 1e-3);
        // e = -0.2, I = -0.1, D = 3 * (-0.2 - 0) = -0.6
        assert!((state.integral + 0.1).abs() < 1e-12);
        assert!((state.previous_error + 0.2).abs() < 1e-12);
        assert!((u - (-0.4 - 0.1 - 0.6)).abs() < 1e-12);

        // Integral is not scaled by dt: a second step with a huge dt changes nothing
        let (state2, u2) = pid.update(&state, 0.2, 0.0, 10.0);
        assert!((state2.integral + 0.2).abs() < 1e-12);
        assert!((u2 - (-0.4 - 0.2 + 0.0)).abs() < 1e-12);
    }

    #[test]
    fn control_law_reads_angle_rows_from_layout() {
        let mut law = ControlLaw::pid(PidGains::pd(1.0, 0.0).unwrap(), PidForm::Continuous);
        let x = Matrix::column_vector(&[5.0, 0.0, 0.25, 0.0]);
        let u = law.evaluate(&x, &CART_POLE, 1e-3).unwrap();
        assert!((u + 0.25).abs() < 1e-12);
    }

    #[test]
    fn reset_clears_pid_memory() {
        let mut law = ControlLaw::pid(PidGains::new(0.0, 1.0, 0.0).unwrap(), PidForm::Discrete);
        let x = Matrix::column_vector(&[0.3, 0.0]);
        law.evaluate(&x, &PENDULUM, 1e-3).unwrap();
        law.evaluate(&x, &PENDULUM, 1e-3).unwrap();
        law.reset();
        match law {
            ControlLaw::Pid { state, .. } => assert_eq!(state, PidState::default()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn state_feedback_is_negative_gain_times_state() {
        let sf = StateFeedbackController::new(&[2.0, 0.5]).unwrap();
        let mut law = ControlLaw::state_feedback(sf);
        let x = Matrix::column_vector(&[0.1, -2.0]);
        let u = law.evaluate(&x, &PENDULUM, 1e-3).unwrap();
        assert!((u - -(0.2 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn state_feedback_gain_size_is_checked() {
        let law = ControlLaw::state_feedback(StateFeedbackController::new(&[1.0, 2.0]).unwrap());
        assert!(law.check_state_dim(2).is_ok());
        assert_eq!(
            law.check_state_dim(4),
            Err(ControlError::GainSize { gains: 2, states: 4 })
        );
        assert!(ControlLaw::None.check_state_dim(4).is_ok());
    }

    #[test]
    fn state_feedback_from_matrix_requires_row() {
        assert!(StateFeedbackController::from_matrix(Matrix::column_vector(&[1.0, 2.0])).is_err());
        assert!(StateFeedbackController::from_matrix(Matrix::row_vector(&[1.0, 2.0])).is_ok());
        assert!(StateFeedbackController::new(&[]).is_err());
    }

    #[test]
    fn saturate_clamps_symmetric() {
        assert_eq!(saturate(3.0, Some(2.5)), (2.5, true));
        assert_eq!(saturate(-3.0, Some(2.5)), (-2.5, true));
        assert_eq!(saturate(1.0, Some(2.5)), (1.0, false));
        assert_eq!(saturate(1e9, None), (1e9, false));
    }

    #[test]
    fn names() {
        assert_eq!(ControlLaw::None.name(), "none");
        let law = ControlLaw::pid(PidGains::pd(1.0, 1.0).unwrap(), PidForm::Discrete);
        assert_eq!(law.name(), "pid (discrete)");
    }

    proptest! {
        #[test]
        fn saturated_output_stays_within_bound(u in -1e6f64..1e6, limit in 1e-3f64..1e3) {
            let (out, clamped) = saturate(u, Some(limit));
            prop_assert!(out.abs() <= limit);
            prop_assert_eq!(clamped, u.abs() > limit);
            if !clamped {
                prop_assert_eq!(out, u);
            } else {
                prop_assert_eq!(out.signum(), u.signum());
            }
        }

        #[test]
        fn unbounded_output_passes_through(u in -1e6f64..1e6) {
            prop_assert_eq!(saturate(u, None), (u, false));
        }
    }
}
