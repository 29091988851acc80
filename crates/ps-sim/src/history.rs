//! Down-sampled trajectory store.
//!
//! Keys are sample times in integer nanoseconds. Each state is an independent
//! copy; controls are the (saturated, pre-disturbance) controller output of
//! the step that starts at the sample time.

use crate::clock::{ns_to_secs, secs_to_ns};
use crate::error::{SimError, SimResult};
use ps_core::{Matrix, Real};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub struct History {
    sample_ns: u64,
    states: BTreeMap<u64, Matrix>,
    controls: BTreeMap<u64, Real>,
}

impl History {
    /// New history holding `initial` at `t = 0`.
    pub fn seeded(initial: Matrix, sample_ns: u64) -> Self {
        let mut states = BTreeMap::new();
        states.insert(0, initial);
        Self {
            sample_ns,
            states,
            controls: BTreeMap::new(),
        }
    }

    pub fn sample_ns(&self) -> u64 {
        self.sample_ns
    }

    pub fn sample_interval_s(&self) -> Real {
        ns_to_secs(self.sample_ns)
    }

    pub fn record_state(&mut self, t_ns: u64, state: Matrix) -> SimResult<()> {
        if self.states.contains_key(&t_ns) {
            return Err(SimError::SampleOverwrite { what: "state", t_ns });
        }
        self.states.insert(t_ns, state);
        Ok(())
    }

    pub fn record_control(&mut self, t_ns: u64, control: Real) -> SimResult<()> {
        if self.controls.contains_key(&t_ns) {
            return Err(SimError::SampleOverwrite {
                what: "control",
                t_ns,
            });
        }
        self.controls.insert(t_ns, control);
        Ok(())
    }

    /// State stored under exactly `t_ns`.
    pub fn state_at(&self, t_ns: u64) -> Option<&Matrix> {
        self.states.get(&t_ns)
    }

    /// State stored under `t_s` seconds, rounded to the nearest nanosecond.
    pub fn state_at_time(&self, t_s: Real) -> Option<&Matrix> {
        secs_to_ns(t_s).ok().and_then(|ns| self.state_at(ns))
    }

    pub fn control_at(&self, t_ns: u64) -> Option<Real> {
        self.controls.get(&t_ns).copied()
    }

    /// Latest sample at or before `t_s`, for playback scrubbing.
    pub fn sample_at_or_before(&self, t_s: Real) -> Option<(u64, &Matrix)> {
        let ns = secs_to_ns(t_s).ok()?;
        self.states.range(..=ns).next_back().map(|(t, s)| (*t, s))
    }

    pub fn states(&self) -> impl Iterator<Item = (u64, &Matrix)> {
        self.states.iter().map(|(t, s)| (*t, s))
    }

    pub fn controls(&self) -> impl Iterator<Item = (u64, Real)> + '_ {
        self.controls.iter().map(|(t, u)| (*t, *u))
    }

    pub fn times_s(&self) -> Vec<Real> {
        self.states.keys().map(|t| ns_to_secs(*t)).collect()
    }

    /// `(time_s, value)` pairs of one state row, in time order.
    pub fn component_series(&self, row: usize) -> SimResult<Vec<(Real, Real)>> {
        self.states
            .iter()
            .map(|(t, s)| -> SimResult<(Real, Real)> {
                Ok((ns_to_secs(*t), s.try_get(0, row)?))
            })
            .collect()
    }

    /// `(time_s, control)` pairs in time order.
    pub fn control_series(&self) -> Vec<(Real, Real)> {
        self.controls
            .iter()
            .map(|(t, u)| (ns_to_secs(*t), *u))
            .collect()
    }

    pub fn final_state(&self) -> Option<(u64, &Matrix)> {
        self.states.iter().next_back().map(|(t, s)| (*t, s))
    }

    /// Simulated span covered, in seconds.
    pub fn duration_s(&self) -> Real {
        self.final_state()
            .map(|(t, _)| ns_to_secs(t))
            .unwrap_or(0.0)
    }

    /// Number of state samples.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn control_len(&self) -> usize {
        self.controls.len()
    }

    /// False once seeded: the `t = 0` state is always present.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_history() -> History {
        let mut h = History::seeded(Matrix::column_vector(&[0.0, 0.0]), 10);
        h.record_state(10, Matrix::column_vector(&[0.1, 1.0])).unwrap();
        h.record_state(20, Matrix::column_vector(&[0.2, 2.0])).unwrap();
        h.record_control(0, 1.5).unwrap();
        h.record_control(10, -0.5).unwrap();
        h
    }

    #[test]
    fn seeded_with_initial_state() {
        let h = History::seeded(Matrix::column_vector(&[0.3, 0.0]), 10_000_000);
        assert_eq!(h.len(), 1);
        assert!(!h.is_empty());
        assert_eq!(h.state_at(0).unwrap().get(0, 0), 0.3);
        assert_eq!(h.control_len(), 0);
    }

    #[test]
    fn overwrite_is_rejected() {
        let mut h = sample_history();
        let err = h
            .record_state(10, Matrix::column_vector(&[9.0, 9.0]))
            .unwrap_err();
        assert_eq!(err, SimError::SampleOverwrite { what: "state", t_ns: 10 });
        assert!(h.record_control(0, 3.0).is_err());
        assert_eq!(h.state_at(10).unwrap().get(0, 0), 0.1);
    }

    #[test]
    fn at_or_before_lookup() {
        let h = sample_history();
        assert_eq!(h.sample_at_or_before(15e-9).unwrap().0, 10);
        assert_eq!(h.sample_at_or_before(1.0).unwrap().0, 20);
        assert_eq!(h.sample_at_or_before(0.0).unwrap().0, 0);
        assert!(h.sample_at_or_before(-1.0).is_none());
    }

    #[test]
    fn series_in_time_order() {
        let h = sample_history();
        let theta = h.component_series(0).unwrap();
        assert_eq!(theta, vec![(0.0, 0.0), (1e-8, 0.1), (2e-8, 0.2)]);
        assert!(h.component_series(5).is_err());
        assert_eq!(h.control_series(), vec![(0.0, 1.5), (1e-8, -0.5)]);
        assert_eq!(h.final_state().unwrap().0, 20);
    }
}
