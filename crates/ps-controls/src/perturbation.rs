//! Time-windowed additive disturbances.
//!
//! Windows are held in whole nanoseconds so the closed end of a window lines
//! up exactly with the integer step times of a run.

use crate::error::{ControlError, ControlResult};
use ps_core::{Real, ns_to_secs, secs_to_ns};

/// A disturbance of fixed magnitude applied over `[onset, onset + duration]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    onset_ns: u64,
    end_ns: u64,
    magnitude: Real,
}

impl Perturbation {
    pub fn new(onset_s: Real, magnitude: Real, duration_s: Real) -> ControlResult<Self> {
        if !(onset_s.is_finite() && magnitude.is_finite() && duration_s.is_finite()) {
            return Err(ControlError::InvalidArg {
                what: "perturbation fields must be finite",
            });
        }
        if onset_s < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "perturbation onset must be non-negative",
            });
        }
        if duration_s < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "perturbation duration must be non-negative",
            });
        }
        let onset_ns = secs_to_ns(onset_s)?;
        let end_ns = onset_ns
            .checked_add(secs_to_ns(duration_s)?)
            .ok_or(ControlError::InvalidArg {
                what: "perturbation window does not fit in nanoseconds",
            })?;
        Ok(Self {
            onset_ns,
            end_ns,
            magnitude,
        })
    }

    pub fn onset_ns(&self) -> u64 {
        self.onset_ns
    }

    pub fn end_ns(&self) -> u64 {
        self.end_ns
    }

    pub fn onset_s(&self) -> Real {
        ns_to_secs(self.onset_ns)
    }

    pub fn magnitude(&self) -> Real {
        self.magnitude
    }

    pub fn duration_s(&self) -> Real {
        ns_to_secs(self.end_ns - self.onset_ns)
    }

    pub fn end_s(&self) -> Real {
        ns_to_secs(self.end_ns)
    }

    /// Both ends of the window are inclusive.
    pub fn is_active_at_ns(&self, t_ns: u64) -> bool {
        t_ns >= self.onset_ns && t_ns <= self.end_ns
    }

    /// `t` in seconds, rounded to the nearest nanosecond. Negative times are
    /// never active.
    pub fn is_active(&self, t: Real) -> bool {
        secs_to_ns(t).is_ok_and(|t_ns| self.is_active_at_ns(t_ns))
    }
}

/// The static set of perturbations for one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PerturbationSchedule {
    entries: Vec<Perturbation>,
    enabled: bool,
}

impl PerturbationSchedule {
    pub fn new(entries: Vec<Perturbation>) -> Self {
        Self {
            entries,
            enabled: true,
        }
    }

    /// A schedule that never contributes, whatever it holds.
    pub fn disabled(entries: Vec<Perturbation>) -> Self {
        Self {
            entries,
            enabled: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sum of every active magnitude at `t_ns`. Overlapping windows add.
    pub fn total_at_ns(&self, t_ns: u64) -> Real {
        if !self.enabled {
            return 0.0;
        }
        self.entries
            .iter()
            .filter(|p| p.is_active_at_ns(t_ns))
            .map(Perturbation::magnitude)
            .sum()
    }

    /// [`Self::total_at_ns`] with `t` in seconds.
    pub fn total_at(&self, t: Real) -> Real {
        secs_to_ns(t).map_or(0.0, |t_ns| self.total_at_ns(t_ns))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Perturbation> {
        self.entries.iter()
    }
}
