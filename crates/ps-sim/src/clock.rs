//! Integer-nanosecond run clock.
//!
//! Step size, timespan and sampling interval are converted to whole
//! nanoseconds once, so sampling boundaries are exact integer multiples and
//! never drift with accumulated floating point error.

use crate::error::{SimError, SimResult};
use ps_core::Real;

pub use ps_core::numeric::{NANOS_PER_SECOND, ns_to_secs, secs_to_ns};

/// Step, horizon and sampling interval of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimClock {
    dt_ns: u64,
    timespan_ns: u64,
    sample_ns: u64,
}

impl SimClock {
    pub fn new(dt_s: Real, timespan_s: Real, sample_interval_s: Real) -> SimResult<Self> {
        let dt_ns = secs_to_ns(dt_s)?;
        let timespan_ns = secs_to_ns(timespan_s)?;
        let sample_ns = secs_to_ns(sample_interval_s)?;
        Self::from_ns(dt_ns, timespan_ns, sample_ns)
    }

    pub fn from_ns(dt_ns: u64, timespan_ns: u64, sample_ns: u64) -> SimResult<Self> {
        if dt_ns == 0 {
            return Err(SimError::InvalidArg {
                what: "step size must be at least one nanosecond",
            });
        }
        if timespan_ns == 0 {
            return Err(SimError::InvalidArg {
                what: "timespan must be positive",
            });
        }
        if sample_ns == 0 {
            return Err(SimError::InvalidArg {
                what: "sampling interval must be positive",
            });
        }
        if sample_ns % dt_ns != 0 {
            return Err(SimError::InvalidArg {
                what: "sampling interval must be a whole number of steps",
            });
        }
        Ok(Self {
            dt_ns,
            timespan_ns,
            sample_ns,
        })
    }

    pub fn dt_ns(&self) -> u64 {
        self.dt_ns
    }

    pub fn dt_s(&self) -> Real {
        ns_to_secs(self.dt_ns)
    }

    pub fn timespan_ns(&self) -> u64 {
        self.timespan_ns
    }

    pub fn sample_ns(&self) -> u64 {
        self.sample_ns
    }

    pub fn is_sample(&self, t_ns: u64) -> bool {
        t_ns % self.sample_ns == 0
    }

    /// Steps taken before `t >= timespan`.
    pub fn step_count(&self) -> usize {
        self.timespan_ns.div_ceil(self.dt_ns) as usize
    }

    /// State samples in a full history, the seed at `t = 0` included.
    pub fn state_sample_count(&self) -> usize {
        let last_step_ns = self.step_count() as u64 * self.dt_ns;
        let last_ns = last_step_ns.min(self.timespan_ns);
        (last_ns / self.sample_ns) as usize + 1
    }
}
