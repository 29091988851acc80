//! Lightweight wall-clock timing for run summaries.
//!
//! Timers are plain values owned by the caller; nothing here is global, so
//! concurrent runs each keep their own measurements.

use std::time::Instant;

/// A simple timer that measures elapsed time.
#[derive(Debug)]
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Seconds elapsed so far, without stopping.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer and return elapsed time in seconds.
    pub fn stop(self) -> f64 {
        self.elapsed_s()
    }
}

/// Accumulates timings across repeated calls (e.g. every run of a sweep).
#[derive(Debug, Default, Clone, Copy)]
pub struct AccumulatingTimer {
    total_s: f64,
    count: u64,
}

impl AccumulatingTimer {
    pub const fn new() -> Self {
        Self {
            total_s: 0.0,
            count: 0,
        }
    }

    /// Record a timing measurement.
    pub fn record(&mut self, duration_s: f64) {
        self.total_s += duration_s;
        self.count += 1;
    }

    /// Get total time spent (in seconds).
    pub fn total_seconds(&self) -> f64 {
        self.total_s
    }

    /// Get number of calls.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Get average time per call (in seconds).
    pub fn average_seconds(&self) -> f64 {
        if self.count > 0 {
            self.total_s / self.count as f64
        } else {
            0.0
        }
    }
}
