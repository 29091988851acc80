//! Headerless two-column CSV export.
//!
//! One `time,value` record per sample, time in seconds, newline terminated.

use crate::ResultsResult;
use crate::unwrap::unwrap_angles;
use ps_sim::SimRecord;
use std::path::Path;

pub fn format_series_csv(series: &[(f64, f64)]) -> String {
    let mut csv = String::new();
    for (t, value) in series {
        csv.push_str(&format!("{},{}\n", t, value));
    }
    csv
}

/// Write `time,theta` for every state sample. Returns the record count.
pub fn write_theta_csv(path: &Path, record: &SimRecord, unwrap: bool) -> ResultsResult<usize> {
    let mut series = record.theta_series()?;
    if unwrap {
        series = unwrap_angles(&series);
    }
    std::fs::write(path, format_series_csv(&series))?;
    Ok(series.len())
}

/// Write `time,control` for every control sample. Returns the record count.
pub fn write_control_csv(path: &Path, record: &SimRecord) -> ResultsResult<usize> {
    let series = record.control_series();
    std::fs::write(path, format_series_csv(&series))?;
    Ok(series.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_and_trailing_newline() {
        let csv = format_series_csv(&[(0.0, 1.5), (0.01, -2.5)]);
        assert_eq!(csv, "0,1.5\n0.01,-2.5\n");
    }

    #[test]
    fn empty_series_is_empty_file() {
        assert_eq!(format_series_csv(&[]), "");
    }
}
