//! Output of the monthly correction driver.

use caudal_series::TimeSeries;

/// Result of correcting a multi-year simulated series.
///
/// Carries the corrected series plus bookkeeping about which calendar
/// months were mapped and which were skipped (insufficient or degenerate
/// reference data), and any (year, month) partitions that failed on
/// out-of-domain values.
#[derive(Debug, Clone)]
pub struct CorrectionResult {
    series: TimeSeries,
    corrected_months: Vec<u32>,
    skipped_months: Vec<u32>,
    failed_partitions: Vec<(i32, u32)>,
}

impl CorrectionResult {
    pub(crate) fn new(
        series: TimeSeries,
        corrected_months: Vec<u32>,
        skipped_months: Vec<u32>,
        failed_partitions: Vec<(i32, u32)>,
    ) -> Self {
        Self {
            series,
            corrected_months,
            skipped_months,
            failed_partitions,
        }
    }

    /// The bias-corrected series, chronologically ordered.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Consumes the result, returning the corrected series.
    pub fn into_series(self) -> TimeSeries {
        self.series
    }

    /// Calendar months (1..=12) that were successfully corrected.
    pub fn corrected_months(&self) -> &[u32] {
        &self.corrected_months
    }

    /// Calendar months whose reference fit failed; their partitions are
    /// absent from the output.
    pub fn skipped_months(&self) -> &[u32] {
        &self.skipped_months
    }

    /// `(year, month)` partitions dropped because a value left the
    /// interpolation domain with extrapolation disabled.
    pub fn failed_partitions(&self) -> &[(i32, u32)] {
        &self.failed_partitions
    }
}
