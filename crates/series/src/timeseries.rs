//! The single-variable time series store.

use chrono::{Datelike, NaiveDateTime};

use crate::error::SeriesError;

/// An ordered sequence of `(timestamp, value)` pairs with unique timestamps.
///
/// Values are volumetric flow rates (m³/s); `NaN` marks a missing sample.
/// All operations return new series, the original is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    stamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Builds a series from unordered `(timestamp, value)` pairs.
    ///
    /// Pairs are sorted chronologically.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DuplicateStamp`] if two pairs share a timestamp.
    pub fn from_pairs(mut pairs: Vec<(NaiveDateTime, f64)>) -> Result<Self, SeriesError> {
        pairs.sort_by_key(|&(stamp, _)| stamp);
        for w in pairs.windows(2) {
            if w[0].0 == w[1].0 {
                return Err(SeriesError::DuplicateStamp { stamp: w[0].0 });
            }
        }
        let (stamps, values) = pairs.into_iter().unzip();
        Ok(Self { stamps, values })
    }

    /// Builds a series from parallel timestamp and value slices that are
    /// already chronologically sorted.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if the slices differ in
    /// length, [`SeriesError::Unsorted`] if the timestamps are not strictly
    /// ascending, or [`SeriesError::DuplicateStamp`] on a repeated stamp.
    pub fn from_parts(
        stamps: Vec<NaiveDateTime>,
        values: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        if stamps.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                stamps_len: stamps.len(),
                values_len: values.len(),
            });
        }
        for (i, w) in stamps.windows(2).enumerate() {
            if w[0] == w[1] {
                return Err(SeriesError::DuplicateStamp { stamp: w[0] });
            }
            if w[0] > w[1] {
                return Err(SeriesError::Unsorted { position: i + 1 });
            }
        }
        Ok(Self { stamps, values })
    }

    /// Internal constructor for derived series whose inputs already satisfy
    /// the sorted-unique invariant (subsets of an existing series).
    pub(crate) fn from_sorted(stamps: Vec<NaiveDateTime>, values: Vec<f64>) -> Self {
        debug_assert!(stamps.windows(2).all(|w| w[0] < w[1]));
        debug_assert_eq!(stamps.len(), values.len());
        Self { stamps, values }
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Returns `true` if the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Returns the timestamps in chronological order.
    pub fn stamps(&self) -> &[NaiveDateTime] {
        &self.stamps
    }

    /// Returns the values, aligned with [`stamps`](Self::stamps).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over `(timestamp, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.stamps.iter().copied().zip(self.values.iter().copied())
    }

    /// Returns the earliest timestamp, or `None` if the series is empty.
    pub fn first_stamp(&self) -> Option<NaiveDateTime> {
        self.stamps.first().copied()
    }

    /// Returns the latest timestamp, or `None` if the series is empty.
    pub fn last_stamp(&self) -> Option<NaiveDateTime> {
        self.stamps.last().copied()
    }

    /// Returns the smallest finite value, or `None` if no finite sample exists.
    pub fn min_value(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.min(v))))
    }

    /// Returns the largest finite value, or `None` if no finite sample exists.
    pub fn max_value(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }

    /// Returns the distinct calendar years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.stamps.iter().map(|s| s.year()).collect();
        years.dedup();
        years
    }

    /// Selects all samples whose calendar month equals `month` (1..=12),
    /// across every year present.
    pub fn month_subset(&self, month: u32) -> TimeSeries {
        self.filtered(|stamp, _| stamp.month() == month)
    }

    /// Selects the samples of one specific `(year, month)` partition.
    pub fn year_month_subset(&self, year: i32, month: u32) -> TimeSeries {
        self.filtered(|stamp, _| stamp.year() == year && stamp.month() == month)
    }

    /// Drops samples whose value is `NaN`.
    pub fn drop_nan(&self) -> TimeSeries {
        self.filtered(|_, value| !value.is_nan())
    }

    /// Replaces negative values with `0.0`.
    ///
    /// Negative flows are a known simulation artifact and must be floored
    /// before any histogram or volume work.
    pub fn floor_negative(&self) -> TimeSeries {
        let values = self.values.iter().map(|&v| if v < 0.0 { 0.0 } else { v }).collect();
        Self::from_sorted(self.stamps.clone(), values)
    }

    /// Keeps only samples at or after `start`.
    pub fn from_stamp(&self, start: NaiveDateTime) -> TimeSeries {
        self.filtered(|stamp, _| stamp >= start)
    }

    /// Restricts the series to calendar years within `[start, end]`.
    ///
    /// `None` leaves the corresponding bound open.
    pub fn restrict_years(&self, start: Option<i32>, end: Option<i32>) -> TimeSeries {
        self.filtered(|stamp, _| {
            let y = stamp.year();
            start.is_none_or(|s| y >= s) && end.is_none_or(|e| y <= e)
        })
    }

    fn filtered(&self, mut keep: impl FnMut(NaiveDateTime, f64) -> bool) -> TimeSeries {
        let mut stamps = Vec::new();
        let mut values = Vec::new();
        for (stamp, value) in self.iter() {
            if keep(stamp, value) {
                stamps.push(stamp);
                values.push(value);
            }
        }
        Self::from_sorted(stamps, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn series(pairs: Vec<(NaiveDateTime, f64)>) -> TimeSeries {
        TimeSeries::from_pairs(pairs).unwrap()
    }

    #[test]
    fn from_pairs_sorts() {
        let ts = series(vec![(dt(2020, 1, 2), 2.0), (dt(2020, 1, 1), 1.0)]);
        assert_eq!(ts.values(), &[1.0, 2.0]);
        assert_eq!(ts.first_stamp(), Some(dt(2020, 1, 1)));
    }

    #[test]
    fn from_pairs_rejects_duplicates() {
        let result = TimeSeries::from_pairs(vec![(dt(2020, 1, 1), 1.0), (dt(2020, 1, 1), 2.0)]);
        assert!(matches!(result, Err(SeriesError::DuplicateStamp { .. })));
    }

    #[test]
    fn from_parts_checks_order() {
        let result = TimeSeries::from_parts(vec![dt(2020, 1, 2), dt(2020, 1, 1)], vec![1.0, 2.0]);
        assert_eq!(result.unwrap_err(), SeriesError::Unsorted { position: 1 });
    }

    #[test]
    fn from_parts_checks_lengths() {
        let result = TimeSeries::from_parts(vec![dt(2020, 1, 1)], vec![1.0, 2.0]);
        assert_eq!(
            result.unwrap_err(),
            SeriesError::LengthMismatch {
                stamps_len: 1,
                values_len: 2,
            }
        );
    }

    #[test]
    fn month_subset_spans_years() {
        let ts = series(vec![
            (dt(2019, 1, 15), 1.0),
            (dt(2019, 2, 15), 2.0),
            (dt(2020, 1, 15), 3.0),
        ]);
        let jan = ts.month_subset(1);
        assert_eq!(jan.values(), &[1.0, 3.0]);
    }

    #[test]
    fn year_month_subset_is_one_partition() {
        let ts = series(vec![
            (dt(2019, 1, 15), 1.0),
            (dt(2020, 1, 15), 3.0),
            (dt(2020, 1, 16), 4.0),
        ]);
        let part = ts.year_month_subset(2020, 1);
        assert_eq!(part.values(), &[3.0, 4.0]);
    }

    #[test]
    fn drop_nan_removes_missing() {
        let ts = series(vec![
            (dt(2020, 1, 1), 1.0),
            (dt(2020, 1, 2), f64::NAN),
            (dt(2020, 1, 3), 3.0),
        ]);
        let clean = ts.drop_nan();
        assert_eq!(clean.len(), 2);
        assert_eq!(clean.values(), &[1.0, 3.0]);
    }

    #[test]
    fn floor_negative_clamps() {
        let ts = series(vec![(dt(2020, 1, 1), -4.0), (dt(2020, 1, 2), 3.0)]);
        assert_eq!(ts.floor_negative().values(), &[0.0, 3.0]);
    }

    #[test]
    fn min_max_skip_nan() {
        let ts = series(vec![
            (dt(2020, 1, 1), f64::NAN),
            (dt(2020, 1, 2), 3.0),
            (dt(2020, 1, 3), -1.0),
        ]);
        assert_eq!(ts.min_value(), Some(-1.0));
        assert_eq!(ts.max_value(), Some(3.0));
    }

    #[test]
    fn min_max_all_nan_is_none() {
        let ts = series(vec![(dt(2020, 1, 1), f64::NAN)]);
        assert_eq!(ts.min_value(), None);
        assert_eq!(ts.max_value(), None);
    }

    #[test]
    fn years_are_distinct_ascending() {
        let ts = series(vec![
            (dt(2019, 12, 31), 1.0),
            (dt(2020, 1, 1), 2.0),
            (dt(2020, 6, 1), 3.0),
        ]);
        assert_eq!(ts.years(), vec![2019, 2020]);
    }

    #[test]
    fn restrict_years_window() {
        let ts = series(vec![
            (dt(2018, 1, 1), 1.0),
            (dt(2019, 1, 1), 2.0),
            (dt(2020, 1, 1), 3.0),
        ]);
        let windowed = ts.restrict_years(Some(2019), Some(2019));
        assert_eq!(windowed.values(), &[2.0]);
        let open_start = ts.restrict_years(None, Some(2019));
        assert_eq!(open_start.values(), &[1.0, 2.0]);
    }

    #[test]
    fn from_stamp_filters_inclusive() {
        let ts = series(vec![(dt(2020, 1, 1), 1.0), (dt(2020, 1, 2), 2.0)]);
        let tail = ts.from_stamp(dt(2020, 1, 2));
        assert_eq!(tail.values(), &[2.0]);
    }
}
