//! Inner join of a simulated and an observed series on shared timestamps.

use chrono::NaiveDateTime;

use crate::timeseries::TimeSeries;

/// Paired (simulated, observed) value vectors over the timestamp
/// intersection of two series.
///
/// Column order is fixed: simulated first, observed second, for every
/// downstream consumer. Rows with `NaN` in either column are kept — the
/// join is on timestamps only, and each consumer decides how to treat
/// missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSeries {
    stamps: Vec<NaiveDateTime>,
    sim: Vec<f64>,
    obs: Vec<f64>,
}

impl MergedSeries {
    /// Joins two series on their shared timestamps.
    pub fn inner_join(sim: &TimeSeries, obs: &TimeSeries) -> MergedSeries {
        let mut stamps = Vec::new();
        let mut sim_values = Vec::new();
        let mut obs_values = Vec::new();

        let (mut i, mut j) = (0, 0);
        let (s_stamps, o_stamps) = (sim.stamps(), obs.stamps());
        while i < s_stamps.len() && j < o_stamps.len() {
            match s_stamps[i].cmp(&o_stamps[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    stamps.push(s_stamps[i]);
                    sim_values.push(sim.values()[i]);
                    obs_values.push(obs.values()[j]);
                    i += 1;
                    j += 1;
                }
            }
        }

        MergedSeries {
            stamps,
            sim: sim_values,
            obs: obs_values,
        }
    }

    /// Returns the number of paired rows.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Returns `true` if the two series share no timestamps.
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Returns the shared timestamps in chronological order.
    pub fn stamps(&self) -> &[NaiveDateTime] {
        &self.stamps
    }

    /// Returns the simulated column.
    pub fn sim(&self) -> &[f64] {
        &self.sim
    }

    /// Returns the observed column.
    pub fn obs(&self) -> &[f64] {
        &self.obs
    }

    /// Returns the rows where both columns are finite, as parallel vectors.
    pub fn finite_pairs(&self) -> (Vec<f64>, Vec<f64>) {
        self.sim
            .iter()
            .zip(self.obs.iter())
            .filter(|(s, o)| s.is_finite() && o.is_finite())
            .map(|(&s, &o)| (s, o))
            .unzip()
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
    fn join_keeps_only_shared_stamps() {
        let sim = series(vec![
            (dt(2020, 1, 1), 10.0),
            (dt(2020, 1, 2), 12.0),
            (dt(2020, 1, 4), 14.0),
        ]);
        let obs = series(vec![
            (dt(2020, 1, 2), 11.0),
            (dt(2020, 1, 3), 13.0),
            (dt(2020, 1, 4), 15.0),
        ]);
        let merged = MergedSeries::inner_join(&sim, &obs);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.stamps(), &[dt(2020, 1, 2), dt(2020, 1, 4)]);
        assert_eq!(merged.sim(), &[12.0, 14.0]);
        assert_eq!(merged.obs(), &[11.0, 15.0]);
    }

    #[test]
    fn join_disjoint_is_empty() {
        let sim = series(vec![(dt(2020, 1, 1), 1.0)]);
        let obs = series(vec![(dt(2020, 1, 2), 2.0)]);
        assert!(MergedSeries::inner_join(&sim, &obs).is_empty());
    }

    #[test]
    fn join_keeps_nan_rows() {
        let sim = series(vec![(dt(2020, 1, 1), f64::NAN)]);
        let obs = series(vec![(dt(2020, 1, 1), 5.0)]);
        let merged = MergedSeries::inner_join(&sim, &obs);
        assert_eq!(merged.len(), 1);
        assert!(merged.sim()[0].is_nan());
    }

    #[test]
    fn finite_pairs_filters_nan() {
        let sim = series(vec![(dt(2020, 1, 1), f64::NAN), (dt(2020, 1, 2), 2.0)]);
        let obs = series(vec![(dt(2020, 1, 1), 5.0), (dt(2020, 1, 2), 3.0)]);
        let merged = MergedSeries::inner_join(&sim, &obs);
        let (s, o) = merged.finite_pairs();
        assert_eq!(s, vec![2.0]);
        assert_eq!(o, vec![3.0]);
    }
}
