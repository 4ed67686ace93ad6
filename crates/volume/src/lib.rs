//! Discharged-volume integration over a daily streamflow series.
//!
//! A mean daily flow of 1 m³/s discharges 0.0864 Mm³ over the day, so each
//! sample converts to a daily volume and the series integrates two ways:
//! a running rectangular sum (one cumulative value per day, for plotting)
//! and a composite Simpson total over the sample index (the headline
//! number).

mod error;

pub use error::VolumeError;

use caudal_series::TimeSeries;

/// Mm³ discharged per day at 1 m³/s.
const MM3_PER_DAY: f64 = 0.0864;

/// Cumulative and total discharged volume, in Mm³.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSummary {
    /// Running rectangular sum of daily volumes, one entry per sample.
    pub cumulative: Vec<f64>,
    /// Composite Simpson integral of the daily volumes.
    pub total: f64,
}

/// Integrates a daily series into discharged volume.
///
/// The integration runs over the sample index with unit spacing; gaps in
/// the calendar are not re-weighted. Non-finite samples propagate into the
/// result, so callers drop missing values first.
///
/// # Errors
///
/// Returns [`VolumeError::TooShort`] when the series has fewer than 3
/// samples, the minimum for Simpson's rule.
pub fn integrate(series: &TimeSeries) -> Result<VolumeSummary, VolumeError> {
    if series.len() < 3 {
        return Err(VolumeError::TooShort { len: series.len() });
    }

    let daily: Vec<f64> = series.values().iter().map(|v| v * MM3_PER_DAY).collect();

    let mut cumulative = Vec::with_capacity(daily.len());
    let mut running = 0.0;
    for v in &daily {
        running += v;
        cumulative.push(running);
    }

    Ok(VolumeSummary {
        cumulative,
        total: simpson(&daily),
    })
}

/// Composite Simpson's rule over an odd-length slice with unit spacing.
fn simpson_odd(y: &[f64]) -> f64 {
    let mut total = 0.0;
    let mut i = 1;
    while i + 1 < y.len() {
        total += (y[i - 1] + 4.0 * y[i] + y[i + 1]) / 3.0;
        i += 2;
    }
    total
}

/// Simpson integral with unit spacing; an even sample count averages the
/// two odd-length decompositions, closing each with a trapezoid, matching
/// scipy's `even='avg'` behaviour.
fn simpson(y: &[f64]) -> f64 {
    let n = y.len();
    if n % 2 == 1 {
        return simpson_odd(y);
    }
    let first = simpson_odd(&y[..n - 1]) + 0.5 * (y[n - 2] + y[n - 1]);
    let last = 0.5 * (y[0] + y[1]) + simpson_odd(&y[1..]);
    0.5 * (first + last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> TimeSeries {
        let pairs = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let stamp = NaiveDate::from_ymd_opt(2020, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap();
                (stamp, v)
            })
            .collect();
        TimeSeries::from_pairs(pairs).unwrap()
    }

    #[test]
    fn constant_flow_hand_computed() {
        // 10 m³/s over 5 days: daily volume 0.864 Mm³, Simpson over 4 unit
        // intervals of a constant integrand.
        let s = series(&[10.0; 5]);
        let v = integrate(&s).unwrap();
        assert_relative_eq!(v.total, 0.864 * 4.0, epsilon = 1e-12);
        assert_relative_eq!(v.cumulative[0], 0.864, epsilon = 1e-12);
        assert_relative_eq!(v.cumulative[4], 0.864 * 5.0, epsilon = 1e-12);
    }

    #[test]
    fn simpson_is_exact_for_quadratics() {
        // y = x² over x = 0..=4 integrates to 64/3.
        let y: Vec<f64> = (0..5).map(|x| (x * x) as f64).collect();
        assert_relative_eq!(simpson(&y), 64.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn even_sample_count_averages_both_decompositions() {
        // Constant integrand over 3 unit intervals: both decompositions
        // give exactly 3.
        assert_relative_eq!(simpson(&[1.0, 1.0, 1.0, 1.0]), 3.0, epsilon = 1e-12);
        // Linear integrand over 5 intervals: exact as well.
        let y: Vec<f64> = (0..6).map(|x| x as f64).collect();
        assert_relative_eq!(simpson(&y), 12.5, epsilon = 1e-12);
    }

    #[test]
    fn cumulative_is_monotone_for_non_negative_flow() {
        let s = series(&[3.0, 0.0, 7.5, 1.2, 0.0, 4.4, 9.9]);
        let v = integrate(&s).unwrap();
        assert!(v.cumulative.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(v.cumulative.len(), s.len());
    }

    #[test]
    fn too_short_is_an_error() {
        let s = series(&[1.0, 2.0]);
        assert_eq!(integrate(&s), Err(VolumeError::TooShort { len: 2 }));
    }
}
