//! Ordinary least squares over paired (simulated, observed) values.

use caudal_series::MergedSeries;

use crate::error::StatsError;
use crate::pearson_correlation;

/// Result of a least-squares fit of `observed = slope * simulated + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionSummary {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Pearson correlation of the paired values.
    pub correlation: f64,
}

/// Regression summary plus the shared value domain of both columns,
/// used to scale the diagnostic scatter plot and its 45° line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterSummary {
    /// The fitted line and correlation.
    pub regression: RegressionSummary,
    /// Smallest finite value across both columns.
    pub min_value: f64,
    /// Largest finite value across both columns.
    pub max_value: f64,
}

/// Fits `y = slope * x + intercept` by ordinary least squares.
///
/// Non-finite pairs are filtered out first.
///
/// # Errors
///
/// Returns [`StatsError::DegenerateInput`] if fewer than 2 finite pairs
/// remain or if `x` is constant (undefined slope).
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<RegressionSummary, StatsError> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect();

    if pairs.len() < 2 {
        return Err(StatsError::DegenerateInput {
            reason: format!("need at least 2 finite pairs, got {}", pairs.len()),
        });
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for &(xi, yi) in &pairs {
        sum_xy += (xi - mx) * (yi - my);
        sum_xx += (xi - mx) * (xi - mx);
    }

    if sum_xx == 0.0 {
        return Err(StatsError::DegenerateInput {
            reason: "constant predictor (zero variance)".to_string(),
        });
    }

    let slope = sum_xy / sum_xx;
    let intercept = my - slope * mx;

    let xs: Vec<f64> = pairs.iter().map(|(xi, _)| *xi).collect();
    let ys: Vec<f64> = pairs.iter().map(|(_, yi)| *yi).collect();
    // Constant y with varying x is a legitimate zero-slope fit; report r = 0.
    let correlation = pearson_correlation(&xs, &ys).unwrap_or(0.0);

    Ok(RegressionSummary {
        slope,
        intercept,
        correlation,
    })
}

/// Builds the scatter diagnostic for a merged series: OLS fit of observed
/// on simulated plus the shared min/max across both columns.
///
/// # Errors
///
/// Returns [`StatsError::DegenerateInput`] when the merged series cannot
/// support a fit (empty, all-NaN, or constant simulated column).
pub fn scatter_summary(merged: &MergedSeries) -> Result<ScatterSummary, StatsError> {
    let regression = linear_regression(merged.sim(), merged.obs())?;

    let mut min_value = f64::INFINITY;
    let mut max_value = f64::NEG_INFINITY;
    for &v in merged.sim().iter().chain(merged.obs().iter()) {
        if v.is_finite() {
            min_value = min_value.min(v);
            max_value = max_value.max(v);
        }
    }

    Ok(ScatterSummary {
        regression,
        min_value,
        max_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use caudal_series::TimeSeries;
    use chrono::NaiveDate;

    fn dt(d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn identity_line() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0];
        let fit = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.correlation, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn offset_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [3.0, 5.0, 7.0, 9.0]; // y = 2x + 1
        let fit = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_predictor_fails() {
        let x = [2.0, 2.0, 2.0];
        let y = [1.0, 2.0, 3.0];
        assert!(matches!(
            linear_regression(&x, &y),
            Err(StatsError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn too_few_pairs_fails() {
        assert!(linear_regression(&[1.0], &[1.0]).is_err());
    }

    #[test]
    fn nan_pairs_filtered() {
        let x = [1.0, f64::NAN, 3.0, 4.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        let fit = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_response_zero_correlation() {
        let x = [1.0, 2.0, 3.0];
        let y = [5.0, 5.0, 5.0];
        let fit = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.correlation, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn scatter_domain_spans_both_columns() {
        let sim = TimeSeries::from_pairs(vec![(dt(1), 1.0), (dt(2), 2.0), (dt(3), 3.0)]).unwrap();
        let obs = TimeSeries::from_pairs(vec![(dt(1), 0.5), (dt(2), 2.0), (dt(3), 8.0)]).unwrap();
        let merged = MergedSeries::inner_join(&sim, &obs);
        let summary = scatter_summary(&merged).unwrap();
        assert_relative_eq!(summary.min_value, 0.5, epsilon = 1e-12);
        assert_relative_eq!(summary.max_value, 8.0, epsilon = 1e-12);
    }
}
