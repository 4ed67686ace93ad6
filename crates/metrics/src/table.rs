//! Table builder: a set of metric codes evaluated over one merged series.

use std::collections::BTreeMap;

use caudal_series::MergedSeries;

use crate::error::MetricsError;
use crate::formulas;
use crate::params::MetricParams;

/// Metric codes accepted by [`build_table`], in display order.
pub const SUPPORTED_CODES: [&str; 21] = [
    "ME", "MAE", "MSE", "RMSE", "NRMSE", "MASE", "R2", "ACC", "NSE", "NSE_MOD", "KGE_2009",
    "KGE_2012", "D", "D_MOD", "D1_P", "LM_INDEX", "H6_MHE", "H6_AHE", "H6_RMSHE", "SA", "VE",
];

/// Evaluates every requested metric over the finite rows of `merged`.
///
/// # Errors
///
/// Returns [`MetricsError::UnsupportedMetric`] naming every unknown code
/// when any requested code is not in [`SUPPORTED_CODES`] — no partial
/// table is produced — and [`MetricsError::EmptyInput`] when no row has
/// both columns finite.
pub fn build_table(
    merged: &MergedSeries,
    codes: &[String],
    params: &MetricParams,
) -> Result<BTreeMap<String, f64>, MetricsError> {
    let unknown: Vec<String> = codes
        .iter()
        .filter(|c| !SUPPORTED_CODES.contains(&c.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(MetricsError::UnsupportedMetric { codes: unknown });
    }

    let (sim, obs) = merged.finite_pairs();
    if sim.is_empty() {
        return Err(MetricsError::EmptyInput);
    }

    let mut table = BTreeMap::new();
    for code in codes {
        // Codes were validated above, so the dispatch cannot miss.
        if let Some(value) = formulas::evaluate(code, &sim, &obs, params) {
            table.insert(code.clone(), value);
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use caudal_series::TimeSeries;
    use chrono::NaiveDate;

    fn codes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn merged(rows: Vec<(u32, f64, f64)>) -> MergedSeries {
        let stamp = |d: u32| {
            NaiveDate::from_ymd_opt(2020, 1, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        let sim =
            TimeSeries::from_pairs(rows.iter().map(|&(d, s, _)| (stamp(d), s)).collect()).unwrap();
        let obs =
            TimeSeries::from_pairs(rows.iter().map(|&(d, _, o)| (stamp(d), o)).collect()).unwrap();
        MergedSeries::inner_join(&sim, &obs)
    }

    #[test]
    fn builds_requested_metrics_only() {
        let m = merged(vec![
            (1, 12.0, 10.0),
            (2, 14.0, 15.0),
            (3, 10.0, 11.0),
            (4, 9.0, 8.0),
            (5, 16.0, 17.0),
        ]);
        let table = build_table(&m, &codes(&["RMSE", "NSE"]), &MetricParams::new()).unwrap();
        assert_eq!(table.len(), 2);
        assert_relative_eq!(table["RMSE"], 1.6f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(table["NSE"], 1.0 - 8.0 / 54.8, epsilon = 1e-12);
    }

    #[test]
    fn unknown_code_fails_whole_call() {
        let m = merged(vec![(1, 1.0, 1.0), (2, 2.0, 2.5)]);
        let err = build_table(
            &m,
            &codes(&["NSE", "RMSE", "unknownCode"]),
            &MetricParams::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            MetricsError::UnsupportedMetric {
                codes: vec!["unknownCode".into()]
            }
        );
    }

    #[test]
    fn all_unknown_codes_are_listed() {
        let m = merged(vec![(1, 1.0, 1.0), (2, 2.0, 2.5)]);
        let err = build_table(&m, &codes(&["foo", "NSE", "bar"]), &MetricParams::new()).unwrap_err();
        assert_eq!(
            err,
            MetricsError::UnsupportedMetric {
                codes: vec!["foo".into(), "bar".into()]
            }
        );
    }

    #[test]
    fn nan_rows_filtered_before_computation() {
        let m = merged(vec![
            (1, f64::NAN, 10.0),
            (2, 14.0, 15.0),
            (3, 10.0, f64::NAN),
            (4, 9.0, 8.0),
        ]);
        let table = build_table(&m, &codes(&["ME"]), &MetricParams::new()).unwrap();
        // Finite pairs: (14, 15) and (9, 8).
        assert_relative_eq!(table["ME"], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn no_finite_pairs_is_an_error() {
        let m = merged(vec![(1, f64::NAN, 10.0), (2, 14.0, f64::NAN)]);
        assert_eq!(
            build_table(&m, &codes(&["ME"]), &MetricParams::new()),
            Err(MetricsError::EmptyInput)
        );
    }

    #[test]
    fn every_supported_code_evaluates() {
        let m = merged(vec![
            (1, 12.0, 10.0),
            (2, 14.0, 15.0),
            (3, 10.0, 11.0),
            (4, 9.0, 8.0),
            (5, 16.0, 17.0),
        ]);
        let all = codes(&SUPPORTED_CODES);
        let table = build_table(&m, &all, &MetricParams::new()).unwrap();
        assert_eq!(table.len(), SUPPORTED_CODES.len());
        for (code, value) in &table {
            assert!(value.is_finite(), "{code} produced {value}");
        }
    }

    #[test]
    fn params_change_tunable_metrics() {
        let m = merged(vec![
            (1, 12.0, 10.0),
            (2, 14.0, 15.0),
            (3, 10.0, 11.0),
            (4, 9.0, 8.0),
            (5, 16.0, 17.0),
        ]);
        let default = build_table(&m, &codes(&["NSE_MOD"]), &MetricParams::new()).unwrap();
        let squared = build_table(
            &m,
            &codes(&["NSE_MOD"]),
            &MetricParams::new().nse_mod_j(2.0),
        )
        .unwrap();
        assert!((default["NSE_MOD"] - squared["NSE_MOD"]).abs() > 1e-9);
        // j = 2 reduces NSE_MOD to plain NSE.
        let plain = build_table(&m, &codes(&["NSE"]), &MetricParams::new()).unwrap();
        assert_relative_eq!(squared["NSE_MOD"], plain["NSE"], epsilon = 1e-12);
    }
}
