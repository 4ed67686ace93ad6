//! CSV readers for observed gauges and simulation/forecast products.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use caudal_series::TimeSeries;

use crate::error::IoError;
use crate::forecast::ForecastBundle;

/// Header names of the GEOGloWS forecast-stats product.
const FORECAST_MEAN: &str = "mean (m^3/s)";
const FORECAST_MAX: &str = "max (m^3/s)";
const FORECAST_MIN: &str = "min (m^3/s)";
const FORECAST_STD_LOWER: &str = "std_dev_range_lower (m^3/s)";
const FORECAST_STD_UPPER: &str = "std_dev_range_upper (m^3/s)";
const FORECAST_HIGH_RES: &str = "high_res (m^3/s)";

/// Parses a timestamp cell, accepting the datetime and date-only layouts
/// the upstream services emit.
pub(crate) fn parse_stamp(cell: &str) -> Result<NaiveDateTime, IoError> {
    let cell = cell.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(cell, format) {
            return Ok(stamp);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(cell, "%Y-%m-%d") {
        if let Some(stamp) = date.and_hms_opt(0, 0, 0) {
            return Ok(stamp);
        }
    }
    Err(IoError::Parse {
        reason: format!("unrecognised timestamp '{cell}'"),
    })
}

/// Coerces a gauge cell to a value, mapping anything unparseable
/// (empty cells, sentinel strings) to NaN.
fn coerce_value(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Parses a cell that must hold a number.
fn parse_value(cell: &str, column: &str) -> Result<f64, IoError> {
    cell.trim().parse::<f64>().map_err(|_| IoError::Parse {
        reason: format!("invalid value '{cell}' in column '{column}'"),
    })
}

/// Reads an observed gauge CSV of `(date, value)` rows.
///
/// Value cells arrive string-encoded from the file store; unparseable or
/// missing cells become NaN rather than failing the read, since gaps are a
/// normal feature of gauge records.
///
/// # Errors
///
/// Returns [`IoError::NoData`] for a file with no rows and
/// [`IoError::Series`] when two rows share a date.
pub fn read_observed(path: &Path) -> Result<TimeSeries, IoError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let stamp = record.get(0).ok_or_else(|| IoError::Csv {
            reason: "row without a timestamp cell".to_string(),
        })?;
        let value = record.get(1).map_or(f64::NAN, coerce_value);
        pairs.push((parse_stamp(stamp)?, value));
    }
    if pairs.is_empty() {
        return Err(IoError::NoData);
    }
    Ok(TimeSeries::from_pairs(pairs)?)
}

/// Reads a simulated-discharge CSV of `(datetime, value)` rows.
///
/// Negative values are floored to zero on ingest; the simulation can emit
/// small negative flows that have no physical meaning. An empty value cell
/// reads back as NaN, mirroring [`write_series_csv`], which emits an empty
/// cell for a NaN sample; any other non-numeric cell is rejected.
///
/// [`write_series_csv`]: crate::write_series_csv
///
/// # Errors
///
/// Returns [`IoError::NoData`] for a file with no rows and
/// [`IoError::Parse`] for a non-empty, non-numeric value cell.
pub fn read_simulated(path: &Path) -> Result<TimeSeries, IoError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        let stamp = record.get(0).ok_or_else(|| IoError::Csv {
            reason: "row without a timestamp cell".to_string(),
        })?;
        let value = record.get(1).ok_or_else(|| IoError::Csv {
            reason: "row without a value cell".to_string(),
        })?;
        let value = if value.trim().is_empty() {
            f64::NAN
        } else {
            parse_value(value, "streamflow")?
        };
        pairs.push((parse_stamp(stamp)?, value));
    }
    if pairs.is_empty() {
        return Err(IoError::NoData);
    }
    Ok(TimeSeries::from_pairs(pairs)?.floor_negative())
}

/// Reads a forecast record CSV (prior short-range issuances), same layout
/// as the simulated product.
pub fn read_forecast_record(path: &Path) -> Result<TimeSeries, IoError> {
    read_simulated(path)
}

/// Reads a GEOGloWS forecast-stats CSV into a [`ForecastBundle`].
///
/// The five ensemble-statistics columns share a 3-hourly cadence while
/// `high_res` runs hourly over a shorter horizon, so rows are split: a row
/// missing any ensemble field contributes nothing to the low-resolution
/// series, and `high_res` is collected independently. Every series is
/// floored at zero.
///
/// # Errors
///
/// Returns [`IoError::MissingColumn`] when a stats column is absent from
/// the header and [`IoError::NoData`] when no row yields a complete
/// ensemble entry.
pub fn read_forecast_stats(path: &Path) -> Result<ForecastBundle, IoError> {
    let mut reader = csv::Reader::from_path(path)?;
    let header = reader.headers()?.clone();
    let column = |name: &str| -> Result<usize, IoError> {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
            })
    };
    let mean_col = column(FORECAST_MEAN)?;
    let max_col = column(FORECAST_MAX)?;
    let min_col = column(FORECAST_MIN)?;
    let lower_col = column(FORECAST_STD_LOWER)?;
    let upper_col = column(FORECAST_STD_UPPER)?;
    let high_res_col = column(FORECAST_HIGH_RES)?;

    let mut mean = Vec::new();
    let mut max = Vec::new();
    let mut min = Vec::new();
    let mut std_dev_lower = Vec::new();
    let mut std_dev_upper = Vec::new();
    let mut high_res = Vec::new();

    for record in reader.records() {
        let record = record?;
        let stamp = record.get(0).ok_or_else(|| IoError::Csv {
            reason: "row without a timestamp cell".to_string(),
        })?;
        let stamp = parse_stamp(stamp)?;

        let cell = |idx: usize| record.get(idx).map(str::trim).filter(|c| !c.is_empty());

        let low_res: Option<[f64; 5]> = (|| {
            Some([
                cell(mean_col)?.parse().ok()?,
                cell(max_col)?.parse().ok()?,
                cell(min_col)?.parse().ok()?,
                cell(lower_col)?.parse().ok()?,
                cell(upper_col)?.parse().ok()?,
            ])
        })();
        if let Some([m, mx, mn, lo, hi]) = low_res {
            mean.push((stamp, m));
            max.push((stamp, mx));
            min.push((stamp, mn));
            std_dev_lower.push((stamp, lo));
            std_dev_upper.push((stamp, hi));
        }

        if let Some(v) = cell(high_res_col).and_then(|c| c.parse().ok()) {
            high_res.push((stamp, v));
        }
    }

    if mean.is_empty() {
        return Err(IoError::NoData);
    }

    Ok(ForecastBundle {
        mean: TimeSeries::from_pairs(mean)?.floor_negative(),
        max: TimeSeries::from_pairs(max)?.floor_negative(),
        min: TimeSeries::from_pairs(min)?.floor_negative(),
        std_dev_lower: TimeSeries::from_pairs(std_dev_lower)?.floor_negative(),
        std_dev_upper: TimeSeries::from_pairs(std_dev_upper)?.floor_negative(),
        high_res: TimeSeries::from_pairs(high_res)?.floor_negative(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parse_stamp_accepts_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2020, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(parse_stamp("2020-05-01 12:30:00").unwrap(), expected);
        assert_eq!(parse_stamp("2020-05-01T12:30:00").unwrap(), expected);
        assert_eq!(parse_stamp("2020-05-01 12:30").unwrap(), expected);
        let midnight = NaiveDate::from_ymd_opt(2020, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_stamp("2020-05-01").unwrap(), midnight);
    }

    #[test]
    fn parse_stamp_rejects_garbage() {
        assert!(matches!(
            parse_stamp("yesterday"),
            Err(IoError::Parse { .. })
        ));
    }

    #[test]
    fn coerce_value_maps_markers_to_nan() {
        assert_eq!(coerce_value(" 12.5 "), 12.5);
        assert!(coerce_value("").is_nan());
        assert!(coerce_value("NA").is_nan());
        assert!(coerce_value("--").is_nan());
    }
}
