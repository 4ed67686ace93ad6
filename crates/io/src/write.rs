//! CSV writers for series, forecast bundles, and volume analyses.

use std::path::Path;

use chrono::NaiveDateTime;

use caudal_series::TimeSeries;

use crate::error::IoError;
use crate::forecast::ForecastBundle;

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_stamp(stamp: &NaiveDateTime) -> String {
    stamp.format(STAMP_FORMAT).to_string()
}

/// NaN serialises to an empty cell; the readers map empty cells back to NaN.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Writes a single series as `datetime,streamflow (m3/s)`.
pub fn write_series_csv(path: &Path, series: &TimeSeries) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["datetime", "streamflow (m3/s)"])?;
    for (stamp, value) in series.iter() {
        writer.write_record([format_stamp(&stamp), format_value(value)])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a forecast bundle, one row per stamp in the union of the two
/// cadences. The ensemble columns are empty on rows carried only by the
/// hourly high-resolution series, and vice versa — no sample of either
/// cadence is dropped.
pub fn write_forecast_csv(path: &Path, bundle: &ForecastBundle) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "datetime",
        "mean (m^3/s)",
        "max (m^3/s)",
        "min (m^3/s)",
        "std_dev_range_lower (m^3/s)",
        "std_dev_range_upper (m^3/s)",
        "high_res (m^3/s)",
    ])?;

    let low_stamps = bundle.mean.stamps();
    let high_stamps = bundle.high_res.stamps();
    let (mut i, mut h) = (0, 0);
    loop {
        let stamp = match (low_stamps.get(i), high_stamps.get(h)) {
            (Some(&low), Some(&high)) => low.min(high),
            (Some(&low), None) => low,
            (None, Some(&high)) => high,
            (None, None) => break,
        };

        let mut row = Vec::with_capacity(7);
        row.push(format_stamp(&stamp));
        if i < low_stamps.len() && low_stamps[i] == stamp {
            row.push(format_value(bundle.mean.values()[i]));
            row.push(format_value(bundle.max.values()[i]));
            row.push(format_value(bundle.min.values()[i]));
            row.push(format_value(bundle.std_dev_lower.values()[i]));
            row.push(format_value(bundle.std_dev_upper.values()[i]));
            i += 1;
        } else {
            for _ in 0..5 {
                row.push(String::new());
            }
        }
        if h < high_stamps.len() && high_stamps[h] == stamp {
            row.push(format_value(bundle.high_res.values()[h]));
            h += 1;
        } else {
            row.push(String::new());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a cumulative-volume analysis as `datetime,volume (Mm3)`.
///
/// # Errors
///
/// Returns [`IoError::Csv`] when the two slices differ in length.
pub fn write_volume_csv(
    path: &Path,
    stamps: &[NaiveDateTime],
    cumulative: &[f64],
) -> Result<(), IoError> {
    if stamps.len() != cumulative.len() {
        return Err(IoError::Csv {
            reason: format!(
                "{} stamps against {} volume values",
                stamps.len(),
                cumulative.len()
            ),
        });
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["datetime", "volume (Mm3)"])?;
    for (stamp, value) in stamps.iter().zip(cumulative) {
        writer.write_record([format_stamp(stamp), format_value(*value)])?;
    }
    writer.flush()?;
    Ok(())
}
