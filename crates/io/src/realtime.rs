//! Real-time gauge payload (JSON) from the national hydrology service.

use chrono::NaiveDateTime;
use serde::Deserialize;

use caudal_series::TimeSeries;

use crate::error::IoError;
use crate::read::parse_stamp;

#[derive(Debug, Deserialize)]
struct Payload {
    obs: Channel,
    sen: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    data: Vec<(String, Option<f64>)>,
}

/// Observed and sensor discharge parsed from one real-time payload.
#[derive(Debug, Clone)]
pub struct RealtimeSeries {
    pub observed: TimeSeries,
    pub sensor: TimeSeries,
}

fn channel_series(channel: Channel, start: NaiveDateTime) -> Result<TimeSeries, IoError> {
    let mut pairs = Vec::with_capacity(channel.data.len());
    for (stamp, value) in channel.data {
        let stamp = parse_stamp(&stamp)?;
        if stamp >= start {
            pairs.push((stamp, value.unwrap_or(f64::NAN)));
        }
    }
    Ok(TimeSeries::from_pairs(pairs)?)
}

/// Parses a real-time payload `{ "obs": {"data": [[ts, v], ...]}, "sen":
/// {...} }`, keeping only stamps at or after `start` (the first forecast
/// issuance, so the plot windows line up).
///
/// # Errors
///
/// Returns [`IoError::NoData`] when both channels are empty after
/// filtering, and [`IoError::Parse`] for a malformed payload or timestamp.
pub fn parse_realtime(json: &str, start: NaiveDateTime) -> Result<RealtimeSeries, IoError> {
    let payload: Payload = serde_json::from_str(json)?;
    let observed = channel_series(payload.obs, start)?;
    let sensor = channel_series(payload.sen, start)?;
    if observed.is_empty() && sensor.is_empty() {
        return Err(IoError::NoData);
    }
    Ok(RealtimeSeries { observed, sensor })
}
