//! External interface adapters: CSV files from the observed-data store and
//! the simulation API, the real-time JSON gauge payload, and the CSV
//! outputs the dashboard serves for download.
//!
//! Everything here is a thin, fully-materialized translation layer — no
//! adapter does any hydrology. Readers hand the core complete
//! [`caudal_series::TimeSeries`] values and writers accept them back.

mod error;
mod forecast;
mod read;
mod realtime;
mod write;

pub use error::IoError;
pub use forecast::ForecastBundle;
pub use read::{read_forecast_record, read_forecast_stats, read_observed, read_simulated};
pub use realtime::{RealtimeSeries, parse_realtime};
pub use write::{write_forecast_csv, write_series_csv, write_volume_csv};
