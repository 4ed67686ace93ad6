use serde::Deserialize;

/// Top-level caudal configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CaudalConfig {
    /// Bias-correction settings.
    #[serde(default)]
    pub correction: CorrectionToml,

    /// Goodness-of-fit table settings.
    #[serde(default)]
    pub metrics: MetricsToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorrectionToml {
    /// First calendar year of the comparison window (inclusive).
    #[serde(default)]
    pub start_year: Option<i32>,

    /// Last calendar year of the comparison window (inclusive).
    #[serde(default)]
    pub end_year: Option<i32>,

    /// Minimum samples per side before a month's reference is usable.
    #[serde(default = "default_min_reference_samples")]
    pub min_reference_samples: usize,

    /// Extrapolate linearly beyond the historical range instead of
    /// dropping the affected (year, month) partition.
    #[serde(default)]
    pub extrapolate: bool,
}

impl Default for CorrectionToml {
    fn default() -> Self {
        Self {
            start_year: None,
            end_year: None,
            min_reference_samples: default_min_reference_samples(),
            extrapolate: false,
        }
    }
}

fn default_min_reference_samples() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsToml {
    /// Metric codes to evaluate; every supported code when omitted.
    #[serde(default)]
    pub codes: Option<Vec<String>>,

    #[serde(default = "default_mase_m")]
    pub mase_m: usize,
    #[serde(default = "default_exponent")]
    pub dmod_j: f64,
    #[serde(default = "default_exponent")]
    pub nse_mod_j: f64,
    #[serde(default = "default_exponent")]
    pub h6_mhe_k: f64,
    #[serde(default = "default_exponent")]
    pub h6_ahe_k: f64,
    #[serde(default = "default_exponent")]
    pub h6_rmshe_k: f64,
    #[serde(default)]
    pub d1_p_obs_bar: Option<f64>,
    #[serde(default)]
    pub lm_obs_bar: Option<f64>,
}

impl Default for MetricsToml {
    fn default() -> Self {
        Self {
            codes: None,
            mase_m: default_mase_m(),
            dmod_j: default_exponent(),
            nse_mod_j: default_exponent(),
            h6_mhe_k: default_exponent(),
            h6_ahe_k: default_exponent(),
            h6_rmshe_k: default_exponent(),
            d1_p_obs_bar: None,
            lm_obs_bar: None,
        }
    }
}

fn default_mase_m() -> usize {
    1
}
fn default_exponent() -> f64 {
    1.0
}
