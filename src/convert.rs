//! Pure conversion functions: TOML config structs -> crate API config types.

use caudal_bias::{CorrectionConfig, Extrapolation};
use caudal_metrics::{MetricParams, SUPPORTED_CODES};

use crate::config::{CorrectionToml, MetricsToml};

/// Builds a [`CorrectionConfig`] from the TOML correction section. The
/// year window is applied separately, on the series themselves.
pub fn build_correction_config(toml: &CorrectionToml) -> CorrectionConfig {
    let extrapolation = if toml.extrapolate {
        Extrapolation::Linear
    } else {
        Extrapolation::Fail
    };
    CorrectionConfig::new()
        .with_min_reference_samples(toml.min_reference_samples)
        .with_extrapolation(extrapolation)
}

/// Builds the metric code list from the TOML metrics section; every
/// supported code when none are named.
pub fn build_metric_codes(toml: &MetricsToml) -> Vec<String> {
    match &toml.codes {
        Some(codes) => codes.clone(),
        None => SUPPORTED_CODES.iter().map(|c| c.to_string()).collect(),
    }
}

/// Builds [`MetricParams`] from the TOML metrics section.
pub fn build_metric_params(toml: &MetricsToml) -> MetricParams {
    let mut params = MetricParams::new()
        .mase_m(toml.mase_m)
        .dmod_j(toml.dmod_j)
        .nse_mod_j(toml.nse_mod_j)
        .h6_mhe_k(toml.h6_mhe_k)
        .h6_ahe_k(toml.h6_ahe_k)
        .h6_rmshe_k(toml.h6_rmshe_k);
    if let Some(obs_bar) = toml.d1_p_obs_bar {
        params = params.d1_p_obs_bar(obs_bar);
    }
    if let Some(obs_bar) = toml.lm_obs_bar {
        params = params.lm_obs_bar(obs_bar);
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaudalConfig;

    #[test]
    fn extrapolate_flag_selects_mode() {
        let config: CaudalConfig = toml::from_str("[correction]\nextrapolate = true\n").unwrap();
        let built = build_correction_config(&config.correction);
        assert_eq!(built.extrapolation(), Extrapolation::Linear);

        let config: CaudalConfig = toml::from_str("").unwrap();
        let built = build_correction_config(&config.correction);
        assert_eq!(built.extrapolation(), Extrapolation::Fail);
    }

    #[test]
    fn omitted_codes_expand_to_all() {
        let config: CaudalConfig = toml::from_str("").unwrap();
        let codes = build_metric_codes(&config.metrics);
        assert_eq!(codes.len(), SUPPORTED_CODES.len());
    }
}
