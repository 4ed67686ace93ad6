//! Tunable constants consumed by individual metrics.

/// Extra parameters for metrics that take an exponent, seasonality lag, or
/// reference point. Builder-style; every field has the conventional default
/// so callers only set what they tune.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricParams {
    mase_m: usize,
    dmod_j: f64,
    nse_mod_j: f64,
    h6_mhe_k: f64,
    h6_ahe_k: f64,
    h6_rmshe_k: f64,
    d1_p_obs_bar: Option<f64>,
    lm_obs_bar: Option<f64>,
}

impl Default for MetricParams {
    fn default() -> Self {
        Self {
            mase_m: 1,
            dmod_j: 1.0,
            nse_mod_j: 1.0,
            h6_mhe_k: 1.0,
            h6_ahe_k: 1.0,
            h6_rmshe_k: 1.0,
            d1_p_obs_bar: None,
            lm_obs_bar: None,
        }
    }
}

impl MetricParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seasonal lag for the MASE naive-forecast denominator.
    pub fn mase_m(mut self, m: usize) -> Self {
        self.mase_m = m;
        self
    }

    /// Exponent of the modified index of agreement.
    pub fn dmod_j(mut self, j: f64) -> Self {
        self.dmod_j = j;
        self
    }

    /// Exponent of the modified Nash-Sutcliffe efficiency.
    pub fn nse_mod_j(mut self, j: f64) -> Self {
        self.nse_mod_j = j;
        self
    }

    /// Ratio exponent of the H6 mean error.
    pub fn h6_mhe_k(mut self, k: f64) -> Self {
        self.h6_mhe_k = k;
        self
    }

    /// Ratio exponent of the H6 absolute error.
    pub fn h6_ahe_k(mut self, k: f64) -> Self {
        self.h6_ahe_k = k;
        self
    }

    /// Ratio exponent of the H6 root-mean-square error.
    pub fn h6_rmshe_k(mut self, k: f64) -> Self {
        self.h6_rmshe_k = k;
        self
    }

    /// Reference observation for D1'; the observed mean when unset.
    pub fn d1_p_obs_bar(mut self, obs_bar: f64) -> Self {
        self.d1_p_obs_bar = Some(obs_bar);
        self
    }

    /// Reference observation for the Legate-McCabe index; the observed
    /// mean when unset.
    pub fn lm_obs_bar(mut self, obs_bar: f64) -> Self {
        self.lm_obs_bar = Some(obs_bar);
        self
    }

    pub(crate) fn get_mase_m(&self) -> usize {
        self.mase_m
    }

    pub(crate) fn get_dmod_j(&self) -> f64 {
        self.dmod_j
    }

    pub(crate) fn get_nse_mod_j(&self) -> f64 {
        self.nse_mod_j
    }

    pub(crate) fn get_h6_mhe_k(&self) -> f64 {
        self.h6_mhe_k
    }

    pub(crate) fn get_h6_ahe_k(&self) -> f64 {
        self.h6_ahe_k
    }

    pub(crate) fn get_h6_rmshe_k(&self) -> f64 {
        self.h6_rmshe_k
    }

    pub(crate) fn get_d1_p_obs_bar(&self) -> Option<f64> {
        self.d1_p_obs_bar
    }

    pub(crate) fn get_lm_obs_bar(&self) -> Option<f64> {
        self.lm_obs_bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_convention() {
        let p = MetricParams::new();
        assert_eq!(p.get_mase_m(), 1);
        assert_eq!(p.get_dmod_j(), 1.0);
        assert_eq!(p.get_nse_mod_j(), 1.0);
        assert_eq!(p.get_h6_mhe_k(), 1.0);
        assert!(p.get_d1_p_obs_bar().is_none());
        assert!(p.get_lm_obs_bar().is_none());
    }

    #[test]
    fn builder_overrides() {
        let p = MetricParams::new().mase_m(12).dmod_j(2.0).lm_obs_bar(5.5);
        assert_eq!(p.get_mase_m(), 12);
        assert_eq!(p.get_dmod_j(), 2.0);
        assert_eq!(p.get_lm_obs_bar(), Some(5.5));
    }
}
