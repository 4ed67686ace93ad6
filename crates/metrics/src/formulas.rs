//! The individual metric formulas.
//!
//! Every function takes parallel simulated/observed slices that have
//! already been filtered to finite pairs. Formulas follow the hydrostats
//! definitions, including their choice of sample (N-1) versus population
//! (N) standard deviation per metric.

use caudal_stats::{mean, pearson_correlation, sd};

use crate::params::MetricParams;

fn population_sd(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / data.len() as f64).sqrt()
}

/// Mean error (bias).
pub(crate) fn me(sim: &[f64], obs: &[f64]) -> f64 {
    mean(&sim.iter().zip(obs).map(|(s, o)| s - o).collect::<Vec<_>>())
}

/// Mean absolute error.
pub(crate) fn mae(sim: &[f64], obs: &[f64]) -> f64 {
    mean(
        &sim.iter()
            .zip(obs)
            .map(|(s, o)| (s - o).abs())
            .collect::<Vec<_>>(),
    )
}

/// Mean squared error.
pub(crate) fn mse(sim: &[f64], obs: &[f64]) -> f64 {
    mean(
        &sim.iter()
            .zip(obs)
            .map(|(s, o)| (s - o) * (s - o))
            .collect::<Vec<_>>(),
    )
}

/// Root mean squared error.
pub(crate) fn rmse(sim: &[f64], obs: &[f64]) -> f64 {
    mse(sim, obs).sqrt()
}

/// RMSE normalised by the observed mean.
pub(crate) fn nrmse(sim: &[f64], obs: &[f64]) -> f64 {
    rmse(sim, obs) / mean(obs)
}

/// Mean absolute scaled error against an m-lagged naive forecast of the
/// observations. NaN when the series is too short for the lag.
pub(crate) fn mase(sim: &[f64], obs: &[f64], m: usize) -> f64 {
    let n = obs.len();
    if m == 0 || n <= m {
        return f64::NAN;
    }
    let naive: f64 = (m..n).map(|i| (obs[i] - obs[i - m]).abs()).sum::<f64>() / (n - m) as f64;
    mae(sim, obs) / naive
}

/// Coefficient of determination (squared Pearson correlation).
pub(crate) fn r_squared(sim: &[f64], obs: &[f64]) -> f64 {
    match pearson_correlation(sim, obs) {
        Some(r) => r * r,
        None => f64::NAN,
    }
}

/// Anomaly correlation coefficient (sample standard deviations).
pub(crate) fn acc(sim: &[f64], obs: &[f64]) -> f64 {
    let (ms, mo) = (mean(sim), mean(obs));
    let cross: f64 = sim.iter().zip(obs).map(|(s, o)| (s - ms) * (o - mo)).sum();
    cross / (sd(sim) * sd(obs) * sim.len() as f64)
}

/// Nash-Sutcliffe efficiency.
pub(crate) fn nse(sim: &[f64], obs: &[f64]) -> f64 {
    let mo = mean(obs);
    let num: f64 = sim.iter().zip(obs).map(|(s, o)| (s - o) * (s - o)).sum();
    let den: f64 = obs.iter().map(|o| (o - mo) * (o - mo)).sum();
    1.0 - num / den
}

/// Modified Nash-Sutcliffe efficiency with exponent `j`.
pub(crate) fn nse_mod(sim: &[f64], obs: &[f64], j: f64) -> f64 {
    let mo = mean(obs);
    let num: f64 = sim.iter().zip(obs).map(|(s, o)| (s - o).abs().powf(j)).sum();
    let den: f64 = obs.iter().map(|o| (o - mo).abs().powf(j)).sum();
    1.0 - num / den
}

/// Kling-Gupta efficiency, 2009 formulation (population standard
/// deviations).
pub(crate) fn kge_2009(sim: &[f64], obs: &[f64]) -> f64 {
    let r = match pearson_correlation(sim, obs) {
        Some(r) => r,
        None => return f64::NAN,
    };
    let alpha = population_sd(sim) / population_sd(obs);
    let beta = mean(sim) / mean(obs);
    1.0 - ((r - 1.0).powi(2) + (alpha - 1.0).powi(2) + (beta - 1.0).powi(2)).sqrt()
}

/// Kling-Gupta efficiency, 2012 formulation (coefficient-of-variation
/// ratio in place of the deviation ratio).
pub(crate) fn kge_2012(sim: &[f64], obs: &[f64]) -> f64 {
    let r = match pearson_correlation(sim, obs) {
        Some(r) => r,
        None => return f64::NAN,
    };
    let (ms, mo) = (mean(sim), mean(obs));
    let gamma = (population_sd(sim) / ms) / (population_sd(obs) / mo);
    let beta = ms / mo;
    1.0 - ((r - 1.0).powi(2) + (gamma - 1.0).powi(2) + (beta - 1.0).powi(2)).sqrt()
}

/// Willmott's index of agreement.
pub(crate) fn d(sim: &[f64], obs: &[f64]) -> f64 {
    let mo = mean(obs);
    let num: f64 = sim.iter().zip(obs).map(|(s, o)| (o - s) * (o - s)).sum();
    let den: f64 = sim
        .iter()
        .zip(obs)
        .map(|(s, o)| ((s - mo).abs() + (o - mo).abs()).powi(2))
        .sum();
    1.0 - num / den
}

/// Modified index of agreement with exponent `j`.
pub(crate) fn d_mod(sim: &[f64], obs: &[f64], j: f64) -> f64 {
    let mo = mean(obs);
    let num: f64 = sim.iter().zip(obs).map(|(s, o)| (o - s).abs().powf(j)).sum();
    let den: f64 = sim
        .iter()
        .zip(obs)
        .map(|(s, o)| ((s - mo).abs() + (o - mo).abs()).powf(j))
        .sum();
    1.0 - num / den
}

/// Legate-McCabe variant of the index of agreement with an optional
/// reference observation.
pub(crate) fn d1_p(sim: &[f64], obs: &[f64], obs_bar: Option<f64>) -> f64 {
    let reference = obs_bar.unwrap_or_else(|| mean(obs));
    let num: f64 = sim.iter().zip(obs).map(|(s, o)| (o - s).abs()).sum();
    let den: f64 = sim
        .iter()
        .zip(obs)
        .map(|(s, o)| (s - reference).abs() + (o - reference).abs())
        .sum();
    1.0 - num / den
}

/// Legate-McCabe efficiency index with an optional reference observation.
pub(crate) fn lm_index(sim: &[f64], obs: &[f64], obs_bar: Option<f64>) -> f64 {
    let reference = obs_bar.unwrap_or_else(|| mean(obs));
    let num: f64 = sim.iter().zip(obs).map(|(s, o)| (o - s).abs()).sum();
    let den: f64 = obs.iter().map(|o| (o - reference).abs()).sum();
    1.0 - num / den
}

/// H6 relative error per pair: ratio error scaled by a k-power mean of
/// the flow ratio.
fn h6(sim: &[f64], obs: &[f64], k: f64) -> Vec<f64> {
    sim.iter()
        .zip(obs)
        .map(|(s, o)| {
            let ratio = s / o;
            (ratio - 1.0) / (0.5 * (1.0 + ratio.powf(k))).powf(1.0 / k)
        })
        .collect()
}

/// H6 mean error.
pub(crate) fn h6_mhe(sim: &[f64], obs: &[f64], k: f64) -> f64 {
    mean(&h6(sim, obs, k))
}

/// H6 mean absolute error.
pub(crate) fn h6_ahe(sim: &[f64], obs: &[f64], k: f64) -> f64 {
    mean(&h6(sim, obs, k).iter().map(|h| h.abs()).collect::<Vec<_>>())
}

/// H6 root mean squared error.
pub(crate) fn h6_rmshe(sim: &[f64], obs: &[f64], k: f64) -> f64 {
    mean(&h6(sim, obs, k).iter().map(|h| h * h).collect::<Vec<_>>()).sqrt()
}

/// Spectral angle between the two series viewed as vectors, in radians.
pub(crate) fn sa(sim: &[f64], obs: &[f64]) -> f64 {
    let dot: f64 = sim.iter().zip(obs).map(|(s, o)| s * o).sum();
    let norm_s: f64 = sim.iter().map(|s| s * s).sum::<f64>().sqrt();
    let norm_o: f64 = obs.iter().map(|o| o * o).sum::<f64>().sqrt();
    (dot / (norm_s * norm_o)).acos()
}

/// Volumetric efficiency.
pub(crate) fn ve(sim: &[f64], obs: &[f64]) -> f64 {
    let num: f64 = sim.iter().zip(obs).map(|(s, o)| (s - o).abs()).sum();
    let den: f64 = obs.iter().sum();
    1.0 - num / den
}

/// Applies the metric named by `code` to the pair of finite vectors.
/// Returns `None` for an unknown code.
pub(crate) fn evaluate(
    code: &str,
    sim: &[f64],
    obs: &[f64],
    params: &MetricParams,
) -> Option<f64> {
    let value = match code {
        "ME" => me(sim, obs),
        "MAE" => mae(sim, obs),
        "MSE" => mse(sim, obs),
        "RMSE" => rmse(sim, obs),
        "NRMSE" => nrmse(sim, obs),
        "MASE" => mase(sim, obs, params.get_mase_m()),
        "R2" => r_squared(sim, obs),
        "ACC" => acc(sim, obs),
        "NSE" => nse(sim, obs),
        "NSE_MOD" => nse_mod(sim, obs, params.get_nse_mod_j()),
        "KGE_2009" => kge_2009(sim, obs),
        "KGE_2012" => kge_2012(sim, obs),
        "D" => d(sim, obs),
        "D_MOD" => d_mod(sim, obs, params.get_dmod_j()),
        "D1_P" => d1_p(sim, obs, params.get_d1_p_obs_bar()),
        "LM_INDEX" => lm_index(sim, obs, params.get_lm_obs_bar()),
        "H6_MHE" => h6_mhe(sim, obs, params.get_h6_mhe_k()),
        "H6_AHE" => h6_ahe(sim, obs, params.get_h6_ahe_k()),
        "H6_RMSHE" => h6_rmshe(sim, obs, params.get_h6_rmshe_k()),
        "SA" => sa(sim, obs),
        "VE" => ve(sim, obs),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SIM: [f64; 5] = [12.0, 14.0, 10.0, 9.0, 16.0];
    const OBS: [f64; 5] = [10.0, 15.0, 11.0, 8.0, 17.0];

    #[test]
    fn error_family() {
        assert_relative_eq!(me(&SIM, &OBS), 0.0, epsilon = 1e-12);
        assert_relative_eq!(mae(&SIM, &OBS), 1.2, epsilon = 1e-12);
        assert_relative_eq!(mse(&SIM, &OBS), 1.6, epsilon = 1e-12);
        assert_relative_eq!(rmse(&SIM, &OBS), 1.6f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(nrmse(&SIM, &OBS), 1.6f64.sqrt() / 12.2, epsilon = 1e-12);
    }

    #[test]
    fn mase_lag_one() {
        // Naive denominator: mean of |obs[i] - obs[i-1]| = (5+4+3+9)/4.
        let expected = 1.2 / (21.0 / 4.0);
        assert_relative_eq!(mase(&SIM, &OBS, 1), expected, epsilon = 1e-12);
    }

    #[test]
    fn mase_lag_too_long_is_nan() {
        assert!(mase(&SIM, &OBS, 5).is_nan());
        assert!(mase(&SIM, &OBS, 0).is_nan());
    }

    #[test]
    fn efficiency_family_perfect_fit() {
        assert_relative_eq!(nse(&OBS, &OBS), 1.0, epsilon = 1e-12);
        assert_relative_eq!(nse_mod(&OBS, &OBS, 1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(kge_2009(&OBS, &OBS), 1.0, epsilon = 1e-12);
        assert_relative_eq!(kge_2012(&OBS, &OBS), 1.0, epsilon = 1e-12);
        assert_relative_eq!(d(&OBS, &OBS), 1.0, epsilon = 1e-12);
        assert_relative_eq!(d1_p(&OBS, &OBS, None), 1.0, epsilon = 1e-12);
        assert_relative_eq!(lm_index(&OBS, &OBS, None), 1.0, epsilon = 1e-12);
        assert_relative_eq!(ve(&OBS, &OBS), 1.0, epsilon = 1e-12);
        assert_relative_eq!(sa(&OBS, &OBS), 0.0, epsilon = 1e-7);
        assert_relative_eq!(r_squared(&OBS, &OBS), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn nse_hand_computed() {
        // mean(obs) = 12.2; den = sum((obs - 12.2)^2) = 54.8; num = 8.
        assert_relative_eq!(nse(&SIM, &OBS), 1.0 - 8.0 / 54.8, epsilon = 1e-12);
    }

    #[test]
    fn h6_identity_is_zero() {
        assert_relative_eq!(h6_mhe(&OBS, &OBS, 1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(h6_ahe(&OBS, &OBS, 1.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(h6_rmshe(&OBS, &OBS, 1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn h6_hand_computed_single_pair() {
        // ratio = 2, k = 1: h = (2 - 1) / (0.5 * 3) = 2/3.
        let h = h6(&[2.0], &[1.0], 1.0);
        assert_relative_eq!(h[0], 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_input_yields_nan_not_panic() {
        let flat = [3.0, 3.0, 3.0];
        assert!(r_squared(&flat, &OBS[..3]).is_nan());
        assert!(kge_2009(&flat, &OBS[..3]).is_nan());
    }

    #[test]
    fn evaluate_dispatches_and_rejects() {
        let p = MetricParams::new();
        assert!(evaluate("RMSE", &SIM, &OBS, &p).is_some());
        assert!(evaluate("unknownCode", &SIM, &OBS, &p).is_none());
    }
}
