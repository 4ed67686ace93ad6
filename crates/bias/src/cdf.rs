//! Piecewise-linear empirical CDF lookup tables.

use crate::error::BiasError;

/// Behaviour when a lookup falls outside the table domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Fail with [`BiasError::OutOfDomain`]. Used by the multi-year batch
    /// path, whose values come from the same sample the table was built on.
    #[default]
    Fail,
    /// Extend linearly beyond the outer two table points. Used by the
    /// forecast path, whose short horizon may exceed historical bounds.
    Linear,
}

/// A monotone lookup table evaluated by linear interpolation.
///
/// Two instances exist per correction model: flow → probability (built from
/// the simulated histogram) and probability → flow (the observed inverse,
/// built by swapping the observed table's columns).
#[derive(Debug, Clone)]
pub struct EmpiricalCdf {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl EmpiricalCdf {
    /// Builds a lookup table from parallel `(x, y)` columns.
    ///
    /// Runs of equal `x` (flat stretches of a cumulative column, from empty
    /// histogram bins) are collapsed keeping the first point, which leaves a
    /// strictly increasing abscissa and matches the defined part of the
    /// original interpolant.
    ///
    /// # Errors
    ///
    /// Returns [`BiasError::DegenerateReference`] if fewer than two distinct
    /// table points remain.
    pub(crate) fn from_table(
        xs: &[f64],
        ys: &[f64],
        month: u32,
    ) -> Result<Self, BiasError> {
        debug_assert_eq!(xs.len(), ys.len());

        let mut dx = Vec::with_capacity(xs.len());
        let mut dy = Vec::with_capacity(ys.len());
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            if dx.last().is_some_and(|&prev| x <= prev) {
                continue;
            }
            dx.push(x);
            dy.push(y);
        }

        if dx.len() < 2 {
            return Err(BiasError::DegenerateReference {
                month,
                reason: format!(
                    "{} distinct table point(s), need at least 2 for interpolation",
                    dx.len()
                ),
            });
        }

        Ok(Self { xs: dx, ys: dy })
    }

    /// Lower bound of the table domain.
    pub fn domain_lo(&self) -> f64 {
        self.xs[0]
    }

    /// Upper bound of the table domain.
    pub fn domain_hi(&self) -> f64 {
        *self.xs.last().expect("table holds at least 2 points")
    }

    /// Evaluates the table at `x`.
    ///
    /// `NaN` input yields `NaN` output (missing values pass through the
    /// correction untouched).
    ///
    /// # Errors
    ///
    /// Returns [`BiasError::OutOfDomain`] when `x` lies outside the table
    /// and `extrapolation` is [`Extrapolation::Fail`].
    pub fn eval(&self, x: f64, extrapolation: Extrapolation) -> Result<f64, BiasError> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }

        let n = self.xs.len();
        if x < self.xs[0] || x > self.xs[n - 1] {
            match extrapolation {
                Extrapolation::Fail => {
                    return Err(BiasError::OutOfDomain {
                        value: x,
                        lo: self.xs[0],
                        hi: self.xs[n - 1],
                    });
                }
                Extrapolation::Linear => {
                    // Extend using the outer two points on the relevant side.
                    let (i, j) = if x < self.xs[0] { (0, 1) } else { (n - 2, n - 1) };
                    let slope = (self.ys[j] - self.ys[i]) / (self.xs[j] - self.xs[i]);
                    return Ok(self.ys[i] + slope * (x - self.xs[i]));
                }
            }
        }

        // partition_point gives the first index with xs[idx] >= x.
        let idx = self.xs.partition_point(|&e| e < x);
        if self.xs[idx] == x {
            return Ok(self.ys[idx]);
        }
        let (i, j) = (idx - 1, idx);
        let t = (x - self.xs[i]) / (self.xs[j] - self.xs[i]);
        Ok(self.ys[i] + t * (self.ys[j] - self.ys[i]))
    }
}
