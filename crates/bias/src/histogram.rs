//! Empirical histogram of a reference month's flow distribution.

use crate::error::BiasError;

/// Which reference subset an edge set belongs to.
///
/// The first-edge fix applies a different test on each side (`>= 0` for the
/// simulated edges, `== 0` / `> 0` for the observed edges). The asymmetry is
/// preserved intentionally; see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeSide {
    Simulated,
    Observed,
}

impl EdgeSide {
    pub(crate) fn label(self) -> &'static str {
        match self {
            EdgeSide::Simulated => "simulated",
            EdgeSide::Observed => "observed",
        }
    }
}

/// Bin edges and the cumulative frequency table of one reference subset.
///
/// `upper_edges[i]` is the upper bound of bin `i`; `cumulative[i]` is the
/// fraction of the sample at or below that bound. The cumulative column is
/// monotonically non-decreasing and ends at 1.0 when every sample fell
/// inside the edge range.
#[derive(Debug, Clone)]
pub(crate) struct HistogramModel {
    pub(crate) upper_edges: Vec<f64>,
    pub(crate) cumulative: Vec<f64>,
}

/// Sturges' rule: `ceil(1 + 3.322 * log10(n))` bins for a sample of size `n`.
///
/// Callers must guarantee `n >= 1`.
pub(crate) fn sturges_bin_count(n: usize) -> usize {
    debug_assert!(n >= 1);
    (1.0 + 3.322 * (n as f64).log10()).ceil() as usize
}

/// Builds the edge progression: one bin width below zero, stepping by the
/// bin width, up to (but excluding) `max_val + 2 * width`.
///
/// The count-based formulation mirrors `numpy.arange` so the last edge sits
/// at least one full bin above the sample maximum.
fn edge_progression(max_val: f64, width: f64) -> Vec<f64> {
    let start = -width;
    let stop = max_val + 2.0 * width;
    let n = ((stop - start) / width).ceil() as usize;
    (0..n).map(|i| start + i as f64 * width).collect()
}

/// First-edge fix: guarantee the leading edge is strictly negative so the
/// smallest real sample never lands on the boundary.
fn fix_first_edge(edges: &mut Vec<f64>, side: EdgeSide) {
    match side {
        EdgeSide::Simulated => {
            if edges[0] >= 0.0 {
                edges.insert(0, -edges[1]);
            }
        }
        EdgeSide::Observed => {
            if edges[0] == 0.0 {
                edges.insert(0, -edges[1]);
            } else if edges[0] > 0.0 {
                edges.insert(0, -edges[0]);
            }
        }
    }
}

impl HistogramModel {
    /// Fits the histogram of one reference subset.
    ///
    /// The domain is `floor(min)..ceil(max)` over the finite samples, split
    /// into a Sturges bin count; counts are normalised by the full sample
    /// size and accumulated into the empirical CDF, associated with each
    /// bin's upper edge.
    ///
    /// # Errors
    ///
    /// Returns [`BiasError::InsufficientReference`] when the subset holds
    /// fewer than `min_samples` (or zero finite) values, and
    /// [`BiasError::DegenerateReference`] when the rounded domain collapses
    /// to a zero bin width (all samples equal after rounding).
    pub(crate) fn fit(
        values: &[f64],
        side: EdgeSide,
        month: u32,
        min_samples: usize,
    ) -> Result<Self, BiasError> {
        let needed = min_samples.max(1);
        if values.len() < needed {
            return Err(BiasError::InsufficientReference {
                month,
                side: side.label(),
                count: values.len(),
                needed,
            });
        }

        let mut min_raw = f64::INFINITY;
        let mut max_raw = f64::NEG_INFINITY;
        let mut n_finite = 0usize;
        for &v in values {
            if v.is_finite() {
                min_raw = min_raw.min(v);
                max_raw = max_raw.max(v);
                n_finite += 1;
            }
        }
        if n_finite == 0 {
            return Err(BiasError::InsufficientReference {
                month,
                side: side.label(),
                count: 0,
                needed,
            });
        }

        let min_val = min_raw.floor();
        let max_val = max_raw.ceil();
        let bin_count = sturges_bin_count(values.len());
        let width = (max_val - min_val) / bin_count as f64;

        if !(width > 0.0) {
            return Err(BiasError::DegenerateReference {
                month,
                reason: format!("zero bin width over domain [{min_val}, {max_val}]"),
            });
        }

        let mut edges = edge_progression(max_val, width);
        fix_first_edge(&mut edges, side);

        // Counts per [e_i, e_{i+1}) with the last bin closed on the right;
        // out-of-range samples stay uncounted but still weigh the total.
        let n_bins = edges.len() - 1;
        let mut counts = vec![0usize; n_bins];
        let last = n_bins - 1;
        for &v in values {
            if !v.is_finite() {
                continue;
            }
            if v < edges[0] || v > edges[n_bins] {
                continue;
            }
            let mut idx = edges[..n_bins].partition_point(|&e| e <= v);
            idx = idx.saturating_sub(1);
            if v == edges[n_bins] {
                idx = last;
            }
            counts[idx] += 1;
        }

        let total = values.len() as f64;
        let mut cumulative = Vec::with_capacity(n_bins);
        let mut running = 0.0;
        for &c in &counts {
            running += c as f64 / total;
            cumulative.push(running);
        }

        Ok(Self {
            upper_edges: edges[1..].to_vec(),
            cumulative,
        })
    }
}
