//! Descriptive statistics behind the panels.

/// Arithmetic mean, `None` for no values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    /// Count per bin.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width bins spanning their range.
    ///
    /// Every bin is half-open except the last, which includes the maximum.
    /// When all values are equal the single value sits in a unit-wide range
    /// centred on it. Non-finite values are skipped.
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return None;
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (low, high) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
        let width = (high - low) / bins as f64;

        let edges = (0..=bins).map(|i| low + width * i as f64).collect();
        let mut counts = vec![0u64; bins];
        for value in finite {
            let index = (((value - low) / width).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }

        Some(Self { edges, counts })
    }

    /// Largest bin count.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Bins as `(start, end, count)`.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, count)| (edge[0], edge[1], *count))
    }
}

/// Quantile of sorted values with linear interpolation between ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Five-number summary for a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    /// Smallest value within `q1 - 1.5 IQR`.
    pub lower_whisker: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Largest value within `q3 + 1.5 IQR`.
    pub upper_whisker: f64,
    /// Values beyond the whiskers.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarizes `values`; `None` when there are no finite values.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25)?;
        let median = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = sorted.iter().copied().filter(|v| (low_fence..=high_fence).contains(v));
        let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
        let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

/// Pearson correlation of paired samples.
///
/// `None` when fewer than two pairs remain or either side has zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialdash_common::test_utils::assert_approx_eq;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_histogram_last_bin_inclusive() {
        let hist = Histogram::compute(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(hist.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.max_count(), 2);
        assert_eq!(hist.bins().count(), 4);
    }

    #[test]
    fn test_histogram_single_value() {
        let hist = Histogram::compute(&[5.0, 5.0], 3).unwrap();
        assert_eq!(hist.counts.iter().sum::<u64>(), 2);
        assert_approx_eq(hist.edges[0], 4.5, 1e-12);
        assert_approx_eq(hist.edges[3], 5.5, 1e-12);
        assert!(Histogram::compute(&[], 3).is_none());
        assert!(Histogram::compute(&[f64::NAN], 3).is_none());
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_approx_eq(quantile(&sorted, 0.25).unwrap(), 1.75, 1e-12);
        assert_approx_eq(quantile(&sorted, 0.5).unwrap(), 2.5, 1e-12);
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_box_summary_outliers() {
        let summary = BoxSummary::compute(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_approx_eq(summary.median, 3.0, 1e-12);
        assert_approx_eq(summary.q1, 2.0, 1e-12);
        assert_approx_eq(summary.q3, 4.0, 1e-12);
        assert_approx_eq(summary.upper_whisker, 4.0, 1e-12);
        assert_approx_eq(summary.lower_whisker, 1.0, 1e-12);
        assert_eq!(summary.outliers, vec![100.0]);
    }

    #[test]
    fn test_pearson() {
        let perfect: Vec<(f64, f64)> = (0..5).map(|i| (f64::from(i), 2.0 * f64::from(i) + 1.0)).collect();
        assert_approx_eq(pearson(&perfect).unwrap(), 1.0, 1e-12);

        let inverse: Vec<(f64, f64)> = (0..5).map(|i| (f64::from(i), -f64::from(i))).collect();
        assert_approx_eq(pearson(&inverse).unwrap(), -1.0, 1e-12);

        assert_eq!(pearson(&[(1.0, 2.0), (1.0, 3.0)]), None);
        assert_eq!(pearson(&[(1.0, 2.0)]), None);
    }
}
