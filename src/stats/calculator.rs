//! Statistics Calculator Module
//! Descriptive statistics for the water level series.

use statrs::statistics::Statistics;

/// Summary of a water level series, laid out like a `describe()` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Default for SummaryStatistics {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

impl SummaryStatistics {
    /// True when every reading has the same value, so threshold filters
    /// cannot split the table.
    pub fn is_uniform(&self) -> bool {
        self.count > 0 && self.min == self.max
    }

    /// Rows of the statistics table, in display order.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics, ignoring missing readings.
    pub fn compute_summary(values: &[Option<f64>]) -> SummaryStatistics {
        let present: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .collect();
        Self::compute_descriptive_stats(&present)
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> SummaryStatistics {
        let n = values.len();
        if n == 0 {
            return SummaryStatistics::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        // Sample standard deviation (n - 1); NaN for a single reading.
        let std = values.iter().std_dev();

        SummaryStatistics {
            count: n,
            mean: values.iter().mean(),
            std,
            min: sorted[0],
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn constant_series_has_zero_spread() {
        let stats = StatsCalculator::compute_descriptive_stats(&[5.0, 5.0, 5.0, 5.0]);
        assert_eq!(stats.count, 4);
        assert!(approx(stats.mean, 5.0));
        assert!(approx(stats.std, 0.0));
        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 5.0);
        assert!(stats.is_uniform());
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let stats = StatsCalculator::compute_descriptive_stats(&[10.0, 20.0, 30.0]);
        assert!(approx(stats.mean, 20.0));
        assert!(approx(stats.std, 10.0));
        assert!(approx(stats.q25, 15.0));
        assert!(approx(stats.median, 20.0));
        assert!(approx(stats.q75, 25.0));
        assert!(!stats.is_uniform());
    }

    #[test]
    fn unsorted_input_matches_describe() {
        let stats = StatsCalculator::compute_descriptive_stats(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!(approx(stats.q25, 1.75));
        assert!(approx(stats.median, 2.5));
        assert!(approx(stats.q75, 3.25));
        assert!(approx(stats.std, 1.6666666666666667_f64.sqrt()));
    }

    #[test]
    fn missing_readings_are_skipped() {
        let stats = StatsCalculator::compute_summary(&[Some(2.0), None, Some(f64::NAN), Some(4.0)]);
        assert_eq!(stats.count, 2);
        assert!(approx(stats.mean, 3.0));
    }

    #[test]
    fn single_reading_has_undefined_std() {
        let stats = StatsCalculator::compute_descriptive_stats(&[7.0]);
        assert_eq!(stats.count, 1);
        assert!(stats.std.is_nan());
        assert!(stats.is_uniform());
    }

    #[test]
    fn empty_series_is_not_uniform() {
        let stats = StatsCalculator::compute_summary(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(!stats.is_uniform());
    }

    #[test]
    fn rows_follow_describe_order() {
        let stats = StatsCalculator::compute_descriptive_stats(&[1.0, 2.0]);
        let labels: Vec<&str> = stats.rows().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]);
    }
}
