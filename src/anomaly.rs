//! Threshold anomaly detection: a value is anomalous when it sits more than
//! `k` standard deviations away from its column mean.
//!
//! A zero-variance column uses the same strict inequality: any value that
//! differs from the mean at all is flagged, values equal to the mean are not.

use serde::{Deserialize, Serialize};

/// Denominator used for the standard deviation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deviation {
    /// Divide by n.
    #[default]
    Population,
    /// Divide by n - 1. Fewer than two values give a deviation of 0.
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub mean: f64,
    pub stddev: f64,
}

impl Statistics {
    /// Mean and standard deviation of `values`; `(0, 0)` when empty.
    pub fn of(values: &[f64], deviation: Deviation) -> Self {
        let (mean, stddev) = mean_std(values, deviation);
        Self { mean, stddev }
    }

    /// `(mean - k*stddev, mean + k*stddev)`; values strictly outside are anomalies.
    pub fn bounds(&self, k: f64) -> (f64, f64) {
        let band = k * self.stddev;
        (self.mean - band, self.mean + band)
    }

    pub fn is_anomaly(&self, value: f64, k: f64) -> bool {
        is_anomaly(value, self.mean, self.stddev, k)
    }

    /// Signed distance from the mean in standard deviations. `None` for a
    /// zero-variance column.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        (self.stddev > 0.0).then(|| (value - self.mean) / self.stddev)
    }
}

pub fn is_anomaly(value: f64, mean: f64, stddev: f64, k: f64) -> bool {
    (value - mean).abs() > k * stddev
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalySignal {
    pub index: usize,
    pub value: f64,
    pub z_score: Option<f64>,
    pub is_anomaly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub statistics: Statistics,
    pub k: f64,
    pub lower: f64,
    pub upper: f64,
    pub signals: Vec<AnomalySignal>,
}

impl AnomalyReport {
    pub fn anomaly_count(&self) -> usize {
        self.signals.iter().filter(|s| s.is_anomaly).count()
    }
}

/// Classify every value against the statistics of the whole slice.
/// Signals are reported in input order.
pub fn detect_anomalies(values: &[f64], k: f64, deviation: Deviation) -> AnomalyReport {
    let statistics = Statistics::of(values, deviation);
    let (lower, upper) = statistics.bounds(k);

    let signals: Vec<AnomalySignal> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| AnomalySignal {
            index,
            value,
            z_score: statistics.z_score(value),
            is_anomaly: statistics.is_anomaly(value, k),
        })
        .collect();

    let report = AnomalyReport {
        statistics,
        k,
        lower,
        upper,
        signals,
    };
    tracing::debug!(
        points = values.len(),
        anomalies = report.anomaly_count(),
        mean = statistics.mean,
        stddev = statistics.stddev,
        "anomaly detection complete"
    );
    report
}

/// Per-value flags only; used by the table aggregator.
pub fn flag_anomalies(values: &[f64], k: f64, deviation: Deviation) -> (Statistics, Vec<bool>) {
    let statistics = Statistics::of(values, deviation);
    let flags = values.iter().map(|&v| statistics.is_anomaly(v, k)).collect();
    (statistics, flags)
}

fn mean_std(vals: &[f64], deviation: Deviation) -> (f64, f64) {
    if vals.is_empty() {
        return (0.0, 0.0);
    }
    let n = vals.len() as f64;
    let sum: f64 = vals.iter().sum();
    let mean = sum / n;
    let denom = match deviation {
        Deviation::Population => n,
        Deviation::Sample if vals.len() < 2 => return (mean, 0.0),
        Deviation::Sample => n - 1.0,
    };
    let sq_diff: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
    let std = (sq_diff / denom).sqrt();
    (mean, std)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_anomaly_threshold() {
        assert!(is_anomaly(130.0, 100.0, 10.0, 2.0));
        assert!(!is_anomaly(110.0, 100.0, 10.0, 2.0));
        // exactly on the boundary is not anomalous
        assert!(!is_anomaly(120.0, 100.0, 10.0, 2.0));
        assert!(is_anomaly(70.0, 100.0, 10.0, 2.0));
    }

    #[test]
    fn test_zero_stddev_flags_any_difference() {
        assert!(!is_anomaly(5.0, 5.0, 0.0, 3.0));
        assert!(is_anomaly(5.000001, 5.0, 0.0, 3.0));
    }

    #[test]
    fn test_population_vs_sample() {
        let vals = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let pop = Statistics::of(&vals, Deviation::Population);
        assert_eq!(pop.mean, 5.0);
        assert!((pop.stddev - 2.0).abs() < 1e-12);

        let sample = Statistics::of(&vals, Deviation::Sample);
        assert!((sample.stddev - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_statistics_degenerate_inputs() {
        assert_eq!(
            Statistics::of(&[], Deviation::Population),
            Statistics { mean: 0.0, stddev: 0.0 }
        );
        let single = Statistics::of(&[3.0], Deviation::Sample);
        assert_eq!(single.mean, 3.0);
        assert_eq!(single.stddev, 0.0);
        assert_eq!(single.z_score(4.0), None);
    }

    #[test]
    fn test_detect_anomalies_report() {
        let data = [100.0, 101.0, 99.0, 100.0, 102.0, 98.0, 100.0, 160.0];
        let report = detect_anomalies(&data, 2.0, Deviation::Population);
        assert_eq!(report.signals.len(), data.len());
        assert_eq!(report.anomaly_count(), 1);
        assert!(report.signals[7].is_anomaly);
        assert_eq!(report.signals[7].index, 7);
        assert!(report.signals[7].z_score.unwrap() > 2.0);
        assert!(report.upper < 160.0);
        assert!(report.lower < report.statistics.mean);
    }

    #[test]
    fn test_constant_column_has_no_anomalies() {
        let (stats, flags) = flag_anomalies(&[4.0, 4.0, 4.0], 2.0, Deviation::Sample);
        assert_eq!(stats.stddev, 0.0);
        assert_eq!(flags, vec![false, false, false]);
    }

    #[test]
    fn test_deviation_serde() {
        let d: Deviation = serde_json::from_str("\"sample\"").unwrap();
        assert_eq!(d, Deviation::Sample);
        assert_eq!(serde_json::to_string(&Deviation::Population).unwrap(), "\"population\"");
    }
}
