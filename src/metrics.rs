//! Metric functions: scalar forms plus elementwise series over parallel inputs.
//!
//! Series forms never truncate or pad. Inputs of different lengths are rejected
//! with `ShapeMismatch` before any value is computed.

use crate::error::{ensure_same_len, MetricsError, Result};
use crate::models::MetricSeries;

/// Length of the efficiency ramp window in days.
pub const RAMP_DAYS: i64 = 90;

/// Hours (or any time unit) saved by automating a share of manual work.
pub fn time_saved(manual_time: f64, automation_rate: f64) -> f64 {
    manual_time * automation_rate
}

/// Return on investment in percent.
pub fn roi(cost_saved: f64, project_cost: f64) -> Result<f64> {
    if project_cost == 0.0 {
        tracing::warn!(cost_saved, "roi requested with zero project cost");
        return Err(MetricsError::DivisionByZero {
            operation: "roi".to_string(),
        });
    }
    Ok(((cost_saved - project_cost) / project_cost) * 100.0)
}

/// Share of error-free records. An empty dataset scores 0.0 rather than failing.
pub fn data_quality(error_count: u64, total_count: u64) -> f64 {
    if total_count == 0 {
        return 0.0;
    }
    1.0 - (error_count as f64 / total_count as f64)
}

/// Linear ramp from 0 to `max_efficiency` over the first 90 days.
/// Days outside `[0, 90]` are clamped, never extrapolated.
pub fn efficiency_over_time(day: i64, max_efficiency: f64) -> f64 {
    let day = day.clamp(0, RAMP_DAYS);
    max_efficiency * (day as f64 / RAMP_DAYS as f64)
}

/// Weighted average of KPIs. Zero total weight yields 0.0.
pub fn kpi_index(weights: &[f64], kpis: &[f64]) -> Result<f64> {
    ensure_same_len("kpi_index", weights.len(), kpis.len())?;
    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 {
        return Ok(0.0);
    }
    let weighted: f64 = weights.iter().zip(kpis).map(|(w, k)| w * k).sum();
    Ok(weighted / total_weight)
}

/// Probability that ETL, RPA and reporting stages all succeed.
pub fn pipeline_success(p_etl: f64, p_rpa: f64, p_report: f64) -> f64 {
    p_etl * p_rpa * p_report
}

/// Confidentiality × integrity × availability.
pub fn secure_system_index(confidentiality: f64, integrity: f64, availability: f64) -> f64 {
    confidentiality * integrity * availability
}

pub fn total_improvement(site_count: u32, unit_scaling: f64) -> f64 {
    f64::from(site_count) * unit_scaling
}

/// Sum of the performance vector plus every row of the contribution matrix.
pub fn system_optimization(performance: &[f64], contributions: &[Vec<f64>]) -> f64 {
    contributions
        .iter()
        .flatten()
        .chain(performance)
        .fold(0.0, |acc, x| acc + x)
}

pub fn time_saved_series(manual_times: &[f64], automation_rates: &[f64]) -> Result<MetricSeries> {
    ensure_same_len("time_saved_series", manual_times.len(), automation_rates.len())?;
    Ok(manual_times
        .iter()
        .zip(automation_rates)
        .map(|(&t, &r)| time_saved(t, r))
        .collect())
}

/// Fails on the first zero project cost, naming its position.
pub fn roi_series(cost_saved: &[f64], project_costs: &[f64]) -> Result<MetricSeries> {
    ensure_same_len("roi_series", cost_saved.len(), project_costs.len())?;
    cost_saved
        .iter()
        .zip(project_costs)
        .enumerate()
        .map(|(i, (&saved, &cost))| {
            roi(saved, cost).map_err(|_| MetricsError::DivisionByZero {
                operation: format!("roi_series[{i}]"),
            })
        })
        .collect()
}

pub fn data_quality_series(error_counts: &[u64], total_counts: &[u64]) -> Result<MetricSeries> {
    ensure_same_len("data_quality_series", error_counts.len(), total_counts.len())?;
    Ok(error_counts
        .iter()
        .zip(total_counts)
        .map(|(&e, &t)| data_quality(e, t))
        .collect())
}

pub fn pipeline_success_series(
    p_etl: &[f64],
    p_rpa: &[f64],
    p_report: &[f64],
) -> Result<MetricSeries> {
    ensure_same_len("pipeline_success_series", p_etl.len(), p_rpa.len())?;
    ensure_same_len("pipeline_success_series", p_etl.len(), p_report.len())?;
    Ok(p_etl
        .iter()
        .zip(p_rpa)
        .zip(p_report)
        .map(|((&e, &r), &p)| pipeline_success(e, r, p))
        .collect())
}

pub fn secure_system_series(
    confidentiality: &[f64],
    integrity: &[f64],
    availability: &[f64],
) -> Result<MetricSeries> {
    ensure_same_len("secure_system_series", confidentiality.len(), integrity.len())?;
    ensure_same_len("secure_system_series", confidentiality.len(), availability.len())?;
    Ok(confidentiality
        .iter()
        .zip(integrity)
        .zip(availability)
        .map(|((&c, &i), &a)| secure_system_index(c, i, a))
        .collect())
}

pub fn total_improvement_series(site_counts: &[u32], unit_scaling: &[f64]) -> Result<MetricSeries> {
    ensure_same_len("total_improvement_series", site_counts.len(), unit_scaling.len())?;
    Ok(site_counts
        .iter()
        .zip(unit_scaling)
        .map(|(&n, &s)| total_improvement(n, s))
        .collect())
}

/// Efficiency for every day of the ramp window, day 0 through day 90 inclusive.
pub fn efficiency_curve(max_efficiency: f64) -> MetricSeries {
    (0..=RAMP_DAYS)
        .map(|day| efficiency_over_time(day, max_efficiency))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_time_saved() {
        assert!(approx(time_saved(100.0, 0.6), 60.0));
        assert!(approx(time_saved(-10.0, 0.5), -5.0));
    }

    #[test]
    fn test_roi() {
        assert_eq!(roi(20000.0, 5000.0).unwrap(), 300.0);
        assert_eq!(roi(5000.0, 10000.0).unwrap(), -50.0);
    }

    #[test]
    fn test_roi_zero_cost_fails() {
        for saved in [0.0, 1.0, -250.0, 1e9] {
            assert!(matches!(
                roi(saved, 0.0),
                Err(MetricsError::DivisionByZero { .. })
            ));
        }
    }

    #[test]
    fn test_data_quality() {
        assert_eq!(data_quality(0, 100), 1.0);
        assert!(approx(data_quality(20, 100), 0.8));
        assert_eq!(data_quality(0, 0), 0.0);
        assert_eq!(data_quality(7, 0), 0.0);
    }

    #[test]
    fn test_efficiency_clamps() {
        assert_eq!(efficiency_over_time(-5, 1.0), 0.0);
        assert_eq!(efficiency_over_time(45, 1.0), 0.5);
        assert_eq!(efficiency_over_time(200, 1.0), 1.0);
        assert!(approx(efficiency_over_time(90, 1.5), 1.5));
    }

    #[test]
    fn test_kpi_index() {
        assert_eq!(kpi_index(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]).unwrap(), 0.0);
        assert!(approx(kpi_index(&[1.0, 1.0], &[2.0, 4.0]).unwrap(), 3.0));
        assert!(approx(kpi_index(&[3.0, 1.0], &[1.0, 5.0]).unwrap(), 2.0));
    }

    #[test]
    fn test_kpi_index_shape_mismatch() {
        let err = kpi_index(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            MetricsError::ShapeMismatch {
                operation: "kpi_index".to_string(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_products() {
        assert!(approx(pipeline_success(0.9, 0.8, 0.5), 0.36));
        assert!(approx(secure_system_index(0.99, 0.98, 0.97), 0.99 * 0.98 * 0.97));
        assert!(approx(total_improvement(12, 1.5), 18.0));
    }

    #[test]
    fn test_system_optimization() {
        let total = system_optimization(&[1.0, 2.0], &[vec![0.5, 0.5], vec![3.0]]);
        assert!(approx(total, 7.0));
        let empty = system_optimization(&[], &[]);
        assert_eq!(empty, 0.0);
        assert!(empty.is_sign_positive());
    }

    #[test]
    fn test_series_reject_mismatch() {
        assert!(time_saved_series(&[1.0, 2.0], &[0.5]).is_err());
        assert!(data_quality_series(&[1], &[10, 20]).is_err());
        assert!(pipeline_success_series(&[0.9], &[0.9], &[]).is_err());
        assert!(secure_system_series(&[1.0], &[], &[1.0]).is_err());
        assert!(total_improvement_series(&[1, 2], &[1.0]).is_err());
        assert!(roi_series(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_roi_series_names_failing_index() {
        let err = roi_series(&[100.0, 200.0, 300.0], &[50.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            MetricsError::DivisionByZero {
                operation: "roi_series[1]".to_string(),
            }
        );
    }

    #[test]
    fn test_series_values() {
        let ts = time_saved_series(&[100.0, 120.0, 90.0], &[0.6, 0.5, 0.7]).unwrap();
        assert!(approx(ts[0], 60.0) && approx(ts[1], 60.0) && approx(ts[2], 63.0));

        let r = roi_series(&[20000.0, 15000.0], &[5000.0, 7500.0]).unwrap();
        assert_eq!(r, vec![300.0, 100.0]);

        let dq = data_quality_series(&[5, 2, 0], &[100, 50, 0]).unwrap();
        assert!(approx(dq[0], 0.95) && approx(dq[1], 0.96));
        assert_eq!(dq[2], 0.0);
    }

    #[test]
    fn test_efficiency_curve_shape() {
        let curve = efficiency_curve(1.2);
        assert_eq!(curve.len(), 91);
        assert_eq!(curve[0], 0.0);
        assert!(approx(curve[90], 1.2));
        assert!(curve.windows(2).all(|w| w[1] >= w[0]));
    }
}
