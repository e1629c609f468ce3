//! Daily production summary: per-day totals, outlier days and trend slope.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::anomaly::{Deviation, Statistics};
use crate::models::ProductionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyProduction {
    pub date: NaiveDate,
    pub units: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionSummary {
    /// One entry per calendar day, oldest first.
    pub daily: Vec<DailyProduction>,
    /// Records with negative units. They are still counted in `daily`.
    pub invalid: Vec<ProductionRecord>,
    /// Records dropped for missing units.
    pub dropped: usize,
    pub statistics: Statistics,
    pub anomalies: Vec<DailyProduction>,
    /// Units/day change per step in `daily` (ordinary least squares).
    pub slope: f64,
}

pub fn summarize_production(
    records: &[ProductionRecord],
    k: f64,
    deviation: Deviation,
) -> ProductionSummary {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut invalid = Vec::new();
    let mut dropped = 0usize;

    for rec in records {
        let Some(units) = rec.production_units else {
            dropped += 1;
            continue;
        };
        if units < 0.0 {
            invalid.push(rec.clone());
        }
        *by_date.entry(rec.date).or_insert(0.0) += units;
    }

    if !invalid.is_empty() {
        tracing::warn!(count = invalid.len(), "production records with negative units");
    }
    if dropped > 0 {
        tracing::debug!(dropped, "production records without units skipped");
    }

    let daily: Vec<DailyProduction> = by_date
        .into_iter()
        .map(|(date, units)| DailyProduction { date, units })
        .collect();
    let totals: Vec<f64> = daily.iter().map(|d| d.units).collect();

    let statistics = Statistics::of(&totals, deviation);
    let anomalies = daily
        .iter()
        .filter(|d| statistics.is_anomaly(d.units, k))
        .copied()
        .collect();

    ProductionSummary {
        slope: linear_slope(&totals),
        daily,
        invalid,
        dropped,
        statistics,
        anomalies,
    }
}

/// Simple linear regression slope (Ordinary Least Squares).
fn linear_slope(y: &[f64]) -> f64 {
    let n = y.len() as f64;
    if n < 2.0 {
        return 0.0;
    }
    let x_mean = (n - 1.0) / 2.0;
    let y_mean: f64 = y.iter().sum::<f64>() / n;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &yi) in y.iter().enumerate() {
        let xi = i as f64;
        num += (xi - x_mean) * (yi - y_mean);
        den += (xi - x_mean) * (xi - x_mean);
    }
    if den.abs() < 1e-12 {
        return 0.0;
    }
    num / den
}
