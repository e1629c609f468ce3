//! Qualitative labels derived from metric values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiHealth {
    Low,
    Healthy,
}

/// `Low` for every ROI strictly below the mean of the slice.
pub fn roi_health(values: &[f64]) -> Vec<RoiHealth> {
    if values.is_empty() {
        return vec![];
    }
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    values
        .iter()
        .map(|&v| if v < avg { RoiHealth::Low } else { RoiHealth::Healthy })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    DataQuality,
    TimeSaved,
    Roi,
    Efficiency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiStatus {
    Good,
    Poor,
}

/// Minimum data quality considered good.
pub const DATA_QUALITY_TARGET: f64 = 0.9;

/// Fixed per-KPI thresholds, independent of the rest of the column.
pub fn kpi_status(kind: KpiKind, value: f64) -> KpiStatus {
    let good = match kind {
        KpiKind::DataQuality => value >= DATA_QUALITY_TARGET,
        KpiKind::TimeSaved | KpiKind::Roi | KpiKind::Efficiency => value > 0.0,
    };
    if good {
        KpiStatus::Good
    } else {
        KpiStatus::Poor
    }
}
