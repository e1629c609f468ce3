//! The dynamic-metrics pass: raw per-dataset inputs → derived series → one
//! classified table, plus ROI health labels and the efficiency ramp.

use serde::{Deserialize, Serialize};

use crate::config::AnomalyConfig;
use crate::error::Result;
use crate::insight::{roi_health, KpiKind, RoiHealth};
use crate::metrics::{data_quality_series, efficiency_curve, roi_series, time_saved_series};
use crate::models::MetricSeries;
use crate::table::MetricsTable;

/// Parallel per-dataset inputs. Every vector must have the same length.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DynamicInputs {
    #[serde(default)]
    pub entities: Option<Vec<String>>,
    pub error_counts: Vec<u64>,
    pub total_counts: Vec<u64>,
    pub manual_times: Vec<f64>,
    pub automation_rates: Vec<f64>,
    pub cost_saved: Vec<f64>,
    pub project_costs: Vec<f64>,
    pub max_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DynamicMetrics {
    pub table: MetricsTable,
    pub roi_health: Vec<RoiHealth>,
    pub efficiency: MetricSeries,
}

pub fn dynamic_metrics(inputs: &DynamicInputs, config: AnomalyConfig) -> Result<DynamicMetrics> {
    config.validate()?;
    let k = config.k;

    let quality = data_quality_series(&inputs.error_counts, &inputs.total_counts)?;
    let saved = time_saved_series(&inputs.manual_times, &inputs.automation_rates)?;
    let roi = roi_series(&inputs.cost_saved, &inputs.project_costs)?;
    let health = roi_health(&roi);

    let mut builder = MetricsTable::builder()
        .deviation(config.deviation)
        .kpi_column("Data_Quality", quality, k, KpiKind::DataQuality)
        .kpi_column("Time_Saved", saved, k, KpiKind::TimeSaved)
        .kpi_column("ROI", roi, k, KpiKind::Roi);
    if let Some(entities) = &inputs.entities {
        builder = builder.entities(entities.iter().cloned());
    }

    Ok(DynamicMetrics {
        table: builder.build()?,
        roi_health: health,
        efficiency: efficiency_curve(inputs.max_efficiency),
    })
}
