//! Estimation core: metric functions, column-local anomaly detection and
//! KPI table aggregation. Stateless; every call is a pure function of its inputs.

pub mod anomaly;
pub mod config;
pub mod dynamic;
mod error;
pub mod insight;
pub mod metrics;
mod models;
pub mod rpa;
pub mod table;
pub mod trend;

#[cfg(test)]
mod property_tests;

pub use anomaly::{detect_anomalies, is_anomaly, AnomalyReport, AnomalySignal, Deviation, Statistics};
pub use config::AnomalyConfig;
pub use dynamic::{dynamic_metrics, DynamicInputs, DynamicMetrics};
pub use error::{MetricsError, Result};
pub use models::{LineItem, MetricSeries, ProductionRecord};
pub use rpa::{assess as assess_rpa, Profitability, RpaAssessment};
pub use table::{ColumnInput, MetricsTable, MetricsTableBuilder};
pub use trend::{summarize_production, ProductionSummary};
