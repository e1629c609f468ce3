//! CLI: stdin JSON -> stdout JSON. Host dashboards call this for every metric
//! computation instead of repeating the arithmetic per screen.
//!
//! Usage:
//!   echo '{"columns":[{"name":"ROI","values":[25,30,-5],"k":2.0}]}' | estimation-metrics table
//!   echo '{"values":[100,105,120,98,150],"params":{"k":2.0}}' | estimation-metrics anomaly
//!   echo '{"costs":[...],"benefits":[...]}' | estimation-metrics rpa
//!
//! Logs go to stderr; set `RUST_LOG=estimation_core=debug` for computation detail.
use chrono::{SecondsFormat, Utc};
use estimation_core::metrics::kpi_index;
use estimation_core::{
    assess_rpa, detect_anomalies, dynamic_metrics, summarize_production, AnomalyConfig,
    AnomalyReport, ColumnInput, Deviation, DynamicInputs, LineItem, MetricsError, MetricsTable,
    ProductionRecord, ProductionSummary, RpaAssessment,
};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::{env, io};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Wraps every response with a timestamp and the caller's label, untouched.
#[derive(Debug, Serialize)]
struct Envelope<T> {
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(flatten)]
    body: T,
}

impl<T> Envelope<T> {
    fn new(label: Option<String>, body: T) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            label,
            body,
        }
    }
}

// --- Table ---

#[derive(Debug, Deserialize)]
struct TableInput {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    entities: Option<Vec<String>>,
    #[serde(default)]
    deviation: Deviation,
    columns: Vec<ColumnInput>,
}

#[derive(Debug, Serialize)]
struct TableOutput {
    table: MetricsTable,
}

// --- Dynamic metrics ---

#[derive(Debug, Deserialize)]
struct DynamicInput {
    #[serde(default)]
    label: Option<String>,
    #[serde(flatten)]
    inputs: DynamicInputs,
    params: AnomalyConfig,
}

// --- Anomaly ---

#[derive(Debug, Deserialize)]
struct AnomalyInput {
    #[serde(default)]
    label: Option<String>,
    values: Vec<f64>,
    params: AnomalyConfig,
}

#[derive(Debug, Serialize)]
struct AnomalyOutput {
    report: AnomalyReport,
}

// --- RPA ---

#[derive(Debug, Deserialize)]
struct RpaInput {
    #[serde(default)]
    label: Option<String>,
    costs: Vec<LineItem>,
    benefits: Vec<LineItem>,
}

#[derive(Debug, Serialize)]
struct RpaOutput {
    assessment: RpaAssessment,
}

// --- KPI ---

#[derive(Debug, Deserialize)]
struct KpiInput {
    #[serde(default)]
    label: Option<String>,
    weights: Vec<f64>,
    kpis: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct KpiOutput {
    kpi_index: f64,
}

// --- Production ---

#[derive(Debug, Deserialize)]
struct ProductionInput {
    #[serde(default)]
    label: Option<String>,
    records: Vec<ProductionRecord>,
    params: AnomalyConfig,
}

#[derive(Debug, Serialize)]
struct ProductionOutput {
    summary: ProductionSummary,
}

/// Every classified column's `k` passes the same validation as `params.k`.
fn build_table(input: TableInput) -> Result<MetricsTable, MetricsError> {
    let mut builder = MetricsTable::builder().deviation(input.deviation);
    if let Some(entities) = input.entities {
        builder = builder.entities(entities);
    }
    for column in input.columns {
        if let Some(k) = column.k {
            AnomalyConfig::new(k, input.deviation)?;
        }
        builder = builder.push(column);
    }
    builder.build()
}

fn emit<T: Serialize, W: Write>(out: W, label: Option<String>, body: T) -> CliResult<()> {
    serde_json::to_writer(out, &Envelope::new(label, body))?;
    Ok(())
}

fn run<R: Read, W: Write>(cmd: &str, input: R, out: W) -> CliResult<()> {
    match cmd {
        "table" => {
            let mut input: TableInput = serde_json::from_reader(input)?;
            let label = input.label.take();
            emit(out, label, TableOutput { table: build_table(input)? })
        }
        "dynamic" => {
            let input: DynamicInput = serde_json::from_reader(input)?;
            let metrics = dynamic_metrics(&input.inputs, input.params)?;
            emit(out, input.label, metrics)
        }
        "anomaly" => {
            let input: AnomalyInput = serde_json::from_reader(input)?;
            input.params.validate()?;
            let report = detect_anomalies(&input.values, input.params.k, input.params.deviation);
            emit(out, input.label, AnomalyOutput { report })
        }
        "rpa" => {
            let input: RpaInput = serde_json::from_reader(input)?;
            let assessment = assess_rpa(&input.costs, &input.benefits)?;
            emit(out, input.label, RpaOutput { assessment })
        }
        "kpi" => {
            let input: KpiInput = serde_json::from_reader(input)?;
            let value = kpi_index(&input.weights, &input.kpis)?;
            emit(out, input.label, KpiOutput { kpi_index: value })
        }
        "production" => {
            let input: ProductionInput = serde_json::from_reader(input)?;
            input.params.validate()?;
            let summary =
                summarize_production(&input.records, input.params.k, input.params.deviation);
            emit(out, input.label, ProductionOutput { summary })
        }
        other => Err(format!(
            "unknown command {other:?}; expected table, dynamic, anomaly, rpa, kpi or production"
        )
        .into()),
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("table");
    tracing::debug!(command = cmd, "reading request from stdin");

    run(cmd, io::stdin().lock(), io::stdout().lock())
}
