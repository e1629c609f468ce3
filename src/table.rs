//! Dataset aggregator: merges parallel metric columns into one read-only table
//! with column-local anomaly flags.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::anomaly::{flag_anomalies, Deviation, Statistics};
use crate::error::{ensure_same_len, MetricsError, Result};
use crate::insight::{kpi_status, KpiKind, KpiStatus};
use crate::models::MetricSeries;

/// Input column for the aggregator. `k` of `None` means the column is shown
/// but never classified; `kpi` of `None` means no fixed-threshold status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    pub name: String,
    pub values: MetricSeries,
    #[serde(default)]
    pub k: Option<f64>,
    #[serde(default)]
    pub kpi: Option<KpiKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpi: Option<KpiKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<KpiStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRow {
    pub entity: String,
    pub cells: Vec<Cell>,
}

/// Immutable once built. Rows keep insertion order; cells follow column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsTable {
    deviation: Deviation,
    columns: Vec<ColumnSummary>,
    rows: Vec<MetricsRow>,
}

impl MetricsTable {
    pub fn builder() -> MetricsTableBuilder {
        MetricsTableBuilder::default()
    }

    pub fn deviation(&self) -> Deviation {
        self.deviation
    }

    pub fn columns(&self) -> &[ColumnSummary] {
        &self.columns
    }

    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, entity: &str) -> Option<&MetricsRow> {
        self.rows.iter().find(|r| r.entity == entity)
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    pub fn column_values(&self, name: &str) -> Option<MetricSeries> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r.cells[idx].value).collect())
    }

    /// Entities flagged in `name`, in row order. Empty for unknown or
    /// non-classified columns.
    pub fn anomalies(&self, name: &str) -> Vec<&str> {
        let Some(idx) = self.column_index(name) else {
            return vec![];
        };
        self.rows
            .iter()
            .filter(|r| r.cells[idx].anomaly == Some(true))
            .map(|r| r.entity.as_str())
            .collect()
    }

    pub fn has_anomalies(&self) -> bool {
        self.rows
            .iter()
            .any(|r| r.cells.iter().any(|c| c.anomaly == Some(true)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetricsTableBuilder {
    entities: Option<Vec<String>>,
    deviation: Deviation,
    columns: Vec<ColumnInput>,
}

impl MetricsTableBuilder {
    /// Row identifiers. Defaults to `DS1..DSn` when never set.
    pub fn entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities = Some(entities.into_iter().map(Into::into).collect());
        self
    }

    pub fn deviation(mut self, deviation: Deviation) -> Self {
        self.deviation = deviation;
        self
    }

    /// Column classified with threshold multiplier `k`.
    pub fn column(self, name: impl Into<String>, values: MetricSeries, k: f64) -> Self {
        self.push(ColumnInput {
            name: name.into(),
            values,
            k: Some(k),
            kpi: None,
        })
    }

    /// Classified column that also carries a fixed-threshold KPI status per cell.
    pub fn kpi_column(
        self,
        name: impl Into<String>,
        values: MetricSeries,
        k: f64,
        kind: KpiKind,
    ) -> Self {
        self.push(ColumnInput {
            name: name.into(),
            values,
            k: Some(k),
            kpi: Some(kind),
        })
    }

    /// Column carried through without anomaly flags.
    pub fn plain_column(self, name: impl Into<String>, values: MetricSeries) -> Self {
        self.push(ColumnInput {
            name: name.into(),
            values,
            k: None,
            kpi: None,
        })
    }

    pub fn push(mut self, column: ColumnInput) -> Self {
        self.columns.push(column);
        self
    }

    pub fn build(self) -> Result<MetricsTable> {
        let row_count = match (&self.entities, self.columns.first()) {
            (Some(entities), _) => entities.len(),
            (None, Some(first)) => first.values.len(),
            (None, None) => 0,
        };

        let mut seen_columns = HashSet::new();
        for column in &self.columns {
            if !seen_columns.insert(column.name.as_str()) {
                return Err(MetricsError::DuplicateColumn(column.name.clone()));
            }
            ensure_same_len(
                &format!("metrics_table column {}", column.name),
                row_count,
                column.values.len(),
            )?;
        }

        let entities = match self.entities {
            Some(entities) => entities,
            None => (1..=row_count).map(|i| format!("DS{i}")).collect(),
        };
        let mut seen_entities = HashSet::new();
        for entity in &entities {
            if !seen_entities.insert(entity.as_str()) {
                return Err(MetricsError::DuplicateEntity(entity.clone()));
            }
        }

        let mut summaries = Vec::with_capacity(self.columns.len());
        let mut flags: Vec<Option<Vec<bool>>> = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            match column.k {
                Some(k) => {
                    let (statistics, column_flags) =
                        flag_anomalies(&column.values, k, self.deviation);
                    summaries.push(ColumnSummary {
                        name: column.name.clone(),
                        k: Some(k),
                        statistics: Some(statistics),
                        kpi: column.kpi,
                    });
                    flags.push(Some(column_flags));
                }
                None => {
                    summaries.push(ColumnSummary {
                        name: column.name.clone(),
                        k: None,
                        statistics: None,
                        kpi: column.kpi,
                    });
                    flags.push(None);
                }
            }
        }

        let rows = entities
            .into_iter()
            .enumerate()
            .map(|(i, entity)| MetricsRow {
                entity,
                cells: self
                    .columns
                    .iter()
                    .zip(&flags)
                    .map(|(column, column_flags)| Cell {
                        value: column.values[i],
                        anomaly: column_flags.as_ref().map(|f| f[i]),
                        status: column.kpi.map(|kind| kpi_status(kind, column.values[i])),
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            rows = rows.len(),
            columns = summaries.len(),
            deviation = ?self.deviation,
            "metrics table built"
        );

        Ok(MetricsTable {
            deviation: self.deviation,
            columns: summaries,
            rows,
        })
    }
}
