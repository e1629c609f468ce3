use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One value per dataset/entity, in entity order.
pub type MetricSeries = Vec<f64>;

// Accepts "2024-01-05" as well as full timestamps like "2024-01-05T08:00:00".
fn deserialize_report_date<'de, D>(d: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    let s = s.trim();
    let prefix = s.get(..s.len().min(10)).unwrap_or(s);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

/// A single row from a factory production report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    #[serde(deserialize_with = "deserialize_report_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default)]
    pub production_units: Option<f64>,
}

/// A named cost or benefit amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub component: String,
    pub amount: f64,
}

impl LineItem {
    pub fn new(component: impl Into<String>, amount: f64) -> Self {
        Self {
            component: component.into(),
            amount,
        }
    }
}
