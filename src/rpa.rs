//! Cost/benefit ROI assessment for robotic process automation projects.

use serde::Serialize;

use crate::error::{MetricsError, Result};
use crate::metrics::roi;
use crate::models::LineItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Profitability {
    Profitable,
    BreakEven,
    NotProfitable,
}

impl Profitability {
    pub fn from_roi(roi_percent: f64) -> Self {
        if roi_percent > 0.0 {
            Self::Profitable
        } else if roi_percent == 0.0 {
            Self::BreakEven
        } else {
            Self::NotProfitable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpaAssessment {
    pub total_costs: f64,
    pub total_benefits: f64,
    pub roi_percent: f64,
    pub verdict: Profitability,
}

/// Totals both sides and computes ROI of benefits over costs.
/// Zero total cost is a `DivisionByZero`, not a silent 0%.
pub fn assess(costs: &[LineItem], benefits: &[LineItem]) -> Result<RpaAssessment> {
    // fold from +0.0 so an empty side totals 0.0, not -0.0
    let total_costs = costs.iter().fold(0.0, |acc, c| acc + c.amount);
    let total_benefits = benefits.iter().fold(0.0, |acc, b| acc + b.amount);

    let roi_percent = roi(total_benefits, total_costs).map_err(|_| MetricsError::DivisionByZero {
        operation: "rpa total costs".to_string(),
    })?;
    let verdict = Profitability::from_roi(roi_percent);

    tracing::debug!(total_costs, total_benefits, roi_percent, ?verdict, "rpa assessment");
    Ok(RpaAssessment {
        total_costs,
        total_benefits,
        roi_percent,
        verdict,
    })
}
