use serde::Deserialize;

use crate::anomaly::Deviation;
use crate::error::{MetricsError, Result};

/// Anomaly threshold parameters. `k` has no default and must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AnomalyConfig {
    pub k: f64,
    #[serde(default)]
    pub deviation: Deviation,
}

impl AnomalyConfig {
    pub fn new(k: f64, deviation: Deviation) -> Result<Self> {
        let config = Self { k, deviation };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.k.is_finite() || self.k < 0.0 {
            return Err(MetricsError::InvalidParameter {
                name: "k".to_string(),
                reason: format!("expected a finite non-negative multiplier, got {}", self.k),
            });
        }
        Ok(())
    }
}
