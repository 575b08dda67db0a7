//! Input validation run before any calculator.
//!
//! Non-positive weight or dose blocks the calculation. An unusually high
//! weight only produces an advisory.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weights strictly above this (kg) are flagged for verification
pub const HIGH_WEIGHT_ADVISORY_KG: f64 = 500.0;

/// Non-fatal warning attached to a valid request
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    HighWeight { weight_kg: f64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::HighWeight { .. } => {
                f.write_str("Weight seems unusually high. Please verify.")
            }
        }
    }
}

/// Result of a successful validation
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationOutcome {
    pub advisories: Vec<Advisory>,
}

impl ValidationOutcome {
    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }
}

/// Validate weight and dose rate
///
/// Returns `Error::InvalidInput` when either value is not a positive,
/// finite number. NaN and infinities are rejected along with zero and
/// negatives.
pub fn validate(weight_kg: f64, dose_mg_per_kg: f64) -> Result<ValidationOutcome> {
    if !is_positive(weight_kg) || !is_positive(dose_mg_per_kg) {
        return Err(Error::InvalidInput(format!(
            "weight and dose must be greater than 0 (weight: {} kg, dose: {} mg/kg)",
            weight_kg, dose_mg_per_kg
        )));
    }

    let mut outcome = ValidationOutcome::default();

    if weight_kg > HIGH_WEIGHT_ADVISORY_KG {
        tracing::info!("Weight {} kg exceeds {} kg", weight_kg, HIGH_WEIGHT_ADVISORY_KG);
        outcome.advisories.push(Advisory::HighWeight { weight_kg });
    }

    Ok(outcome)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
