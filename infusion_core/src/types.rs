//! Core domain types for the infusion calculator.
//!
//! This module defines the values that flow through a single calculation:
//! - Drugs and Remicade infusion protocols
//! - Dose requests (tagged per drug)
//! - Vial and IV bag descriptions
//! - The structured dose result handed to the presentation layer

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Drugs
// ============================================================================

/// Medications the calculator knows how to prepare
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Drug {
    Tepezza,
    Remicade,
    Benlysta,
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Drug::Tepezza => "Tepezza",
            Drug::Remicade => "Remicade",
            Drug::Benlysta => "Benlysta",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Infusion Types
// ============================================================================

/// Remicade infusion protocol
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InfusionType {
    Induction,
    Standard,
    Enhanced,
}

impl InfusionType {
    /// All protocols, in the order they are offered to users
    pub const ALL: [InfusionType; 3] = [
        InfusionType::Induction,
        InfusionType::Standard,
        InfusionType::Enhanced,
    ];

    /// Infusion-rate instruction for this protocol
    pub fn rate_instruction(self) -> &'static str {
        match self {
            InfusionType::Induction => "Infuse over 2+ hours at 250 mL/hr",
            InfusionType::Standard => "Infuse over 2 hours at 125 mL/hr",
            InfusionType::Enhanced => "Infuse over 1 hour at 250 mL/hr",
        }
    }
}

impl fmt::Display for InfusionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InfusionType::Induction => "Induction",
            InfusionType::Standard => "Standard",
            InfusionType::Enhanced => "Enhanced",
        };
        f.write_str(name)
    }
}

impl FromStr for InfusionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "induction" => Ok(InfusionType::Induction),
            "standard" => Ok(InfusionType::Standard),
            "enhanced" => Ok(InfusionType::Enhanced),
            _ => Err(Error::UnknownInfusionType(s.to_string())),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Drug-specific part of a dose request
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "drug", rename_all = "snake_case")]
pub enum Prescription {
    Tepezza {
        dose_mg_per_kg: f64,
    },
    Remicade {
        dose_mg_per_kg: f64,
        infusion: InfusionType,
    },
    /// Benlysta is always dosed at [`crate::benlysta::DOSE_MG_PER_KG`]
    Benlysta,
}

impl Prescription {
    pub fn drug(&self) -> Drug {
        match self {
            Prescription::Tepezza { .. } => Drug::Tepezza,
            Prescription::Remicade { .. } => Drug::Remicade,
            Prescription::Benlysta => Drug::Benlysta,
        }
    }

    /// Dose rate in mg/kg, including the fixed Benlysta rate
    pub fn dose_mg_per_kg(&self) -> f64 {
        match *self {
            Prescription::Tepezza { dose_mg_per_kg } => dose_mg_per_kg,
            Prescription::Remicade { dose_mg_per_kg, .. } => dose_mg_per_kg,
            Prescription::Benlysta => crate::benlysta::DOSE_MG_PER_KG,
        }
    }
}

/// Input to a single dosing calculation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DoseRequest {
    pub weight_kg: f64,
    pub prescription: Prescription,
}

// ============================================================================
// Vials and Bags
// ============================================================================

/// Number of vials of a given strength
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct VialCount {
    pub vial_mg: u32,
    pub count: u32,
}

/// Vials to pull for one preparation, largest strength first
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vials(pub Vec<VialCount>);

impl Vials {
    /// A single strength
    pub fn uniform(vial_mg: u32, count: u32) -> Self {
        Vials(vec![VialCount { vial_mg, count }])
    }

    /// Total number of vials across all strengths
    pub fn total_count(&self) -> u32 {
        self.0.iter().map(|v| v.count).sum()
    }

    /// Count for a specific strength, 0 if absent
    pub fn count_of(&self, vial_mg: u32) -> u32 {
        self.0
            .iter()
            .filter(|v| v.vial_mg == vial_mg)
            .map(|v| v.count)
            .sum()
    }
}

impl fmt::Display for Vials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{}", single.count),
            lines => {
                let parts: Vec<String> = lines
                    .iter()
                    .map(|v| format!("{} x {} mg", v.count, v.vial_mg))
                    .collect();
                f.write_str(&parts.join(" and "))
            }
        }
    }
}

/// 0.9% Sodium Chloride bag(s) used as diluent and infusion vehicle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BagSize {
    Single { volume_ml: u32 },
    Pair { each_ml: u32 },
}

impl BagSize {
    /// Combined volume of all bags
    pub fn volume_ml(&self) -> f64 {
        match *self {
            BagSize::Single { volume_ml } => f64::from(volume_ml),
            BagSize::Pair { each_ml } => f64::from(each_ml) * 2.0,
        }
    }

    /// Label as shown on the preparation sheet
    pub fn label(&self) -> String {
        match self {
            BagSize::Single { volume_ml } => format!("{} mL", volume_ml),
            BagSize::Pair { each_ml } => format!("two {} mL bags", each_ml),
        }
    }
}

impl fmt::Display for BagSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Structured outcome of one dosing calculation
///
/// Produced fresh per call. Rendering belongs to the caller.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DoseResult {
    pub drug: Drug,
    pub weight_kg: f64,
    pub dose_mg_per_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infusion_type: Option<InfusionType>,
    pub total_dose_mg: f64,
    /// Drug volume to add to the bag (reconstituted total for Benlysta)
    pub volume_required_ml: f64,
    pub vials: Vials,
    pub bag: BagSize,
    pub remaining_bag_volume_ml: f64,
    /// Drug actually supplied by the selected vials (Benlysta only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_mg: Option<f64>,
    pub preparation_steps: Vec<String>,
    pub notes: Vec<String>,
}

impl DoseResult {
    /// Combined volume of the IV bag(s)
    pub fn bag_volume_ml(&self) -> f64 {
        self.bag.volume_ml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_infusion_types() {
        assert_eq!(
            "induction".parse::<InfusionType>().unwrap(),
            InfusionType::Induction
        );
        assert_eq!(
            "Standard".parse::<InfusionType>().unwrap(),
            InfusionType::Standard
        );
        assert_eq!(
            " ENHANCED ".parse::<InfusionType>().unwrap(),
            InfusionType::Enhanced
        );
    }

    #[test]
    fn test_unknown_infusion_type_is_rejected() {
        match "maintenance".parse::<InfusionType>() {
            Err(Error::UnknownInfusionType(s)) => assert_eq!(s, "maintenance"),
            other => panic!("Expected UnknownInfusionType, got {:?}", other),
        }
        assert!("".parse::<InfusionType>().is_err());
    }

    #[test]
    fn test_every_infusion_type_has_a_rate() {
        for infusion in InfusionType::ALL {
            assert!(infusion.rate_instruction().starts_with("Infuse over"));
            // Display round-trips through FromStr
            let parsed: InfusionType = infusion.to_string().parse().unwrap();
            assert_eq!(parsed, infusion);
        }
    }

    #[test]
    fn test_bag_labels_and_volumes() {
        let single = BagSize::Single { volume_ml: 250 };
        assert_eq!(single.label(), "250 mL");
        assert_eq!(single.volume_ml(), 250.0);

        let pair = BagSize::Pair { each_ml: 500 };
        assert_eq!(pair.label(), "two 500 mL bags");
        assert_eq!(pair.volume_ml(), 1000.0);
    }

    #[test]
    fn test_vials_display() {
        assert_eq!(Vials::uniform(500, 2).to_string(), "2");

        let mixed = Vials(vec![
            VialCount { vial_mg: 400, count: 1 },
            VialCount { vial_mg: 120, count: 3 },
        ]);
        assert_eq!(mixed.to_string(), "1 x 400 mg and 3 x 120 mg");
        assert_eq!(mixed.total_count(), 4);
        assert_eq!(mixed.count_of(120), 3);
        assert_eq!(mixed.count_of(100), 0);
    }

    #[test]
    fn test_prescription_dose_rates() {
        let p = Prescription::Remicade {
            dose_mg_per_kg: 5.0,
            infusion: InfusionType::Standard,
        };
        assert_eq!(p.drug(), Drug::Remicade);
        assert_eq!(p.dose_mg_per_kg(), 5.0);
        assert_eq!(Prescription::Benlysta.dose_mg_per_kg(), 10.0);
    }
}
