//! Calculation engine: validation followed by drug dispatch.
//!
//! This is the single entry point the presentation layer needs:
//! 1. Validate weight and dose rate (Benlysta uses its fixed rate)
//! 2. Stop with `Error::InvalidInput` if validation fails
//! 3. Run the calculator matching the prescription
//! 4. Return the result together with any advisories

use crate::validation::{validate, Advisory};
use crate::{benlysta, remicade, tepezza, DoseRequest, DoseResult, Prescription, Result};
use serde::{Deserialize, Serialize};

/// A dose result and the advisories raised while validating its inputs
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Calculation {
    pub result: DoseResult,
    pub advisories: Vec<Advisory>,
}

/// Validate a request and compute its preparation
pub fn calculate(request: &DoseRequest) -> Result<Calculation> {
    let prescription = request.prescription;
    let outcome = validate(request.weight_kg, prescription.dose_mg_per_kg())?;

    tracing::info!(
        "Calculating {} for {} kg at {} mg/kg",
        prescription.drug(),
        request.weight_kg,
        prescription.dose_mg_per_kg()
    );

    let result = match prescription {
        Prescription::Tepezza { dose_mg_per_kg } => {
            tepezza::compute(request.weight_kg, dose_mg_per_kg)
        }
        Prescription::Remicade {
            dose_mg_per_kg,
            infusion,
        } => remicade::compute(request.weight_kg, dose_mg_per_kg, infusion),
        Prescription::Benlysta => benlysta::compute(request.weight_kg),
    };

    Ok(Calculation {
        result,
        advisories: outcome.advisories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BagSize, Drug, Error, InfusionType};

    fn request(weight_kg: f64, prescription: Prescription) -> DoseRequest {
        DoseRequest {
            weight_kg,
            prescription,
        }
    }

    #[test]
    fn test_dispatches_to_matching_calculator() {
        crate::logging::init_test();

        let tepezza = calculate(&request(70.0, Prescription::Tepezza { dose_mg_per_kg: 10.0 }))
            .unwrap();
        assert_eq!(tepezza.result.drug, Drug::Tepezza);
        assert_eq!(tepezza.result, tepezza::compute(70.0, 10.0));

        let remicade = calculate(&request(
            70.0,
            Prescription::Remicade {
                dose_mg_per_kg: 5.0,
                infusion: InfusionType::Induction,
            },
        ))
        .unwrap();
        assert_eq!(remicade.result.drug, Drug::Remicade);
        assert_eq!(remicade.result.infusion_type, Some(InfusionType::Induction));

        let benlysta = calculate(&request(70.0, Prescription::Benlysta)).unwrap();
        assert_eq!(benlysta.result.drug, Drug::Benlysta);
        assert_eq!(benlysta.result.dose_mg_per_kg, 10.0);
        assert_eq!(benlysta.result.waste_mg, Some(60.0));
    }

    #[test]
    fn test_invalid_input_blocks_calculation() {
        let err = calculate(&request(0.0, Prescription::Benlysta)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = calculate(&request(
            70.0,
            Prescription::Remicade {
                dose_mg_per_kg: -5.0,
                infusion: InfusionType::Standard,
            },
        ))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_high_weight_proceeds_with_advisory() {
        let calc =
            calculate(&request(520.0, Prescription::Tepezza { dose_mg_per_kg: 10.0 })).unwrap();
        assert_eq!(calc.advisories.len(), 1);
        assert_eq!(calc.result.bag, BagSize::Single { volume_ml: 250 });
    }

    #[test]
    fn test_normal_weight_has_no_advisories() {
        let calc = calculate(&request(70.0, Prescription::Benlysta)).unwrap();
        assert!(calc.advisories.is_empty());
    }

    #[test]
    fn test_repeated_calculation_is_identical() {
        let req = request(
            91.3,
            Prescription::Remicade {
                dose_mg_per_kg: 10.0,
                infusion: InfusionType::Enhanced,
            },
        );
        assert_eq!(calculate(&req).unwrap(), calculate(&req).unwrap());
    }

    #[test]
    fn test_calculation_serializes_to_json() {
        let calc = calculate(&request(70.0, Prescription::Benlysta)).unwrap();
        let json = serde_json::to_value(&calc).unwrap();
        assert_eq!(json["result"]["drug"], "benlysta");
        assert_eq!(json["result"]["waste_mg"], 60.0);
        assert_eq!(json["result"]["bag"]["kind"], "single");
        assert!(json["result"].get("infusion_type").is_none());

        let parsed: Calculation = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, calc);
    }
}
