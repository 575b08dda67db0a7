//! Tepezza (teprotumumab) preparation.
//!
//! 500 mg vials reconstituted with 10 mL SWFI to 47.6 mg/mL, diluted in a
//! 100 mL or 250 mL NS bag depending on total dose.

use crate::{BagSize, DoseResult, Drug, Vials};

/// Reconstituted concentration (mg/mL)
pub const CONCENTRATION_MG_PER_ML: f64 = 47.6;

/// Drug content of one vial (mg)
pub const VIAL_MG: u32 = 500;

/// Doses strictly above this (mg) go into the larger bag
pub const LARGE_BAG_THRESHOLD_MG: f64 = 1800.0;

/// Compute the Tepezza preparation for validated, positive inputs
pub fn compute(weight_kg: f64, dose_mg_per_kg: f64) -> DoseResult {
    let total_dose_mg = weight_kg * dose_mg_per_kg;
    let volume_required_ml = total_dose_mg / CONCENTRATION_MG_PER_ML;
    let vials_needed = (total_dose_mg / f64::from(VIAL_MG)).ceil() as u32;

    let bag = if total_dose_mg > LARGE_BAG_THRESHOLD_MG {
        BagSize::Single { volume_ml: 250 }
    } else {
        BagSize::Single { volume_ml: 100 }
    };
    let remaining_bag_volume_ml = bag.volume_ml() - volume_required_ml;

    tracing::debug!(
        "Tepezza: {:.1} mg, {:.1} mL, {} vial(s), {} bag",
        total_dose_mg,
        volume_required_ml,
        vials_needed,
        bag
    );

    let preparation_steps = vec![
        format!("Use a {} 0.9% Sodium Chloride bag", bag),
        format!("Withdraw {:.1} mL from the bag", volume_required_ml),
        format!(
            "Inject 10 mL of SWFI into each of the {} vial(s)",
            vials_needed
        ),
        format!(
            "Return {:.1} mL to the remaining {:.1} mL in the NS bag",
            volume_required_ml, remaining_bag_volume_ml
        ),
    ];

    let notes = vec![
        format!("Concentration: {} mg/mL", CONCENTRATION_MG_PER_ML),
        "Stability: Use within 24 hours or refrigerate".to_string(),
        "Administer over 90 mins (1–2 infusions), then 60 mins (3–8 infusions)".to_string(),
    ];

    DoseResult {
        drug: Drug::Tepezza,
        weight_kg,
        dose_mg_per_kg,
        infusion_type: None,
        total_dose_mg,
        volume_required_ml,
        vials: Vials::uniform(VIAL_MG, vials_needed),
        bag,
        remaining_bag_volume_ml,
        delivered_mg: None,
        waste_mg: None,
        preparation_steps,
        notes,
    }
}
