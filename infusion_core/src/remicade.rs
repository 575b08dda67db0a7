//! Remicade (infliximab) preparation.
//!
//! 100 mg vials reconstituted to 10 mg/mL. Bag size is tiered by total dose:
//! - above 2000 mg: two 500 mL bags
//! - above 1000 mg: one 500 mL bag
//! - otherwise: one 250 mL bag

use crate::{BagSize, DoseResult, Drug, InfusionType, Vials};

/// Reconstituted concentration (mg/mL)
pub const CONCENTRATION_MG_PER_ML: f64 = 10.0;

/// Drug content of one vial (mg)
pub const VIAL_MG: u32 = 100;

/// Select the NS bag(s) for a total dose, evaluated high to low
pub fn bag_for_dose(total_dose_mg: f64) -> BagSize {
    if total_dose_mg > 2000.0 {
        BagSize::Pair { each_ml: 500 }
    } else if total_dose_mg > 1000.0 {
        BagSize::Single { volume_ml: 500 }
    } else {
        BagSize::Single { volume_ml: 250 }
    }
}

/// Compute the Remicade preparation for validated, positive inputs
pub fn compute(weight_kg: f64, dose_mg_per_kg: f64, infusion: InfusionType) -> DoseResult {
    let total_dose_mg = weight_kg * dose_mg_per_kg;
    let volume_required_ml = total_dose_mg / CONCENTRATION_MG_PER_ML;
    let vials_needed = (total_dose_mg / f64::from(VIAL_MG)).ceil() as u32;

    let bag = bag_for_dose(total_dose_mg);
    let remaining_bag_volume_ml = bag.volume_ml() - volume_required_ml;

    tracing::debug!(
        "Remicade ({}): {:.1} mg, {:.1} mL, {} vial(s), {}",
        infusion,
        total_dose_mg,
        volume_required_ml,
        vials_needed,
        bag
    );

    let preparation_steps = vec![
        format!("Use a {} 0.9% Sodium Chloride bag", bag),
        format!("Withdraw {:.1} mL using 21g needle", volume_required_ml),
        format!("Inject 10 mL NS into each of the {} vial(s)", vials_needed),
        format!(
            "Return {:.1} mL to the remaining {:.1} mL in the NS bag",
            volume_required_ml, remaining_bag_volume_ml
        ),
        "Attach 0.2-micron filtered tubing".to_string(),
    ];

    let notes = vec![
        format!("Concentration: {} mg/mL", CONCENTRATION_MG_PER_ML),
        "Final infusion concentration: 0.4–4.0 mg/mL".to_string(),
        "Use immediately or refrigerate (good for 24 hrs)".to_string(),
        infusion.rate_instruction().to_string(),
    ];

    DoseResult {
        drug: Drug::Remicade,
        weight_kg,
        dose_mg_per_kg,
        infusion_type: Some(infusion),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vials_round_up() {
        let result = compute(50.0, 5.0, InfusionType::Standard);
        assert_eq!(result.total_dose_mg, 250.0);
        assert_eq!(result.vials.total_count(), 3);

        let result = compute(40.0, 5.0, InfusionType::Standard);
        assert_eq!(result.total_dose_mg, 200.0);
        assert_eq!(result.vials.total_count(), 2);
    }

    #[test]
    fn test_volume_at_ten_mg_per_ml() {
        let result = compute(70.0, 5.0, InfusionType::Induction);
        assert_eq!(result.volume_required_ml, 35.0);
        assert_eq!(result.remaining_bag_volume_ml, 215.0);
    }

    #[test]
    fn test_bag_tier_boundaries() {
        assert_eq!(bag_for_dose(1000.0), BagSize::Single { volume_ml: 250 });
        assert_eq!(bag_for_dose(1000.1), BagSize::Single { volume_ml: 500 });
        assert_eq!(bag_for_dose(2000.0), BagSize::Single { volume_ml: 500 });
        assert_eq!(bag_for_dose(2000.1), BagSize::Pair { each_ml: 500 });
    }

    #[test]
    fn test_two_bags_use_combined_volume() {
        let result = compute(210.0, 10.0, InfusionType::Standard);
        assert_eq!(result.bag.label(), "two 500 mL bags");
        assert_eq!(result.bag_volume_ml(), 1000.0);
        assert_eq!(result.remaining_bag_volume_ml, 1000.0 - 210.0);
    }

    #[test]
    fn test_rate_instruction_in_notes() {
        for infusion in InfusionType::ALL {
            let result = compute(70.0, 5.0, infusion);
            assert_eq!(result.infusion_type, Some(infusion));
            assert_eq!(
                result.notes.last().map(String::as_str),
                Some(infusion.rate_instruction())
            );
        }
    }

    #[test]
    fn test_preparation_text() {
        let result = compute(70.0, 5.0, InfusionType::Standard);
        assert_eq!(
            result.preparation_steps,
            vec![
                "Use a 250 mL 0.9% Sodium Chloride bag",
                "Withdraw 35.0 mL using 21g needle",
                "Inject 10 mL NS into each of the 4 vial(s)",
                "Return 35.0 mL to the remaining 215.0 mL in the NS bag",
                "Attach 0.2-micron filtered tubing",
            ]
        );
        assert_eq!(result.notes[0], "Concentration: 10 mg/mL");
        assert_eq!(result.notes[1], "Final infusion concentration: 0.4–4.0 mg/mL");
    }

    #[test]
    fn test_idempotent() {
        let a = compute(88.8, 7.5, InfusionType::Enhanced);
        let b = compute(88.8, 7.5, InfusionType::Enhanced);
        assert_eq!(a, b);
    }
}
