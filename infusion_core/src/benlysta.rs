//! Benlysta (belimumab) preparation.
//!
//! Fixed 10 mg/kg dose packed greedily into 400 mg and 120 mg vials. Greedy
//! packing can overshoot the dose; the overshoot is reported as waste.

use crate::{BagSize, DoseResult, Drug, VialCount, Vials};

/// Fixed dose rate (mg/kg)
pub const DOSE_MG_PER_KG: f64 = 10.0;

pub const LARGE_VIAL_MG: u32 = 400;
pub const SMALL_VIAL_MG: u32 = 120;

/// Reconstituted volume per vial (mL)
pub const LARGE_VIAL_ML: f64 = 5.0;
pub const SMALL_VIAL_ML: f64 = 1.5;

/// Patients strictly heavier than this (kg) get the 250 mL bag
pub const LARGE_BAG_WEIGHT_KG: f64 = 40.0;

/// Pack a dose into vials, largest first
///
/// Returns `(count_400, count_120)`. The small-vial count is the ceiling of
/// the remainder, so the packed amount is never below the dose.
pub fn pack_vials(total_dose_mg: f64) -> (u32, u32) {
    let large = f64::from(LARGE_VIAL_MG);
    let small = f64::from(SMALL_VIAL_MG);

    let count_large = (total_dose_mg / large).floor() as u32;
    let remainder = total_dose_mg - f64::from(count_large) * large;
    let count_small = if remainder > 0.0 {
        (remainder / small).ceil() as u32
    } else {
        0
    };

    (count_large, count_small)
}

/// Compute the Benlysta preparation for a validated, positive weight
pub fn compute(weight_kg: f64) -> DoseResult {
    let total_dose_mg = weight_kg * DOSE_MG_PER_KG;
    let (count_large, count_small) = pack_vials(total_dose_mg);

    let delivered_mg = f64::from(count_large) * f64::from(LARGE_VIAL_MG)
        + f64::from(count_small) * f64::from(SMALL_VIAL_MG);
    let waste_mg = delivered_mg - total_dose_mg;
    let total_volume_ml =
        f64::from(count_large) * LARGE_VIAL_ML + f64::from(count_small) * SMALL_VIAL_ML;

    let bag = if weight_kg > LARGE_BAG_WEIGHT_KG {
        BagSize::Single { volume_ml: 250 }
    } else {
        BagSize::Single { volume_ml: 100 }
    };
    let remaining_bag_volume_ml = bag.volume_ml() - total_volume_ml;

    tracing::debug!(
        "Benlysta: {:.1} mg as {} x 400 mg + {} x 120 mg, waste {:.1} mg",
        total_dose_mg,
        count_large,
        count_small,
        waste_mg
    );

    let bag_ml = bag.volume_ml();
    let preparation_steps = vec![
        format!("Use a {} 0.9% Sodium Chloride bag", bag),
        format!("Withdraw and discard {:.2} mL from NS bag", total_volume_ml),
        "Reconstitute each 400 mg vial with 4.8 mL SWFI (final = 5 mL)".to_string(),
        "Reconstitute each 120 mg vial with 1.5 mL SWFI (final = 1.5 mL)".to_string(),
        format!(
            "Withdraw {:.2} mL from vials and add to remaining {:.2} mL NS",
            total_volume_ml, remaining_bag_volume_ml
        ),
        "Protect from light with an amber IV cover bag".to_string(),
        "Attach non-filtered tubing".to_string(),
        format!("Infuse over 1 hour at a rate of {} mL/hr", bag_ml),
    ];

    DoseResult {
        drug: Drug::Benlysta,
        weight_kg,
        dose_mg_per_kg: DOSE_MG_PER_KG,
        infusion_type: None,
        total_dose_mg,
        volume_required_ml: total_volume_ml,
        vials: Vials(vec![
            VialCount {
                vial_mg: LARGE_VIAL_MG,
                count: count_large,
            },
            VialCount {
                vial_mg: SMALL_VIAL_MG,
                count: count_small,
            },
        ]),
        bag,
        remaining_bag_volume_ml,
        delivered_mg: Some(delivered_mg),
        waste_mg: Some(waste_mg),
        preparation_steps,
        notes: Vec::new(),
    }
}
