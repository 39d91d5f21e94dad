//! Nutrient requirement calculator.
//!
//! Pure functions, invokable at any cadence independent of the daily step.
//! Amino acid requirements are fixed ratios of SID lysine; mineral and
//! vitamin requirements follow `intercept + slope * ln(weight)` curves.

use anyhow::{Result, bail};
use serde::Serialize;

/// One `intercept + slope * ln(weight)` requirement curve.
struct NutrientCurve {
    intercept: f64,
    slope: f64,
}

impl NutrientCurve {
    fn at(&self, weight_kg: f64) -> f64 {
        self.intercept + self.slope * weight_kg.ln()
    }
}

/// Standardized-ileal-digestible amino acid requirements (g/day), each a
/// fixed ratio of SID lysine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SidAminoAcids {
    pub methionine: f64,
    pub methionine_cystine: f64,
    pub threonine: f64,
    pub tryptophan: f64,
    pub isoleucine: f64,
    pub leucine: f64,
    pub valine: f64,
    pub histidine: f64,
    pub phenylalanine: f64,
    pub phenylalanine_tyrosine: f64,
    pub arginine: f64,
}

/// Compute the SID amino acid requirements for a given SID lysine intake.
pub fn sid_amino_acids(sid_lys: f64) -> SidAminoAcids {
    SidAminoAcids {
        methionine: sid_lys * 0.29,
        methionine_cystine: sid_lys * 0.55,
        threonine: sid_lys * 0.60,
        tryptophan: sid_lys * 0.18,
        isoleucine: sid_lys * 0.52,
        leucine: sid_lys * 1.01,
        valine: sid_lys * 0.65,
        histidine: sid_lys * 0.34,
        phenylalanine: sid_lys * 0.60,
        phenylalanine_tyrosine: sid_lys * 0.94,
        arginine: sid_lys * 0.46,
    }
}

/// Mineral requirements, as dietary concentrations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineralRequirements {
    pub calcium_pct: f64,
    pub phosphorus_pct: f64,
    pub digestible_phosphorus_pct: f64,
    pub sodium_pct: f64,
    pub chlorine_pct: f64,
    pub potassium_pct: f64,
    pub magnesium_pct: f64,
    pub iron_mg_per_kg: f64,
    pub zinc_mg_per_kg: f64,
    pub copper_mg_per_kg: f64,
}

/// Compute the mineral requirements for a given live weight.
///
/// # Errors
/// Returns an error if the weight is not strictly positive (the curves
/// take its logarithm).
pub fn mineral_requirements(weight_kg: f64) -> Result<MineralRequirements> {
    check_weight(weight_kg)?;
    Ok(MineralRequirements {
        calcium_pct: NutrientCurve { intercept: 1.1013, slope: -0.1339 }.at(weight_kg),
        phosphorus_pct: NutrientCurve { intercept: 0.9344, slope: -0.1116 }.at(weight_kg),
        digestible_phosphorus_pct: NutrientCurve { intercept: 0.5306, slope: -0.0670 }.at(weight_kg),
        sodium_pct: NutrientCurve { intercept: 0.5810, slope: -0.1005 }.at(weight_kg),
        chlorine_pct: NutrientCurve { intercept: 0.5075, slope: -0.0893 }.at(weight_kg),
        potassium_pct: NutrientCurve { intercept: 0.5174, slope: -0.0726 }.at(weight_kg),
        magnesium_pct: NutrientCurve { intercept: 0.0617, slope: -0.0056 }.at(weight_kg),
        iron_mg_per_kg: NutrientCurve { intercept: 200.3170, slope: -33.4866 }.at(weight_kg),
        zinc_mg_per_kg: NutrientCurve { intercept: 183.5975, slope: -27.9055 }.at(weight_kg),
        copper_mg_per_kg: NutrientCurve { intercept: 10.1799, slope: -1.3953 }.at(weight_kg),
    })
}

/// Vitamin requirements, as dietary concentrations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VitaminRequirements {
    pub vitamin_a_iu_per_kg: f64,
    pub vitamin_d3_iu_per_kg: f64,
    pub vitamin_e_iu_per_kg: f64,
    pub vitamin_k_mg_per_kg: f64,
    pub thiamin_mg_per_kg: f64,
    pub riboflavin_mg_per_kg: f64,
    pub niacin_mg_per_kg: f64,
    pub pantothenic_acid_mg_per_kg: f64,
    pub pyridoxine_mg_per_kg: f64,
    pub vitamin_b12_ug_per_kg: f64,
    pub biotin_mg_per_kg: f64,
    pub folacin_mg_per_kg: f64,
    pub choline_g_per_kg: f64,
    pub vitamin_c_mg_per_kg: f64,
}

/// Compute the vitamin requirements for a given live weight.
///
/// # Errors
/// Returns an error if the weight is not strictly positive.
pub fn vitamin_requirements(weight_kg: f64) -> Result<VitaminRequirements> {
    check_weight(weight_kg)?;
    Ok(VitaminRequirements {
        vitamin_a_iu_per_kg: NutrientCurve { intercept: 3704.7550, slope: -502.2996 }.at(weight_kg),
        vitamin_d3_iu_per_kg: NutrientCurve { intercept: 337.0365, slope: -39.0677 }.at(weight_kg),
        vitamin_e_iu_per_kg: NutrientCurve { intercept: 24.3598, slope: -2.7906 }.at(weight_kg),
        vitamin_k_mg_per_kg: NutrientCurve { intercept: 0.6672, slope: -0.0558 }.at(weight_kg),
        thiamin_mg_per_kg: NutrientCurve { intercept: 2.3360, slope: -0.2791 }.at(weight_kg),
        riboflavin_mg_per_kg: NutrientCurve { intercept: 7.3439, slope: -1.1162 }.at(weight_kg),
        niacin_mg_per_kg: NutrientCurve { intercept: 67.6189, slope: -12.5575 }.at(weight_kg),
        pantothenic_acid_mg_per_kg: NutrientCurve { intercept: 20.3598, slope: -2.7906 }.at(weight_kg),
        pyridoxine_mg_per_kg: NutrientCurve { intercept: 17.0317, slope: -3.3487 }.at(weight_kg),
        vitamin_b12_ug_per_kg: NutrientCurve { intercept: 45.0793, slope: -8.3717 }.at(weight_kg),
        biotin_mg_per_kg: NutrientCurve { intercept: 0.1302, slope: -0.0167 }.at(weight_kg),
        folacin_mg_per_kg: NutrientCurve { intercept: 0.3836, slope: -0.0279 }.at(weight_kg),
        choline_g_per_kg: NutrientCurve { intercept: 1.1016, slope: -0.1674 }.at(weight_kg),
        vitamin_c_mg_per_kg: NutrientCurve { intercept: 220.3170, slope: -33.4866 }.at(weight_kg),
    })
}

fn check_weight(weight_kg: f64) -> Result<()> {
    if !(weight_kg > 0.0) {
        bail!("live weight must be positive, but is {weight_kg}");
    }
    Ok(())
}
