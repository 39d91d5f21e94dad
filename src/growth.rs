//! Per-agent bioenergetic growth engine.
//!
//! Advances one pig by one simulated day: weight gain, protein and lipid
//! deposition, body composition, thermal/maintenance energy block, feed
//! intake and backfat. The three pig kinds share one pipeline and differ
//! only in their coefficient tables.

use crate::model::{Pig, PigKind};
use crate::promoter::{self, RacDose, RacState};
use anyhow::{Context, Result, bail};
use rand::Rng;
use rand_distr::{Distribution, Triangular};

/// Euler's number as used by the reference growth curves. Kept verbatim
/// (not `std::f64::consts::E`) for numeric reproducibility.
pub const EULER: f64 = 2.7182;

/// Half-width of the triangular deviation added to the daily weight gain
/// when stochastic gain is enabled (g/day).
const GAIN_DEVIATION_G: f64 = 20.0;

/// Kind-specific coefficients of the growth pipeline.
///
/// Polynomials are stored lowest order first: `poly[i]` multiplies `w^i`.
pub struct GrowthCoefficients {
    /// Base daily weight gain, quadratic in live weight (g/day).
    pub gain_poly: [f64; 3],
    /// Maximum protein deposition rate (g/day).
    pub pd_max: f64,
    /// Body protein mass at Pd_max (kg).
    pub bp_at_pd_max_kg: f64,
    /// ME intake asymptote (kcal/day).
    pub me_max: f64,
    /// ME intake rate parameter (exponentiated inside the curve).
    pub me_rate: f64,
    /// ME intake weight exponent.
    pub me_exp: f64,
    /// Scale on the protein deposition polynomial (g/day).
    pub prd_scale: f64,
    /// Protein deposition, cubic in live weight.
    pub prd_poly: [f64; 4],
    /// Gompertz feed-intake curve `(max, rate, exp)` in kg/day; kinds
    /// without one fall back to the energy-scaled intake.
    pub feed_curve: Option<(f64, f64, f64)>,
}

const GILT: GrowthCoefficients = GrowthCoefficients {
    gain_poly: [485.17, 8.8503, -0.0477],
    pd_max: 149.9799,
    bp_at_pd_max_kg: 11.3016,
    me_max: 10967.0,
    me_rate: -3.803,
    me_exp: 0.9072,
    prd_scale: 137.0,
    prd_poly: [0.7066, 0.013289, -0.0001312, 2.8627e-7],
    feed_curve: Some((2.755, -4.755, 1.214)),
};

const BARROW: GrowthCoefficients = GrowthCoefficients {
    gain_poly: [291.23, 14.162, -0.0765],
    pd_max: 145.3477,
    bp_at_pd_max_kg: 10.2483,
    me_max: 10447.0,
    me_rate: -4.283,
    me_exp: 1.0843,
    prd_scale: 133.0,
    prd_poly: [0.7078, 0.013764, -0.00014211, 3.2698e-7],
    feed_curve: Some((2.88, -5.921, 1.512)),
};

const MALE: GrowthCoefficients = GrowthCoefficients {
    gain_poly: [335.44 - 20.0, 12.043, -0.0603],
    pd_max: 165.5064,
    bp_at_pd_max_kg: 13.6612,
    me_max: 10638.0,
    me_rate: -3.803,
    me_exp: 0.9072,
    prd_scale: 151.0,
    prd_poly: [0.6558, 0.012740, -0.00010390, 1.64001e-7],
    feed_curve: None,
};

impl PigKind {
    /// Coefficient table of the growth pipeline for this kind.
    pub fn coefficients(&self) -> &'static GrowthCoefficients {
        match self {
            PigKind::Gilt => &GILT,
            PigKind::Barrow => &BARROW,
            PigKind::Male => &MALE,
        }
    }
}

/// Per-step inputs of the growth pipeline that the model run owns.
#[derive(Clone, Copy, Debug)]
pub struct StepContext {
    pub ambient_temp_c: f64,
    pub me_content_kcal_per_kg: f64,
    pub sell_weight_kg: f64,
    pub stochastic_gain: bool,
    /// Growth-promoter dose; `None` when RAC feeding is disabled for the run.
    pub rac: Option<RacDose>,
}

fn poly3(coef: &[f64; 3], x: f64) -> f64 {
    coef[0] + coef[1] * x + coef[2] * x * x
}

fn poly4(coef: &[f64; 4], x: f64) -> f64 {
    coef[0] + coef[1] * x + coef[2] * x * x + coef[3] * x * x * x
}

/// Advance one pig by one simulated day.
///
/// Returns `true` when the pig has reached the sell weight and should be
/// removed from the population by the caller; no further updates may be
/// applied to it afterwards.
///
/// # Errors
/// Fails on domain precondition violations: non-positive live weight or
/// body protein mass, or protein mass at or beyond the maturity mass
/// (the Pd-decline logarithm has no valid argument there). These indicate
/// bad configuration or an exhausted coefficient regime and abort the run
/// rather than clamp.
pub fn advance_one_day<R: Rng>(pig: &mut Pig, ctx: &StepContext, rng: &mut R) -> Result<bool> {
    if !(pig.weight_kg > 0.0) {
        bail!("live weight must be positive, but is {}", pig.weight_kg);
    }
    if !(pig.body_protein_kg > 0.0) {
        bail!("body protein mass must be positive, but is {}", pig.body_protein_kg);
    }

    let coef = pig.kind.coefficients();

    // Base gain plus optional triangular deviation, then grams to kilograms.
    let mut gain_g = poly3(&coef.gain_poly, pig.weight_kg);
    if ctx.stochastic_gain {
        let dist = Triangular::new(-GAIN_DEVIATION_G, GAIN_DEVIATION_G, 0.0)
            .context("failed to construct gain deviation distribution")?;
        gain_g += dist.sample(rng);
    }
    pig.weight_gain_g = gain_g;
    pig.weight_kg += gain_g / 1000.0;

    let w = pig.weight_kg;

    // Growth-curve constants derived from the kind's Pd_max point.
    let bp_maturity_g = EULER * coef.bp_at_pd_max_kg * 1000.0;
    let rate_constant = EULER * coef.pd_max / bp_maturity_g;

    pig.me_intake_kcal = coef.me_max * (1.0 - (-coef.me_rate.exp() * w.powf(coef.me_exp)).exp());

    pig.protein_deposition_g = coef.prd_scale * poly4(&coef.prd_poly, w);
    pig.body_protein_kg += pig.protein_deposition_g / 1000.0;

    let bpm_g = pig.body_protein_kg * 1000.0;
    if bpm_g >= bp_maturity_g {
        bail!(
            "body protein mass {bpm_g} g is at or beyond the maturity mass {bp_maturity_g} g"
        );
    }
    pig.max_pd_after_decline_g = bpm_g * rate_constant * (bp_maturity_g / bpm_g).ln();

    pig.ash_kg = 0.189 * pig.body_protein_kg;
    pig.water_kg = (4.322 + 0.0044 * coef.pd_max) * pig.body_protein_kg.powf(0.855);

    // Feed-intake refresh: Gompertz curve where the kind defines one,
    // energy-scaled intake otherwise.
    pig.feed_intake_energy_kg = 1.053 * pig.me_intake_kcal / ctx.me_content_kcal_per_kg;
    pig.feed_intake_kg = match coef.feed_curve {
        Some((fi_max, fi_rate, fi_exp)) => {
            fi_max * (1.0 - (-fi_rate.exp() * w.powf(fi_exp)).exp())
        }
        None => pig.feed_intake_energy_kg,
    };

    // Thermal and maintenance block.
    let t = ctx.ambient_temp_c;
    pig.lct_c = 17.9 - 0.0375 * w;
    pig.min_space_m2 = 0.0336 * w.powf(0.667);
    let excess = t - (pig.lct_c + 3.0);
    pig.me_intake_fraction = 1.0 - 0.012914 * excess - 0.001179 * excess * excess;
    pig.max_daily_feed_kg = pig.me_intake_fraction * pig.me_intake_kcal / ctx.me_content_kcal_per_kg;
    pig.standard_maintenance_kcal = 197.0 * w.powf(0.60);
    pig.thermogenesis_kcal = if t < pig.lct_c {
        0.07425 * (pig.lct_c - t) * pig.standard_maintenance_kcal
    } else {
        0.0
    };
    pig.maintenance_kcal = pig.standard_maintenance_kcal + pig.thermogenesis_kcal;

    // Energy left above maintenance and protein deposition goes to lipid;
    // a negative balance mobilizes lipid.
    pig.lipid_deposition_g =
        (pig.me_intake_kcal - pig.maintenance_kcal - pig.protein_deposition_g * 10.6) / 12.5;
    pig.body_lipid_kg += pig.lipid_deposition_g / 1000.0;

    pig.empty_body_weight_kg = pig.body_protein_kg + pig.body_lipid_kg + pig.water_kg + pig.ash_kg;
    pig.gut_fill_kg = 0.3043 * pig.empty_body_weight_kg.powf(0.5977);

    pig.backfat_mm =
        -5.0 + 12.3 * (pig.body_lipid_kg / pig.body_protein_kg) + 0.13 * pig.body_protein_kg;

    // Diagnostic Pd estimate from the energy balance; not fed back.
    pig.pd_by_energy_g =
        0.001 * (pig.me_intake_kcal - pig.maintenance_kcal) * (1.0 + 0.015 * (t - pig.lct_c));

    // Pd-decline switch: while deposition still rises the ceiling is Pd_max,
    // after the peak it follows the decline curve.
    pig.maximum_pd_g = if pig.protein_deposition_g > pig.prev_protein_deposition_g {
        coef.pd_max
    } else {
        pig.max_pd_after_decline_g
    };
    pig.prev_protein_deposition_g = pig.protein_deposition_g;

    if let Some(dose) = ctx.rac {
        apply_growth_promoter(pig, &dose);
    }

    // Sell check. The male pathway freezes its final body metrics in the
    // same step; removal itself is the caller's job.
    if pig.weight_kg >= ctx.sell_weight_kg {
        if pig.final_weight_kg.is_none() {
            let final_weight = pig.weight_kg;
            pig.final_weight_kg = Some(final_weight);
            if pig.kind == PigKind::Male {
                pig.fat_free_lean_pct = Some(
                    62.073 + 0.0308 * final_weight - 1.0101 * pig.backfat_mm
                        + 0.00774 * pig.backfat_mm * pig.backfat_mm,
                );
            }
        }
        return Ok(true);
    }

    Ok(false)
}

/// Start RAC feeding once the pig first exceeds the configured start weight,
/// then apply the daily adjustment.
fn apply_growth_promoter(pig: &mut Pig, dose: &RacDose) {
    if !dose.eligible(pig.kind) {
        return;
    }

    if pig.rac.is_none() && pig.weight_kg > dose.start_weight_kg {
        pig.rac = Some(RacState::begin(dose.level, pig.weight_kg));
    }

    if let Some(rac) = pig.rac.as_mut() {
        promoter::apply_daily_adjustment(rac, pig.weight_kg, pig.me_intake_kcal, pig.backfat_mm);
    }
}
