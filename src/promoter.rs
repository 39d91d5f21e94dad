//! Ractopamine (RAC) growth-promoter sub-model.
//!
//! Tracks the feeding-day counter per pig and computes the dose-dependent
//! diagnostic overlays: reduced ME intake, extra protein deposition by
//! weight gained and by feeding day, lean tissue gain and adjusted backfat.
//! The overlays do not feed back into the base growth pipeline.

use crate::model::PigKind;

/// RAC feeding window; the response is exhausted after this many days.
pub const RAC_FEEDING_DAYS: u32 = 28;

/// Reference dose (mg/kg of diet) the response curves are normalized to.
const REFERENCE_LEVEL: f64 = 20.0;

/// Proportional ME intake reduction, cubic in body weight gained on RAC.
const MEIR_POLY: [f64; 3] = [2.29e-3, -9.05e-5, 1.10e-6];

/// Extra protein deposition by weight gained on RAC (g/day): quadratic in
/// the gain plus a dose-by-day cross term.
const PD_BY_WEIGHT_POLY: [f64; 3] = [26.4, 1.458, -0.0397];
const PD_BY_WEIGHT_DOSE_DAY: f64 = 0.934;

/// Extra protein deposition by feeding day (g/day), cubic in the day
/// counter: rises early in the window and tails off toward its end.
const PD_BY_DAY_POLY: [f64; 4] = [31.9, 1.13, -0.1205, 0.001955];

/// Configured growth-promoter regimen for a model run.
#[derive(Clone, Copy, Debug)]
pub struct RacDose {
    /// Dose (mg/kg of diet).
    pub level: f64,
    /// Live weight at which feeding begins (kg).
    pub start_weight_kg: f64,
    /// Feed every kind, not only males.
    pub all_kinds: bool,
}

impl RacDose {
    pub fn eligible(&self, kind: PigKind) -> bool {
        self.all_kinds || kind == PigKind::Male
    }
}

/// Per-pig RAC feeding state and diagnostic overlay outputs.
#[derive(Clone, Debug, Default)]
pub struct RacState {
    /// Days of RAC feeding applied so far; frozen at [`RAC_FEEDING_DAYS`].
    pub day: u32,
    /// Dose (mg/kg of diet).
    pub level: f64,
    /// Live weight at the first eligible step (kg).
    pub init_weight_kg: f64,

    /// ME intake after the dose-dependent reduction (kcal/day).
    pub me_intake_kcal: f64,
    /// Dose-dependent proportional increase in protein deposition.
    pub increase_pd: f64,
    /// Extra protein deposition by weight gained on RAC (g/day).
    pub pd_by_weight_g: f64,
    /// Extra protein deposition by feeding day (g/day).
    pub pd_by_day_g: f64,
    /// Lean tissue gain implied by the weight-based Pd response (g/day).
    pub lean_tissue_gain_g: f64,
    /// Backfat adjusted for the RAC response (mm).
    pub adjusted_backfat_mm: f64,
}

impl RacState {
    /// Start the feeding window, snapshotting the current live weight.
    pub fn begin(level: f64, weight_kg: f64) -> Self {
        Self {
            level,
            init_weight_kg: weight_kg,
            ..Self::default()
        }
    }
}

/// Apply one day of the RAC response.
///
/// No-op once the feeding window is exhausted or while the pig has not
/// gained weight beyond its start-of-feeding snapshot; otherwise computes
/// the overlays and advances the day counter.
pub fn apply_daily_adjustment(rac: &mut RacState, weight_kg: f64, me_intake_kcal: f64, backfat_mm: f64) {
    if rac.day >= RAC_FEEDING_DAYS || weight_kg <= rac.init_weight_kg {
        return;
    }

    let bwg = weight_kg - rac.init_weight_kg;
    let dose = rac.level / REFERENCE_LEVEL;
    let day = rac.day as f64;

    let meir = MEIR_POLY[0] * bwg + MEIR_POLY[1] * bwg * bwg + MEIR_POLY[2] * bwg * bwg * bwg;
    rac.me_intake_kcal = (1.0 - meir * dose.powf(0.7)) * me_intake_kcal;

    rac.increase_pd = 0.33 * dose.powf(0.33);

    rac.pd_by_weight_g = PD_BY_WEIGHT_POLY[0]
        + PD_BY_WEIGHT_POLY[1] * bwg
        + PD_BY_WEIGHT_POLY[2] * bwg * bwg
        + PD_BY_WEIGHT_DOSE_DAY * dose * day;

    rac.pd_by_day_g = PD_BY_DAY_POLY[0]
        + PD_BY_DAY_POLY[1] * day
        + PD_BY_DAY_POLY[2] * day * day
        + PD_BY_DAY_POLY[3] * day * day * day;

    rac.lean_tissue_gain_g = rac.pd_by_weight_g / 0.2;

    rac.adjusted_backfat_mm = backfat_mm * (1.0 + 0.05 * day / 10.0) * dose.powf(0.7);

    rac.day += 1;
}
