//! Simulation data types.

use crate::promoter::RacState;
use anyhow::{Result, bail};
use serde::Serialize;

/// Sex/type of a pig, fixed at creation.
///
/// Selects the coefficient set used by the growth engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PigKind {
    Gilt,
    Barrow,
    Male,
}

impl PigKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PigKind::Gilt => "gilt",
            PigKind::Barrow => "barrow",
            PigKind::Male => "male",
        }
    }
}

/// Column bounds of the pen region a pig is confined to.
#[derive(Clone, Copy, Debug)]
pub struct Region {
    pub start: u32,
    pub end: u32,
}

/// Agent of the simulation.
///
/// Holds the live weight, cumulative body composition and all per-day
/// derived quantities of one pig. Updated in place once per simulated day
/// by [`crate::growth::advance_one_day`].
#[derive(Clone, Debug)]
pub struct Pig {
    pub id: u32,
    pub kind: PigKind,
    pub region: Region,
    pub pos: (u32, u32),

    /// Current live weight (kg).
    pub weight_kg: f64,
    /// Whole-body protein mass (kg). Must stay strictly positive.
    pub body_protein_kg: f64,
    /// Whole-body lipid mass (kg).
    pub body_lipid_kg: f64,
    /// Body ash mass (kg), recomputed from protein mass each day.
    pub ash_kg: f64,
    /// Body water mass (kg), recomputed from protein mass each day.
    pub water_kg: f64,

    /// Weight gain of the last step (g/day).
    pub weight_gain_g: f64,
    /// Metabolizable energy intake (kcal/day).
    pub me_intake_kcal: f64,
    /// Protein deposition of the last step (g/day).
    pub protein_deposition_g: f64,
    /// Protein deposition of the step before, read by the Pd-decline switch.
    pub prev_protein_deposition_g: f64,
    /// Lipid deposition (g/day); negative values mean mobilization.
    pub lipid_deposition_g: f64,
    /// Ceiling on protein deposition for the current step (g/day).
    pub maximum_pd_g: f64,
    /// Pd ceiling once the deposition curve has passed its peak (g/day).
    pub max_pd_after_decline_g: f64,
    /// Diagnostic Pd estimate from energy intake (g/day).
    pub pd_by_energy_g: f64,

    /// Feed intake (kg/day).
    pub feed_intake_kg: f64,
    /// Feed intake implied by ME intake and diet energy content (kg/day).
    pub feed_intake_energy_kg: f64,
    /// Maximum daily feed intake under the current thermal environment (kg/day).
    pub max_daily_feed_kg: f64,

    /// Lower critical temperature (deg C).
    pub lct_c: f64,
    /// Minimum floor space for maximum ME intake (m^2).
    pub min_space_m2: f64,
    /// Thermal adjustment factor on ME intake.
    pub me_intake_fraction: f64,
    /// Standard maintenance ME requirement (kcal/day).
    pub standard_maintenance_kcal: f64,
    /// ME requirement for thermogenesis (kcal/day); zero above the LCT.
    pub thermogenesis_kcal: f64,
    /// Total maintenance ME requirement (kcal/day).
    pub maintenance_kcal: f64,

    /// Empty body weight (kg).
    pub empty_body_weight_kg: f64,
    /// Gut fill (kg).
    pub gut_fill_kg: f64,
    /// Probe backfat thickness (mm).
    pub backfat_mm: f64,

    /// Growth-promoter sub-state; present once RAC feeding has started.
    pub rac: Option<RacState>,

    /// Live weight frozen at the step the sell threshold was crossed (kg).
    pub final_weight_kg: Option<f64>,
    /// Fat-free lean percentage frozen together with the final weight.
    pub fat_free_lean_pct: Option<f64>,
}

impl Pig {
    /// Create a new pig with a given initial weight.
    ///
    /// Body protein and lipid masses are seeded as fixed fractions of the
    /// initial weight, so the `body_protein_kg > 0` invariant holds from
    /// construction onward.
    ///
    /// # Errors
    /// Returns an error if the initial weight is not strictly positive.
    pub fn new(id: u32, kind: PigKind, weight_kg: f64, region: Region, pos: (u32, u32)) -> Result<Self> {
        if !(weight_kg > 0.0) {
            bail!("initial weight must be positive, but is {weight_kg}");
        }

        Ok(Self {
            id,
            kind,
            region,
            pos,
            weight_kg,
            body_protein_kg: 0.18 * weight_kg,
            body_lipid_kg: 0.03 * weight_kg,
            ash_kg: 0.0,
            water_kg: 0.0,
            weight_gain_g: 0.0,
            me_intake_kcal: 0.0,
            protein_deposition_g: 0.0,
            prev_protein_deposition_g: 0.0,
            lipid_deposition_g: 0.0,
            maximum_pd_g: 0.0,
            max_pd_after_decline_g: 0.0,
            pd_by_energy_g: 0.0,
            feed_intake_kg: 0.0,
            feed_intake_energy_kg: 0.0,
            max_daily_feed_kg: 0.0,
            lct_c: 0.0,
            min_space_m2: 0.0,
            me_intake_fraction: 0.0,
            standard_maintenance_kcal: 0.0,
            thermogenesis_kcal: 0.0,
            maintenance_kcal: 0.0,
            empty_body_weight_kg: 0.0,
            gut_fill_kg: 0.0,
            backfat_mm: 0.0,
            rac: None,
            final_weight_kg: None,
            fat_free_lean_pct: None,
        })
    }
}
