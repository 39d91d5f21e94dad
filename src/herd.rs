//! Population model: setup, daily stepping and data collection.

use crate::config::Config;
use crate::growth::{self, StepContext};
use crate::model::{Pig, PigKind, Region};
use crate::promoter::RacDose;
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::Uniform;
use serde::Serialize;

/// One flat data-collection row, sampled per pig per day.
#[derive(Clone, Debug, Serialize)]
pub struct DailyRecord {
    pub day: u32,
    pub id: u32,
    pub kind: &'static str,
    pub weight_kg: f64,
    pub body_protein_kg: f64,
    pub body_lipid_kg: f64,
    pub protein_deposition_g: f64,
    pub lipid_deposition_g: f64,
    pub me_intake_kcal: f64,
    pub maintenance_kcal: f64,
    pub feed_intake_kg: f64,
    pub backfat_mm: f64,
    pub rac_day: Option<u32>,
    pub sold: bool,
}

/// The pig herd: owns the population, the grid regions, the RNG and the
/// collected records, and advances the whole population one day at a time.
pub struct Herd {
    cfg: Config,
    pigs: Vec<Pig>,
    sold: Vec<Pig>,
    rng: ChaCha12Rng,
    day: u32,
    total_feed_intake_kg: f64,
    records: Vec<DailyRecord>,
}

impl Herd {
    /// Build the initial population from the configuration.
    ///
    /// The grid is split column-wise into fixed regions and each region
    /// receives an equal share of every kind. Initial weights are drawn
    /// from `init_weight_kg - 1 + U[0, 2)`.
    pub fn new(cfg: Config) -> Result<Self> {
        let mut rng = match cfg.run.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng()?,
        };

        let region_width = cfg.housing.grid_width / cfg.housing.n_regions;
        let weight_spread = Uniform::new(0.0, 2.0)?;

        let mut pigs = Vec::new();
        let mut next_id = 0;
        for region_idx in 0..cfg.housing.n_regions {
            let region = Region {
                start: region_idx * region_width,
                end: region_idx * region_width + region_width - 1,
            };

            let per_region = [
                (PigKind::Gilt, cfg.herd.n_gilts / cfg.housing.n_regions),
                (PigKind::Barrow, cfg.herd.n_barrows / cfg.housing.n_regions),
                (PigKind::Male, cfg.herd.n_males / cfg.housing.n_regions),
            ];
            for (kind, count) in per_region {
                for _ in 0..count {
                    let weight = cfg.herd.init_weight_kg - 1.0 + weight_spread.sample(&mut rng);
                    let pos = (
                        rng.random_range(region.start..=region.end),
                        rng.random_range(0..cfg.housing.grid_height),
                    );
                    let pig = Pig::new(next_id, kind, weight, region, pos)
                        .with_context(|| format!("failed to create pig {next_id}"))?;
                    log::debug!(
                        "({}): init weight {:.4} kg in region ({}, {})",
                        kind.as_str(),
                        weight,
                        region.start,
                        region.end
                    );
                    pigs.push(pig);
                    next_id += 1;
                }
            }
        }

        Ok(Self {
            cfg,
            pigs,
            sold: Vec::new(),
            rng,
            day: 0,
            total_feed_intake_kg: 0.0,
            records: Vec::new(),
        })
    }

    /// Advance the model by one day: move and update every live pig, record
    /// its state, then remove the pigs that reached the sell weight.
    pub fn step(&mut self) -> Result<()> {
        self.day += 1;

        let ctx = StepContext {
            ambient_temp_c: self.cfg.housing.ambient_temp_c,
            me_content_kcal_per_kg: self.cfg.feeding.me_content_kcal_per_kg,
            sell_weight_kg: self.cfg.herd.sell_weight_kg,
            stochastic_gain: self.cfg.feeding.stochastic_gain,
            rac: self.rac_dose(),
        };

        let mut i_sold = Vec::new();
        for (i_pig, pig) in self.pigs.iter_mut().enumerate() {
            move_within_region(pig, self.cfg.housing.grid_height, &mut self.rng);

            let sellable = growth::advance_one_day(pig, &ctx, &mut self.rng)
                .with_context(|| format!("failed to advance pig {} on day {}", pig.id, self.day))?;

            self.records.push(daily_record(pig, self.day, sellable));
            if sellable {
                i_sold.push(i_pig);
            }
        }

        self.total_feed_intake_kg = self.pigs.iter().map(|pig| pig.feed_intake_kg).sum();
        log::info!(
            "day {}: {} pigs, total feed intake {:.4} kg",
            self.day,
            self.pigs.len(),
            self.total_feed_intake_kg
        );

        // Sort in reverse to safely remove by index.
        i_sold.sort_by(|a, b| b.cmp(a));
        for &i_pig in &i_sold {
            let pig = self.pigs.swap_remove(i_pig);
            log::info!(
                "day {}: sold pig {} ({}) at {:.4} kg",
                self.day,
                pig.id,
                pig.kind.as_str(),
                pig.weight_kg
            );
            self.sold.push(pig);
        }

        Ok(())
    }

    /// Run until the configured number of days or until every pig is sold.
    pub fn run(&mut self) -> Result<()> {
        for _ in 0..self.cfg.run.n_days {
            if self.pigs.is_empty() {
                log::info!("population exhausted on day {}", self.day);
                break;
            }
            self.step().context("failed to perform step")?;
        }
        Ok(())
    }

    fn rac_dose(&self) -> Option<RacDose> {
        if !self.cfg.rac.enabled {
            return None;
        }
        Some(RacDose {
            level: self.cfg.rac.level,
            start_weight_kg: self.cfg.rac.start_weight_kg,
            all_kinds: self.cfg.rac.all_kinds,
        })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn pigs(&self) -> &[Pig] {
        &self.pigs
    }

    pub fn sold(&self) -> &[Pig] {
        &self.sold
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }
}

/// Random one-cell walk, clamped to the pig's region columns and the grid
/// height. Placement does not affect growth; pigs are bioenergetically
/// independent.
fn move_within_region<R: Rng>(pig: &mut Pig, grid_height: u32, rng: &mut R) {
    let dx = rng.random_range(-1i64..=1);
    let dy = rng.random_range(-1i64..=1);
    let x = (pig.pos.0 as i64 + dx).clamp(pig.region.start as i64, pig.region.end as i64);
    let y = (pig.pos.1 as i64 + dy).clamp(0, grid_height as i64 - 1);
    pig.pos = (x as u32, y as u32);
}

fn daily_record(pig: &Pig, day: u32, sold: bool) -> DailyRecord {
    DailyRecord {
        day,
        id: pig.id,
        kind: pig.kind.as_str(),
        weight_kg: pig.weight_kg,
        body_protein_kg: pig.body_protein_kg,
        body_lipid_kg: pig.body_lipid_kg,
        protein_deposition_g: pig.protein_deposition_g,
        lipid_deposition_g: pig.lipid_deposition_g,
        me_intake_kcal: pig.me_intake_kcal,
        maintenance_kcal: pig.maintenance_kcal,
        feed_intake_kg: pig.feed_intake_kg,
        backfat_mm: pig.backfat_mm,
        rac_day: pig.rac.as_ref().map(|rac| rac.day),
        sold,
    }
}
