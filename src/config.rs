//! Run configuration.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Simulation configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub herd: HerdConfig,
    #[serde(default)]
    pub housing: HousingConfig,
    #[serde(default)]
    pub feeding: FeedingConfig,
    #[serde(default)]
    pub rac: RacConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Population composition and weight thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HerdConfig {
    /// Number of gilts.
    pub n_gilts: u32,
    /// Number of barrows.
    pub n_barrows: u32,
    /// Number of males.
    pub n_males: u32,
    /// Nominal initial live weight (kg); actual weights are drawn from
    /// `init_weight_kg - 1 + U[0, 2)`.
    #[serde(default = "default_init_weight")]
    pub init_weight_kg: f64,
    /// Live weight at which a pig is sold and removed (kg).
    #[serde(default = "default_sell_weight")]
    pub sell_weight_kg: f64,
}

/// Pen grid and environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HousingConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Number of fixed regions the grid is split into, column-wise.
    pub n_regions: u32,
    pub ambient_temp_c: f64,
}

impl Default for HousingConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            n_regions: 5,
            ambient_temp_c: 20.0,
        }
    }
}

/// Diet and intake model options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedingConfig {
    /// ME content of the diet (kcal/kg).
    pub me_content_kcal_per_kg: f64,
    /// Add a per-pig triangular deviation to the daily weight gain.
    pub stochastic_gain: bool,
}

impl Default for FeedingConfig {
    fn default() -> Self {
        Self {
            me_content_kcal_per_kg: 3000.0,
            stochastic_gain: false,
        }
    }
}

/// Ractopamine feeding regimen.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RacConfig {
    pub enabled: bool,
    /// Dose (mg/kg of diet).
    pub level: f64,
    /// Live weight at which feeding begins (kg).
    pub start_weight_kg: f64,
    /// Feed every kind; when false only males receive RAC.
    pub all_kinds: bool,
}

impl Default for RacConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: 20.0,
            start_weight_kg: 78.0,
            all_kinds: false,
        }
    }
}

/// Run length and reproducibility.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub n_days: u32,
    /// RNG seed; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            n_days: 140,
            seed: None,
        }
    }
}

fn default_init_weight() -> f64 {
    20.0
}

fn default_sell_weight() -> f64 {
    130.0
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if the
    /// configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to parse config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let n_pigs = self.herd.n_gilts as u64 + self.herd.n_barrows as u64 + self.herd.n_males as u64;
        check_num(n_pigs, 1..100_000).context("invalid number of pigs")?;

        check_num(self.herd.init_weight_kg, 2.0..500.0).context("invalid initial weight")?;
        check_num(self.herd.sell_weight_kg, 2.0..500.0).context("invalid sell weight")?;
        if self.herd.sell_weight_kg <= self.herd.init_weight_kg {
            bail!(
                "sell weight ({} kg) must exceed the initial weight ({} kg)",
                self.herd.sell_weight_kg,
                self.herd.init_weight_kg
            );
        }

        check_num(self.housing.grid_width, 1..1_000).context("invalid grid width")?;
        check_num(self.housing.grid_height, 1..1_000).context("invalid grid height")?;
        check_num(self.housing.n_regions, 1..=self.housing.grid_width)
            .context("invalid number of regions")?;
        check_num(self.housing.ambient_temp_c, -20.0..50.0).context("invalid ambient temperature")?;

        check_num(self.feeding.me_content_kcal_per_kg, 1.0..10_000.0)
            .context("invalid diet ME content")?;

        if self.rac.enabled {
            check_num(self.rac.level, 1.0..100.0).context("invalid RAC level")?;
            check_num(self.rac.start_weight_kg, 2.0..500.0).context("invalid RAC start weight")?;
        }

        check_num(self.run.n_days, 1..10_000).context("invalid number of days")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
