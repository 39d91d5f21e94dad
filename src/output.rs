//! CSV export of the collected simulation data.

use crate::herd::{DailyRecord, Herd};
use crate::model::{Pig, PigKind};
use crate::stats::Accumulator;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Per-kind end-of-run summary row.
#[derive(Debug, Serialize)]
struct SummaryRow {
    kind: &'static str,
    n_sold: usize,
    n_remaining: usize,
    mean_final_weight_kg: f64,
    std_dev_final_weight_kg: f64,
    mean_backfat_mm: f64,
    mean_fat_free_lean_pct: f64,
}

/// Write the per-pig daily records.
pub fn write_daily_csv<P: AsRef<Path>>(file: P, records: &[DailyRecord]) -> Result<()> {
    let file = file.as_ref();
    let mut writer =
        csv::Writer::from_path(file).with_context(|| format!("failed to create {file:?}"))?;

    for record in records {
        writer.serialize(record).context("failed to write record")?;
    }

    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}

/// Write the per-kind summary of sold and remaining pigs.
pub fn write_summary_csv<P: AsRef<Path>>(file: P, herd: &Herd) -> Result<()> {
    let file = file.as_ref();
    let mut writer =
        csv::Writer::from_path(file).with_context(|| format!("failed to create {file:?}"))?;

    for kind in [PigKind::Gilt, PigKind::Barrow, PigKind::Male] {
        writer
            .serialize(summary_row(kind, herd))
            .context("failed to write summary row")?;
    }

    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}

fn summary_row(kind: PigKind, herd: &Herd) -> SummaryRow {
    let sold: Vec<&Pig> = herd.sold().iter().filter(|pig| pig.kind == kind).collect();
    let remaining = herd.pigs().iter().filter(|pig| pig.kind == kind).count();

    let mut final_weight = Accumulator::new();
    let mut backfat = Accumulator::new();
    let mut fat_free_lean = Accumulator::new();
    for pig in &sold {
        if let Some(weight) = pig.final_weight_kg {
            final_weight.add(weight);
        }
        backfat.add(pig.backfat_mm);
        if let Some(lean) = pig.fat_free_lean_pct {
            fat_free_lean.add(lean);
        }
    }

    SummaryRow {
        kind: kind.as_str(),
        n_sold: sold.len(),
        n_remaining: remaining,
        mean_final_weight_kg: final_weight.mean(),
        std_dev_final_weight_kg: final_weight.std_dev(),
        mean_backfat_mm: backfat.mean(),
        mean_fat_free_lean_pct: fat_free_lean.mean(),
    }
}
