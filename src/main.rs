use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pigsim::{config::Config, herd::Herd, nutrition, output};
use std::{fs, path::PathBuf};

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    sim_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the simulation configured in `<sim_dir>/config.toml`.
    Run,

    /// Print the nutrient requirement tables for a given live weight and
    /// SID lysine intake.
    Nutrients {
        #[arg(long)]
        weight: f64,

        #[arg(long)]
        sid_lys: f64,
    },

    /// Remove the generated output files.
    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    match args.command {
        Command::Run => {
            let cfg = Config::from_file(args.sim_dir.join("config.toml"))
                .context("failed to construct cfg")?;
            log::info!("{cfg:#?}");

            let mut herd = Herd::new(cfg).context("failed to construct herd")?;
            herd.run().context("failed to run simulation")?;

            output::write_daily_csv(args.sim_dir.join("daily.csv"), herd.records())
                .context("failed to write daily records")?;
            output::write_summary_csv(args.sim_dir.join("summary.csv"), &herd)
                .context("failed to write summary")?;

            log::info!(
                "finished after {} days: {} sold, {} remaining",
                herd.day(),
                herd.sold().len(),
                herd.pigs().len()
            );
        }
        Command::Nutrients { weight, sid_lys } => {
            let aa = nutrition::sid_amino_acids(sid_lys);
            let minerals = nutrition::mineral_requirements(weight)
                .context("failed to compute mineral requirements")?;
            let vitamins = nutrition::vitamin_requirements(weight)
                .context("failed to compute vitamin requirements")?;

            println!("SID amino acids (g/day): {aa:#?}");
            println!("minerals: {minerals:#?}");
            println!("vitamins: {vitamins:#?}");
        }
        Command::Clean => {
            for name in ["daily.csv", "summary.csv"] {
                let file = args.sim_dir.join(name);
                if file.exists() {
                    fs::remove_file(&file).with_context(|| format!("failed to remove {file:?}"))?;
                    log::info!("removed {file:?}");
                }
            }
        }
    }

    Ok(())
}
