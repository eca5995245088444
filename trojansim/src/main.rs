use trojansim::{report_many, ExtractOptions, Scenario, ScenarioConfig};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "Co-orbital stability campaigns for known exoplanetary systems")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one scenario from the scenarios/ directory
    Run {
        #[arg(short, default_value = "trappist_1e.yaml")]
        file_name: String,
        /// Write the sampled series as JSON
        #[arg(short)]
        output: Option<PathBuf>,
    },
    /// Extract orbital-element series from snapshot archives
    Extract {
        #[arg(required = true)]
        archives: Vec<PathBuf>,
        /// Write `{path, series}` or `{path, error}` per archive as a JSON array
        #[arg(short)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = 1.0e-6)]
        interval_tolerance: f64,
        /// Accept archives whose body count changes between snapshots
        #[arg(long)]
        allow_varying_bodies: bool,
    },
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Run { file_name, output } => {
            let scenario_cfg = load_scenario_from_yaml(&file_name)?;
            let mut scenario = Scenario::build_scenario(scenario_cfg)
                .with_context(|| format!("building scenario from {file_name}"))?;
            let series = scenario
                .execute()
                .with_context(|| format!("running {}", scenario.name))?;
            for removed in &series.removed {
                info!("{} escaped at t = {}", removed.name, removed.t);
            }
            if let Some(path) = output {
                write_json(&path, &series)?;
            }
        }
        Command::Extract {
            archives,
            output,
            interval_tolerance,
            allow_varying_bodies,
        } => {
            let options = ExtractOptions {
                interval_tolerance,
                require_constant_body_count: !allow_varying_bodies,
            };
            // one entry per input archive, failures included
            let reports = report_many(&archives, &options);
            if let Some(path) = output {
                write_json(&path, &reports)?;
            }
            let failed = reports.iter().filter(|r| !r.is_ok()).count();
            if failed > 0 {
                bail!("{failed} of {} archives could not be read", archives.len());
            }
        }
    }

    Ok(())
}
