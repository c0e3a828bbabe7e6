#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the conflict exposure panel builder.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use conflict_panel_io::{
    read_events, read_respondents, write_location_year_csv, write_panel_csv, write_raw_event_csv,
    write_raw_respondent_csv,
};
use conflict_panel_normalize::normalize_events;
use conflict_panel_pipeline::{ConfigError, PipelineConfig, build_location_years, run_pipeline};
use conflict_panel_synth::{SynthConfig, synthetic_events, synthetic_respondents};

#[derive(Parser)]
#[command(name = "conflict-panel", about = "Conflict exposure panel builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the respondent exposure panel from event and survey CSVs
    Run {
        /// Event CSV file(s), concatenated in the order given
        #[arg(required = true)]
        events: Vec<PathBuf>,
        /// Respondent CSV file
        #[arg(long)]
        respondents: PathBuf,
        /// Output path for the respondent panel CSV
        #[arg(long)]
        output: PathBuf,
        /// Also write the banded location-year panel to this path
        #[arg(long)]
        location_years: Option<PathBuf>,
        /// TOML file overriding the default pipeline parameters
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the run summary to this path as JSON
        #[arg(long)]
        summary_output: Option<PathBuf>,
    },
    /// Aggregate event CSVs into the location-year panel, no survey data
    Aggregate {
        /// Event CSV file(s), concatenated in the order given
        #[arg(required = true)]
        events: Vec<PathBuf>,
        /// Output path for the location-year panel CSV
        #[arg(long)]
        output: PathBuf,
        /// TOML file overriding the default pipeline parameters
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write seeded synthetic event and respondent CSVs for demos and tests
    Synth {
        /// Directory to write events.csv and respondents.csv into
        out_dir: PathBuf,
        /// RNG seed; the same seed reproduces the same files
        #[arg(long, default_value = "42")]
        seed: u64,
        /// First calendar year events are generated for
        #[arg(long, default_value = "2000")]
        start_year: i32,
        /// Last calendar year events are generated for
        #[arg(long, default_value = "2023")]
        end_year: i32,
        /// Number of survey respondents to generate
        #[arg(long, default_value = "2000")]
        respondents: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            events,
            respondents,
            output,
            location_years,
            config,
            summary_output,
        } => {
            let config = load_config(config.as_deref())?;
            let start = Instant::now();

            let raw_events = read_events(&events)?;
            let raw_respondents = read_respondents(&respondents)?;
            let result = run_pipeline(raw_events, raw_respondents, &config);

            write_panel_csv(&output, &result.rows)?;
            if let Some(path) = location_years {
                write_location_year_csv(&path, &result.location_years)?;
            }
            if let Some(path) = summary_output {
                std::fs::write(&path, serde_json::to_string_pretty(&result.summary)?)?;
                log::info!("Wrote run summary to {}", path.display());
            }

            log::info!(
                "Panel build complete: {} respondent(s) in {:.1}s",
                result.rows.len(),
                start.elapsed().as_secs_f64()
            );
        }
        Commands::Aggregate {
            events,
            output,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let start = Instant::now();

            let raw_events = read_events(&events)?;
            let (clean, _) = normalize_events(raw_events);
            let (records, _) = build_location_years(&clean, config.intensity_bands);
            write_location_year_csv(&output, &records)?;

            log::info!(
                "Aggregation complete: {} location-year(s) in {:.1}s",
                records.len(),
                start.elapsed().as_secs_f64()
            );
        }
        Commands::Synth {
            out_dir,
            seed,
            start_year,
            end_year,
            respondents,
        } => {
            let config = SynthConfig {
                seed,
                start_year,
                end_year,
                respondents,
            };
            let start = Instant::now();

            std::fs::create_dir_all(&out_dir)?;
            let event_rows = synthetic_events(&config);
            let respondent_rows = synthetic_respondents(&config);
            write_raw_event_csv(out_dir.join("events.csv"), &event_rows)?;
            write_raw_respondent_csv(out_dir.join("respondents.csv"), &respondent_rows)?;

            log::info!(
                "Synthetic data complete: {} event(s), {} respondent(s) in {:.1}s",
                event_rows.len(),
                respondent_rows.len(),
                start.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig, ConfigError> {
    path.map_or_else(
        || Ok(PipelineConfig::default()),
        |path| {
            let config = PipelineConfig::load(path)?;
            log::info!("Loaded pipeline config from {}", path.display());
            Ok(config)
        },
    )
}
