#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the distributed generation map toolchain.
//!
//! Loads the generation location and substation collections, aggregates
//! connected capacity per substation, and prints or exports the results
//! for the map front end.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dist_gen_map_generation::config::{all_presets, find_preset, load_config};

#[derive(Parser)]
#[command(name = "dist_gen_map", about = "Distributed generation map data tool")]
struct Cli {
    /// Path to a TOML config file (defaults to `dist_gen_map.toml` if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Marker scale preset to apply on top of the config
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every substation's total connected generation
    Aggregate,
    /// Print the legend breakpoints and map extent as JSON
    Legend,
    /// Show the detail panel for one substation and its locations
    Inspect {
        /// Substation facility identifier
        #[arg(long)]
        substation: f64,
    },
    /// Write annotated `GeoJSON` and legend files
    Export {
        /// Output directory (overrides `[output].dir`)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the available marker presets
    Presets,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(id) = &cli.preset {
        let preset = find_preset(id).ok_or_else(|| {
            let known: Vec<String> = all_presets().into_iter().map(|p| p.id).collect();
            format!("Unknown preset '{id}'. Available: {}", known.join(", "))
        })?;
        log::info!("Applying marker preset '{}'", preset.id);
        config.markers = preset.apply(config.markers);
    }

    match cli.command {
        Commands::Aggregate => commands::aggregate(&config).await?,
        Commands::Legend => commands::legend(&config).await?,
        Commands::Inspect { substation } => commands::inspect(&config, substation).await?,
        Commands::Export { out } => {
            let dir = out.unwrap_or_else(|| PathBuf::from(&config.output.dir));
            commands::export(&config, &dir).await?;
        }
        Commands::Presets => commands::presets(),
    }

    Ok(())
}
