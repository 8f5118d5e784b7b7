//! Ninefold CLI - Command-line interface
//!
//! Splits a square tile map into a recursive 3×3 pyramid of detail maps.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use ninefold::coord::Direction;
use ninefold::objects::ContentPolicy;
use ninefold::raster::ScaleFilter;

use commands::build::BuildArgs;
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "ninefold")]
#[command(version, about = "Recursive 3x3 tile-map pyramid builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the pyramid of a map
    Build {
        /// Source map document
        map: PathBuf,

        /// Output directory (defaults to the map's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deepest survey level to write
        #[arg(long)]
        max_survey: Option<u32>,

        /// Content group policy: pass-through or cull-and-scale
        #[arg(long)]
        content_policy: Option<ContentPolicy>,

        /// Resampling filter: nearest, triangle, catmull-rom, gaussian, lanczos3
        #[arg(long)]
        filter: Option<ScaleFilter>,

        /// Build sibling levels in parallel
        #[arg(long)]
        parallel: bool,

        /// Configuration file (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a map and show its survey levels
    Inspect {
        /// Source map document
        map: PathBuf,
    },

    /// Resolve a direction path (e.g. `e n`) to its path id and area
    Address {
        /// Directions front to back: c, n, e, s, w, ne, se, sw, nw or codes 0-8
        directions: Vec<Direction>,

        /// Also map the area into a raster of this side in pixels
        #[arg(long)]
        side: Option<u32>,
    },

    /// View or edit the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Build {
            map,
            output,
            max_survey,
            content_policy,
            filter,
            parallel,
            config,
        } => commands::build::run(BuildArgs {
            map,
            output,
            max_survey,
            content_policy,
            filter,
            parallel,
            config,
        }),
        Commands::Inspect { map } => commands::inspect::run(&map),
        Commands::Address { directions, side } => commands::address::run(&directions, side),
        Commands::Config { command } => commands::config::run(command),
    }
}
