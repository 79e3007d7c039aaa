use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use routeart_core::markers::Unit;

/*
 info FILES                                 print route statistics
 validate FILES                             inspect route data, exit 1 on findings
 markers [--unit U] [--interval N] FILES    print distance marker positions

 Verbosity is controlled through RUST_LOG as usual.
*/

/// Returns the parsed command line options.
pub fn parse_args() -> Args {
    Args::parse()
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display route statistics: distance, duration, elevation profile and
    /// geographic bounds
    Info {
        #[arg(required = true, help = "GPX files to read")]
        files: Vec<PathBuf>,
    },

    /// Inspect route data for structural, coordinate and timestamp problems.
    /// Findings are advisory; the exit code is 1 if any are reported.
    Validate {
        #[arg(required = true, help = "GPX files to inspect")]
        files: Vec<PathBuf>,
    },

    /// Compute evenly-spaced distance markers along each route and print
    /// them as plain data for a downstream renderer
    Markers {
        #[arg(
            short,
            long,
            value_enum,
            default_value_t = MarkerUnit::Kilometers,
            help = "Unit the marker interval is expressed in"
        )]
        unit: MarkerUnit,

        #[arg(
            short,
            long,
            default_value_t = 1.0,
            help = "Distance between markers, in the chosen unit"
        )]
        interval: f64,

        #[arg(required = true, help = "GPX files to read")]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MarkerUnit {
    #[value(alias = "km")]
    Kilometers,
    #[value(alias = "mi")]
    Miles,
}

impl From<MarkerUnit> for Unit {
    fn from(unit: MarkerUnit) -> Self {
        match unit {
            MarkerUnit::Kilometers => Unit::Kilometers,
            MarkerUnit::Miles => Unit::Miles,
        }
    }
}
