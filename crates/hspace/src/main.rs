//! Command‑line entry point for the `hspace` tool.
//!
//! Computes Hilbert indices for points, decodes indices back to points, and
//! prints the curve order of small 2D and 3D grids.

use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hilbertspace::BigUint;
use log::LevelFilter;

/// CLI command implementations.
mod cmd;

#[derive(Parser)]
#[command(name = "hspace")]
#[command(version = env!("CARGO_PKG_VERSION"))]
/// Top‑level CLI options and subcommands.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(short, action = clap::ArgAction::Count, help = "Sets the level of verbosity")]
    v: u8,

    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
/// Subcommands supported by the `hspace` tool.
enum Commands {
    #[command(about = "Print the Hilbert index of a point")]
    /// Print the Hilbert index of a point.
    Index {
        #[arg(
            short = 'b',
            long = "bits",
            help = "Bits per dimension (inferred from the coordinates when omitted)"
        )]
        /// Bits per dimension.
        bits: Option<u32>,

        #[arg(required = true, help = "Point coordinates")]
        /// Point coordinates.
        coords: Vec<u32>,
    },

    #[command(about = "Decode a Hilbert index back into coordinates")]
    /// Decode a Hilbert index back into coordinates.
    Point {
        #[arg(short = 'd', long = "dimensions", help = "Number of dimensions")]
        /// Number of dimensions.
        dimensions: u32,

        #[arg(short = 'b', long = "bits", help = "Bits per dimension")]
        /// Bits per dimension.
        bits: u32,

        #[arg(help = "Decimal Hilbert index")]
        /// Decimal Hilbert index.
        index: BigUint,
    },

    #[command(about = "Print every cell of a grid in curve order")]
    /// Print every cell of a grid in curve order with its proportion.
    Curve {
        #[arg(long = "three-d", help = "Use a SIDE×SIDE×SIDE cube")]
        /// Build a 3D curve instead of a 2D one.
        three_d: bool,

        #[arg(help = "Cells per side")]
        /// Cells per side.
        side: u32,
    },

    #[command(about = "Print the proportion of the curve length at a coordinate")]
    /// Print the proportion of the curve length at a coordinate.
    Proportion {
        #[arg(long = "three-d", help = "Use a SIDE×SIDE×SIDE cube")]
        /// Build a 3D curve instead of a 2D one.
        three_d: bool,

        #[arg(help = "Cells per side")]
        /// Cells per side.
        side: u32,

        #[arg(
            required = true,
            num_args = 1..=3,
            allow_negative_numbers = true,
            help = "One to three coordinates"
        )]
        /// Coordinate to look up.
        coordinate: Vec<f32>,
    },

    #[command(about = "Map a 2D cell to its distance along the classic curve")]
    /// Map a 2D cell to its distance along the classic curve.
    Xy2d {
        #[arg(help = "Grid side, a power of two")]
        /// Grid side.
        side: u32,
        #[arg(help = "Column")]
        /// Column.
        x: u32,
        #[arg(help = "Row")]
        /// Row.
        y: u32,
    },

    #[command(about = "Map a distance along the classic 2D curve to its cell")]
    /// Map a distance along the classic 2D curve to its cell.
    D2xy {
        #[arg(help = "Grid side, a power of two")]
        /// Grid side.
        side: u32,
        #[arg(help = "Distance along the curve")]
        /// Distance along the curve.
        d: u64,
    },
}

/// Log level for a `-v` count.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Print a command's output or exit with an error.
fn report_ok(result: Result<String>) {
    match result {
        Ok(out) => print!("{}", if out.ends_with('\n') { out } else { out + "\n" }),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(level_for(cli.v))
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Index { bits, coords } => cmd::index(&coords, bits),
        Commands::Point {
            dimensions,
            bits,
            index,
        } => cmd::point(&index, dimensions, bits),
        Commands::Curve { three_d, side } => cmd::curve(side, three_d),
        Commands::Proportion {
            three_d,
            side,
            coordinate,
        } => cmd::proportion(side, three_d, &coordinate),
        Commands::Xy2d { side, x, y } => cmd::xy2d(side, x, y),
        Commands::D2xy { side, d } => cmd::d2xy(side, d),
    };
    report_ok(result);
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }

    #[test]
    fn parses_big_index() {
        let cli = Cli::try_parse_from([
            "hspace",
            "point",
            "-d",
            "40",
            "-b",
            "8",
            "123456789012345678901234567890",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Point { dimensions: 40, .. }));
    }
}
