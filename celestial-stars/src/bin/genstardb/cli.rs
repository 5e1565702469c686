//! CLI argument definitions for genstardb

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "genstardb")]
#[command(about = "Convert star catalogs into magnitude-batched, colored JSON datasets")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory containing catalog source files (hip_main.dat[.gz])
    #[arg(long)]
    pub input: PathBuf,

    /// Output directory (cleared and recreated)
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable per-star color normalization
    #[arg(long)]
    pub no_local_norm: bool,

    /// Disable dataset-wide color normalization
    #[arg(long)]
    pub no_global_norm: bool,

    /// Size of the first (brightest) batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Batch size multiplier applied after each batch
    #[arg(long)]
    pub growth_factor: Option<f64>,

    /// Drop stars without RA/Dec instead of placing them at (0, 0)
    #[arg(long)]
    pub drop_missing_position: bool,

    /// Gzip output files
    #[arg(long)]
    pub gzip: bool,

    /// Number of threads for parallel processing (0 = all cores)
    #[arg(short, long, default_value = "0")]
    pub threads: usize,
}
