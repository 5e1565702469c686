//! genstardb: star catalog to render-ready dataset
//!
//! Reads local catalog files, derives star colors from B-V, and writes
//! magnitude-batched JSON with a metadata index.

mod cli;

use anyhow::Context;
use celestial_stars::catalog::source::find_catalog_files;
use celestial_stars::config::{ExportConfig, MissingPositionPolicy};
use celestial_stars::export::sink::prepare_output_dir;
use celestial_stars::export::DirectorySink;
use celestial_stars::pipeline::run_catalog_files;
use celestial_stars::StarsError;
use clap::Parser;
use cli::Cli;
use log::{info, warn};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;
    configure_thread_pool(cli.threads);
    prepare_output_dir(&cli.output)
        .with_context(|| format!("Failed to prepare output directory {:?}", cli.output))?;
    print_plan(&cli, &config);

    let mut sink = DirectorySink::new(&cli.output);
    for &catalog in &config.catalogs {
        if !catalog.is_supported() {
            warn!("{}: catalog format not supported, skipping", catalog);
            continue;
        }
        let files = find_catalog_files(&cli.input, catalog)?;
        if files.is_empty() {
            anyhow::bail!("No {} source files found in {:?}", catalog, cli.input);
        }
        match run_catalog_files(catalog, &files, &config, &mut sink) {
            Ok(run) => print_summary(&run),
            Err(StarsError::UnsupportedFormat(format)) => {
                warn!("{}: catalog format not supported, skipping", format);
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to export {}", catalog)),
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn build_config(cli: &Cli) -> anyhow::Result<ExportConfig> {
    let mut config = match &cli.config {
        Some(path) => ExportConfig::load(path)
            .with_context(|| format!("Failed to load configuration {:?}", path))?,
        None => ExportConfig::default(),
    };
    if cli.no_local_norm {
        config.enable_local_color_normalization = false;
    }
    if cli.no_global_norm {
        config.enable_global_color_normalization = false;
    }
    if let Some(size) = cli.batch_size {
        config.batch_initial_size = size;
    }
    if let Some(factor) = cli.growth_factor {
        config.batch_growth_factor = factor;
    }
    if cli.drop_missing_position {
        config.missing_position = MissingPositionPolicy::Drop;
    }
    if cli.gzip {
        config.compress_output = true;
    }
    config.validate()?;
    Ok(config)
}

fn resolve_threads(threads: usize) -> usize {
    if threads == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        threads
    }
}

fn configure_thread_pool(threads: usize) {
    rayon::ThreadPoolBuilder::new()
        .num_threads(resolve_threads(threads))
        .build_global()
        .ok();
}

fn print_plan(cli: &Cli, config: &ExportConfig) {
    info!("=== Star Catalog Export ===");
    info!("Input directory: {:?}", cli.input);
    info!("Output directory: {:?}", cli.output);
    info!(
        "Catalogs: {}",
        config
            .catalogs
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!(
        "Color normalization: local={}, global={}",
        config.enable_local_color_normalization, config.enable_global_color_normalization
    );
    info!(
        "Batches: initial {}, growth x{}",
        config.batch_initial_size, config.batch_growth_factor
    );
    info!("Threads: {}", resolve_threads(cli.threads));
}

fn print_summary(run: &celestial_stars::pipeline::CatalogRun) {
    let stats = &run.stats;
    info!("=== Summary: {} ===", run.catalog);
    info!("Files read: {}", stats.files);
    info!("Lines read: {}", stats.lines);
    info!("Rejected lines: {}", stats.rejected_lines);
    info!("Color out of range: {}", stats.color_rejected);
    info!("Stars exported: {}", stats.exported);
    info!("Batches: {}", stats.batches);
    info!(
        "V magnitude range: {} .. {}",
        run.metadata.v_mag_range.0, run.metadata.v_mag_range.1
    );
}
