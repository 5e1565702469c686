//! Star catalog to render-ready dataset pipeline.
//!
//! Reads a fixed-format star catalog (the Hipparcos main catalog), derives a
//! linear RGB color for every star from its B-V index, and writes the
//! population as magnitude-ordered JSON batches plus a metadata index. The
//! brightest stars go in a small first batch so a renderer can show the sky
//! before the faint majority has loaded.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | [`RawStarRecord`](catalog::RawStarRecord), line parsing, sexagesimal fields, source files |
//! | [`photometry`] | B-V → temperature → chromaticity → XYZ → linear sRGB, normalization |
//! | [`export`] | [`OutputStarRecord`](export::OutputStarRecord), batch schedule, [`StarsMetadata`](export::StarsMetadata), sinks |
//! | [`pipeline`] | [`run_pipeline`](pipeline::run_pipeline), [`run_catalog_files`](pipeline::run_catalog_files) |
//! | [`config`] | [`ExportConfig`](config::ExportConfig) |
//! | [`epoch`] | proper-motion reference epoch as Unix time |
//! | [`errors`] | [`StarsError`] and [`StarsResult`] |
//!
//! # Quick Start
//!
//! ```ignore
//! use celestial_stars::catalog::source::find_catalog_files;
//! use celestial_stars::catalog::CatalogFormat;
//! use celestial_stars::config::ExportConfig;
//! use celestial_stars::export::DirectorySink;
//! use celestial_stars::pipeline::run_catalog_files;
//!
//! let config = ExportConfig::default();
//! let files = find_catalog_files("cache/hipparcos".as_ref(), CatalogFormat::Hipparcos)?;
//! let mut sink = DirectorySink::new("output");
//! let run = run_catalog_files(CatalogFormat::Hipparcos, &files, &config, &mut sink)?;
//! println!("{} stars in {} batches", run.stats.exported, run.stats.batches);
//! ```
//!
//! # Output Format
//!
//! Batch files are JSON arrays of `{"n": id, "p": [ra, dec, parallax],
//! "m": [pm_ra, pm_dec], "v": vmag, "c": [r, g, b]}`. The metadata file is
//! `{"v_mag_range": [min, max], "files": [[min, max, name], ...], "pm_epoch": unix}`.
//!
//! # Features
//!
//! - **`cli`** (default): builds the `genstardb` binary.

pub mod catalog;
pub mod config;
pub mod epoch;
pub mod errors;
pub mod export;
pub mod photometry;
pub mod pipeline;

pub use errors::{StarsError, StarsResult};
