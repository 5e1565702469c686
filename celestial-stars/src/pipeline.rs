//! End-to-end processing of one catalog.
//!
//! ```text
//! lines ──parse──▶ RawStarRecord ──color──▶ OutputStarRecord ──sort/normalize/batch──▶ sink
//! ```
//!
//! Parsing and color conversion are per-record and run on the rayon pool;
//! results are collected in input order. Rejections are logged and counted
//! afterwards on the calling thread, so log output is deterministic too.
//! Sorting, global normalization, and batching need the whole population and
//! run once at the end.

use std::path::PathBuf;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::catalog::source::read_lines;
use crate::catalog::{CatalogFormat, CatalogParser, LineParseError, RawStarRecord};
use crate::config::ExportConfig;
use crate::errors::{StarsError, StarsResult};
use crate::export::{BatchExporter, ExportSink, OutputStarRecord, StarsMetadata};
use crate::photometry::ColorConverter;

/// Counters for one catalog run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub files: usize,
    pub lines: usize,
    pub parsed: usize,
    pub rejected_lines: usize,
    pub color_rejected: usize,
    pub exported: usize,
    pub batches: usize,
}

impl PipelineStats {
    fn merge(&mut self, other: &PipelineStats) {
        self.files += other.files;
        self.lines += other.lines;
        self.parsed += other.parsed;
        self.rejected_lines += other.rejected_lines;
        self.color_rejected += other.color_rejected;
        self.exported += other.exported;
        self.batches += other.batches;
    }
}

/// Result of exporting one catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRun {
    pub catalog: CatalogFormat,
    pub metadata: StarsMetadata,
    pub stats: PipelineStats,
}

struct Rejection {
    index: usize,
    catalog_id: Option<u32>,
    error: StarsError,
}

/// Attaches a color to a parsed star.
pub fn convert_star(
    raw: &RawStarRecord,
    converter: &ColorConverter,
) -> StarsResult<OutputStarRecord> {
    let color = converter.convert(raw.bv)?;
    Ok(OutputStarRecord::from_raw(raw, color))
}

/// Parses and converts `lines`, dropping (and logging) rejected records.
///
/// Blank lines are skipped without counting as rejections.
pub fn process_lines<L>(
    lines: &[L],
    parser: &CatalogParser,
    converter: &ColorConverter,
) -> (Vec<OutputStarRecord>, PipelineStats)
where
    L: AsRef<str> + Sync,
{
    let outcomes: Vec<Option<Result<OutputStarRecord, Rejection>>> = lines
        .par_iter()
        .enumerate()
        .map(|(index, line)| {
            let line = line.as_ref();
            if line.trim().is_empty() {
                return None;
            }
            let outcome = parser
                .parse_line(line)
                .map_err(|e| Rejection {
                    index,
                    catalog_id: None,
                    error: e.into(),
                })
                .and_then(|raw| {
                    convert_star(&raw, converter).map_err(|error| Rejection {
                        index,
                        catalog_id: Some(raw.catalog_id),
                        error,
                    })
                });
            Some(outcome)
        })
        .collect();

    let mut stats = PipelineStats::default();
    let mut stars = Vec::with_capacity(outcomes.len());
    for outcome in outcomes.into_iter().flatten() {
        stats.lines += 1;
        let rejection = match outcome {
            Ok(star) => {
                stats.parsed += 1;
                stars.push(star);
                continue;
            }
            Err(rejection) => rejection,
        };
        match rejection.error {
            StarsError::ColorOutOfRange(error) => {
                stats.parsed += 1;
                stats.color_rejected += 1;
                let id = rejection.catalog_id.unwrap_or_default();
                debug!("conversion error: #{}: {}", id, error);
                warn!(
                    "{}: skipped: #{} -- color out of range: {}",
                    parser.format(),
                    id,
                    error.bv
                );
            }
            error => {
                stats.rejected_lines += 1;
                report_line_rejection(parser, lines[rejection.index].as_ref(), &error);
            }
        }
    }
    stats.exported = stars.len();
    (stars, stats)
}

fn report_line_rejection(parser: &CatalogParser, line: &str, error: &StarsError) {
    if let StarsError::LineParse(LineParseError::UnsupportedFormat(_)) = error {
        return;
    }
    let id = line.split('|').nth(1).map(str::trim).unwrap_or("");
    debug!("parse error: star#{}: {} - {}", id, error, line);
    warn!(
        "{}: skipped: #{} -- invalid data. {}",
        parser.format(),
        id,
        parser.describe_line(line)
    );
}

/// Runs one catalog from in-memory lines through export.
pub fn run_pipeline<L>(
    catalog: CatalogFormat,
    lines: &[L],
    config: &ExportConfig,
    sink: &mut dyn ExportSink,
) -> StarsResult<CatalogRun>
where
    L: AsRef<str> + Sync,
{
    check_supported(catalog)?;
    config.validate()?;
    let parser = CatalogParser::new(catalog, config.missing_position);
    let converter = ColorConverter::from_config(config);
    let (stars, stats) = process_lines(lines, &parser, &converter);
    export(catalog, stars, stats, config, sink)
}

/// Runs one catalog from source files on disk through export.
///
/// Stars from all files form one population and are batched together.
pub fn run_catalog_files(
    catalog: CatalogFormat,
    files: &[PathBuf],
    config: &ExportConfig,
    sink: &mut dyn ExportSink,
) -> StarsResult<CatalogRun> {
    check_supported(catalog)?;
    config.validate()?;
    let parser = CatalogParser::new(catalog, config.missing_position);
    let converter = ColorConverter::from_config(config);

    let mut stars = Vec::new();
    let mut stats = PipelineStats::default();
    for file in files {
        let lines = read_lines(file)?;
        let (file_stars, file_stats) = process_lines(&lines, &parser, &converter);
        info!(
            "{}: {:?}: {} lines, {} stars kept",
            catalog,
            file,
            file_stats.lines,
            file_stars.len()
        );
        stats.merge(&file_stats);
        stats.files += 1;
        stars.extend(file_stars);
    }
    export(catalog, stars, stats, config, sink)
}

fn check_supported(catalog: CatalogFormat) -> StarsResult<()> {
    if catalog.is_supported() {
        Ok(())
    } else {
        Err(StarsError::UnsupportedFormat(catalog))
    }
}

fn export(
    catalog: CatalogFormat,
    stars: Vec<OutputStarRecord>,
    mut stats: PipelineStats,
    config: &ExportConfig,
    sink: &mut dyn ExportSink,
) -> StarsResult<CatalogRun> {
    let metadata = BatchExporter::new(catalog, config).export(stars, sink)?;
    stats.batches = metadata.files.len();
    info!(
        "{}: {} lines, {} rejected, {} color rejected, {} stars in {} batches, V {} .. {}",
        catalog,
        stats.lines,
        stats.rejected_lines,
        stats.color_rejected,
        stats.exported,
        stats.batches,
        metadata.v_mag_range.0,
        metadata.v_mag_range.1
    );
    Ok(CatalogRun {
        catalog,
        metadata,
        stats,
    })
}
