//! Magnitude-tiered batch export.
//!
//! The converted population is sorted by visual magnitude and cut into
//! batches whose target size grows geometrically: the brightest stars land in
//! a small first batch, the faint majority in progressively larger ones, so a
//! renderer can load the sky in order of visual importance.
//!
//! Every batch is written as a JSON array of [`OutputStarRecord`], followed by
//! one [`StarsMetadata`] document indexing them.
//!
//! # Batch schedule
//!
//! With an initial target `S₀` and growth factor `F`, a batch is flushed as
//! soon as its size *exceeds* the current target, and the target is then
//! multiplied by `F`. For `S₀ = 100, F = 4` the batch sizes are
//! `101, 401, 1601, ...` with a final partial batch holding the remainder.

pub mod sink;

use log::info;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogFormat, RawStarRecord};
use crate::config::ExportConfig;
use crate::errors::{StarsError, StarsResult};
use crate::photometry::{normalize_global, Rgb};

pub use sink::{DirectorySink, ExportSink, MemorySink};

/// One star ready for export. Serialized with keys in the order `n, p, m, v, c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputStarRecord {
    /// Star number (catalog id).
    pub n: u32,
    /// Position: right ascension (deg), declination (deg), parallax (mas).
    pub p: (f64, f64, f64),
    /// Proper motion in RA and Dec, mas/yr.
    pub m: (f64, f64),
    /// Visual magnitude.
    pub v: f64,
    /// Linear RGB color.
    pub c: Rgb,
}

impl OutputStarRecord {
    pub fn from_raw(raw: &RawStarRecord, color: Rgb) -> Self {
        Self {
            n: raw.catalog_id,
            p: (raw.ra, raw.dec, raw.parallax),
            m: (raw.pm_ra, raw.pm_dec),
            v: raw.v_mag,
            c: color,
        }
    }
}

/// Index of one export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarsMetadata {
    /// Brightest and faintest magnitudes as `(min_v, max_v)`.
    pub v_mag_range: (f64, f64),
    /// `(batch_min_v, batch_max_v, filename)` per batch, brightest first.
    pub files: Vec<(f64, f64, String)>,
    /// Reference epoch of proper motions, Unix seconds.
    pub pm_epoch: i64,
}

/// Geometric batch-size schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchSchedule {
    pub initial_size: usize,
    pub growth_factor: f64,
}

impl BatchSchedule {
    pub fn new(initial_size: usize, growth_factor: f64) -> Self {
        Self {
            initial_size,
            growth_factor,
        }
    }

    /// Splits `items` into contiguous batches following the schedule.
    pub fn partition<'a, T>(&self, items: &'a [T]) -> Vec<&'a [T]> {
        let mut batches = Vec::new();
        let mut target = self.initial_size as f64;
        let mut start = 0;
        for end in 1..=items.len() {
            if (end - start) as f64 > target {
                batches.push(&items[start..end]);
                start = end;
                target *= self.growth_factor;
            }
        }
        if start < items.len() {
            batches.push(&items[start..]);
        }
        batches
    }
}

/// Output filenames of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    batch_template: String,
    metadata: String,
}

impl OutputNames {
    /// `batch_template` must contain `{}`, replaced by the batch index.
    pub fn new(batch_template: &str, metadata: &str) -> Self {
        Self {
            batch_template: batch_template.to_string(),
            metadata: metadata.to_string(),
        }
    }

    pub fn for_catalog(catalog: CatalogFormat, compress: bool) -> Self {
        let suffix = if compress { ".gz" } else { "" };
        Self::new(
            &format!("{}{}", catalog.batch_template(), suffix),
            &format!("{}{}", catalog.metadata_filename(), suffix),
        )
    }

    pub fn batch(&self, index: usize) -> String {
        self.batch_template.replacen("{}", &index.to_string(), 1)
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }
}

/// Sorts by visual magnitude, brightest first. Equal magnitudes keep their order.
pub fn sort_by_magnitude(stars: &mut [OutputStarRecord]) {
    stars.sort_by(|a, b| a.v.total_cmp(&b.v));
}

/// Sorts, normalizes, batches, and writes one catalog's population.
#[derive(Debug, Clone)]
pub struct BatchExporter {
    catalog: CatalogFormat,
    schedule: BatchSchedule,
    names: OutputNames,
    global_normalization: bool,
    significant_digits: u32,
    pm_epoch: i64,
}

impl BatchExporter {
    pub fn new(catalog: CatalogFormat, config: &ExportConfig) -> Self {
        Self {
            catalog,
            schedule: BatchSchedule::new(config.batch_initial_size, config.batch_growth_factor),
            names: OutputNames::for_catalog(catalog, config.compress_output),
            global_normalization: config.enable_global_color_normalization,
            significant_digits: config.color_significant_digits,
            pm_epoch: catalog.pm_epoch(),
        }
    }

    /// Replaces the catalog's default output filenames.
    pub fn with_names(mut self, names: OutputNames) -> Self {
        self.names = names;
        self
    }

    /// Writes every batch and the metadata document to `sink`.
    ///
    /// Fails with [`StarsError::EmptyPopulation`] before writing anything when
    /// `stars` is empty.
    pub fn export(
        &self,
        mut stars: Vec<OutputStarRecord>,
        sink: &mut dyn ExportSink,
    ) -> StarsResult<StarsMetadata> {
        if stars.is_empty() {
            return Err(StarsError::empty_population(self.catalog));
        }
        sort_by_magnitude(&mut stars);
        if self.global_normalization {
            if let Some(max) = normalize_global(&mut stars, self.significant_digits) {
                info!("{}: global color normalization, max channel {}", self.catalog, max);
            }
        }

        let mut files = Vec::new();
        for (index, batch) in self.schedule.partition(&stars).into_iter().enumerate() {
            let name = self.names.batch(index);
            sink.write(&name, &serde_json::to_vec(batch)?)?;
            let (min_v, max_v) = (batch[0].v, batch[batch.len() - 1].v);
            info!(
                "{}: wrote {} ({} stars, V {} .. {})",
                self.catalog,
                name,
                batch.len(),
                min_v,
                max_v
            );
            files.push((min_v, max_v, name));
        }

        let metadata = StarsMetadata {
            v_mag_range: (stars[0].v, stars[stars.len() - 1].v),
            files,
            pm_epoch: self.pm_epoch,
        };
        sink.write(self.names.metadata(), &serde_json::to_vec(&metadata)?)?;
        Ok(metadata)
    }
}
