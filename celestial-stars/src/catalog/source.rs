//! Catalog source files on local disk.
//!
//! Files ending in `.gz` are decompressed transparently.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use super::CatalogFormat;
use crate::errors::{StarsError, StarsResult};

/// Lists the source files of `format` in `dir`, sorted by name.
pub fn find_catalog_files(dir: &Path, format: CatalogFormat) -> StarsResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| StarsError::io(dir, e))? {
        let path = entry.map_err(|e| StarsError::io(dir, e))?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| format.matches_source_file(n));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "gz")
}

/// Opens `path` for buffered line reading, decompressing `.gz` files.
pub fn open_catalog(path: &Path) -> StarsResult<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| StarsError::io(path, e))?;
    let reader: Box<dyn Read> = if is_gzipped(path) {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(file)
    };
    Ok(Box::new(BufReader::new(reader)))
}

/// Reads every line of a catalog file.
pub fn read_lines(path: &Path) -> StarsResult<Vec<String>> {
    let reader = open_catalog(path)?;
    let mut lines = Vec::with_capacity(120_000);
    for line in reader.lines() {
        lines.push(line.map_err(|e| StarsError::io(path, e))?);
    }
    Ok(lines)
}
