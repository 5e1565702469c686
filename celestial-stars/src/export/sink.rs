//! Destinations for exported files.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::errors::{StarsError, StarsResult};

/// Accepts a named blob for each output file.
pub trait ExportSink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> StarsResult<()>;
}

/// Writes files into a directory. Names ending in `.gz` are gzip-compressed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for DirectorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> StarsResult<()> {
        let path = self.dir.join(name);
        let file = File::create(&path).map_err(|e| StarsError::io(&path, e))?;
        let result = if name.ends_with(".gz") {
            let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
            encoder
                .write_all(bytes)
                .and_then(|_| encoder.finish())
                .and_then(|mut w| w.flush())
        } else {
            let mut writer = BufWriter::new(file);
            writer.write_all(bytes).and_then(|_| writer.flush())
        };
        result.map_err(|e| StarsError::io(&path, e))
    }
}

/// Keeps outputs in memory, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ExportSink for MemorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> StarsResult<()> {
        self.files.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Removes `dir` if it exists and creates it empty.
///
/// Fails when `dir` exists and is not a directory.
pub fn prepare_output_dir(dir: &Path) -> StarsResult<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(StarsError::io(
            dir,
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "output path exists and is not a directory",
            ),
        ));
    }
    if dir.is_dir() {
        fs::remove_dir_all(dir).map_err(|e| StarsError::io(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| StarsError::io(dir, e))
}
