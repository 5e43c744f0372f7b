//! Memory-mapped readers for Unity Perception metric files.
//!
//! A dataset root contains one or more `metrics_*.json` files. Each holds a
//! list of metric records; a record belongs to a metric definition and, for
//! rendered object info, carries one value per visible labeled object.

use crate::{Error, Result};
use dsinsights_core::ObjectTable;
use memmap2::Mmap;
use rayon::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A memory-mapped file reader.
///
/// Uses memmap2 to access file contents without copying them into a buffer.
pub struct MappedFileReader {
    mmap: Mmap,
    path: PathBuf,
}

impl MappedFileReader {
    /// Opens a file for memory-mapped reading.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or memory-mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        // SAFETY: The file is opened read-only and we assume it is not modified concurrently.
        // This is the standard safety contract for memory mapping.
        #[allow(unsafe_code)]
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self {
            mmap,
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Returns the file contents as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap[..]
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Returns true if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// Returns the path the reader was opened with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Deserialize)]
struct MetricsFile {
    #[serde(default)]
    metrics: Vec<MetricRecord>,
}

#[derive(Debug, Deserialize)]
struct MetricRecord {
    #[serde(default)]
    capture_id: Option<String>,
    metric_definition: String,
    #[serde(default)]
    values: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RenderedObjectValue {
    label_id: u32,
    label_name: String,
    #[serde(default)]
    instance_id: u64,
    visible_pixels: u64,
}

/// Rows parsed from one metrics file.
#[derive(Debug, Default)]
pub struct MetricsChunk {
    /// Rendered objects of the requested definition.
    pub table: ObjectTable,
    /// Number of metric records that matched the definition id.
    pub matched_records: usize,
}

/// Reader for a single `metrics_*.json` file.
pub struct MetricsFileReader {
    reader: MappedFileReader,
}

impl MetricsFileReader {
    /// Opens a metrics file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or memory-mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            reader: MappedFileReader::open(path)?,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn file_size(&self) -> usize {
        self.reader.len()
    }

    /// Parses the rendered objects recorded under `definition_id`.
    ///
    /// Records of other metric definitions are skipped; their values may
    /// have any shape.
    ///
    /// # Errors
    /// Returns `Error::Json` if the file or a matching record is malformed.
    pub fn read_definition(&self, definition_id: &str) -> Result<MetricsChunk> {
        let path = self.reader.path();
        let file: MetricsFile =
            serde_json::from_slice(self.reader.as_bytes()).map_err(|source| Error::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let mut chunk = MetricsChunk::default();
        for record in file.metrics {
            if record.metric_definition != definition_id {
                continue;
            }
            chunk.matched_records += 1;

            let Some(capture_id) = record.capture_id else {
                log::warn!(
                    "skipping metric without capture id in {}",
                    path.display()
                );
                continue;
            };
            if record.values.is_null() {
                continue;
            }
            let values: Vec<RenderedObjectValue> =
                serde_json::from_value(record.values).map_err(|source| Error::Json {
                    path: path.to_path_buf(),
                    source,
                })?;
            for v in values {
                chunk.table.push(
                    capture_id.as_str(),
                    v.label_id,
                    v.label_name,
                    v.instance_id,
                    v.visible_pixels,
                );
            }
        }
        Ok(chunk)
    }
}

/// Returns true for file names of the form `metrics_*.json`.
fn is_metrics_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("metrics_") && name.ends_with(".json"))
}

/// Finds all metrics files below `data_root`, sorted by path.
///
/// # Errors
/// Returns `DataRootNotFound` if `data_root` is not a directory.
pub fn discover_metrics_files(data_root: &Path) -> Result<Vec<PathBuf>> {
    if !data_root.is_dir() {
        return Err(Error::DataRootNotFound(data_root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(data_root).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() && is_metrics_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Loads the rendered object table of `definition_id` from a dataset root.
///
/// Metrics files are parsed in parallel; rows keep file order.
///
/// # Errors
/// Returns `DataRootNotFound` for a missing root, `DefinitionIdNotFound` if no
/// metric record uses `definition_id`, or a parse error for malformed files.
pub fn load<P: AsRef<Path>>(data_root: P, definition_id: &str) -> Result<ObjectTable> {
    let data_root = data_root.as_ref();
    let files = discover_metrics_files(data_root)?;
    log::debug!(
        "found {} metrics files under {}",
        files.len(),
        data_root.display()
    );

    let chunks: Vec<MetricsChunk> = files
        .par_iter()
        .map(|path| MetricsFileReader::open(path)?.read_definition(definition_id))
        .collect::<Result<_>>()?;

    let matched: usize = chunks.iter().map(|c| c.matched_records).sum();
    if matched == 0 {
        return Err(Error::DefinitionIdNotFound {
            definition_id: definition_id.to_string(),
            data_root: data_root.to_path_buf(),
        });
    }

    let total_rows = chunks.iter().map(|c| c.table.len()).sum();
    let mut table = ObjectTable::with_capacity(total_rows);
    for chunk in &chunks {
        table.append(&chunk.table);
    }

    log::info!(
        "loaded {} objects from {} metric records in {}",
        table.len(),
        matched,
        data_root.display()
    );
    Ok(table)
}
