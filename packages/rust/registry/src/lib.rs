//! Registry table loader.
//!
//! Reads the national administrative-division registry (code, full name,
//! exists/abolished flag) from CSV or tab-separated text and yields
//! [`SourceRecord`]s in file order. Column names and the delimiter come from
//! [`SourceConfig`].
//!
//! Input must be UTF-8. The registry is distributed as CP949; convert it
//! first, e.g. `iconv -f cp949 -t utf-8`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, instrument};

use regiontree_shared::{RegionTreeError, Result, SourceConfig, SourceRecord, Status};

/// Positions of the three columns the loader needs.
#[derive(Debug, Clone, Copy)]
struct Columns {
    code: usize,
    name: usize,
    status: usize,
}

/// Streaming reader over a registry table.
pub struct RegistryReader<R: Read> {
    inner: csv::Reader<R>,
    columns: Columns,
    active_status: String,
}

impl RegistryReader<File> {
    /// Open a registry file on disk.
    pub fn from_path(path: &Path, config: &SourceConfig) -> Result<Self> {
        let file = File::open(path).map_err(|e| RegionTreeError::io(path, e))?;
        debug!(path = %path.display(), "opened registry file");
        Self::from_reader(file, config)
    }
}

impl<R: Read> RegistryReader<R> {
    /// Wrap any reader. The header row is read and validated immediately.
    pub fn from_reader(reader: R, config: &SourceConfig) -> Result<Self> {
        let mut inner = csv::ReaderBuilder::new()
            .delimiter(config.delimiter_byte()?)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = inner.headers().map_err(csv_error)?.clone();
        let find = |wanted: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == wanted)
                .ok_or_else(|| {
                    RegionTreeError::validation(format!(
                        "missing column '{wanted}' (found: {})",
                        headers.iter().collect::<Vec<_>>().join(", ")
                    ))
                })
        };

        let columns = Columns {
            code: find(&config.code_column)?,
            name: find(&config.name_column)?,
            status: find(&config.status_column)?,
        };

        Ok(Self {
            inner,
            columns,
            active_status: config.active_status.clone(),
        })
    }

    /// Iterate over rows in file order.
    pub fn records(&mut self) -> impl Iterator<Item = Result<SourceRecord>> + '_ {
        let columns = self.columns;
        let active_status = self.active_status.as_str();
        self.inner
            .records()
            .map(move |row| to_record(&row.map_err(csv_error)?, columns, active_status))
    }

    /// Read every row, stopping at the first malformed one.
    #[instrument(skip_all)]
    pub fn read_all(mut self) -> Result<Vec<SourceRecord>> {
        let records = self.records().collect::<Result<Vec<_>>>()?;
        debug!(rows = records.len(), "registry table loaded");
        Ok(records)
    }
}

/// Keep only rows still in force, preserving order.
pub fn filter_active(records: Vec<SourceRecord>) -> Vec<SourceRecord> {
    records.into_iter().filter(SourceRecord::is_active).collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_record(row: &csv::StringRecord, columns: Columns, active_status: &str) -> Result<SourceRecord> {
    let field = |idx: usize, label: &str| -> Result<String> {
        row.get(idx).map(str::to_string).ok_or_else(|| {
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            RegionTreeError::parse(format!("line {line}: missing {label} field"))
        })
    };

    let code = field(columns.code, "code")?;
    let full_name = field(columns.name, "name")?;
    let status = Status::from_flag(&field(columns.status, "status")?, active_status);

    Ok(SourceRecord::new(code, full_name, status))
}

fn csv_error(err: csv::Error) -> RegionTreeError {
    match err.kind() {
        csv::ErrorKind::Io(_) => RegionTreeError::parse(format!("read failed: {err}")),
        csv::ErrorKind::Utf8 { .. } => RegionTreeError::parse(format!(
            "{err} (input must be UTF-8; convert CP949 exports with `iconv -f cp949 -t utf-8`)"
        )),
        _ => RegionTreeError::parse(err.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
