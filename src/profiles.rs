//! Method profiles: CSV ingestion of per-method runtime statistics.
//!
//! This is the one fallible surface of the crate. A file-open failure, a
//! header mismatch or a malformed numeric cell aborts the whole ingestion
//! with no partial result; a row whose method name does not resolve is
//! dropped and ingestion continues.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::{ParseFloatError, ParseIntError};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hierarchy::ClassHierarchy;
use crate::ir::MethodRef;

/// Expected header columns, in order.
pub const STATS_HEADER: [&str; 8] = [
    "index",
    "name",
    "appear100",
    "appear#",
    "avg_call",
    "avg_order",
    "avg_rank100",
    "min_api_level",
];

/// Errors that abort stats ingestion.
#[derive(Debug, Error)]
pub enum ProfilesError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: unexpected header column {column}: got `{got}`, expected `{expected}`")]
    Header {
        path: PathBuf,
        column: usize,
        expected: &'static str,
        got: String,
    },
    #[error("{path}: line {line} has {got} columns, expected {expected}")]
    ColumnCount {
        path: PathBuf,
        line: usize,
        got: usize,
        expected: usize,
    },
    #[error("{path}: can't parse `{cell}` as a float: {source}")]
    BadFloat {
        path: PathBuf,
        cell: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("{path}: can't parse `{cell}` as an integer: {source}")]
    BadInt {
        path: PathBuf,
        cell: String,
        #[source]
        source: ParseIntError,
    },
}

/// Runtime-derived statistics for one method.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MethodStats {
    /// Percent of profiled runs the method appeared in.
    pub appear_percent: f64,
    /// Average call count per run.
    pub call_count: f64,
    /// Normalized average rank of the first call (percent).
    pub order_percent: f64,
    /// Lowest API level the method was observed on.
    pub min_api_level: u8,
}

/// Per-method stats keyed by resolved method reference. Built once from a
/// CSV file, immutable thereafter. Unresolved rows are simply absent.
#[derive(Debug, Default)]
pub struct MethodProfiles {
    method_stats: HashMap<MethodRef, MethodStats>,
}

impl MethodProfiles {
    /// Parse an aggregated method-stats CSV. The first line must be the
    /// exact [`STATS_HEADER`]; each data row names a method that is resolved
    /// through `hier`.
    pub fn parse_stats_file(
        path: impl AsRef<Path>,
        hier: &ClassHierarchy,
    ) -> Result<Self, ProfilesError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ProfilesError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse_reader(BufReader::new(file), path, hier)
    }

    fn parse_reader<R: BufRead>(
        reader: R,
        path: &Path,
        hier: &ClassHierarchy,
    ) -> Result<Self, ProfilesError> {
        let mut method_stats = HashMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ProfilesError::Io {
                path: path.to_owned(),
                source,
            })?;
            if idx == 0 {
                check_header(path, &line)?;
                continue;
            }
            if let Some((mref, stats)) = parse_row(path, idx + 1, &line, hier)? {
                method_stats.insert(mref, stats);
            }
        }
        info!(
            "method profiles: parsed {} rows from {}",
            method_stats.len(),
            path.display()
        );
        Ok(Self { method_stats })
    }

    pub fn get(&self, mref: &MethodRef) -> Option<&MethodStats> {
        self.method_stats.get(mref)
    }

    pub fn method_stats(&self) -> &HashMap<MethodRef, MethodStats> {
        &self.method_stats
    }

    pub fn len(&self) -> usize {
        self.method_stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.method_stats.is_empty()
    }
}

fn check_header(path: &Path, line: &str) -> Result<(), ProfilesError> {
    let cells: Vec<&str> = line.split(',').collect();
    for (i, &expected) in STATS_HEADER.iter().enumerate() {
        let got = cells.get(i).map(|c| trim_newline(c)).unwrap_or("");
        if got != expected {
            return Err(ProfilesError::Header {
                path: path.to_owned(),
                column: i,
                expected,
                got: got.to_string(),
            });
        }
    }
    if cells.len() != STATS_HEADER.len() {
        return Err(ProfilesError::ColumnCount {
            path: path.to_owned(),
            line: 1,
            got: cells.len(),
            expected: STATS_HEADER.len(),
        });
    }
    Ok(())
}

fn parse_row(
    path: &Path,
    line_no: usize,
    line: &str,
    hier: &ClassHierarchy,
) -> Result<Option<(MethodRef, MethodStats)>, ProfilesError> {
    let cells: Vec<&str> = line.split(',').collect();
    if cells.len() != STATS_HEADER.len() {
        return Err(ProfilesError::ColumnCount {
            path: path.to_owned(),
            line: line_no,
            got: cells.len(),
            expected: STATS_HEADER.len(),
        });
    }

    // Every numeric cell is validated even when it is not retained, so a
    // malformed file always aborts regardless of which columns matter.
    parse_int(path, cells[0])?; // index (line number in the file)
    let appear_percent = parse_float(path, cells[2])?;
    parse_float(path, cells[3])?; // appear# (appear_percent, unnormalized)
    let call_count = parse_float(path, cells[4])?;
    parse_float(path, cells[5])?; // avg_order (order_percent, unnormalized)
    let order_percent = parse_float(path, cells[6])?;
    let min_api_level = parse_byte(path, cells[7])?;
    let stats = MethodStats {
        appear_percent,
        call_count,
        order_percent,
        min_api_level,
    };

    let name = cells[1];
    match hier.resolve_method_desc(name) {
        Some(mref) => Ok(Some((mref, stats))),
        None => {
            debug!("method profiles: failed to resolve {name}");
            Ok(None)
        }
    }
}

// Cells parse fully, modulo at most one trailing newline.
fn trim_newline(cell: &str) -> &str {
    cell.strip_suffix('\n').unwrap_or(cell)
}

fn parse_float(path: &Path, cell: &str) -> Result<f64, ProfilesError> {
    trim_newline(cell)
        .parse()
        .map_err(|source| ProfilesError::BadFloat {
            path: path.to_owned(),
            cell: cell.to_string(),
            source,
        })
}

fn parse_int(path: &Path, cell: &str) -> Result<u64, ProfilesError> {
    trim_newline(cell)
        .parse()
        .map_err(|source| ProfilesError::BadInt {
            path: path.to_owned(),
            cell: cell.to_string(),
            source,
        })
}

fn parse_byte(path: &Path, cell: &str) -> Result<u8, ProfilesError> {
    trim_newline(cell)
        .parse()
        .map_err(|source| ProfilesError::BadInt {
            path: path.to_owned(),
            cell: cell.to_string(),
            source,
        })
}
