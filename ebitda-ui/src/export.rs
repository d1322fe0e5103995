//! CSV export of the comparison table.
//!
//! ```csv
//! metric,current,original_scenario,variance
//! Revenue,200000,200000,0
//! Variable Cost,49500,49500,0
//! ```
//!
//! Values are written unformatted so the file opens cleanly in a spreadsheet.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use ebitda_core::ComparisonRow;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot create '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Write(#[from] csv::Error),

    #[error("flush failed: {0}")]
    Flush(#[from] std::io::Error),
}

/// One CSV line, in column order.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    metric: &'a str,
    current: Decimal,
    original_scenario: Decimal,
    variance: Decimal,
}

impl<'a> From<&'a ComparisonRow> for ExportRow<'a> {
    fn from(row: &'a ComparisonRow) -> Self {
        Self {
            metric: row.metric.label(),
            current: row.current.normalize(),
            original_scenario: row.baseline.normalize(),
            variance: row.variance.normalize(),
        }
    }
}

/// Writes `rows` with a header line to any writer.
pub fn write_comparison<W: Write>(
    writer: W,
    rows: &[ComparisonRow],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(ExportRow::from(row))?;
    }
    csv.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the comparison to it.
pub fn export_comparison(
    path: &Path,
    rows: &[ComparisonRow],
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_comparison(file, rows)?;
    info!(path = %path.display(), rows = rows.len(), "comparison exported");
    Ok(())
}
