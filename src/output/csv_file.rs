use std::path::Path;

use csv::WriterBuilder;

use super::{OutputError, Row, HEADERS};
use crate::models::Record;

/// Write records as UTF-8, comma-delimited CSV with a header row.
pub fn write_csv(path: &Path, records: &[Record]) -> Result<(), OutputError> {
    let to_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Header written explicitly so an empty corpus still gets one
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(to_error)?;
    writer.write_record(HEADERS).map_err(to_error)?;

    for record in records {
        writer.serialize(Row::from(record)).map_err(to_error)?;
    }

    writer
        .flush()
        .map_err(|e| to_error(csv::Error::from(e)))?;

    tracing::debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
