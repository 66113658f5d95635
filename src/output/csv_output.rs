//! CSV persistence for the joined dataset

use crate::dataset::DatasetRow;
use crate::ScrapeError;
use std::fs;
use std::path::Path;

/// Writes rows with a header line; empty `Option`s become empty fields
///
/// # Arguments
///
/// * `rows` - The joined rows, in output order
/// * `output_path` - Destination file; missing parent directories are created
pub fn write_dataset_csv(rows: &[DatasetRow], output_path: &Path) -> Result<(), ScrapeError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(output_path)?;
    if rows.is_empty() {
        // serialize() only emits the header alongside the first record
        writer.write_record(crate::dataset::COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} rows to {}", rows.len(), output_path.display());
    Ok(())
}

/// Reads rows back from a file produced by [`write_dataset_csv`]
pub fn read_dataset_csv(path: &Path) -> Result<Vec<DatasetRow>, ScrapeError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
