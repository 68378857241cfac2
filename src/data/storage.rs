//! CSV persistence for candidate datasets
//!
//! The file has a header row with the columns
//! `full_name, birth_date, university, department, graduation_year,
//! experience_years, technical_score, label`. Only the last three are
//! required when reading; decorative columns may be absent or empty.

use crate::core::{Result, SVMError};
use crate::data::candidate::{validate_features, CandidateDataset, CandidateRecord};
use crate::utils::fs::write_atomically;
use log::{debug, info};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Columns a dataset file must carry
pub const REQUIRED_COLUMNS: [&str; 3] = ["experience_years", "technical_score", "label"];

/// Write a dataset as CSV to any writer
pub fn write_dataset<W: Write>(dataset: &CandidateDataset, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in dataset.records() {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Save a dataset to `path`, creating the parent directory
///
/// The file is replaced atomically.
pub fn save_dataset<P: AsRef<Path>>(dataset: &CandidateDataset, path: P) -> Result<()> {
    let path = path.as_ref();
    write_atomically(path, |file| write_dataset(dataset, file))?;
    info!("Saved {} candidates to {}", dataset.records().len(), path.display());
    Ok(())
}

/// Read and validate a dataset from any reader
pub fn read_dataset<R: Read>(reader: R) -> Result<CandidateDataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == column) {
            return Err(SVMError::InvalidArgument(format!(
                "dataset is missing required column '{column}'"
            )));
        }
    }

    let mut records = Vec::new();
    for (row, result) in csv_reader.deserialize::<CandidateRecord>().enumerate() {
        let record = result.map_err(csv_error)?;
        validate_record(&record).map_err(|err| match err {
            SVMError::InvalidArgument(msg) => {
                SVMError::InvalidArgument(format!("row {}: {msg}", row + 1))
            }
            other => other,
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(SVMError::InvalidArgument(
            "dataset has a header but no rows".to_string(),
        ));
    }

    debug!("Read {} candidate rows", records.len());
    Ok(CandidateDataset::new(records))
}

/// Load a dataset from `path`
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<CandidateDataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = read_dataset(file)?;
    info!("Loaded {} candidates from {}", dataset.records().len(), path.display());
    Ok(dataset)
}

fn validate_record(record: &CandidateRecord) -> Result<()> {
    validate_features(record.experience_years, record.technical_score)?;
    if record.label > 1 {
        return Err(SVMError::InvalidArgument(format!(
            "label must be 0 or 1, got {}",
            record.label
        )));
    }
    Ok(())
}

/// IO failures stay IO errors; everything else is a malformed file
fn csv_error(err: csv::Error) -> SVMError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => SVMError::IoError(io_err),
        _ => SVMError::InvalidArgument(format!("malformed dataset: {message}")),
    }
}
