//! CSV Data Loader Module
//! Turns uploaded CSV bytes into a raw Polars table.

use crate::config::DashboardConfig;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The file is empty or has no columns")]
    EmptyInput,
    #[error("Failed to read CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
}

/// A file selected by the user, kept as raw bytes for the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk into an upload buffer.
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Ok(Self::new(file_name, bytes))
    }
}

/// Parse CSV bytes (header row required) into a DataFrame.
pub fn load_csv_bytes(bytes: &[u8], config: &DashboardConfig) -> Result<DataFrame, LoaderError> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(LoaderError::EmptyInput);
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(config.infer_schema_length)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;

    if df.width() == 0 {
        return Err(LoaderError::EmptyInput);
    }

    log::debug!("Parsed CSV: {} rows, {} columns", df.height(), df.width());
    Ok(df)
}

/// Get list of column names from a DataFrame.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_header_and_rows() {
        let csv = b"Time,Sensor\n2024-01-01 00:00:00,10\n2024-01-01 00:01:00,20\n";
        let df = load_csv_bytes(csv, &DashboardConfig::default()).unwrap();
        assert_eq!(column_names(&df), vec!["Time", "Sensor"]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn header_only_file_has_zero_rows() {
        let df = load_csv_bytes(b"lectura\n", &DashboardConfig::default()).unwrap();
        assert_eq!(df.width(), 1);
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = load_csv_bytes(b"", &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, LoaderError::EmptyInput));

        let err = load_csv_bytes(b"  \n\n", &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, LoaderError::EmptyInput));
    }

    #[test]
    fn upload_keeps_file_name() {
        let upload = Upload::new("datos.csv", b"a\n1\n".to_vec());
        assert_eq!(upload.file_name, "datos.csv");
        assert_eq!(upload.bytes.len(), 4);
    }
}
