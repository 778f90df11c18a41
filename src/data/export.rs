//! CSV Export Module
//! Serializes a filtered table back to CSV for download.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to save file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Encode a table as UTF-8 CSV with a header row.
pub fn to_csv_bytes(df: &DataFrame) -> Result<Vec<u8>, ExportError> {
    let mut out = df.clone();
    let mut buf: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut out)?;
    Ok(buf)
}

/// Write a table as CSV to `path`, returning the number of bytes written.
pub fn save_csv(df: &DataFrame, path: &Path) -> Result<usize, ExportError> {
    let bytes = to_csv_bytes(df)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::filter::filter_above;
    use crate::data::loader::load_csv_bytes;
    use crate::data::normalizer::normalize;

    #[test]
    fn filtered_export_round_trips() {
        let csv = b"Time,sensor\n\
            2024-03-01 08:00:00,10.5\n\
            2024-03-01 09:00:00,20.25\n\
            2024-03-01 10:00:00,30.0\n\
            2024-03-01 11:00:00,40.75\n";
        let config = DashboardConfig::default();
        let table = normalize(load_csv_bytes(csv, &config).unwrap()).unwrap();
        let above = filter_above(table.frame(), 20.0).unwrap();

        let exported = to_csv_bytes(&above).unwrap();
        let text = String::from_utf8(exported.clone()).unwrap();
        assert!(text.starts_with("Time,nivel_agua"));

        let reloaded = normalize(load_csv_bytes(&exported, &config).unwrap()).unwrap();
        assert!(reloaded.is_time_indexed());
        assert_eq!(reloaded.height(), above.height());
        assert_eq!(
            reloaded.levels().unwrap(),
            vec![Some(20.25), Some(30.0), Some(40.75)]
        );
        assert_eq!(
            reloaded.timestamps().unwrap(),
            normalize(above).unwrap().timestamps().unwrap()
        );
    }

    #[test]
    fn untimed_export_keeps_level_first() {
        let df = df! { "nivel_agua" => [3.0, 4.0], "estado" => ["ok", "ok"] }.unwrap();
        let text = String::from_utf8(to_csv_bytes(&df).unwrap()).unwrap();
        assert_eq!(text.lines().next(), Some("nivel_agua,estado"));
        assert_eq!(text.lines().count(), 3);
    }
}
