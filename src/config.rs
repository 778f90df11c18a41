//! Application Configuration
//! Static settings shared by the loader, exporter and main window.

/// Default file name offered when saving filtered readings.
pub const EXPORT_FILE_NAME: &str = "nivel_agua_filtrado.csv";

/// MIME type of exported files.
pub const EXPORT_MIME: &str = "text/csv";

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Rows scanned by Polars to infer column types.
    pub infer_schema_length: Option<usize>,
    /// Suggested name for the filtered CSV export.
    pub export_file_name: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            infer_schema_length: Some(10000),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            window_size: [1400.0, 850.0],
            min_window_size: [1000.0, 650.0],
        }
    }
}
