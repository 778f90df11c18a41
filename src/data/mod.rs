//! Data module - CSV loading, normalization, filtering and export

mod export;
mod filter;
mod loader;
mod normalizer;

pub use export::{save_csv, to_csv_bytes};
pub use filter::{filter_above, filter_below};
pub use loader::{column_names, load_csv_bytes, LoaderError, Upload};
pub use normalizer::{level_values, normalize, NormalizeError, NormalizedTable};
