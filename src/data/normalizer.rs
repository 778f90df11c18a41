//! Data Normalizer Module
//! Selects the water level column and turns `Time` into a timestamp index.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use polars::prelude::*;
use thiserror::Error;

/// Name given to the measured value column.
pub const LEVEL_COLUMN: &str = "nivel_agua";
/// Name of the optional timestamp column.
pub const TIME_COLUMN: &str = "Time";

/// Date given to readings that only carry a time of day.
pub fn time_only_date() -> NaiveDate {
    DateTime::<Utc>::UNIX_EPOCH.date_naive()
}

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No data column found next to 'Time'")]
    MissingColumn,
    #[error("Invalid timestamp '{value}' in row {row}")]
    InvalidTimestamp { row: usize, value: String },
    #[error("Column 'nivel_agua' is not numeric: {0}")]
    NonNumeric(PolarsError),
    #[error("Column '{0}' cannot become 'nivel_agua': another column already has that name")]
    DuplicateLevelColumn(String),
}

/// A table with exactly one `nivel_agua` column and an optional time index.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    frame: DataFrame,
    time_indexed: bool,
}

impl NormalizedTable {
    /// The normalized frame. When time indexed, `Time` is the first column.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn is_time_indexed(&self) -> bool {
        self.time_indexed
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Water level values in row order; nulls are kept as `None`.
    pub fn levels(&self) -> Result<Vec<Option<f64>>, NormalizeError> {
        level_values(&self.frame)
    }

    /// Parsed index values in row order.
    pub fn timestamps(&self) -> Result<Option<Vec<NaiveDateTime>>, NormalizeError> {
        if !self.time_indexed {
            return Ok(None);
        }
        Ok(Some(index_values(&self.frame)?))
    }
}

/// Position of the first column that is not `Time`, in file order.
pub fn value_column_index(names: &[String]) -> Option<usize> {
    names.iter().position(|name| name != TIME_COLUMN)
}

/// Rename the value column to `nivel_agua` and parse `Time` into the index.
///
/// The whole table is rejected on the first unparseable timestamp.
pub fn normalize(mut df: DataFrame) -> Result<NormalizedTable, NormalizeError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let has_time = names.iter().any(|name| name == TIME_COLUMN);

    let value_idx = if has_time {
        value_column_index(&names).ok_or(NormalizeError::MissingColumn)?
    } else {
        // Positional: the first column wins whatever its name.
        0
    };
    let value_name = names.get(value_idx).ok_or(NormalizeError::MissingColumn)?;

    if value_name != LEVEL_COLUMN {
        if names.iter().any(|name| name == LEVEL_COLUMN) {
            return Err(NormalizeError::DuplicateLevelColumn(value_name.clone()));
        }
        df.rename(value_name, LEVEL_COLUMN.into())?;
        // `rename` keeps the old cached schema; lazy queries need a fresh one.
        df = DataFrame::new(df.take_columns())?;
    }
    log::debug!("Using column '{}' as {}", value_name, LEVEL_COLUMN);

    if !has_time {
        return Ok(NormalizedTable {
            frame: df,
            time_indexed: false,
        });
    }

    let micros = parse_time_column(df.column(TIME_COLUMN)?)?;
    let index = Series::new(TIME_COLUMN.into(), micros)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;
    df.with_column(index)?;

    let mut order = vec![TIME_COLUMN.to_string()];
    order.extend(
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| name != TIME_COLUMN),
    );
    let frame = df.select(order)?;

    Ok(NormalizedTable {
        frame,
        time_indexed: true,
    })
}

fn parse_time_column(column: &Column) -> Result<Vec<i64>, NormalizeError> {
    let as_text = column.as_materialized_series().cast(&DataType::String)?;
    as_text
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            let value = value.unwrap_or_default();
            parse_timestamp(value)
                .map(|dt| dt.and_utc().timestamp_micros())
                .ok_or_else(|| NormalizeError::InvalidTimestamp {
                    row,
                    value: value.to_string(),
                })
        })
        .collect()
}

/// Parse the timestamp layouts commonly written by loggers and spreadsheets.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    static FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];
    static DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%Y%m%d",
        "%b %d, %Y",
        "%B %d, %Y",
    ];
    static TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    // Loggers without a real-time clock write only the time of day.
    for fmt in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, fmt) {
            return Some(time_only_date().and_time(time));
        }
    }
    None
}

/// Read `nivel_agua` as floats. Text that is not a number is an error.
pub fn level_values(df: &DataFrame) -> Result<Vec<Option<f64>>, NormalizeError> {
    let levels = df
        .column(LEVEL_COLUMN)?
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .map_err(NormalizeError::NonNumeric)?;
    Ok(levels.f64()?.into_iter().collect())
}

/// Read the `Time` index of a normalized frame.
pub fn index_values(df: &DataFrame) -> Result<Vec<NaiveDateTime>, NormalizeError> {
    let micros = df
        .column(TIME_COLUMN)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    Ok(micros
        .i64()?
        .into_iter()
        .filter_map(|us| us.and_then(DateTime::from_timestamp_micros))
        .map(|dt| dt.naive_utc())
        .collect())
}
