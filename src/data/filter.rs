//! Threshold Filter Module
//! Row selection on `nivel_agua` with strict inequalities.

use super::normalizer::LEVEL_COLUMN;
use polars::prelude::*;

/// Rows whose water level is strictly greater than `threshold`.
pub fn filter_above(df: &DataFrame, threshold: f64) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(level().gt(lit(threshold)))
        .collect()
}

/// Rows whose water level is strictly less than `threshold`.
pub fn filter_below(df: &DataFrame, threshold: f64) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(level().lt(lit(threshold)))
        .collect()
}

fn level() -> Expr {
    col(LEVEL_COLUMN).cast(DataType::Float64)
}
