//! Dashboard Request Handler
//! One call per user interaction: upload + widget values in, render model out.

use super::table::TableView;
use crate::config::DashboardConfig;
use crate::data::{
    column_names, filter_above, filter_below, load_csv_bytes, normalize, LoaderError,
    NormalizeError, NormalizedTable, Upload,
};
use crate::stats::{StatsCalculator, SummaryStatistics};
use chrono::NaiveDateTime;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error("The file has no water level readings")]
    NoReadings,
    #[error("Failed to filter readings: {0}")]
    Filter(#[from] PolarsError),
}

/// Error classes shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    MissingColumn,
    Format,
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::Load(LoaderError::EmptyInput) | DashboardError::NoReadings => {
                ErrorKind::EmptyInput
            }
            DashboardError::Normalize(NormalizeError::MissingColumn) => ErrorKind::MissingColumn,
            _ => ErrorKind::Format,
        }
    }
}

/// Chart styles offered in the visualization tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Area,
    Bar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Area, ChartKind::Bar];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "Línea",
            ChartKind::Area => "Área",
            ChartKind::Bar => "Barra",
        }
    }
}

/// Current widget values. Thresholds left as `None` default to the mean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub chart_kind: ChartKind,
    pub above_threshold: Option<f64>,
    pub below_threshold: Option<f64>,
    pub show_raw: bool,
}

impl WidgetState {
    /// Forget per-file slider positions while keeping display choices.
    pub fn reset_thresholds(&mut self) {
        self.above_threshold = None;
        self.below_threshold = None;
    }
}

/// Points of the water level chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: ChartKind,
    /// `[x, level]` pairs; x is Unix seconds when `time_axis`, else the row number.
    pub points: Vec<[f64; 2]>,
    pub time_axis: bool,
}

/// One side of the threshold filter.
#[derive(Debug, Clone)]
pub struct ThresholdSubset {
    pub threshold: f64,
    pub frame: DataFrame,
    pub table: TableView,
}

impl ThresholdSubset {
    fn new(threshold: f64, frame: DataFrame) -> Self {
        let table = TableView::from_frame(&frame);
        Self {
            threshold,
            frame,
            table,
        }
    }
}

/// What the filter tab shows.
#[derive(Debug, Clone)]
pub enum FilterView {
    /// All readings share one value; filters are skipped.
    Uniform { value: f64, table: TableView },
    Thresholds {
        bounds: (f64, f64),
        above: ThresholdSubset,
        below: ThresholdSubset,
    },
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderModel {
    pub file_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub chart: ChartSeries,
    pub statistics: SummaryStatistics,
    pub filters: FilterView,
    pub raw: Option<TableView>,
}

/// Run the full pipeline for one interaction.
///
/// Parsing, normalization, statistics and filtering all start from the
/// uploaded bytes; nothing is carried over from previous calls.
pub fn handle(
    upload: &Upload,
    widgets: &WidgetState,
    config: &DashboardConfig,
) -> Result<RenderModel, DashboardError> {
    let raw = load_csv_bytes(&upload.bytes, config)?;
    log::debug!("{}: columns {:?}", upload.file_name, column_names(&raw));
    let table = normalize(raw)?;

    let levels = table.levels()?;
    let statistics = StatsCalculator::compute_summary(&levels);
    if statistics.count == 0 {
        return Err(DashboardError::NoReadings);
    }

    let chart = chart_series(&table, &levels, widgets.chart_kind)?;
    let filters = filter_view(&table, &statistics, widgets)?;
    let raw = widgets
        .show_raw
        .then(|| TableView::from_frame(table.frame()));

    Ok(RenderModel {
        file_name: upload.file_name.clone(),
        row_count: table.height(),
        column_count: table.frame().width(),
        chart,
        statistics,
        filters,
        raw,
    })
}

fn chart_series(
    table: &NormalizedTable,
    levels: &[Option<f64>],
    kind: ChartKind,
) -> Result<ChartSeries, DashboardError> {
    let timestamps = table.timestamps()?;
    let points = match &timestamps {
        Some(ts) => ts
            .iter()
            .zip(levels)
            .filter_map(|(t, v)| v.map(|v| [unix_seconds(t), v]))
            .collect(),
        None => levels
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| [i as f64, v]))
            .collect(),
    };

    Ok(ChartSeries {
        kind,
        points,
        time_axis: table.is_time_indexed(),
    })
}

fn unix_seconds(t: &NaiveDateTime) -> f64 {
    t.and_utc().timestamp_micros() as f64 / 1_000_000.0
}

fn filter_view(
    table: &NormalizedTable,
    statistics: &SummaryStatistics,
    widgets: &WidgetState,
) -> Result<FilterView, DashboardError> {
    if statistics.is_uniform() {
        log::warn!(
            "All readings equal {:.2}; threshold filters skipped",
            statistics.min
        );
        return Ok(FilterView::Uniform {
            value: statistics.min,
            table: TableView::from_frame(table.frame()),
        });
    }

    let (min, max) = (statistics.min, statistics.max);
    let clamp = |value: Option<f64>| value.unwrap_or(statistics.mean).clamp(min, max);
    let above_threshold = clamp(widgets.above_threshold);
    let below_threshold = clamp(widgets.below_threshold);

    let above = filter_above(table.frame(), above_threshold)?;
    let below = filter_below(table.frame(), below_threshold)?;

    Ok(FilterView::Thresholds {
        bounds: (min, max),
        above: ThresholdSubset::new(above_threshold, above),
        below: ThresholdSubset::new(below_threshold, below),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{level_values, to_csv_bytes};

    fn upload(csv: &str) -> Upload {
        Upload::new("lecturas.csv", csv.as_bytes().to_vec())
    }

    fn run(csv: &str, widgets: &WidgetState) -> Result<RenderModel, DashboardError> {
        handle(&upload(csv), widgets, &DashboardConfig::default())
    }

    const THREE_READINGS: &str = "Time,potenciometro\n\
        2024-03-01 08:00:00,10\n\
        2024-03-01 09:00:00,20\n\
        2024-03-01 10:00:00,30\n";

    #[test]
    fn thresholds_default_to_mean() {
        let model = run(THREE_READINGS, &WidgetState::default()).unwrap();
        assert_eq!(model.row_count, 3);
        assert_eq!(model.statistics.mean, 20.0);

        let FilterView::Thresholds { bounds, above, below } = model.filters else {
            panic!("expected threshold filters");
        };
        assert_eq!(bounds, (10.0, 30.0));
        assert_eq!(above.threshold, 20.0);
        assert_eq!(level_values(&above.frame).unwrap(), vec![Some(30.0)]);
        assert_eq!(below.threshold, 20.0);
        assert_eq!(level_values(&below.frame).unwrap(), vec![Some(10.0)]);
    }

    #[test]
    fn slider_values_are_clamped() {
        let widgets = WidgetState {
            above_threshold: Some(-5.0),
            below_threshold: Some(25.0),
            ..WidgetState::default()
        };
        let model = run(THREE_READINGS, &widgets).unwrap();

        let FilterView::Thresholds { above, below, .. } = model.filters else {
            panic!("expected threshold filters");
        };
        assert_eq!(above.threshold, 10.0);
        assert_eq!(above.table.len(), 2);
        assert_eq!(below.threshold, 25.0);
        assert_eq!(below.table.len(), 2);
    }

    #[test]
    fn uniform_readings_skip_filters() {
        let model = run("nivel\n5\n5\n5\n5\n", &WidgetState::default()).unwrap();
        match model.filters {
            FilterView::Uniform { value, table } => {
                assert_eq!(value, 5.0);
                assert_eq!(table.len(), 4);
            }
            FilterView::Thresholds { .. } => panic!("filters should be skipped"),
        }
        assert_eq!(model.statistics.std, 0.0);
    }

    #[test]
    fn time_axis_uses_timestamps() {
        let model = run(THREE_READINGS, &WidgetState::default()).unwrap();
        assert!(model.chart.time_axis);
        assert_eq!(model.chart.points.len(), 3);
        assert_eq!(model.chart.points[1][0] - model.chart.points[0][0], 3600.0);
        assert_eq!(model.chart.points[2][1], 30.0);
    }

    #[test]
    fn row_axis_without_time() {
        let widgets = WidgetState {
            chart_kind: ChartKind::Bar,
            show_raw: true,
            ..WidgetState::default()
        };
        let model = run("a,b\n1,x\n2,y\n", &widgets).unwrap();
        assert!(!model.chart.time_axis);
        assert_eq!(model.chart.kind, ChartKind::Bar);
        assert_eq!(model.chart.points, vec![[0.0, 1.0], [1.0, 2.0]]);

        let raw = model.raw.unwrap();
        assert_eq!(raw.columns, vec!["nivel_agua", "b"]);
    }

    #[test]
    fn untimed_single_column_gets_thresholds() {
        let model = run("lectura\n10\n20\n30\n", &WidgetState::default()).unwrap();
        assert!(!model.chart.time_axis);

        let FilterView::Thresholds { above, below, .. } = model.filters else {
            panic!("expected threshold filters");
        };
        assert_eq!(above.table.columns, vec!["nivel_agua"]);
        assert_eq!(level_values(&above.frame).unwrap(), vec![Some(30.0)]);
        assert_eq!(level_values(&below.frame).unwrap(), vec![Some(10.0)]);

        let exported = String::from_utf8(to_csv_bytes(&above.frame).unwrap()).unwrap();
        assert_eq!(exported.lines().collect::<Vec<_>>(), vec!["nivel_agua", "30"]);
    }

    #[test]
    fn raw_table_only_when_requested() {
        let model = run(THREE_READINGS, &WidgetState::default()).unwrap();
        assert!(model.raw.is_none());
    }

    #[test]
    fn errors_are_classified() {
        let widgets = WidgetState::default();
        assert_eq!(run("", &widgets).unwrap_err().kind(), ErrorKind::EmptyInput);
        assert_eq!(
            run("Time\n2024-03-01\n", &widgets).unwrap_err().kind(),
            ErrorKind::MissingColumn
        );
        assert_eq!(
            run("Time,v\nnunca,1\n", &widgets).unwrap_err().kind(),
            ErrorKind::Format
        );
        assert_eq!(
            run("v\nalto\nbajo\n", &widgets).unwrap_err().kind(),
            ErrorKind::Format
        );
        assert!(matches!(
            run("v\n", &widgets).unwrap_err(),
            DashboardError::NoReadings
        ));
    }

    #[test]
    fn exported_subset_reloads_with_same_levels() {
        let model = run(THREE_READINGS, &WidgetState {
            above_threshold: Some(15.0),
            ..WidgetState::default()
        })
        .unwrap();
        let FilterView::Thresholds { above, .. } = model.filters else {
            panic!("expected threshold filters");
        };

        let exported = to_csv_bytes(&above.frame).unwrap();
        let reloaded = run(
            std::str::from_utf8(&exported).unwrap(),
            &WidgetState::default(),
        )
        .unwrap();
        assert_eq!(reloaded.row_count, 2);
        let levels: Vec<f64> = reloaded.chart.points.iter().map(|p| p[1]).collect();
        assert_eq!(levels, vec![20.0, 30.0]);
    }
}
