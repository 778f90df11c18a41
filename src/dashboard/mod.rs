//! Dashboard module - Per-interaction request handling

mod handler;
mod table;

pub use handler::{handle, ChartKind, ChartSeries, FilterView, RenderModel, WidgetState};
pub use table::TableView;
