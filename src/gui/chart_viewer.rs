//! Chart Viewer Widget
//! Central tabbed area: chart, statistics, filters and sensor information.

use crate::charts::ChartPlotter;
use crate::dashboard::{ChartKind, FilterView, RenderModel, WidgetState};
use crate::sensor::MAIN_TANK;
use egui::{Color32, ComboBox, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 420.0;
const TABLE_HEIGHT: f32 = 320.0;

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Chart,
    Statistics,
    Filters,
    System,
}

/// Actions triggered from the viewer
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerAction {
    None,
    ExportFiltered,
}

/// Central panel with one tab per dashboard section.
#[derive(Default)]
pub struct ChartViewer {
    pub tab: Tab,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the viewer. Widget edits are written back into `widgets`.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        model: &RenderModel,
        widgets: &mut WidgetState,
    ) -> ViewerAction {
        let mut action = ViewerAction::None;

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, Tab::Chart, "📈 Visualización");
            ui.selectable_value(&mut self.tab, Tab::Statistics, "📊 Estadísticas");
            ui.selectable_value(&mut self.tab, Tab::Filters, "🔍 Filtros");
            ui.selectable_value(&mut self.tab, Tab::System, "🗺 Información del Sistema");
        });
        ui.separator();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.tab {
                Tab::Chart => Self::show_chart_tab(ui, model, widgets),
                Tab::Statistics => Self::show_statistics_tab(ui, model),
                Tab::Filters => action = Self::show_filters_tab(ui, model, widgets),
                Tab::System => Self::show_system_tab(ui),
            });

        action
    }

    /// Placeholder shown before any file is loaded, or after a failed load.
    pub fn show_empty(ui: &mut egui::Ui, error: Option<&str>) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(
                RichText::new("💧 Monitoreo y Análisis del Nivel de Agua en el Tanque Principal")
                    .size(20.0)
                    .strong(),
            );
            ui.add_space(20.0);
            match error {
                Some(message) => {
                    ui.label(
                        RichText::new(format!("Error al procesar el archivo: {message}"))
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                    ui.label(
                        "Verifique que el archivo CSV tenga al menos una columna con datos válidos.",
                    );
                }
                None => {
                    ui.label(
                        RichText::new(
                            "⚠ Por favor, cargue un archivo CSV con los datos del nivel de agua.",
                        )
                        .color(Color32::from_rgb(243, 156, 18)),
                    );
                }
            }
        });
    }

    fn show_chart_tab(ui: &mut egui::Ui, model: &RenderModel, widgets: &mut WidgetState) {
        ui.label(RichText::new("Visualización del Nivel de Agua").size(18.0).strong());
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Tipo de gráfico:");
            ComboBox::from_id_salt("chart_kind")
                .selected_text(widgets.chart_kind.label())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut widgets.chart_kind, kind, kind.label());
                    }
                });
        });
        ui.add_space(8.0);

        ChartPlotter::draw_level_chart(ui, &model.chart, CHART_HEIGHT);
        ui.add_space(10.0);

        ui.checkbox(&mut widgets.show_raw, "Mostrar datos originales");
        if let Some(raw) = &model.raw {
            ui.add_space(5.0);
            ChartPlotter::draw_table(ui, "raw_table", raw, TABLE_HEIGHT);
        }
    }

    fn show_statistics_tab(ui: &mut egui::Ui, model: &RenderModel) {
        let stats = &model.statistics;
        ui.label(RichText::new("Análisis Estadístico del Nivel de Agua").size(18.0).strong());
        ui.add_space(8.0);

        ui.columns(2, |cols| {
            ChartPlotter::draw_stats_table(&mut cols[0], stats);

            ChartPlotter::draw_metric(&mut cols[1], "Nivel Promedio", stats.mean);
            ChartPlotter::draw_metric(&mut cols[1], "Nivel Máximo", stats.max);
            ChartPlotter::draw_metric(&mut cols[1], "Nivel Mínimo", stats.min);
            ChartPlotter::draw_metric(&mut cols[1], "Desviación Estándar", stats.std);
        });
    }

    fn show_filters_tab(
        ui: &mut egui::Ui,
        model: &RenderModel,
        widgets: &mut WidgetState,
    ) -> ViewerAction {
        let mut action = ViewerAction::None;
        ui.label(RichText::new("Filtrado de Datos de Nivel de Agua").size(18.0).strong());
        ui.add_space(8.0);

        match &model.filters {
            FilterView::Uniform { value, table } => {
                ui.label(
                    RichText::new(format!("⚠ Todos los valores registrados son iguales: {value:.2}"))
                        .color(Color32::from_rgb(243, 156, 18)),
                );
                ui.label("No es posible aplicar filtros cuando no hay variación en los datos.");
                ui.add_space(8.0);
                ChartPlotter::draw_table(ui, "uniform_table", table, TABLE_HEIGHT);
            }
            FilterView::Thresholds {
                bounds,
                above,
                below,
            } => {
                let (min, max) = *bounds;
                ui.columns(2, |cols| {
                    let mut above_value = above.threshold;
                    let slider = egui::Slider::new(&mut above_value, min..=max)
                        .text("Nivel mínimo (filtrar valores por encima de este)");
                    if cols[0].add(slider).changed() {
                        widgets.above_threshold = Some(above_value);
                    }
                    cols[0].label(format!(
                        "Registros con nivel de agua superior a {:.2}:",
                        above.threshold
                    ));
                    ChartPlotter::draw_table(&mut cols[0], "above_table", &above.table, TABLE_HEIGHT);

                    let mut below_value = below.threshold;
                    let slider = egui::Slider::new(&mut below_value, min..=max)
                        .text("Nivel máximo (filtrar valores por debajo de este)");
                    if cols[1].add(slider).changed() {
                        widgets.below_threshold = Some(below_value);
                    }
                    cols[1].label(format!(
                        "Registros con nivel de agua inferior a {:.2}:",
                        below.threshold
                    ));
                    ChartPlotter::draw_table(&mut cols[1], "below_table", &below.table, TABLE_HEIGHT);
                });

                ui.add_space(10.0);
                if ui.button("⬇ Descargar datos filtrados").clicked() {
                    action = ViewerAction::ExportFiltered;
                }
            }
        }

        action
    }

    fn show_system_tab(ui: &mut egui::Ui) {
        ui.label(RichText::new("Información del Sistema de Medición").size(18.0).strong());
        ui.add_space(8.0);

        ui.columns(2, |cols| {
            cols[0].label(RichText::new("Ubicación del Sensor").size(15.0).strong());
            cols[0].label(RichText::new(MAIN_TANK.site).strong());
            for (label, value) in MAIN_TANK.location_rows() {
                cols[0].label(format!("• {label}: {value}"));
            }
            cols[0].label(format!("• Ciudad: {}", MAIN_TANK.city));

            cols[1].label(RichText::new("Detalles del Sistema").size(15.0).strong());
            for (label, value) in MAIN_TANK.system_rows() {
                cols[1].label(format!("• {label}: {value}"));
            }
        });
    }
}
