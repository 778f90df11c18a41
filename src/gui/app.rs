//! Water Level Monitor Main Application
//! Main window with control panel and tabbed dashboard.

use crate::config::{DashboardConfig, EXPORT_MIME};
use crate::dashboard::{handle, FilterView, RenderModel, WidgetState};
use crate::data::{save_csv, Upload};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, ViewerAction};
use anyhow::{Context, Result};
use egui::SidePanel;

/// Main application window.
pub struct WaterLevelApp {
    config: DashboardConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    upload: Option<Upload>,
    widgets: WidgetState,
    model: Option<RenderModel>,
    error: Option<String>,
}

impl WaterLevelApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        Self {
            config,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            upload: None,
            widgets: WidgetState::default(),
            model: None,
            error: None,
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match Upload::from_path(&path) {
            Ok(upload) => {
                log::info!(
                    "Loaded {} ({} bytes)",
                    upload.file_name,
                    upload.bytes.len()
                );
                self.upload = Some(upload);
                self.widgets.reset_thresholds();
                self.refresh();
            }
            Err(e) => {
                log::error!("Failed to read {}: {}", path.display(), e);
                self.show_error(e.to_string());
            }
        }
    }

    /// Re-run the pipeline with the current upload and widget values.
    fn refresh(&mut self) {
        let Some(upload) = &self.upload else {
            return;
        };

        match handle(upload, &self.widgets, &self.config) {
            Ok(model) => {
                self.control_panel.set_status(
                    &format!(
                        "Archivo cargado: {} registros, {} columnas",
                        model.row_count, model.column_count
                    ),
                    false,
                );
                self.model = Some(model);
                self.error = None;
            }
            Err(e) => {
                log::error!("Failed to process {}: {} ({:?})", upload.file_name, e, e.kind());
                self.show_error(e.to_string());
            }
        }
    }

    fn show_error(&mut self, message: String) {
        self.control_panel
            .set_status(&format!("Error: {}", message), true);
        self.model = None;
        self.error = Some(message);
    }

    /// Save the rows above the current minimum-level threshold.
    fn handle_export(&mut self) {
        match self.export_filtered() {
            Ok(Some(status)) => self.control_panel.set_status(&status, false),
            Ok(None) => {}
            Err(e) => {
                log::error!("Export failed: {:#}", e);
                self.control_panel
                    .set_status(&format!("Error: {:#}", e), true);
            }
        }
    }

    fn export_filtered(&self) -> Result<Option<String>> {
        let Some(RenderModel {
            filters: FilterView::Thresholds { above, .. },
            ..
        }) = &self.model
        else {
            return Ok(None);
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&self.config.export_file_name)
            .save_file()
        else {
            return Ok(None);
        };

        let written = save_csv(&above.frame, &path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!(
            "Exported {} rows ({} bytes, {}) to {}",
            above.frame.height(),
            written,
            EXPORT_MIME,
            path.display()
        );

        Ok(Some(format!(
            "Datos filtrados guardados: {} registros",
            above.frame.height()
        )))
    }
}

impl eframe::App for WaterLevelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                let file_name = self.upload.as_ref().map(|u| u.file_name.as_str());
                let action = self.control_panel.show(ui, file_name, self.model.as_ref());

                match action {
                    ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                    ControlPanelAction::None => {}
                }
            });

        // Central panel - Dashboard
        let before = self.widgets.clone();
        let mut action = ViewerAction::None;
        egui::CentralPanel::default().show(ctx, |ui| match &self.model {
            Some(model) => {
                action = self.chart_viewer.show(ui, model, &mut self.widgets);
            }
            None => ChartViewer::show_empty(ui, self.error.as_deref()),
        });

        if action == ViewerAction::ExportFiltered {
            self.handle_export();
        }

        // Every widget change is a new request
        if self.widgets != before {
            self.refresh();
            ctx.request_repaint();
        }
    }
}
