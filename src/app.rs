// src/app.rs
use eframe::egui;
use rfd::FileDialog;
use tracing::info;

use crate::config::{Dataset, Settings, ThemeMode};
use crate::file::{MapLoader, MapSource};
use crate::state::AppState;
use crate::ui::{charts, header, map, stats};

const THEME_KEY: &str = "theme";

pub struct DashboardApp {
    state: AppState,
    map_source: MapSource,
    loader: Option<MapLoader>,
    applied_theme: Option<ThemeMode>,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        dataset: Dataset,
        startup_error: Option<String>,
    ) -> Self {
        let map_source = MapSource::from_setting(settings.map_source.as_deref());
        let mut state = AppState::new(settings, dataset);
        if let Some(theme) = cc.storage.and_then(|storage| eframe::get_value::<ThemeMode>(storage, THEME_KEY)) {
            state.theme = theme;
        }
        state.error_message = startup_error;

        let mut app = Self {
            state,
            map_source,
            loader: None,
            applied_theme: None,
        };
        app.reload_map(&cc.egui_ctx);
        app
    }

    /// Starts a fresh load; any load still in flight is abandoned.
    fn reload_map(&mut self, ctx: &egui::Context) {
        self.loader = None;
        self.state.begin_map_load();

        let ctx = ctx.clone();
        match MapLoader::spawn(self.map_source.clone(), move || ctx.request_repaint()) {
            Ok(loader) => self.loader = Some(loader),
            Err(e) => self.state.map_loaded(Err(e)),
        }
    }

    fn poll_map_loader(&mut self) {
        if let Some(result) = self.loader.as_ref().and_then(MapLoader::poll) {
            self.loader = None;
            self.state.map_loaded(result);
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.state.theme) {
            return;
        }
        ctx.set_visuals(if self.state.theme.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        self.applied_theme = Some(self.state.theme);
    }

    fn show_menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Dataset...").clicked() {
                    self.open_dataset();
                    ui.close_menu();
                }
                if ui.button("Open Map...").clicked() {
                    self.open_map(ctx);
                    ui.close_menu();
                }
                if ui.button("Reload Map").clicked() {
                    self.reload_map(ctx);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Export Summary...").clicked() {
                    self.export_summary();
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                let label = if self.state.theme.is_dark() { "Light Theme" } else { "Dark Theme" };
                if ui.button(label).clicked() {
                    self.state.theme = self.state.theme.toggled();
                    ui.close_menu();
                }
                if ui.button("Clear Selection").clicked() {
                    self.state.clear_selection();
                    ui.close_menu();
                }
                if ui.button("Reset Map View").clicked() {
                    self.state.viewport.reset();
                    ui.close_menu();
                }
            });
        });
    }

    fn open_dataset(&mut self) {
        let file_dialog = FileDialog::new()
            .add_filter("Dataset files", &["json", "ron"])
            .set_title("Open Dataset");

        if let Some(path) = file_dialog.pick_file() {
            match self.state.file_manager.load_dataset(Some(&path)) {
                Ok(dataset) => {
                    self.state.replace_dataset(dataset);
                    self.state.settings.dataset_path = Some(path);
                    self.state.error_message = None;
                }
                Err(e) => {
                    self.state.error_message = Some(format!("Error loading dataset: {:#}", e));
                }
            }
        }
    }

    fn open_map(&mut self, ctx: &egui::Context) {
        let file_dialog = FileDialog::new()
            .add_filter("SVG files", &["svg"])
            .set_title("Open Map");

        if let Some(path) = file_dialog.pick_file() {
            self.map_source = MapSource::File(path);
            self.reload_map(ctx);
        }
    }

    fn export_summary(&mut self) {
        let record = self.state.current_view().record().cloned();
        let Some(record) = record else {
            self.state.error_message = Some(format!(
                "Nothing to export: no data available for {}",
                self.state.selected_name()
            ));
            return;
        };

        let file_dialog = FileDialog::new()
            .add_filter("JSON files", &["json"])
            .add_filter("RON files", &["ron"])
            .set_file_name(format!("{}.json", record.full_name.to_lowercase().replace(' ', "-")))
            .set_title("Export Summary");

        if let Some(path) = file_dialog.save_file() {
            if let Err(e) = self.state.file_manager.export_summary(&record, &path) {
                self.state.error_message = Some(format!("Error exporting summary: {:#}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_map_loader();
        self.apply_theme(ctx);

        egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
            self.show_menu(ui, ctx);
        });

        egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            header::show_header(ui, &mut self.state);
            ui.add_space(4.0);
        });

        let mut retry_map = false;
        egui::SidePanel::left("map_panel")
            .resizable(true)
            .default_width(560.0)
            .show(ctx, |ui| {
                retry_map = map::show_map_view(ui, &mut self.state);
                ui.separator();
                stats::show_stats_view(ui, &self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("charts_scroll")
                .show(ui, |ui| {
                    charts::show_charts_view(ui, &self.state);
                });
        });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }

        if retry_map {
            info!("Retrying map load");
            self.reload_map(ctx);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, THEME_KEY, &self.state.theme);
    }
}
