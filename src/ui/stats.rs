// src/ui/stats.rs
use eframe::egui::{self, Color32, RichText};

use crate::state::{AppState, View};
use crate::ui::palette::tile_colors;
use crate::utils::format_indian;

const TILE_TITLES: [&str; 3] = ["Total Startups", "Unicorns", "Women-led Startups"];

pub fn show_stats_view(ui: &mut egui::Ui, state: &AppState) {
    let view = state.current_view();
    let values = view.record().map(|record| {
        [
            record.totals.total_startups,
            record.totals.unicorns_total,
            record.totals.women_led_total,
        ]
    });
    let colors = tile_colors(state.theme);

    ui.columns(3, |columns| {
        for (i, column) in columns.iter_mut().enumerate() {
            show_tile(column, TILE_TITLES[i], values.map(|v| v[i]), colors[i]);
        }
    });

    if let View::NoData(name) = &view {
        ui.label(RichText::new(format!("No data available for {}", name)).weak());
    }
}

fn show_tile(ui: &mut egui::Ui, title: &str, value: Option<u64>, color: Color32) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(title.to_uppercase()).small().strong());
            ui.add_space(4.0);
            match value {
                Some(value) => {
                    ui.label(RichText::new(format_indian(value)).size(26.0).strong().color(color));
                }
                None => {
                    ui.label(RichText::new("No data available").weak());
                }
            }
        });
    });
}
