// src/ui/header.rs
use eframe::egui::{self, Key, Order, RichText, TextEdit};

use crate::state::AppState;

/// Title row: search box with suggestions, selected-name badge, theme toggle
/// and the clear button.
pub fn show_header(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Indian Startup Ecosystem");
        ui.separator();
        show_search(ui, state);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme_label = if state.theme.is_dark() { "☀ Light" } else { "🌙 Dark" };
            if ui.button(theme_label).clicked() {
                state.theme = state.theme.toggled();
            }
            if ui.button("Clear").on_hover_text("Back to the national view").clicked() {
                state.clear_selection();
            }
            ui.label(RichText::new(state.selected_name()).strong().size(16.0));
            ui.label("Showing:");
        });
    });
}

fn suggestions(state: &AppState) -> Vec<String> {
    state.resolver()
        .suggest(&state.search.query)
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn show_search(ui: &mut egui::Ui, state: &mut AppState) {
    let response = ui.add(
        TextEdit::singleline(&mut state.search.query)
            .hint_text("Search states...")
            .desired_width(240.0),
    );
    if response.changed() {
        state.search.edited();
    }
    let names = suggestions(state);

    if response.has_focus() || response.lost_focus() {
        let (down, up, escape) = ui.input(|i| {
            (
                i.key_pressed(Key::ArrowDown),
                i.key_pressed(Key::ArrowUp),
                i.key_pressed(Key::Escape),
            )
        });
        if down {
            state.search.move_down(names.len());
        }
        if up {
            state.search.move_up();
        }
        if escape {
            state.search.escape();
        }
    }

    if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
        let choices: Vec<&str> = names.iter().map(String::as_str).collect();
        if let Some(name) = state.search.commit(&choices) {
            state.select_by_name(&name);
        }
        return;
    }

    if !state.search.is_open() || names.is_empty() {
        return;
    }

    let mut picked = None;
    let popup = egui::Area::new(egui::Id::new("search_suggestions"))
        .order(Order::Foreground)
        .fixed_pos(response.rect.left_bottom())
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(response.rect.width());
                for (i, name) in names.iter().enumerate() {
                    let active = state.search.active() == Some(i);
                    if ui.selectable_label(active, name).clicked() {
                        picked = Some(name.clone());
                    }
                }
            });
        });

    if let Some(name) = picked {
        let name = state.search.pick(&name);
        state.select_by_name(&name);
    } else if response.lost_focus() {
        let over_popup = ui.ctx()
            .pointer_hover_pos()
            .is_some_and(|pos| popup.response.rect.contains(pos));
        if !over_popup {
            state.search.escape();
        }
    }
}
