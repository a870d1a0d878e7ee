// src/ui/charts.rs
use eframe::egui::{self, epaint::Mesh, Color32, Pos2, RichText, Sense, Shape, Vec2};
use egui_plot::{Bar, BarChart, Line, Plot, Points};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::analysis::aggregate::top_entries;
use crate::config::{Breakdown, EmploymentData, StateRecord};
use crate::state::AppState;
use crate::ui::palette::{cycled, CAREER, CITIES, FUNDING, GROWTH, SECTORS, STAGES};
use crate::utils::{format_indian, format_indian_amount};

const CHART_HEIGHT: f32 = 220.0;

pub fn show_charts_view(ui: &mut egui::Ui, state: &AppState) {
    let view = state.current_view();
    let record = view.record();

    ui.columns(3, |columns| {
        chart_card(&mut columns[0], "📈 Startup Growth Over Years", |ui| {
            growth_chart(ui, record.map(|r| &r.startups_growth_yearly));
        });
        chart_card(&mut columns[1], "💰 Funding by Sector (₹ crores)", |ui| {
            funding_chart(ui, record.map(|r| &r.funding_by_sector));
        });
        chart_card(&mut columns[2], "🏙 Top Cities by Startup Count", |ui| {
            cities_chart(ui, record.map(|r| &r.top_cities_by_startups));
        });
    });
    ui.add_space(8.0);
    ui.columns(3, |columns| {
        chart_card(&mut columns[0], "🎯 Startups by Sector", |ui| {
            sector_doughnut(ui, record.map(|r| &r.startups_by_sector));
        });
        chart_card(&mut columns[1], "🚀 Stage Distribution", |ui| {
            stage_chart(ui, record.map(|r| &r.startup_stage_distribution));
        });
        chart_card(&mut columns[2], "👔 Career Insights", |ui| {
            career_chart(ui, record.and_then(|r: &StateRecord| r.employment_data.as_ref()));
        });
    });
}

fn chart_card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title.to_uppercase()).small().strong());
        ui.add_space(4.0);
        add_contents(ui);
    });
}

fn empty_message(ui: &mut egui::Ui, text: &str) {
    let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
    ui.allocate_ui(size, |ui| {
        ui.set_min_size(size);
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new(text).weak());
        });
    });
}

/// Non-empty breakdown, else `None`.
fn non_empty<V>(entries: Option<&Breakdown<V>>) -> Option<&Breakdown<V>> {
    entries.filter(|entries| !entries.is_empty())
}

fn legend(ui: &mut egui::Ui, items: impl Iterator<Item = (Color32, String)>) {
    ui.horizontal_wrapped(|ui| {
        for (color, text) in items {
            ui.label(RichText::new("■").color(color));
            ui.label(RichText::new(text).small());
        }
    });
}

/// Year labels become x values when numeric, otherwise their position.
pub fn growth_points(entries: &Breakdown<u64>) -> Vec<[f64; 2]> {
    entries.iter()
        .enumerate()
        .map(|(i, (year, count))| {
            let x = year.trim().parse::<f64>().unwrap_or(i as f64);
            [x, *count as f64]
        })
        .collect()
}

fn growth_chart(ui: &mut egui::Ui, entries: Option<&Breakdown<u64>>) {
    let Some(entries) = non_empty(entries) else {
        empty_message(ui, "No growth data available");
        return;
    };
    let points = growth_points(entries);

    Plot::new("growth_plot")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_background(false)
        .include_y(0.0)
        .label_formatter(|_, point| format!("{:.0}\n{} startups", point.x, format_indian(point.y.max(0.0) as u64)))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points.clone()).color(GROWTH).width(2.5).name("Startups"));
            plot_ui.points(Points::new(points).color(GROWTH).radius(4.0));
        });
}

fn funding_chart(ui: &mut egui::Ui, entries: Option<&Breakdown<f64>>) {
    let Some(entries) = non_empty(entries) else {
        empty_message(ui, "No funding data available");
        return;
    };

    Plot::new("funding_plot")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_background(false)
        .show_axes([false, true])
        .include_y(0.0)
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = entries.iter()
                .enumerate()
                .map(|(i, (sector, amount))| {
                    Bar::new(i as f64, *amount)
                        .name(sector)
                        .width(0.7)
                        .fill(cycled(&FUNDING, i))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).name("₹ crores"));
        });

    legend(ui, entries.iter().enumerate().map(|(i, (sector, amount))| {
        (cycled(&FUNDING, i), format!("{}: ₹{} cr", sector, format_indian_amount(*amount)))
    }));
}

/// Horizontal bars listed top to bottom in the given order.
fn horizontal_bars(ui: &mut egui::Ui, id: &str, entries: &Breakdown<u64>, colors: &[Color32]) {
    let count = entries.len();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_background(false)
        .show_axes([true, false])
        .include_x(0.0)
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = entries.iter()
                .enumerate()
                .map(|(i, (label, value))| {
                    Bar::new((count - i) as f64, *value as f64)
                        .name(label)
                        .width(0.7)
                        .fill(cycled(colors, i))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });

    legend(ui, entries.iter().enumerate().map(|(i, (label, value))| {
        (cycled(colors, i), format!("{}: {}", label, format_indian(*value)))
    }));
}

fn cities_chart(ui: &mut egui::Ui, entries: Option<&Breakdown<u64>>) {
    let Some(entries) = non_empty(entries) else {
        empty_message(ui, "No city data available");
        return;
    };
    let sorted = top_entries(entries.clone(), entries.len());
    horizontal_bars(ui, "cities_plot", &sorted, &[CITIES]);
}

fn stage_chart(ui: &mut egui::Ui, entries: Option<&Breakdown<u64>>) {
    let Some(entries) = non_empty(entries) else {
        empty_message(ui, "No stage data available");
        return;
    };
    horizontal_bars(ui, "stages_plot", entries, &STAGES);
}

/// One doughnut slice: label, count, offset from twelve o'clock and sweep,
/// both in radians clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<'a> {
    pub label: &'a str,
    pub count: u64,
    pub offset: f32,
    pub sweep: f32,
}

pub fn doughnut_slices(entries: &Breakdown<u64>) -> Vec<Slice<'_>> {
    let total: u64 = entries.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut offset = 0.0;
    entries.iter()
        .map(|(label, count)| {
            let sweep = TAU * (*count as f32 / total as f32);
            let slice = Slice { label: label.as_str(), count: *count, offset, sweep };
            offset += sweep;
            slice
        })
        .collect()
}

fn ring_segment(center: Pos2, inner: f32, outer: f32, start: f32, sweep: f32, color: Color32) -> Mesh {
    let steps = ((sweep / 0.1).ceil() as u32).max(2);
    let mut mesh = Mesh::default();
    for k in 0..=steps {
        let angle = start + sweep * k as f32 / steps as f32;
        let dir = Vec2::new(angle.cos(), angle.sin());
        mesh.colored_vertex(center + dir * outer, color);
        mesh.colored_vertex(center + dir * inner, color);
    }
    for k in 0..steps {
        let i = k * 2;
        mesh.add_triangle(i, i + 1, i + 2);
        mesh.add_triangle(i + 1, i + 3, i + 2);
    }
    mesh
}

fn sector_doughnut(ui: &mut egui::Ui, entries: Option<&Breakdown<u64>>) {
    let slices = non_empty(entries).map(doughnut_slices).unwrap_or_default();
    if slices.is_empty() {
        empty_message(ui, "No sector data available");
        return;
    }
    let total: u64 = slices.iter().map(|s| s.count).sum();

    ui.horizontal(|ui| {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(CHART_HEIGHT * 0.8), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let outer = rect.width() / 2.0 - 4.0;
        let inner = outer * 0.55;

        let pointer_offset = response.hover_pos().and_then(|pos| {
            let d = pos - center;
            (d.length() >= inner && d.length() <= outer)
                .then(|| (d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU))
        });

        let mut hovered = None;
        for (i, slice) in slices.iter().enumerate() {
            let color = cycled(&SECTORS, i);
            let start = slice.offset - FRAC_PI_2;
            painter.add(Shape::mesh(ring_segment(center, inner, outer, start, slice.sweep, color)));
            if pointer_offset.is_some_and(|a| a >= slice.offset && a < slice.offset + slice.sweep) {
                hovered = Some(slice);
            }
        }

        if let Some(slice) = hovered {
            response.on_hover_text(format!(
                "{}: {} ({:.1}%)",
                slice.label,
                format_indian(slice.count),
                slice.count as f64 * 100.0 / total as f64
            ));
        }

        ui.vertical(|ui| {
            for (i, slice) in slices.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("■").color(cycled(&SECTORS, i)));
                    ui.label(RichText::new(format!("{} ({})", slice.label, format_indian(slice.count))).small());
                });
            }
        });
    });
}

fn career_chart(ui: &mut egui::Ui, employment: Option<&EmploymentData>) {
    let Some(employment) = employment else {
        empty_message(ui, "Select a state to view employment data");
        return;
    };

    let metrics = [
        ("Total Jobs (thousands)", employment.total_jobs as f64 / 1000.0),
        ("Avg Salary (₹ lakhs)", employment.avg_salary / 100_000.0),
        ("Top Skills Count", employment.top_skills.len() as f64),
    ];

    Plot::new("career_plot")
        .height(CHART_HEIGHT * 0.75)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_background(false)
        .show_axes([false, true])
        .include_y(0.0)
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = metrics.iter()
                .enumerate()
                .map(|(i, (label, value))| {
                    Bar::new(i as f64, *value)
                        .name(*label)
                        .width(0.6)
                        .fill(CAREER[i])
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars));
        });

    legend(ui, [
        (CAREER[0], format!("{} jobs", format_indian(employment.total_jobs))),
        (CAREER[1], format!("₹{} avg salary", format_indian_amount(employment.avg_salary))),
        (CAREER[2], format!("{} skills", employment.top_skills.len())),
    ].into_iter());

    if !employment.top_skills.is_empty() {
        ui.label(RichText::new(employment.top_skills.join(" · ")).small().weak());
    }
}
