// src/ui/map.rs
use eframe::egui::{self, epaint::Mesh, Color32, CursorIcon, Key, Pos2, Rect, Sense, Shape, Stroke, Vec2};
use std::collections::HashSet;

use crate::config::{RegionId, RegionIdentifier};
use crate::map::{FitProjection, RegionMap, RegionShape};
use crate::state::{AppState, MapEvents, MapLoadState, Viewport};
use crate::ui::palette::region_style;

const MAP_MARGIN: f32 = 8.0;

/// Map toolbar plus the interactive map. Returns true when the user asked to
/// retry a failed map load.
pub fn show_map_view(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    show_toolbar(ui, &mut state.viewport);
    handle_zoom_keys(ui, &mut state.viewport);

    let size = Vec2::new(ui.available_width(), state.settings.map_height);
    match &state.map {
        MapLoadState::Loading => {
            show_placeholder(ui, size, "Loading map...", None);
            false
        }
        MapLoadState::Failed(reason) => {
            show_placeholder(ui, size, "Map unavailable", Some(reason.as_str()))
        }
        MapLoadState::Ready(_) => {
            show_interactive_map(ui, state, size);
            false
        }
    }
}

fn show_toolbar(ui: &mut egui::Ui, viewport: &mut Viewport) {
    ui.horizontal(|ui| {
        if ui.button("➕").on_hover_text("Zoom in (+)").clicked() {
            viewport.zoom_in(None);
        }
        if ui.button("➖").on_hover_text("Zoom out (-)").clicked() {
            viewport.zoom_out(None);
        }
        if ui.button("⟲ Reset").on_hover_text("Reset view (0)").clicked() {
            viewport.reset();
        }
        ui.separator();
        ui.label(format!("{:.0}%", viewport.scale() * 100.0));
    });
}

fn handle_zoom_keys(ui: &egui::Ui, viewport: &mut Viewport) {
    // Typing "-" into the search box must not zoom.
    if ui.ctx().wants_keyboard_input() {
        return;
    }
    let (zoom_in, zoom_out, reset) = ui.input(|i| {
        (
            i.key_pressed(Key::PlusEquals),
            i.key_pressed(Key::Minus),
            i.key_pressed(Key::Num0),
        )
    });
    if zoom_in {
        viewport.zoom_in(None);
    }
    if zoom_out {
        viewport.zoom_out(None);
    }
    if reset {
        viewport.reset();
    }
}

fn show_placeholder(ui: &mut egui::Ui, size: Vec2, message: &str, reason: Option<&str>) -> bool {
    let mut retry = false;
    ui.allocate_ui(size, |ui| {
        ui.set_min_size(size);
        ui.vertical_centered(|ui| {
            ui.add_space(size.y / 2.0 - 30.0);
            ui.label(egui::RichText::new(message).weak().size(16.0));
            if let Some(reason) = reason {
                ui.label(egui::RichText::new(reason).small().weak());
                retry = ui.button("Retry").clicked();
            }
        });
    });
    retry
}

struct Projection {
    fit: FitProjection,
    viewport: Viewport,
    center: Pos2,
}

impl Projection {
    fn to_screen(&self, p: Pos2) -> Pos2 {
        self.viewport.apply(self.fit.to_screen(p), self.center)
    }

    fn to_map(&self, p: Pos2) -> Pos2 {
        self.fit.to_map(self.viewport.invert(p, self.center))
    }
}

fn show_interactive_map(ui: &mut egui::Ui, state: &mut AppState, size: Vec2) {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
    let MapLoadState::Ready(map) = &state.map else {
        return;
    };

    // Read the gesture against the current frame before anything moves.
    let projection = Projection {
        fit: FitProjection::new(map.view_box, rect.shrink(MAP_MARGIN)),
        viewport: state.viewport,
        center: rect.center(),
    };
    let interactive: HashSet<&RegionId> = state.regions.iter()
        .filter(|region| region.has_data)
        .map(|region| &region.id)
        .collect();
    let hit = response.hover_pos()
        .filter(|_| !response.dragged())
        .and_then(|pos| map.hit_test(projection.to_map(pos), |shape| interactive.contains(&shape.id)))
        .map(|shape| shape.id.clone());
    let label = hit.as_ref().and_then(|id| {
        state.regions.iter()
            .find(|region| &region.id == id)
            .map(|region| region.label().to_string())
    });

    let wheel: Vec<f32> = if response.hovered() {
        ui.input(|i| {
            i.events.iter()
                .filter_map(|event| match event {
                    egui::Event::Scroll(delta) if delta.y != 0.0 => Some(delta.y),
                    _ => None,
                })
                .collect()
        })
    } else {
        Vec::new()
    };

    // Apply.
    if state.interaction.hovered() != hit.as_ref() {
        state.on_hover(hit.clone());
    }
    if response.clicked() {
        if let (Some(id), Some(name)) = (hit.clone(), label.clone()) {
            state.on_select(RegionIdentifier::from_region(id, name));
        }
    }
    if response.dragged() {
        state.on_drag_delta(response.drag_delta());
    }
    let anchor = response.hover_pos().map(|pos| pos - rect.center());
    for delta in wheel {
        if delta > 0.0 {
            state.viewport.zoom_in(anchor);
        } else {
            state.viewport.zoom_out(anchor);
        }
    }

    if response.dragged() {
        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
    } else if hit.is_some() {
        ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
    }

    // Paint with the updated viewport.
    let MapLoadState::Ready(map) = &state.map else {
        return;
    };
    let projection = Projection {
        viewport: state.viewport,
        ..projection
    };
    paint_map(ui, rect, map, state, &projection);

    if let Some(label) = label {
        egui::show_tooltip_at_pointer(ui.ctx(), egui::Id::new("map_tooltip"), |ui| {
            ui.label(label);
        });
    }
}

fn paint_map(ui: &egui::Ui, rect: Rect, map: &RegionMap, state: &AppState, projection: &Projection) {
    let painter = ui.painter_at(rect);
    for (shape, region) in map.shapes.iter().zip(&state.regions) {
        let style = region_style(state.interaction.state_of(region), state.theme);
        painter.add(Shape::mesh(region_mesh(shape, projection, style.fill)));
        for ring in &shape.rings {
            let outline: Vec<Pos2> = ring.iter().map(|p| projection.to_screen(*p)).collect();
            painter.add(Shape::closed_line(outline, Stroke::new(1.0, style.stroke)));
        }
    }
}

fn region_mesh(shape: &RegionShape, projection: &Projection, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    for (ring, triangles) in shape.rings.iter().zip(&shape.triangles) {
        let base = mesh.vertices.len() as u32;
        for p in ring {
            mesh.colored_vertex(projection.to_screen(*p), color);
        }
        for [a, b, c] in triangles {
            mesh.add_triangle(base + a, base + b, base + c);
        }
    }
    mesh
}
