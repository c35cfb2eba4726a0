use std::time::Duration;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, Vec2, vec2};

use super::super::render_utils::{
    circle_visible, dim_color, draw_background, edge_color, edge_visible, kind_color, kind_radius,
    screen_radius, world_to_screen,
};
use super::super::{DeviceClass, ViewModel};
use super::interaction::RESIZE_ITERATION_CAP;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let now = ui.input(|input| input.time);

        self.refresh_visibility();
        self.handle_resize(rect.size(), now);
        self.handle_zoom(ui, rect, &response);
        self.handle_pointer(ui, rect, &response, now);
        self.maybe_run_layout(now, vec2(rect.width(), rect.height()));
        if self.pending_layout.is_some() {
            ui.ctx().request_repaint_after(Duration::from_millis(60));
        }

        draw_background(&painter, rect, self.camera);

        let camera = self.camera;
        let selected = self.selected;
        let selected_neighbors: &[usize] = selected
            .map(|index| self.graph.neighbors(index))
            .unwrap_or(&[]);
        let selection_active = selected.is_some();

        for (edge, &eligible) in self
            .graph
            .resolved_edges()
            .iter()
            .zip(self.visible.edges.iter())
        {
            if !eligible {
                continue;
            }
            let from = &self.graph.nodes[edge.from];
            let to = &self.graph.nodes[edge.to];
            if !from.placed || !to.placed {
                continue;
            }

            let start = world_to_screen(rect, camera, from.position);
            let end = world_to_screen(rect, camera, to.position);
            if !edge_visible(rect, start, end, 2.5) {
                continue;
            }

            let touches_selection =
                selected == Some(edge.from) || selected == Some(edge.to);
            let mut color = edge_color(edge.kind);
            let mut width = 1.1 * camera.scale.sqrt().clamp(0.6, 2.2);
            if selection_active && !touches_selection {
                color = dim_color(color, 0.4);
            } else if touches_selection {
                width *= 1.6;
            }
            painter.line_segment([start, end], Stroke::new(width, color));
        }

        let hovered = ui
            .input(|input| input.pointer.hover_pos())
            .and_then(|pointer| self.hit_test(rect, pointer));
        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        for (index, node) in self.graph.nodes.iter().enumerate() {
            if !node.placed || !self.visible.render.get(index).copied().unwrap_or(false) {
                continue;
            }

            let position = world_to_screen(rect, camera, node.position);
            let primary = node.kind.primary();
            let radius = screen_radius(kind_radius(primary), camera.scale);
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let is_selected = selected == Some(index);
            let is_neighbor = selected_neighbors.contains(&index);
            let is_hovered = hovered == Some(index);

            let mut color = kind_color(primary);
            if selection_active && !is_selected && !is_neighbor {
                color = dim_color(color, 0.45);
            }

            painter.circle_filled(position, radius, color);
            if is_selected {
                painter.circle_stroke(
                    position,
                    radius + 3.5,
                    Stroke::new(2.0, Color32::from_rgb(245, 206, 93)),
                );
            }
            let ring = if is_hovered {
                Stroke::new(1.8, Color32::from_gray(230))
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            painter.circle_stroke(position, radius, ring);

            let show_label =
                is_selected || is_neighbor || is_hovered || camera.scale > 1.1 || radius > 17.0;
            if show_label {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    &node.label,
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if self.visible.render_count == 0 {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No nodes match the current filters.",
                FontId::proportional(14.0),
                Color32::from_gray(180),
            );
        }
    }

    /// Debounced resize reaction. Compact screens re-run a bounded layout
    /// because an orientation change invalidates the readable spacing;
    /// desktop resizes leave positions alone.
    fn handle_resize(&mut self, size: Vec2, now: f64) {
        if (size - self.canvas_size).length() < 1.0 {
            return;
        }
        let first_frame = self.canvas_size == Vec2::ZERO;
        self.canvas_size = size;
        if first_frame {
            return;
        }

        if self.device_class(size.x) == DeviceClass::Compact {
            self.schedule_relayout(now, Some(RESIZE_ITERATION_CAP));
        }
    }
}
