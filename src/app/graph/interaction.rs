use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use super::super::layout::{fit_camera, run_layout};
use super::super::render_utils::{kind_radius, screen_radius, screen_to_world, world_to_screen};
use super::super::{Camera, DragState, PendingLayout, ViewModel};

const ZOOM_MIN: f32 = 0.1;
const ZOOM_MAX: f32 = 3.0;
const CLICK_DRAG_THRESHOLD: f32 = 7.0;
const HIT_SLOP: f32 = 5.0;
const RELAYOUT_DEBOUNCE_SECS: f64 = 0.24;
const POINTER_COOLDOWN_SECS: f64 = 3.0;
pub(in crate::app) const RESIZE_ITERATION_CAP: usize = 90;

/// Zoom anchored at the pointer: the world point under the cursor stays put
/// across the scale change.
fn zoom_camera_at(camera: Camera, rect: Rect, pointer: Pos2, factor: f32) -> Camera {
    let world_before = screen_to_world(rect, camera, pointer);
    let scale = (camera.scale * factor).clamp(ZOOM_MIN, ZOOM_MAX);
    Camera {
        scale,
        offset: pointer - rect.left_top() - world_before * scale,
    }
}

impl ViewModel {
    pub(in crate::app) fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let (scroll, pinch) = ui.input(|input| (input.raw_scroll_delta.y, input.zoom_delta()));
        let mut factor = pinch;
        if scroll.abs() > f32::EPSILON {
            factor *= (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        }
        if (factor - 1.0).abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        self.camera = zoom_camera_at(self.camera, rect, pointer, factor);
    }

    /// Explicit Idle -> (Pan | Node) -> Idle pointer machine. Node drags write
    /// world positions through the inverse camera transform and keep the
    /// engine suppressed; a release that barely moved counts as a click and
    /// opens the detail view.
    pub(in crate::app) fn handle_pointer(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        now: f64,
    ) {
        let (pointer, pressed, down, released) = ui.input(|input| {
            (
                input.pointer.latest_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_down(),
                input.pointer.primary_released(),
            )
        });

        if pressed {
            if let Some(position) = pointer
                && response.hovered()
                && rect.contains(position)
            {
                self.drag = match self.hit_test(rect, position) {
                    Some(index) => {
                        self.suppress_layout(now);
                        let grab_offset = screen_to_world(rect, self.camera, position)
                            - self.graph.nodes[index].position;
                        DragState::Node {
                            index,
                            grab_offset,
                            press: position,
                        }
                    }
                    None => DragState::Pan {
                        press: position,
                        origin_offset: self.camera.offset,
                    },
                };
            }
            return;
        }

        if down {
            if let Some(position) = pointer {
                match self.drag {
                    DragState::Node {
                        index, grab_offset, ..
                    } => {
                        let node = &mut self.graph.nodes[index];
                        node.position = screen_to_world(rect, self.camera, position) - grab_offset;
                        node.placed = true;
                        self.suppress_layout(now);
                    }
                    DragState::Pan {
                        press,
                        origin_offset,
                    } => {
                        self.camera.offset = origin_offset + (position - press);
                    }
                    DragState::Idle => {}
                }
            }
            return;
        }

        if released {
            let finished = std::mem::replace(&mut self.drag, DragState::Idle);
            let Some(position) = pointer else {
                return;
            };
            match finished {
                DragState::Node { index, press, .. } => {
                    if (position - press).length() <= CLICK_DRAG_THRESHOLD {
                        self.set_selected(Some(index));
                    }
                }
                DragState::Pan { press, .. } => {
                    if (position - press).length() <= CLICK_DRAG_THRESHOLD {
                        self.set_selected(None);
                    }
                }
                DragState::Idle => {}
            }
        }
    }

    /// Nearest render-visible node within its kind radius plus slop.
    pub(in crate::app) fn hit_test(&self, rect: Rect, pointer: Pos2) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, node) in self.graph.nodes.iter().enumerate() {
            if !node.placed || !self.visible.render.get(index).copied().unwrap_or(false) {
                continue;
            }

            let screen = world_to_screen(rect, self.camera, node.position);
            let radius =
                screen_radius(kind_radius(node.kind.primary()), self.camera.scale) + HIT_SLOP;
            let distance = screen.distance(pointer);
            if distance <= radius && best.is_none_or(|(_, closest)| distance < closest) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Trailing-edge debounce; a newer request supersedes the pending one.
    pub(in crate::app) fn schedule_relayout(&mut self, now: f64, iteration_cap: Option<usize>) {
        self.pending_layout = Some(PendingLayout {
            due_at: now + RELAYOUT_DEBOUNCE_SECS,
            iteration_cap,
        });
    }

    pub(in crate::app) fn suppress_layout(&mut self, now: f64) {
        self.input_cooldown_until = Some(now + POINTER_COOLDOWN_SECS);
    }

    /// Automatic runs are skipped while the user is mid-edit (pointer
    /// cooldown) or while the detail view covers part of the canvas.
    fn layout_suppressed(&self, now: f64) -> bool {
        self.selected.is_some()
            || self
                .input_cooldown_until
                .is_some_and(|until| now < until)
    }

    pub(in crate::app) fn maybe_run_layout(&mut self, now: f64, canvas: Vec2) {
        let Some(pending) = self.pending_layout else {
            return;
        };
        if now < pending.due_at {
            return;
        }

        self.pending_layout = None;
        if self.layout_suppressed(now) {
            return;
        }
        self.run_layout_now(canvas, pending.iteration_cap);
    }

    pub(in crate::app) fn run_layout_now(&mut self, canvas: Vec2, iteration_cap: Option<usize>) {
        if canvas.x <= 0.0 || canvas.y <= 0.0 {
            return;
        }

        self.refresh_visibility();
        let mut params = self.params;
        if let Some(cap) = iteration_cap {
            params.iterations = params.iterations.min(cap);
        }

        let device = self.device_class(canvas.x);
        let session = run_layout(&mut self.graph, &self.visible, canvas, device, &params);
        if session.nodes.is_empty() {
            return;
        }

        let residual = session.forces.iter().map(|force| force.length()).sum::<f32>()
            / session.nodes.len() as f32;
        log::debug!(
            "layout run: {} nodes, max degree {}, mean residual force {residual:.2}",
            session.nodes.len(),
            session.max_degree,
        );

        if let Some(camera) = fit_camera(&self.graph.nodes, canvas, device) {
            self.camera = camera;
        }
    }

    pub(in crate::app) fn fit_view(&mut self, canvas: Vec2) {
        let device = self.device_class(canvas.x);
        if let Some(camera) = fit_camera(&self.graph.nodes, canvas, device) {
            self.camera = camera;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    #[test]
    fn zoom_keeps_the_anchor_point_fixed() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 10.0), vec2(800.0, 600.0));
        let camera = Camera {
            scale: 1.0,
            offset: vec2(35.0, -80.0),
        };
        let pointer = Pos2::new(420.0, 310.0);

        let world_before = screen_to_world(rect, camera, pointer);
        let zoomed = zoom_camera_at(camera, rect, pointer, 1.4);
        let world_after = screen_to_world(rect, zoomed, pointer);

        assert!((zoomed.scale - 1.4).abs() < 1e-5);
        assert!((world_after - world_before).length() < 1e-3);
    }

    #[test]
    fn zoom_clamps_to_the_allowed_range() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0));
        let camera = Camera {
            scale: 2.8,
            offset: Vec2::ZERO,
        };

        let maxed = zoom_camera_at(camera, rect, Pos2::new(100.0, 100.0), 10.0);
        assert!((maxed.scale - ZOOM_MAX).abs() < 1e-5);

        let floored = zoom_camera_at(camera, rect, Pos2::new(100.0, 100.0), 0.001);
        assert!((floored.scale - ZOOM_MIN).abs() < 1e-5);
    }
}
