use eframe::egui::{self, Align, Context, Layout, RichText, Ui, Vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::scene::SceneGraph;

use super::super::render_utils::kind_color;
use super::super::{
    Camera, DeviceClass, DragState, KindToggles, LayoutParams, PendingLayout, ViewModel,
    VisibleSet,
};

impl ViewModel {
    pub(in crate::app) fn new(
        graph: SceneGraph,
        source_label: String,
        device_override: Option<DeviceClass>,
    ) -> Self {
        Self {
            graph,
            source_label,
            device_override,
            params: LayoutParams::default(),
            toggles: KindToggles::default(),
            search: String::new(),
            show_list_view: false,
            selected: None,
            camera: Camera::default(),
            visible: VisibleSet::empty(),
            filter_dirty: true,
            // Due immediately: the first frame places and fits the graph.
            pending_layout: Some(PendingLayout {
                due_at: 0.0,
                iteration_cap: None,
            }),
            input_cooldown_until: None,
            drag: DragState::Idle,
            canvas_size: Vec2::ZERO,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.refresh_visibility();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("scene-atlas");
                    ui.separator();
                    ui.label(format!("source: {}", self.source_label));
                    ui.label(format!(
                        "{} nodes, {} edges",
                        self.graph.node_count(),
                        self.graph.edge_count()
                    ));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "visible: {} nodes, {} edges ({})",
                            self.visible.render_count,
                            self.visible.edge_count,
                            self.device_class(self.canvas_size.x).label()
                        ));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.draw_controls(ui));
            });

        if self.selected.is_some() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.show_list_view {
                self.draw_list(ui);
            } else {
                self.draw_graph(ui);
            }
        });
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<usize>) {
        self.selected = selected;
    }

    /// Flat fallback for small screens and screen readers: the render-visible
    /// nodes in insertion order, fuzzy-ranked while a search term is active.
    fn draw_list(&mut self, ui: &mut Ui) {
        let mut rows: Vec<usize> = (0..self.graph.node_count())
            .filter(|&index| self.visible.render.get(index).copied().unwrap_or(false))
            .collect();

        let term = self.search.trim();
        if !term.is_empty() {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(i64, usize)> = rows
                .iter()
                .map(|&index| {
                    let score = matcher
                        .fuzzy_match(&self.graph.nodes[index].label, term)
                        .unwrap_or(i64::MIN);
                    (score, index)
                })
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
            rows = scored.into_iter().map(|(_, index)| index).collect();
        }

        if rows.is_empty() {
            ui.label("No entries match the current filters.");
            return;
        }

        let mut pending_selection = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for index in rows {
                    let node = &self.graph.nodes[index];
                    let primary = node.kind.primary();
                    let is_selected = self.selected == Some(index);
                    ui.horizontal(|ui| {
                        if ui.selectable_label(is_selected, node.label.as_str()).clicked() {
                            pending_selection = Some(index);
                        }
                        ui.label(
                            RichText::new(primary.label())
                                .small()
                                .color(kind_color(primary)),
                        );
                        let degree = self.graph.neighbors(index).len();
                        if degree > 0 {
                            ui.small(format!("{degree} connections"));
                        }
                    });
                }
            });

        if let Some(index) = pending_selection {
            self.set_selected(Some(index));
        }
    }
}
