use eframe::egui::{self, RichText, Ui};

use crate::scene::PrimaryKind;

use super::super::render_utils::kind_color;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let Some(index) = self.selected else {
            return;
        };
        let Some(node) = self.graph.nodes.get(index) else {
            self.set_selected(None);
            return;
        };

        let label = node.label.clone();
        let primary = node.kind.primary();
        let profile = node.profile.clone();

        let mut close_requested = false;
        ui.horizontal(|ui| {
            ui.heading(label.as_str());
            ui.label(kind_tag(primary));
            if ui.button("Close").clicked() {
                close_requested = true;
            }
        });
        ui.add_space(6.0);

        if let Some(record) = &profile {
            if !record.role.is_empty() {
                ui.label(format!("Role: {}", record.role));
            }
            if !record.genre.is_empty() {
                ui.label(format!("Genre: {}", record.genre));
            }
            if !record.locations.is_empty() {
                ui.label(format!("Plays at: {}", record.locations.join(", ")));
            }
            if !record.collectives.is_empty() {
                ui.label(format!("Part of: {}", record.collectives.join(", ")));
            }
            if let Some(url) = &record.url {
                ui.hyperlink_to(url.clone(), url.clone());
            }
            if let Some(info) = &record.info {
                ui.add_space(4.0);
                ui.label(info.clone());
            }
        } else {
            ui.label(format!("{} with every listed member below.", group_blurb(primary)));
        }

        ui.separator();
        ui.label(RichText::new("Connected to").strong());

        let mut neighbors: Vec<usize> = self.graph.neighbors(index).to_vec();
        neighbors.sort_by(|a, b| self.graph.nodes[*a].label.cmp(&self.graph.nodes[*b].label));

        let mut pending_selection = None;
        if neighbors.is_empty() {
            ui.label("No connections in the current graph.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("detail_connections")
                .max_height(320.0)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for neighbor in neighbors {
                        let neighbor_node = &self.graph.nodes[neighbor];
                        let tag = kind_tag(neighbor_node.kind.primary());
                        let row = format!("{}  ", neighbor_node.label);
                        ui.horizontal(|ui| {
                            if ui.link(row.clone()).clicked() {
                                pending_selection = Some(neighbor);
                            }
                            ui.label(tag.clone());
                        });
                    }
                });
        }

        if let Some(next) = pending_selection {
            self.set_selected(Some(next));
        }
        if close_requested {
            self.set_selected(None);
        }
    }
}

fn kind_tag(kind: PrimaryKind) -> RichText {
    RichText::new(kind.label()).small().color(kind_color(kind))
}

fn group_blurb(kind: PrimaryKind) -> &'static str {
    match kind {
        PrimaryKind::Place => "Venue shared",
        PrimaryKind::Genre => "Genre shared",
        PrimaryKind::Collective => "Collective shared",
        _ => "Entity connected",
    }
}
