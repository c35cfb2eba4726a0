use eframe::egui::{self, Ui};

use super::super::{DeviceClass, LayoutParams, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let now = ui.input(|input| input.time);
        let mut filter_changed = false;
        let mut tuning_changed = false;

        ui.heading("Filters");
        ui.add_space(4.0);

        let search_response = ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("search names, genres, places..."),
        );
        filter_changed |= search_response.changed();

        ui.add_space(4.0);
        filter_changed |= ui
            .checkbox(&mut self.toggles.performer, "Performers")
            .changed();
        filter_changed |= ui.checkbox(&mut self.toggles.dj, "DJs").changed();
        filter_changed |= ui
            .checkbox(&mut self.toggles.other_person, "Other people")
            .changed();
        filter_changed |= ui.checkbox(&mut self.toggles.place, "Places").changed();
        filter_changed |= ui.checkbox(&mut self.toggles.genre, "Genres").changed();
        filter_changed |= ui
            .checkbox(&mut self.toggles.collective, "Collectives")
            .changed();

        ui.separator();
        ui.heading("Layout tuning");
        ui.add_space(4.0);

        tuning_changed |= ui
            .add(egui::Slider::new(&mut self.params.repulsion, 0.0..=0.15).text("repulsion"))
            .changed();
        tuning_changed |= ui
            .add(egui::Slider::new(&mut self.params.attraction, 0.0..=2.0).text("attraction"))
            .changed();
        tuning_changed |= ui
            .add(egui::Slider::new(&mut self.params.gravity, 0.0..=2.0).text("gravity"))
            .changed();
        tuning_changed |= ui
            .add(
                egui::Slider::new(&mut self.params.same_type_repel, 0.0..=1.5)
                    .text("same-type repel"),
            )
            .changed();
        tuning_changed |= ui
            .add(
                egui::Slider::new(&mut self.params.min_distance, 10.0..=120.0)
                    .text("min distance"),
            )
            .changed();
        tuning_changed |= ui
            .add(egui::Slider::new(&mut self.params.iterations, 30..=600).text("iterations"))
            .changed();

        ui.horizontal(|ui| {
            ui.label("seed");
            tuning_changed |= ui
                .add(egui::DragValue::new(&mut self.params.seed))
                .changed();
            if ui.button("Defaults").clicked() {
                self.params = LayoutParams::default();
                tuning_changed = true;
            }
        });

        ui.separator();
        ui.heading("View");
        ui.add_space(4.0);

        let canvas = self.canvas_size;
        ui.horizontal(|ui| {
            if ui.button("Re-run layout").clicked() {
                self.run_layout_now(canvas, None);
            }
            if ui.button("Scatter").clicked() {
                for node in &mut self.graph.nodes {
                    node.placed = false;
                }
                self.run_layout_now(canvas, None);
            }
            if ui.button("Fit view").clicked() {
                self.fit_view(canvas);
            }
        });

        ui.checkbox(&mut self.show_list_view, "List view");

        egui::ComboBox::from_label("Device class")
            .selected_text(match self.device_override {
                None => "auto",
                Some(device) => device.label(),
            })
            .show_ui(ui, |ui| {
                let mut changed = false;
                changed |= ui
                    .selectable_value(&mut self.device_override, None, "auto")
                    .changed();
                changed |= ui
                    .selectable_value(
                        &mut self.device_override,
                        Some(DeviceClass::Desktop),
                        "desktop",
                    )
                    .changed();
                changed |= ui
                    .selectable_value(
                        &mut self.device_override,
                        Some(DeviceClass::Compact),
                        "compact",
                    )
                    .changed();
                tuning_changed |= changed;
            });

        if filter_changed {
            self.filter_dirty = true;
        }
        if filter_changed || tuning_changed {
            self.schedule_relayout(now, None);
        }

        if self.pending_layout.is_some() {
            ui.add_space(6.0);
            ui.small("layout re-run pending...");
        } else if self.selected.is_some() {
            ui.add_space(6.0);
            ui.small("automatic layout paused while details are open");
        }
    }
}
