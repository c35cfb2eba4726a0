use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::scene::{EdgeKind, PrimaryKind};

use super::Camera;

pub(super) fn world_to_screen(rect: Rect, camera: Camera, world: Vec2) -> Pos2 {
    rect.left_top() + camera.offset + world * camera.scale
}

pub(super) fn screen_to_world(rect: Rect, camera: Camera, screen: Pos2) -> Vec2 {
    (screen - rect.left_top() - camera.offset) / camera.scale
}

/// Base radius per canonical kind; hit-testing adds its own slop on top.
pub(super) fn kind_radius(kind: PrimaryKind) -> f32 {
    match kind {
        PrimaryKind::Performer => 13.0,
        PrimaryKind::Collective => 12.0,
        PrimaryKind::Dj => 11.0,
        PrimaryKind::Place => 10.0,
        PrimaryKind::Genre => 9.0,
        PrimaryKind::OtherPerson => 8.0,
    }
}

pub(super) fn screen_radius(base_radius: f32, scale: f32) -> f32 {
    (base_radius * scale.powf(0.40)).clamp(2.5, 40.0)
}

pub(super) fn kind_color(kind: PrimaryKind) -> Color32 {
    match kind {
        PrimaryKind::Performer => Color32::from_rgb(235, 148, 86),
        PrimaryKind::Dj => Color32::from_rgb(186, 104, 200),
        PrimaryKind::OtherPerson => Color32::from_rgb(132, 148, 170),
        PrimaryKind::Place => Color32::from_rgb(86, 180, 190),
        PrimaryKind::Genre => Color32::from_rgb(122, 186, 92),
        PrimaryKind::Collective => Color32::from_rgb(233, 196, 90),
    }
}

pub(super) fn edge_color(kind: EdgeKind) -> Color32 {
    match kind {
        EdgeKind::Place => Color32::from_rgba_unmultiplied(86, 180, 190, 150),
        EdgeKind::Genre => Color32::from_rgba_unmultiplied(122, 186, 92, 150),
        EdgeKind::Collective => Color32::from_rgba_unmultiplied(233, 196, 90, 150),
        EdgeKind::Other => Color32::from_rgba_unmultiplied(140, 140, 140, 130),
    }
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, camera: Camera) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * camera.scale.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.left_top() + camera.offset;

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70)),
        );
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    #[test]
    fn world_screen_transforms_round_trip() {
        let rect = Rect::from_min_size(Pos2::new(40.0, 20.0), vec2(800.0, 600.0));
        let camera = Camera {
            scale: 1.7,
            offset: vec2(-120.0, 60.0),
        };

        let world = vec2(310.0, 480.0);
        let screen = world_to_screen(rect, camera, world);
        let back = screen_to_world(rect, camera, screen);
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn circle_visibility_respects_radius() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0));
        assert!(circle_visible(rect, Pos2::new(-5.0, 50.0), 10.0));
        assert!(!circle_visible(rect, Pos2::new(-20.0, 50.0), 10.0));
    }
}
