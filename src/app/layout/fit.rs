use eframe::egui::{Vec2, vec2};

use crate::scene::SceneNode;

use super::super::{Camera, DeviceClass};

const FIT_MARGIN: f32 = 48.0;
const FIT_SCALE_MIN: f32 = 0.6;
const FIT_SCALE_MAX: f32 = 1.2;
const FIT_SCALE_CAP: f32 = 8.0;

/// Chooses a camera that centers the bounding box of every placed node in the
/// canvas. Pure function of its inputs, so repeated calls with unchanged
/// positions return the same camera.
///
/// Desktop doubles the nominal available area before fitting, which gives the
/// deliberately expanded default view instead of a timid exact fit; compact
/// screens instead get a larger initial zoom multiplier. The cap keeps tiny
/// graphs from producing absurd magnification.
pub(in crate::app) fn fit_camera(
    nodes: &[SceneNode],
    canvas: Vec2,
    device: DeviceClass,
) -> Option<Camera> {
    if canvas.x <= 0.0 || canvas.y <= 0.0 {
        return None;
    }

    let mut min = vec2(f32::MAX, f32::MAX);
    let mut max = vec2(f32::MIN, f32::MIN);
    let mut any_placed = false;
    for node in nodes.iter().filter(|node| node.placed) {
        min = min.min(node.position);
        max = max.max(node.position);
        any_placed = true;
    }
    if !any_placed {
        return None;
    }

    let mut available = vec2(
        (canvas.x - FIT_MARGIN * 2.0).max(1.0),
        (canvas.y - FIT_MARGIN * 2.0).max(1.0),
    );
    if device == DeviceClass::Desktop {
        available *= 2.0;
    }

    let graph_size = (max - min).max(vec2(1.0, 1.0));
    let base = (available.x / graph_size.x)
        .min(available.y / graph_size.y)
        .clamp(FIT_SCALE_MIN, FIT_SCALE_MAX);
    let scale = (base * device.initial_zoom()).min(FIT_SCALE_CAP);

    let graph_center = (min + max) * 0.5;
    Some(Camera {
        scale,
        offset: canvas * 0.5 - graph_center * scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{NodeKind, SceneNode};

    fn placed(id: &str, x: f32, y: f32) -> SceneNode {
        let mut node = SceneNode::new(id.to_string(), NodeKind::Place, id.to_string(), None);
        node.position = vec2(x, y);
        node.placed = true;
        node
    }

    #[test]
    fn fitting_twice_yields_the_same_camera() {
        let nodes = vec![
            placed("a", 100.0, 200.0),
            placed("b", 900.0, 700.0),
            placed("c", 400.0, 350.0),
        ];
        let canvas = vec2(1280.0, 720.0);

        let first = fit_camera(&nodes, canvas, DeviceClass::Desktop).unwrap();
        let second = fit_camera(&nodes, canvas, DeviceClass::Desktop).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bounding_box_center_maps_to_canvas_center() {
        let nodes = vec![placed("a", 100.0, 100.0), placed("b", 500.0, 900.0)];
        let canvas = vec2(1000.0, 800.0);
        let camera = fit_camera(&nodes, canvas, DeviceClass::Compact).unwrap();

        let graph_center = vec2(300.0, 500.0);
        let projected = camera.offset + graph_center * camera.scale;
        assert!((projected.x - 500.0).abs() < 1e-3);
        assert!((projected.y - 400.0).abs() < 1e-3);
    }

    #[test]
    fn tiny_graphs_hit_the_clamped_scale() {
        let nodes = vec![placed("a", 10.0, 10.0), placed("b", 12.0, 11.0)];
        let canvas = vec2(1280.0, 720.0);

        let desktop = fit_camera(&nodes, canvas, DeviceClass::Desktop).unwrap();
        assert!((desktop.scale - FIT_SCALE_MAX * 1.15).abs() < 1e-3);

        let compact = fit_camera(&nodes, canvas, DeviceClass::Compact).unwrap();
        assert!((compact.scale - FIT_SCALE_MAX * 2.0).abs() < 1e-3);
    }

    #[test]
    fn unplaced_nodes_produce_no_camera() {
        let nodes = vec![SceneNode::new(
            "a".to_string(),
            NodeKind::Place,
            "a".to_string(),
            None,
        )];
        assert!(fit_camera(&nodes, vec2(800.0, 600.0), DeviceClass::Desktop).is_none());
    }
}
