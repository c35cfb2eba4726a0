use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::scene::SceneGraph;
use crate::util::seeded_unit_pair;

use super::{DeviceClass, LayoutParams, LayoutSession, VisibleSet};

mod fit;

pub(in crate::app) use fit::fit_camera;

const DISTANCE_FLOOR: f32 = 0.001;
const JITTER_SALT: u64 = 0x9e37_79b9_7f4a_7c15;
const TEMPERATURE_FACTOR: f32 = 0.08;
const ITERATION_CLAMP_MARGIN: f32 = 10.0;
const FINAL_CLAMP_PADDING: f32 = 40.0;
const COMPACT_OVERSHOOT_X: f32 = 250.0;
const COMPACT_OVERSHOOT_Y: f32 = 140.0;
const PERSON_EDGE_DAMPENER: f32 = 0.25;

/// One-shot relaxation of the visible subgraph: seeds unplaced nodes, runs the
/// force loop under a decaying temperature, then enforces a minimum pairwise
/// spacing. There is no velocity or other state carried between runs; every
/// invocation relaxes from the current positions to a fresh equilibrium.
///
/// The simulation spreads over a virtual area larger than the canvas
/// (`canvas × area multiplier`); the viewport fitter compresses the result
/// back afterwards. All randomness derives from `params.seed`, so a fixed
/// seed reproduces a run exactly.
pub(in crate::app) fn run_layout(
    graph: &mut SceneGraph,
    visible: &VisibleSet,
    canvas: Vec2,
    device: DeviceClass,
    params: &LayoutParams,
) -> LayoutSession {
    let members: Vec<usize> = visible
        .layout
        .iter()
        .enumerate()
        .filter_map(|(index, &in_layout)| in_layout.then_some(index))
        .collect();
    if members.is_empty() {
        return LayoutSession::empty();
    }

    let area = canvas * device.area_multiplier();
    seed_positions(graph, &members, area, params.seed);

    let count = members.len();
    let local_index: HashMap<usize, usize> = members
        .iter()
        .enumerate()
        .map(|(local, &index)| (index, local))
        .collect();

    // (local from, local to, spring strength); person-person springs are
    // dampened so two people are not pulled together merely for sharing
    // many neighbors.
    let springs: Vec<(usize, usize, f32)> = graph
        .resolved_edges()
        .iter()
        .zip(visible.edges.iter())
        .filter(|(_, &eligible)| eligible)
        .filter_map(|(edge, _)| {
            let from = *local_index.get(&edge.from)?;
            let to = *local_index.get(&edge.to)?;
            let both_persons = graph.nodes[edge.from].kind.is_person()
                && graph.nodes[edge.to].kind.is_person();
            let mut strength = edge.kind.attraction_strength() * params.attraction;
            if both_persons {
                strength *= PERSON_EDGE_DAMPENER;
            }
            Some((from, to, strength))
        })
        .collect();

    let mut degrees = vec![0usize; count];
    for &(from, to, _) in &springs {
        degrees[from] += 1;
        degrees[to] += 1;
    }
    let max_degree = degrees.iter().copied().max().unwrap_or(0).max(1);

    let dominant: Vec<bool> = members
        .iter()
        .map(|&index| graph.nodes[index].kind.is_dominant_person())
        .collect();

    let iterations = params.iterations.max(1);
    let k = (area.x * area.y / count as f32).sqrt() * device.spacing_multiplier();
    let center = area * 0.5;
    let start_temperature = TEMPERATURE_FACTOR * area.x.min(area.y);

    let mut forces = vec![Vec2::ZERO; count];
    for iteration in 0..iterations {
        forces.fill(Vec2::ZERO);

        for a in 0..count {
            for b in (a + 1)..count {
                let delta = graph.nodes[members[a]].position - graph.nodes[members[b]].position;
                let distance = delta.length().max(DISTANCE_FLOOR);
                let same_type_bonus = if dominant[a] && dominant[b] {
                    params.same_type_repel
                } else {
                    0.0
                };
                let repulse = params.repulsion * k * k * (1.0 + same_type_bonus) / distance;
                let direction = delta / distance;
                forces[a] += direction * repulse;
                forces[b] -= direction * repulse;
            }
        }

        for &(from, to, strength) in &springs {
            let delta = graph.nodes[members[from]].position - graph.nodes[members[to]].position;
            let distance = delta.length().max(DISTANCE_FLOOR);
            let pull = strength * distance * distance / k;
            let direction = delta / distance;
            forces[from] -= direction * pull;
            forces[to] += direction * pull;
        }

        // Hubs are pulled toward the center harder than leaves, which yields
        // the core-periphery look without any explicit clustering.
        for (local, &index) in members.iter().enumerate() {
            let centrality = degrees[local] as f32 / max_degree as f32;
            let weight = params.gravity * (0.5 + centrality * 0.8);
            forces[local] += (center - graph.nodes[index].position) * weight;
        }

        let temperature = start_temperature * (1.0 - iteration as f32 / iterations as f32);
        for (local, &index) in members.iter().enumerate() {
            let force = forces[local];
            let magnitude = force.length();
            if magnitude > 0.0 {
                graph.nodes[index].position += force / magnitude * magnitude.min(temperature);
            }
            clamp_position(
                &mut graph.nodes[index].position,
                area,
                device,
                ITERATION_CLAMP_MARGIN,
            );
        }
    }

    relax_spacing(
        graph,
        &members,
        params.min_distance * device.min_distance_scale(),
        device.relaxation_passes(),
    );

    if device == DeviceClass::Desktop {
        for &index in &members {
            clamp_position(
                &mut graph.nodes[index].position,
                area,
                device,
                FINAL_CLAMP_PADDING,
            );
        }
    }

    LayoutSession {
        nodes: members,
        forces,
        degrees,
        max_degree,
        area,
    }
}

fn seed_positions(graph: &mut SceneGraph, members: &[usize], area: Vec2, seed: u64) {
    for &index in members {
        let node = &mut graph.nodes[index];
        if !node.placed {
            let (unit_x, unit_y) = seeded_unit_pair(seed, &node.id);
            node.position = vec2(unit_x * area.x, unit_y * area.y);
            node.placed = true;
        }

        // ±1px symmetry breaker; co-located nodes would otherwise cancel
        // each other's repulsion exactly.
        let (jitter_x, jitter_y) = seeded_unit_pair(seed ^ JITTER_SALT, &node.id);
        node.position += vec2(jitter_x * 2.0 - 1.0, jitter_y * 2.0 - 1.0);
    }
}

fn clamp_position(position: &mut Vec2, area: Vec2, device: DeviceClass, margin: f32) {
    match device {
        DeviceClass::Desktop => {
            position.x = position.x.clamp(margin, (area.x - margin).max(margin));
            position.y = position.y.clamp(margin, (area.y - margin).max(margin));
        }
        DeviceClass::Compact => {
            position.x = position.x.clamp(-COMPACT_OVERSHOOT_X, area.x + COMPACT_OVERSHOOT_X);
            position.y = position.y.clamp(-COMPACT_OVERSHOOT_Y, area.y + COMPACT_OVERSHOOT_Y);
        }
    }
}

/// Non-physical overlap correction: any pair closer than `min_distance` is
/// pushed apart by half the shortfall each. The continuous forces do not
/// reliably guarantee label spacing near convergence; this pass does.
fn relax_spacing(graph: &mut SceneGraph, members: &[usize], min_distance: f32, passes: usize) {
    for _ in 0..passes {
        for a in 0..members.len() {
            for b in (a + 1)..members.len() {
                let delta = graph.nodes[members[a]].position - graph.nodes[members[b]].position;
                let distance = delta.length();
                if distance >= min_distance {
                    continue;
                }

                let direction = if distance > DISTANCE_FLOOR {
                    delta / distance
                } else {
                    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * TAU;
                    vec2(angle.cos(), angle.sin())
                };

                let push = (min_distance - distance) * 0.5;
                graph.nodes[members[a]].position += direction * push;
                graph.nodes[members[b]].position -= direction * push;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{KindToggles, graph::compute_visible_set};
    use super::*;
    use crate::scene::{EdgeKind, NodeKind, RoleSet, SceneEdge, SceneNode};

    const CANVAS: Vec2 = vec2(1280.0, 720.0);

    fn person(id: &str, classifier: &str) -> SceneNode {
        SceneNode::new(
            format!("person:{id}"),
            NodeKind::Person(RoleSet::from_classifier(classifier)),
            id.to_string(),
            None,
        )
    }

    fn group(id: &str, kind: NodeKind) -> SceneNode {
        SceneNode::new(id.to_string(), kind, id.to_string(), None)
    }

    fn edge(from: &str, to: &str, kind: EdgeKind) -> SceneEdge {
        SceneEdge {
            from: from.to_string(),
            to: to.to_string(),
            kind,
        }
    }

    fn hub_fixture() -> SceneGraph {
        SceneGraph::new(
            vec![
                person("ada", "performer"),
                group("place:ohm", NodeKind::Place),
                group("genre:techno", NodeKind::Genre),
            ],
            vec![
                edge("person:ada", "place:ohm", EdgeKind::Place),
                edge("person:ada", "genre:techno", EdgeKind::Genre),
            ],
        )
    }

    fn run(graph: &mut SceneGraph, device: DeviceClass, params: &LayoutParams) -> LayoutSession {
        let visible = compute_visible_set(graph, &KindToggles::default(), "");
        run_layout(graph, &visible, CANVAS, device, params)
    }

    #[test]
    fn empty_visible_set_is_a_noop() {
        let mut graph = hub_fixture();
        let toggles = KindToggles {
            performer: false,
            dj: false,
            other_person: false,
            place: false,
            genre: false,
            collective: false,
        };
        let visible = compute_visible_set(&graph, &toggles, "");
        let session = run_layout(
            &mut graph,
            &visible,
            CANVAS,
            DeviceClass::Desktop,
            &LayoutParams::default(),
        );

        assert!(session.nodes.is_empty());
        assert!(graph.nodes.iter().all(|node| !node.placed));
    }

    #[test]
    fn positions_stay_finite_from_identical_start_points() {
        let mut graph = hub_fixture();
        for node in &mut graph.nodes {
            node.position = vec2(500.0, 500.0);
            node.placed = true;
        }

        run(&mut graph, DeviceClass::Desktop, &LayoutParams::default());
        for node in &graph.nodes {
            assert!(node.position.x.is_finite() && node.position.y.is_finite());
        }
    }

    #[test]
    fn desktop_run_respects_final_padding() {
        let mut graph = hub_fixture();
        let session = run(&mut graph, DeviceClass::Desktop, &LayoutParams::default());

        let area = session.area;
        assert_eq!(area, CANVAS * 3.0);
        for node in &graph.nodes {
            assert!(node.position.x >= FINAL_CLAMP_PADDING - 1e-3);
            assert!(node.position.x <= area.x - FINAL_CLAMP_PADDING + 1e-3);
            assert!(node.position.y >= FINAL_CLAMP_PADDING - 1e-3);
            assert!(node.position.y <= area.y - FINAL_CLAMP_PADDING + 1e-3);
        }
    }

    #[test]
    fn compact_run_stays_within_loose_bounds() {
        let mut graph = hub_fixture();
        let session = run(&mut graph, DeviceClass::Compact, &LayoutParams::default());

        let area = session.area;
        assert_eq!(area, CANVAS * 1.8);
        for node in &graph.nodes {
            assert!(node.position.x >= -COMPACT_OVERSHOOT_X - 1e-3);
            assert!(node.position.x <= area.x + COMPACT_OVERSHOOT_X + 1e-3);
            assert!(node.position.y >= -COMPACT_OVERSHOOT_Y - 1e-3);
            assert!(node.position.y <= area.y + COMPACT_OVERSHOOT_Y + 1e-3);
        }
    }

    #[test]
    fn minimum_spacing_holds_after_relaxation() {
        let mut graph = hub_fixture();
        let params = LayoutParams::default();
        run(&mut graph, DeviceClass::Desktop, &params);

        for a in 0..graph.node_count() {
            for b in (a + 1)..graph.node_count() {
                let distance = (graph.nodes[a].position - graph.nodes[b].position).length();
                assert!(
                    distance >= params.min_distance - 0.5,
                    "pair ({a}, {b}) ended up {distance} apart"
                );
            }
        }
    }

    #[test]
    fn hub_ends_up_nearest_the_center() {
        let mut graph = hub_fixture();
        let session = run(&mut graph, DeviceClass::Desktop, &LayoutParams::default());

        let center = session.area * 0.5;
        let ada = graph.node_index("person:ada").unwrap();
        let ohm = graph.node_index("place:ohm").unwrap();
        let techno = graph.node_index("genre:techno").unwrap();

        let ada_distance = (graph.nodes[ada].position - center).length();
        assert!(ada_distance < (graph.nodes[ohm].position - center).length());
        assert!(ada_distance < (graph.nodes[techno].position - center).length());
        assert_eq!(session.max_degree, 2);
        assert_eq!(session.degrees.iter().sum::<usize>(), 4);
    }

    #[test]
    fn same_type_repel_pushes_performers_further_apart() {
        let shared_place = || {
            SceneGraph::new(
                vec![
                    person("ada", "performer"),
                    person("luz", "performer"),
                    group("place:panke", NodeKind::Place),
                ],
                vec![
                    edge("person:ada", "place:panke", EdgeKind::Place),
                    edge("person:luz", "place:panke", EdgeKind::Place),
                ],
            )
        };

        let person_gap = |same_type_repel: f32| {
            let mut graph = shared_place();
            let params = LayoutParams {
                same_type_repel,
                ..LayoutParams::default()
            };
            run(&mut graph, DeviceClass::Desktop, &params);
            let ada = graph.node_index("person:ada").unwrap();
            let luz = graph.node_index("person:luz").unwrap();
            (graph.nodes[ada].position - graph.nodes[luz].position).length()
        };

        let with_bonus = person_gap(LayoutParams::default().same_type_repel);
        let without_bonus = person_gap(0.0);
        assert!(
            with_bonus > without_bonus + 1.0,
            "expected {with_bonus} to clearly exceed {without_bonus}"
        );
    }

    #[test]
    fn identical_seeds_reproduce_identical_layouts() {
        let positions = |seed: u64| {
            let mut graph = hub_fixture();
            let params = LayoutParams {
                seed,
                ..LayoutParams::default()
            };
            run(&mut graph, DeviceClass::Desktop, &params);
            graph
                .nodes
                .iter()
                .map(|node| (node.position.x, node.position.y))
                .collect::<Vec<_>>()
        };

        assert_eq!(positions(42), positions(42));
        assert_ne!(positions(42), positions(43));
    }

    #[test]
    fn dragged_positions_are_kept_as_starting_points() {
        let mut graph = hub_fixture();
        run(&mut graph, DeviceClass::Desktop, &LayoutParams::default());

        // A second run starts from the relaxed state, not from fresh seeds,
        // so it stays in the same neighborhood.
        let before: Vec<Vec2> = graph.nodes.iter().map(|node| node.position).collect();
        run(&mut graph, DeviceClass::Desktop, &LayoutParams::default());
        for (node, old) in graph.nodes.iter().zip(before.iter()) {
            assert!((node.position - *old).length() < 300.0);
        }
    }
}
