use std::collections::HashMap;

use super::graph::{EdgeKind, NodeKind, RoleSet, SceneEdge, SceneGraph, SceneNode};
use super::records::EntityRecord;

fn person_id(name: &str) -> String {
    format!("person:{}", name.trim().to_lowercase())
}

fn group_id(prefix: &str, label: &str) -> String {
    format!("{prefix}:{}", label.trim().to_lowercase())
}

/// Builds the session graph from normalized records: one node per person plus
/// one node per distinct place, genre, and collective label, with typed edges
/// for each affiliation. Records without a usable name and empty affiliation
/// labels are skipped, not rejected; the source data is user-edited.
pub fn assemble_scene_graph(records: Vec<EntityRecord>) -> SceneGraph {
    let mut nodes: Vec<SceneNode> = Vec::new();
    let mut edges: Vec<SceneEdge> = Vec::new();
    let mut seen_ids: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    let ensure_group = |nodes: &mut Vec<SceneNode>,
                            seen: &mut HashMap<String, usize>,
                            prefix: &str,
                            kind: NodeKind,
                            label: &str|
     -> Option<String> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        let id = group_id(prefix, label);
        if !seen.contains_key(&id) {
            seen.insert(id.clone(), nodes.len());
            nodes.push(SceneNode::new(id.clone(), kind, label.to_string(), None));
        }
        Some(id)
    };

    // Person nodes first, in record order, so the list view mirrors the source.
    let mut persons: Vec<EntityRecord> = Vec::new();
    for record in records {
        let name = record.name.trim();
        if name.is_empty() {
            skipped += 1;
            continue;
        }
        let id = person_id(name);
        if seen_ids.contains_key(&id) {
            log::warn!("duplicate record name {name:?} skipped");
            skipped += 1;
            continue;
        }

        let roles = RoleSet::from_classifier(&record.role);
        seen_ids.insert(id.clone(), nodes.len());
        nodes.push(SceneNode::new(
            id,
            NodeKind::Person(roles),
            name.to_string(),
            Some(record.clone()),
        ));
        persons.push(record);
    }

    for record in &persons {
        let from = person_id(&record.name);

        for location in &record.locations {
            if let Some(to) =
                ensure_group(&mut nodes, &mut seen_ids, "place", NodeKind::Place, location)
            {
                edges.push(SceneEdge {
                    from: from.clone(),
                    to,
                    kind: EdgeKind::Place,
                });
            }
        }

        if let Some(to) =
            ensure_group(&mut nodes, &mut seen_ids, "genre", NodeKind::Genre, &record.genre)
        {
            edges.push(SceneEdge {
                from: from.clone(),
                to,
                kind: EdgeKind::Genre,
            });
        }

        for collective in &record.collectives {
            if let Some(to) = ensure_group(
                &mut nodes,
                &mut seen_ids,
                "collective",
                NodeKind::Collective,
                collective,
            ) {
                edges.push(SceneEdge {
                    from: from.clone(),
                    to,
                    kind: EdgeKind::Collective,
                });
            }
        }

        // Person-to-person associations; unresolved names fall out during
        // index resolution.
        for associate in &record.associates {
            if associate.trim().is_empty() {
                continue;
            }
            edges.push(SceneEdge {
                from: from.clone(),
                to: person_id(associate),
                kind: EdgeKind::Other,
            });
        }
    }

    if skipped > 0 {
        log::warn!("skipped {skipped} records without a usable name");
    }

    let graph = SceneGraph::new(nodes, edges);
    log::info!(
        "assembled scene graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::super::graph::PrimaryKind;
    use super::*;

    fn record(name: &str, role: &str, genre: &str, locations: &[&str]) -> EntityRecord {
        EntityRecord {
            name: name.to_string(),
            role: role.to_string(),
            genre: genre.to_string(),
            locations: locations.iter().map(|s| s.to_string()).collect(),
            ..EntityRecord::default()
        }
    }

    #[test]
    fn shared_labels_become_one_node() {
        let graph = assemble_scene_graph(vec![
            record("A", "band", "techno", &["OHM"]),
            record("B", "dj", "techno", &["OHM"]),
        ]);

        let places = graph
            .nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Place)
            .count();
        let genres = graph
            .nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Genre)
            .count();
        assert_eq!(places, 1);
        assert_eq!(genres, 1);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn nameless_and_duplicate_records_are_skipped() {
        let graph = assemble_scene_graph(vec![
            record("", "band", "dub", &["Panke"]),
            record("Solo", "band", "dub", &[]),
            record("Solo", "dj", "dub", &[]),
        ]);

        let persons = graph
            .nodes
            .iter()
            .filter(|node| node.kind.is_person())
            .count();
        assert_eq!(persons, 1);
        assert_eq!(
            graph.nodes[graph.node_index("person:solo").unwrap()]
                .kind
                .primary(),
            PrimaryKind::Performer
        );
    }

    #[test]
    fn empty_affiliation_labels_are_skipped() {
        let graph = assemble_scene_graph(vec![record("Solo", "band", "", &["", "  "])]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn associate_edges_resolve_to_person_nodes() {
        let mut lead = record("Lead", "band", "", &[]);
        lead.associates = vec!["Support".to_string(), "Unknown".to_string()];
        let graph = assemble_scene_graph(vec![lead, record("Support", "dj", "", &[])]);

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.resolved_edges()[0];
        assert_eq!(edge.kind, EdgeKind::Other);
        assert_eq!(graph.nodes[edge.to].label, "Support");
    }

    #[test]
    fn person_order_follows_record_order() {
        let graph = assemble_scene_graph(vec![
            record("Zeta", "band", "", &[]),
            record("Alpha", "band", "", &[]),
        ]);
        assert_eq!(graph.nodes[0].label, "Zeta");
        assert_eq!(graph.nodes[1].label, "Alpha");
    }
}
