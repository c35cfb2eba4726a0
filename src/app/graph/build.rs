use crate::scene::{NodeKind, SceneGraph, SceneNode};
use crate::util::contains_ci;

use super::super::{KindToggles, ViewModel, VisibleSet};

impl KindToggles {
    /// A multi-role node stays visible while any of its roles is enabled.
    fn node_visible(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Person(roles) => {
                (roles.performer && self.performer)
                    || (roles.dj && self.dj)
                    || (roles.other && self.other_person)
            }
            NodeKind::Place => self.place,
            NodeKind::Genre => self.genre,
            NodeKind::Collective => self.collective,
        }
    }
}

fn node_matches_term(node: &SceneNode, term_lower: &str) -> bool {
    if contains_ci(&node.label, term_lower) {
        return true;
    }
    let Some(record) = &node.profile else {
        return false;
    };

    contains_ci(&record.role, term_lower)
        || contains_ci(&record.genre, term_lower)
        || record
            .locations
            .iter()
            .chain(record.collectives.iter())
            .chain(record.associates.iter())
            .any(|field| contains_ci(field, term_lower))
        || record
            .url
            .as_deref()
            .is_some_and(|url| contains_ci(url, term_lower))
        || record
            .info
            .as_deref()
            .is_some_and(|info| contains_ci(info, term_lower))
}

/// Derives the node/edge sets eligible for rendering and layout from the
/// toggle map and search term.
///
/// Without a search term the render set is exactly the type-visible nodes.
/// With one, nodes matching the term (label or any payload field, substring,
/// case-insensitive) are expanded one hop along resolved edges, and that
/// search-visible set overrides the type toggles entirely; a term with no hits
/// yields an empty set. Edges are eligible iff both endpoints render.
///
/// The layout set additionally keeps dj-role nodes hidden by toggles while no
/// search is active, so toggling djs off does not let their neighbors drift.
pub(in crate::app) fn compute_visible_set(
    graph: &SceneGraph,
    toggles: &KindToggles,
    search: &str,
) -> VisibleSet {
    let node_count = graph.node_count();
    let term = search.trim().to_lowercase();

    let render: Vec<bool> = if term.is_empty() {
        graph
            .nodes
            .iter()
            .map(|node| toggles.node_visible(node.kind))
            .collect()
    } else {
        let matches: Vec<bool> = graph
            .nodes
            .iter()
            .map(|node| node_matches_term(node, &term))
            .collect();

        if matches.iter().any(|&matched| matched) {
            let mut expanded = matches.clone();
            for edge in graph.resolved_edges() {
                if matches[edge.from] {
                    expanded[edge.to] = true;
                }
                if matches[edge.to] {
                    expanded[edge.from] = true;
                }
            }
            expanded
        } else {
            vec![false; node_count]
        }
    };

    let mut layout = render.clone();
    if term.is_empty() {
        for (index, node) in graph.nodes.iter().enumerate() {
            if node.kind.is_dj() {
                layout[index] = true;
            }
        }
    }

    let edges: Vec<bool> = graph
        .resolved_edges()
        .iter()
        .map(|edge| render[edge.from] && render[edge.to])
        .collect();

    let render_count = render.iter().filter(|&&visible| visible).count();
    let edge_count = edges.iter().filter(|&&eligible| eligible).count();

    VisibleSet {
        render,
        layout,
        edges,
        render_count,
        edge_count,
    }
}

impl ViewModel {
    pub(in crate::app) fn refresh_visibility(&mut self) {
        if !self.filter_dirty {
            return;
        }
        self.visible = compute_visible_set(&self.graph, &self.toggles, &self.search);
        self.filter_dirty = false;
    }
}
