use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use super::records::EntityRecord;

/// Role capabilities carried by a person-like node. A single entity may act in
/// several roles at once ("performer and dj"); visibility treats the roles
/// independently while rendering uses the derived [`PrimaryKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleSet {
    pub performer: bool,
    pub dj: bool,
    pub other: bool,
}

impl RoleSet {
    pub fn from_classifier(classifier: &str) -> Self {
        let lowered = classifier.to_lowercase();
        let mut roles = Self {
            performer: ["performer", "musician", "band", "artist", "singer", "producer"]
                .iter()
                .any(|keyword| lowered.contains(keyword)),
            dj: lowered.contains("dj"),
            other: false,
        };
        if !roles.performer && !roles.dj {
            roles.other = true;
        }
        roles
    }

    pub fn dominant(self) -> bool {
        self.performer || self.dj
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Person(RoleSet),
    Place,
    Genre,
    Collective,
}

/// Canonical single kind used wherever one tag is needed (colors, radii,
/// hit-testing). Multi-role persons resolve performer over dj over other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimaryKind {
    Performer,
    Dj,
    OtherPerson,
    Place,
    Genre,
    Collective,
}

impl NodeKind {
    pub fn primary(self) -> PrimaryKind {
        match self {
            Self::Person(roles) => {
                if roles.performer {
                    PrimaryKind::Performer
                } else if roles.dj {
                    PrimaryKind::Dj
                } else {
                    PrimaryKind::OtherPerson
                }
            }
            Self::Place => PrimaryKind::Place,
            Self::Genre => PrimaryKind::Genre,
            Self::Collective => PrimaryKind::Collective,
        }
    }

    pub fn is_person(self) -> bool {
        matches!(self, Self::Person(_))
    }

    pub fn is_dominant_person(self) -> bool {
        matches!(self, Self::Person(roles) if roles.dominant())
    }

    pub fn is_dj(self) -> bool {
        matches!(self, Self::Person(roles) if roles.dj)
    }
}

impl PrimaryKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Performer => "performer",
            Self::Dj => "dj",
            Self::OtherPerson => "person",
            Self::Place => "place",
            Self::Genre => "genre",
            Self::Collective => "collective",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Place,
    Genre,
    Collective,
    Other,
}

impl EdgeKind {
    /// Spring strength scale; affiliation edges bind tighter than generic ones.
    pub fn attraction_strength(self) -> f32 {
        match self {
            Self::Place | Self::Genre | Self::Collective => 0.9,
            Self::Other => 0.6,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    /// Source record, present for person-like nodes only. Searched by the
    /// visibility filter and shown by the detail panel; the layout engine
    /// never looks at it.
    pub profile: Option<EntityRecord>,
    pub position: Vec2,
    pub placed: bool,
}

impl SceneNode {
    pub fn new(id: String, kind: NodeKind, label: String, profile: Option<EntityRecord>) -> Self {
        Self {
            id,
            kind,
            label,
            profile,
            position: vec2(0.0, 0.0),
            placed: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

/// Edge with both endpoints resolved to node indices. Rebuilt by
/// [`SceneGraph::build_index`]; edges whose endpoints do not resolve are not
/// represented here.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedEdge {
    pub from: usize,
    pub to: usize,
    pub kind: EdgeKind,
}

/// Node and edge sets are fixed after construction; only positions mutate
/// during a session. Insertion order of `nodes` is preserved for the list
/// view.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    index_by_id: HashMap<String, usize>,
    resolved: Vec<ResolvedEdge>,
    neighbors: Vec<Vec<usize>>,
}

impl SceneGraph {
    pub fn new(nodes: Vec<SceneNode>, edges: Vec<SceneEdge>) -> Self {
        let mut graph = Self {
            nodes,
            edges,
            index_by_id: HashMap::new(),
            resolved: Vec::new(),
            neighbors: Vec::new(),
        };
        graph.build_index();
        graph
    }

    /// Rebuilds the id map, the resolved-edge cache, and the adjacency lists.
    /// Edges with a missing endpoint are dropped; the record source is
    /// user-edited spreadsheet data and dangling references are expected.
    pub fn build_index(&mut self) {
        self.index_by_id = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect();

        self.resolved.clear();
        let mut dropped = 0usize;
        for edge in &self.edges {
            match (self.index_by_id.get(&edge.from), self.index_by_id.get(&edge.to)) {
                (Some(&from), Some(&to)) if from != to => {
                    self.resolved.push(ResolvedEdge {
                        from,
                        to,
                        kind: edge.kind,
                    });
                }
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            log::warn!("dropped {dropped} edges with unresolved or self-referential endpoints");
        }

        self.neighbors = vec![Vec::new(); self.nodes.len()];
        for edge in &self.resolved {
            self.neighbors[edge.from].push(edge.to);
            self.neighbors[edge.to].push(edge.from);
        }
        for list in &mut self.neighbors {
            list.sort_unstable();
            list.dedup();
        }
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn resolved_edges(&self) -> &[ResolvedEdge] {
        &self.resolved
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.resolved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, kind: NodeKind) -> SceneNode {
        SceneNode::new(id.to_string(), kind, id.to_string(), None)
    }

    fn edge(from: &str, to: &str, kind: EdgeKind) -> SceneEdge {
        SceneEdge {
            from: from.to_string(),
            to: to.to_string(),
            kind,
        }
    }

    #[test]
    fn build_index_drops_dangling_edges() {
        let graph = SceneGraph::new(
            vec![
                node("person:ada", NodeKind::Person(RoleSet::from_classifier("performer"))),
                node("place:panke", NodeKind::Place),
            ],
            vec![
                edge("person:ada", "place:panke", EdgeKind::Place),
                edge("person:ada", "place:missing", EdgeKind::Place),
                edge("person:ghost", "place:panke", EdgeKind::Place),
            ],
        );

        assert_eq!(graph.resolved_edges().len(), 1);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0]);
    }

    #[test]
    fn build_index_drops_self_edges() {
        let graph = SceneGraph::new(
            vec![node("genre:dub", NodeKind::Genre)],
            vec![edge("genre:dub", "genre:dub", EdgeKind::Genre)],
        );
        assert_eq!(graph.resolved_edges().len(), 0);
    }

    #[test]
    fn role_set_parses_combined_classifier() {
        let roles = RoleSet::from_classifier("Performer and DJ");
        assert!(roles.performer);
        assert!(roles.dj);
        assert!(!roles.other);

        let fallback = RoleSet::from_classifier("promoter");
        assert!(fallback.other);
        assert!(!fallback.dominant());
    }

    #[test]
    fn primary_kind_prefers_performer_over_dj() {
        let both = NodeKind::Person(RoleSet {
            performer: true,
            dj: true,
            other: false,
        });
        assert_eq!(both.primary(), PrimaryKind::Performer);

        let dj_only = NodeKind::Person(RoleSet {
            performer: false,
            dj: true,
            other: false,
        });
        assert_eq!(dj_only.primary(), PrimaryKind::Dj);
        assert!(dj_only.is_dominant_person());
        assert!(dj_only.is_dj());
    }

    #[test]
    fn node_lookup_by_id() {
        let graph = SceneGraph::new(vec![node("place:panke", NodeKind::Place)], Vec::new());
        assert_eq!(graph.node_index("place:panke"), Some(0));
        assert_eq!(graph.node_index("place:else"), None);
    }
}
