mod build;
mod graph;
mod records;
mod sample;

pub use build::assemble_scene_graph;
pub use graph::{
    EdgeKind, NodeKind, PrimaryKind, ResolvedEdge, RoleSet, SceneEdge, SceneGraph, SceneNode,
};
pub use records::{EntityRecord, RecordSource, load_with_fallback};
