pub mod call_graph;
pub mod file_graph;
pub mod inheritance_graph;

pub use call_graph::{CallEdge, CallGraph, FunctionNode};
pub use file_graph::{FileDependencyGraph, FileEdge, FileNode};
pub use inheritance_graph::{InheritanceEdge, InheritanceGraph, TypeNode};

use codegraph_core::Ir;
use tracing::info;

/// The three graphs the rest of the pipeline builds on, constructed once
/// from a single [`Ir`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct Graphs {
    pub files: FileDependencyGraph,
    pub inheritance: InheritanceGraph,
    pub calls: CallGraph,
}

impl Graphs {
    pub fn build(ir: &Ir) -> Self {
        let files = FileDependencyGraph::build(ir);
        let inheritance = InheritanceGraph::build(ir);
        let calls = CallGraph::build(ir);

        info!(
            files = files.nodes().len(),
            types = inheritance.nodes().len(),
            functions = calls.nodes().len(),
            "built dependency, inheritance, and call graphs"
        );

        Self {
            files,
            inheritance,
            calls,
        }
    }
}
