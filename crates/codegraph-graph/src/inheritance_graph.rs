use codegraph_core::{DeclKind, Ir};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeNode {
    pub id: String,
    pub name: String,
    pub kind: DeclKind,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InheritanceEdge {
    pub from: String,
    pub to: String,
    pub is_internal: bool,
}

/// Inheritance graph. Edges match purely on name: an entry in a
/// type's `inheritedTypes` is internal iff some declared type in the IR has
/// that exact name, regardless of which file declares it.
#[derive(Debug, Clone, Default)]
pub struct InheritanceGraph {
    nodes: Vec<TypeNode>,
    edges: Vec<InheritanceEdge>,
}

impl InheritanceGraph {
    pub fn build(ir: &Ir) -> Self {
        let declared: HashSet<&str> = ir.type_declarations.iter().map(|t| t.name.as_str()).collect();

        let nodes = ir
            .type_declarations
            .iter()
            .map(|t| TypeNode {
                id: t.id.clone(),
                name: t.name.to_string(),
                kind: t.kind,
                file_path: t.file_path.clone(),
            })
            .collect();

        let mut edges = Vec::new();
        for t in &ir.type_declarations {
            for parent in &t.inherited_types {
                edges.push(InheritanceEdge {
                    from: t.name.to_string(),
                    to: parent.clone(),
                    is_internal: declared.contains(parent.as_str()),
                });
            }
        }

        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[TypeNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[InheritanceEdge] {
        &self.edges
    }

    pub fn subtypes(&self, type_name: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.to == type_name)
            .map(|e| e.from.as_str())
            .collect()
    }

    pub fn supertypes(&self, type_name: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.from == type_name)
            .map(|e| e.to.as_str())
            .collect()
    }

    /// Count of protocol declarations with `type_name` among their
    /// inherited types, used by the wide-protocol signal.
    pub fn conformer_count(&self, protocol_name: &str) -> usize {
        self.subtypes(protocol_name).len()
    }

    /// Memoized inheritance depth, following only internal edges. A type
    /// with no internal supertype has depth 0; a cycle contributes 0 at the
    /// point it closes back on itself.
    pub fn depth(&self, type_name: &str) -> u32 {
        let mut memo = HashMap::new();
        self.depth_rec(type_name, &mut memo, &mut HashSet::new())
    }

    fn depth_rec(
        &self,
        type_name: &str,
        memo: &mut HashMap<String, u32>,
        visiting: &mut HashSet<String>,
    ) -> u32 {
        if let Some(d) = memo.get(type_name) {
            return *d;
        }
        if visiting.contains(type_name) {
            return 0;
        }
        visiting.insert(type_name.to_string());

        let internal_parents: Vec<&str> = self
            .edges
            .iter()
            .filter(|e| e.from == type_name && e.is_internal)
            .map(|e| e.to.as_str())
            .collect();

        let depth = if internal_parents.is_empty() {
            0
        } else {
            1 + internal_parents
                .iter()
                .map(|parent| self.depth_rec(parent, memo, visiting))
                .max()
                .unwrap_or(0)
        };

        visiting.remove(type_name);
        memo.insert(type_name.to_string(), depth);
        depth
    }
}
