use codegraph_core::Ir;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    pub path: String,
    pub module_name: String,
    pub is_entry_point: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEdge {
    pub from: String,
    pub to: String,
    pub resolved_path: Option<String>,
}

/// File-dependency graph. Nodes are input files; edges follow
/// import clauses. An edge's target is resolved against `moduleToFile`,
/// which maps a module name (base file name without extension) to the path
/// of the file that declares it.
#[derive(Debug, Clone, Default)]
pub struct FileDependencyGraph {
    nodes: Vec<FileNode>,
    index_by_path: HashMap<String, usize>,
    module_to_file: HashMap<String, String>,
    edges: Vec<FileEdge>,
}

impl FileDependencyGraph {
    pub fn build(ir: &Ir) -> Self {
        let mut files: Vec<&codegraph_core::FileRecord> = ir.files.iter().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let mut module_to_file = HashMap::new();
        for file in &files {
            // Sorted-by-path iteration order makes "last file wins" on a
            // base-name collision a deterministic, documented policy
            // rather than an accident of input order.
            module_to_file.insert(file.module_name.to_string(), file.path.clone());
        }

        let mut nodes = Vec::with_capacity(files.len());
        let mut index_by_path = HashMap::with_capacity(files.len());
        for file in &files {
            index_by_path.insert(file.path.clone(), nodes.len());
            nodes.push(FileNode {
                path: file.path.clone(),
                module_name: file.module_name.to_string(),
                is_entry_point: file.is_entry_point,
            });
        }

        let mut edges = Vec::new();
        for file in &files {
            for import in &file.imports {
                let to = import.module_name.to_string();
                let resolved_path = module_to_file.get(&to).cloned();
                edges.push(FileEdge {
                    from: file.path.clone(),
                    to,
                    resolved_path,
                });
            }
        }

        Self {
            nodes,
            index_by_path,
            module_to_file,
            edges,
        }
    }

    pub fn nodes(&self) -> &[FileNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FileEdge] {
        &self.edges
    }

    pub fn node(&self, path: &str) -> Option<&FileNode> {
        self.index_by_path.get(path).map(|&i| &self.nodes[i])
    }

    pub fn resolve_module(&self, module_name: &str) -> Option<&str> {
        self.module_to_file.get(module_name).map(String::as_str)
    }

    pub fn incoming_edges(&self, path: &str) -> Vec<&FileEdge> {
        match self.node(path) {
            Some(node) => self
                .edges
                .iter()
                .filter(|e| e.to == node.module_name)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn outgoing_edges(&self, path: &str) -> Vec<&FileEdge> {
        self.edges.iter().filter(|e| e.from == path).collect()
    }

    pub fn in_degree(&self, path: &str) -> usize {
        self.incoming_edges(path).len()
    }

    pub fn out_degree(&self, path: &str) -> usize {
        self.outgoing_edges(path).len()
    }

    /// Files that transitively depend on `path`, found by BFS over the
    /// reverse edge set. Used for blast-radius.
    pub fn transitive_dependents(&self, path: &str) -> HashSet<String> {
        let mut dependents = HashSet::new();
        let mut seen = HashSet::new();
        seen.insert(path.to_string());
        let mut queue = VecDeque::new();
        queue.push_back(path.to_string());

        while let Some(current) = queue.pop_front() {
            for edge in self.incoming_edges(&current) {
                if seen.insert(edge.from.clone()) {
                    dependents.insert(edge.from.clone());
                    queue.push_back(edge.from.clone());
                }
            }
        }

        dependents
    }

    /// Forward dependency depth, memoized, treating unresolved imports as
    /// leaves and back-edges to a node already being visited as a
    /// zero-depth contribution.
    pub fn depth(&self, path: &str) -> u32 {
        let mut memo = HashMap::new();
        self.depth_rec(path, &mut memo, &mut HashSet::new())
    }

    fn depth_rec(
        &self,
        path: &str,
        memo: &mut HashMap<String, u32>,
        visiting: &mut HashSet<String>,
    ) -> u32 {
        if let Some(d) = memo.get(path) {
            return *d;
        }
        if visiting.contains(path) {
            return 0;
        }
        visiting.insert(path.to_string());

        let resolved: Vec<String> = self
            .outgoing_edges(path)
            .into_iter()
            .filter_map(|e| e.resolved_path.clone())
            .collect();

        let depth = if resolved.is_empty() {
            0
        } else {
            1 + resolved
                .iter()
                .map(|target| self.depth_rec(target, memo, visiting))
                .max()
                .unwrap_or(0)
        };

        visiting.remove(path);
        memo.insert(path.to_string(), depth);
        depth
    }

    /// Cycles found by DFS over resolved edges. Each cycle is the slice of
    /// the DFS path from the first occurrence of the repeated node through
    /// the end, with that node appended once more to close the loop.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut visited = HashSet::new();
        let mut cycles = Vec::new();

        let mut paths: Vec<&str> = self.nodes.iter().map(|n| n.path.as_str()).collect();
        paths.sort_unstable();

        for start in paths {
            if !visited.contains(start) {
                let mut rec_stack = Vec::new();
                let mut on_stack = HashSet::new();
                self.dfs_cycles(start, &mut visited, &mut rec_stack, &mut on_stack, &mut cycles);
            }
        }

        cycles
    }

    fn dfs_cycles(
        &self,
        node: &str,
        visited: &mut HashSet<String>,
        rec_stack: &mut Vec<String>,
        on_stack: &mut HashSet<String>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        visited.insert(node.to_string());
        rec_stack.push(node.to_string());
        on_stack.insert(node.to_string());

        for edge in self.outgoing_edges(node) {
            let Some(target) = &edge.resolved_path else {
                continue; // unresolved imports are leaves, ignored for cycles
            };
            if on_stack.contains(target) {
                if let Some(pos) = rec_stack.iter().position(|p| p == target) {
                    let mut cycle: Vec<String> = rec_stack[pos..].to_vec();
                    cycle.push(target.clone());
                    cycles.push(cycle);
                }
            } else if !visited.contains(target) {
                self.dfs_cycles(target, visited, rec_stack, on_stack, cycles);
            }
        }

        rec_stack.pop();
        on_stack.remove(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::{FileRecord, ImportInfo};

    fn file(path: &str, imports: &[&str]) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            module_name: codegraph_core::module_name_of(path),
            imports: imports
                .iter()
                .map(|m| ImportInfo {
                    module_name: (*m).into(),
                    is_testable: false,
                    line: 1,
                })
                .collect(),
            is_entry_point: false,
        }
    }

    #[test]
    fn two_file_cycle_is_detected() {
        let mut ir = Ir::default();
        ir.files.push(file("A.swift", &["B"]));
        ir.files.push(file("B.swift", &["A"]));

        let graph = FileDependencyGraph::build(&ir);
        let cycles = graph.find_cycles();

        assert_eq!(cycles.len(), 1);
        let cycle = &cycles[0];
        assert_eq!(cycle.first(), cycle.last());
        assert!(cycle.contains(&"A.swift".to_string()));
        assert!(cycle.contains(&"B.swift".to_string()));
    }

    #[test]
    fn unresolved_imports_do_not_create_cycles_or_depth() {
        let mut ir = Ir::default();
        ir.files.push(file("A.swift", &["Foundation"]));

        let graph = FileDependencyGraph::build(&ir);
        assert!(graph.find_cycles().is_empty());
        assert_eq!(graph.depth("A.swift"), 0);
    }

    #[test]
    fn blast_radius_counts_transitive_dependents() {
        let mut ir = Ir::default();
        ir.files.push(file("A.swift", &[]));
        ir.files.push(file("B.swift", &["A"]));
        ir.files.push(file("C.swift", &["B"]));

        let graph = FileDependencyGraph::build(&ir);
        let dependents = graph.transitive_dependents("A.swift");
        assert_eq!(dependents.len(), 2);
        assert!(dependents.contains("B.swift"));
        assert!(dependents.contains("C.swift"));
    }

    #[test]
    fn last_file_wins_on_module_name_collision() {
        let mut ir = Ir::default();
        ir.files.push(file("lib/Util.swift", &[]));
        ir.files.push(file("src/Util.swift", &[]));

        let graph = FileDependencyGraph::build(&ir);
        // sorted by path: "lib/Util.swift" < "src/Util.swift", so the
        // latter wins the module-name registration.
        assert_eq!(graph.resolve_module("Util"), Some("src/Util.swift"));
    }
}
