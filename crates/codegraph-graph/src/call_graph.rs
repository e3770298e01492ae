use codegraph_core::Ir;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionNode {
    pub id: String,
    pub name: String,
    pub file_path: String,
    pub containing_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallEdge {
    pub caller: Option<String>,
    pub callee: String,
    pub is_internal: bool,
}

/// Call graph. A call site is internal iff its called name
/// matches some declared function's name exactly; no overload or argument
/// matching is attempted.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    nodes: Vec<FunctionNode>,
    edges: Vec<CallEdge>,
}

impl CallGraph {
    pub fn build(ir: &Ir) -> Self {
        let declared: HashSet<&str> = ir
            .function_declarations
            .iter()
            .map(|f| f.name.as_str())
            .collect();

        let nodes = ir
            .function_declarations
            .iter()
            .map(|f| FunctionNode {
                id: f.id.clone(),
                name: f.name.to_string(),
                file_path: f.file_path.clone(),
                containing_type: f.containing_type.clone(),
            })
            .collect();

        let edges = ir
            .call_sites
            .iter()
            .map(|c| CallEdge {
                caller: c.containing_function.clone(),
                callee: c.called_name.to_string(),
                is_internal: declared.contains(c.called_name.as_str()),
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[FunctionNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[CallEdge] {
        &self.edges
    }

    /// Functions with internal in-degree at or above `threshold`, sorted by
    /// descending call count then name for determinism.
    pub fn find_hot_functions(&self, threshold: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for edge in &self.edges {
            if edge.is_internal {
                *counts.entry(edge.callee.as_str()).or_insert(0) += 1;
            }
        }

        let mut hot: Vec<(String, usize)> = counts
            .into_iter()
            .filter(|(_, count)| *count >= threshold)
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        hot.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        hot
    }

    /// Declared functions never reached by an internal call site.
    pub fn find_unused_functions(&self) -> Vec<&FunctionNode> {
        let called: HashSet<&str> = self
            .edges
            .iter()
            .filter(|e| e.is_internal)
            .map(|e| e.callee.as_str())
            .collect();

        self.nodes
            .iter()
            .filter(|n| !called.contains(n.name.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::{make_id, Accessibility, CallSite, FunctionDeclaration};

    fn func(name: &str) -> FunctionDeclaration {
        FunctionDeclaration {
            id: make_id("A.swift", name, 0),
            name: name.into(),
            signature: format!("func {name}()"),
            file_path: "A.swift".into(),
            parameters: vec![],
            return_type: None,
            accessibility: Accessibility::Internal,
            is_static: false,
            is_async: false,
            is_throws: false,
            is_mutating: false,
            line: 1,
            end_line: 3,
            containing_type: None,
        }
    }

    fn call(callee: &str, caller: Option<&str>) -> CallSite {
        CallSite {
            id: make_id("A.swift", callee, 0),
            called_name: callee.into(),
            file_path: "A.swift".into(),
            line: 2,
            containing_function: caller.map(str::to_string),
        }
    }

    #[test]
    fn hot_functions_meet_threshold_and_sort_descending() {
        let mut ir = Ir::default();
        ir.function_declarations.push(func("helper"));
        ir.function_declarations.push(func("run"));
        ir.call_sites.push(call("helper", Some("run")));
        ir.call_sites.push(call("helper", Some("run")));
        ir.call_sites.push(call("helper", Some("run")));

        let graph = CallGraph::build(&ir);
        let hot = graph.find_hot_functions(3);
        assert_eq!(hot, vec![("helper".to_string(), 3)]);
        assert!(graph.find_hot_functions(4).is_empty());
    }

    #[test]
    fn unused_functions_exclude_only_called_names() {
        let mut ir = Ir::default();
        ir.function_declarations.push(func("main"));
        ir.function_declarations.push(func("used"));
        ir.function_declarations.push(func("dead"));
        ir.call_sites.push(call("used", Some("main")));

        let graph = CallGraph::build(&ir);
        let unused: Vec<&str> = graph
            .find_unused_functions()
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(unused, vec!["main", "dead"]);
    }

    #[test]
    fn external_calls_are_not_internal() {
        let mut ir = Ir::default();
        ir.function_declarations.push(func("run"));
        ir.call_sites.push(call("print", Some("run")));

        let graph = CallGraph::build(&ir);
        assert!(graph.edges()[0].is_internal == false);
        assert!(graph.find_hot_functions(1).is_empty());
    }
}
