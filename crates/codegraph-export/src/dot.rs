use codegraph_analyze::AnalysisResult;
use std::fmt::Write as _;

/// Renders the three graphs as a single Graphviz digraph with one
/// `subgraph cluster_*` per graph. Edge solidity encodes `isInternal`:
/// solid for internal edges, dashed for edges that leave the analyzed set.
pub fn to_dot(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str("digraph codegraph {\n");
    out.push_str("  rankdir=LR;\n");

    write_file_cluster(&mut out, result);
    write_inheritance_cluster(&mut out, result);
    write_call_cluster(&mut out, result);

    out.push_str("}\n");
    out
}

fn write_file_cluster(out: &mut String, result: &AnalysisResult) {
    out.push_str("  subgraph cluster_files {\n");
    out.push_str("    label=\"files\";\n");
    for node in result.graphs.files.nodes() {
        let _ = writeln!(out, "    {:?};", node.path);
    }
    for edge in result.graphs.files.edges() {
        let style = if edge.resolved_path.is_some() { "solid" } else { "dashed" };
        let _ = writeln!(out, "    {:?} -> {:?} [style={style}];", edge.from, edge.to);
    }
    out.push_str("  }\n");
}

fn write_inheritance_cluster(out: &mut String, result: &AnalysisResult) {
    out.push_str("  subgraph cluster_inheritance {\n");
    out.push_str("    label=\"inheritance\";\n");
    for node in result.graphs.inheritance.nodes() {
        let _ = writeln!(out, "    {:?};", node.id);
    }
    for edge in result.graphs.inheritance.edges() {
        let style = if edge.is_internal { "solid" } else { "dashed" };
        let _ = writeln!(out, "    {:?} -> {:?} [style={style}];", edge.from, edge.to);
    }
    out.push_str("  }\n");
}

fn write_call_cluster(out: &mut String, result: &AnalysisResult) {
    out.push_str("  subgraph cluster_calls {\n");
    out.push_str("    label=\"calls\";\n");
    for node in result.graphs.calls.nodes() {
        let _ = writeln!(out, "    {:?};", node.id);
    }
    for edge in result.graphs.calls.edges() {
        let style = if edge.is_internal { "solid" } else { "dashed" };
        let caller = edge.caller.as_deref().unwrap_or("<top-level>");
        let _ = writeln!(out, "    {:?} -> {:?} [style={style}];", caller, edge.callee);
    }
    out.push_str("  }\n");
}
