use codegraph_analyze::AnalysisResult;
use std::fmt::Write as _;

/// Renders the three graphs as Mermaid flowcharts: files and calls flow
/// left-to-right, inheritance flows bottom-to-top so subtypes sit above
/// their supertypes.
pub fn to_mermaid(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("flowchart LR\n");
    for node in result.graphs.files.nodes() {
        let _ = writeln!(out, "  {}[{:?}]", sanitize(&node.path), node.path);
    }
    for edge in result.graphs.files.edges() {
        let _ = writeln!(out, "  {} --> {}", sanitize(&edge.from), sanitize(&edge.to));
    }
    out.push('\n');

    out.push_str("flowchart BT\n");
    for node in result.graphs.inheritance.nodes() {
        let _ = writeln!(out, "  {}[{:?}]", sanitize(&node.id), node.name);
    }
    for edge in result.graphs.inheritance.edges() {
        let _ = writeln!(out, "  {} --> {}", sanitize(&edge.from), sanitize(&edge.to));
    }
    out.push('\n');

    out.push_str("flowchart LR\n");
    for node in result.graphs.calls.nodes() {
        let _ = writeln!(out, "  {}[{:?}]", sanitize(&node.id), node.name);
    }
    for edge in result.graphs.calls.edges() {
        let caller = edge.caller.as_deref().unwrap_or("top_level");
        let _ = writeln!(out, "  {} --> {}", sanitize(caller), sanitize(&edge.callee));
    }

    out
}

/// Mermaid node identifiers can't contain most punctuation. Replace the
/// characters that show up in our paths and names with underscores; fall
/// back to `unknown` if nothing survives.
fn sanitize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '-' | '.' | '/' | ' ' | '(' | ')' | ':' => '_',
            other => other,
        })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_analyze::analyze;
    use codegraph_core::ParsedFile;

    #[test]
    fn renders_three_flowchart_blocks() {
        let parsed = ParsedFile::empty("A.swift");
        let result = analyze(vec![parsed], false);
        let mermaid = to_mermaid(&result);
        assert_eq!(mermaid.matches("flowchart").count(), 3);
    }

    #[test]
    fn sanitize_replaces_path_punctuation() {
        assert_eq!(sanitize("Sources/App/Foo.swift"), "Sources_App_Foo_swift");
        assert_eq!(sanitize(""), "unknown");
    }
}
