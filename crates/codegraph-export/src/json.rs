use codegraph_analyze::AnalysisResult;
use codegraph_core::Result;
use serde_json::{json, to_string_pretty, Value};

/// Renders an analysis result as the fixed JSON shape: `files`, `types`,
/// `functions`, `graphs.{fileDependency,inheritance,callGraph}`, `signals`,
/// `summary`. `serde_json::Map` is backed by a `BTreeMap` (the
/// `preserve_order` feature is not enabled), so object keys come out sorted
/// without any extra work here, and `to_string_pretty` gives the two-space
/// indent.
pub fn to_json(result: &AnalysisResult) -> Result<String> {
    let value = to_value(result);
    to_string_pretty(&value).map_err(Into::into)
}

fn to_value(result: &AnalysisResult) -> Value {
    let files = json!(result.ir.files);
    let types = json!(result.ir.type_declarations);
    let functions = json!(result.ir.function_declarations);

    let file_dependency = json!({
        "nodes": result.graphs.files.nodes(),
        "edges": result.graphs.files.edges(),
    });
    let inheritance = json!({
        "nodes": result.graphs.inheritance.nodes(),
        "edges": result.graphs.inheritance.edges(),
    });
    let call_graph = json!({
        "nodes": result.graphs.calls.nodes(),
        "edges": result.graphs.calls.edges(),
    });

    let mut signals = result.findings.clone();
    if let Some(validation) = &result.validation {
        signals.extend(validation.iter().cloned());
        codegraph_core::sort_findings(&mut signals);
    }

    json!({
        "files": files,
        "types": types,
        "functions": functions,
        "graphs": {
            "fileDependency": file_dependency,
            "inheritance": inheritance,
            "callGraph": call_graph,
        },
        "signals": signals,
        "summary": result.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_analyze::analyze;
    use codegraph_core::{ParsedFile, RawTypeFact, DeclKind, Accessibility};

    fn sample_result() -> AnalysisResult {
        let mut file = ParsedFile::empty("A.swift".to_string());
        file.types.push(RawTypeFact {
            name: "A".into(),
            kind: DeclKind::Struct,
            inherited_types: vec![],
            accessibility: Accessibility::Internal,
            line: 1,
            end_line: 3,
            attributes: vec![],
            generic_parameters: vec![],
        });
        analyze(vec![file], false)
    }

    #[test]
    fn top_level_keys_are_sorted_alphabetically() {
        let result = sample_result();
        let rendered = to_json(&result).unwrap();
        let files_pos = rendered.find("\"files\"").unwrap();
        let functions_pos = rendered.find("\"functions\"").unwrap();
        let graphs_pos = rendered.find("\"graphs\"").unwrap();
        let signals_pos = rendered.find("\"signals\"").unwrap();
        let summary_pos = rendered.find("\"summary\"").unwrap();
        let types_pos = rendered.find("\"types\"").unwrap();
        assert!(files_pos < functions_pos);
        assert!(functions_pos < graphs_pos);
        assert!(graphs_pos < signals_pos);
        assert!(signals_pos < summary_pos);
        assert!(summary_pos < types_pos);
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let result = sample_result();
        assert_eq!(to_json(&result).unwrap(), to_json(&result).unwrap());
    }
}
