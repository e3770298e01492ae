use codegraph_core::{Finding, Ir, Severity};
use std::collections::HashSet;

/// Referential-integrity checks over the IR, run only on request. Distinct
/// from signal findings: these report construction defects, not
/// architecture observations.
pub fn validate(ir: &Ir) -> Vec<Finding> {
    let mut findings = Vec::new();
    let known_files: HashSet<&str> = ir.files.iter().map(|f| f.path.as_str()).collect();

    for t in &ir.type_declarations {
        if !known_files.contains(t.file_path.as_str()) {
            findings.push(dangling_file_reference(&t.id, &t.file_path));
        }
    }

    let function_names_by_file: std::collections::HashMap<&str, HashSet<&str>> = {
        let mut map: std::collections::HashMap<&str, HashSet<&str>> = std::collections::HashMap::new();
        for f in &ir.function_declarations {
            map.entry(f.file_path.as_str())
                .or_default()
                .insert(f.name.as_str());
        }
        map
    };

    for f in &ir.function_declarations {
        if !known_files.contains(f.file_path.as_str()) {
            findings.push(dangling_file_reference(&f.id, &f.file_path));
        }
    }

    for c in &ir.call_sites {
        let Some(caller) = &c.containing_function else {
            continue; // top-level calls are legitimate
        };
        let resolves = function_names_by_file
            .get(c.file_path.as_str())
            .is_some_and(|names| names.contains(caller.as_str()));
        if !resolves {
            findings.push(
                Finding::new(
                    "unresolved-containing-function",
                    Severity::Warning,
                    format!("call site {} references unknown containing function {caller}", c.id),
                )
                .with_file(c.file_path.clone()),
            );
        }
    }

    let mut seen_ids = HashSet::new();
    for id in ir
        .type_declarations
        .iter()
        .map(|t| &t.id)
        .chain(ir.function_declarations.iter().map(|f| &f.id))
        .chain(ir.call_sites.iter().map(|c| &c.id))
    {
        if !seen_ids.insert(id.as_str()) {
            findings.push(Finding::new(
                "duplicate-id",
                Severity::Error,
                format!("id {id} is assigned to more than one record"),
            ));
        }
    }

    findings
}

fn dangling_file_reference(id: &str, file_path: &str) -> Finding {
    Finding::new(
        "dangling-file-reference",
        Severity::Error,
        format!("{id} refers to file {file_path}, which is not in the file list"),
    )
    .with_file(file_path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::{make_id, Accessibility, CallSite, DeclKind, FunctionDeclaration, TypeDeclaration};

    #[test]
    fn flags_type_declaration_pointing_at_missing_file() {
        let mut ir = Ir::default();
        ir.type_declarations.push(TypeDeclaration {
            id: make_id("Ghost.swift", "X", 0),
            name: "X".into(),
            kind: DeclKind::Struct,
            file_path: "Ghost.swift".into(),
            inherited_types: vec![],
            accessibility: Accessibility::Internal,
            line: 1,
            end_line: 1,
            attributes: vec![],
            generic_parameters: vec![],
        });

        let findings = validate(&ir);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].name, "dangling-file-reference");
    }

    #[test]
    fn flags_call_site_with_unresolved_containing_function() {
        let mut ir = Ir::default();
        ir.files.push(codegraph_core::FileRecord {
            path: "A.swift".into(),
            module_name: "A".into(),
            imports: vec![],
            is_entry_point: false,
        });
        ir.call_sites.push(CallSite {
            id: make_id("A.swift", "helper", 0),
            called_name: "helper".into(),
            file_path: "A.swift".into(),
            line: 1,
            containing_function: Some("missing".into()),
        });

        let findings = validate(&ir);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].name, "unresolved-containing-function");
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn top_level_call_sites_are_not_flagged() {
        let mut ir = Ir::default();
        ir.files.push(codegraph_core::FileRecord {
            path: "A.swift".into(),
            module_name: "A".into(),
            imports: vec![],
            is_entry_point: false,
        });
        ir.call_sites.push(CallSite {
            id: make_id("A.swift", "helper", 0),
            called_name: "helper".into(),
            file_path: "A.swift".into(),
            line: 1,
            containing_function: None,
        });

        assert!(validate(&ir).is_empty());
    }

    #[test]
    fn duplicate_ids_are_flagged() {
        let mut ir = Ir::default();
        ir.files.push(codegraph_core::FileRecord {
            path: "A.swift".into(),
            module_name: "A".into(),
            imports: vec![],
            is_entry_point: false,
        });
        let decl = TypeDeclaration {
            id: "A.swift:X:0".into(),
            name: "X".into(),
            kind: DeclKind::Struct,
            file_path: "A.swift".into(),
            inherited_types: vec![],
            accessibility: Accessibility::Internal,
            line: 1,
            end_line: 1,
            attributes: vec![],
            generic_parameters: vec![],
        };
        ir.type_declarations.push(decl.clone());
        ir.function_declarations.push(FunctionDeclaration {
            id: "A.swift:X:0".into(),
            name: "X".into(),
            signature: "func X()".into(),
            file_path: "A.swift".into(),
            parameters: vec![],
            return_type: None,
            accessibility: Accessibility::Internal,
            is_static: false,
            is_async: false,
            is_throws: false,
            is_mutating: false,
            line: 1,
            end_line: 1,
            containing_type: None,
        });

        let findings = validate(&ir);
        assert!(findings.iter().any(|f| f.name == "duplicate-id"));
    }
}
