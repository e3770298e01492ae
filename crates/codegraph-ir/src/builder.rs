use codegraph_core::{
    make_id, module_name_of, CallSite, FileRecord, FunctionDeclaration, ImportInfo, Ir,
    ParsedFile, TypeDeclaration,
};
use std::collections::HashSet;
use tracing::debug;

const ENTRY_POINT_ATTRIBUTE: &str = "main";

/// Lowers a batch of parsed files into one immutable [`Ir`].
///
/// Files are sorted by path before lowering so that the resulting IDs and
/// the later "last wins" module-name resolution in the graph builder are
/// deterministic regardless of the order the parser collaborator handed
/// files back in.
pub fn build(mut parsed_files: Vec<ParsedFile>) -> Ir {
    parsed_files.sort_by(|a, b| a.path.cmp(&b.path));

    let mut ir = Ir::default();

    for parsed in &parsed_files {
        lower_file(&mut ir, parsed);
    }

    ir
}

fn lower_file(ir: &mut Ir, parsed: &ParsedFile) {
    let module_name = module_name_of(&parsed.path);
    let is_entry_point = parsed.has_entry_point_attribute
        || parsed.types.iter().any(|t| {
            t.attributes
                .iter()
                .any(|a| a.eq_ignore_ascii_case(ENTRY_POINT_ATTRIBUTE))
        });

    let imports = parsed
        .imports
        .iter()
        .map(|i| ImportInfo {
            module_name: i.module_name.as_str().into(),
            is_testable: i.is_testable,
            line: i.line,
        })
        .collect();

    ir.files.push(FileRecord {
        path: parsed.path.clone(),
        module_name,
        imports,
        is_entry_point,
    });

    // Per-file scopes: a function's `containing_type` and a call site's
    // `containing_function` are only honored when they name a declaration
    // that actually exists in this file. This is the
    // IR builder's enforcement of the stack discipline the parser used
    // while walking the syntax tree.
    let type_names: HashSet<&str> = parsed.types.iter().map(|t| t.name.as_str()).collect();
    let function_names: HashSet<&str> = parsed.functions.iter().map(|f| f.name.as_str()).collect();

    for (ordinal, t) in parsed.types.iter().enumerate() {
        let line = t.line.max(1);
        ir.type_declarations.push(TypeDeclaration {
            id: make_id(&parsed.path, &t.name, ordinal),
            name: t.name.as_str().into(),
            kind: t.kind,
            file_path: parsed.path.clone(),
            inherited_types: t.inherited_types.clone(),
            accessibility: t.accessibility,
            line,
            end_line: t.end_line.max(line),
            attributes: t.attributes.clone(),
            generic_parameters: t.generic_parameters.clone(),
        });
    }

    for (ordinal, f) in parsed.functions.iter().enumerate() {
        let line = f.line.max(1);
        let containing_type = f
            .containing_type
            .as_deref()
            .filter(|name| type_names.contains(name))
            .map(str::to_owned);

        ir.function_declarations.push(FunctionDeclaration {
            id: make_id(&parsed.path, &f.name, ordinal),
            name: f.name.as_str().into(),
            signature: f.signature.clone(),
            file_path: parsed.path.clone(),
            parameters: f.parameters.clone(),
            return_type: f.return_type.clone(),
            accessibility: f.accessibility,
            is_static: f.is_static,
            is_async: f.is_async,
            is_throws: f.is_throws,
            is_mutating: f.is_mutating,
            line,
            end_line: f.end_line.max(line),
            containing_type,
        });
    }

    for (ordinal, c) in parsed.call_sites.iter().enumerate() {
        let containing_function = c
            .containing_function_name
            .as_deref()
            .filter(|name| function_names.contains(name))
            .map(str::to_owned);

        ir.call_sites.push(CallSite {
            id: make_id(&parsed.path, &c.called_name, ordinal),
            called_name: c.called_name.as_str().into(),
            file_path: parsed.path.clone(),
            line: c.line.max(1),
            containing_function,
        });
    }

    debug!(
        file = %parsed.path,
        types = parsed.types.len(),
        functions = parsed.functions.len(),
        calls = parsed.call_sites.len(),
        "lowered file into IR"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::{
        Accessibility, DeclKind, RawCallSite, RawFunctionFact, RawImport, RawTypeFact,
    };

    fn type_fact(name: &str, line: u32, end_line: u32) -> RawTypeFact {
        RawTypeFact {
            name: name.to_string(),
            kind: DeclKind::Class,
            inherited_types: vec![],
            accessibility: Accessibility::Internal,
            line,
            end_line,
            attributes: vec![],
            generic_parameters: vec![],
        }
    }

    fn function_fact(name: &str, line: u32, end_line: u32, containing_type: Option<&str>) -> RawFunctionFact {
        RawFunctionFact {
            name: name.to_string(),
            signature: format!("func {name}()"),
            parameters: vec![],
            return_type: None,
            accessibility: Accessibility::Internal,
            is_static: false,
            is_async: false,
            is_throws: false,
            is_mutating: false,
            line,
            end_line,
            containing_type: containing_type.map(str::to_string),
        }
    }

    #[test]
    fn ids_are_stable_across_rebuilds() {
        let mut parsed = ParsedFile::empty("A.swift");
        parsed.types.push(type_fact("A", 1, 10));
        parsed.functions.push(function_fact("run", 2, 4, Some("A")));

        let ir_one = build(vec![parsed.clone()]);
        let ir_two = build(vec![parsed]);

        assert_eq!(ir_one.type_declarations[0].id, ir_two.type_declarations[0].id);
        assert_eq!(
            ir_one.function_declarations[0].id,
            ir_two.function_declarations[0].id
        );
    }

    #[test]
    fn invalid_containing_references_are_cleared() {
        let mut parsed = ParsedFile::empty("A.swift");
        parsed
            .functions
            .push(function_fact("run", 2, 4, Some("Ghost")));
        parsed.call_sites.push(RawCallSite {
            called_name: "helper".into(),
            line: 3,
            containing_function_name: Some("missing".into()),
        });

        let ir = build(vec![parsed]);

        assert_eq!(ir.function_declarations[0].containing_type, None);
        assert_eq!(ir.call_sites[0].containing_function, None);
    }

    #[test]
    fn entry_point_is_detected_from_attributes() {
        let mut t = type_fact("App", 1, 20);
        t.attributes.push("main".to_string());
        let mut parsed = ParsedFile::empty("App.swift");
        parsed.types.push(t);

        let ir = build(vec![parsed]);
        assert!(ir.files[0].is_entry_point);
    }

    #[test]
    fn files_are_sorted_by_path_for_determinism() {
        let b = ParsedFile::empty("B.swift");
        let a = ParsedFile::empty("A.swift");
        let ir = build(vec![b, a]);
        assert_eq!(ir.files[0].path, "A.swift");
        assert_eq!(ir.files[1].path, "B.swift");
    }

    #[test]
    fn imports_are_preserved_in_order() {
        let mut parsed = ParsedFile::empty("A.swift");
        parsed.imports.push(RawImport {
            module_name: "B".into(),
            is_testable: false,
            line: 1,
        });
        parsed.imports.push(RawImport {
            module_name: "C".into(),
            is_testable: true,
            line: 2,
        });
        let ir = build(vec![parsed]);
        assert_eq!(ir.files[0].imports.len(), 2);
        assert_eq!(ir.files[0].imports[1].module_name.as_str(), "C");
        assert!(ir.files[0].imports[1].is_testable);
    }
}
