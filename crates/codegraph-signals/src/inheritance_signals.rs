use crate::thresholds::Thresholds;
use codegraph_core::{DeclKind, Finding, Severity};
use codegraph_graph::InheritanceGraph;

pub fn detect(inheritance: &InheritanceGraph, thresholds: &Thresholds) -> Vec<Finding> {
    let mut findings = Vec::new();

    for node in inheritance.nodes() {
        let depth = inheritance.depth(&node.name);
        if depth < thresholds.deep_hierarchy_warning {
            continue;
        }
        let severity = if depth >= thresholds.deep_hierarchy_error {
            Severity::Error
        } else {
            Severity::Warning
        };
        findings.push(
            Finding::new(
                "deep-hierarchy",
                severity,
                format!("{} has inheritance depth {depth}", node.name),
            )
            .with_file(node.file_path.clone()),
        );
    }

    for node in inheritance.nodes() {
        if node.kind != DeclKind::Protocol {
            continue;
        }
        let conformers = inheritance.conformer_count(&node.name);
        if conformers < thresholds.wide_protocol_warning {
            continue;
        }
        let severity = if conformers >= thresholds.wide_protocol_error {
            Severity::Error
        } else {
            Severity::Warning
        };
        findings.push(
            Finding::new(
                "wide-protocol",
                severity,
                format!("{} has {conformers} conformers", node.name),
            )
            .with_file(node.file_path.clone()),
        );
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::{make_id, Accessibility, Ir, TypeDeclaration};

    fn decl(name: &str, kind: DeclKind, inherited: &[&str]) -> TypeDeclaration {
        TypeDeclaration {
            id: make_id("A.swift", name, 0),
            name: name.into(),
            kind,
            file_path: "A.swift".into(),
            inherited_types: inherited.iter().map(|s| s.to_string()).collect(),
            accessibility: Accessibility::Internal,
            line: 1,
            end_line: 10,
            attributes: vec![],
            generic_parameters: vec![],
        }
    }

    #[test]
    fn deep_chain_crosses_warning_then_error() {
        let mut ir = Ir::default();
        ir.type_declarations.push(decl("P", DeclKind::Protocol, &[]));
        ir.type_declarations.push(decl("C1", DeclKind::Class, &["P"]));
        ir.type_declarations.push(decl("C2", DeclKind::Class, &["C1"]));
        ir.type_declarations.push(decl("C3", DeclKind::Class, &["C2"]));
        ir.type_declarations.push(decl("C4", DeclKind::Class, &["C3"]));

        let graph = InheritanceGraph::build(&ir);
        let findings = detect(&graph, &Thresholds::default());

        let c3 = findings.iter().find(|f| f.message.contains("C3")).unwrap();
        assert_eq!(c3.severity, Severity::Warning);
        let c4 = findings.iter().find(|f| f.message.contains("C4")).unwrap();
        assert_eq!(c4.severity, Severity::Warning);
        assert!(findings.iter().all(|f| f.severity != Severity::Error));
    }

    #[test]
    fn wide_protocol_counts_direct_conformers_only() {
        let mut ir = Ir::default();
        ir.type_declarations
            .push(decl("Drawable", DeclKind::Protocol, &[]));
        for i in 0..5 {
            ir.type_declarations
                .push(decl(&format!("Shape{i}"), DeclKind::Struct, &["Drawable"]));
        }

        let graph = InheritanceGraph::build(&ir);
        let findings = detect(&graph, &Thresholds::default());
        let wide = findings.iter().find(|f| f.name == "wide-protocol").unwrap();
        assert_eq!(wide.severity, Severity::Warning);
    }
}
