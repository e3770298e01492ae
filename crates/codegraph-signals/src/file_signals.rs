use crate::thresholds::Thresholds;
use codegraph_core::{DeclKind, Finding, Ir, Severity};
use codegraph_graph::FileDependencyGraph;

pub fn detect(ir: &Ir, files: &FileDependencyGraph, thresholds: &Thresholds) -> Vec<Finding> {
    let mut findings = Vec::new();

    for node in files.nodes() {
        let in_degree = files.in_degree(&node.path);
        let out_degree = files.out_degree(&node.path);

        detect_dead_file(&mut findings, &node.path, in_degree, out_degree);
        detect_blast_radius(&mut findings, files, &node.path, thresholds);
        detect_central_file(&mut findings, &node.path, in_degree, thresholds);
        detect_god_file(&mut findings, &node.path, out_degree, thresholds);
        detect_deep_chain(&mut findings, files, &node.path, thresholds);
        detect_high_instability(
            &mut findings,
            &node.path,
            node.is_entry_point,
            in_degree,
            out_degree,
            thresholds,
        );
        detect_low_abstractness(&mut findings, ir, &node.path, in_degree, thresholds);
        detect_distance_from_main_sequence(
            &mut findings,
            ir,
            &node.path,
            in_degree,
            out_degree,
            thresholds,
        );
    }

    for cycle in files.find_cycles() {
        findings.push(circular_dependency_finding(&cycle));
    }

    findings
}

fn detect_dead_file(findings: &mut Vec<Finding>, path: &str, in_degree: usize, out_degree: usize) {
    if in_degree > 0 {
        return;
    }
    let severity = if out_degree > 0 {
        Severity::Warning
    } else {
        Severity::Info
    };
    findings.push(
        Finding::new(
            "dead-file",
            severity,
            format!("{path} is never imported by another file"),
        )
        .with_file(path),
    );
}

fn circular_dependency_finding(cycle: &[String]) -> Finding {
    let route = cycle.join(" \u{2192} ");
    Finding::new(
        "circular-dependency",
        Severity::Error,
        format!("import cycle: {route}"),
    )
    .with_file(cycle[0].clone())
}

fn detect_blast_radius(
    findings: &mut Vec<Finding>,
    files: &FileDependencyGraph,
    path: &str,
    thresholds: &Thresholds,
) {
    let count = files.transitive_dependents(path).len();
    if count < thresholds.blast_radius_warning {
        return;
    }
    let severity = if count >= thresholds.blast_radius_error {
        Severity::Error
    } else {
        Severity::Warning
    };
    findings.push(
        Finding::new(
            "blast-radius",
            severity,
            format!("{count} files transitively depend on {path}"),
        )
        .with_file(path),
    );
}

fn detect_central_file(
    findings: &mut Vec<Finding>,
    path: &str,
    in_degree: usize,
    thresholds: &Thresholds,
) {
    if in_degree < thresholds.central_file_warning {
        return;
    }
    let severity = if in_degree >= thresholds.central_file_error {
        Severity::Error
    } else {
        Severity::Warning
    };
    findings.push(
        Finding::new(
            "central-file",
            severity,
            format!("{path} is imported by {in_degree} files"),
        )
        .with_file(path),
    );
}

fn detect_god_file(
    findings: &mut Vec<Finding>,
    path: &str,
    out_degree: usize,
    thresholds: &Thresholds,
) {
    if out_degree < thresholds.god_file_warning {
        return;
    }
    let severity = if out_degree >= thresholds.god_file_error {
        Severity::Error
    } else {
        Severity::Warning
    };
    findings.push(
        Finding::new(
            "god-file",
            severity,
            format!("{path} imports {out_degree} distinct modules"),
        )
        .with_file(path),
    );
}

fn detect_deep_chain(
    findings: &mut Vec<Finding>,
    files: &FileDependencyGraph,
    path: &str,
    thresholds: &Thresholds,
) {
    let depth = files.depth(path);
    if depth < thresholds.deep_chain_warning {
        return;
    }
    let severity = if depth >= thresholds.deep_chain_error {
        Severity::Error
    } else {
        Severity::Warning
    };
    findings.push(
        Finding::new(
            "deep-chain",
            severity,
            format!("{path} has a forward dependency depth of {depth}"),
        )
        .with_file(path),
    );
}

fn detect_high_instability(
    findings: &mut Vec<Finding>,
    path: &str,
    is_entry_point: bool,
    in_degree: usize,
    out_degree: usize,
    thresholds: &Thresholds,
) {
    let total = in_degree + out_degree;
    if total < thresholds.high_instability_min_degree {
        return;
    }
    let instability = out_degree as f64 / total as f64;
    if instability < thresholds.high_instability_threshold {
        return;
    }
    let severity = if is_entry_point {
        Severity::Info
    } else {
        Severity::Warning
    };
    findings.push(
        Finding::new(
            "high-instability",
            severity,
            format!("{path} has Martin instability {instability:.2}"),
        )
        .with_file(path),
    );
}

fn detect_low_abstractness(
    findings: &mut Vec<Finding>,
    ir: &Ir,
    path: &str,
    in_degree: usize,
    thresholds: &Thresholds,
) {
    if in_degree < thresholds.low_abstractness_min_in_degree {
        return;
    }
    let abstractness = martin_abstractness(ir, path);
    if abstractness != 0.0 {
        return;
    }
    findings.push(
        Finding::new(
            "low-abstractness",
            Severity::Info,
            format!("{path} declares no protocols despite {in_degree} dependents"),
        )
        .with_file(path),
    );
}

fn detect_distance_from_main_sequence(
    findings: &mut Vec<Finding>,
    ir: &Ir,
    path: &str,
    in_degree: usize,
    out_degree: usize,
    thresholds: &Thresholds,
) {
    let total = in_degree + out_degree;
    if total == 0 {
        // Instability is undefined with no dependency edges at all; there
        // is nothing to be far from the main sequence about.
        return;
    }
    let instability = out_degree as f64 / total as f64;
    let abstractness = martin_abstractness(ir, path);
    let balance = abstractness + instability - 1.0;
    let distance = balance.abs();
    if distance < thresholds.distance_from_main_sequence_threshold {
        return;
    }
    let (zone, severity) = if balance < 0.0 {
        ("zone of pain", Severity::Warning)
    } else {
        ("zone of uselessness", Severity::Info)
    };
    findings.push(
        Finding::new(
            "distance-from-main-sequence",
            severity,
            format!("{path} is in the {zone} (D = {distance:.2})"),
        )
        .with_file(path),
    );
}

fn martin_abstractness(ir: &Ir, path: &str) -> f64 {
    let types: Vec<_> = ir.types_in_file(path).collect();
    if types.is_empty() {
        return 0.0;
    }
    let protocols = types.iter().filter(|t| t.kind == DeclKind::Protocol).count();
    protocols as f64 / types.len() as f64
}
