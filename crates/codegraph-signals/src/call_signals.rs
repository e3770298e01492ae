use crate::thresholds::{Thresholds, UNUSED_FUNCTION_IGNORE_NAMES, UNUSED_FUNCTION_IGNORE_PREFIXES};
use codegraph_core::{Finding, Severity};
use codegraph_graph::CallGraph;

pub fn detect(calls: &CallGraph, thresholds: &Thresholds) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (name, count) in calls.find_hot_functions(thresholds.hot_function_warning) {
        let severity = if count >= thresholds.hot_function_error {
            Severity::Error
        } else {
            Severity::Warning
        };
        let file = calls
            .nodes()
            .iter()
            .find(|n| n.name == name)
            .map(|n| n.file_path.clone());
        let mut finding = Finding::new(
            "hot-function",
            severity,
            format!("{name} is called internally {count} times"),
        );
        if let Some(file) = file {
            finding = finding.with_file(file);
        }
        findings.push(finding);
    }

    for node in calls.find_unused_functions() {
        if is_ignored(&node.name) {
            continue;
        }
        findings.push(
            Finding::new(
                "unused-function",
                Severity::Info,
                format!("{} is never called internally", node.name),
            )
            .with_file(node.file_path.clone()),
        );
    }

    findings
}

fn is_ignored(name: &str) -> bool {
    UNUSED_FUNCTION_IGNORE_NAMES.contains(&name)
        || UNUSED_FUNCTION_IGNORE_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}
