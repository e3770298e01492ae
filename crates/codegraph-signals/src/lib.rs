pub mod call_signals;
pub mod config;
pub mod file_signals;
pub mod inheritance_signals;
pub mod thresholds;

pub use config::load_from_dir;
pub use thresholds::Thresholds;

use codegraph_core::{sort_findings, Finding, Ir};
use codegraph_graph::Graphs;
use tracing::debug;

/// Runs the full signal catalog with the named default thresholds.
pub fn run(ir: &Ir, graphs: &Graphs) -> Vec<Finding> {
    run_with_thresholds(ir, graphs, &Thresholds::default())
}

/// Runs the full signal catalog against a loaded or overridden threshold
/// set, returning findings sorted by severity, then name, then file.
pub fn run_with_thresholds(ir: &Ir, graphs: &Graphs, thresholds: &Thresholds) -> Vec<Finding> {
    let mut findings = Vec::new();
    findings.extend(file_signals::detect(ir, &graphs.files, thresholds));
    findings.extend(inheritance_signals::detect(&graphs.inheritance, thresholds));
    findings.extend(call_signals::detect(&graphs.calls, thresholds));

    sort_findings(&mut findings);
    debug!(count = findings.len(), "signal engine produced findings");
    findings
}
