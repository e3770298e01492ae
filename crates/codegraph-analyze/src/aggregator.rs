use codegraph_core::{Finding, Ir, Severity};
use codegraph_graph::Graphs;
use serde::Serialize;

/// Cached counts handed to exporters so they never need to recompute them
/// from the raw collections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub file_count: usize,
    pub type_count: usize,
    pub function_count: usize,
    pub call_site_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

impl Summary {
    pub fn compute(ir: &Ir, findings: &[Finding]) -> Self {
        let mut summary = Summary {
            file_count: ir.files.len(),
            type_count: ir.type_declarations.len(),
            function_count: ir.function_declarations.len(),
            call_site_count: ir.call_sites.len(),
            ..Default::default()
        };
        for finding in findings {
            match finding.severity {
                Severity::Error => summary.error_count += 1,
                Severity::Warning => summary.warning_count += 1,
                Severity::Info => summary.info_count += 1,
            }
        }
        summary
    }
}

/// The single handoff point to exporters: IR, the three graphs, the signal
/// list, cached counts, and (if requested) validator findings.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub ir: Ir,
    pub graphs: Graphs,
    pub findings: Vec<Finding>,
    pub summary: Summary,
    pub validation: Option<Vec<Finding>>,
}
