pub mod aggregator;
pub mod validator;

pub use aggregator::{AnalysisResult, Summary};

use codegraph_core::{sort_findings, ParsedFile};
use codegraph_graph::Graphs;
use codegraph_signals::Thresholds;
use tracing::info_span;

/// Runs the full pipeline with the named default thresholds: IR build,
/// graph build, signal detection, and (optionally) the referential-integrity
/// validator.
pub fn analyze(parsed_files: Vec<ParsedFile>, run_validator: bool) -> AnalysisResult {
    analyze_with_thresholds(parsed_files, run_validator, &Thresholds::default())
}

/// Runs the full pipeline against a loaded or overridden threshold set.
pub fn analyze_with_thresholds(
    parsed_files: Vec<ParsedFile>,
    run_validator: bool,
    thresholds: &Thresholds,
) -> AnalysisResult {
    let span = info_span!("analyze", files = parsed_files.len());
    let _guard = span.enter();

    let ir = codegraph_ir::build(parsed_files);
    let graphs = Graphs::build(&ir);
    let mut findings = codegraph_signals::run_with_thresholds(&ir, &graphs, thresholds);
    sort_findings(&mut findings);

    let summary = Summary::compute(&ir, &findings);
    let validation = if run_validator {
        let mut v = validator::validate(&ir);
        sort_findings(&mut v);
        Some(v)
    } else {
        None
    };

    AnalysisResult {
        ir,
        graphs,
        findings,
        summary,
        validation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::{RawTypeFact, Accessibility, DeclKind};

    #[test]
    fn single_empty_file_is_dead_with_no_other_signals() {
        let parsed = ParsedFile::empty("A.swift");
        let result = analyze(vec![parsed], false);

        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].name, "dead-file");
        assert!(result.validation.is_none());
    }

    #[test]
    fn validator_runs_only_when_requested() {
        let mut parsed = ParsedFile::empty("A.swift");
        parsed.types.push(RawTypeFact {
            name: "A".into(),
            kind: DeclKind::Struct,
            inherited_types: vec![],
            accessibility: Accessibility::Internal,
            line: 1,
            end_line: 1,
            attributes: vec![],
            generic_parameters: vec![],
        });

        let result = analyze(vec![parsed], true);
        assert!(result.validation.is_some());
        assert!(result.validation.unwrap().is_empty());
    }
}
