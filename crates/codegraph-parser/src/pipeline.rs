use codegraph_core::{Finding, ParsedFile, Severity, SourceParser};
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Result of parsing a batch of files: the successfully parsed files, plus
/// a `parse-error` finding for every file that failed to read or parse.
pub struct ParseOutcome {
    pub parsed_files: Vec<ParsedFile>,
    pub findings: Vec<Finding>,
}

/// Parses every path with `parser`. Each file's parse is an independent,
/// pure function of its bytes, so this runs across rayon's worker pool;
/// results are resorted by path afterward so ID assignment downstream is
/// deterministic regardless of completion order.
pub fn parse_all(parser: &dyn SourceParser, paths: &[PathBuf]) -> ParseOutcome {
    let mut outcomes: Vec<(PathBuf, Result<ParsedFile, Finding>)> = paths
        .par_iter()
        .map(|path| (path.clone(), parse_one(parser, path)))
        .collect();

    outcomes.sort_by(|a, b| a.0.cmp(&b.0));

    let mut parsed_files = Vec::with_capacity(outcomes.len());
    let mut findings = Vec::new();
    for (_, outcome) in outcomes {
        match outcome {
            Ok(parsed) => parsed_files.push(parsed),
            Err(finding) => findings.push(finding),
        }
    }

    ParseOutcome {
        parsed_files,
        findings,
    }
}

fn parse_one(parser: &dyn SourceParser, path: &PathBuf) -> Result<ParsedFile, Finding> {
    let source = fs::read_to_string(path).map_err(|err| {
        warn!(file = %path.display(), error = %err, "failed to read file, skipping");
        Finding::new(
            "parse-error",
            Severity::Warning,
            format!("could not read {}: {err}", path.display()),
        )
        .with_file(path.display().to_string())
    })?;

    parser.parse(path, &source).map_err(|err| {
        warn!(file = %path.display(), error = %err, "failed to parse file, skipping");
        Finding::new(
            "parse-error",
            Severity::Warning,
            format!("could not parse {}: {err}", path.display()),
        )
        .with_file(path.display().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegraph_core::CodeGraphError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    struct FailingParser;
    impl SourceParser for FailingParser {
        fn parse(&self, path: &Path, _source: &str) -> codegraph_core::Result<ParsedFile> {
            Err(CodeGraphError::Parse {
                file: path.display().to_string(),
                reason: "always fails".into(),
            })
        }
        fn file_extensions(&self) -> &[&str] {
            &["swift"]
        }
    }

    #[test]
    fn parse_errors_become_findings_without_aborting_the_batch() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("A.swift");
        let b = dir.path().join("B.swift");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();

        let outcome = parse_all(&FailingParser, &[a, b]);
        assert!(outcome.parsed_files.is_empty());
        assert_eq!(outcome.findings.len(), 2);
        assert!(outcome.findings.iter().all(|f| f.name == "parse-error"));
    }
}
