//! Contract for the parser collaborator. The lexical parser of
//! the target language is out of scope for the analysis core; this module
//! only pins down the shape of the facts it must hand to the IR builder.

use crate::{Accessibility, DeclKind, Parameter};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    pub module_name: String,
    pub is_testable: bool,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct RawTypeFact {
    pub name: String,
    pub kind: DeclKind,
    pub inherited_types: Vec<String>,
    pub accessibility: Accessibility,
    pub line: u32,
    pub end_line: u32,
    pub attributes: Vec<String>,
    pub generic_parameters: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RawFunctionFact {
    pub name: String,
    pub signature: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_async: bool,
    pub is_throws: bool,
    pub is_mutating: bool,
    pub line: u32,
    pub end_line: u32,
    /// Name of the nearest enclosing type, tracked by the parser's type
    /// stack while it walks the syntax tree. The IR builder re-validates
    /// this against the file's declared types rather than trusting it
    /// blindly.
    pub containing_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RawCallSite {
    pub called_name: String,
    pub line: u32,
    /// Hint from the walker about the nearest enclosing function, if any.
    /// The IR builder recomputes and is the final authority (see
    /// `codegraph_ir::build`); this is carried through only when the two
    /// agree, which is the common case for well-formed source.
    pub containing_function_name: Option<String>,
}

/// Everything the parser collaborator yields for a single file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: String,
    pub imports: Vec<RawImport>,
    pub types: Vec<RawTypeFact>,
    pub functions: Vec<RawFunctionFact>,
    pub call_sites: Vec<RawCallSite>,
    pub has_entry_point_attribute: bool,
}

impl ParsedFile {
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            imports: Vec::new(),
            types: Vec::new(),
            functions: Vec::new(),
            call_sites: Vec::new(),
            has_entry_point_attribute: false,
        }
    }
}

/// A thin collaborator that turns one source file's bytes into the raw facts
/// above. Parsing a file is a pure function of its bytes, so implementations
/// are free to run across a worker pool, provided the caller preserves
/// deterministic ordering by input path.
pub trait SourceParser: Send + Sync {
    fn parse(&self, path: &Path, source: &str) -> crate::Result<ParsedFile>;

    /// File extensions (without the leading dot) this parser claims.
    fn file_extensions(&self) -> &[&str];
}
