use crate::shared::SharedStr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, deterministic identifier of the form `<file-path>:<name>:<ordinal-in-file>`.
/// Stable within a single analysis run; has no meaning across runs.
pub type Id = String;

pub fn make_id(file_path: &str, name: &str, ordinal: usize) -> Id {
    format!("{file_path}:{name}:{ordinal}")
}

/// Base file name with its extension removed; the identifier used to match
/// an import clause to a file.
pub fn module_name_of(path: &str) -> SharedStr {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    SharedStr::from(stem)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Struct,
    Class,
    Enum,
    Protocol,
    Actor,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeclKind::Struct => "struct",
            DeclKind::Class => "class",
            DeclKind::Enum => "enum",
            DeclKind::Protocol => "protocol",
            DeclKind::Actor => "actor",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    Public,
    Internal,
    Private,
    Fileprivate,
    Open,
    Package,
}

impl Default for Accessibility {
    fn default() -> Self {
        Accessibility::Internal
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Private => "private",
            Accessibility::Fileprivate => "fileprivate",
            Accessibility::Open => "open",
            Accessibility::Package => "package",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportInfo {
    pub module_name: SharedStr,
    pub is_testable: bool,
    pub line: u32,
}

/// One file in the analyzed input set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub module_name: SharedStr,
    pub imports: Vec<ImportInfo>,
    pub is_entry_point: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub label: Option<String>,
    pub name: String,
    pub type_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub id: Id,
    pub name: SharedStr,
    pub kind: DeclKind,
    pub file_path: String,
    pub inherited_types: Vec<String>,
    pub accessibility: Accessibility,
    pub line: u32,
    pub end_line: u32,
    pub attributes: Vec<String>,
    pub generic_parameters: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub id: Id,
    pub name: SharedStr,
    pub signature: String,
    pub file_path: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_async: bool,
    pub is_throws: bool,
    pub is_mutating: bool,
    pub line: u32,
    pub end_line: u32,
    pub containing_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSite {
    pub id: Id,
    pub called_name: SharedStr,
    pub file_path: String,
    pub line: u32,
    pub containing_function: Option<String>,
}

/// Immutable intermediate representation produced by the IR builder.
/// Consumed read-only by graph construction, the signal engine and the
/// validator for the lifetime of one analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ir {
    pub files: Vec<FileRecord>,
    pub type_declarations: Vec<TypeDeclaration>,
    pub function_declarations: Vec<FunctionDeclaration>,
    pub call_sites: Vec<CallSite>,
}

/// Severity ordering is most-to-least urgent so a stable sort surfaces
/// errors first in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(s)
    }
}

/// One reported observation. `name` identifies the signal or validator rule
/// that produced it (e.g. `dead-file`, `parse-error`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub name: String,
    pub severity: Severity,
    pub message: String,
    pub file: Option<String>,
}

impl Finding {
    pub fn new(name: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            severity,
            message: message.into(),
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Sorts findings by severity, then name, then file, so reports are
/// byte-identical across runs on the same input.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.file.cmp(&b.file))
    });
}

impl Ir {
    pub fn file(&self, path: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn functions_in_file<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FunctionDeclaration> {
        self.function_declarations.iter().filter(move |f| f.file_path == path)
    }

    pub fn types_in_file<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a TypeDeclaration> {
        self.type_declarations.iter().filter(move |t| t.file_path == path)
    }
}
