use codegraph_core::{
    Accessibility, CodeGraphError, DeclKind, ParsedFile, Parameter, RawCallSite, RawFunctionFact,
    RawImport, RawTypeFact, Result, SourceParser,
};
use std::path::Path;
use tree_sitter::{Node, Parser, TreeCursor};

/// Parses Swift source into the raw facts the IR builder consumes. Grounded
/// in a single cursor-walk pass over the syntax tree: structural shape
/// (declarations, calls, imports) comes from node kinds, finer detail
/// (modifiers, async/throws, parameter lists) comes from scanning the
/// declaration's own source text, the same mix the cursor-walk extractors
/// in this codebase have always used.
pub struct SwiftParser;

impl SourceParser for SwiftParser {
    fn parse(&self, path: &Path, source: &str) -> Result<ParsedFile> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_swift::LANGUAGE.into())
            .map_err(|err| CodeGraphError::Parse {
                file: path.display().to_string(),
                reason: err.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or_else(|| CodeGraphError::Parse {
            file: path.display().to_string(),
            reason: "tree-sitter produced no tree".to_string(),
        })?;

        let path_string = path.display().to_string();
        let mut collector = Collector::new(source, &path_string);
        let mut cursor = tree.walk();
        collector.walk(&mut cursor, Scope::default());

        let mut parsed = collector.into_parsed_file();

        // A file literally named main.swift is the Swift toolchain's
        // implicit program entry, independent of any `@main` attribute.
        if path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.eq_ignore_ascii_case("main"))
        {
            parsed.has_entry_point_attribute = true;
        }

        Ok(parsed)
    }

    fn file_extensions(&self) -> &[&str] {
        &["swift"]
    }
}

#[derive(Default, Clone)]
struct Scope {
    current_type: Option<String>,
    current_function: Option<String>,
}

struct Collector<'a> {
    source: &'a str,
    path: &'a str,
    imports: Vec<RawImport>,
    types: Vec<RawTypeFact>,
    functions: Vec<RawFunctionFact>,
    call_sites: Vec<RawCallSite>,
    pending_attributes: Vec<String>,
}

impl<'a> Collector<'a> {
    fn new(source: &'a str, path: &'a str) -> Self {
        Self {
            source,
            path,
            imports: Vec::new(),
            types: Vec::new(),
            functions: Vec::new(),
            call_sites: Vec::new(),
            pending_attributes: Vec::new(),
        }
    }

    fn into_parsed_file(self) -> ParsedFile {
        ParsedFile {
            path: self.path.to_string(),
            imports: self.imports,
            types: self.types,
            functions: self.functions,
            call_sites: self.call_sites,
            has_entry_point_attribute: false,
        }
    }

    fn walk(&mut self, cursor: &mut TreeCursor, mut scope: Scope) {
        let node = cursor.node();

        match node.kind() {
            "import_declaration" => self.visit_import(&node),

            "class_declaration" | "struct_declaration" | "enum_declaration" | "actor_declaration" => {
                if let Some(name) = self.visit_type(&node, kind_for(node.kind())) {
                    scope.current_type = Some(name);
                }
            }

            "protocol_declaration" => {
                if let Some(name) = self.visit_type(&node, DeclKind::Protocol) {
                    scope.current_type = Some(name);
                }
            }

            "function_declaration" => {
                if let Some(name) = self.visit_function(&node, &scope, "func") {
                    scope.current_function = Some(name);
                }
            }

            "init_declaration" => {
                if let Some(name) = self.visit_function(&node, &scope, "init") {
                    scope.current_function = Some(name);
                }
            }

            "deinit_declaration" => {
                if let Some(name) = self.visit_function(&node, &scope, "deinit") {
                    scope.current_function = Some(name);
                }
            }

            "attribute" => {
                if let Some(name) = self.node_text(&node).strip_prefix('@') {
                    self.pending_attributes.push(name.to_string());
                }
            }

            "call_expression" => self.visit_call(&node, &scope),

            _ => {}
        }

        if cursor.goto_first_child() {
            loop {
                self.walk(cursor, scope.clone());
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }
    }

    fn visit_import(&mut self, node: &Node) {
        self.pending_attributes.clear();
        let text = self.node_text(node);
        let Some(rest) = text.trim_start().strip_prefix("import") else {
            return;
        };
        let mut module = rest.trim();
        for kind_keyword in ["class", "struct", "enum", "protocol", "func", "var", "let", "typealias"] {
            if let Some(stripped) = module.strip_prefix(kind_keyword) {
                module = stripped.trim_start();
                break;
            }
        }
        let module_name = module.trim().to_string();
        if module_name.is_empty() {
            return;
        }

        self.imports.push(RawImport {
            module_name,
            is_testable: text.contains("@testable"),
            line: start_line(node),
        });
    }

    fn visit_type(&mut self, node: &Node, kind: DeclKind) -> Option<String> {
        let name = self.child_text_by_field(node, "name")?;
        let text = self.node_text(node);

        let inherited_types = self
            .child_text_by_field(node, "inheritance")
            .map(|clause| split_top_level(&clause, ','))
            .unwrap_or_default();

        let generic_parameters = self
            .child_text_by_field(node, "type_parameters")
            .map(|raw| {
                split_top_level(raw.trim_start_matches('<').trim_end_matches('>'), ',')
                    .into_iter()
                    .map(|p| p.split(':').next().unwrap_or(&p).trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        self.types.push(RawTypeFact {
            name: name.clone(),
            kind,
            inherited_types,
            accessibility: accessibility_of(&text),
            line: start_line(node),
            end_line: end_line(node),
            attributes: self.pending_attributes.drain(..).collect(),
            generic_parameters,
        });

        Some(name)
    }

    fn visit_function(&mut self, node: &Node, scope: &Scope, fallback_name: &str) -> Option<String> {
        let name = self
            .child_text_by_field(node, "name")
            .unwrap_or_else(|| fallback_name.to_string());
        let text = self.node_text(node);

        let params_text = self
            .child_text_by_field(node, "parameters")
            .unwrap_or_default();
        let parameters = parse_parameters(&params_text);

        let after_params = text.find(')').map(|i| &text[i + 1..]).unwrap_or("");
        let is_async = after_params.split('{').next().unwrap_or("").contains("async");
        let is_throws = after_params
            .split('{')
            .next()
            .unwrap_or("")
            .contains("throws");
        let return_type = after_params
            .split("->")
            .nth(1)
            .map(|rest| {
                rest.split(|c| c == '{' || c == 'w')
                    .next()
                    .unwrap_or(rest)
                    .trim()
                    .to_string()
            })
            .filter(|s| !s.is_empty());

        let prefix = text.split("func").next().unwrap_or(&text).to_string();
        let is_static = prefix.contains("static") || prefix.contains("class ");
        let is_mutating = prefix.contains("mutating");

        let generics = self
            .child_text_by_field(node, "type_parameters")
            .unwrap_or_default();

        let signature = build_signature(&name, &generics, &params_text, is_async, is_throws, &return_type);

        self.functions.push(RawFunctionFact {
            name: name.clone(),
            signature,
            parameters,
            return_type,
            accessibility: accessibility_of(&text),
            is_static,
            is_async,
            is_throws,
            is_mutating,
            line: start_line(node),
            end_line: end_line(node),
            containing_type: scope.current_type.clone(),
        });

        Some(name)
    }

    fn visit_call(&mut self, node: &Node, scope: &Scope) {
        let Some(callee) = node.child_by_field_name("function") else {
            return;
        };
        let raw = self.node_text(&callee);
        let called_name = raw.rsplit('.').next().unwrap_or(&raw).trim().to_string();
        if called_name.is_empty() {
            return;
        }

        self.call_sites.push(RawCallSite {
            called_name,
            line: start_line(node),
            containing_function_name: scope.current_function.clone(),
        });
    }

    fn child_text_by_field(&self, node: &Node, field: &str) -> Option<String> {
        node.child_by_field_name(field).map(|child| self.node_text(&child))
    }

    fn node_text(&self, node: &Node) -> String {
        node.utf8_text(self.source.as_bytes()).unwrap_or("").to_string()
    }
}

fn kind_for(node_kind: &str) -> DeclKind {
    match node_kind {
        "class_declaration" => DeclKind::Class,
        "struct_declaration" => DeclKind::Struct,
        "enum_declaration" => DeclKind::Enum,
        "actor_declaration" => DeclKind::Actor,
        _ => DeclKind::Class,
    }
}

fn start_line(node: &Node) -> u32 {
    node.start_position().row as u32 + 1
}

fn end_line(node: &Node) -> u32 {
    node.end_position().row as u32 + 1
}

fn accessibility_of(declaration_text: &str) -> Accessibility {
    let head = declaration_text
        .split(['{', '('])
        .next()
        .unwrap_or(declaration_text);
    let words: Vec<&str> = head.split_whitespace().collect();
    for word in &words {
        match *word {
            "public" => return Accessibility::Public,
            "private" => return Accessibility::Private,
            "fileprivate" => return Accessibility::Fileprivate,
            "open" => return Accessibility::Open,
            "package" => return Accessibility::Package,
            "internal" => return Accessibility::Internal,
            _ => {}
        }
    }
    Accessibility::Internal
}

/// Splits `text` on `sep` while respecting nesting of `()`, `<>`, and `[]`,
/// so a generic constraint or default value with a comma inside doesn't
/// fracture the split.
fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();

    for c in text.chars() {
        match c {
            '(' | '<' | '[' => {
                depth += 1;
                current.push(c);
            }
            ')' | '>' | ']' => {
                depth -= 1;
                current.push(c);
            }
            c if c == sep && depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            c => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts.into_iter().filter(|p| !p.is_empty()).collect()
}

fn parse_parameters(params_text: &str) -> Vec<Parameter> {
    let trimmed = params_text.trim().trim_start_matches('(').trim_end_matches(')');
    split_top_level(trimmed, ',')
        .into_iter()
        .filter_map(|part| {
            let without_default = part.split('=').next().unwrap_or(&part).trim();
            let (name_part, type_name) = without_default.split_once(':')?;
            let tokens: Vec<&str> = name_part.split_whitespace().collect();
            let (label, name) = match tokens.as_slice() {
                [only] => (Some(only.to_string()), only.to_string()),
                [label, name, ..] => {
                    let label = if *label == "_" { None } else { Some(label.to_string()) };
                    (label, name.to_string())
                }
                [] => return None,
            };
            Some(Parameter {
                label,
                name,
                type_name: type_name.trim().to_string(),
            })
        })
        .collect()
}

fn build_signature(
    name: &str,
    generics: &str,
    params_text: &str,
    is_async: bool,
    is_throws: bool,
    return_type: &Option<String>,
) -> String {
    let mut signature = format!("func {name}{generics}{params_text}");
    if is_async {
        signature.push_str(" async");
    }
    if is_throws {
        signature.push_str(" throws");
    }
    if let Some(ret) = return_type {
        signature.push_str(" -> ");
        signature.push_str(ret);
    }
    signature
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_import_and_type_and_function() {
        let source = r#"
import Foundation

protocol Greeter {
    func greet() -> String
}

class EnglishGreeter: Greeter {
    func greet() -> String {
        return helper()
    }

    private func helper() -> String {
        return "hi"
    }
}
"#;
        let parser = SwiftParser;
        let parsed = parser.parse(Path::new("Greeter.swift"), source).unwrap();

        assert_eq!(parsed.imports.len(), 1);
        assert_eq!(parsed.imports[0].module_name, "Foundation");

        let protocol = parsed.types.iter().find(|t| t.name == "Greeter").unwrap();
        assert_eq!(protocol.kind, DeclKind::Protocol);

        let class = parsed.types.iter().find(|t| t.name == "EnglishGreeter").unwrap();
        assert_eq!(class.kind, DeclKind::Class);
        assert_eq!(class.inherited_types, vec!["Greeter".to_string()]);

        let helper = parsed.functions.iter().find(|f| f.name == "helper").unwrap();
        assert_eq!(helper.accessibility, Accessibility::Private);
        assert_eq!(helper.containing_type.as_deref(), Some("EnglishGreeter"));

        let call = parsed.call_sites.iter().find(|c| c.called_name == "helper").unwrap();
        assert_eq!(call.containing_function_name.as_deref(), Some("greet"));
    }

    #[test]
    fn main_dot_swift_is_always_the_entry_point() {
        let parser = SwiftParser;
        let parsed = parser.parse(Path::new("main.swift"), "print(\"hi\")").unwrap();
        assert!(parsed.has_entry_point_attribute);
    }

    #[test]
    fn parameters_split_labels_and_types() {
        let source = r#"
func move(to point: Point, _ speed: Double = 1.0) {
}
"#;
        let parser = SwiftParser;
        let parsed = parser.parse(Path::new("Move.swift"), source).unwrap();
        let f = &parsed.functions[0];
        assert_eq!(f.parameters.len(), 2);
        assert_eq!(f.parameters[0].label.as_deref(), Some("to"));
        assert_eq!(f.parameters[0].name, "point");
        assert_eq!(f.parameters[0].type_name, "Point");
        assert_eq!(f.parameters[1].label, None);
        assert_eq!(f.parameters[1].name, "speed");
    }
}
