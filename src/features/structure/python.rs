//! Python structural analysis over a tree-sitter syntax tree

use super::{StructureError, StructureReport};
use tree_sitter::{Node, Parser};

/// Parse `source` and count its structure.
///
/// Any syntax error in the tree fails the whole analysis, so partial trees
/// never leak half-counted structure into the features.
pub fn analyze(source: &str) -> Result<StructureReport, StructureError> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE;
    parser.set_language(&language.into())?;

    let tree = parser.parse(source, None).ok_or(StructureError::NoTree)?;
    let root = tree.root_node();

    if root.has_error() {
        let position = first_error(&root)
            .map(|n| n.start_position())
            .unwrap_or_else(|| root.start_position());
        return Err(StructureError::Syntax {
            line: position.row + 1,
            column: position.column + 1,
        });
    }

    let mut report = StructureReport::default();
    walk(&root, source.as_bytes(), &mut report);
    Ok(report)
}

/// First ERROR or MISSING node in document order, following only subtrees
/// that contain an error.
fn first_error<'t>(root: &Node<'t>) -> Option<Node<'t>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !cursor.goto_first_child() {
            return None;
        }
        while !cursor.node().has_error() {
            if !cursor.goto_next_sibling() {
                return None;
            }
        }
    }
}

/// Pre-order walk with a single cursor. Stack use is constant in the
/// nesting depth of the source.
fn walk(root: &Node, source: &[u8], report: &mut StructureReport) {
    let mut cursor = root.walk();
    loop {
        record(&cursor.node(), source, report);
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

fn record(node: &Node, source: &[u8], report: &mut StructureReport) {
    if !node.is_named() {
        return;
    }
    let counts = &mut report.counts;
    let names = &mut report.names;
    match node.kind() {
        "function_definition" => {
            counts.functions += 1;
            push_name(node, "name", source, &mut names.functions);
        }
        "class_definition" => {
            counts.classes += 1;
            push_name(node, "name", source, &mut names.classes);
        }
        "import_statement" | "import_from_statement" | "future_import_statement" => {
            counts.imports += 1;
        }
        // elif is a nested if once desugared
        "if_statement" | "elif_clause" => counts.ifs += 1,
        "for_statement" => {
            counts.fors += 1;
            collect_field_targets(node, "left", source, &mut names.variables);
        }
        "while_statement" => counts.whiles += 1,
        "try_statement" => counts.tries += 1,
        "lambda" => counts.lambdas += 1,
        "assignment" | "augmented_assignment" | "for_in_clause" => {
            collect_field_targets(node, "left", source, &mut names.variables);
        }
        "named_expression" => {
            collect_field_targets(node, "name", source, &mut names.variables);
        }
        "with_item" => {
            if let Some(value) = node.child_by_field_name("value") {
                if value.kind() == "as_pattern" {
                    collect_field_targets(&value, "alias", source, &mut names.variables);
                }
            }
        }
        _ => {}
    }
}

fn push_name(node: &Node, field: &str, source: &[u8], out: &mut Vec<String>) {
    if let Some(text) = node
        .child_by_field_name(field)
        .and_then(|n| n.utf8_text(source).ok())
    {
        out.push(text.to_string());
    }
}

fn collect_field_targets(node: &Node, field: &str, source: &[u8], out: &mut Vec<String>) {
    if let Some(target) = node.child_by_field_name(field) {
        collect_targets(&target, source, out);
    }
}

/// Plain names bound by an assignment target, in source order. Attributes
/// and subscripts bind nothing new and are skipped.
fn collect_targets(target: &Node, source: &[u8], out: &mut Vec<String>) {
    let mut stack = vec![*target];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "identifier" => {
                if let Ok(text) = node.utf8_text(source) {
                    out.push(text.to_string());
                }
            }
            // an aliased bare name has no children of its own
            "as_pattern_target" if node.named_child_count() == 0 => {
                if let Ok(text) = node.utf8_text(source) {
                    if is_identifier(text) {
                        out.push(text.to_string());
                    }
                }
            }
            "pattern_list" | "tuple_pattern" | "list_pattern" | "list_splat_pattern"
            | "as_pattern_target" | "tuple" | "list" | "parenthesized_expression" => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                stack.extend(children.into_iter().rev());
            }
            _ => {}
        }
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}
