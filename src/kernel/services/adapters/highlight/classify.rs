//! Grammar-agnostic node classification.
//!
//! Works off node kinds and field names shared by most tree-sitter grammars,
//! so a new grammar only needs to be registered in the engine.

use super::theme::ColorGroup;
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    Comment,
    String,
    Regex,
    Keyword,
    KeywordControl,
    Type,
    TypeBuiltin,
    Number,
    Boolean,
    Function,
    Macro,
    Variable,
    Property,
    Constant,
    Attribute,
    Operator,
    Tag,
    TagAttribute,
}

impl HighlightKind {
    /// Traversal does not descend into leaf kinds.
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            Self::Comment | Self::String | Self::Regex | Self::Attribute
        )
    }

    pub const fn color_group(self) -> ColorGroup {
        match self {
            Self::Comment => ColorGroup::Comment,
            Self::String => ColorGroup::String,
            Self::Regex => ColorGroup::Regex,
            Self::Keyword => ColorGroup::Keyword,
            Self::KeywordControl => ColorGroup::KeywordControl,
            Self::Type | Self::TypeBuiltin => ColorGroup::Type,
            Self::Number => ColorGroup::Number,
            Self::Boolean => ColorGroup::Keyword,
            Self::Function => ColorGroup::Function,
            Self::Macro => ColorGroup::Macro,
            Self::Variable | Self::Property => ColorGroup::Variable,
            Self::Constant => ColorGroup::Constant,
            Self::Attribute | Self::TagAttribute => ColorGroup::Attribute,
            Self::Operator => ColorGroup::Operator,
            Self::Tag => ColorGroup::Tag,
        }
    }
}

pub fn classify_node(node: Node<'_>, source: &[u8]) -> Option<HighlightKind> {
    let kind = node.kind();

    if is_comment_kind(kind) {
        return Some(HighlightKind::Comment);
    }
    if is_regex_kind(kind) {
        return Some(HighlightKind::Regex);
    }
    if is_string_kind(kind) {
        return Some(HighlightKind::String);
    }
    if kind.contains("integer") || kind.contains("float") || kind.contains("number") {
        return Some(HighlightKind::Number);
    }
    if matches!(kind, "true" | "false" | "boolean") {
        return Some(HighlightKind::Boolean);
    }
    if matches!(
        kind,
        "null" | "nil" | "none" | "None" | "undefined" | "null_literal"
    ) {
        return Some(HighlightKind::Constant);
    }
    if matches!(
        kind,
        "primitive_type" | "predefined_type" | "integral_type" | "floating_point_type"
    ) {
        return Some(HighlightKind::TypeBuiltin);
    }
    if matches!(kind, "type_identifier" | "namespace_identifier") {
        return Some(HighlightKind::Type);
    }
    if matches!(
        kind,
        "attribute_item" | "inner_attribute_item" | "decorator" | "annotation" | "marker_annotation"
    ) {
        return Some(HighlightKind::Attribute);
    }
    if matches!(kind, "macro_invocation" | "preproc_directive") {
        return Some(HighlightKind::Macro);
    }
    if matches!(kind, "tag_name" | "start_tag_name" | "end_tag_name") {
        return Some(HighlightKind::Tag);
    }
    if kind == "attribute_name" {
        return Some(HighlightKind::TagAttribute);
    }
    if matches!(kind, "property_identifier" | "field_identifier" | "property_name") {
        return Some(classify_member(node));
    }
    if kind == "identifier" {
        return classify_identifier(node, source);
    }
    if !node.is_named() {
        if is_control_keyword(kind) {
            return Some(HighlightKind::KeywordControl);
        }
        if is_keyword_token(kind) {
            return Some(HighlightKind::Keyword);
        }
        if is_operator_token(kind) {
            return Some(HighlightKind::Operator);
        }
    }
    None
}

fn classify_member(node: Node<'_>) -> HighlightKind {
    if is_callee(node) || is_named_definition(node) {
        HighlightKind::Function
    } else {
        HighlightKind::Property
    }
}

fn classify_identifier(node: Node<'_>, source: &[u8]) -> Option<HighlightKind> {
    if is_callee(node) || is_named_definition(node) {
        return Some(HighlightKind::Function);
    }

    let text = node.utf8_text(source).ok()?;
    if text.len() > 1
        && text
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_')
        && text.chars().any(|ch| ch.is_ascii_uppercase())
    {
        return Some(HighlightKind::Constant);
    }
    None
}

/// `foo(...)`, `a.foo(...)` and `path::foo(...)` all colour `foo`.
fn is_callee(node: Node<'_>) -> bool {
    let mut current = node;
    for _ in 0..3 {
        let Some(parent) = current.parent() else {
            return false;
        };
        if matches!(
            parent.kind(),
            "call_expression" | "call" | "method_invocation" | "macro_invocation"
        ) {
            let callee = parent
                .child_by_field_name("function")
                .or_else(|| parent.child_by_field_name("name"))
                .or_else(|| parent.child_by_field_name("macro"));
            return callee.is_some_and(|callee| same_node(callee, current))
                && is_trailing_name(current, node);
        }
        if !matches!(
            parent.kind(),
            "field_expression"
                | "member_expression"
                | "scoped_identifier"
                | "attribute"
                | "selector_expression"
                | "qualified_identifier"
        ) {
            return false;
        }
        current = parent;
    }
    false
}

fn is_trailing_name(container: Node<'_>, node: Node<'_>) -> bool {
    same_node(container, node) || container.end_byte() == node.end_byte()
}

fn is_named_definition(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    let is_function = matches!(
        parent.kind(),
        "function_item"
            | "function_signature_item"
            | "function_declaration"
            | "function_definition"
            | "method_declaration"
            | "method_definition"
            | "generator_function_declaration"
    );
    is_function
        && parent
            .child_by_field_name("name")
            .is_some_and(|name| same_node(name, node))
}

fn same_node(left: Node<'_>, right: Node<'_>) -> bool {
    left.start_byte() == right.start_byte()
        && left.end_byte() == right.end_byte()
        && left.kind_id() == right.kind_id()
}

fn is_comment_kind(kind: &str) -> bool {
    kind.contains("comment")
}

fn is_regex_kind(kind: &str) -> bool {
    kind.contains("regex") || kind == "regular_expression"
}

fn is_string_kind(kind: &str) -> bool {
    kind.contains("string") || matches!(kind, "char_literal" | "byte_literal" | "character_literal")
}

fn is_control_keyword(kind: &str) -> bool {
    matches!(
        kind,
        "if" | "else"
            | "elif"
            | "for"
            | "while"
            | "loop"
            | "do"
            | "break"
            | "continue"
            | "return"
            | "match"
            | "switch"
            | "case"
            | "default"
            | "try"
            | "catch"
            | "except"
            | "finally"
            | "throw"
            | "raise"
            | "yield"
            | "await"
            | "goto"
            | "select"
            | "then"
            | "fi"
            | "done"
            | "esac"
    )
}

/// Anonymous word tokens are keywords in every supported grammar.
fn is_keyword_token(kind: &str) -> bool {
    kind.len() > 1
        && kind
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b == b'_')
}

fn is_operator_token(kind: &str) -> bool {
    matches!(
        kind,
        "=" | "=="
            | "==="
            | "!="
            | "!=="
            | "<="
            | ">="
            | "&&"
            | "||"
            | "+"
            | "-"
            | "*"
            | "/"
            | "%"
            | "+="
            | "-="
            | "=>"
            | "->"
            | "::"
            | "!"
            | "?"
    )
}
