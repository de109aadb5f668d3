//! Extractor trait and helpers shared by the language extractors.

use std::collections::BTreeSet;

use crate::error::MetadataError;
use crate::processing::LanguageFamily;

/// Names found by one extractor run, deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedNames {
    pub class_names: BTreeSet<String>,
    pub property_names: BTreeSet<String>,
    pub referenced_types: BTreeSet<String>,
}

/// Heuristic metadata extractor for one language family.
///
/// Implementations run independent pattern passes over the raw source; they
/// never build a syntax tree.
pub trait MetadataExtractor: Send + Sync {
    /// The language family this extractor handles.
    fn language(&self) -> LanguageFamily;

    /// Extract class, property and referenced type names from `content`.
    fn extract(&self, content: &str) -> Result<ExtractedNames, MetadataError>;
}

/// A capitalized identifier longer than one character.
///
/// Single letters are generic parameters (`T`, `K`), not types worth indexing.
pub(crate) fn is_type_name(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            token.len() > 1 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Add every qualifying type token of a type expression to `out`.
///
/// `Dictionary<string, List<Customer>>` yields `Dictionary`, `List` and
/// `Customer`, minus whatever is in `builtins`.
pub(crate) fn collect_types(type_expr: &str, builtins: &[&str], out: &mut BTreeSet<String>) {
    for token in type_expr.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$')) {
        if is_type_name(token) && !builtins.contains(&token) {
            out.insert(token.to_string());
        }
    }
}

/// Byte index of the delimiter closing the one at `open_at`.
///
/// Only `open`/`close` are counted; anything else, strings included, is
/// skipped. Returns `None` when the input ends first.
pub(crate) fn matching_close(text: &str, open_at: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open_at..].char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(open_at + i);
            }
        }
    }
    None
}

/// Split on commas that are not nested inside `<>`, `()`, `[]` or `{}`.
pub(crate) fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            ',' if depth <= 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_type_name() {
        assert!(is_type_name("Customer"));
        assert!(is_type_name("IRepository2"));
        assert!(is_type_name("Line_Item"));
        assert!(!is_type_name("T"));
        assert!(!is_type_name("customer"));
        assert!(!is_type_name("_Private"));
        assert!(!is_type_name(""));
    }

    #[test]
    fn test_collect_types() {
        let mut out = BTreeSet::new();
        collect_types("Dictionary<string, List<Customer>>", &["List", "string"], &mut out);
        let names: Vec<&str> = out.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Customer", "Dictionary"]);
    }

    #[test]
    fn test_collect_types_qualified_and_union() {
        let mut out = BTreeSet::new();
        collect_types("java.util.Optional<Order> | null", &[], &mut out);
        collect_types("Order[]", &[], &mut out);
        let names: Vec<&str> = out.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Optional", "Order"]);
    }

    #[test]
    fn test_matching_close() {
        let text = "f(a, (b), c) {";
        assert_eq!(matching_close(text, 1, '(', ')'), Some(11));
        assert_eq!(matching_close("f(a", 1, '(', ')'), None);
    }

    #[test]
    fn test_split_top_level() {
        let parts = split_top_level("a: Map<K, V>, b: string, c = f(1, 2)");
        assert_eq!(parts, vec!["a: Map<K, V>", " b: string", " c = f(1, 2)"]);
    }
}
