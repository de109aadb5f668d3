//! Java metadata extractor.

use regex::Regex;

use super::extractor::{collect_types, ExtractedNames, MetadataExtractor};
use crate::error::MetadataError;
use crate::processing::LanguageFamily;

/// Primitives and `java.lang` / `java.util` types that are never reported
/// as referenced.
const BUILTINS: &[&str] = &[
    "int", "long", "short", "byte", "boolean", "double", "float", "char", "void", "String",
    "Integer", "Long", "Short", "Byte", "Boolean", "Double", "Float", "Character", "Number",
    "Void", "Object", "List", "Set", "Map", "Optional", "Collection", "ArrayList", "HashMap",
    "HashSet", "LinkedList",
];

struct Patterns {
    type_decl: Regex,
    field: Regex,
    accessor: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            type_decl: Regex::new(r"\b(?:class|interface|enum)\s+([A-Z][A-Za-z0-9_]*)")?,
            field: Regex::new(
                r"\b(?:private|protected|public)\s+(?:(?:static|final|transient|volatile)\s+)*([A-Za-z_][\w<>,\s\[\]?.]*?)\s+([A-Za-z_$][\w$]*)\s*[;=]",
            )?,
            // public Long getId(  /  public boolean isClosed(
            accessor: Regex::new(
                r"\b(?:public|protected)\s+[\w<>,\s\[\]?.]+?\s+(?:get|is)([A-Z][A-Za-z0-9_]*)\s*\(",
            )?,
        })
    }
}

lazy_static::lazy_static! {
    static ref PATTERNS: Result<Patterns, regex::Error> = Patterns::compile();
}

/// `Id` -> `id`, `CreatedAt` -> `createdAt`.
fn property_from_accessor(suffix: &str) -> String {
    let mut chars = suffix.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Extracts declared types, fields, bean properties and referenced types
/// from Java source.
pub struct JavaExtractor;

impl MetadataExtractor for JavaExtractor {
    fn language(&self) -> LanguageFamily {
        LanguageFamily::Java
    }

    fn extract(&self, content: &str) -> Result<ExtractedNames, MetadataError> {
        let patterns = PATTERNS.as_ref().map_err(|e| MetadataError::Pattern {
            language: self.language().as_str(),
            source: e.clone(),
        })?;
        let mut names = ExtractedNames::default();

        for caps in patterns.type_decl.captures_iter(content) {
            names.class_names.insert(caps[1].to_string());
        }

        for caps in patterns.field.captures_iter(content) {
            names.property_names.insert(caps[2].to_string());
            collect_types(&caps[1], BUILTINS, &mut names.referenced_types);
        }

        for caps in patterns.accessor.captures_iter(content) {
            names.property_names.insert(property_from_accessor(&caps[1]));
        }

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted(set: &std::collections::BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_bean_with_accessors() {
        let content = r#"
package com.acme.warehouse;

import java.util.List;

public class WarehouseReceipt {
    private Long id;
    private String number;
    private List<WarehouseItem> items;

    public Long getId() { return id; }
    public boolean isClosed() { return closed; }
}
"#;
        let names = JavaExtractor.extract(content).unwrap();

        assert_eq!(sorted(&names.class_names), vec!["WarehouseReceipt"]);
        assert_eq!(
            sorted(&names.property_names),
            vec!["closed", "id", "items", "number"]
        );
        assert_eq!(sorted(&names.referenced_types), vec!["WarehouseItem"]);
    }

    #[test]
    fn test_modifiers_and_generic_fields() {
        let content = r#"
public interface OrderRepository { }
enum Status { OPEN }
class Order {
    private static final long serialVersionUID = 1L;
    protected Map<String, Customer> customersById = new HashMap<>();
    public Optional<Invoice> invoice;
}
"#;
        let names = JavaExtractor.extract(content).unwrap();

        assert_eq!(
            sorted(&names.class_names),
            vec!["Order", "OrderRepository", "Status"]
        );
        assert_eq!(
            sorted(&names.property_names),
            vec!["customersById", "invoice", "serialVersionUID"]
        );
        assert_eq!(sorted(&names.referenced_types), vec!["Customer", "Invoice"]);
    }

    #[test]
    fn test_property_from_accessor() {
        assert_eq!(property_from_accessor("Id"), "id");
        assert_eq!(property_from_accessor("CreatedAt"), "createdAt");
        assert_eq!(property_from_accessor(""), "");
    }

    #[test]
    fn test_locals_are_ignored() {
        let content = "class A { void run() { Order order = load(); int n = 0; } }";
        let names = JavaExtractor.extract(content).unwrap();
        assert_eq!(sorted(&names.class_names), vec!["A"]);
        assert!(names.property_names.is_empty());
        assert!(names.referenced_types.is_empty());
    }
}
