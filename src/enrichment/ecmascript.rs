//! JavaScript / TypeScript metadata extractor.

use regex::Regex;

use super::extractor::{
    collect_types, matching_close, split_top_level, ExtractedNames, MetadataExtractor,
};
use crate::error::MetadataError;
use crate::processing::LanguageFamily;

/// Built-in types that are never reported as referenced.
const BUILTINS: &[&str] = &[
    "string", "number", "boolean", "void", "any", "unknown", "null", "undefined", "object",
    "symbol", "bigint", "never", "Array", "Promise", "Date", "RegExp", "Map", "Set", "Record",
    "Partial", "Readonly", "Error", "Function", "Object", "String", "Number", "Boolean",
];

/// Line-leading words that look like `name:` but are not fields.
const NOT_FIELDS: &[&str] = &["case", "default"];

struct Patterns {
    type_decl: Regex,
    field: Regex,
    constructor: Regex,
    this_assign: Regex,
    parameter: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            type_decl: Regex::new(r"\b(?:class|interface|enum)\s+([A-Z][A-Za-z0-9_]*)")?,
            // private repo: OrderRepository;  /  name?: string;  /  total!: Money = ...
            field: Regex::new(
                r"(?m)^[ \t]*(?:(?:public|private|protected|readonly|static|declare|override|abstract)\s+)*([A-Za-z_$][\w$]*)\s*[!?]?\s*:\s*([A-Za-z_$][\w$<>\[\],|&. ]*?)\s*[;=]",
            )?,
            constructor: Regex::new(r"\bconstructor\s*\(")?,
            this_assign: Regex::new(r"\bthis\.([A-Za-z_$][\w$]*)\s*=(=?)")?,
            parameter: Regex::new(
                r"^\s*((?:(?:public|private|protected|readonly|override)\s+)*)([A-Za-z_$][\w$]*)\s*\??\s*(?::\s*([\s\S]+))?$",
            )?,
        })
    }
}

lazy_static::lazy_static! {
    static ref PATTERNS: Result<Patterns, regex::Error> = Patterns::compile();
}

/// Extracts classes, fields and referenced types from JavaScript and
/// TypeScript source.
pub struct EcmaScriptExtractor;

impl EcmaScriptExtractor {
    /// Constructor parameters and `this.x = ...` assignments in constructor bodies.
    fn extract_constructors(patterns: &Patterns, content: &str, names: &mut ExtractedNames) {
        for m in patterns.constructor.find_iter(content) {
            let open = m.end() - 1;
            let Some(close) = matching_close(content, open, '(', ')') else {
                continue;
            };

            for param in split_top_level(&content[open + 1..close]) {
                let param = param.split('=').next().unwrap_or_default();
                let Some(caps) = patterns.parameter.captures(param) else {
                    continue;
                };
                if !caps[1].trim().is_empty() {
                    names.property_names.insert(caps[2].to_string());
                }
                if let Some(ty) = caps.get(3) {
                    collect_types(ty.as_str(), BUILTINS, &mut names.referenced_types);
                }
            }

            let Some(body_open) = content[close..].find('{').map(|i| close + i) else {
                continue;
            };
            let body_close = matching_close(content, body_open, '{', '}').unwrap_or(content.len());
            for caps in patterns.this_assign.captures_iter(&content[body_open..body_close]) {
                if caps[2].is_empty() {
                    names.property_names.insert(caps[1].to_string());
                }
            }
        }
    }
}

impl MetadataExtractor for EcmaScriptExtractor {
    fn language(&self) -> LanguageFamily {
        LanguageFamily::EcmaScript
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
            if NOT_FIELDS.contains(&&caps[1]) {
                continue;
            }
            names.property_names.insert(caps[1].to_string());
            collect_types(&caps[2], BUILTINS, &mut names.referenced_types);
        }

        Self::extract_constructors(patterns, content, &mut names);

        Ok(names)
    }
}
