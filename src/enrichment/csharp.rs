//! C# metadata extractor.

use regex::Regex;

use super::extractor::{collect_types, ExtractedNames, MetadataExtractor};
use crate::error::MetadataError;
use crate::processing::LanguageFamily;

/// Built-in and framework types that are never reported as referenced.
const BUILTINS: &[&str] = &[
    "string", "int", "long", "short", "byte", "bool", "boolean", "decimal", "double", "float",
    "object", "void", "var", "dynamic", "char", "uint", "ulong", "ushort", "String", "Object",
    "Boolean", "Int16", "Int32", "Int64", "Decimal", "Double", "Single", "DateTime",
    "DateTimeOffset", "TimeSpan", "Guid", "Task", "Nullable", "Func", "Action", "List", "IList",
    "IEnumerable", "ICollection", "IReadOnlyList", "IReadOnlyCollection", "Dictionary",
    "IDictionary", "HashSet",
];

/// Words that make a `public ... Name {` match a type declaration rather
/// than a property.
const DECLARATION_KEYWORDS: &[&str] = &[
    "class", "interface", "struct", "enum", "record", "namespace", "delegate",
];

struct Patterns {
    type_decl: Regex,
    property: Regex,
    member_type: Regex,
    type_args: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            type_decl: Regex::new(r"\b(?:class|interface|struct|enum)\s+([A-Z][A-Za-z0-9_]*)")?,
            // public decimal Amount { get; set; }  /  public Foo Bar = ...  /  public Foo Bar => ...
            property: Regex::new(
                r"\b(?:public|protected|internal)\s+([\w<>,\s\[\]?.]+)\s+([A-Z][A-Za-z0-9_]*)\s*[{=]",
            )?,
            member_type: Regex::new(
                r"\b(?:public|protected|internal|private)\s+(?:(?:static|readonly|virtual|override|abstract|sealed|new|const|required|volatile)\s+)*([A-Z][\w<>,\s\[\]?.]*?)\s+[A-Za-z_]\w*\s*[{=;]",
            )?,
            type_args: Regex::new(r"<([A-Z][A-Za-z0-9_,\s]+)>")?,
        })
    }
}

lazy_static::lazy_static! {
    static ref PATTERNS: Result<Patterns, regex::Error> = Patterns::compile();
}

/// Extracts declared types, properties and referenced types from C# source.
pub struct CSharpExtractor;

impl MetadataExtractor for CSharpExtractor {
    fn language(&self) -> LanguageFamily {
        LanguageFamily::CSharp
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

        for caps in patterns.property.captures_iter(content) {
            let is_declaration = caps[1]
                .split_whitespace()
                .any(|word| DECLARATION_KEYWORDS.contains(&word));
            if !is_declaration {
                names.property_names.insert(caps[2].to_string());
            }
        }

        for caps in patterns.member_type.captures_iter(content) {
            collect_types(&caps[1], BUILTINS, &mut names.referenced_types);
        }

        for caps in patterns.type_args.captures_iter(content) {
            collect_types(&caps[1], BUILTINS, &mut names.referenced_types);
        }

        Ok(names)
    }
}
