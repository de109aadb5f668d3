//! Structural metadata for source files.
//!
//! This module provides:
//! - The `MetadataExtractor` trait and one heuristic extractor per language family
//! - An immutable extension-to-extractor registry
//! - `extract_code_metadata`, which never fails: extractor errors and panics
//!   degrade to empty metadata

mod csharp;
mod ecmascript;
mod extractor;
mod java;

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::error::MetadataError;
use crate::processing::{metadata_family, LanguageFamily};
use crate::types::CodeMetadata;

pub use crate::processing::is_code_file_for_metadata;
pub use csharp::CSharpExtractor;
pub use ecmascript::EcmaScriptExtractor;
pub use extractor::{ExtractedNames, MetadataExtractor};
pub use java::JavaExtractor;

lazy_static::lazy_static! {
    static ref EXTRACTORS: HashMap<LanguageFamily, Box<dyn MetadataExtractor>> = {
        let extractors: Vec<Box<dyn MetadataExtractor>> = vec![
            Box::new(CSharpExtractor),
            Box::new(EcmaScriptExtractor),
            Box::new(JavaExtractor),
        ];
        extractors.into_iter().map(|e| (e.language(), e)).collect()
    };
}

/// Extractor registered for the file's extension, if any.
pub fn extractor_for(file_name: &str) -> Option<&'static dyn MetadataExtractor> {
    let family = metadata_family(file_name)?;
    EXTRACTORS.get(&family).map(|e| e.as_ref())
}

/// Extract class, property and referenced type names from a source file.
///
/// Returns `None` when no extractor is registered for the extension, and
/// `Some` (possibly with three empty collections) otherwise.
pub fn extract_code_metadata(content: &str, file_name: &str) -> Option<CodeMetadata> {
    let extractor = extractor_for(file_name)?;
    Some(run_extractor(extractor, content, file_name))
}

/// Run one extractor, turning errors and panics into empty metadata.
pub(crate) fn run_extractor(
    extractor: &dyn MetadataExtractor,
    content: &str,
    file_name: &str,
) -> CodeMetadata {
    let language = extractor.language().as_str();
    let result = panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(content)))
        .unwrap_or(Err(MetadataError::Panicked { language }));

    match result {
        Ok(names) => {
            debug!(
                file_name,
                language,
                classes = names.class_names.len(),
                properties = names.property_names.len(),
                referenced = names.referenced_types.len(),
                "Extracted code metadata"
            );
            CodeMetadata {
                file_name: file_name.to_string(),
                class_names: names.class_names,
                property_names: names.property_names,
                referenced_types: names.referenced_types,
            }
        }
        Err(e) => {
            warn!(file_name, error = %e, "Metadata extraction failed, using empty metadata");
            CodeMetadata::empty(file_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct PanickingExtractor;

    impl MetadataExtractor for PanickingExtractor {
        fn language(&self) -> LanguageFamily {
            LanguageFamily::Java
        }

        fn extract(&self, _content: &str) -> Result<ExtractedNames, MetadataError> {
            panic!("extractor bug");
        }
    }

    struct FailingExtractor;

    impl MetadataExtractor for FailingExtractor {
        fn language(&self) -> LanguageFamily {
            LanguageFamily::CSharp
        }

        fn extract(&self, _content: &str) -> Result<ExtractedNames, MetadataError> {
            Err(MetadataError::Panicked {
                language: "csharp",
            })
        }
    }

    #[test]
    fn test_unsupported_extension_is_absent() {
        assert_eq!(extract_code_metadata("public class A {}", "A.py"), None);
        assert_eq!(extract_code_metadata("int main() {}", "main.c"), None);
        assert_eq!(extract_code_metadata("whatever", "README"), None);
    }

    #[test]
    fn test_supported_but_empty_is_present() {
        let meta = extract_code_metadata("const x = 1;", "util.js").unwrap();
        assert_eq!(meta, CodeMetadata::empty("util.js"));
    }

    #[test]
    fn test_invoice_example() {
        let content = "public class Invoice { public decimal Amount { get; set; } public Customer Customer { get; set; } }";
        let meta = extract_code_metadata(content, "Invoice.cs").unwrap();

        assert_eq!(meta.file_name, "Invoice.cs");
        assert_eq!(meta.class_names.iter().collect::<Vec<_>>(), vec!["Invoice"]);
        assert_eq!(
            meta.property_names.iter().collect::<Vec<_>>(),
            vec!["Amount", "Customer"]
        );
        assert_eq!(meta.referenced_types.iter().collect::<Vec<_>>(), vec!["Customer"]);
    }

    #[test]
    fn test_deterministic_regardless_of_repetition() {
        let once = "public class B { public Zeta Z1 { get; set; } public Alpha A1 { get; set; } }\n";
        let twice = format!("{once}{once}public class B {{ public Alpha A1 {{ get; set; }} }}\n");

        let a = extract_code_metadata(once, "B.cs").unwrap();
        let b = extract_code_metadata(&twice, "B.cs").unwrap();

        assert_eq!(a, b);
        assert_eq!(
            a.referenced_types.iter().collect::<Vec<_>>(),
            vec!["Alpha", "Zeta"]
        );
    }

    #[test]
    fn test_extension_routing_is_case_insensitive() {
        assert!(extractor_for("Order.JAVA").is_some());
        assert_eq!(
            extractor_for("app.TSX").map(|e| e.language()),
            Some(LanguageFamily::EcmaScript)
        );
        assert!(is_code_file_for_metadata("Page.cs"));
        assert!(!is_code_file_for_metadata("main.go"));
    }

    #[test]
    fn test_panic_degrades_to_empty() {
        let meta = run_extractor(&PanickingExtractor, "class A {}", "A.java");
        assert_eq!(meta, CodeMetadata::empty("A.java"));
    }

    #[test]
    fn test_error_degrades_to_empty() {
        let meta = run_extractor(&FailingExtractor, "class A {}", "A.cs");
        assert_eq!(meta, CodeMetadata::empty("A.cs"));
    }
}
