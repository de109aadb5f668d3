//! Structural metadata extracted from source files.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Declared types, fields and referenced types found in one source file.
///
/// The three collections are ordered sets, so they are deduplicated and
/// sorted no matter in which order names were discovered, and serialize as
/// sorted JSON arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMetadata {
    /// File name the metadata was extracted from
    pub file_name: String,

    /// Names of declared classes, interfaces, structs and enums
    pub class_names: BTreeSet<String>,

    /// Names of fields and properties
    pub property_names: BTreeSet<String>,

    /// Non built-in types used by fields, properties and parameters
    pub referenced_types: BTreeSet<String>,
}

impl CodeMetadata {
    /// Metadata for a supported file in which nothing was found.
    pub fn empty(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            ..Default::default()
        }
    }

    /// Check whether all three collections are empty.
    pub fn is_empty(&self) -> bool {
        self.class_names.is_empty()
            && self.property_names.is_empty()
            && self.referenced_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_sorted_arrays() {
        let mut meta = CodeMetadata::empty("Order.cs");
        meta.class_names.insert("Order".to_string());
        meta.referenced_types.insert("Customer".to_string());
        meta.referenced_types.insert("Address".to_string());
        meta.referenced_types.insert("Customer".to_string());

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["file_name"], "Order.cs");
        assert_eq!(json["class_names"], serde_json::json!(["Order"]));
        assert_eq!(json["property_names"], serde_json::json!([]));
        assert_eq!(
            json["referenced_types"],
            serde_json::json!(["Address", "Customer"])
        );
    }

    #[test]
    fn test_empty() {
        let meta = CodeMetadata::empty("util.js");
        assert!(meta.is_empty());
        assert_eq!(meta.file_name, "util.js");
    }
}
