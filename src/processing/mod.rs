//! Processing module for file classification.
//!
//! This module provides:
//! - Language detection from file extensions
//! - Routing predicates for code chunking and metadata extraction

pub mod language;

pub use language::{
    extension_of, is_code_file_for_chunking, is_code_file_for_metadata, metadata_family,
    Language, LanguageFamily,
};
