//! Programming language definitions and extension detection.
//!
//! One extension table backs both routing predicates: whether a file gets
//! boundary-aware chunking and whether metadata can be extracted from it.

use std::collections::HashMap;

/// Languages recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    C,
    Cpp,
    CSharp,
    Razor,
    JavaScript,
    TypeScript,
    Java,
    Go,
    Rust,
    Kotlin,
    Scala,
    Swift,
}

/// Language families that share one metadata extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    CSharp,
    EcmaScript,
    Java,
}

impl LanguageFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageFamily::CSharp => "csharp",
            LanguageFamily::EcmaScript => "ecmascript",
            LanguageFamily::Java => "java",
        }
    }
}

impl Language {
    /// Detect the language of a file from its extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = extension_of(file_name)?;
        EXTENSIONS.get(ext.as_str()).copied()
    }

    /// Get a string representation of the language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Razor => "razor",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Kotlin => "kotlin",
            Language::Scala => "scala",
            Language::Swift => "swift",
        }
    }

    /// Whether blocks are delimited by braces and/or preprocessor directives.
    /// Every language in the table is.
    pub fn is_brace_structured(&self) -> bool {
        true
    }

    /// The metadata extractor family for this language, if any.
    pub fn metadata_family(&self) -> Option<LanguageFamily> {
        match self {
            Language::CSharp => Some(LanguageFamily::CSharp),
            Language::JavaScript | Language::TypeScript => Some(LanguageFamily::EcmaScript),
            Language::Java => Some(LanguageFamily::Java),
            _ => None,
        }
    }
}

lazy_static::lazy_static! {
    static ref EXTENSIONS: HashMap<&'static str, Language> = {
        let mut map = HashMap::new();

        // C/C++
        for ext in [".c", ".h"] {
            map.insert(ext, Language::C);
        }
        for ext in [".cpp", ".hpp", ".cc", ".cxx"] {
            map.insert(ext, Language::Cpp);
        }

        // C# and Razor views
        map.insert(".cs", Language::CSharp);
        for ext in [".cshtml", ".razor"] {
            map.insert(ext, Language::Razor);
        }

        // ECMAScript family
        for ext in [".js", ".jsx", ".mjs", ".cjs"] {
            map.insert(ext, Language::JavaScript);
        }
        for ext in [".ts", ".tsx"] {
            map.insert(ext, Language::TypeScript);
        }

        // JVM and others
        map.insert(".java", Language::Java);
        map.insert(".kt", Language::Kotlin);
        map.insert(".scala", Language::Scala);
        map.insert(".go", Language::Go);
        map.insert(".rs", Language::Rust);
        map.insert(".swift", Language::Swift);

        map
    };
}

/// Lower-cased extension including the dot, taken from the last `.`.
///
/// `"Invoice.CS"` gives `".cs"`, `"Makefile"` gives `None`.
pub fn extension_of(file_name: &str) -> Option<String> {
    file_name
        .rfind('.')
        .map(|i| file_name[i..].to_ascii_lowercase())
}

/// True if the file gets boundary-aware code chunking.
pub fn is_code_file_for_chunking(file_name: &str) -> bool {
    Language::from_file_name(file_name).map_or(false, |lang| lang.is_brace_structured())
}

/// True if metadata can be extracted from the file.
pub fn is_code_file_for_metadata(file_name: &str) -> bool {
    metadata_family(file_name).is_some()
}

/// The extractor family registered for the file's extension.
pub fn metadata_family(file_name: &str) -> Option<LanguageFamily> {
    Language::from_file_name(file_name).and_then(|lang| lang.metadata_family())
}
