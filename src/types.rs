use std::path::Path;

/// Languages whose grammar we ship. All of them use `//` line comments,
/// which is what the marker check looks at. Adding a language means adding
/// an arm here and the compiler tells you everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    CSharp,
    Rust,
    TypeScript,
    Tsx,
    JavaScript,
    Go,
    Java,
    C,
    Cpp,
    Swift,
    Zig,
}

impl Lang {
    /// Detect by extension, ignoring ASCII case. `None` means no grammar;
    /// only the name rule applies.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
        let lang = match ext.as_str() {
            "cs" => Self::CSharp,
            "rs" => Self::Rust,
            "ts" | "mts" | "cts" => Self::TypeScript,
            "tsx" => Self::Tsx,
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "go" => Self::Go,
            "java" => Self::Java,
            "c" | "h" => Self::C,
            "cpp" | "hpp" | "cc" | "cxx" | "hh" => Self::Cpp,
            "swift" => Self::Swift,
            "zig" => Self::Zig,
            _ => return None,
        };
        Some(lang)
    }

    /// The tree-sitter grammar for this language.
    #[must_use]
    pub fn grammar(self) -> tree_sitter::Language {
        let lang = match self {
            Self::CSharp => tree_sitter_c_sharp::LANGUAGE,
            Self::Rust => tree_sitter_rust::LANGUAGE,
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX,
            Self::JavaScript => tree_sitter_javascript::LANGUAGE,
            Self::Go => tree_sitter_go::LANGUAGE,
            Self::Java => tree_sitter_java::LANGUAGE,
            Self::C => tree_sitter_c::LANGUAGE,
            Self::Cpp => tree_sitter_cpp::LANGUAGE,
            Self::Swift => tree_sitter_swift::LANGUAGE,
            Self::Zig => tree_sitter_zig::LANGUAGE,
        };
        lang.into()
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CSharp => "c#",
            Self::Rust => "rust",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::JavaScript => "javascript",
            Self::Go => "go",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "c++",
            Self::Swift => "swift",
            Self::Zig => "zig",
        };
        f.write_str(name)
    }
}
