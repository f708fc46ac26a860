/// File-name prefix used for throwaway generated files. Matches regardless
/// of extension, including when there is none.
const TEMP_FILE_PREFIX: &str = "TemporaryGeneratedFile_";

/// Suffixes of the extension-stripped base name that mark generated files.
/// The leading dot is part of the suffix: `Foo.g.cs` → `Foo.g` ends with `.g`.
const GENERATED_SUFFIXES: &[&str] = &[
    "AssemblyInfo",
    ".designer",
    ".generated",
    ".g",
    ".g.i",
    ".AssemblyAttributes",
];

/// Check a file name or path against the generated-file naming conventions.
/// Pure and total: no I/O, ASCII case-insensitive, empty input is "no match".
#[must_use]
pub fn is_generated_by_path(path: &str) -> bool {
    let name = base_name(path);

    if starts_with_ignore_case(name, TEMP_FILE_PREFIX) {
        return true;
    }

    // Suffix rules only apply when there is a non-empty extension.
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    if ext.is_empty() {
        return false;
    }

    GENERATED_SUFFIXES
        .iter()
        .any(|suffix| ends_with_ignore_case(stem, suffix))
}

/// Last path segment. Both separators count so Windows-style paths work on any host.
fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.as_bytes()[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}
