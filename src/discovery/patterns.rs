//! Lockfile basename patterns.

/// Basenames recognized as dependency manifests.
///
/// Entries starting with `*` match by suffix.
pub static LOCKFILE_NAMES: &[&str] = &[
    // Node.js
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    // Ruby
    "Gemfile.lock",
    "*.gemspec",
    // Rust
    "Cargo.lock",
    // PHP
    "composer.lock",
    "composer.json",
    // Python
    "requirements.txt",
    "Pipfile.lock",
    "poetry.lock",
    "uv.lock",
    // .NET
    "packages.lock.json",
    "packages.config",
    "*.deps.json",
    "*Packages.props",
    // Go
    "go.mod",
    "go.sum",
    // Java
    "pom.xml",
    "*.jar",
    "*.war",
    "*.ear",
    "*.par",
    "*gradle.lockfile",
    // C/C++
    "conan.lock",
    // Dart
    "pubspec.lock",
    // Elixir
    "mix.lock",
    // Swift
    "Package.resolved",
    "Podfile.lock",
];

pub fn default_lockfile_names() -> Vec<String> {
    LOCKFILE_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Check if `file_name` matches `pattern`, honoring a leading `*`.
pub fn matches_name(pattern: &str, file_name: &str) -> bool {
    match pattern.strip_prefix('*') {
        Some(suffix) => file_name.ends_with(suffix),
        None => pattern == file_name,
    }
}

/// Check if `file_name` matches any of `patterns`.
pub fn is_lockfile_name<S: AsRef<str>>(patterns: &[S], file_name: &str) -> bool {
    patterns.iter().any(|p| matches_name(p.as_ref(), file_name))
}
