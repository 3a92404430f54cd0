use super::parsers::{self, ParseResult};
use super::{AnalyzeError, Ecosystem, LibraryAnalyzer, LibraryScanner};
use crate::types::{CanonicalPath, FileHash};
use tracing::debug;

type Parser = fn(&str) -> ParseResult;

/// Parsers keyed by exact lockfile basename.
static PARSERS: &[(&str, Parser)] = &[
    ("package-lock.json", parsers::package_lock),
    ("yarn.lock", parsers::yarn_lock),
    ("pnpm-lock.yaml", parsers::pnpm_lock),
    ("Cargo.lock", parsers::toml_packages),
    ("poetry.lock", parsers::toml_packages),
    ("uv.lock", parsers::toml_packages),
    ("composer.lock", parsers::composer_lock),
    ("Gemfile.lock", parsers::gemfile_lock),
    ("go.sum", parsers::go_sum),
    ("requirements.txt", parsers::requirements_txt),
    ("Pipfile.lock", parsers::pipfile_lock),
];

/// Offline analyzer for common lockfile formats.
///
/// Recognized manifests without a parser (archives, `pom.xml`, ...) produce
/// a scanner with no libraries so they still show up in the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockfileAnalyzer;

impl LockfileAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn parser_for(file_name: &str) -> Option<Parser> {
        PARSERS
            .iter()
            .find(|(name, _)| *name == file_name)
            .map(|(_, parser)| *parser)
    }
}

impl LibraryAnalyzer for LockfileAnalyzer {
    fn analyze(
        &self,
        path: &CanonicalPath,
        content: &[u8],
        file_mode: u32,
        offline: bool,
    ) -> Result<Vec<LibraryScanner>, AnalyzeError> {
        let file_name = path.file_name();
        let ecosystem = Ecosystem::from_file_name(file_name);

        let libraries = match Self::parser_for(file_name) {
            Some(parse) => {
                let text = std::str::from_utf8(content).map_err(|_| AnalyzeError::NotUtf8 {
                    path: path.to_string(),
                })?;
                // Byte-exact reads keep a UTF-8 BOM
                let text = text.strip_prefix('\u{feff}').unwrap_or(text);
                parse(text).map_err(|message| AnalyzeError::parse(path.as_str(), file_name, message))?
            }
            None => Vec::new(),
        };

        debug!(
            path = %path,
            ecosystem = %ecosystem,
            libraries = libraries.len(),
            "Analyzed lockfile"
        );

        Ok(vec![LibraryScanner {
            lockfile_path: path.clone(),
            ecosystem,
            libraries,
            sha256: FileHash::sha256(content),
            file_mode,
            offline,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::PathStyle;

    fn path(p: &str) -> CanonicalPath {
        PathStyle::Posix.resolve("/", p)
    }

    #[test]
    fn test_analyze_cargo_lock() {
        let content = b"[[package]]\nname = \"serde\"\nversion = \"1.0.0\"\n";
        let scanners = LockfileAnalyzer::new()
            .analyze(&path("/srv/app/Cargo.lock"), content, 0o644, true)
            .unwrap();

        assert_eq!(scanners.len(), 1);
        let scanner = &scanners[0];
        assert_eq!(scanner.lockfile_path.as_str(), "/srv/app/Cargo.lock");
        assert_eq!(scanner.ecosystem, Ecosystem::Cargo);
        assert_eq!(scanner.libraries.len(), 1);
        assert_eq!(scanner.libraries[0].name, "serde");
        assert_eq!(scanner.file_mode, 0o644);
        assert!(scanner.offline);
        assert_eq!(scanner.sha256, FileHash::sha256(content));
    }

    #[test]
    fn test_analyze_windows_path_uses_basename() {
        let p = PathStyle::Windows.resolve("C:\\", r"app\package-lock.json");
        let content = br#"{"packages": {"node_modules/lodash": {"version": "4.17.21"}}}"#;
        let scanners = LockfileAnalyzer::new()
            .analyze(&p, content, 0o644, false)
            .unwrap();

        assert_eq!(scanners[0].ecosystem, Ecosystem::Npm);
        assert_eq!(scanners[0].libraries[0].version, "4.17.21");
    }

    #[test]
    fn test_analyze_strips_bom() {
        let content = "\u{feff}requests==2.31.0\n".as_bytes();
        let scanners = LockfileAnalyzer::new()
            .analyze(&path("/a/requirements.txt"), content, 0o644, false)
            .unwrap();
        assert_eq!(scanners[0].libraries[0].name, "requests");
    }

    #[test]
    fn test_analyze_recognized_without_parser() {
        let content = [0x50, 0x4b, 0x03, 0x04, 0xff];
        let scanners = LockfileAnalyzer::new()
            .analyze(&path("/opt/lib/log4j-core.jar"), &content, 0o600, false)
            .unwrap();

        assert_eq!(scanners[0].ecosystem, Ecosystem::Maven);
        assert!(scanners[0].libraries.is_empty());
    }

    #[test]
    fn test_analyze_invalid_json_is_parse_error() {
        let err = LockfileAnalyzer::new()
            .analyze(&path("/a/package-lock.json"), b"{ nope", 0o644, false)
            .unwrap_err();

        match err {
            AnalyzeError::Parse { path, format, .. } => {
                assert_eq!(path, "/a/package-lock.json");
                assert_eq!(format, "package-lock.json");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_analyze_not_utf8() {
        let err = LockfileAnalyzer::new()
            .analyze(&path("/a/yarn.lock"), &[0xff, 0xfe, 0x00], 0o644, false)
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::NotUtf8 { .. }));
    }
}
