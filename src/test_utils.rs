#[cfg(test)]
pub mod fixtures {
    use crate::analyzer::{AnalyzeError, Ecosystem, Library, LibraryAnalyzer, LibraryScanner};
    use crate::discovery::{DiscoveryReport, FetchError, FileFetcher, SkippedFile};
    use crate::remote::{ExecResult, RemoteExecutor};
    use crate::scanner::{HostScanResult, Platform};
    use crate::shell::ShellDialect;
    use crate::types::{CanonicalPath, FileHash, Privilege, ServerName};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Executor that answers commands from a script and records every call.
    ///
    /// A rule matches when the command starts with its prefix; the first
    /// matching rule wins. Unmatched commands fail with status 127.
    pub struct ScriptedExecutor {
        rules: Vec<(String, ExecResult)>,
        calls: Mutex<Vec<(String, Privilege)>>,
    }

    impl ScriptedExecutor {
        pub fn new() -> Self {
            Self {
                rules: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn on(mut self, prefix: &str, result: ExecResult) -> Self {
            self.rules.push((prefix.to_string(), result));
            self
        }

        /// A host whose shell answers `uname` and `pwd`.
        pub fn posix(working_directory: &str) -> Self {
            Self::new()
                .on("uname", ExecResult::success("Linux\n"))
                .on("pwd", ExecResult::success(format!("{working_directory}\n")))
        }

        /// A PowerShell host.
        pub fn powershell(working_directory: &str) -> Self {
            Self::new()
                .on("echo $env:OS", ExecResult::success("Windows_NT\r\n"))
                .on(
                    "Get-Location",
                    ExecResult::success(format!("{working_directory}\r\n")),
                )
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls_with_privilege()
                .into_iter()
                .map(|(command, _)| command)
                .collect()
        }

        pub fn calls_with_privilege(&self) -> Vec<(String, Privilege)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RemoteExecutor for ScriptedExecutor {
        fn exec(&self, command: &str, privilege: Privilege) -> ExecResult {
            self.calls
                .lock()
                .unwrap()
                .push((command.to_string(), privilege));
            self.rules
                .iter()
                .find(|(prefix, _)| command.starts_with(prefix.as_str()))
                .map(|(_, result)| result.clone())
                .unwrap_or_else(|| ExecResult::failure(127, "command not found"))
        }

        fn describe(&self) -> String {
            "scripted".to_string()
        }
    }

    /// In-memory file store. Paths missing from the map fail to stat.
    #[derive(Default)]
    pub struct MemoryFetcher {
        files: HashMap<String, (u32, Vec<u8>)>,
        unreadable: Vec<String>,
        stats: Mutex<Vec<String>>,
    }

    impl MemoryFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(mut self, path: &str, content: &str) -> Self {
            self.files
                .insert(path.to_string(), (0o644, content.as_bytes().to_vec()));
            self
        }

        /// A file that stats fine but cannot be read.
        pub fn with_unreadable(mut self, path: &str) -> Self {
            self.files.insert(path.to_string(), (0o000, Vec::new()));
            self.unreadable.push(path.to_string());
            self
        }

        pub fn stat_calls(&self) -> Vec<String> {
            self.stats.lock().unwrap().clone()
        }
    }

    impl FileFetcher for MemoryFetcher {
        fn stat(&self, path: &CanonicalPath) -> Result<u32, FetchError> {
            self.stats.lock().unwrap().push(path.to_string());
            self.files
                .get(path.as_str())
                .map(|(mode, _)| *mode)
                .ok_or_else(|| FetchError::NotFound {
                    path: path.to_string(),
                })
        }

        fn read_all(&self, path: &CanonicalPath) -> Result<Vec<u8>, FetchError> {
            if self.unreadable.iter().any(|p| p == path.as_str()) {
                return Err(FetchError::read_error(
                    path.as_str(),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                ));
            }
            self.files
                .get(path.as_str())
                .map(|(_, content)| content.clone())
                .ok_or_else(|| FetchError::NotFound {
                    path: path.to_string(),
                })
        }
    }

    /// Analyzer that records its calls and returns one empty scanner per file.
    #[derive(Default)]
    pub struct RecordingAnalyzer {
        calls: Mutex<Vec<(String, u32, bool)>>,
        fail_on: Option<String>,
    }

    impl RecordingAnalyzer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(mut self, path: &str) -> Self {
            self.fail_on = Some(path.to_string());
            self
        }

        /// `(path, file_mode, offline)` for every call.
        pub fn calls(&self) -> Vec<(String, u32, bool)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl LibraryAnalyzer for RecordingAnalyzer {
        fn analyze(
            &self,
            path: &CanonicalPath,
            content: &[u8],
            file_mode: u32,
            offline: bool,
        ) -> Result<Vec<LibraryScanner>, AnalyzeError> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_string(), file_mode, offline));
            if self.fail_on.as_deref() == Some(path.as_str()) {
                return Err(AnalyzeError::Parse {
                    path: path.to_string(),
                    format: "test".to_string(),
                    message: "boom".to_string(),
                });
            }
            Ok(vec![LibraryScanner {
                lockfile_path: path.clone(),
                ecosystem: Ecosystem::Unknown,
                libraries: Vec::new(),
                sha256: FileHash::sha256(content),
                file_mode,
                offline,
            }])
        }
    }

    /// A POSIX host with one Cargo.lock of two crates and one skipped file.
    pub fn host_with_report(name: &str) -> HostScanResult {
        let mut result = HostScanResult::new(ServerName::new(name), "localhost");
        result.platform = Some(Platform::other());
        result.report = Some(DiscoveryReport {
            dialect: ShellDialect::Posix,
            working_directory: "/root".to_string(),
            libraries: vec![LibraryScanner {
                lockfile_path: CanonicalPath::new("/srv/app/Cargo.lock"),
                ecosystem: Ecosystem::Cargo,
                libraries: vec![Library::new("serde", "1.0.210"), Library::new("log", "0.4.22")],
                sha256: FileHash::sha256(b"cargo"),
                file_mode: 0o644,
                offline: false,
            }],
            skipped: vec![SkippedFile {
                path: CanonicalPath::new("/srv/old/yarn.lock"),
                reason: "Failed to read file: /srv/old/yarn.lock: denied".to_string(),
            }],
            duplicates: 1,
        });
        result
    }

    /// A host whose lockfile search failed.
    pub fn failed_host(name: &str) -> HostScanResult {
        let mut result = HostScanResult::new(ServerName::new(name), "scanner@10.0.0.9:22")
            .with_error("Failed to find lock files: `find / ...` exited with status 2");
        result.platform = Some(Platform::other());
        result
    }
}
