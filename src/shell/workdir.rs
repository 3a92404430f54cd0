use super::ShellDialect;
use crate::remote::RemoteExecutor;
use crate::types::Privilege;
use tracing::{debug, warn};

const POSIX_PWD: &str = "pwd";
const POWERSHELL_PWD: &str = "Get-Location | Select-Object -ExpandProperty Path";

fn location_command(dialect: ShellDialect) -> String {
    match dialect {
        ShellDialect::Posix | ShellDialect::Unknown => POSIX_PWD.to_string(),
        ShellDialect::PowerShell => POWERSHELL_PWD.to_string(),
        ShellDialect::CmdExe => {
            format!("powershell.exe -NoProfile -NonInteractive \"{POWERSHELL_PWD}\"")
        }
    }
}

/// Asks the host for its current directory.
///
/// Falls back to the dialect root when the command fails or prints nothing.
pub fn resolve_working_directory(executor: &dyn RemoteExecutor, dialect: ShellDialect) -> String {
    let command = location_command(dialect);
    let result = executor.exec(&command, Privilege::Normal);

    if result.is_success() {
        let wd = result.stdout.trim();
        if !wd.is_empty() {
            debug!(working_directory = wd, "Resolved working directory");
            return wd.to_string();
        }
    }

    warn!(
        command = %command,
        exit_status = result.exit_status,
        fallback = dialect.root(),
        "Working directory query failed, using root"
    );
    dialect.root().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::ExecResult;
    use crate::test_utils::fixtures::ScriptedExecutor;

    #[test]
    fn test_location_commands() {
        assert_eq!(location_command(ShellDialect::Posix), "pwd");
        assert_eq!(location_command(ShellDialect::Unknown), "pwd");
        assert_eq!(
            location_command(ShellDialect::PowerShell),
            "Get-Location | Select-Object -ExpandProperty Path"
        );
        assert_eq!(
            location_command(ShellDialect::CmdExe),
            "powershell.exe -NoProfile -NonInteractive \"Get-Location | Select-Object -ExpandProperty Path\""
        );
    }

    #[test]
    fn test_output_is_trimmed() {
        let executor = ScriptedExecutor::new().on("pwd", ExecResult::success("/home/u\n"));
        assert_eq!(
            resolve_working_directory(&executor, ShellDialect::Posix),
            "/home/u"
        );

        let executor = ScriptedExecutor::new()
            .on("Get-Location", ExecResult::success("C:\\Users\\u\r\n"));
        assert_eq!(
            resolve_working_directory(&executor, ShellDialect::PowerShell),
            "C:\\Users\\u"
        );
    }

    #[test]
    fn test_failed_query_falls_back_to_root() {
        let executor = ScriptedExecutor::new();
        assert_eq!(resolve_working_directory(&executor, ShellDialect::Posix), "/");
        assert_eq!(
            resolve_working_directory(&executor, ShellDialect::CmdExe),
            "C:\\"
        );
    }

    #[test]
    fn test_empty_output_falls_back_to_root() {
        let executor = ScriptedExecutor::new().on("pwd", ExecResult::success("  \n"));
        assert_eq!(
            resolve_working_directory(&executor, ShellDialect::Unknown),
            "/"
        );
    }
}
