use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): every input was extracted and every reference resolved
/// - `Failure` (1): the run finished with error issues or unresolved references
/// - `Error` (2): the command could not run (config error, IO error, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
