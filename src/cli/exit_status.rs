use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, every record was stored
/// - `Failure` (1): Command completed but some records were refused
/// - `Error` (2): Command aborted (config error, load error, reset failure, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, every record was stored.
    Success,
    /// Command completed but some records were refused.
    Failure,
    /// Command aborted before completing.
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
