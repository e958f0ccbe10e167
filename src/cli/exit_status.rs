use std::process::ExitCode;

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): Command completed, nothing to gate on
/// - `Failure` (1): Validation found missing keys or empty values
/// - `Error` (2): Hard failure (unreadable config, malformed catalog, failed write)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, nothing to gate on.
    Success,
    /// Validation found missing keys or empty values.
    Failure,
    /// Hard failure (unreadable config, malformed catalog, failed write).
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
