//! Process exit codes.

/// Exit codes returned by the `metamap` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    PreconditionUnmet = 3,
    ConfigError = 4,
    IoError = 5,
    InvalidData = 6,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}
