//! Output handling for the CLI.
//!
//! This module provides:
//! - Process exit codes
//! - The JSON result envelope printed with `--json`

pub mod envelope;
pub mod exit_code;

pub use envelope::{Envelope, Meta, ResultCode, SCHEMA_VERSION, Status};
pub use exit_code::ExitCode;
