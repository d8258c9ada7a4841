// Consistent exit codes for the cmdpath CLI.
//
//   0 = every input resolved to a command
//   1 = general error
//   2 = usage error (e.g. empty input)
//   3 = unknown command
//   4 = missing required arguments
//   5 = command definitions or config could not be loaded

use std::process;

use cmdpath_core::{DefinitionError, RegistryError, ResolveError};

use crate::config::ConfigError;

/// Named exit codes for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    Usage = 2,
    NotFound = 3,
    MissingArguments = 4,
    Definitions = 5,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Map an anyhow error to an exit code by inspecting the error chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.downcast_ref::<ResolveError>().is_some() {
                return Self::Usage;
            }
            if cause.downcast_ref::<DefinitionError>().is_some()
                || cause.downcast_ref::<RegistryError>().is_some()
                || cause.downcast_ref::<ConfigError>().is_some()
            {
                return Self::Definitions;
            }
        }
        Self::Error
    }

    /// Keep the first failure seen across several resolutions.
    pub fn combine(self, next: Self) -> Self {
        if self == Self::Success {
            next
        } else {
            self
        }
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code.code() as u8)
    }
}
