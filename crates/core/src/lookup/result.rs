use crate::command::argument::{Argument, ArgumentMap};
use crate::command::Command;

/// Outcome of resolving a path against a command tree.
///
/// Every variant records the tokens consumed (`path_used`) and the tokens
/// after the last matched command (`path_dangling`). Tokens bound as
/// argument values stay in `path_dangling`.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult<'a> {
    Success {
        /// Canonical name of the matched command.
        name: &'a str,
        command: &'a Command,
        path_used: Vec<String>,
        path_dangling: Vec<String>,
        arguments: ArgumentMap,
    },
    NotFound {
        /// The token that matched no command at its level.
        missing: String,
        /// Keys at that level with the smallest edit distance to `missing`.
        similar: Vec<String>,
        path_used: Vec<String>,
        path_dangling: Vec<String>,
    },
    MissingArguments {
        name: &'a str,
        command: &'a Command,
        /// Every required argument without a value, in declaration order.
        missing: Vec<Argument>,
        path_used: Vec<String>,
        path_dangling: Vec<String>,
    },
}

impl<'a> LookupResult<'a> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn path_used(&self) -> &[String] {
        match self {
            Self::Success { path_used, .. }
            | Self::NotFound { path_used, .. }
            | Self::MissingArguments { path_used, .. } => path_used,
        }
    }

    pub fn path_dangling(&self) -> &[String] {
        match self {
            Self::Success { path_dangling, .. }
            | Self::NotFound { path_dangling, .. }
            | Self::MissingArguments { path_dangling, .. } => path_dangling,
        }
    }

    /// The matched command, when resolution got as far as one.
    pub fn command(&self) -> Option<(&'a str, &'a Command)> {
        match self {
            Self::Success { name, command, .. } | Self::MissingArguments { name, command, .. } => {
                Some((*name, *command))
            }
            Self::NotFound { .. } => None,
        }
    }

    pub fn arguments(&self) -> Option<&ArgumentMap> {
        match self {
            Self::Success { arguments, .. } => Some(arguments),
            _ => None,
        }
    }
}
