// Path resolution over a command tree.
//
// Each step matches one token against the current level. A sub-command is
// entered only when the next token names one of its commands; otherwise the
// remaining tokens are matched as the current command's arguments.

pub mod result;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::command::argument::{match_arguments, ArgumentMap};
use crate::command::registry::{CaseSensitivity, CommandMap};
use crate::command::spec::CommandTable;
use crate::command::Command;
use crate::error::{DefinitionError, RegistryError, ResolveError};
use crate::input::tokenizer::{tokenize, DEFAULT_QUOTES};
use crate::similarity::rank;

use self::result::LookupResult;

/// Default cap on how many command levels one path may match.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Applies to command names and aliases at every level.
    pub case_sensitive: bool,
    /// Quote characters recognized by [`Resolver::parse`].
    #[serde(alias = "legal_quotes", alias = "valid_quotes")]
    pub quotes: Vec<char>,
    pub max_depth: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self { case_sensitive: true, quotes: DEFAULT_QUOTES.to_vec(), max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl ResolverOptions {
    pub fn case_sensitivity(&self) -> CaseSensitivity {
        CaseSensitivity::from_flag(self.case_sensitive)
    }
}

/// A command tree plus the options used to resolve against it.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    commands: CommandMap,
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(commands: CommandMap) -> Self {
        Self::with_options(commands, ResolverOptions::default())
    }

    pub fn with_options(commands: CommandMap, options: ResolverOptions) -> Self {
        Self { commands, options }
    }

    pub fn from_table(
        table: &CommandTable,
        options: ResolverOptions,
    ) -> Result<Self, RegistryError> {
        Ok(Self::with_options(table.build()?, options))
    }

    pub fn from_toml_str(source: &str, options: ResolverOptions) -> Result<Self, DefinitionError> {
        let table = CommandTable::from_toml_str(source)?;
        Ok(Self::from_table(&table, options)?)
    }

    pub fn commands(&self) -> &CommandMap {
        &self.commands
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn get_command(&self, key: &str) -> Option<&Command> {
        self.commands.get(key, self.options.case_sensitivity())
    }

    pub fn has_command(&self, key: &str) -> bool {
        self.commands.has_key(key, self.options.case_sensitivity())
    }

    pub fn set_command(
        &mut self,
        name: impl Into<String>,
        command: Command,
    ) -> Result<(), RegistryError> {
        self.commands.set_command(name, command)
    }

    /// Tokenize `input` with the configured quotes and resolve it with
    /// argument matching.
    pub fn parse(&self, input: &str) -> Result<LookupResult<'_>, ResolveError> {
        let tokens = tokenize(input, &self.options.quotes);
        self.resolve(&tokens, true)
    }

    /// Resolve `path` against the command tree.
    ///
    /// An empty path is a caller error. Unknown commands and missing
    /// arguments are reported through the returned [`LookupResult`].
    pub fn resolve<S: AsRef<str>>(
        &self,
        path: &[S],
        resolve_arguments: bool,
    ) -> Result<LookupResult<'_>, ResolveError> {
        if path.is_empty() {
            return Err(ResolveError::EmptyPath);
        }
        debug!(tokens = path.len(), resolve_arguments, "resolving command path");

        let case = self.options.case_sensitivity();
        let mut registry = &self.commands;
        let mut path_used = Vec::with_capacity(path.len());
        let mut position = 0;

        loop {
            let current: &str = path[position].as_ref();
            let rest = &path[position + 1..];
            path_used.push(current.to_string());

            let Some((name, command)) = registry.get_entry(current, case) else {
                let similar = rank(current, registry.keys());
                debug!(missing = current, ?similar, "no command matched");
                return Ok(LookupResult::NotFound {
                    missing: current.to_string(),
                    similar,
                    path_used,
                    path_dangling: to_owned(rest),
                });
            };

            if let (Some(next), Some(sub)) = (rest.first(), command.sub()) {
                let next: &str = next.as_ref();
                if sub.has_key(next, case) {
                    if path_used.len() >= self.options.max_depth {
                        return Err(ResolveError::DepthExceeded { limit: self.options.max_depth });
                    }
                    trace!(command = name, next, "descending into sub-commands");
                    registry = sub;
                    position += 1;
                    continue;
                }
            }

            if !resolve_arguments || command.arguments().is_empty() {
                debug!(command = name, dangling = rest.len(), "command matched");
                return Ok(LookupResult::Success {
                    name,
                    command,
                    path_used,
                    path_dangling: to_owned(rest),
                    arguments: ArgumentMap::new(),
                });
            }

            let matched = match_arguments(command.arguments(), rest);
            if !matched.is_complete() {
                debug!(
                    command = name,
                    missing = matched.missing.len(),
                    "required arguments missing"
                );
                return Ok(LookupResult::MissingArguments {
                    name,
                    command,
                    missing: matched.missing,
                    path_used,
                    path_dangling: to_owned(rest),
                });
            }

            debug!(command = name, arguments = matched.resolved.len(), "command matched");
            return Ok(LookupResult::Success {
                name,
                command,
                path_used,
                path_dangling: to_owned(rest),
                arguments: matched.resolved,
            });
        }
    }
}

fn to_owned<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens.iter().map(|token| token.as_ref().to_string()).collect()
}
