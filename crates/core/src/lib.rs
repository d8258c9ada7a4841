// cmdpath-core: command tree lookup, argument matching and input tokenizing.

pub mod command;
pub mod error;
pub mod input;
pub mod lookup;
pub mod similarity;

pub use command::argument::{match_arguments, Argument, ArgumentMap, ArgumentMatch};
pub use command::registry::{CaseSensitivity, CommandMap};
pub use command::spec::{ArgumentSpec, CommandSpec, CommandTable};
pub use command::{Command, CommandBuilder, Handler};
pub use error::{DefinitionError, RegistryError, ResolveError};
pub use input::tokenizer::{tokenize, DEFAULT_QUOTES};
pub use lookup::result::LookupResult;
pub use lookup::{Resolver, ResolverOptions};
pub use similarity::{levenshtein, rank};
