// Construction-time and caller-contract errors.
//
// Unknown commands and missing arguments are not errors: they come back as
// `LookupResult` variants.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command name is empty")]
    EmptyName,

    #[error("command `{command}` declares an empty alias")]
    EmptyAlias { command: String },

    #[error("command `{command}` declares argument `{argument}` more than once")]
    DuplicateArgument { command: String, argument: String },

    #[error("key `{key}` of command `{command}` is already taken by command `{existing}`")]
    KeyConflict { key: String, command: String, existing: String },

    #[error("in sub-commands of `{path}`: {source}")]
    Nested {
        path: String,
        #[source]
        source: Box<RegistryError>,
    },
}

impl RegistryError {
    /// Wrap an error raised while building the sub-commands of `parent`.
    pub fn nested(parent: &str, source: RegistryError) -> Self {
        match source {
            Self::Nested { path, source } => {
                Self::Nested { path: format!("{parent}.{path}"), source }
            }
            other => Self::Nested { path: parent.to_string(), source: Box::new(other) },
        }
    }

    /// The innermost error, with nesting stripped.
    pub fn root_cause(&self) -> &RegistryError {
        match self {
            Self::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("lookup path is empty")]
    EmptyPath,

    #[error("lookup path descends more than {limit} command levels")]
    DepthExceeded { limit: usize },
}

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("invalid command definitions: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
