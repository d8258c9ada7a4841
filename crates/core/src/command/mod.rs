// Command values and their builder.

pub mod argument;
pub mod registry;
pub mod spec;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use self::argument::{Argument, ArgumentMap};
use self::registry::CommandMap;

/// Callable attached to a command. Resolution never calls it; invoking the
/// matched command is up to the caller.
pub type Handler = Arc<dyn Fn(&ArgumentMap) + Send + Sync>;

fn noop_handler() -> Handler {
    Arc::new(|_: &ArgumentMap| {})
}

/// A command: aliases, positional arguments and optional sub-commands.
///
/// The canonical name is not stored here; it is the key the command is
/// registered under in its [`CommandMap`].
#[derive(Clone)]
pub struct Command {
    handler: Handler,
    aliases: Vec<String>,
    arguments: Vec<Argument>,
    sub: Option<CommandMap>,
    data: Option<Value>,
}

impl Command {
    /// A command with no aliases, arguments or sub-commands.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> CommandBuilder {
        CommandBuilder::default()
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn sub(&self) -> Option<&CommandMap> {
        self.sub.as_ref()
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Call the handler with resolved arguments.
    pub fn invoke(&self, arguments: &ArgumentMap) {
        (self.handler)(arguments)
    }

    /// One-line usage for this command registered under `name`, e.g.
    /// `remind <when> [note]`.
    pub fn usage(&self, name: &str) -> String {
        std::iter::once(name.to_string())
            .chain(self.arguments.iter().map(Argument::usage))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("aliases", &self.aliases)
            .field("arguments", &self.arguments)
            .field("sub", &self.sub)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// Handlers compare by identity.
impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
            && self.aliases == other.aliases
            && self.arguments == other.arguments
            && self.sub == other.sub
            && self.data == other.data
    }
}

/// Builds a fully populated [`Command`]. Unset fields take their defaults:
/// no-op handler, no aliases, no arguments, no sub-commands, no data.
#[derive(Default)]
pub struct CommandBuilder {
    handler: Option<Handler>,
    aliases: Vec<String>,
    arguments: Vec<Argument>,
    sub: Option<CommandMap>,
    data: Option<Value>,
}

impl CommandBuilder {
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ArgumentMap) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn arguments(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    pub fn sub(mut self, sub: CommandMap) -> Self {
        self.sub = Some(sub);
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn build(self) -> Command {
        Command {
            handler: self.handler.unwrap_or_else(noop_handler),
            aliases: self.aliases,
            arguments: self.arguments,
            sub: self.sub,
            data: self.data,
        }
    }
}
