// Declarative command definitions (TOML or any serde source).
//
// A definition is an ordered `name -> CommandSpec` table; `subcommands`
// nest the same shape. Building materializes the whole tree eagerly.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::argument::Argument;
use super::registry::CommandMap;
use super::Command;
use crate::error::{DefinitionError, RegistryError};

/// Ordered command definitions for one level of the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandTable {
    entries: Vec<(String, CommandSpec)>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandSpec {
    pub aliases: Vec<String>,
    pub arguments: Vec<ArgumentSpec>,
    pub subcommands: CommandTable,
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentSpec {
    pub name: String,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub default_value: Option<String>,
}

fn default_required() -> bool {
    true
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, DefinitionError> {
        Ok(toml::from_str(source)?)
    }

    /// Append a definition. A later definition of the same name replaces the
    /// earlier one when built.
    pub fn insert(&mut self, name: impl Into<String>, spec: CommandSpec) {
        self.entries.push((name.into(), spec));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandSpec)> {
        self.entries.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Materialize the table, and every nested table, into a [`CommandMap`].
    pub fn build(&self) -> Result<CommandMap, RegistryError> {
        let mut map = CommandMap::new();
        for (name, spec) in &self.entries {
            let command = spec.to_command().map_err(|error| RegistryError::nested(name, error))?;
            map.set_command(name.clone(), command)?;
        }
        Ok(map)
    }
}

impl CommandSpec {
    /// Build the command with a no-op handler. Errors come from the
    /// sub-command table only.
    pub fn to_command(&self) -> Result<Command, RegistryError> {
        let mut builder = Command::builder()
            .aliases(self.aliases.iter().cloned())
            .arguments(self.arguments.iter().map(ArgumentSpec::to_argument));

        if !self.subcommands.is_empty() {
            builder = builder.sub(self.subcommands.build()?);
        }
        if let Some(data) = &self.data {
            builder = builder.data(data.clone());
        }

        Ok(builder.build())
    }
}

impl ArgumentSpec {
    pub fn to_argument(&self) -> Argument {
        match (self.required, &self.default_value) {
            (true, Some(_)) => {
                warn!(argument = %self.name, "default_value ignored on required argument");
                Argument::required(&self.name)
            }
            (true, None) => Argument::required(&self.name),
            (false, Some(default)) => Argument::with_default(&self.name, default),
            (false, None) => Argument::optional(&self.name),
        }
    }
}

impl<'de> Deserialize<'de> for CommandTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = CommandTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of command definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = CommandTable::new();
                while let Some((name, spec)) = access.next_entry::<String, CommandSpec>()? {
                    table.insert(name, spec);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::registry::CaseSensitivity::Sensitive;

    const DEFINITIONS: &str = r#"
[zeta]
aliases = ["z"]
arguments = [
    { name = "val" },
    { name = "count", required = false, default_value = "1" },
    { name = "note", required = false },
]
data = { category = "misc" }

[alpha]

[alpha.subcommands.inner]
aliases = ["in"]
"#;

    #[test]
    fn parses_with_defaults() {
        let table = CommandTable::from_toml_str(DEFINITIONS).unwrap();
        let (_, alpha) = table.iter().find(|(name, _)| *name == "alpha").unwrap();
        assert!(alpha.aliases.is_empty());
        assert!(alpha.arguments.is_empty());
        assert!(alpha.data.is_none());
        assert_eq!(alpha.subcommands.len(), 1);

        let (_, zeta) = table.iter().next().unwrap();
        assert!(zeta.arguments[0].required);
        assert_eq!(zeta.arguments[0].default_value, None);
    }

    #[test]
    fn preserves_declaration_order() {
        let map = CommandTable::from_toml_str(DEFINITIONS).unwrap().build().unwrap();
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "z", "alpha"]);
    }

    #[test]
    fn builds_arguments_and_nested_commands() {
        let map = CommandTable::from_toml_str(DEFINITIONS).unwrap().build().unwrap();

        let zeta = map.get("z", Sensitive).unwrap();
        assert_eq!(zeta.arguments(), [
            Argument::required("val"),
            Argument::with_default("count", "1"),
            Argument::optional("note"),
        ]);
        assert_eq!(zeta.data().unwrap()["category"], "misc");

        let sub = map.get("alpha", Sensitive).and_then(Command::sub).unwrap();
        assert!(sub.has_key("in", Sensitive));
    }

    #[test]
    fn required_argument_drops_default() {
        let spec = ArgumentSpec {
            name: "x".into(),
            required: true,
            default_value: Some("1".into()),
        };
        assert_eq!(spec.to_argument(), Argument::required("x"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let error = CommandTable::from_toml_str("[foo]\nalias = [\"f\"]\n").unwrap_err();
        assert!(error.to_string().contains("unknown field `alias`"));
    }

    #[test]
    fn nested_conflict_reports_path() {
        let source = r#"
[foo.subcommands.bar]
aliases = ["b"]

[foo.subcommands.baz]
aliases = ["b"]
"#;
        let error = CommandTable::from_toml_str(source).unwrap().build().unwrap_err();
        assert_eq!(
            error,
            RegistryError::Nested {
                path: "foo".into(),
                source: Box::new(RegistryError::KeyConflict {
                    key: "b".into(),
                    command: "baz".into(),
                    existing: "bar".into(),
                }),
            }
        );
    }

    #[test]
    fn top_level_conflict_is_not_nested() {
        let source = "[foo]\naliases = [\"bar\"]\n\n[bar]\n";
        let error = CommandTable::from_toml_str(source).unwrap().build().unwrap_err();
        assert!(matches!(error, RegistryError::KeyConflict { .. }));
    }

    #[test]
    fn loads_from_json_too() {
        let table: CommandTable = serde_json::from_str(
            r#"{ "ping": { "aliases": ["p"] }, "echo": { "arguments": [{ "name": "text" }] } }"#,
        )
        .unwrap();
        let map = table.build().unwrap();
        assert!(map.has_key("p", Sensitive));
        assert_eq!(map.get("echo", Sensitive).unwrap().arguments().len(), 1);
    }
}
