// One level of the command tree: canonical entries plus the aliased view.
//
// The aliased view maps every canonical name and alias to the position of
// its command in `entries`. It is derived state, rebuilt in full whenever an
// entry changes, and every key in it is unique.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Command;
use crate::error::RegistryError;

/// Case policy for command-name and alias lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    pub fn from_flag(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::Sensitive
        } else {
            Self::Insensitive
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandMap {
    /// Canonical `(name, command)` pairs in insertion order.
    entries: Vec<(String, Command)>,
    /// Aliased view keys in insertion order: each name followed by its aliases.
    view: Vec<(String, usize)>,
    /// Exact-key index over `view`.
    index: HashMap<String, usize>,
}

impl CommandMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining form of [`CommandMap::set_command`].
    pub fn with_command(
        mut self,
        name: impl Into<String>,
        command: Command,
    ) -> Result<Self, RegistryError> {
        self.set_command(name, command)?;
        Ok(self)
    }

    /// Insert or replace the command registered as `name`.
    ///
    /// A replaced command keeps its original position. If any key of the
    /// rebuilt aliased view collides, the map is left exactly as it was.
    pub fn set_command(
        &mut self,
        name: impl Into<String>,
        command: Command,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        validate(&name, &command)?;

        let position = self.entries.iter().position(|(existing, _)| *existing == name);
        let replaced = match position {
            Some(position) => Some(std::mem::replace(&mut self.entries[position].1, command)),
            None => {
                self.entries.push((name, command));
                None
            }
        };

        match build_view(&self.entries) {
            Ok((view, index)) => {
                self.view = view;
                self.index = index;
                Ok(())
            }
            Err(error) => {
                match (position, replaced) {
                    (Some(position), Some(previous)) => self.entries[position].1 = previous,
                    _ => {
                        self.entries.pop();
                    }
                }
                Err(error)
            }
        }
    }

    pub fn has_key(&self, key: &str, case: CaseSensitivity) -> bool {
        self.position(key, case).is_some()
    }

    pub fn get(&self, key: &str, case: CaseSensitivity) -> Option<&Command> {
        self.get_entry(key, case).map(|(_, command)| command)
    }

    /// Look up `key` and return the canonical name alongside the command.
    pub fn get_entry(&self, key: &str, case: CaseSensitivity) -> Option<(&str, &Command)> {
        self.position(key, case).map(|position| {
            let (name, command) = &self.entries[position];
            (name.as_str(), command)
        })
    }

    /// Every key of the aliased view: names and aliases, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.view.iter().map(|(key, _)| key.as_str())
    }

    /// Canonical names only, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Command)> {
        self.entries.iter().map(|(name, command)| (name.as_str(), command))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str, case: CaseSensitivity) -> Option<usize> {
        match case {
            CaseSensitivity::Sensitive => self.index.get(key).copied(),
            CaseSensitivity::Insensitive => self.position_ignoring_case(key),
        }
    }

    fn position_ignoring_case(&self, key: &str) -> Option<usize> {
        let needle = key.to_lowercase();
        let mut matches =
            self.view.iter().filter(|(candidate, _)| candidate.to_lowercase() == needle);

        let (first_key, first) = matches.next()?;
        if let Some((other_key, _)) = matches.find(|(_, position)| position != first) {
            warn!(
                key,
                selected = %first_key,
                ignored = %other_key,
                "case-insensitive lookup matched several commands; using the first"
            );
        }
        Some(*first)
    }
}

fn validate(name: &str, command: &Command) -> Result<(), RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::EmptyName);
    }
    if command.aliases().iter().any(String::is_empty) {
        return Err(RegistryError::EmptyAlias { command: name.to_string() });
    }

    let arguments = command.arguments();
    for (index, argument) in arguments.iter().enumerate() {
        if arguments[..index].iter().any(|earlier| earlier.name() == argument.name()) {
            return Err(RegistryError::DuplicateArgument {
                command: name.to_string(),
                argument: argument.name().to_string(),
            });
        }
    }

    Ok(())
}

fn build_view(
    entries: &[(String, Command)],
) -> Result<(Vec<(String, usize)>, HashMap<String, usize>), RegistryError> {
    let mut view = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (position, (name, command)) in entries.iter().enumerate() {
        let keys = std::iter::once(name).chain(command.aliases());
        for key in keys {
            if let Some(&existing) = index.get(key.as_str()) {
                return Err(RegistryError::KeyConflict {
                    key: key.clone(),
                    command: name.clone(),
                    existing: entries[existing].0.clone(),
                });
            }
            index.insert(key.clone(), position);
            view.push((key.clone(), position));
        }
    }

    Ok((view, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::argument::Argument;

    use CaseSensitivity::{Insensitive, Sensitive};

    fn with_alias(alias: &str) -> Command {
        Command::builder().alias(alias).build()
    }

    fn sample() -> CommandMap {
        CommandMap::new()
            .with_command("foo", with_alias("fizz"))
            .unwrap()
            .with_command("bar", with_alias("baa"))
            .unwrap()
    }

    // ── lookup ───────────────────────────────────────────────────────

    #[test]
    fn finds_names_and_aliases() {
        let map = sample();
        assert!(map.has_key("foo", Sensitive));
        assert!(map.has_key("fizz", Sensitive));
        assert!(map.has_key("baa", Sensitive));
        assert!(!map.has_key("nope", Sensitive));
    }

    #[test]
    fn alias_resolves_to_canonical_entry() {
        let map = sample();
        let (name, command) = map.get_entry("fizz", Sensitive).unwrap();
        assert_eq!(name, "foo");
        assert_eq!(command, map.get("foo", Sensitive).unwrap());
    }

    #[test]
    fn case_sensitive_lookup_is_exact() {
        let map = sample();
        assert!(!map.has_key("FoO", Sensitive));
        assert!(map.get("FIZZ", Sensitive).is_none());
    }

    #[test]
    fn case_insensitive_lookup_folds_case() {
        let map = sample();
        assert!(map.has_key("FoO", Insensitive));
        assert_eq!(map.get_entry("FIZZ", Insensitive).map(|(name, _)| name), Some("foo"));
        assert!(!map.has_key("FOOB", Insensitive));
    }

    #[test]
    fn case_insensitive_ties_pick_insertion_order() {
        let map = CommandMap::new()
            .with_command("Stop", Command::new())
            .unwrap()
            .with_command("stop", Command::new())
            .unwrap();
        assert_eq!(map.get_entry("STOP", Insensitive).map(|(name, _)| name), Some("Stop"));
        assert_eq!(map.get_entry("stop", Sensitive).map(|(name, _)| name), Some("stop"));
    }

    #[test]
    fn keys_list_aliased_view_in_order() {
        let map = sample();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["foo", "fizz", "bar", "baa"]);
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["foo", "bar"]);
        assert_eq!(map.len(), 2);
    }

    // ── set_command ──────────────────────────────────────────────────

    #[test]
    fn replacing_keeps_position_and_rebuilds_aliases() {
        let mut map = sample();
        map.set_command("foo", with_alias("f")).unwrap();

        assert_eq!(map.names().collect::<Vec<_>>(), vec!["foo", "bar"]);
        assert!(map.has_key("f", Sensitive));
        assert!(!map.has_key("fizz", Sensitive));
    }

    #[test]
    fn alias_conflict_is_rejected() {
        let mut map = sample();
        let error = map.set_command("qux", with_alias("fizz")).unwrap_err();
        assert_eq!(
            error,
            RegistryError::KeyConflict {
                key: "fizz".into(),
                command: "qux".into(),
                existing: "foo".into(),
            }
        );
    }

    #[test]
    fn name_conflicting_with_alias_is_rejected() {
        let mut map = sample();
        let error = map.set_command("baa", Command::new()).unwrap_err();
        assert!(matches!(error, RegistryError::KeyConflict { ref key, .. } if key == "baa"));
    }

    #[test]
    fn alias_repeating_own_name_is_rejected() {
        let error = CommandMap::new().with_command("foo", with_alias("foo")).unwrap_err();
        assert!(matches!(
            error,
            RegistryError::KeyConflict { ref existing, .. } if existing == "foo"
        ));
    }

    #[test]
    fn failed_insert_leaves_map_unchanged() {
        let mut map = sample();
        let before = map.clone();
        assert!(map.set_command("qux", with_alias("baa")).is_err());
        assert_eq!(map, before);
    }

    #[test]
    fn failed_replace_restores_previous_command() {
        let mut map = sample();
        let before = map.clone();
        assert!(map.set_command("foo", with_alias("bar")).is_err());
        assert_eq!(map, before);
        assert!(map.has_key("fizz", Sensitive));
    }

    #[test]
    fn rejects_empty_name_and_alias() {
        let mut map = CommandMap::new();
        assert_eq!(map.set_command("", Command::new()), Err(RegistryError::EmptyName));
        assert_eq!(
            map.set_command("foo", with_alias("")),
            Err(RegistryError::EmptyAlias { command: "foo".into() })
        );
        assert!(map.is_empty());
    }

    #[test]
    fn rejects_duplicate_argument_names() {
        let command = Command::builder()
            .argument(Argument::required("val"))
            .argument(Argument::optional("val"))
            .build();
        assert_eq!(
            CommandMap::new().with_command("foo", command).unwrap_err(),
            RegistryError::DuplicateArgument { command: "foo".into(), argument: "val".into() }
        );
    }
}
