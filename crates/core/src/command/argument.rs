// Positional argument declarations and matching.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A declared positional argument of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    required: bool,
    default_value: Option<String>,
}

impl Argument {
    pub fn required(name: impl Into<String>) -> Self {
        Self { name: name.into(), required: true, default_value: None }
    }

    /// An optional argument that resolves to the absent marker when omitted.
    pub fn optional(name: impl Into<String>) -> Self {
        Self { name: name.into(), required: false, default_value: None }
    }

    pub fn with_default(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self { name: name.into(), required: false, default_value: Some(default_value.into()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Usage fragment: `<name>` when required, `[name]` or `[name=default]`
    /// when optional.
    pub fn usage(&self) -> String {
        match (self.required, &self.default_value) {
            (true, _) => format!("<{}>", self.name),
            (false, Some(default)) => format!("[{}={default}]", self.name),
            (false, None) => format!("[{}]", self.name),
        }
    }
}

/// Resolved argument values in declaration order.
///
/// A `None` value marks an optional argument that was neither provided nor
/// defaulted. It is still present as a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMap {
    entries: Vec<(String, Option<String>)>,
}

impl ArgumentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing an earlier binding of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// The bound value, or `None` when the name is unbound or bound to the
    /// absent marker.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Whether `name` is bound at all, including to the absent marker.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_deref()))
    }
}

impl Serialize for ArgumentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Outcome of aligning declared arguments with provided tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMatch {
    pub resolved: ArgumentMap,
    /// Required arguments with no provided value, in declaration order.
    pub missing: Vec<Argument>,
}

impl ArgumentMatch {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Bind provided tokens to expected arguments index-for-index.
///
/// Tokens beyond the declared arguments are ignored here; the resolver
/// reports them as dangling.
pub fn match_arguments<S: AsRef<str>>(expected: &[Argument], provided: &[S]) -> ArgumentMatch {
    let mut result = ArgumentMatch::default();

    for (index, argument) in expected.iter().enumerate() {
        if let Some(token) = provided.get(index) {
            result.resolved.insert(argument.name(), Some(token.as_ref().to_string()));
        } else if !argument.is_required() {
            result.resolved.insert(argument.name(), argument.default_value.clone());
        } else {
            result.missing.push(argument.clone());
        }
    }

    result
}
