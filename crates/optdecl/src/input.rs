//! Parse results and their retrieval.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Textual form of a flag that was given without a value.
pub const SET_MARKER: &str = "true";

/// Separator used when a list value is rendered as one string.
pub const LIST_SEPARATOR: char = '|';

/// A resolved option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The option was present without a value.
    Set,
    Single(String),
    List(Vec<String>),
}

impl Value {
    /// Whether this is the bare "present" marker.
    pub fn is_set_marker(&self) -> bool {
        matches!(self, Self::Set)
    }

    /// The individual values carried, empty for [`Value::Set`].
    pub fn items(&self) -> Vec<&str> {
        match self {
            Self::Set => Vec::new(),
            Self::Single(s) => vec![s.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Single value, or `None` for the set marker.
    ///
    /// Lists answer with their first item.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Set => None,
            Self::Single(s) => Some(s),
            Self::List(items) => items.first().map(String::as_str),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => f.write_str(SET_MARKER),
            Self::Single(s) => f.write_str(s),
            Self::List(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, "{LIST_SEPARATOR}")?;
                    }
                    f.write_str(item)?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Set => serializer.serialize_bool(true),
            Self::Single(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

/// Values resolved by one parse, keyed by canonical flag.
///
/// Carries a copy of the alias index so short flags can be used for lookup
/// without going back to the option table.
#[derive(Debug, Clone, Default)]
pub struct ParsedInput {
    values: IndexMap<String, Value>,
    aliases: HashMap<String, String>,
}

impl ParsedInput {
    pub(crate) fn new(aliases: HashMap<String, String>) -> Self {
        Self {
            values: IndexMap::new(),
            aliases,
        }
    }

    /// Record a value; a repeated option keeps its first position but the last value.
    pub(crate) fn insert(&mut self, canonical: &str, value: Value) {
        self.values.insert(canonical.to_string(), value);
    }

    /// Look up by exact flag text (`--option`, `-o`), resolving short aliases.
    pub fn get(&self, flag: &str) -> Result<&Value> {
        if let Some(value) = self.values.get(flag) {
            return Ok(value);
        }
        self.aliases
            .get(flag)
            .and_then(|canonical| self.values.get(canonical))
            .ok_or_else(|| Error::NotFound(flag.to_string()))
    }

    /// Look up by bare name, trying `--name` and then `-name`.
    pub fn get_guessed(&self, name: &str) -> Result<&Value> {
        if name.starts_with('-') {
            return Err(Error::InvalidQuery(name.to_string()));
        }
        ["--", "-"]
            .iter()
            .find_map(|prefix| self.get(&format!("{prefix}{name}")).ok())
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Whether the option named `name` (bare) was supplied at all.
    pub fn is_present(&self, name: &str) -> bool {
        self.get_guessed(name).is_ok()
    }

    /// Individual values of a bare-named option; list values are split.
    pub fn values(&self, name: &str) -> Result<Vec<&str>> {
        self.get_guessed(name).map(Value::items)
    }

    /// Parsed entries in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for ParsedInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.values
                .iter()
                .map(|(flag, value)| (flag.trim_start_matches('-'), value)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedInput {
        let aliases = HashMap::from([("-o".to_string(), "--option".to_string())]);
        let mut input = ParsedInput::new(aliases);
        input.insert("--option", Value::Single("val".to_string()));
        input.insert("-x", Value::Set);
        input.insert(
            "--things",
            Value::List(vec!["a".to_string(), "b".to_string()]),
        );
        input
    }

    #[test]
    fn display_uses_marker_and_separator() {
        assert_eq!(Value::Set.to_string(), SET_MARKER);
        assert_eq!(Value::Single("x".to_string()).to_string(), "x");
        let list = Value::List(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(list.to_string(), "a|b|c");
    }

    #[test]
    fn get_resolves_alias() {
        let input = sample();
        assert_eq!(input.get("--option").unwrap().to_string(), "val");
        assert_eq!(input.get("-o").unwrap().to_string(), "val");
        assert_eq!(
            input.get("--nope").unwrap_err(),
            Error::NotFound("--nope".to_string())
        );
    }

    #[test]
    fn guessed_tries_long_then_short() {
        let input = sample();
        assert_eq!(input.get_guessed("option").unwrap().to_string(), "val");
        assert!(input.get_guessed("x").unwrap().is_set_marker());
        assert_eq!(
            input.get_guessed("missing").unwrap_err(),
            Error::NotFound("missing".to_string())
        );
    }

    #[test]
    fn guessed_rejects_dashed_names() {
        let input = sample();
        assert_eq!(
            input.get_guessed("--option").unwrap_err(),
            Error::InvalidQuery("--option".to_string())
        );
    }

    #[test]
    fn retrieval_does_not_mutate() {
        let input = sample();
        let first = input.get_guessed("things").unwrap().clone();
        let second = input.get_guessed("things").unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(input.values("things").unwrap(), vec!["a", "b"]);
        assert_eq!(input.len(), 3);
    }

    #[test]
    fn repeated_insert_keeps_position_and_last_value() {
        let mut input = sample();
        input.insert("--option", Value::Single("again".to_string()));
        let keys: Vec<&str> = input.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["--option", "-x", "--things"]);
        assert_eq!(input.get("--option").unwrap().to_string(), "again");
    }
}
