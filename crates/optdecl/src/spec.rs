//! Option specs in their textual and serialized forms.
//!
//! The textual form is `short|long[=arg]|description`, e.g.
//! `-o|--option=title:|A required-argument option.`; either flag may be blank.
//! The serialized form is what JSON option tables contain.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arity::Arity;
use crate::error::Error;

/// One option as declared by the caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Argument spec (`title:`); may instead be embedded in `long` as `--long=title:`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl OptionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn short(mut self, flag: impl Into<String>) -> Self {
        self.short = Some(flag.into());
        self
    }

    pub fn long(mut self, flag: impl Into<String>) -> Self {
        self.long = Some(flag.into());
        self
    }

    /// Declare the value placeholder and arity without writing colons by hand.
    pub fn arg(mut self, name: &str, arity: Arity) -> Self {
        self.arg = Some(format!("{name}{}", ":".repeat(arity.colons())));
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl FromStr for OptionSpec {
    type Err = Error;

    /// The description is everything after the second `|` and may itself contain `|`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '|');
        let short = parts.next().and_then(non_blank);
        let long = parts.next().and_then(non_blank);
        let description = parts.next().unwrap_or_default().trim().to_string();
        if short.is_none() && long.is_none() {
            return Err(Error::EmptyFlag(s.to_string()));
        }
        Ok(Self {
            short,
            long,
            arg: None,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_spec_string() {
        let spec: OptionSpec = "-o|--option=title:|A required-argument option."
            .parse()
            .unwrap();
        assert_eq!(spec.short.as_deref(), Some("-o"));
        assert_eq!(spec.long.as_deref(), Some("--option=title:"));
        assert_eq!(spec.description, "A required-argument option.");
    }

    #[test]
    fn blank_short_is_absent() {
        let spec: OptionSpec = "  |--flag|No short form.".parse().unwrap();
        assert_eq!(spec.short, None);
        assert_eq!(spec.long.as_deref(), Some("--flag"));
    }

    #[test]
    fn description_keeps_pipes() {
        let spec: OptionSpec = "-s|--sep|Split on | or ,".parse().unwrap();
        assert_eq!(spec.description, "Split on | or ,");
    }

    #[test]
    fn both_flags_blank_is_an_error() {
        let err = " | |nothing".parse::<OptionSpec>().unwrap_err();
        assert!(matches!(err, Error::EmptyFlag(_)));
    }

    #[test]
    fn builder_writes_colon_notation() {
        let spec = OptionSpec::new()
            .short("-t")
            .long("--things")
            .arg("title", Arity::List)
            .description("List argument.");
        assert_eq!(spec.arg.as_deref(), Some("title:::"));
    }

    #[test]
    fn deserializes_from_json_table_entry() {
        let spec: OptionSpec = serde_json::from_str(
            r#"{"short": "-s", "long": "--stuff", "arg": "title::", "description": "Optional."}"#,
        )
        .unwrap();
        assert_eq!(spec.arg.as_deref(), Some("title::"));
        assert_eq!(spec.description, "Optional.");
    }
}
