//! Argument arity: how many value tokens an option takes and how they are found.
//!
//! Arity is written as a run of trailing colons after the argument placeholder
//! (`title`, `title:`, `title::`, `title:::`). Long options are self-delimiting
//! (`--name=value`), while short options look ahead at the following tokens.

use std::fmt;

use crate::error::{Error, Result};
use crate::input::Value;

/// Number of values an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Arity {
    /// Plain flag, no value.
    #[default]
    None,
    /// Exactly one value.
    Required,
    /// Zero or one value.
    Optional,
    /// One or more values.
    List,
}

impl Arity {
    /// Classify a trailing colon count; anything outside 0..=3 is `InvalidArity`.
    pub fn from_colons(colons: usize) -> Result<Self> {
        match colons {
            0 => Ok(Self::None),
            1 => Ok(Self::Required),
            2 => Ok(Self::Optional),
            3 => Ok(Self::List),
            _ => Err(Error::InvalidArity {
                spec: ":".repeat(colons),
                colons,
            }),
        }
    }

    pub fn colons(self) -> usize {
        match self {
            Self::None => 0,
            Self::Required => 1,
            Self::Optional => 2,
            Self::List => 3,
        }
    }

    pub fn takes_value(self) -> bool {
        self != Self::None
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Required => "required",
            Self::Optional => "optional",
            Self::List => "list",
        };
        f.write_str(s)
    }
}

/// Split an argument spec such as `title::` into its placeholder and arity.
///
/// An empty placeholder (`""`, `":"`) yields `None` for the name.
pub fn parse_arg_spec(spec: &str) -> Result<(Option<String>, Arity)> {
    let trimmed = spec.trim();
    let name = trimmed.trim_end_matches(':');
    let colons = trimmed.len() - name.len();
    let arity = Arity::from_colons(colons).map_err(|_| Error::InvalidArity {
        spec: trimmed.to_string(),
        colons,
    })?;
    let name = (!name.is_empty()).then(|| name.to_string());
    Ok((name, arity))
}

/// Result of applying an arity rule at one option token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumed {
    pub value: Value,
    /// Value tokens taken from `rest` (the option token itself is not counted).
    pub tokens: usize,
}

impl Consumed {
    fn inline(value: Value) -> Self {
        Self { value, tokens: 0 }
    }
}

/// Apply the consumption rule for `arity`.
///
/// `flag` is the option token without any `=value` suffix, `embedded` is that
/// suffix if one was given, and `rest` holds the tokens after the option.
/// `is_option` answers whether a token names a registered option; a token for
/// which it returns true is never taken as a value.
pub fn consume<S, F>(
    arity: Arity,
    flag: &str,
    embedded: Option<&str>,
    rest: &[S],
    is_option: F,
) -> Result<Consumed>
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    let long = flag.starts_with("--");
    let next = rest
        .first()
        .map(|s| s.as_ref())
        .filter(|&tok| !is_option(tok));

    match arity {
        Arity::None => match embedded {
            Some(_) => Err(Error::UnexpectedValue(flag.to_string())),
            None => Ok(Consumed::inline(Value::Set)),
        },
        Arity::Required => {
            if let Some(value) = embedded {
                return Ok(Consumed::inline(Value::Single(value.to_string())));
            }
            let value = next.ok_or_else(|| Error::MissingArgument(flag.to_string()))?;
            Ok(Consumed {
                value: Value::Single(value.to_string()),
                tokens: 1,
            })
        }
        Arity::Optional => {
            if let Some(value) = embedded {
                return Ok(Consumed::inline(Value::Single(value.to_string())));
            }
            match next {
                Some(value) if !long => Ok(Consumed {
                    value: Value::Single(value.to_string()),
                    tokens: 1,
                }),
                _ => Ok(Consumed::inline(Value::Set)),
            }
        }
        Arity::List => {
            if long {
                let value = embedded.ok_or_else(|| Error::MissingArgument(flag.to_string()))?;
                return Ok(Consumed::inline(Value::List(vec![value.to_string()])));
            }
            let items: Vec<String> = rest
                .iter()
                .map(|s| s.as_ref())
                .take_while(|&tok| !is_option(tok))
                .map(str::to_string)
                .collect();
            if items.is_empty() {
                return Err(Error::MissingArgument(flag.to_string()));
            }
            let tokens = items.len();
            Ok(Consumed {
                value: Value::List(items),
                tokens,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(tok: &str) -> bool {
        matches!(tok, "-v" | "--verbose") || tok.starts_with("--verbose=")
    }

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn colon_counts_map_to_arities() {
        assert_eq!(Arity::from_colons(0), Ok(Arity::None));
        assert_eq!(Arity::from_colons(1), Ok(Arity::Required));
        assert_eq!(Arity::from_colons(2), Ok(Arity::Optional));
        assert_eq!(Arity::from_colons(3), Ok(Arity::List));
        for arity in [Arity::None, Arity::Required, Arity::Optional, Arity::List] {
            assert_eq!(Arity::from_colons(arity.colons()), Ok(arity));
        }
    }

    #[test]
    fn colon_count_above_three_is_invalid() {
        assert_eq!(
            Arity::from_colons(4),
            Err(Error::InvalidArity {
                spec: "::::".to_string(),
                colons: 4
            })
        );
        assert!(Arity::from_colons(7).is_err());
    }

    #[test]
    fn arg_spec_splits_placeholder() {
        assert_eq!(
            parse_arg_spec("title:").unwrap(),
            (Some("title".to_string()), Arity::Required)
        );
        assert_eq!(
            parse_arg_spec("title:::").unwrap(),
            (Some("title".to_string()), Arity::List)
        );
        assert_eq!(parse_arg_spec("").unwrap(), (None, Arity::None));
        assert_eq!(parse_arg_spec("::").unwrap(), (None, Arity::Optional));
    }

    #[test]
    fn arg_spec_rejects_four_colons() {
        let err = parse_arg_spec("title::::").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArity {
                spec: "title::::".to_string(),
                colons: 4
            }
        );
    }

    #[test]
    fn none_never_consumes() {
        let rest = argv(&["value"]);
        let c = consume(Arity::None, "-h", None, &rest, known).unwrap();
        assert_eq!(c, Consumed::inline(Value::Set));
    }

    #[test]
    fn none_rejects_embedded_value() {
        let rest: Vec<String> = Vec::new();
        let err = consume(Arity::None, "--help", Some("x"), &rest, known).unwrap_err();
        assert_eq!(err, Error::UnexpectedValue("--help".to_string()));
    }

    #[test]
    fn required_prefers_embedded_value() {
        let rest = argv(&["next"]);
        let c = consume(Arity::Required, "--option", Some("val"), &rest, known).unwrap();
        assert_eq!(c.value, Value::Single("val".to_string()));
        assert_eq!(c.tokens, 0);
    }

    #[test]
    fn required_takes_next_token() {
        for flag in ["-o", "--option"] {
            let rest = argv(&["val", "-v"]);
            let c = consume(Arity::Required, flag, None, &rest, known).unwrap();
            assert_eq!(c.value, Value::Single("val".to_string()));
            assert_eq!(c.tokens, 1);
        }
    }

    #[test]
    fn required_refuses_option_or_end() {
        let rest = argv(&["--verbose=1"]);
        let err = consume(Arity::Required, "-o", None, &rest, known).unwrap_err();
        assert_eq!(err, Error::MissingArgument("-o".to_string()));

        let rest: Vec<String> = Vec::new();
        assert!(consume(Arity::Required, "-o", None, &rest, known).is_err());
    }

    #[test]
    fn optional_short_looks_ahead() {
        let rest = argv(&["-v"]);
        let c = consume(Arity::Optional, "-s", None, &rest, known).unwrap();
        assert_eq!(c, Consumed::inline(Value::Set));

        let rest = argv(&["foo", "-v"]);
        let c = consume(Arity::Optional, "-s", None, &rest, known).unwrap();
        assert_eq!(c.value, Value::Single("foo".to_string()));
        assert_eq!(c.tokens, 1);
    }

    #[test]
    fn optional_long_without_value_is_set() {
        let rest = argv(&["foo"]);
        let c = consume(Arity::Optional, "--stuff", None, &rest, known).unwrap();
        assert_eq!(c, Consumed::inline(Value::Set));
    }

    #[test]
    fn list_short_is_greedy_until_option() {
        let rest = argv(&["a", "b", "c", "-v", "d"]);
        let c = consume(Arity::List, "-t", None, &rest, known).unwrap();
        assert_eq!(c.value, Value::List(argv(&["a", "b", "c"])));
        assert_eq!(c.tokens, 3);
    }

    #[test]
    fn list_needs_at_least_one_item() {
        let rest = argv(&["-v"]);
        let err = consume(Arity::List, "-t", None, &rest, known).unwrap_err();
        assert_eq!(err, Error::MissingArgument("-t".to_string()));
    }

    #[test]
    fn list_long_requires_embedded_value() {
        let rest = argv(&["a", "b"]);
        let err = consume(Arity::List, "--things", None, &rest, known).unwrap_err();
        assert_eq!(err, Error::MissingArgument("--things".to_string()));

        let c = consume(Arity::List, "--things", Some("a"), &rest, known).unwrap();
        assert_eq!(c.value, Value::List(argv(&["a"])));
        assert_eq!(c.tokens, 0);
    }
}
