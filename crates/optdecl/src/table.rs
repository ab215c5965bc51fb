//! Registered option definitions and short-alias resolution.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::arity::{Arity, parse_arg_spec};
use crate::error::{Error, Result};
use crate::spec::OptionSpec;

/// One registered option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDefinition {
    canonical: String,
    alias: Option<String>,
    arg_name: Option<String>,
    arity: Arity,
    description: String,
}

impl OptionDefinition {
    /// Canonical flag text, e.g. `--option`, or `-x` for short-only options.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Canonical flag without leading dashes.
    pub fn canonical_name(&self) -> &str {
        self.canonical.trim_start_matches('-')
    }

    /// Short flag when the option also has a long form.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn arg_name(&self) -> Option<&str> {
        self.arg_name.as_deref()
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

fn normalize_short(raw: &str) -> String {
    if raw.starts_with('-') {
        raw.to_string()
    } else {
        format!("-{raw}")
    }
}

fn normalize_long(raw: &str) -> String {
    if raw.starts_with('-') {
        raw.to_string()
    } else {
        format!("--{raw}")
    }
}

/// Split `--name=spec` into the flag and the embedded part.
fn split_embedded(flag: &str) -> (&str, Option<&str>) {
    match flag.split_once('=') {
        Some((flag, rest)) => (flag.trim(), Some(rest)),
        None => (flag, None),
    }
}

/// Split an argv token into its flag and an attached `=value`.
///
/// Only long options carry attached values; `-o=x` stays a single flag token.
pub(crate) fn split_token(token: &str) -> (&str, Option<&str>) {
    if token.starts_with("--") {
        split_embedded(token)
    } else {
        (token, None)
    }
}

/// Option definitions keyed by undashed canonical name, plus the alias index.
///
/// `-x` and `--x` share the name `x`, so only one of them can be registered.
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    defs: IndexMap<String, OptionDefinition>,
    aliases: HashMap<String, String>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option.
    ///
    /// With a long flag the long flag is canonical and the short flag becomes its
    /// alias. An `=spec` suffix on the long flag (or on the short flag of a
    /// short-only option) overrides `arg_spec`. Registering an existing
    /// canonical name again, in either spelling, replaces the earlier definition.
    pub fn register(
        &mut self,
        short: &str,
        long: &str,
        arg_spec: &str,
        description: &str,
    ) -> Result<&OptionDefinition> {
        let short = short.trim();
        let long = long.trim();

        let (short, long, embedded) = if long.is_empty() {
            let (short, embedded) = split_embedded(short);
            (short, long, embedded)
        } else {
            let (long, embedded) = split_embedded(long);
            (short, long, embedded)
        };
        let (arg_name, arity) = parse_arg_spec(embedded.unwrap_or(arg_spec))?;

        let (canonical, alias) = match (short.is_empty(), long.is_empty()) {
            (_, false) => (
                normalize_long(long),
                (!short.is_empty()).then(|| normalize_short(short)),
            ),
            (false, true) => (normalize_short(short), None),
            (true, true) => {
                return Err(Error::EmptyFlag(format!("{short}|{long}|{description}")));
            }
        };

        let name = canonical.trim_start_matches('-').to_string();
        self.check_collisions(&name, &canonical, alias.as_deref())?;

        if let Some(old) = self.defs.get(&name).and_then(|d| d.alias.clone()) {
            self.aliases.remove(&old);
        }
        if let Some(alias) = &alias {
            self.aliases.insert(alias.clone(), canonical.clone());
        }

        debug!(
            option = %canonical,
            alias = alias.as_deref().unwrap_or(""),
            %arity,
            "registered option"
        );

        let def = OptionDefinition {
            canonical,
            alias,
            arg_name,
            arity,
            description: description.trim().to_string(),
        };
        let (idx, _) = self.defs.insert_full(name, def);
        Ok(&self.defs[idx])
    }

    /// Definition whose canonical flag is exactly `flag`.
    fn by_canonical(&self, flag: &str) -> Option<&OptionDefinition> {
        self.defs
            .get(flag.trim_start_matches('-'))
            .filter(|def| def.canonical == flag)
    }

    /// Canonical flag of the option that already answers to `flag`, if any.
    fn owner_of(&self, flag: &str) -> Option<&str> {
        self.by_canonical(flag)
            .map(OptionDefinition::canonical)
            .or_else(|| self.aliases.get(flag).map(String::as_str))
    }

    /// An existing entry named `name` is about to be replaced and never collides.
    fn check_collisions(&self, name: &str, canonical: &str, alias: Option<&str>) -> Result<()> {
        let flags = std::iter::once(canonical).chain(alias.filter(|a| *a != canonical));
        for flag in flags {
            let Some(existing) = self.owner_of(flag) else {
                continue;
            };
            if existing.trim_start_matches('-') != name {
                return Err(Error::AliasCollision {
                    flag: flag.to_string(),
                    existing: existing.to_string(),
                    incoming: canonical.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn register_spec(&mut self, spec: &OptionSpec) -> Result<&OptionDefinition> {
        self.register(
            spec.short.as_deref().unwrap_or_default(),
            spec.long.as_deref().unwrap_or_default(),
            spec.arg.as_deref().unwrap_or_default(),
            &spec.description,
        )
    }

    /// Register every spec in order, stopping at the first failure.
    pub fn register_all<'a, I>(&mut self, specs: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a OptionSpec>,
    {
        for spec in specs {
            self.register_spec(spec)?;
        }
        Ok(())
    }

    /// Resolve exact flag text, canonical first, then through the alias index.
    pub fn lookup(&self, flag: &str) -> Result<&OptionDefinition> {
        if let Some(def) = self.by_canonical(flag) {
            return Ok(def);
        }
        self.aliases
            .get(flag)
            .and_then(|canonical| self.by_canonical(canonical))
            .ok_or_else(|| Error::UnknownOption(flag.to_string()))
    }

    /// Whether an argv token names a registered option (`--x=v` counts by `--x`).
    pub fn contains(&self, token: &str) -> bool {
        let (flag, _) = split_token(token);
        self.lookup(flag).is_ok()
    }

    /// Canonical names (without dashes) in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.defs.keys().map(String::as_str).collect()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &OptionDefinition> {
        self.defs.values()
    }

    /// Short alias → canonical flag.
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
