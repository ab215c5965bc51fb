//! Declarative short/long option parsing.
//!
//! Options are registered up front, either from spec strings in the
//! `short|long[=arg]|description` notation or through [`OptionSpec`]'s builder.
//! The number of trailing colons on the argument placeholder selects the arity:
//!
//! | spec        | arity                         |
//! |-------------|-------------------------------|
//! | `--help`    | none                          |
//! | `--o=t:`    | required                      |
//! | `--o=t::`   | optional                      |
//! | `--o=t:::`  | list (short form is greedy)   |
//!
//! # Example
//!
//! ```rust
//! use optdecl::Parser;
//!
//! let parser = Parser::from_spec_strs([
//!     "-h|--help|Print usage.",
//!     "-o|--option=title:|A required-argument option.",
//!     "-t|--things=title:::|List argument.",
//! ])
//! .unwrap();
//!
//! let input = parser.parse(&["-o", "val", "-t", "a", "b", "-h"]).unwrap();
//! assert_eq!(input.get_guessed("option").unwrap().to_string(), "val");
//! assert_eq!(input.get_guessed("things").unwrap().to_string(), "a|b");
//! assert!(input.is_present("help"));
//! ```

pub mod arity;
pub mod error;
pub mod exit;
pub mod input;
pub mod scan;
pub mod spec;
pub mod table;
pub mod usage;

pub use arity::Arity;
pub use error::{Error, Result};
pub use input::{LIST_SEPARATOR, ParsedInput, SET_MARKER, Value};
pub use spec::OptionSpec;
pub use table::{OptionDefinition, OptionTable};
pub use usage::UsageFormatter;

/// An option table plus the operations run against it.
///
/// Register everything first; [`Parser::parse`] then hands back an owned
/// [`ParsedInput`] that can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    table: OptionTable,
    program: Option<String>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name shown in the usage header.
    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program = Some(name.into());
        self
    }

    /// Build a parser from `short|long[=arg]|description` strings.
    pub fn from_spec_strs<'a, I>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut parser = Self::new();
        for spec in specs {
            parser.register_spec(&spec.parse::<OptionSpec>()?)?;
        }
        Ok(parser)
    }

    pub fn register(
        &mut self,
        short: &str,
        long: &str,
        arg_spec: &str,
        description: &str,
    ) -> Result<&OptionDefinition> {
        self.table.register(short, long, arg_spec, description)
    }

    pub fn register_spec(&mut self, spec: &OptionSpec) -> Result<&OptionDefinition> {
        self.table.register_spec(spec)
    }

    /// Builder-style registration.
    pub fn option(mut self, spec: OptionSpec) -> Result<Self> {
        self.table.register_spec(&spec)?;
        Ok(self)
    }

    pub fn table(&self) -> &OptionTable {
        &self.table
    }

    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<ParsedInput> {
        scan::scan(&self.table, args)
    }

    pub fn usage(&self) -> String {
        self.formatter().render(&self.table)
    }

    /// A formatter preconfigured with this parser's program name.
    pub fn formatter(&self) -> UsageFormatter {
        match &self.program {
            Some(program) => UsageFormatter::new().program(program.clone()),
            None => UsageFormatter::new(),
        }
    }
}
