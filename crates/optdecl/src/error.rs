use thiserror::Error;

/// Everything that can go wrong while registering, parsing, or querying options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument spec ended in a colon run other than 0..=3.
    #[error("invalid arity in argument spec '{spec}': {colons} trailing colons (expected 0 to 3)")]
    InvalidArity { spec: String, colons: usize },

    #[error("option spec has neither a short nor a long flag: '{0}'")]
    EmptyFlag(String),

    /// A short alias is already taken by a different option.
    #[error("alias conflict: '{flag}' refers to both '{existing}' and '{incoming}'")]
    AliasCollision {
        flag: String,
        existing: String,
        incoming: String,
    },

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("missing argument for {0}")]
    MissingArgument(String),

    #[error("option does not take a value: {0}")]
    UnexpectedValue(String),

    #[error("option not found: {0}")]
    NotFound(String),

    #[error("invalid query '{0}': pass option names without leading dashes")]
    InvalidQuery(String),
}

pub type Result<T> = std::result::Result<T, Error>;
