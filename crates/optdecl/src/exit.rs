//! Process-exit adapter for command-line front ends.
//!
//! The library itself only returns [`Error`]; binaries that want the classic
//! "print a diagnostic and exit" behavior return [`report`] from `main`.

use std::path::Path;
use std::process::ExitCode;

use crate::error::Error;

/// Lowest status used for option errors; 1 and 2 stay free for generic
/// failures and clap usage errors.
pub const EXIT_BASE: u8 = 10;

/// Exit status for each error kind.
pub fn exit_code(err: &Error) -> u8 {
    let offset = match err {
        Error::InvalidArity { .. } => 0,
        Error::EmptyFlag(_) => 1,
        Error::AliasCollision { .. } => 2,
        Error::UnknownOption(_) => 3,
        Error::MissingArgument(_) => 4,
        Error::UnexpectedValue(_) => 5,
        Error::NotFound(_) => 6,
        Error::InvalidQuery(_) => 7,
    };
    EXIT_BASE + offset
}

/// `<program>: <message>`
pub fn diagnostic(program: &str, err: &Error) -> String {
    format!("{program}: {err}")
}

/// Basename of the running executable, as invoked.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Print the diagnostic to stderr and produce the matching [`ExitCode`].
pub fn report(program: &str, err: &Error) -> ExitCode {
    eprintln!("{}", diagnostic(program, err));
    ExitCode::from(exit_code(err))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_are_distinct_and_above_usage_errors() {
        let errors = [
            Error::InvalidArity {
                spec: "x::::".to_string(),
                colons: 4,
            },
            Error::EmptyFlag(String::new()),
            Error::AliasCollision {
                flag: "-o".to_string(),
                existing: "--a".to_string(),
                incoming: "--b".to_string(),
            },
            Error::UnknownOption("--nope".to_string()),
            Error::MissingArgument("-o".to_string()),
            Error::UnexpectedValue("--help".to_string()),
            Error::NotFound("x".to_string()),
            Error::InvalidQuery("-x".to_string()),
        ];
        let codes: HashSet<u8> = errors.iter().map(exit_code).collect();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|code| *code >= EXIT_BASE));
    }

    #[test]
    fn diagnostic_names_program() {
        let err = Error::UnknownOption("--nope".to_string());
        assert_eq!(diagnostic("demo", &err), "demo: unknown option: --nope");
    }
}
