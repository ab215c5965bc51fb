//! Single-pass scan of an argument vector against an [`OptionTable`].

use tracing::{debug, trace};

use crate::arity;
use crate::error::Result;
use crate::input::ParsedInput;
use crate::table::{OptionTable, split_token};

/// Resolve every token of `args` (program name excluded) into a [`ParsedInput`].
///
/// Each token at the cursor must name a registered option. Value tokens taken by
/// an option are skipped and never re-read as options. The first failure aborts
/// the scan.
pub fn scan<S: AsRef<str>>(table: &OptionTable, args: &[S]) -> Result<ParsedInput> {
    let mut input = ParsedInput::new(table.aliases().clone());
    let mut cursor = 0usize;

    while cursor < args.len() {
        let token = args[cursor].as_ref();
        let (flag, embedded) = split_token(token);
        let def = table.lookup(flag)?;

        let rest = &args[cursor + 1..];
        let consumed = arity::consume(def.arity(), flag, embedded, rest, |tok| {
            table.contains(tok)
        })?;
        trace!(
            token,
            option = def.canonical(),
            consumed = consumed.tokens,
            "matched option"
        );

        input.insert(def.canonical(), consumed.value);
        cursor += 1 + consumed.tokens;
    }

    debug!(tokens = args.len(), options = input.len(), "parsed arguments");
    Ok(input)
}
