//! Usage text rendered from an [`OptionTable`].

use unicode_width::UnicodeWidthStr;

use crate::arity::Arity;
use crate::table::{OptionDefinition, OptionTable};

pub const DEFAULT_WIDTH: usize = 80;
const DESCRIPTION_INDENT: usize = 8;

/// Renders one block per option, sorted by canonical name:
///
/// ```text
///   -o, --option=title
///         A required-argument option.
///
/// ```
#[derive(Debug, Clone)]
pub struct UsageFormatter {
    program: Option<String>,
    width: usize,
}

impl Default for UsageFormatter {
    fn default() -> Self {
        Self {
            program: None,
            width: DEFAULT_WIDTH,
        }
    }
}

impl UsageFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix the rows with a `Usage: <program> [OPTIONS]` line.
    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program = Some(name.into());
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width.max(DESCRIPTION_INDENT + 1);
        self
    }

    pub fn render(&self, table: &OptionTable) -> String {
        let mut defs: Vec<&OptionDefinition> = table.definitions().collect();
        defs.sort_by(|a, b| a.canonical_name().cmp(b.canonical_name()));

        let mut out = String::new();
        if let Some(program) = &self.program {
            out.push_str(&format!("Usage: {program} [OPTIONS]\n\nOptions:\n"));
        }
        for def in defs {
            out.push_str("  ");
            out.push_str(&format_flags(def));
            out.push('\n');
            for line in wrap(def.description(), self.width - DESCRIPTION_INDENT) {
                out.push_str(&" ".repeat(DESCRIPTION_INDENT));
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

fn format_flags(def: &OptionDefinition) -> String {
    let mut out = match def.alias() {
        Some(alias) => format!("{alias}, {}", def.canonical()),
        None => def.canonical().to_string(),
    };
    let name = def.arg_name().unwrap_or("value");
    match def.arity() {
        Arity::None => {}
        Arity::Required => out.push_str(&format!("={name}")),
        Arity::Optional => out.push_str(&format!("[={name}]")),
        Arity::List => out.push_str(&format!("={name}...")),
    }
    out
}

/// Greedy word wrap by display width; a word wider than `width` gets its own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
