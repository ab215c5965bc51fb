use anyhow::{Context, Result, bail};
use optdecl::{OptionSpec, Parser};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Options used when no table is given.
pub const DEMO_SPECS: [&str; 6] = [
    "-h|--help|Print usage.",
    "-o|--option=title:|A required-argument option.",
    "  |--flag|No short form.",
    "-s|--stuff=title::|Optional argument.",
    "-t|--things=title:::|List argument.",
    "-v|--verbose|Verbose output.",
];

/// JSON option table.
///
/// ```json
/// { "program": "demo", "options": [ { "short": "-o", "long": "--option", "arg": "title:" } ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl TableFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("option table not found: {}", path.display());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read option table: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse option table JSON: {}", path.display()))
    }

    /// The built-in demo table.
    pub fn demo() -> Result<Self> {
        let options = DEMO_SPECS
            .iter()
            .map(|s| s.parse::<OptionSpec>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            program: None,
            options,
        })
    }

    /// Register every option on `parser`; the first invalid entry aborts.
    pub fn register_into(&self, parser: &mut Parser) -> optdecl::Result<()> {
        for spec in &self.options {
            parser.register_spec(spec)?;
        }
        Ok(())
    }
}

pub fn write_table(dest: &Path, table: &TableFile, overwrite: bool) -> Result<PathBuf> {
    if dest.exists() && !overwrite {
        bail!("{} already exists", dest.display());
    }

    let bytes = serde_json::to_vec_pretty(table).context("failed to serialize option table")?;
    let mut out = String::from_utf8(bytes).context("option table is not valid UTF-8")?;
    out.push('\n');

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest.to_path_buf())
}
