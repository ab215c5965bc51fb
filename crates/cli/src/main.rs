mod table_file;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use optdecl::{OptionSpec, Parser, exit};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

use crate::table_file::{TableFile, write_table};

#[derive(ClapParser)]
#[command(name = "optdecl")]
#[command(
    version,
    about = "Parse arguments against a declarative option table",
    long_about = None
)]
struct Cli {
    /// Option spec SHORT|LONG[=ARG]|DESCRIPTION (repeatable)
    #[arg(short, long = "spec", value_name = "SPEC", allow_hyphen_values = true)]
    specs: Vec<String>,

    /// JSON option table to load
    #[arg(short, long, value_name = "FILE")]
    table: Option<PathBuf>,

    /// Write the active option table as JSON and exit
    #[arg(long, value_name = "FILE")]
    write_table: Option<PathBuf>,

    /// Overwrite an existing file with --write-table
    #[arg(long)]
    force: bool,

    /// Print the usage text instead of parsing
    #[arg(long)]
    usage: bool,

    /// Print parsed values as JSON
    #[arg(long)]
    json: bool,

    /// Wrap width for --usage
    #[arg(long, default_value_t = optdecl::usage::DEFAULT_WIDTH)]
    width: usize,

    /// Arguments to parse, given after `--`
    #[arg(last = true, value_name = "ARGS", allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<optdecl::Error>() {
            Some(e) => exit::report(&exit::program_name(), e),
            None => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let table = load_table(&cli)?;

    if let Some(dest) = &cli.write_table {
        let path = write_table(dest, &table, cli.force)?;
        eprintln!("Created: {}", path.display());
        return Ok(());
    }

    let mut parser = Parser::new().program(
        table
            .program
            .clone()
            .unwrap_or_else(exit::program_name),
    );
    table.register_into(&mut parser)?;

    if cli.usage {
        print!("{}", parser.formatter().width(cli.width).render(parser.table()));
        return Ok(());
    }

    tracing::debug!(options = parser.table().len(), "parsing arguments");
    let input = parser.parse(&cli.args)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&input).context("failed to serialize values")?;
        println!("{json}");
    } else {
        for (flag, value) in input.iter() {
            println!("{} = {}", flag.trim_start_matches('-'), value);
        }
    }
    Ok(())
}

/// `--table` entries first, then `--spec` strings; the demo table when neither is given.
fn load_table(cli: &Cli) -> Result<TableFile> {
    if cli.table.is_none() && cli.specs.is_empty() {
        return TableFile::demo();
    }

    let mut table = match &cli.table {
        Some(path) => TableFile::from_file(path)?,
        None => TableFile::default(),
    };
    for spec in &cli.specs {
        table.options.push(spec.parse::<OptionSpec>()?);
    }
    Ok(table)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
