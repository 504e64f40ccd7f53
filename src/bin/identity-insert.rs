//! identity-insert — SET IDENTITY_INSERT toggles for SQL insert scripts
//!
//! # Usage
//!
//! ```bash
//! # Rewrite a script in place
//! identity-insert --input seed.sql
//!
//! # Write to another file and show the result
//! identity-insert -i seed.sql -o seed.toggled.sql --verbose
//!
//! # Tables under another schema, upper-case keywords
//! identity-insert -i seed.sql --schema sales --keyword-case upper
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::*;
use identity_insert::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "identity-insert")]
#[command(author = "identity-insert contributors")]
#[command(version)]
#[command(disable_version_flag = true)]
#[command(
    about = "Inserts \"SET IDENTITY_INSERT TABLE ON/OFF\" between SQL insert blocks.",
    long_about = None
)]
#[command(after_help = "EXAMPLES:
    identity-insert --input seed.sql
    identity-insert -i seed.sql -o seed.toggled.sql --verbose
    identity-insert -i seed.sql --schema sales --preamble passthrough")]
struct Cli {
    /// File to read (containing SQL insert statements). Mandatory.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// File to write. If omitted, the input file is overwritten.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the computed output before writing it
    #[arg(short = 'V', long)]
    verbose: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Schema that qualifies recognised tables [default: dbo]
    #[arg(short, long, value_name = "NAME")]
    schema: Option<String>,

    /// Case of the emitted SQL keywords [default: lower]
    #[arg(long, value_enum, value_name = "CASE")]
    keyword_case: Option<KeywordCase>,

    /// Handling of lines before the first INSERT: `toggle` opens a block
    /// for an empty table name, `passthrough` copies them unchanged
    /// [default: toggle]
    #[arg(long, value_enum, value_name = "MODE")]
    preamble: Option<Preamble>,

    /// Config file (default: ./identity-insert.toml, then the user config dir)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    init_tracing();

    // Usage errors exit with 2, help and version with 0.
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        println!("{} {:#}", "[ERROR]".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let plan = validate(cli.input.as_deref(), cli.output.as_deref())?;
    let options = Options::resolve(
        cli.config.as_deref(),
        Overrides {
            schema: cli.schema.clone(),
            keyword_case: cli.keyword_case,
            preamble: cli.preamble,
        },
    )?;
    tracing::debug!(?plan, ?options, "resolved run");

    if cli.verbose {
        println!("Verbose output is enabled.");
    }

    if plan.overwrite {
        println!(
            "{} output file does exist. File content will be overwritten.",
            "[WARNING]".yellow().bold()
        );
    }

    let lines = read_lines(&plan.input)
        .with_context(|| format!("Failed to read input file \"{}\"", plan.input.display()))?;

    let transformed =
        BlockTransformer::from_options(&options).transform(lines.iter().map(String::as_str));

    if cli.verbose {
        print_verbose(&transformed)?;
    }

    write_lines(&plan.output, &transformed.lines)
        .with_context(|| format!("Failed to write output file \"{}\"", plan.output.display()))?;

    println!(
        "{} Output file \"{}\" written.",
        "[INFO]".green().bold(),
        plan.output.display()
    );
    Ok(())
}

fn print_verbose(transformed: &Transformed) -> Result<()> {
    println!("{} Output content:", "[VERBOSE]".cyan());
    println!("{}", serde_json::to_string(&transformed.lines)?);
    println!(
        "{} {} table block(s): {}",
        "[VERBOSE]".cyan(),
        transformed.blocks.len(),
        transformed.blocks.join(", ")
    );
    Ok(())
}
