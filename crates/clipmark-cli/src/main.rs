//! CLI binary for truncating HTML/XML fragments from a file or stdin.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;

use clipmark_core::truncate;
use clipmark_types::TruncateOptions;

#[derive(Parser)]
#[command(
    name = "clipmark",
    version,
    about = "Truncate HTML/XML to a budget while keeping it well-formed"
)]
struct Cli {
    /// Input file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Maximum length in characters
    #[arg(short = 'l', long)]
    max_length: Option<usize>,

    /// Maximum length in bytes (switches to byte accounting)
    #[arg(short = 'b', long, conflicts_with = "max_length")]
    max_bytes: Option<usize>,

    /// Marker inserted where content was cut
    #[arg(short, long)]
    tail: Option<String>,

    /// Do not count tag markup against the budget
    #[arg(long)]
    no_count_tags: bool,

    /// Reserve the tail's cost from the budget in advance
    #[arg(long)]
    count_tail: bool,

    /// Place the tail before the innermost closing tag
    #[arg(long)]
    tail_before_final_tag: bool,

    /// Attribute name to omit from the output (repeatable)
    #[arg(long = "filter-attribute", value_name = "NAME")]
    filtered_attributes: Vec<String>,

    /// Element name whose whole subtree is dropped (repeatable)
    #[arg(long = "filter-tag", value_name = "NAME")]
    filtered_tags: Vec<String>,

    /// Preserve comments
    #[arg(long)]
    comments: bool,

    /// Load options from a JSON file (explicit flags win)
    #[arg(short, long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Emit a JSON report instead of the bare output
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let source = read_source(cli.input.as_deref())?;
    // A trailing newline from the shell would otherwise count as a text node.
    let source = source.trim_end_matches('\n');
    let options = build_options(&cli)?;
    let output = truncate(source, &options)?;

    if cli.json {
        let report = serde_json::json!({
            "output": output,
            "truncated": output != source,
            "options": options,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{output}");
    }
    Ok(())
}

fn read_source(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Merge order: defaults <- options file <- explicit flags.
fn build_options(cli: &Cli) -> anyhow::Result<TruncateOptions> {
    let mut options = match &cli.options {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => TruncateOptions::default(),
    };
    if let Some(max_length) = cli.max_length {
        options.max_length = max_length;
    }
    if cli.max_bytes.is_some() {
        options.max_bytes = cli.max_bytes;
    }
    if let Some(tail) = &cli.tail {
        options.tail = tail.clone();
    }
    if cli.no_count_tags {
        options.count_tags = false;
    }
    if cli.count_tail {
        options.count_tail = Some(true);
    }
    if cli.tail_before_final_tag {
        options.tail_before_final_tag = true;
    }
    options
        .filtered_attributes
        .extend(cli.filtered_attributes.iter().cloned());
    options.filtered_tags.extend(cli.filtered_tags.iter().cloned());
    if cli.comments {
        options.comments = true;
    }
    Ok(options)
}
