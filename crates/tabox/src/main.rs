//! `tabox`: render a table from a JSON layout file and a JSON data file.

mod provider;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::Style;

use provider::ShellProvider;
use tabox_render::{render, Options};

#[derive(Parser, Debug)]
#[command(name = "tabox", version, about = "Render ANSI tables from JSON layout and data files")]
struct Cli {
    /// Layout document: theme, boxes, columns, sort rules.
    #[arg(long, value_name = "FILE")]
    layout: PathBuf,

    /// Data document: a JSON array of records.
    #[arg(long, value_name = "FILE")]
    data: PathBuf,

    /// Trace geometry and row counts on stderr.
    #[arg(long)]
    debug: bool,

    /// Disable ANSI styling and color placeholders.
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let layout = fs::read_to_string(&cli.layout)
        .with_context(|| format!("reading layout file {}", cli.layout.display()))?;
    let data = fs::read_to_string(&cli.data)
        .with_context(|| format!("reading data file {}", cli.data.display()))?;

    if cli.debug {
        eprintln!(
            "loaded layout from {} ({} bytes), data from {} ({} bytes)",
            cli.layout.display(),
            layout.len(),
            cli.data.display(),
            data.len()
        );
    }

    let options = Options {
        debug: cli.debug,
        color: !cli.no_color,
    };
    let rendered = render(&layout, &data, &ShellProvider, options)
        .context("rendering table")?;

    let warn = Style::new().yellow();
    for warning in &rendered.warnings {
        eprintln!("{} {}", warn.apply_to("warning:"), warning);
    }
    if cli.debug {
        eprint!("{}", rendered.debug);
    }

    print!("{}", rendered.output);
    Ok(())
}
