//! List command - show the files each finder provides

use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::FinderResult;
use crate::finders::create_finders;
use crate::patterns::PatternSet;
use crate::ui::{self, UiContext};
use console::style;
use serde::Serialize;

/// One listed file
#[derive(Debug, Serialize)]
struct Entry {
    finder: &'static str,
    path: String,
    source: String,
}

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> FinderResult<()> {
    let finders = create_finders(config)?;
    let ignore_patterns = PatternSet::new(&config.staticfiles.ignore_patterns)?;

    let mut entries = Vec::new();
    for finder in &finders {
        for file in finder.list(&ignore_patterns).await? {
            entries.push(Entry {
                finder: finder.name(),
                path: file.prefixed_path(),
                source: file.source()?.display().to_string(),
            });
        }
    }

    if entries.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "No static files found");
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&entries),
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Plain => print_plain(&entries),
    }

    Ok(())
}

fn print_table(entries: &[Entry]) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Static files");

    println!(
        "{:<16} {:<40} {}",
        style("FINDER").bold(),
        style("PATH").bold(),
        style("SOURCE").bold()
    );
    println!("{}", "-".repeat(96));

    for entry in entries {
        println!("{:<16} {:<40} {}", entry.finder, entry.path, style(&entry.source).dim());
    }

    println!();
    println!("{} file(s)", entries.len());
}

fn print_json(entries: &[Entry]) -> FinderResult<()> {
    let json = serde_json::to_string_pretty(entries)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(entries: &[Entry]) {
    for entry in entries {
        println!("{}", entry.path);
    }
}
