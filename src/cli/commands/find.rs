//! Find command - show where static paths resolve

use crate::cli::args::FindArgs;
use crate::config::Config;
use crate::error::FinderResult;
use crate::finders::{create_finders, find};
use crate::ui::{self, UiContext};
use console::style;

/// Execute the find command
pub async fn execute(args: FindArgs, config: &Config) -> FinderResult<()> {
    let ctx = UiContext::detect();
    let finders = create_finders(config)?;

    for path in &args.paths {
        let found = find(&finders, path, args.all).await?;
        if found.is_empty() {
            ui::step_warn(&ctx, &format!("No matching file found for '{}'", path));
            continue;
        }

        println!("Found '{}' here:", style(path).cyan());
        for location in found {
            println!("  {}", location.display());
        }
    }

    Ok(())
}
