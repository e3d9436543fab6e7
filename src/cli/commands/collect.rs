//! Collect command - copy every static into the static root

use crate::cli::args::CollectArgs;
use crate::collect::{CollectOptions, Collector};
use crate::config::Config;
use crate::error::FinderResult;
use crate::finders::create_finders;
use crate::ui::{self, TaskSpinner, UiContext};

/// Execute the collect command
pub async fn execute(args: CollectArgs, config: &Config) -> FinderResult<()> {
    let ctx = UiContext::detect();
    let finders = create_finders(config)?;

    let options = CollectOptions {
        dry_run: args.dry_run,
        clear: args.clear,
        extra_ignore_patterns: args.ignore,
    };
    let collector = Collector::new(config, &finders, options)?;

    if args.dry_run {
        ui::intro(&ctx, "Collect (dry run)");
    } else {
        ui::intro(&ctx, "Collect");
    }
    ui::key_value(&ctx, "destination", &collector.static_root().display().to_string());

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start("Collecting statics...");

    let summary = match collector.run().await {
        Ok(summary) => summary,
        Err(e) => {
            spinner.stop_error("Collection failed");
            return Err(e);
        }
    };

    let verb = if args.dry_run { "would be copied" } else { "copied" };
    spinner.stop(&format!("{} file(s) {}", summary.copied.len(), verb));

    if !summary.unmodified.is_empty() {
        ui::step_info(&ctx, &format!("{} unmodified", summary.unmodified.len()));
    }
    for path in &summary.duplicates {
        ui::step_warn_hint(
            &ctx,
            &format!("Duplicate path {}", path),
            "an earlier finder already provided it",
        );
    }

    ui::outro_success(
        &ctx,
        &format!("Collected into {}", summary.destination.display()),
    );
    Ok(())
}
