//! Cache command - inspect or clear the finder cache

use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Config;
use crate::error::{FinderError, FinderResult};
use crate::ui::{self, UiContext};
use std::path::Path;
use tokio::fs;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> FinderResult<()> {
    let cache_root = config.cache_root();

    match args.action {
        CacheAction::Path => {
            println!("{}", cache_root.display());
            Ok(())
        }
        CacheAction::Clear { yes } => clear_cache(&cache_root, yes).await,
    }
}

async fn clear_cache(cache_root: &Path, yes: bool) -> FinderResult<()> {
    let ctx = UiContext::detect().with_auto_yes(yes);

    if !cache_root.exists() {
        ui::step_info(&ctx, &format!("No cache at {}", cache_root.display()));
        return Ok(());
    }

    let prompt = format!("Remove {}?", cache_root.display());
    if !ui::confirm(&ctx, &prompt, false).await? {
        ui::step_warn_hint(&ctx, "Cache not cleared", "Use --yes to skip confirmation");
        return Ok(());
    }

    fs::remove_dir_all(cache_root)
        .await
        .map_err(|e| FinderError::io(format!("removing {}", cache_root.display()), e))?;

    ui::step_ok_detail(&ctx, "Cache cleared", &cache_root.display().to_string());
    Ok(())
}
