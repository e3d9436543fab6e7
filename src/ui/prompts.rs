//! Yes/no questions before destructive commands

use super::context::UiContext;
use crate::error::{FinderError, FinderResult};

/// Ask before doing something destructive.
///
/// `--yes` answers yes without asking; without a terminal `default` is used.
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> FinderResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (--yes)", message);
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Ok(default);
    }

    // cliclack blocks on stdin
    let question = message.to_string();
    tokio::task::spawn_blocking(move || {
        cliclack::confirm(&question)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| FinderError::Internal(format!("confirmation prompt aborted: {}", e)))?
    .map_err(|e| FinderError::io("reading confirmation", e))
}
