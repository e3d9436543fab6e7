//! Terminal output for the CLI
//!
//! Uses `cliclack` for spinners and prompts in an interactive terminal and
//! falls back to plain prefixed lines in CI or when output is piped.

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, step_info, step_ok_detail, step_warn, step_warn_hint,
};
pub use progress::TaskSpinner;
pub use prompts::confirm;
