//! Compile command templates

use crate::error::{FinderError, FinderResult};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

const INPUT_PLACEHOLDERS: [&str; 2] = ["{in_file}", "{infile}"];
const OUTPUT_PLACEHOLDERS: [&str; 2] = ["{out_file}", "{outfile}"];

/// Command line with `{in_file}`/`{out_file}` placeholders
/// (`{infile}`/`{outfile}` are accepted too)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    template: String,
}

impl CommandTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        if !INPUT_PLACEHOLDERS.iter().any(|p| template.contains(p)) {
            warn!("Compile command has no input placeholder: {}", template);
        }
        Self { template }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute the source and output paths
    pub fn render(&self, in_file: &Path, out_file: &Path) -> String {
        let in_file = in_file.to_string_lossy();
        let out_file = out_file.to_string_lossy();

        let mut command = self.template.clone();
        for placeholder in INPUT_PLACEHOLDERS {
            command = command.replace(placeholder, &in_file);
        }
        for placeholder in OUTPUT_PLACEHOLDERS {
            command = command.replace(placeholder, &out_file);
        }
        command
    }
}

/// Split a rendered command into a program invocation.
///
/// POSIX shell quoting applies; on Windows the line is handed to `cmd /C`.
fn build_command(command: &str) -> FinderResult<Command> {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        return Ok(cmd);
    }

    let args = shlex::split(command)
        .filter(|args| !args.is_empty())
        .ok_or_else(|| FinderError::CommandParse(command.to_string()))?;

    let mut cmd = Command::new(&args[0]);
    cmd.args(&args[1..]);
    Ok(cmd)
}

/// Run a rendered compile command to completion.
///
/// A missing executable or a non-zero exit is an error carrying stderr.
pub async fn run(command: &str) -> FinderResult<()> {
    info!("Running command {}", command);

    let output = build_command(command)?
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| FinderError::command_failed(command, e))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        debug!("{}", stdout.trim_end());
    }

    if output.status.success() {
        Ok(())
    } else {
        Err(FinderError::CompileFailed {
            command: command.to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_both_spellings() {
        let in_file = Path::new("/src/app.js");
        let out_file = Path::new("/cache/app.js");

        let template = CommandTemplate::new("babel {in_file} --out-file={out_file}");
        assert_eq!(
            template.render(in_file, out_file),
            "babel /src/app.js --out-file=/cache/app.js"
        );

        let template = CommandTemplate::new(r#"npm run babel -- "{infile}" --out-file="{outfile}""#);
        assert_eq!(
            template.render(in_file, out_file),
            r#"npm run babel -- "/src/app.js" --out-file="/cache/app.js""#
        );
    }

    #[cfg(unix)]
    #[test]
    fn quoted_arguments_stay_whole() {
        let cmd = build_command(r#"cp "/my assets/a.js" /cache/a.js"#).unwrap();
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "cp");
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, vec!["/my assets/a.js", "/cache/a.js"]);
    }

    #[cfg(unix)]
    #[test]
    fn unbalanced_quotes_do_not_parse() {
        let err = build_command(r#"cp "/a.js /b.js"#).err().unwrap();
        assert!(matches!(err, FinderError::CommandParse(_)));
        assert!(build_command("   ").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_reports_exit_code_and_stderr() {
        let err = run("sh -c 'echo broken >&2; exit 3'").await.unwrap_err();
        match err {
            FinderError::CompileFailed { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert!(stderr.contains("broken"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_executable_is_command_failed() {
        let err = run("definitely-not-a-real-compiler-xyz --version")
            .await
            .unwrap_err();
        if cfg!(windows) {
            assert!(err.is_compile_error());
        } else {
            assert!(matches!(err, FinderError::CommandFailed { .. }));
        }
    }
}
