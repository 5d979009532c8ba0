//! macOS dialogs through AppleScript (`osascript`, script on stdin).

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use super::{json_quote, DialogService};

#[derive(Debug, Clone, Copy, Default)]
pub struct Osascript;

impl Osascript {
    pub fn alert_script(message: &str) -> String {
        format!("display dialog {} buttons \"OK\"", json_quote(message))
    }

    pub fn prompt_script(message: &str) -> String {
        format!(
            "display dialog {} buttons {{\"Yes\", \"No\"}}",
            json_quote(message)
        )
    }

    /// `display dialog` prints `button returned:Yes` for the affirmative button.
    pub fn is_affirmative(output: &str) -> bool {
        output.contains(":Yes")
    }

    fn run(script: &str) -> anyhow::Result<String> {
        let mut child = Command::new("osascript")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to launch osascript: {}", e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(script.as_bytes())
                .map_err(|e| anyhow::anyhow!("Failed to write dialog script: {}", e))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| anyhow::anyhow!("osascript did not complete: {}", e))?;
        let result = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("Result = {}", result.trim_end());
        Ok(result)
    }
}

impl DialogService for Osascript {
    fn alert(&self, message: &str) -> anyhow::Result<()> {
        Self::run(&Self::alert_script(message)).map(|_| ())
    }

    fn prompt(&self, message: &str) -> anyhow::Result<bool> {
        Self::run(&Self::prompt_script(message)).map(|output| Self::is_affirmative(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_script() {
        assert_eq!(
            Osascript::alert_script("Loading library: /x.dylib"),
            "display dialog \"Loading library: /x.dylib\" buttons \"OK\""
        );
    }

    #[test]
    fn test_prompt_script() {
        assert_eq!(
            Osascript::prompt_script("Continue ?"),
            "display dialog \"Continue ?\" buttons {\"Yes\", \"No\"}"
        );
    }

    #[test]
    fn test_affirmative_sentinel() {
        assert!(Osascript::is_affirmative("button returned:Yes\n"));
        assert!(!Osascript::is_affirmative("button returned:No\n"));
        assert!(!Osascript::is_affirmative(""));
    }
}
