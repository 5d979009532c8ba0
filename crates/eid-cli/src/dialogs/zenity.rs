//! Linux dialogs through `zenity`.

use std::process::Command;

use tracing::debug;

use super::DialogService;

#[derive(Debug, Clone, Copy, Default)]
pub struct Zenity;

impl Zenity {
    /// Arguments for a dialog of `kind` (`--info`, `--question`).
    pub fn args(kind: &str, message: &str) -> Vec<String> {
        vec![kind.to_string(), format!("--text={}", escape_markup(message))]
    }

    fn run(kind: &str, message: &str) -> anyhow::Result<bool> {
        let output = Command::new("zenity")
            .args(Self::args(kind, message))
            .output()
            .map_err(|e| anyhow::anyhow!("Failed to launch zenity: {}", e))?;
        debug!(
            "Result = {} (status {})",
            String::from_utf8_lossy(&output.stdout).trim_end(),
            output.status
        );
        Ok(output.status.success())
    }
}

impl DialogService for Zenity {
    fn alert(&self, message: &str) -> anyhow::Result<()> {
        Self::run("--info", message).map(|_| ())
    }

    // zenity answers through its exit status: 0 for Yes.
    fn prompt(&self, message: &str) -> anyhow::Result<bool> {
        Self::run("--question", message)
    }
}

/// `--text` is Pango markup.
fn escape_markup(message: &str) -> String {
    message
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
