//! Windows dialogs through a temporary VBScript run by `cscript`.

use std::io::Write;
use std::process::Command;

use tracing::debug;

use super::DialogService;

/// `MsgBox` return value for the Yes button.
const VB_YES: char = '6';

/// Quote `message` as a VBScript string literal.
///
/// Quotes are doubled; line breaks become `vbLf` concatenations since a
/// literal cannot span lines.
fn vb_quote(message: &str) -> String {
    let escaped = message
        .replace('\r', "")
        .replace('"', "\"\"")
        .replace('\n', "\" & vbLf & \"");
    format!("\"{}\"", escaped)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Cscript;

impl Cscript {
    pub fn alert_script(message: &str) -> String {
        format!("WScript.Echo MsgBox({})", vb_quote(message))
    }

    pub fn prompt_script(message: &str) -> String {
        format!("WScript.Echo MsgBox({}, vbYesNo)", vb_quote(message))
    }

    pub fn is_affirmative(output: &str) -> bool {
        output.contains(VB_YES)
    }

    fn run(script: &str) -> anyhow::Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix("eid-dialog")
            .suffix(".vbs")
            .tempfile()
            .map_err(|e| anyhow::anyhow!("Failed to create dialog script: {}", e))?;
        file.write_all(script.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to write dialog script: {}", e))?;
        // Close the handle so cscript can open the file; the path is removed on drop.
        let path = file.into_temp_path();

        let output = Command::new("cscript")
            .arg("/nologo")
            .arg(&path)
            .output()
            .map_err(|e| anyhow::anyhow!("Failed to launch cscript: {}", e))?;
        let result = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("Result = {}", result.trim_end());
        Ok(result)
    }
}

impl DialogService for Cscript {
    fn alert(&self, message: &str) -> anyhow::Result<()> {
        Self::run(&Self::alert_script(message)).map(|_| ())
    }

    fn prompt(&self, message: &str) -> anyhow::Result<bool> {
        Self::run(&Self::prompt_script(message)).map(|output| Self::is_affirmative(&output))
    }
}
