//! Terminal dialogs: alerts on stderr, confirmations through dialoguer.

use dialoguer::Confirm;

use super::DialogService;

#[derive(Debug, Clone, Copy, Default)]
pub struct Terminal;

impl DialogService for Terminal {
    fn alert(&self, message: &str) -> anyhow::Result<()> {
        eprintln!("{}", message);
        Ok(())
    }

    fn prompt(&self, message: &str) -> anyhow::Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(true)
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
    }
}
