//! Headless dialogs: alerts are logged and every confirmation is accepted.

use tracing::info;

use super::DialogService;

#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl DialogService for Silent {
    fn alert(&self, message: &str) -> anyhow::Result<()> {
        info!("{}", message);
        Ok(())
    }

    fn prompt(&self, message: &str) -> anyhow::Result<bool> {
        info!("{} yes (non-interactive)", message);
        Ok(true)
    }
}
