//! Dialog service: informational alerts and yes/no confirmations.
//!
//! Native backends shell out to the platform's dialog tool and decide the
//! answer by matching the tool's output. The terminal and silent backends
//! cover headless and scripted runs.

mod cscript;
mod osascript;
mod silent;
mod terminal;
mod zenity;

use clap::ValueEnum;
use eid_core::Platform;

pub use cscript::Cscript;
pub use osascript::Osascript;
pub use silent::Silent;
pub use terminal::Terminal;
pub use zenity::Zenity;

/// Alert and confirm capability consumed by the read flow.
pub trait DialogService {
    /// Show a message and wait for it to be dismissed.
    fn alert(&self, message: &str) -> anyhow::Result<()>;

    /// Ask a yes/no question. Blocks until answered.
    fn prompt(&self, message: &str) -> anyhow::Result<bool>;
}

/// Which dialog backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialogMode {
    /// Platform dialog tool (osascript, cscript, zenity)
    Native,
    /// Print alerts and ask on the terminal
    Terminal,
    /// Log alerts and answer yes to every confirmation
    None,
}

/// Build the dialog service for `mode` on `platform`.
pub fn dialog_service(mode: DialogMode, platform: &Platform) -> Box<dyn DialogService> {
    match mode {
        DialogMode::Native => match platform {
            Platform::Darwin => Box::new(Osascript),
            Platform::Win32 => Box::new(Cscript),
            Platform::Other(_) => Box::new(Zenity),
        },
        DialogMode::Terminal => Box::new(Terminal),
        DialogMode::None => Box::new(Silent),
    }
}

/// Quote a message as a double-quoted string literal with JSON escaping.
pub(crate) fn json_quote(message: &str) -> String {
    serde_json::Value::from(message).to_string()
}
