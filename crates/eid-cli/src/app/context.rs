//! Per-run application context.

use std::path::PathBuf;

use eid_core::Platform;

use crate::cli::Cli;
use crate::dialogs::{dialog_service, DialogService};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{resolve_library_path, resolve_platform};

/// CLI arguments bundled with the resolved platform and terminal context.
pub struct AppContext<'a> {
    cli: &'a Cli,
    platform: Platform,
    ui: UiContext,
}

impl<'a> AppContext<'a> {
    /// Validate output flags and resolve the platform.
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        if cli.json && cli.format.is_some() {
            return Err(CliError::invalid_input("--format cannot be used with --json").into());
        }
        if let Some(format) = cli.format.as_deref() {
            if format != "table" && format != "plain" {
                return Err(CliError::invalid_input(format!(
                    "Unknown format '{}' (expected table or plain)",
                    format
                ))
                .into());
            }
        }

        Ok(Self {
            cli,
            platform: resolve_platform(cli),
            ui: UiContext::from_env(cli.json, cli.format.as_deref(), cli.no_color, cli.ascii),
        })
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn library_path(&self) -> PathBuf {
        resolve_library_path(self.cli, &self.platform)
    }

    /// Dialog backend selected by `--dialogs` for this platform.
    pub fn dialogs(&self) -> Box<dyn DialogService> {
        dialog_service(self.cli.dialogs, &self.platform)
    }
}
