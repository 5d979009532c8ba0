//! eID CLI - read identity data objects off a smart card through PKCS#11
//!
//! Resolves the middleware for the current platform, runs one session
//! against the first reader and prints what the card exposes.

mod app;
mod cli;
mod commands;
mod constants;
mod dialogs;
mod errors;
mod logging;
mod output;
mod ui;

use clap::Parser;
use eid_core::token::CryptokiLoader;
use tracing::error;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, ReadArgs};
use crate::commands::{misc, read};
use crate::constants::exit_codes;
use crate::errors::CliError;
use crate::logging::FATAL_TARGET;
use crate::ui::{print_error, UiContext};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let code = match AppContext::new(&cli).and_then(|app| run(&app, &cli)) {
        Ok(code) => code,
        Err(err) => {
            let code = err
                .downcast_ref::<CliError>()
                .map(CliError::exit_code)
                .unwrap_or(exit_codes::FAILURE);
            if code == exit_codes::FAILURE {
                error!(target: FATAL_TARGET, "{:#}", err);
            }
            let ui = UiContext::from_env(false, None, cli.no_color, cli.ascii);
            print_error(&ui, &format!("{:#}", err), None);
            code
        }
    };

    std::process::exit(code);
}

fn run(app: &AppContext, cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        None => read_with_middleware(app, &ReadArgs::default()),
        Some(Commands::Read(args)) => read_with_middleware(app, args),
        Some(Commands::Path) => {
            misc::handle_path(app)?;
            Ok(exit_codes::SUCCESS)
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args.shell)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn read_with_middleware(app: &AppContext, args: &ReadArgs) -> anyhow::Result<i32> {
    let dialogs = app.dialogs();
    read::handle_read(app, args, CryptokiLoader, dialogs.as_ref())
}
