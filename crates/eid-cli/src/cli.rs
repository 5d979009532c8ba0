use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use eid_core::VERSION;

use crate::dialogs::DialogMode;

/// eID - read identity data objects off a smart card through PKCS#11
#[derive(Parser)]
#[command(name = "eid")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the PKCS#11 middleware library (skips platform resolution)
    #[arg(short, long, global = true, env = "EID_PKCS11_LIBRARY")]
    pub library: Option<String>,

    /// Platform identifier used to resolve the middleware (darwin, win32, linux, ...)
    #[arg(long, global = true, env = "EID_PLATFORM")]
    pub platform: Option<String>,

    /// Dialog backend for alerts and confirmations
    #[arg(
        long,
        global = true,
        value_enum,
        env = "EID_DIALOGS",
        default_value_t = DialogMode::Native
    )]
    pub dialogs: DialogMode,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments for the `read` command
#[derive(Args, Default)]
pub struct ReadArgs {
    /// Ask for confirmation after reading; stop when declined
    #[arg(long)]
    pub confirm: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read data objects from the card in the first reader (default)
    Read(ReadArgs),

    /// Print the middleware path resolved for the platform
    Path,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
