use clap::CommandFactory;
use clap_complete::generate;

use crate::app::AppContext;
use crate::cli::Cli;

/// Print the middleware path for the resolved platform.
pub fn handle_path(app: &AppContext) -> anyhow::Result<()> {
    let library = app.library_path();
    if app.ui().mode.is_json() {
        let value = serde_json::json!({
            "platform": app.platform().id(),
            "library": library.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", library.display());
    }
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "eid", &mut std::io::stdout());
    Ok(())
}
