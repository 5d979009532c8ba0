//! Terminal environment detection.

use std::io::IsTerminal;

use super::mode::OutputMode;

/// Terminal and environment context for rendering decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether stdout is a TTY
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    /// Terminal width (columns)
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    /// Build the context from CLI flags and the process environment.
    ///
    /// Color is off when stdout is not a TTY, `NO_COLOR` is set,
    /// `--no-color` was passed or `TERM=dumb`.
    pub fn from_env(
        json_flag: bool,
        format_flag: Option<&str>,
        no_color_flag: bool,
        ascii_flag: bool,
    ) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();

        Self {
            is_tty,
            color: is_tty && !no_color_flag && !no_color_env && !term_is_dumb,
            unicode: !ascii_flag,
            width: terminal_width().unwrap_or(80),
            mode: OutputMode::resolve(json_flag, format_flag, is_tty, term_is_dumb),
        }
    }

    /// Fixed plain context for rendering tests.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    /// Spinners only animate on an interactive stderr in pretty mode.
    pub fn allows_animation(&self) -> bool {
        self.is_tty && self.mode.is_pretty() && std::io::stderr().is_terminal()
    }
}

fn terminal_width() -> Option<usize> {
    if let Some(width) = std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.parse::<usize>().ok())
        .filter(|w| *w > 0)
    {
        return Some(width);
    }

    #[cfg(unix)]
    {
        use std::mem::MaybeUninit;

        let mut winsize = MaybeUninit::<libc::winsize>::uninit();
        // SAFETY: TIOCGWINSZ fills the winsize struct on success
        let result =
            unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
        if result == 0 {
            let ws = unsafe { winsize.assume_init() };
            if ws.ws_col > 0 {
                return Some(ws.ws_col as usize);
            }
        }
    }

    None
}
