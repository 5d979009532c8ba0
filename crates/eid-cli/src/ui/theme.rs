//! Badges, text styles and spinner frames.

use owo_colors::{OwoColorize, Style};

/// Status badge printed before a summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
}

impl Badge {
    pub fn display(&self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Self::Ok, true) => "[\u{2713}]",
            (Self::Ok, false) => "[OK]",
            (Self::Warn, true) => "[\u{26A0}]",
            (Self::Warn, false) => "[WARN]",
            (Self::Err, true) => "[\u{2717}]",
            (Self::Err, false) => "[ERR]",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => Style::new().green().bold(),
            Self::Warn => Style::new().yellow().bold(),
            Self::Err => Style::new().red().bold(),
        }
    }
}

pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }
}

/// Apply `style` to `text` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

const SPINNER_UNICODE: &[&str] = &[
    "\u{280B}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283C}", "\u{2834}", "\u{2826}",
    "\u{2827}", "\u{2807}", "\u{280F}",
];
const SPINNER_ASCII: &[&str] = &["|", "/", "-", "\\"];

pub fn spinner_frames(unicode: bool) -> &'static [&'static str] {
    if unicode {
        SPINNER_UNICODE
    } else {
        SPINNER_ASCII
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_display() {
        assert_eq!(Badge::Ok.display(false), "[OK]");
        assert_eq!(Badge::Ok.display(true), "[\u{2713}]");
        assert_eq!(Badge::Warn.display(false), "[WARN]");
    }

    #[test]
    fn test_styled_without_color_is_plain() {
        assert_eq!(styled("eid", styles::bold(), false), "eid");
        assert_ne!(styled("eid", styles::bold(), true), "eid");
    }

    #[test]
    fn test_spinner_frames() {
        assert_eq!(spinner_frames(false).len(), 4);
        assert_eq!(spinner_frames(true).len(), 10);
    }
}
