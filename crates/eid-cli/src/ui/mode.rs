//! Output mode routing.

/// How a report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// A single JSON document
    Json,
    /// Stable `key=value` lines
    #[default]
    Plain,
    /// Colors and tables (TTY only)
    Pretty,
}

impl OutputMode {
    /// Resolve the mode from flags and terminal state.
    ///
    /// `--json` wins, then `--format plain`, then `TERM=dumb`. Otherwise
    /// a TTY gets pretty output and anything else gets plain.
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if format_flag == Some("plain") || term_is_dumb || !is_tty {
            return Self::Plain;
        }
        Self::Pretty
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_exclusive() {
        assert_eq!(
            OutputMode::resolve(true, Some("plain"), true, false),
            OutputMode::Json
        );
    }

    #[test]
    fn test_plain_format_on_tty() {
        assert_eq!(
            OutputMode::resolve(false, Some("plain"), true, false),
            OutputMode::Plain
        );
    }

    #[test]
    fn test_term_dumb_forces_plain() {
        assert_eq!(
            OutputMode::resolve(false, None, true, true),
            OutputMode::Plain
        );
    }

    #[test]
    fn test_tty_routing() {
        assert_eq!(
            OutputMode::resolve(false, Some("table"), true, false),
            OutputMode::Pretty
        );
        assert_eq!(
            OutputMode::resolve(false, None, false, false),
            OutputMode::Plain
        );
    }
}
