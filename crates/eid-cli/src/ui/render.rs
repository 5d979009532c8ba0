//! Rendering primitives for report output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Header line for a command.
///
/// Pretty mode: "eID · command (context)"
/// Plain mode: "eid command"
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("eID", styles::bold(), ctx.color);
            match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
        OutputMode::Plain => format!("eid {}", command),
        OutputMode::Json => String::new(),
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored
    } else {
        format!("{} {}", colored, message)
    }
}

/// Key/value pair.
///
/// Pretty mode: "Key: value" with a dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Error line with an optional hint underneath, for stderr.
pub fn error_message(ctx: &UiContext, message: &str, hint_text: Option<&str>) -> String {
    let mut out = badge(ctx, Badge::Err, message);
    if let Some(text) = hint_text {
        out.push('\n');
        out.push_str(&hint(ctx, text));
    }
    out
}

pub fn print_error(ctx: &UiContext, message: &str, hint_text: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, hint_text));
}

/// Table column.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub numeric: bool,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            numeric: false,
        }
    }

    /// Right-aligned column.
    pub const fn numeric(header: &'static str) -> Self {
        Self {
            header,
            numeric: true,
        }
    }
}

/// Render rows as a bordered table sized to the terminal.
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(ctx.width.min(u16::MAX as usize) as u16)
        .set_header(columns.iter().map(|c| Cell::new(c.header)));

    for row in rows {
        table.add_row(row.iter().zip(columns).map(|(value, column)| {
            let cell = Cell::new(value);
            if column.numeric {
                cell.set_alignment(CellAlignment::Right)
            } else {
                cell
            }
        }));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_header_and_kv() {
        let ctx = UiContext::plain();
        assert_eq!(header(&ctx, "read", None), "eid read");
        assert_eq!(kv(&ctx, "Slot ID", "0"), "slot_id=0");
        assert_eq!(hint(&ctx, "insert card"), "hint=insert card");
    }

    #[test]
    fn test_badge_plain() {
        let ctx = UiContext::plain();
        assert_eq!(badge(&ctx, Badge::Warn, "nothing"), "[WARN] nothing");
        assert_eq!(badge(&ctx, Badge::Ok, ""), "[OK]");
    }

    #[test]
    fn test_error_message_with_hint() {
        let ctx = UiContext::plain();
        assert_eq!(
            error_message(&ctx, "No slot/reader detected", Some("Insert the card.")),
            "[ERR] No slot/reader detected\nhint=Insert the card."
        );
    }

    #[test]
    fn test_table_contains_cells() {
        let ctx = UiContext::plain();
        let rendered = table(
            &ctx,
            &[Column::numeric("#"), Column::new("Label")],
            &[vec!["0".into(), "carddata_glob_os_version".into()]],
        );
        assert!(rendered.contains("Label"));
        assert!(rendered.contains("carddata_glob_os_version"));
    }
}
