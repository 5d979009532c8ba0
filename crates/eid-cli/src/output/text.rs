//! Plain and pretty text for read results.

use eid_core::{DataObject, Platform, ReadOutcome, SessionReport};

use crate::ui::format::{format_bytes, shorten_path, truncate};
use crate::ui::{badge, header, hint, kv, table, Badge, Column, UiContext};

const LABEL_WIDTH: usize = 40;

/// One line per object: index, label, handle, size, then the preview.
pub fn object_line(index: usize, object: &DataObject) -> String {
    let mut line = format!(
        "[{}] Label: {} | Handle: {} | Size: {}",
        index,
        object.label,
        object.handle,
        object.size()
    );
    if let Some(preview) = object.preview() {
        line.push_str(&format!(" | Preview: {}...", preview));
    }
    line
}

/// Render a completed read pass for plain or pretty output.
pub fn report_text(ctx: &UiContext, report: &SessionReport, platform: &Platform) -> String {
    let library = report.library_path.display().to_string();
    let mut lines = vec![header(ctx, "read", Some(platform.id()))];

    if ctx.mode.is_pretty() {
        lines.push(kv(ctx, "Library", &shorten_path(&library, 60)));
        lines.push(kv(ctx, "Slot", &report.slot.to_string()));
    } else {
        lines.push(kv(ctx, "library", &library));
        lines.push(kv(ctx, "platform", platform.id()));
        lines.push(kv(ctx, "slot", &report.slot.to_string()));
        lines.push(kv(ctx, "slot_count", &report.slot_count.to_string()));
    }

    match &report.outcome {
        ReadOutcome::NoObjectsFound => {
            if ctx.mode.is_pretty() {
                lines.push(badge(ctx, Badge::Warn, "No CKO_DATA objects found"));
                lines.push(hint(ctx, "Is the card inserted?"));
            } else {
                lines.push("outcome=no_objects_found".to_string());
            }
        }
        ReadOutcome::Objects(objects) if ctx.mode.is_pretty() => {
            lines.push(badge(
                ctx,
                Badge::Ok,
                &format!("Found {} objects", objects.len()),
            ));
            lines.push(objects_table(ctx, objects));
        }
        ReadOutcome::Objects(objects) => {
            lines.push("outcome=objects_read".to_string());
            lines.push(kv(ctx, "objects", &objects.len().to_string()));
            lines.extend(
                objects
                    .iter()
                    .enumerate()
                    .map(|(index, object)| object_line(index, object)),
            );
        }
    }

    lines.join("\n")
}

fn objects_table(ctx: &UiContext, objects: &[DataObject]) -> String {
    let columns = [
        Column::numeric("#"),
        Column::new("Label"),
        Column::numeric("Handle"),
        Column::numeric("Size"),
        Column::new("Preview"),
    ];
    let rows: Vec<Vec<String>> = objects
        .iter()
        .enumerate()
        .map(|(index, object)| {
            vec![
                index.to_string(),
                truncate(&object.label, LABEL_WIDTH),
                object.handle.to_string(),
                format_bytes(object.size()),
                object
                    .preview()
                    .map(|p| format!("{}...", p))
                    .unwrap_or_default(),
            ]
        })
        .collect();
    table(ctx, &columns, &rows)
}
