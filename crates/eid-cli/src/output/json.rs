//! JSON documents for read results.

use eid_core::{DataObject, EidError, Platform, ReadOutcome, SessionReport};
use serde::Serialize;

#[derive(Serialize)]
struct ObjectJson<'a> {
    index: usize,
    label: &'a str,
    handle: u64,
    size: usize,
    preview: Option<String>,
}

impl<'a> ObjectJson<'a> {
    fn new(index: usize, object: &'a DataObject) -> Self {
        Self {
            index,
            label: &object.label,
            handle: object.handle.0,
            size: object.size(),
            preview: object.preview(),
        }
    }
}

fn outcome_name(outcome: &ReadOutcome) -> &'static str {
    match outcome.kind() {
        Some(kind) => kind.as_str(),
        None => "objects_read",
    }
}

/// Document for a completed read pass.
pub fn report_json(report: &SessionReport, platform: &Platform) -> serde_json::Value {
    let objects: Vec<ObjectJson<'_>> = report
        .outcome
        .objects()
        .iter()
        .enumerate()
        .map(|(index, object)| ObjectJson::new(index, object))
        .collect();

    serde_json::json!({
        "library": report.library_path.display().to_string(),
        "platform": platform.id(),
        "slot": report.slot,
        "slot_count": report.slot_count,
        "objects": objects,
        "outcome": outcome_name(&report.outcome),
    })
}

/// Document for a failed read pass.
pub fn failure_json(library: &str, platform: &Platform, err: &EidError) -> serde_json::Value {
    serde_json::json!({
        "library": library,
        "platform": platform.id(),
        "error": {
            "kind": err.kind().as_str(),
            "message": err.to_string(),
        },
    })
}
