//! Report rendering for the `read` command.
//!
//! JSON goes through `serde_json`; plain and pretty text go through the
//! `ui` primitives.

mod json;
mod text;

pub use json::{failure_json, report_json};
pub use text::{object_line, report_text};
