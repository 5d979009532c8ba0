//! Data objects read off the token, with label normalization and the
//! printable preview used for display.

use crate::token::{ObjectHandle, RawDataObject};

/// Label shown for objects that carry none.
pub const UNNAMED_LABEL: &str = "unnamed";

/// Maximum number of value bytes rendered in a preview.
pub const PREVIEW_LIMIT: usize = 50;

/// A `CKO_DATA` object, copied out of the token.
///
/// Owned snapshot: it stays readable after the token is finalized, though
/// `handle` no longer refers to anything by then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataObject {
    pub label: String,
    pub handle: ObjectHandle,
    pub value: Option<Vec<u8>>,
}

impl DataObject {
    pub fn from_raw(raw: RawDataObject) -> Self {
        Self {
            label: normalize_label(raw.label.as_deref()),
            handle: raw.handle,
            value: raw.value,
        }
    }

    /// Byte length of the value, 0 when absent.
    pub fn size(&self) -> usize {
        self.value.as_ref().map_or(0, Vec::len)
    }

    /// Printable preview of the value, `None` when the value is empty.
    pub fn preview(&self) -> Option<String> {
        match self.value.as_deref() {
            Some(bytes) if !bytes.is_empty() => Some(preview(bytes)),
            _ => None,
        }
    }
}

impl From<RawDataObject> for DataObject {
    fn from(raw: RawDataObject) -> Self {
        Self::from_raw(raw)
    }
}

/// Normalize an object label for display.
///
/// Absent or zero-length labels become [`UNNAMED_LABEL`]; anything else is
/// trimmed of surrounding whitespace.
pub fn normalize_label(label: Option<&str>) -> String {
    match label {
        Some(label) if !label.is_empty() => label.trim().to_string(),
        _ => UNNAMED_LABEL.to_string(),
    }
}

/// Map the first [`PREVIEW_LIMIT`] bytes to printable ASCII, `.` otherwise.
pub fn preview(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|&byte| {
            if (32..=126).contains(&byte) {
                byte as char
            } else {
                '.'
            }
        })
        .collect()
}
