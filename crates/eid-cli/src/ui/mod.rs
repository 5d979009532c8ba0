//! Terminal UI primitives for the eid CLI.
//!
//! - **Context**: TTY, width, color and unicode detection
//! - **Mode**: output routing (json, plain, pretty)
//! - **Theme**: badges, styles, spinner frames
//! - **Render**: headers, key/value lines, tables
//! - **Progress**: spinner shown while the token is being read
//! - **Format**: string helpers

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use progress::Spinner;
pub use render::{badge, header, hint, kv, print_error, table, Column};
