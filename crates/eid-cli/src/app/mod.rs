//! Application-level plumbing for the eid CLI.
//!
//! - Platform and middleware path resolution from flags
//! - The per-run context handed to command handlers

mod context;
mod resolver;

pub use context::AppContext;
