//! Progress indicator shown while the token is read.
//!
//! Drawn on stderr; stdout is reserved for the report.

use std::io::{self, Write};

use super::context::UiContext;
use super::theme::spinner_frames;

/// A single-frame spinner for an indeterminate blocking step.
pub struct Spinner<'a> {
    ctx: &'a UiContext,
    message: String,
    active: bool,
}

impl<'a> Spinner<'a> {
    pub fn new(ctx: &'a UiContext, message: &str) -> Self {
        Self {
            ctx,
            message: message.to_string(),
            active: false,
        }
    }

    /// Print the spinner line. No-op outside interactive pretty mode.
    pub fn start(&mut self) {
        if !self.ctx.allows_animation() {
            return;
        }
        let frame = spinner_frames(self.ctx.unicode)[0];
        eprint!("\r\x1b[K{} {}...", frame, self.message);
        let _ = io::stderr().flush();
        self.active = true;
    }

    /// Clear the spinner line.
    pub fn clear(&mut self) {
        if self.active {
            eprint!("\r\x1b[K");
            let _ = io::stderr().flush();
            self.active = false;
        }
    }
}

impl Drop for Spinner<'_> {
    fn drop(&mut self) {
        self.clear();
    }
}
