//! Plain-text collection for inline markdown content.
//!
//! Emphasis, code, strikethrough and link markers are structural events in
//! the lexer stream, so collecting only the text payloads strips the inline
//! markup without any string surgery on the source.

/// Accumulates the plain-text runs of one inline span.
#[derive(Debug, Default)]
pub struct InlineText {
    buf: String,
}

impl InlineText {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text or code run
    pub fn push_run(&mut self, run: &str) {
        self.buf.push_str(run);
    }

    /// Append a soft or hard line break as a single space
    pub fn push_break(&mut self) {
        if !self.buf.ends_with(' ') {
            self.buf.push(' ');
        }
    }

    /// Whether anything has been collected
    pub fn is_empty(&self) -> bool {
        self.buf.trim().is_empty()
    }

    /// Take the collected text, trimmed
    pub fn take(&mut self) -> String {
        let text = self.buf.trim().to_string();
        self.buf.clear();
        text
    }
}

// ============================================================
// Tests
// ============================================================
