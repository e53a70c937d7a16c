//! Markdown export: the generated document written back out as plain
//! Markdown text.

use std::path::Path;

use super::ExportError;
use crate::markdown::{write, Block};

/// Serialize blocks to Markdown text.
pub fn to_string(blocks: &[Block]) -> Result<String, ExportError> {
    if blocks.is_empty() {
        return Err(ExportError::EmptyDocument);
    }
    Ok(write(blocks))
}

/// Write blocks to a `.md` file.
pub fn write_file(blocks: &[Block], path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, to_string(blocks)?)?;
    Ok(())
}

/// Write already-rendered Markdown text to a file. Used when the source
/// text should pass through untouched, for example mermaid fences that the
/// block lexer would flatten.
pub fn write_raw(text: &str, path: &Path) -> Result<(), ExportError> {
    if text.trim().is_empty() {
        return Err(ExportError::EmptyDocument);
    }
    std::fs::write(path, text)?;
    Ok(())
}

// ============================================================
// Tests
// ============================================================
