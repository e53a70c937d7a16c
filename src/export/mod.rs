//! Export surfaces: PDF, Markdown, and PNG serialization of generated
//! artifacts.

pub mod markdown;
mod pdf;
pub mod png;

pub use pdf::{PdfExporter, PdfOptions};

use thiserror::Error;

use crate::layout::{BlockRenderer, PageGeometry, RenderedDocument};
use crate::markdown::Block;
use crate::upload::DataUri;

/// Lay out image payloads as a contact sheet: a heading per screen with the
/// decoded image below it. A payload that fails to decode becomes a labeled
/// placeholder box instead of aborting the sheet.
pub fn contact_sheet(geometry: PageGeometry, screens: &[(String, DataUri)]) -> RenderedDocument {
    let mut renderer = BlockRenderer::new(geometry);
    for (name, payload) in screens {
        renderer.render_block(&Block::Heading {
            depth: 2,
            text: name.clone(),
        });
        match png::decode(payload) {
            Ok(image) => renderer.render_image(&image),
            Err(_) => renderer.render_placeholder(&format!("image unavailable: {}", name)),
        }
    }
    renderer.finish()
}

/// Export error types
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("refusing to export an empty document")]
    EmptyDocument,

    #[error("payload is not an image: {0}")]
    NotAnImage(String),

    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================
// Tests
// ============================================================
