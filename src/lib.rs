//! docugen - generate project artifacts from an LLM backend and export
//! them as PDF, Markdown, and PNG.
//!
//! The pipeline: a generation flow asks the backend for Markdown (or image
//! payloads), the lexer folds the Markdown into block tokens, the layout
//! engine paginates them into positioned draw ops, and an exporter
//! serializes the result.

pub mod cli;
pub mod config;
pub mod export;
pub mod generate;
pub mod layout;
pub mod markdown;
pub mod mermaid;
pub mod progress;
pub mod upload;

pub use cli::{Cli, Commands, DocumentArgs, FlowchartArgs, RenderArgs, WireframeArgs};
pub use config::{CliOverrides, Config, ConfigError};
pub use export::{ExportError, PdfExporter, PdfOptions};
pub use generate::{
    generate_document, generate_flowchart, generate_wireframes, Backend, DocumentRequest,
    DocumentType, FlowchartRequest, GenerateError, HttpBackend, WireframeRequest, WireframeStyle,
};
pub use layout::{BlockRenderer, PageGeometry, RenderedDocument};
pub use markdown::{lex, Block};
pub use progress::{OutputMode, Stage, StageReporter};
pub use upload::{DataUri, UploadError};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}
