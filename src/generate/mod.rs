//! Artifact generation: request types, prompt assembly, the backend
//! abstraction, and the per-artifact orchestration flows.

mod backend;
mod flows;
pub mod prompt;
mod request;

pub use backend::{Backend, GenerateError, HttpBackend, ModelNames, ModelTier, TextRequest};
pub use flows::{
    generate_document, generate_flowchart, generate_wireframes, GeneratedDocument,
    GeneratedFlowchart, WireframeScreen,
};
pub use request::{DocumentRequest, DocumentType, FlowchartRequest, WireframeRequest, WireframeStyle};
