//! Request types for the generation flows.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::upload::DataUri;

/// The three requirements-document templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Business Requirements Document
    Brd,
    /// Functional Requirements Specification
    Frs,
    /// Software Requirements Specification
    Srs,
}

impl DocumentType {
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Brd => "BRD",
            Self::Frs => "FRS",
            Self::Srs => "SRS",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Self::Brd => "Business Requirements Document",
            Self::Frs => "Functional Requirements Specification",
            Self::Srs => "Software Requirements Specification",
        }
    }
}

/// Visual register for generated wireframe images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireframeStyle {
    /// Hand-drawn, low fidelity
    Sketchy,
    /// Flat grayscale boxes and labels
    Clean,
    /// Polished UI mockup with realistic chrome
    HighFidelity,
}

impl WireframeStyle {
    /// Phrase injected into the image prompt.
    pub fn descriptor(self) -> &'static str {
        match self {
            Self::Sketchy => "rough hand-drawn pencil sketch wireframe, low fidelity",
            Self::Clean => "clean flat grayscale wireframe with simple boxes and labels",
            Self::HighFidelity => "high fidelity UI mockup with realistic styling",
        }
    }
}

/// A requirements-document generation request.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    pub doc_type: DocumentType,
    pub title: String,
    pub description: String,
    /// Optional uploaded context file forwarded to the backend
    pub context: Option<DataUri>,
}

/// A flowchart generation request.
#[derive(Debug, Clone)]
pub struct FlowchartRequest {
    pub title: String,
    pub description: String,
    pub context: Option<DataUri>,
}

/// A wireframe-set generation request.
#[derive(Debug, Clone)]
pub struct WireframeRequest {
    pub title: String,
    pub description: String,
    pub style: WireframeStyle,
    pub context: Option<DataUri>,
}

// ============================================================
// Tests
// ============================================================
