//! Context file encoding: uploaded files travel to the generation backend
//! verbatim, as self-describing `data:<mime>;base64,<payload>` URIs.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upload encoding error types
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unsupported file type: {0} (accepted: txt, md, pdf)")]
    UnsupportedType(String),

    #[error("not a data URI")]
    NotADataUri,

    #[error("malformed data URI: {0}")]
    Malformed(String),

    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A decoded `data:` URI payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataUri {
    pub mime: String,
    pub data: Vec<u8>,
}

impl DataUri {
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Read a context file and encode it. The MIME type comes from the
    /// extension; anything but plain text, Markdown, or PDF is rejected.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let mime = match ext.as_str() {
            "txt" => "text/plain",
            "md" | "markdown" => "text/markdown",
            "pdf" => "application/pdf",
            other => return Err(UploadError::UnsupportedType(other.to_string())),
        };
        let data = std::fs::read(path)?;
        Ok(Self::new(mime, data))
    }

    /// Parse a `data:<mime>;base64,<payload>` string.
    pub fn parse(uri: &str) -> Result<Self, UploadError> {
        let rest = uri.strip_prefix("data:").ok_or(UploadError::NotADataUri)?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| UploadError::Malformed("missing ',' separator".into()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| UploadError::Malformed("missing ';base64' marker".into()))?;
        if mime.is_empty() {
            return Err(UploadError::Malformed("empty MIME type".into()));
        }
        let data = BASE64.decode(payload.trim())?;
        Ok(Self::new(mime, data))
    }

    /// Serialize to the self-describing URI form.
    pub fn to_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.data))
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

// ============================================================
// Tests
// ============================================================
