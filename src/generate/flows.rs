//! Generation flows: one orchestration function per artifact kind.
//!
//! Flows are generic over the backend so tests can run them against a mock
//! without any network.

use futures::future::try_join_all;
use serde::Deserialize;
use tracing::info;

use super::backend::{Backend, GenerateError, ModelTier, TextRequest};
use super::prompt;
use super::request::{DocumentRequest, FlowchartRequest, WireframeRequest};
use crate::markdown::{lex, Block};
use crate::mermaid;
use crate::upload::DataUri;

const MAX_SCREENS: usize = 5;

/// A generated requirements document.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub title: String,
    pub markdown: String,
    pub blocks: Vec<Block>,
}

/// A generated flowchart: raw mermaid source plus its markdown rendering,
/// which is an error placeholder when the source fails validation.
#[derive(Debug, Clone)]
pub struct GeneratedFlowchart {
    pub title: String,
    pub mermaid: String,
    pub markdown: String,
}

/// One generated wireframe screen.
#[derive(Debug, Clone)]
pub struct WireframeScreen {
    pub name: String,
    pub description: String,
    pub image: DataUri,
}

/// Generate a requirements document. Requests carrying a context file are
/// routed to the pro model tier.
pub async fn generate_document<B: Backend>(
    backend: &B,
    request: &DocumentRequest,
) -> Result<GeneratedDocument, GenerateError> {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let (system, user) = prompt::document_prompt(request, &date);
    let tier = tier_for(request.context.as_ref());

    let markdown = backend
        .generate_text(&TextRequest {
            system,
            user,
            tier,
            attachment: request.context.clone(),
        })
        .await?;
    if markdown.trim().is_empty() {
        return Err(GenerateError::EmptyResult("document"));
    }

    let blocks = lex(&markdown);
    info!(
        doc_type = request.doc_type.short_name(),
        blocks = blocks.len(),
        "document generated"
    );
    Ok(GeneratedDocument {
        title: request.title.clone(),
        markdown,
        blocks,
    })
}

#[derive(Deserialize)]
struct FlowchartEnvelope {
    #[serde(rename = "mermaidSyntax")]
    mermaid_syntax: String,
}

/// Generate a flowchart. The backend is asked for a JSON envelope; replies
/// wrapped in a code fence or consisting of bare mermaid are still accepted.
/// Structurally invalid diagrams become an inline error placeholder, not an
/// error.
pub async fn generate_flowchart<B: Backend>(
    backend: &B,
    request: &FlowchartRequest,
) -> Result<GeneratedFlowchart, GenerateError> {
    let (system, user) = prompt::flowchart_prompt(request);
    let reply = backend
        .generate_text(&TextRequest {
            system,
            user,
            tier: tier_for(request.context.as_ref()),
            attachment: request.context.clone(),
        })
        .await?;

    let body = strip_fence(&reply);
    let source = match serde_json::from_str::<FlowchartEnvelope>(body) {
        Ok(envelope) => envelope.mermaid_syntax,
        // Not the envelope; treat the reply as diagram source directly.
        Err(_) => body.to_string(),
    };
    if source.trim().is_empty() {
        return Err(GenerateError::EmptyResult("flowchart"));
    }

    let markdown = mermaid::to_markdown_block(&source);
    Ok(GeneratedFlowchart {
        title: request.title.clone(),
        mermaid: source,
        markdown,
    })
}

#[derive(Deserialize)]
struct ScreenSpec {
    name: String,
    #[serde(default)]
    description: String,
}

/// Generate a wireframe set: one text call for the screen list, then one
/// image call per screen, issued concurrently. Any single image failure
/// fails the whole batch; no partial sets are returned.
pub async fn generate_wireframes<B: Backend>(
    backend: &B,
    request: &WireframeRequest,
) -> Result<Vec<WireframeScreen>, GenerateError> {
    let (system, user) = prompt::wireframe_list_prompt(request);
    let reply = backend
        .generate_text(&TextRequest {
            system,
            user,
            tier: tier_for(request.context.as_ref()),
            attachment: request.context.clone(),
        })
        .await?;

    let mut screens: Vec<ScreenSpec> = serde_json::from_str(strip_fence(&reply))
        .map_err(|e| GenerateError::BadPayload(format!("screen list: {}", e)))?;
    screens.retain(|s| !s.name.trim().is_empty());
    if screens.is_empty() {
        return Err(GenerateError::EmptyResult("wireframe screen list"));
    }
    screens.truncate(MAX_SCREENS);
    info!(screens = screens.len(), "wireframe screen list generated");

    try_join_all(screens.into_iter().map(|screen| async move {
        let image_prompt = prompt::wireframe_image_prompt(request, &screen.name, &screen.description);
        let image = backend.generate_image(&image_prompt).await?;
        Ok(WireframeScreen {
            name: screen.name,
            description: screen.description,
            image,
        })
    }))
    .await
}

/// Requests carrying a context file are routed to the pro model tier.
fn tier_for(context: Option<&DataUri>) -> ModelTier {
    if context.is_some() {
        ModelTier::Pro
    } else {
        ModelTier::Standard
    }
}

/// Strip a surrounding markdown code fence, with or without a language tag.
fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.split_once('\n').map(|(_, b)| b) else {
        return trimmed;
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::request::{DocumentType, WireframeStyle};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Scripted backend: pops canned text replies in order; images either
    /// always succeed or fail for a named screen.
    struct MockBackend {
        texts: RefCell<VecDeque<String>>,
        failing_screen: Option<&'static str>,
        image_calls: RefCell<usize>,
        last_tier: RefCell<Option<ModelTier>>,
    }

    impl MockBackend {
        fn with_texts(texts: &[&str]) -> Self {
            Self {
                texts: RefCell::new(texts.iter().map(|t| t.to_string()).collect()),
                failing_screen: None,
                image_calls: RefCell::new(0),
                last_tier: RefCell::new(None),
            }
        }
    }

    impl Backend for MockBackend {
        async fn generate_text(&self, request: &TextRequest) -> Result<String, GenerateError> {
            *self.last_tier.borrow_mut() = Some(request.tier);
            self.texts
                .borrow_mut()
                .pop_front()
                .ok_or(GenerateError::EmptyResult("text completion"))
        }

        async fn generate_image(&self, prompt: &str) -> Result<DataUri, GenerateError> {
            *self.image_calls.borrow_mut() += 1;
            if let Some(name) = self.failing_screen {
                if prompt.contains(name) {
                    return Err(GenerateError::Api {
                        status: 500,
                        message: "boom".into(),
                    });
                }
            }
            Ok(DataUri::new("image/png", vec![1, 2, 3]))
        }
    }

    fn doc_request() -> DocumentRequest {
        DocumentRequest {
            doc_type: DocumentType::Brd,
            title: "Ride Share App".into(),
            description: "An app for sharing rides.".into(),
            context: None,
        }
    }

    #[tokio::test]
    async fn test_generate_document_lexes_reply() {
        let reply = prompt::scaffold(DocumentType::Brd, "Ride Share App", "desc", "2026-08-28");
        let backend = MockBackend::with_texts(&[&reply]);
        let doc = generate_document(&backend, &doc_request()).await.unwrap();
        assert!(!doc.blocks.is_empty());
        assert!(matches!(&doc.blocks[0], Block::Heading { depth: 1, .. }));
        assert!(doc.markdown.contains("Functional Requirements"));
    }

    #[tokio::test]
    async fn test_context_file_upgrades_model_tier() {
        let reply = prompt::scaffold(DocumentType::Brd, "T", "d", "2026-08-28");
        let backend = MockBackend::with_texts(&[&reply]);
        let mut request = doc_request();
        request.context = Some(DataUri::new("text/plain", b"notes".to_vec()));
        generate_document(&backend, &request).await.unwrap();
        assert_eq!(*backend.last_tier.borrow(), Some(ModelTier::Pro));

        let backend = MockBackend::with_texts(&[&reply]);
        generate_document(&backend, &doc_request()).await.unwrap();
        assert_eq!(*backend.last_tier.borrow(), Some(ModelTier::Standard));
    }

    #[tokio::test]
    async fn test_generate_document_rejects_blank_reply() {
        let backend = MockBackend::with_texts(&["   \n"]);
        assert!(matches!(
            generate_document(&backend, &doc_request()).await,
            Err(GenerateError::EmptyResult(_))
        ));
    }

    fn flow_request() -> FlowchartRequest {
        FlowchartRequest {
            title: "T".into(),
            description: "d".into(),
            context: None,
        }
    }

    #[tokio::test]
    async fn test_generate_flowchart_from_envelope() {
        let backend = MockBackend::with_texts(&[
            r#"{"mermaidSyntax": "graph TD\n    A[Open App] --> B[Request Ride]"}"#,
        ]);
        let flow = generate_flowchart(&backend, &flow_request()).await.unwrap();
        assert!(flow.mermaid.starts_with("graph TD"));
        assert!(flow.markdown.starts_with("```mermaid"));
    }

    #[tokio::test]
    async fn test_generate_flowchart_from_fenced_envelope() {
        let backend = MockBackend::with_texts(&[
            "```json\n{\"mermaidSyntax\": \"graph TD\\nA --> B\"}\n```",
        ]);
        let flow = generate_flowchart(&backend, &flow_request()).await.unwrap();
        assert!(flow.mermaid.starts_with("graph TD"));
    }

    #[tokio::test]
    async fn test_generate_flowchart_invalid_diagram_is_placeholder() {
        let backend =
            MockBackend::with_texts(&[r#"{"mermaidSyntax": "this is not a diagram"}"#]);
        let flow = generate_flowchart(&backend, &flow_request()).await.unwrap();
        assert!(flow.markdown.contains("Diagram error"));
    }

    fn wire_request() -> WireframeRequest {
        WireframeRequest {
            title: "Ride Share App".into(),
            description: "d".into(),
            style: WireframeStyle::Clean,
            context: None,
        }
    }

    const SCREEN_LIST: &str = r#"[
        {"name": "Login", "description": "Email and password."},
        {"name": "Home", "description": "Map with nearby drivers."},
        {"name": "Ride Status", "description": "Live trip progress."},
        {"name": "Profile", "description": "Account settings."}
    ]"#;

    #[tokio::test]
    async fn test_generate_wireframes_full_set() {
        let backend = MockBackend::with_texts(&[SCREEN_LIST]);
        let screens = generate_wireframes(&backend, &wire_request()).await.unwrap();
        assert_eq!(screens.len(), 4);
        assert_eq!(screens[0].name, "Login");
        assert!(screens.iter().all(|s| s.image.is_image()));
        assert_eq!(*backend.image_calls.borrow(), 4);
    }

    #[tokio::test]
    async fn test_generate_wireframes_one_failure_fails_batch() {
        let mut backend = MockBackend::with_texts(&[SCREEN_LIST]);
        backend.failing_screen = Some("Ride Status");
        assert!(matches!(
            generate_wireframes(&backend, &wire_request()).await,
            Err(GenerateError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_wireframes_caps_screen_count() {
        let oversized: Vec<String> = (0..9)
            .map(|i| format!(r#"{{"name": "Screen {}", "description": "x"}}"#, i))
            .collect();
        let list = format!("[{}]", oversized.join(","));
        let backend = MockBackend::with_texts(&[&list]);
        let screens = generate_wireframes(&backend, &wire_request()).await.unwrap();
        assert_eq!(screens.len(), MAX_SCREENS);
    }

    #[tokio::test]
    async fn test_generate_wireframes_rejects_prose_reply() {
        let backend = MockBackend::with_texts(&["Sure! Here are some screens."]);
        assert!(matches!(
            generate_wireframes(&backend, &wire_request()).await,
            Err(GenerateError::BadPayload(_))
        ));
    }

    #[test]
    fn test_strip_fence_variants() {
        assert_eq!(strip_fence("plain"), "plain");
        assert_eq!(strip_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fence("```\nbody\n```"), "body");
    }
}
