//! Prompt assembly for the generation backend.
//!
//! Each artifact has a fixed instruction template; the project title and
//! description are interpolated into it. `scaffold` produces the same
//! document skeleton locally, used as a deterministic fallback and as the
//! shape the backend is asked to fill in.

use super::request::{DocumentRequest, DocumentType, FlowchartRequest, WireframeRequest};

/// Sections each document template must contain, in order.
pub fn sections(doc_type: DocumentType) -> &'static [&'static str] {
    match doc_type {
        DocumentType::Brd => &[
            "Executive Summary",
            "Project Goals",
            "Target Audience",
            "Scope",
            "Functional Requirements",
            "Non-Functional Requirements",
            "Technical Requirements",
            "Stakeholders",
            "Risks and Mitigations",
            "Roadmap",
            "Approval",
        ],
        DocumentType::Frs => &[
            "Document Control",
            "Introduction",
            "Scope",
            "Functional Requirements",
            "Non-Functional Requirements",
            "User Interface Requirements",
            "Data Requirements",
            "Acceptance Criteria",
        ],
        DocumentType::Srs => &[
            "Introduction",
            "Overall Description",
            "System Features",
            "Functional Requirements",
            "Non-Functional Requirements",
            "External Interface Requirements",
            "Appendix",
        ],
    }
}

/// Deterministic markdown skeleton for a document: title heading, metadata
/// line, then one numbered section heading per template section.
pub fn scaffold(doc_type: DocumentType, title: &str, description: &str, date: &str) -> String {
    let mut out = format!(
        "# {}: {}\n\n**Date:** {}\n\n{}\n\n",
        doc_type.short_name(),
        title,
        date,
        description.trim()
    );
    for (i, section) in sections(doc_type).iter().enumerate() {
        out.push_str(&format!("## {}. {}\n\n", i + 1, section));
    }
    out
}

/// System and user prompts for a requirements document.
pub fn document_prompt(req: &DocumentRequest, date: &str) -> (String, String) {
    let system = format!(
        "You are a senior business analyst. Write a complete {} ({}) in \
         GitHub-flavored Markdown. Use '#' for the document title and '##' \
         for sections. Use bullet lists for requirements and a table for \
         any glossary. Do not wrap the document in a code fence.",
        req.doc_type.full_name(),
        req.doc_type.short_name(),
    );
    let user = format!(
        "Project title: {}\nDate: {}\n\nProject description:\n{}\n\n\
         Produce the full document with exactly these sections:\n{}\n",
        req.title,
        date,
        req.description.trim(),
        sections(req.doc_type)
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {}", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    (system, user)
}

/// System and user prompts for a flowchart. The reply must be a JSON
/// envelope so the diagram can be pulled out without scraping prose.
pub fn flowchart_prompt(req: &FlowchartRequest) -> (String, String) {
    let system = "You are a process analyst. Reply with a single JSON object \
                  of the form {\"mermaidSyntax\": \"...\"} and nothing else. \
                  The value must be valid mermaid flowchart syntax starting \
                  with 'graph TD'. Node labels may contain only letters, \
                  digits, and spaces."
        .to_string();
    let user = format!(
        "Create a flowchart of the main user journey for this project.\n\n\
         Title: {}\nDescription:\n{}\n",
        req.title,
        req.description.trim(),
    );
    (system, user)
}

/// System and user prompts for the wireframe screen list. The reply must be
/// a JSON array of screen objects.
pub fn wireframe_list_prompt(req: &WireframeRequest) -> (String, String) {
    let system = "You are a product designer. Reply with a single JSON array \
                  of 4 to 5 objects, each {\"name\": \"...\", \"description\": \
                  \"...\"}, and nothing else. Each object names one key screen \
                  of the application and describes its layout in one or two \
                  sentences."
        .to_string();
    let user = format!(
        "List the key screens to wireframe for this project.\n\n\
         Title: {}\nDescription:\n{}\n",
        req.title,
        req.description.trim(),
    );
    (system, user)
}

/// Image prompt for a single wireframe screen.
pub fn wireframe_image_prompt(req: &WireframeRequest, name: &str, description: &str) -> String {
    format!(
        "A {} of the '{}' screen for a mobile and web application called \
         '{}'. {} No photographic backgrounds, no text paragraphs, \
         UI layout only.",
        req.style.descriptor(),
        name,
        req.title,
        description.trim(),
    )
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::request::WireframeStyle;
    use crate::markdown::{lex, Block};

    #[test]
    fn test_scaffold_ride_share_brd() {
        let text = scaffold(
            DocumentType::Brd,
            "Ride Share App",
            "An app for sharing rides.",
            "2026-08-28",
        );
        assert!(text.starts_with("# BRD: Ride Share App\n"));
        for section in ["Project Goals", "Scope", "Functional Requirements", "Non-Functional Requirements"] {
            assert!(text.contains(section), "missing section {}", section);
        }

        // The skeleton must lex into a heading-led block sequence.
        let blocks = lex(&text);
        assert!(matches!(&blocks[0], Block::Heading { depth: 1, text } if text.contains("Ride Share App")));
    }

    #[test]
    fn test_scaffold_sections_are_numbered() {
        let text = scaffold(DocumentType::Srs, "X", "y", "2026-08-28");
        assert!(text.contains("## 1. Introduction"));
        assert!(text.contains(&format!("## {}. Appendix", sections(DocumentType::Srs).len())));
    }

    #[test]
    fn test_document_prompt_carries_inputs() {
        let req = DocumentRequest {
            doc_type: DocumentType::Frs,
            title: "Inventory Tracker".into(),
            description: "Tracks warehouse stock.".into(),
            context: None,
        };
        let (system, user) = document_prompt(&req, "2026-08-28");
        assert!(system.contains("Functional Requirements Specification"));
        assert!(user.contains("Inventory Tracker"));
        assert!(user.contains("Tracks warehouse stock."));
    }

    #[test]
    fn test_flowchart_prompt_demands_json_envelope() {
        let req = FlowchartRequest {
            title: "T".into(),
            description: "d".into(),
            context: None,
        };
        let (system, _) = flowchart_prompt(&req);
        assert!(system.contains("mermaidSyntax"));
    }

    #[test]
    fn test_wireframe_image_prompt_uses_style() {
        let req = WireframeRequest {
            title: "T".into(),
            description: "d".into(),
            style: WireframeStyle::Sketchy,
            context: None,
        };
        let prompt = wireframe_image_prompt(&req, "Login", "Email and password fields.");
        assert!(prompt.contains("sketch"));
        assert!(prompt.contains("Login"));
    }
}
