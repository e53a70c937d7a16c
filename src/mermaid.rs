//! Structural validation for generated Mermaid flowchart syntax.
//!
//! The backend is asked for a flowchart; what comes back is not always one.
//! Validation failures never propagate: the caller receives an inline error
//! placeholder to render in place of the diagram.

use thiserror::Error;

/// Mermaid validation error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MermaidError {
    #[error("diagram is empty")]
    Empty,

    #[error("unrecognized diagram header: {0:?}")]
    BadHeader(String),

    #[error("diagram has a header but no body")]
    NoBody,

    #[error("unbalanced {0:?} bracket")]
    UnbalancedBracket(char),
}

const DIRECTIONS: [&str; 6] = ["TD", "TB", "LR", "RL", "BT", ""];

/// Check that `source` is structurally plausible mermaid flowchart syntax:
/// a recognized header line, balanced brackets, and a non-empty body.
pub fn validate(source: &str) -> Result<(), MermaidError> {
    let mut lines = source.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines.next().ok_or(MermaidError::Empty)?;
    let mut parts = header.split_whitespace();
    let keyword = parts.next().unwrap_or("");
    let direction = parts.next().unwrap_or("");
    if !matches!(keyword, "graph" | "flowchart") || !DIRECTIONS.contains(&direction) {
        return Err(MermaidError::BadHeader(header.to_string()));
    }

    if lines.next().is_none() {
        return Err(MermaidError::NoBody);
    }

    check_brackets(source)
}

fn check_brackets(source: &str) -> Result<(), MermaidError> {
    let mut stack = Vec::new();
    for c in source.chars() {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return Err(MermaidError::UnbalancedBracket(c));
                }
            }
            _ => {}
        }
    }
    match stack.pop() {
        Some(open) => Err(MermaidError::UnbalancedBracket(open)),
        None => Ok(()),
    }
}

/// Strip the characters the generation prompt forbids inside node labels,
/// keeping only alphanumerics and spaces.
pub fn sanitize_label(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render diagram source as a markdown block: a fenced `mermaid` block when
/// valid, an inline error placeholder when not.
pub fn to_markdown_block(source: &str) -> String {
    match validate(source) {
        Ok(()) => format!("```mermaid\n{}\n```\n", source.trim()),
        Err(e) => format!("> **Diagram error:** {}\n", e),
    }
}

// ============================================================
// Tests
// ============================================================
