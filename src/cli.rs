//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::generate::{DocumentType, WireframeStyle};

#[derive(Parser)]
#[command(
    name = "docugen",
    version,
    about = "Generate project artifacts (requirements documents, flowcharts, wireframes) and export them as PDF, Markdown, and PNG"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (default: ./docugen.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// API endpoint base URL (overrides config)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// API key (overrides config and environment)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Text model name (overrides config)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Header line printed on every PDF page
    #[arg(long, global = true)]
    pub header: Option<String>,

    /// Watermark text printed behind the PDF content
    #[arg(long, global = true)]
    pub watermark: Option<String>,

    /// Disable the page-number footer
    #[arg(long, global = true)]
    pub no_footer: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a requirements document
    Document(DocumentArgs),

    /// Generate a mermaid flowchart of the main user journey
    Flowchart(FlowchartArgs),

    /// Generate a set of wireframe screen images
    Wireframe(WireframeArgs),

    /// Render an existing Markdown file to PDF, no backend involved
    Render(RenderArgs),

    /// Show version, config locations, and resolved settings
    Info,
}

/// Title and description shared by every generation command.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project title
    #[arg(short, long)]
    pub title: String,

    /// Project description text
    #[arg(short, long, conflicts_with = "description_file")]
    pub description: Option<String>,

    /// Read the project description from a file
    #[arg(long)]
    pub description_file: Option<PathBuf>,
}

impl ProjectArgs {
    /// Resolve the description from the flag or the file; one of the two
    /// must be present and non-empty.
    pub fn resolve_description(&self) -> Result<String, String> {
        let text = match (&self.description, &self.description_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?,
            (None, None) => {
                return Err("provide --description or --description-file".to_string())
            }
        };
        if text.trim().is_empty() {
            return Err("project description is empty".to_string());
        }
        Ok(text)
    }
}

#[derive(Args, Debug)]
pub struct DocumentArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Document template to generate
    #[arg(long, value_enum, default_value = "brd")]
    pub doc_type: DocumentType,

    /// Context file (txt, md, or pdf) forwarded to the backend
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Output PDF path; a sibling .md is written next to it
    #[arg(short, long, default_value = "document.pdf")]
    pub output: PathBuf,

    /// Skip the Markdown sibling file
    #[arg(long)]
    pub no_markdown: bool,
}

#[derive(Args, Debug)]
pub struct FlowchartArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Context file (txt, md, or pdf) forwarded to the backend
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Output Markdown path holding the mermaid fence
    #[arg(short, long, default_value = "flowchart.md")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct WireframeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Wireframe visual style
    #[arg(long, value_enum, default_value = "clean")]
    pub style: WireframeStyle,

    /// Context file (txt, md, or pdf) forwarded to the backend
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Output directory for the PNG files
    #[arg(short, long, default_value = "wireframes")]
    pub output: PathBuf,

    /// Also write a contact-sheet PDF of all screens
    #[arg(long)]
    pub pdf: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Input Markdown file
    pub input: PathBuf,

    /// Output PDF path
    #[arg(short, long, default_value = "output.pdf")]
    pub output: PathBuf,

    /// PDF title metadata; defaults to the input file stem
    #[arg(long)]
    pub title: Option<String>,
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_document_command() {
        let cli = Cli::parse_from([
            "docugen", "document", "--title", "Ride Share App", "--description", "rides",
            "--doc-type", "srs", "-o", "out.pdf",
        ]);
        match cli.command {
            Commands::Document(args) => {
                assert_eq!(args.project.title, "Ride Share App");
                assert_eq!(args.doc_type, DocumentType::Srs);
                assert_eq!(args.output, PathBuf::from("out.pdf"));
            }
            _ => panic!("expected document command"),
        }
    }

    #[test]
    fn test_description_sources_conflict() {
        let result = Cli::try_parse_from([
            "docugen", "flowchart", "--title", "T", "--description", "x",
            "--description-file", "d.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_description_requires_one_source() {
        let args = ProjectArgs {
            title: "T".into(),
            description: None,
            description_file: None,
        };
        assert!(args.resolve_description().is_err());

        let args = ProjectArgs {
            title: "T".into(),
            description: Some("  ".into()),
            description_file: None,
        };
        assert!(args.resolve_description().is_err());
    }

    #[test]
    fn test_global_overrides_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "docugen", "render", "in.md", "--watermark", "DRAFT", "--no-footer",
        ]);
        assert_eq!(cli.watermark.as_deref(), Some("DRAFT"));
        assert!(cli.no_footer);
    }
}
