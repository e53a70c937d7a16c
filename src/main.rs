//! docugen - project artifact generator
//!
//! CLI entry point

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use docugen::{
    exit_codes,
    export,
    generate::{
        generate_document, generate_flowchart, generate_wireframes, DocumentRequest,
        FlowchartRequest, HttpBackend, WireframeRequest,
    },
    // CLI
    Cli, Commands, DocumentArgs, FlowchartArgs, RenderArgs, WireframeArgs,
    // Config
    CliOverrides, Config,
    // Layout
    BlockRenderer,
    // Progress
    OutputMode, Stage, StageReporter,
    DataUri, PdfExporter,
};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli);
    let mode = OutputMode::from_verbosity(cli.verbose);

    let result = match &cli.command {
        Commands::Document(args) => run_document(args, &config, mode),
        Commands::Flowchart(args) => run_flowchart(args, &config, mode),
        Commands::Wireframe(args) => run_wireframe(args, &config, mode),
        Commands::Render(args) => run_render(args, &config),
        Commands::Info => run_info(&config),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

// ============ Config Loading ============

/// Load file config and merge CLI overrides on top. A config file named
/// explicitly with `--config` must load; a discovered one that fails to
/// parse is a warning, not a fatal error.
fn load_config(cli: &Cli) -> Config {
    let file_config = match &cli.config {
        Some(path) => match Config::load_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error: Failed to load config file: {}", e);
                std::process::exit(exit_codes::CONFIG_ERROR);
            }
        },
        None => match Config::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        },
    };

    let overrides = CliOverrides {
        endpoint: cli.endpoint.clone(),
        api_key: cli.api_key.clone(),
        model: cli.model.clone(),
        header: cli.header.clone(),
        watermark: cli.watermark.clone(),
        no_footer: cli.no_footer,
    };
    file_config.merge_with_cli(&overrides)
}

fn make_backend(config: &Config) -> Result<HttpBackend> {
    let key = config.api_key()?;
    Ok(HttpBackend::new(config.endpoint(), key, config.model_names()))
}

/// Encode an optional context file, exiting early when the path is missing.
fn load_context(path: Option<&std::path::PathBuf>) -> Result<Option<DataUri>> {
    match path {
        Some(path) => {
            if !path.exists() {
                eprintln!("Error: Context file does not exist: {}", path.display());
                std::process::exit(exit_codes::INPUT_NOT_FOUND);
            }
            Ok(Some(DataUri::from_path(path)?))
        }
        None => Ok(None),
    }
}

// ============ Document Command ============

fn run_document(args: &DocumentArgs, config: &Config, mode: OutputMode) -> Result<()> {
    let description = args
        .project
        .resolve_description()
        .map_err(anyhow::Error::msg)?;
    let context = load_context(args.context.as_ref())?;

    let request = DocumentRequest {
        doc_type: args.doc_type,
        title: args.project.title.clone(),
        description,
        context,
    };

    let mut reporter = StageReporter::new(mode);
    let backend = make_backend(config)?;

    reporter.set_stage(Stage::GeneratingText);
    let rt = tokio::runtime::Runtime::new()?;
    let document = rt.block_on(generate_document(&backend, &request))?;

    reporter.set_stage(Stage::Rendering);
    let rendered = BlockRenderer::render(config.page_geometry(), &document.blocks);

    reporter.set_stage(Stage::Exporting);
    let exporter = PdfExporter::new(config.pdf_options(&document.title));
    exporter.write_file(&rendered, &args.output)?;
    if !args.no_markdown {
        let md_path = args.output.with_extension("md");
        export::markdown::write_raw(&document.markdown, &md_path)?;
    }

    reporter.complete(&format!(
        "Wrote {} ({} pages)",
        args.output.display(),
        rendered.page_count()
    ));
    Ok(())
}

// ============ Flowchart Command ============

fn run_flowchart(args: &FlowchartArgs, config: &Config, mode: OutputMode) -> Result<()> {
    let description = args
        .project
        .resolve_description()
        .map_err(anyhow::Error::msg)?;
    let request = FlowchartRequest {
        title: args.project.title.clone(),
        description,
        context: load_context(args.context.as_ref())?,
    };

    let mut reporter = StageReporter::new(mode);
    let backend = make_backend(config)?;

    reporter.set_stage(Stage::GeneratingText);
    let rt = tokio::runtime::Runtime::new()?;
    let flowchart = rt.block_on(generate_flowchart(&backend, &request))?;

    reporter.set_stage(Stage::Exporting);
    export::markdown::write_raw(&flowchart.markdown, &args.output)?;

    if flowchart.markdown.contains("Diagram error") {
        eprintln!("Warning: generated diagram failed validation; wrote a placeholder");
    }
    reporter.complete(&format!("Wrote {}", args.output.display()));
    Ok(())
}

// ============ Wireframe Command ============

fn run_wireframe(args: &WireframeArgs, config: &Config, mode: OutputMode) -> Result<()> {
    let description = args
        .project
        .resolve_description()
        .map_err(anyhow::Error::msg)?;
    let request = WireframeRequest {
        title: args.project.title.clone(),
        description,
        style: args.style,
        context: load_context(args.context.as_ref())?,
    };

    let mut reporter = StageReporter::new(mode);
    let backend = make_backend(config)?;

    reporter.set_stage(Stage::GeneratingImages);
    let rt = tokio::runtime::Runtime::new()?;
    let screens = rt.block_on(generate_wireframes(&backend, &request))?;

    reporter.set_stage(Stage::Exporting);
    std::fs::create_dir_all(&args.output)?;
    for (i, screen) in screens.iter().enumerate() {
        let filename = format!("{:02}-{}.png", i + 1, slug(&screen.name));
        let path = args.output.join(filename);
        export::png::write_file(&screen.image, &path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if let Some(pdf_path) = &args.pdf {
        let payloads: Vec<(String, DataUri)> = screens
            .iter()
            .map(|s| (s.name.clone(), s.image.clone()))
            .collect();
        let sheet = export::contact_sheet(config.page_geometry(), &payloads);
        let exporter = PdfExporter::new(config.pdf_options(&request.title));
        exporter.write_file(&sheet, pdf_path)?;
    }

    reporter.complete(&format!(
        "Wrote {} screens to {}",
        screens.len(),
        args.output.display()
    ));
    Ok(())
}

/// Filesystem-safe slug from a screen name.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("screen");
    }
    out
}

// ============ Render Command ============

fn run_render(args: &RenderArgs, config: &Config) -> Result<()> {
    if !args.input.exists() {
        eprintln!("Error: Input file does not exist: {}", args.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let source = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let blocks = docugen::lex(&source);
    let rendered = BlockRenderer::render(config.page_geometry(), &blocks);

    let title = match &args.title {
        Some(title) => title.clone(),
        None => file_stem(&args.input),
    };
    let exporter = PdfExporter::new(config.pdf_options(&title));
    exporter.write_file(&rendered, &args.output)?;

    println!(
        "Wrote {} ({} pages)",
        args.output.display(),
        rendered.page_count()
    );
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Document")
        .to_string()
}

// ============ Info Command ============

fn run_info(config: &Config) -> Result<()> {
    println!("docugen v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Backend:");
    println!("  Endpoint: {}", config.endpoint());
    let models = config.model_names();
    println!("  Text model:  {}", models.standard);
    println!("  Pro model:   {}", models.pro);
    println!("  Image model: {}", models.image);
    println!(
        "  API key:     {}",
        if config.api_key().is_ok() {
            "configured"
        } else {
            "NOT SET"
        }
    );

    println!();
    let geometry = config.page_geometry();
    println!("Page:");
    println!("  Size:   {:.2} x {:.2} pt", geometry.width, geometry.height);
    println!("  Margin: {:.2} pt", geometry.margin);

    println!();
    println!("Config File Locations:");
    println!("  Local: ./{}", docugen::config::LOCAL_CONFIG);
    if let Some(config_dir) = dirs::config_dir() {
        println!(
            "  User:  {}",
            config_dir.join("docugen/config.toml").display()
        );
    }

    Ok(())
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Ride Status"), "ride-status");
        assert_eq!(slug("  Login!! "), "login");
        assert_eq!(slug("???"), "screen");
    }
}
