//! Progress reporting for the generation and export pipeline.

use std::fmt;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

/// Stages a generation run moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Preparing,
    /// Waiting on the text backend
    GeneratingText,
    /// Waiting on the image backend
    GeneratingImages,
    /// Laying out the document
    Rendering,
    /// Writing output files
    Exporting,
    Completed,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Preparing => "Preparing",
            Stage::GeneratingText => "Generating text",
            Stage::GeneratingImages => "Generating images",
            Stage::Rendering => "Rendering",
            Stage::Exporting => "Exporting",
            Stage::Completed => "Completed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl OutputMode {
    pub fn from_verbosity(level: u8) -> Self {
        match level {
            0 => OutputMode::Normal,
            _ => OutputMode::Verbose,
        }
    }

    pub fn should_show(&self, required: OutputMode) -> bool {
        use OutputMode::*;
        match (self, required) {
            (Quiet, _) => false,
            (Normal, Quiet | Normal) => true,
            (Verbose, _) => true,
            _ => false,
        }
    }
}

/// Spinner-backed stage reporter for the CLI.
pub struct StageReporter {
    stage: Stage,
    start: Instant,
    mode: OutputMode,
    spinner: Option<ProgressBar>,
}

impl StageReporter {
    pub fn new(mode: OutputMode) -> Self {
        let spinner = if mode.should_show(OutputMode::Normal) {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(std::time::Duration::from_millis(120));
            Some(bar)
        } else {
            None
        };
        Self {
            stage: Stage::Preparing,
            start: Instant::now(),
            mode,
            spinner,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        if let Some(bar) = &self.spinner {
            bar.set_message(stage.name());
        }
    }

    /// Finish the spinner and print the elapsed time.
    pub fn complete(&mut self, summary: &str) {
        self.stage = Stage::Completed;
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }
        if self.mode.should_show(OutputMode::Normal) {
            println!("{} ({:.2}s)", summary, self.start.elapsed().as_secs_f64());
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

// ============================================================
// Tests
// ============================================================
