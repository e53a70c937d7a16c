//! Rendered document model: an ordered sequence of pages holding absolutely
//! positioned drawing instructions. Built incrementally by the block
//! renderer and treated as immutable once handed to an exporter.

use super::cursor::PageGeometry;
use super::metrics::FontStyle;

/// One absolutely positioned drawing instruction.
///
/// Coordinates are points, x from the left edge and y top-down from the top
/// edge of the page. Text `y` is the baseline.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// A single text run
    Text {
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        text: String,
    },

    /// A straight line segment
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
    },

    /// An axis-aligned rectangle. `shade` is a gray fill level (0 black,
    /// 1 white); `None` strokes the outline only.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        shade: Option<f32>,
    },

    /// A raster image scaled into the given box
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: image::DynamicImage,
    },
}

/// One page of drawing instructions.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// A fully laid-out, paginated document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    geometry: PageGeometry,
    pages: Vec<Page>,
}

impl RenderedDocument {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.ops.is_empty())
    }

    /// Append an op to the given page, materializing intermediate pages.
    pub fn push(&mut self, page: usize, op: DrawOp) {
        while self.pages.len() <= page {
            self.pages.push(Page::default());
        }
        self.pages[page].ops.push(op);
    }

    /// Make sure at least `count` pages exist, even if empty.
    pub fn ensure_pages(&mut self, count: usize) {
        while self.pages.len() < count {
            self.pages.push(Page::default());
        }
    }
}

// ============================================================
// Tests
// ============================================================
