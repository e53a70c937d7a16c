//! Block renderer: walks the block-token sequence and lays each token out
//! onto the paginated document through the page cursor.
//!
//! Transitions are purely sequential; every step reserves vertical space
//! before drawing, line by line, so no draw op can land past the printable
//! area.

use image::DynamicImage;

use super::cursor::{PageCursor, PageGeometry};
use super::document::{DrawOp, RenderedDocument};
use super::metrics::{text_width, FontStyle};
use super::shaper::wrap;
use crate::markdown::{Block, List};

pub(super) const BODY_SIZE: f32 = 12.0;
pub(super) const TABLE_SIZE: f32 = 10.0;
pub(super) const LINE_FACTOR: f32 = 1.25;

const HEADING_SPACING: f32 = 8.0;
const PARAGRAPH_SPACING: f32 = 6.0;
const LIST_SPACING: f32 = 4.0;
const LIST_INDENT: f32 = 18.0;
const BULLET_GAP: f32 = 14.0;
const RULE_HEIGHT: f32 = 9.0;
const BLANK_HEIGHT: f32 = 8.0;
const PLACEHOLDER_HEIGHT: f32 = 80.0;
const IMAGE_SPACING: f32 = 8.0;

/// Line height for a font size.
pub(super) fn line_height(size: f32) -> f32 {
    size * LINE_FACTOR
}

/// Heading font size from depth: larger depth, smaller size, clamped.
fn heading_size(depth: u8) -> f32 {
    (22.0 - 2.0 * f32::from(depth)).clamp(10.0, 20.0)
}

/// Sequential layout state machine over block tokens.
pub struct BlockRenderer {
    pub(super) cursor: PageCursor,
    pub(super) doc: RenderedDocument,
}

impl BlockRenderer {
    /// Create a renderer with a fresh cursor at the top of page one.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            cursor: PageCursor::new(geometry),
            doc: RenderedDocument::new(geometry),
        }
    }

    /// Lay out a full token sequence onto a new document.
    pub fn render(geometry: PageGeometry, blocks: &[Block]) -> RenderedDocument {
        let mut renderer = Self::new(geometry);
        renderer.render_blocks(blocks);
        renderer.finish()
    }

    /// Consume one token at a time, in document order.
    pub fn render_blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.render_block(block);
        }
    }

    pub fn render_block(&mut self, block: &Block) {
        match block {
            Block::Heading { depth, text } => {
                let size = heading_size(*depth);
                self.draw_wrapped(text, size, FontStyle::Bold, 0.0);
                self.cursor.advance(HEADING_SPACING);
            }
            Block::Paragraph { text } => {
                self.draw_wrapped(text, BODY_SIZE, FontStyle::Regular, 0.0);
                self.cursor.advance(PARAGRAPH_SPACING);
            }
            Block::List(list) => {
                self.render_list(list, 0);
                self.cursor.advance(LIST_SPACING);
            }
            Block::Table(table) => self.render_table(table),
            Block::Rule => {
                let geometry = self.cursor.geometry();
                let (page, y) = self.cursor.reserve(RULE_HEIGHT);
                self.doc.push(
                    page,
                    DrawOp::Line {
                        x1: geometry.margin,
                        y1: y + RULE_HEIGHT / 2.0,
                        x2: geometry.width - geometry.margin,
                        y2: y + RULE_HEIGHT / 2.0,
                        thickness: 0.6,
                    },
                );
                self.cursor.advance(RULE_HEIGHT);
            }
            Block::Blank => self.cursor.advance(BLANK_HEIGHT),
        }
    }

    /// Finish layout and hand over the immutable document.
    pub fn finish(mut self) -> RenderedDocument {
        self.doc.ensure_pages(self.cursor.page() + 1);
        self.doc
    }

    /// Shape and draw text at the given indent from the left margin,
    /// reserving each line separately.
    fn draw_wrapped(&mut self, text: &str, size: f32, style: FontStyle, indent: f32) {
        let geometry = self.cursor.geometry();
        let max_width = (geometry.content_width() - indent).max(50.0);
        for line in wrap(text, size, max_width, style) {
            let lh = line_height(size);
            let (page, y) = self.cursor.reserve(lh);
            self.doc.push(
                page,
                DrawOp::Text {
                    x: geometry.margin + indent,
                    y: y + size,
                    size,
                    style,
                    text: line,
                },
            );
            self.cursor.advance(lh);
        }
    }

    /// Render a list at the given nesting depth. Ordered lists count from
    /// the declared start value; nested lists recurse with a fresh counter.
    fn render_list(&mut self, list: &List, depth: usize) {
        let geometry = self.cursor.geometry();
        let indent = depth as f32 * LIST_INDENT;
        let text_indent = indent + BULLET_GAP;
        let max_width = (geometry.content_width() - text_indent).max(50.0);
        let lh = line_height(BODY_SIZE);

        let mut ordinal = list.start;
        for item in &list.items {
            let lines = wrap(&item.text, BODY_SIZE, max_width, FontStyle::Regular);

            if !lines.is_empty() {
                let marker = if list.ordered {
                    format!("{}.", ordinal)
                } else {
                    "\u{2022}".to_string()
                };

                for (i, line) in lines.iter().enumerate() {
                    let (page, y) = self.cursor.reserve(lh);
                    if i == 0 {
                        self.doc.push(
                            page,
                            DrawOp::Text {
                                x: geometry.margin + indent,
                                y: y + BODY_SIZE,
                                size: BODY_SIZE,
                                style: FontStyle::Regular,
                                text: marker.clone(),
                            },
                        );
                    }
                    self.doc.push(
                        page,
                        DrawOp::Text {
                            x: geometry.margin + text_indent,
                            y: y + BODY_SIZE,
                            size: BODY_SIZE,
                            style: FontStyle::Regular,
                            text: line.clone(),
                        },
                    );
                    self.cursor.advance(lh);
                }
            }
            ordinal += 1;

            if let Some(nested) = &item.nested {
                self.render_list(nested, depth + 1);
            }
        }
    }

    /// Draw an outlined box with a centered label where an image should
    /// have appeared.
    pub fn render_placeholder(&mut self, label: &str) {
        let geometry = self.cursor.geometry();
        let (page, y) = self.cursor.reserve(PLACEHOLDER_HEIGHT);
        let box_height = PLACEHOLDER_HEIGHT - 8.0;
        self.doc.push(
            page,
            DrawOp::Rect {
                x: geometry.margin,
                y,
                width: geometry.content_width(),
                height: box_height,
                shade: None,
            },
        );
        let label_width = text_width(label, BODY_SIZE, FontStyle::Regular);
        self.doc.push(
            page,
            DrawOp::Text {
                x: geometry.margin + (geometry.content_width() - label_width).max(0.0) / 2.0,
                y: y + box_height / 2.0 + BODY_SIZE / 2.0,
                size: BODY_SIZE,
                style: FontStyle::Regular,
                text: label.to_string(),
            },
        );
        self.cursor.advance(PLACEHOLDER_HEIGHT);
    }

    /// Place an image scaled to the content width, shrinking further if it
    /// would not fit a single page.
    pub fn render_image(&mut self, image: &DynamicImage) {
        let geometry = self.cursor.geometry();
        let (px_w, px_h) = (image.width().max(1) as f32, image.height().max(1) as f32);

        // Natural size at 96 dpi, capped to the content box.
        let natural_w = px_w * 72.0 / 96.0;
        let mut width = natural_w.min(geometry.content_width());
        let mut height = width * px_h / px_w;
        let max_height = geometry.floor() - geometry.margin;
        if height > max_height {
            height = max_height;
            width = height * px_w / px_h;
        }

        let (page, y) = self.cursor.reserve(height);
        self.doc.push(
            page,
            DrawOp::Image {
                x: geometry.margin,
                y,
                width,
                height,
                image: image.clone(),
            },
        );
        self.cursor.advance(height + IMAGE_SPACING);
    }
}

// ============================================================
// Tests
// ============================================================
