//! Table grid layout: column sizing, styled header row, row-by-row
//! pagination with header repetition.

use super::document::DrawOp;
use super::metrics::{text_width, FontStyle};
use super::renderer::{line_height, BlockRenderer, TABLE_SIZE};
use super::shaper::wrap;
use crate::markdown::Table;

const CELL_PAD: f32 = 4.0;
const MIN_COL_WIDTH: f32 = 30.0;
const HEADER_SHADE: f32 = 0.88;
const GRID_THICKNESS: f32 = 0.4;
const TABLE_SPACING: f32 = 8.0;

impl BlockRenderer {
    /// Lay out a table as a full-width grid. Rows reserve space one at a
    /// time; a row that would overflow moves to a fresh page, where the
    /// header row is drawn again first. A row taller than a whole page is
    /// sliced across pages line by line instead. The cursor lands just
    /// below the final row.
    pub(super) fn render_table(&mut self, table: &Table) {
        if table.is_empty() {
            return;
        }

        let widths = self.column_widths(table);
        let geometry = self.cursor.geometry();
        let page_room = geometry.floor() - geometry.margin;

        self.draw_table_row(&table.header, &widths, FontStyle::Bold, Some(HEADER_SHADE));

        for row in &table.rows {
            let height = self.table_row_height(row, &widths, FontStyle::Regular);
            if height > page_room {
                self.draw_tall_row(row, &widths, FontStyle::Regular);
                continue;
            }
            let before = self.cursor.page();
            let (page, _) = self.cursor.reserve(height);
            if page != before {
                self.draw_table_row(&table.header, &widths, FontStyle::Bold, Some(HEADER_SHADE));
            }
            self.draw_table_row(row, &widths, FontStyle::Regular, None);
        }

        self.cursor.advance(TABLE_SPACING);
    }

    /// Column widths proportional to the widest cell content, scaled so the
    /// grid always spans the full content width.
    fn column_widths(&self, table: &Table) -> Vec<f32> {
        let cols = table.column_count();
        let mut widths = vec![MIN_COL_WIDTH; cols];

        let mut note = |i: usize, cell: &str, style: FontStyle| {
            let w = text_width(cell, TABLE_SIZE, style) + 2.0 * CELL_PAD;
            widths[i] = widths[i].max(w);
        };
        for (i, cell) in table.header.iter().enumerate() {
            note(i, cell, FontStyle::Bold);
        }
        for row in &table.rows {
            for (i, cell) in row.iter().enumerate().take(cols) {
                note(i, cell, FontStyle::Regular);
            }
        }

        let total: f32 = widths.iter().sum();
        let scale = self.cursor.geometry().content_width() / total;
        widths.iter().map(|w| w * scale).collect()
    }

    fn table_row_height(&self, cells: &[String], widths: &[f32], style: FontStyle) -> f32 {
        let lh = line_height(TABLE_SIZE);
        let max_lines = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                wrap(cell, TABLE_SIZE, (w - 2.0 * CELL_PAD).max(10.0), style).len()
            })
            .max()
            .unwrap_or(1)
            .max(1);
        max_lines as f32 * lh + 2.0 * CELL_PAD
    }

    fn draw_table_row(
        &mut self,
        cells: &[String],
        widths: &[f32],
        style: FontStyle,
        shade: Option<f32>,
    ) {
        let geometry = self.cursor.geometry();
        let height = self.table_row_height(cells, widths, style);
        let table_width: f32 = widths.iter().sum();
        let (page, y) = self.cursor.reserve(height);

        if let Some(shade) = shade {
            self.doc.push(
                page,
                DrawOp::Rect {
                    x: geometry.margin,
                    y,
                    width: table_width,
                    height,
                    shade: Some(shade),
                },
            );
        }

        let lh = line_height(TABLE_SIZE);
        let mut x = geometry.margin;
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let lines = wrap(cell, TABLE_SIZE, (width - 2.0 * CELL_PAD).max(10.0), style);
            for (j, line) in lines.into_iter().enumerate() {
                self.doc.push(
                    page,
                    DrawOp::Text {
                        x: x + CELL_PAD,
                        y: y + CELL_PAD + j as f32 * lh + TABLE_SIZE,
                        size: TABLE_SIZE,
                        style,
                        text: line,
                    },
                );
            }
            x += width;
        }

        self.draw_grid_segment(page, y, height, widths);
        self.cursor.advance(height);
    }

    /// Draw a row whose wrapped cells are taller than a whole page. The
    /// cell lines are sliced into page-sized segments, each reserved before
    /// drawing, so no slice reaches past the printable area. Every segment
    /// gets its own grid box so the row reads as one cell continued across
    /// the break.
    fn draw_tall_row(&mut self, cells: &[String], widths: &[f32], style: FontStyle) {
        let geometry = self.cursor.geometry();
        let lh = line_height(TABLE_SIZE);

        let wrapped: Vec<Vec<String>> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                wrap(cell, TABLE_SIZE, (w - 2.0 * CELL_PAD).max(10.0), style)
            })
            .collect();
        let total_lines = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);

        let mut start = 0;
        while start < total_lines {
            let (page, y) = self.cursor.reserve(lh + 2.0 * CELL_PAD);
            let room = geometry.floor() - y - 2.0 * CELL_PAD;
            let take = ((room / lh) as usize).max(1).min(total_lines - start);
            let height = take as f32 * lh + 2.0 * CELL_PAD;

            let mut x = geometry.margin;
            for (i, width) in widths.iter().enumerate() {
                for (j, line) in wrapped[i].iter().skip(start).take(take).enumerate() {
                    self.doc.push(
                        page,
                        DrawOp::Text {
                            x: x + CELL_PAD,
                            y: y + CELL_PAD + j as f32 * lh + TABLE_SIZE,
                            size: TABLE_SIZE,
                            style,
                            text: line.clone(),
                        },
                    );
                }
                x += width;
            }

            self.draw_grid_segment(page, y, height, widths);
            self.cursor.advance(height);
            start += take;
        }
    }

    /// Grid box: top and bottom edges plus every column boundary.
    fn draw_grid_segment(&mut self, page: usize, y: f32, height: f32, widths: &[f32]) {
        let geometry = self.cursor.geometry();
        let table_width: f32 = widths.iter().sum();
        let right = geometry.margin + table_width;
        for line_y in [y, y + height] {
            self.doc.push(
                page,
                DrawOp::Line {
                    x1: geometry.margin,
                    y1: line_y,
                    x2: right,
                    y2: line_y,
                    thickness: GRID_THICKNESS,
                },
            );
        }
        let mut x = geometry.margin;
        for width in widths.iter().chain(std::iter::once(&0.0)) {
            self.doc.push(
                page,
                DrawOp::Line {
                    x1: x,
                    y1: y,
                    x2: x,
                    y2: y + height,
                    thickness: GRID_THICKNESS,
                },
            );
            x += width;
        }
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::cursor::PageGeometry;
    use crate::markdown::Block;

    #[test]
    fn test_column_widths_span_content_width() {
        let table = Table {
            header: vec!["A".into(), "Much longer header cell".into()],
            rows: vec![vec!["short".into(), "x".into()]],
        };
        let renderer = BlockRenderer::new(PageGeometry::A4);
        let widths = renderer.column_widths(&table);
        let total: f32 = widths.iter().sum();
        assert!((total - PageGeometry::A4.content_width()).abs() < 1e-2);
        assert!(widths[1] > widths[0]);
    }

    #[test]
    fn test_empty_table_is_noop() {
        let table = Table {
            header: vec![],
            rows: vec![],
        };
        let mut renderer = BlockRenderer::new(PageGeometry::A4);
        let before = renderer.cursor.offset();
        renderer.render_block(&Block::Table(table));
        assert_eq!(renderer.cursor.offset(), before);
        assert!(renderer.doc.is_empty());
    }

    #[test]
    fn test_row_taller_than_page_splits_across_pages() {
        let small = PageGeometry {
            width: 300.0,
            height: 200.0,
            margin: 20.0,
        };
        let long_cell = (0..400)
            .map(|i| format!("word{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let table = Table {
            header: vec!["Key".into(), "Value".into()],
            rows: vec![vec!["notes".into(), long_cell]],
        };
        let doc = BlockRenderer::render(small, &[Block::Table(table)]);
        assert!(doc.page_count() > 1);

        let mut saw_last_word = false;
        for page in doc.pages() {
            for op in &page.ops {
                let extent = match op {
                    DrawOp::Text { y, text, .. } => {
                        if text.contains("word399") {
                            saw_last_word = true;
                        }
                        *y
                    }
                    DrawOp::Line { y1, y2, .. } => y1.max(*y2),
                    DrawOp::Rect { y, height, .. } => y + height,
                    DrawOp::Image { y, height, .. } => y + height,
                };
                assert!(
                    extent <= small.floor() + 1e-3,
                    "op reaches {} but floor is {}",
                    extent,
                    small.floor()
                );
            }
        }
        assert!(saw_last_word, "tail of the over-tall cell was dropped");
    }

    #[test]
    fn test_row_height_grows_with_wrapped_cells() {
        let renderer = BlockRenderer::new(PageGeometry::A4);
        let widths = vec![60.0, 60.0];
        let short = renderer.table_row_height(
            &["a".to_string(), "b".to_string()],
            &widths,
            FontStyle::Regular,
        );
        let long = renderer.table_row_height(
            &[
                "a".to_string(),
                "a considerably longer cell that must wrap onto several lines".to_string(),
            ],
            &widths,
            FontStyle::Regular,
        );
        assert!(long > short);
    }
}
