//! Page cursor: the running vertical write position and page index during
//! layout. `reserve` is the sole page-break mechanism; every renderer step
//! must reserve before drawing.

/// Page geometry in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// A4 portrait with a 42.5pt (15mm) margin.
    pub const A4: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin: 42.5,
    };

    /// Horizontal span available for content.
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest permitted draw offset (top-down).
    pub fn floor(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Tracks the current page index and vertical offset, measured top-down
/// from the top edge of the page.
#[derive(Debug, Clone)]
pub struct PageCursor {
    geometry: PageGeometry,
    page: usize,
    offset: f32,
}

impl PageCursor {
    /// Create a cursor at the top margin of the first page.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            page: 0,
            offset: geometry.margin,
        }
    }

    /// Current page index (0-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current vertical offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Ensure `height` points fit on the current page, breaking to a new page
    /// exactly once if they do not. Returns the (page, offset) to draw at.
    ///
    /// A block taller than the printable area still draws from the top of a
    /// fresh page; overflow is the caller's concern (renderers reserve
    /// line-by-line to avoid it).
    pub fn reserve(&mut self, height: f32) -> (usize, f32) {
        if self.offset + height > self.geometry.floor() && self.offset > self.geometry.margin {
            self.page += 1;
            self.offset = self.geometry.margin;
        }
        (self.page, self.offset)
    }

    /// Advance the offset after drawing.
    pub fn advance(&mut self, height: f32) {
        self.offset += height;
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn small_page() -> PageGeometry {
        PageGeometry {
            width: 200.0,
            height: 100.0,
            margin: 10.0,
        }
    }

    #[test]
    fn test_starts_at_top_margin_of_first_page() {
        let cursor = PageCursor::new(small_page());
        assert_eq!(cursor.page(), 0);
        assert_eq!(cursor.offset(), 10.0);
    }

    #[test]
    fn test_reserve_within_page_keeps_position() {
        let mut cursor = PageCursor::new(small_page());
        let (page, offset) = cursor.reserve(50.0);
        assert_eq!((page, offset), (0, 10.0));
    }

    #[test]
    fn test_reserve_breaks_exactly_once() {
        let mut cursor = PageCursor::new(small_page());
        cursor.advance(70.0); // offset 80, floor 90
        let (page, offset) = cursor.reserve(20.0);
        assert_eq!((page, offset), (1, 10.0));

        // An immediate oversize reserve at the top must not break again.
        let (page, offset) = cursor.reserve(500.0);
        assert_eq!((page, offset), (1, 10.0));
    }

    #[test]
    fn test_offset_never_exceeds_floor_when_reserving_per_line() {
        let geometry = small_page();
        let mut cursor = PageCursor::new(geometry);
        let line = 12.0;
        for _ in 0..50 {
            let (_, offset) = cursor.reserve(line);
            assert!(offset + line <= geometry.floor() + 1e-3);
            cursor.advance(line);
        }
        assert!(cursor.page() > 0);
    }

    #[test]
    fn test_content_width() {
        assert_eq!(small_page().content_width(), 180.0);
        assert!((PageGeometry::A4.content_width() - 510.28).abs() < 1e-3);
    }
}
