//! Layout engine: shapes text, tracks the page cursor, and walks block
//! tokens into a paginated document of absolutely positioned draw ops.

mod cursor;
mod document;
mod metrics;
mod renderer;
mod shaper;
mod table;

pub use cursor::{PageCursor, PageGeometry};
pub use document::{DrawOp, Page, RenderedDocument};
pub use metrics::{text_width, FontStyle};
pub use renderer::BlockRenderer;
pub use shaper::wrap;
