//! PDF serialization of a laid-out document via `printpdf`.
//!
//! The layout pass works in points, top-down; PDF space is millimetres,
//! bottom-up, so every op is converted and flipped here. Branding (header
//! line, page-number footer, watermark) is drawn around the content ops.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::image_crate::{DynamicImage as PdfDynamicImage, RgbImage};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Rect, Rgb,
};

use super::ExportError;
use crate::layout::{text_width, DrawOp, FontStyle, PageGeometry, RenderedDocument};

const BRAND_SIZE: f32 = 9.0;
const WATERMARK_SIZE: f32 = 52.0;
const WATERMARK_SHADE: f32 = 0.85;

/// Branding and metadata for the PDF output.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// Document title recorded in PDF metadata
    pub title: String,

    /// Optional header line on every page
    pub header: Option<String>,

    /// Draw a `Page N of M` footer
    pub footer: bool,

    /// Optional watermark text behind the content
    pub watermark: Option<String>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            title: "Document".to_string(),
            header: None,
            footer: true,
            watermark: None,
        }
    }
}

/// Serializes rendered documents to PDF files or bytes.
pub struct PdfExporter {
    options: PdfOptions,
}

impl PdfExporter {
    pub fn new(options: PdfOptions) -> Self {
        Self { options }
    }

    /// Write the document to a file.
    pub fn write_file(&self, doc: &RenderedDocument, path: &Path) -> Result<(), ExportError> {
        let pdf = self.build(doc)?;
        let file = File::create(path)?;
        pdf.save(&mut BufWriter::new(file))?;
        Ok(())
    }

    /// Serialize the document to in-memory PDF bytes.
    pub fn to_bytes(&self, doc: &RenderedDocument) -> Result<Vec<u8>, ExportError> {
        let pdf = self.build(doc)?;
        Ok(pdf.save_to_bytes()?)
    }

    fn build(&self, doc: &RenderedDocument) -> Result<PdfDocumentReference, ExportError> {
        if doc.is_empty() {
            return Err(ExportError::EmptyDocument);
        }

        let geometry = doc.geometry();
        let (page_w, page_h) = (mm(geometry.width), mm(geometry.height));
        let (pdf, first_page, first_layer) =
            PdfDocument::new(&self.options.title, Mm(page_w), Mm(page_h), "content");
        let regular = pdf.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = pdf.add_builtin_font(BuiltinFont::HelveticaBold)?;

        let total = doc.page_count();
        for (index, page) in doc.pages().iter().enumerate() {
            let layer = if index == 0 {
                pdf.get_page(first_page).get_layer(first_layer)
            } else {
                let (p, l) = pdf.add_page(Mm(page_w), Mm(page_h), "content");
                pdf.get_page(p).get_layer(l)
            };

            self.draw_branding(&layer, &geometry, index, total, &regular, &bold);

            for op in &page.ops {
                draw_op(&layer, &geometry, op, &regular, &bold);
            }
        }

        Ok(pdf)
    }

    fn draw_branding(
        &self,
        layer: &PdfLayerReference,
        geometry: &PageGeometry,
        index: usize,
        total: usize,
        regular: &IndirectFontRef,
        bold: &IndirectFontRef,
    ) {
        if let Some(mark) = &self.options.watermark {
            let width = text_width(mark, WATERMARK_SIZE, FontStyle::Bold);
            let x = (geometry.width - width).max(0.0) / 2.0;
            layer.set_fill_color(gray(WATERMARK_SHADE));
            layer.use_text(
                mark.clone(),
                WATERMARK_SIZE,
                Mm(mm(x)),
                Mm(mm(geometry.height / 2.0)),
                bold,
            );
            layer.set_fill_color(gray(0.0));
        }

        if let Some(header) = &self.options.header {
            layer.use_text(
                header.clone(),
                BRAND_SIZE,
                Mm(mm(geometry.margin)),
                Mm(mm(geometry.height - geometry.margin * 0.55)),
                regular,
            );
        }

        if self.options.footer {
            let label = format!("Page {} of {}", index + 1, total);
            let width = text_width(&label, BRAND_SIZE, FontStyle::Regular);
            layer.use_text(
                label,
                BRAND_SIZE,
                Mm(mm((geometry.width - width) / 2.0)),
                Mm(mm(geometry.margin * 0.4)),
                regular,
            );
        }
    }
}

/// Points to millimetres.
fn mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

fn gray(shade: f32) -> Color {
    Color::Rgb(Rgb::new(shade, shade, shade, None))
}

fn draw_op(
    layer: &PdfLayerReference,
    geometry: &PageGeometry,
    op: &DrawOp,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    // Flip a top-down layout offset into bottom-up PDF space.
    let flip = |y_pt: f32| mm(geometry.height - y_pt);

    match op {
        DrawOp::Text {
            x,
            y,
            size,
            style,
            text,
        } => {
            let font = match style {
                FontStyle::Regular => regular,
                FontStyle::Bold => bold,
            };
            layer.use_text(text.clone(), *size, Mm(mm(*x)), Mm(flip(*y)), font);
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            thickness,
        } => {
            layer.set_outline_thickness(*thickness);
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(mm(*x1)), Mm(flip(*y1))), false),
                    (Point::new(Mm(mm(*x2)), Mm(flip(*y2))), false),
                ],
                is_closed: false,
            });
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            shade,
        } => {
            let rect = Rect::new(
                Mm(mm(*x)),
                Mm(flip(y + height)),
                Mm(mm(x + width)),
                Mm(flip(*y)),
            );
            match shade {
                Some(shade) => {
                    layer.set_fill_color(gray(*shade));
                    layer.add_rect(rect.with_mode(PaintMode::Fill));
                    layer.set_fill_color(gray(0.0));
                }
                None => {
                    layer.set_outline_thickness(0.8);
                    layer.add_rect(rect.with_mode(PaintMode::Stroke));
                }
            }
        }
        DrawOp::Image {
            x,
            y,
            width,
            height,
            image,
        } => embed_image(layer, *x, y + height, *width, image),
    }
}

fn embed_image(layer: &PdfLayerReference, x_pt: f32, bottom_pt: f32, width_pt: f32, image: &image::DynamicImage) {
    let rgb = image.to_rgb8();
    let (px_w, px_h) = rgb.dimensions();
    let Some(buffer) = RgbImage::from_raw(px_w, px_h, rgb.into_raw()) else {
        return;
    };
    let pdf_image = printpdf::Image::from_dynamic_image(&PdfDynamicImage::ImageRgb8(buffer));

    // One dpi value scales both axes, so the aspect ratio from layout holds.
    let dpi = px_w as f32 * 25.4 / mm(width_pt);
    let geometry_y = bottom_pt;
    pdf_image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(mm(x_pt))),
            translate_y: Some(Mm(mm(geometry_y))),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}

// ============================================================
// Tests
// ============================================================
