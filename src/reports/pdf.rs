//! printpdf-backed document canvas
//!
//! Layout works in points from the top-left corner; printpdf places content
//! in millimetres from the bottom-left. Conversion happens here and nowhere
//! else.

use std::fs::File;
use std::path::Path;

use image::{DynamicImage, RgbImage};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point,
};
use tracing::warn;

use super::canvas::{DocumentCanvas, FontWeight, RasterImage, TextAlign};
use super::layout::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::error::{CashPilotError, CashPilotResult};

/// Resolution images are embedded at before scaling to their box
const IMAGE_DPI: f32 = 300.0;

/// Average Helvetica advance width as a fraction of the font size
const AVERAGE_GLYPH_WIDTH: f32 = 0.52;

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    pages: usize,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Built-in fonts only cover ASCII reliably
    unicode_fonts: bool,
    weight: FontWeight,
    size: f32,
}

impl PdfCanvas {
    /// Start an A4 portrait document
    ///
    /// With `font_path` set the TrueType font is embedded for every weight;
    /// if it cannot be read the canvas falls back to built-in Helvetica.
    pub fn new(title: &str, font_path: Option<&Path>) -> CashPilotResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Page 1");

        let external = match font_path {
            Some(path) => match File::open(path) {
                Ok(file) => match doc.add_external_font(file) {
                    Ok(font) => Some(font),
                    Err(e) => {
                        warn!(font = %path.display(), error = %e, "font rejected, using Helvetica");
                        None
                    }
                },
                Err(e) => {
                    warn!(font = %path.display(), error = %e, "font unreadable, using Helvetica");
                    None
                }
            },
            None => None,
        };

        let (regular, bold, unicode_fonts) = match external {
            Some(font) => (font.clone(), font, true),
            None => (
                doc.add_builtin_font(BuiltinFont::Helvetica)?,
                doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
                false,
            ),
        };

        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            pages: 1,
            regular,
            bold,
            unicode_fonts,
            weight: FontWeight::Regular,
            size: 12.0,
        })
    }

    fn font(&self) -> &IndirectFontRef {
        match self.weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    fn prepare_text(&self, text: &str) -> String {
        if self.unicode_fonts {
            text.to_string()
        } else {
            ascii_fallback(text)
        }
    }
}

/// Approximate rendered width of `text` in points
pub fn estimate_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVERAGE_GLYPH_WIDTH
}

/// Replace characters the built-in fonts cannot show
///
/// Common currency signs become their ISO codes; anything else outside ASCII
/// becomes `?`.
pub fn ascii_fallback(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            c if c.is_ascii() => out.push(c),
            '₦' => out.push_str("NGN "),
            '€' => out.push_str("EUR "),
            '£' => out.push_str("GBP "),
            '¥' => out.push_str("JPY "),
            '₹' => out.push_str("INR "),
            '₵' => out.push_str("GHS "),
            '\u{00A0}' | '\u{202F}' => out.push(' '),
            _ => out.push('?'),
        }
    }
    out
}

impl DocumentCanvas for PdfCanvas {
    fn page_width(&self) -> f32 {
        PAGE_WIDTH
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn set_font(&mut self, weight: FontWeight, size: f32) {
        self.weight = weight;
        self.size = size;
    }

    fn text(&mut self, text: &str, x: f32, y: f32, align: TextAlign) -> CashPilotResult<()> {
        let text = self.prepare_text(text);
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - estimate_text_width(&text, self.size) / 2.0,
        };

        self.layer
            .use_text(text, self.size, mm(left), mm(PAGE_HEIGHT - y), self.font());
        Ok(())
    }

    fn image(
        &mut self,
        image: &RasterImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> CashPilotResult<()> {
        let buffer = RgbImage::from_raw(image.width, image.height, image.pixels.clone())
            .ok_or_else(|| {
                CashPilotError::Render(format!(
                    "image buffer does not match {}x{}",
                    image.width, image.height
                ))
            })?;
        let pdf_image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(buffer));

        // Natural size at IMAGE_DPI, then scaled into the target box
        let natural_width = image.width as f32 / IMAGE_DPI * 25.4;
        let natural_height = image.height as f32 / IMAGE_DPI * 25.4;

        pdf_image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(mm(x)),
                translate_y: Some(mm(PAGE_HEIGHT - y - height)),
                scale_x: Some(mm(width).0 / natural_width),
                scale_y: Some(mm(height).0 / natural_height),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
    ) -> CashPilotResult<()> {
        let line = Line {
            points: vec![
                (Point::new(mm(x1), mm(PAGE_HEIGHT - y1)), false),
                (Point::new(mm(x2), mm(PAGE_HEIGHT - y2)), false),
            ],
            is_closed: false,
        };

        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(line);
        Ok(())
    }

    fn add_page(&mut self) -> CashPilotResult<()> {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            mm(PAGE_WIDTH),
            mm(PAGE_HEIGHT),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        Ok(())
    }

    fn finish(self) -> CashPilotResult<Vec<u8>> {
        Ok(self.doc.save_to_bytes()?)
    }
}
