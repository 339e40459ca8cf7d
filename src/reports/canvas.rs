//! Document drawing capability
//!
//! [`DocumentCanvas`] is the narrow surface the report generator draws
//! through. [`PdfCanvas`](super::pdf::PdfCanvas) renders real documents;
//! [`RecordingCanvas`] captures draw operations so layout can be inspected
//! without producing a PDF.

use std::fmt::Write as _;

use super::layout::PAGE_WIDTH;
use crate::error::{CashPilotError, CashPilotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Horizontal anchoring of text relative to its `x` coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Decoded RGB8 bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triples, `width * height * 3` bytes
    pub pixels: Vec<u8>,
}

impl RasterImage {
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> CashPilotResult<Self> {
        let expected = width as usize * height as usize * 3;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(CashPilotError::Render(format!(
                "raster buffer of {} bytes does not match {}x{} RGB",
                pixels.len(),
                width,
                height
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Solid-color image, mostly useful as a placeholder in tests
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Start/draw/paginate/save operations on a paginated document
///
/// Coordinates follow [`super::layout`]: points, top-left origin.
pub trait DocumentCanvas {
    fn page_width(&self) -> f32;

    fn page_count(&self) -> usize;

    fn set_font(&mut self, weight: FontWeight, size: f32);

    /// Draw one line of text with its baseline at `y`
    fn text(&mut self, text: &str, x: f32, y: f32, align: TextAlign) -> CashPilotResult<()>;

    /// Draw an image scaled into the box whose top-left corner is `(x, y)`
    fn image(
        &mut self,
        image: &RasterImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> CashPilotResult<()>;

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32)
        -> CashPilotResult<()>;

    /// Start a new page; subsequent drawing lands on it
    fn add_page(&mut self) -> CashPilotResult<()>;

    /// Serialize the finished document
    fn finish(self) -> CashPilotResult<Vec<u8>>
    where
        Self: Sized;
}

/// A captured draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        page: usize,
        text: String,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        align: TextAlign,
    },
    Image {
        page: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        pixel_width: u32,
        pixel_height: u32,
    },
    Line {
        page: usize,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    PageBreak {
        page: usize,
    },
}

/// Canvas that records operations instead of rendering them
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    pages: usize,
    weight: FontWeight,
    size: f32,
    fail_on_text: Option<String>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            pages: 1,
            weight: FontWeight::Regular,
            size: 12.0,
            fail_on_text: None,
        }
    }

    /// Make `text` fail for any string containing `needle`
    pub fn failing_on(mut self, needle: impl Into<String>) -> Self {
        self.fail_on_text = Some(needle.into());
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// All drawn strings with their page and baseline
    pub fn texts(&self) -> Vec<(usize, &str, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { page, text, y, .. } => Some((*page, text.as_str(), *y)),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|(_, text, _)| text.contains(needle))
    }

    /// Baseline of the first text exactly equal to `text`
    pub fn y_of(&self, text: &str) -> Option<f32> {
        self.texts()
            .into_iter()
            .find(|(_, t, _)| *t == text)
            .map(|(_, _, y)| y)
    }

    pub fn images(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Image { .. }))
            .collect()
    }

    /// Human-readable dump, one operation per line
    pub fn render_listing(&self) -> String {
        let mut out = String::new();
        for op in &self.ops {
            let _ = match op {
                DrawOp::Text {
                    page, text, x, y, size, ..
                } => writeln!(out, "p{} text  ({:>6.1}, {:>6.1}) {:>4.1}pt {}", page, x, y, size, text),
                DrawOp::Image {
                    page,
                    x,
                    y,
                    width,
                    height,
                    pixel_width,
                    pixel_height,
                } => writeln!(
                    out,
                    "p{} image ({:>6.1}, {:>6.1}) {}x{}pt from {}x{}px",
                    page, x, y, width, height, pixel_width, pixel_height
                ),
                DrawOp::Line { page, x1, y1, x2, y2 } => {
                    writeln!(out, "p{} line  ({:.1}, {:.1}) -> ({:.1}, {:.1})", page, x1, y1, x2, y2)
                }
                DrawOp::PageBreak { page } => writeln!(out, "--- page {} ---", page),
            };
        }
        out
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCanvas for RecordingCanvas {
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
        if let Some(needle) = &self.fail_on_text {
            if text.contains(needle.as_str()) {
                return Err(CashPilotError::Render(format!("cannot draw '{}'", text)));
            }
        }

        self.ops.push(DrawOp::Text {
            page: self.pages,
            text: text.to_string(),
            x,
            y,
            size: self.size,
            weight: self.weight,
            align,
        });
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
        self.ops.push(DrawOp::Image {
            page: self.pages,
            x,
            y,
            width,
            height,
            pixel_width: image.width,
            pixel_height: image.height,
        });
        Ok(())
    }

    fn line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        _thickness: f32,
    ) -> CashPilotResult<()> {
        self.ops.push(DrawOp::Line {
            page: self.pages,
            x1,
            y1,
            x2,
            y2,
        });
        Ok(())
    }

    fn add_page(&mut self) -> CashPilotResult<()> {
        self.pages += 1;
        self.ops.push(DrawOp::PageBreak { page: self.pages });
        Ok(())
    }

    fn finish(self) -> CashPilotResult<Vec<u8>> {
        Ok(self.render_listing().into_bytes())
    }
}
