//! PDF report generation
//!
//! - `layout`: page geometry and the pagination cursor
//! - `canvas`: the drawing capability plus a recording implementation
//! - `pdf`: printpdf-backed canvas
//! - `assets`: logo loading
//! - `charts`: chart surfaces and their rasterization
//! - `generator`: section-by-section report assembly

pub mod assets;
pub mod canvas;
pub mod charts;
pub mod generator;
pub mod layout;
pub mod pdf;

pub use assets::{FsImageLoader, ImageLoader};
pub use canvas::{DocumentCanvas, DrawOp, FontWeight, RasterImage, RecordingCanvas, TextAlign};
pub use charts::{ChartSurface, ExpenseBreakdownChart, IncomeExpenseChart};
pub use generator::{
    export_report, generate_report, preview_report, ChartSlots, ReportGenerator, ReportOutcome,
    ReportRequest,
};
pub use pdf::PdfCanvas;
