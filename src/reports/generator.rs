//! Paginated PDF report
//!
//! Page one carries, top to bottom: the logo, title and generation time, the
//! summary block, the two chart slots, then the transaction table, which
//! continues onto further pages as needed. Every section lands at a fixed
//! offset; optional sections that fail still consume their space so the
//! table always starts at [`first_row_y`](super::layout::first_row_y).
//!
//! Steps run strictly in order (logo, first chart, second chart, rows)
//! because they share one layout cursor.

use chrono::{DateTime, FixedOffset, NaiveDate};
use tracing::{debug, info, warn};

use super::assets::{FsImageLoader, ImageLoader};
use super::canvas::{DocumentCanvas, FontWeight, RecordingCanvas, TextAlign};
use super::charts::{
    ChartSurface, ExpenseBreakdownChart, IncomeExpenseChart, EXPENSE_BREAKDOWN_TITLE,
    INCOME_VS_EXPENSE_TITLE,
};
use super::layout::*;
use super::pdf::PdfCanvas;
use crate::config::{ReportSettings, Settings};
use crate::display::{single_line, truncate, Formats};
use crate::error::{CashPilotError, CashPilotResult};
use crate::export::delivery::{Artifact, ArtifactSink, Delivery};
use crate::models::{ExportDataset, TransactionRecord};

/// Placeholder for a missing date, category, label or note cell
const EMPTY_CELL: &str = "-";
const MISSING_DATE: &str = "N/A";

/// The two optional chart slots, left then right
#[derive(Default)]
pub struct ChartSlots {
    pub expense_breakdown: Option<Box<dyn ChartSurface>>,
    pub income_vs_expense: Option<Box<dyn ChartSurface>>,
}

impl ChartSlots {
    /// Both slots empty; the chart row is left blank
    pub fn none() -> Self {
        Self::default()
    }

    /// Built-in charts computed from the dataset
    pub fn from_dataset(dataset: &ExportDataset) -> Self {
        Self {
            expense_breakdown: Some(Box::new(ExpenseBreakdownChart::from_transactions(
                &dataset.transactions,
            ))),
            income_vs_expense: Some(Box::new(IncomeExpenseChart::from_totals(&dataset.totals))),
        }
    }
}

/// Inputs for one report
pub struct ReportRequest<'a> {
    pub dataset: &'a ExportDataset,
    pub charts: ChartSlots,
}

impl<'a> ReportRequest<'a> {
    pub fn new(dataset: &'a ExportDataset, charts: ChartSlots) -> Self {
        Self { dataset, charts }
    }
}

/// What actually made it into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOutcome {
    pub pages: usize,
    pub rows_drawn: usize,
    pub charts_drawn: usize,
    pub logo_drawn: bool,
}

pub struct ReportGenerator {
    report: ReportSettings,
    formats: Formats,
    loader: Box<dyn ImageLoader>,
    generated_at: DateTime<FixedOffset>,
}

impl ReportGenerator {
    pub fn new(settings: &Settings) -> Self {
        let formats = Formats::from_settings(settings);
        let generated_at = formats.datetime.now();
        Self {
            report: settings.report.clone(),
            formats,
            loader: Box::new(FsImageLoader),
            generated_at,
        }
    }

    pub fn with_loader(mut self, loader: impl ImageLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Pin the "generated on" instant, which also names the artifact
    pub fn with_generated_at(mut self, generated_at: DateTime<FixedOffset>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn report_settings(&self) -> &ReportSettings {
        &self.report
    }

    pub fn report_date(&self) -> NaiveDate {
        self.generated_at.date_naive()
    }

    /// Lay the report out onto `canvas`
    ///
    /// Logo and chart failures are logged and the section is skipped. Any
    /// canvas error aborts the whole report.
    pub async fn render<C: DocumentCanvas>(
        &self,
        canvas: &mut C,
        request: &ReportRequest<'_>,
    ) -> CashPilotResult<ReportOutcome> {
        let dataset = request.dataset;
        if dataset.is_empty() {
            return Err(CashPilotError::NoTransactions);
        }

        let mut cursor = LayoutCursor::new();

        let logo_drawn = self.draw_logo(canvas, &mut cursor).await?;
        self.draw_header(canvas, &mut cursor)?;
        self.draw_summary(canvas, &mut cursor, dataset)?;
        let charts_drawn = self.draw_charts(canvas, &mut cursor, &request.charts).await?;
        let rows_drawn = self.draw_table(canvas, &mut cursor, &dataset.transactions)?;

        let outcome = ReportOutcome {
            pages: canvas.page_count(),
            rows_drawn,
            charts_drawn,
            logo_drawn,
        };
        debug!(?outcome, "report laid out");
        Ok(outcome)
    }

    async fn draw_logo<C: DocumentCanvas>(
        &self,
        canvas: &mut C,
        cursor: &mut LayoutCursor,
    ) -> CashPilotResult<bool> {
        let mut drawn = false;

        if let Some(path) = &self.report.logo_path {
            match self.loader.load(path).await {
                Ok(logo) => {
                    let x = canvas.page_width() / 2.0 - LOGO_SIZE / 2.0;
                    canvas.image(&logo, x, cursor.y(), LOGO_SIZE, LOGO_SIZE)?;
                    drawn = true;
                }
                Err(e) => warn!(logo = %path.display(), error = %e, "logo skipped"),
            }
        }

        cursor.advance(LOGO_BLOCK_HEIGHT);
        Ok(drawn)
    }

    fn draw_header<C: DocumentCanvas>(
        &self,
        canvas: &mut C,
        cursor: &mut LayoutCursor,
    ) -> CashPilotResult<()> {
        let center = canvas.page_width() / 2.0;

        canvas.set_font(FontWeight::Bold, TITLE_FONT_SIZE);
        canvas.text(&self.report.title, center, cursor.y(), TextAlign::Center)?;
        cursor.advance(TITLE_GAP);

        let generated = format!(
            "Generated on: {}",
            self.formats.datetime.format_instant(&self.generated_at)
        );
        canvas.set_font(FontWeight::Regular, SUBTITLE_FONT_SIZE);
        canvas.text(&generated, center, cursor.y(), TextAlign::Center)?;
        cursor.advance(SUBTITLE_GAP);

        Ok(())
    }

    fn draw_summary<C: DocumentCanvas>(
        &self,
        canvas: &mut C,
        cursor: &mut LayoutCursor,
        dataset: &ExportDataset,
    ) -> CashPilotResult<()> {
        canvas.set_font(FontWeight::Bold, SECTION_FONT_SIZE);
        canvas.text("Summary Overview", MARGIN_X, cursor.y(), TextAlign::Left)?;
        cursor.advance(SUMMARY_HEADING_GAP);

        let totals = dataset.totals;
        let lines = [
            ("Total Income:", totals.income),
            ("Total Expenses:", totals.expense),
            ("Balance:", totals.balance),
            ("Monthly Income:", dataset.monthly_income),
            ("Budget:", dataset.budget),
        ];

        canvas.set_font(FontWeight::Regular, BODY_FONT_SIZE);
        for (i, (label, amount)) in lines.iter().enumerate() {
            if i > 0 {
                cursor.advance(SUMMARY_LINE_HEIGHT);
            }
            canvas.text(label, MARGIN_X, cursor.y(), TextAlign::Left)?;
            canvas.text(
                &self.formats.currency.format(*amount),
                SUMMARY_VALUE_X,
                cursor.y(),
                TextAlign::Left,
            )?;
        }
        cursor.advance(SUMMARY_TRAILING_GAP);

        Ok(())
    }

    async fn draw_charts<C: DocumentCanvas>(
        &self,
        canvas: &mut C,
        cursor: &mut LayoutCursor,
        charts: &ChartSlots,
    ) -> CashPilotResult<usize> {
        let top = cursor.y();
        let slots = [
            (
                charts.expense_breakdown.as_deref(),
                EXPENSE_BREAKDOWN_TITLE,
                CHART_LEFT_X,
            ),
            (
                charts.income_vs_expense.as_deref(),
                INCOME_VS_EXPENSE_TITLE,
                CHART_RIGHT_X,
            ),
        ];

        let mut drawn = 0;
        for (surface, label, x) in slots {
            let Some(surface) = surface else {
                debug!(chart = label, "chart slot empty");
                continue;
            };

            match surface.rasterize(self.report.chart_scale).await {
                Ok(bitmap) => {
                    canvas.set_font(FontWeight::Bold, CHART_LABEL_FONT_SIZE);
                    canvas.text(label, x, top, TextAlign::Left)?;
                    canvas.image(&bitmap, x, top + CHART_LABEL_GAP, CHART_WIDTH, CHART_HEIGHT)?;
                    drawn += 1;
                }
                Err(e) => warn!(chart = surface.title(), error = %e, "chart skipped"),
            }
        }

        cursor.advance(CHART_BLOCK_HEIGHT);
        Ok(drawn)
    }

    fn draw_table<C: DocumentCanvas>(
        &self,
        canvas: &mut C,
        cursor: &mut LayoutCursor,
        transactions: &[TransactionRecord],
    ) -> CashPilotResult<usize> {
        canvas.set_font(FontWeight::Bold, SECTION_FONT_SIZE);
        canvas.text("Transactions", MARGIN_X, cursor.y(), TextAlign::Left)?;
        cursor.advance(TABLE_HEADING_GAP);

        let right = canvas.page_width() - MARGIN_X;
        canvas.line(MARGIN_X, cursor.y(), right, cursor.y(), TABLE_RULE_WIDTH)?;
        cursor.advance(TABLE_RULE_GAP);

        canvas.set_font(FontWeight::Bold, BODY_FONT_SIZE);
        for column in &TABLE_COLUMNS {
            canvas.text(column.title, column.x, cursor.y(), TextAlign::Left)?;
        }
        cursor.advance(TABLE_HEADER_GAP);

        canvas.set_font(FontWeight::Regular, BODY_FONT_SIZE);
        for txn in transactions {
            if cursor.needs_page_break() {
                canvas.add_page()?;
                cursor.start_new_page();
            }

            for (column, cell) in TABLE_COLUMNS.iter().zip(self.row_cells(txn)) {
                let cell = truncate(&single_line(&cell), column.max_chars);
                canvas.text(&cell, column.x, cursor.y(), TextAlign::Left)?;
            }
            cursor.advance(ROW_HEIGHT);
        }

        Ok(transactions.len())
    }

    fn row_cells(&self, txn: &TransactionRecord) -> [String; 6] {
        let date = self
            .formats
            .datetime
            .date(txn.created_at)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| MISSING_DATE.to_string());

        [
            date,
            txn.kind.as_str().to_string(),
            or_placeholder(txn.category.as_deref()),
            or_placeholder(Some(txn.label.as_str())),
            self.formats.currency.format(txn.amount.abs()),
            or_placeholder(txn.note.as_deref()),
        ]
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

/// Render the report to PDF bytes wrapped as `Report-<date>.pdf`
pub async fn generate_report(
    generator: &ReportGenerator,
    request: &ReportRequest<'_>,
) -> CashPilotResult<(Artifact, ReportOutcome)> {
    if request.dataset.is_empty() {
        return Err(CashPilotError::NoTransactions);
    }

    let report = generator.report_settings();
    let mut canvas = PdfCanvas::new(&report.title, report.font_path.as_deref())?;
    let outcome = generator.render(&mut canvas, request).await?;
    let bytes = canvas.finish()?;

    Ok((Artifact::pdf(generator.report_date(), bytes), outcome))
}

/// Render the report and hand it to `sink`
///
/// Nothing reaches the sink unless the whole document rendered.
pub async fn export_report<S: ArtifactSink + ?Sized>(
    generator: &ReportGenerator,
    request: &ReportRequest<'_>,
    sink: &S,
) -> CashPilotResult<(Delivery, ReportOutcome)> {
    let (artifact, outcome) = generate_report(generator, request).await?;
    let delivery = sink.deliver(artifact)?;

    info!(
        pages = outcome.pages,
        rows = outcome.rows_drawn,
        charts = outcome.charts_drawn,
        filename = %delivery.filename,
        "PDF export complete"
    );

    Ok((delivery, outcome))
}

/// Lay the report out without producing a PDF; returns the draw listing
pub async fn preview_report(
    generator: &ReportGenerator,
    request: &ReportRequest<'_>,
) -> CashPilotResult<(String, ReportOutcome)> {
    let mut canvas = RecordingCanvas::new();
    let outcome = generator.render(&mut canvas, request).await?;
    Ok((canvas.render_listing(), outcome))
}
