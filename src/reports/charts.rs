//! Chart surfaces rasterized into the report
//!
//! A [`ChartSurface`] turns itself into a bitmap at a pixel scale. The two
//! built-in surfaces draw with the plotters bitmap backend on the blocking
//! pool so the async generator never stalls on pixel work.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use async_trait::async_trait;
use plotters::prelude::{
    BitMapBackend, Color, IntoDrawingArea, Polygon, RGBColor, Rectangle, WHITE,
};

use super::canvas::RasterImage;
use super::layout::{CHART_HEIGHT, CHART_WIDTH};
use crate::error::{CashPilotError, CashPilotResult};
use crate::models::{Money, TotalsSummary, TransactionRecord};

pub const EXPENSE_BREAKDOWN_TITLE: &str = "Expense Breakdown";
pub const INCOME_VS_EXPENSE_TITLE: &str = "Income vs Expense";

/// Category used for expenses without one
pub const UNCATEGORIZED: &str = "Uncategorized";

const SLICE_COLORS: [RGBColor; 8] = [
    RGBColor(54, 162, 235),
    RGBColor(255, 99, 132),
    RGBColor(255, 206, 86),
    RGBColor(75, 192, 192),
    RGBColor(153, 102, 255),
    RGBColor(255, 159, 64),
    RGBColor(201, 203, 207),
    RGBColor(46, 204, 113),
];

const INCOME_COLOR: RGBColor = RGBColor(46, 204, 113);
const EXPENSE_COLOR: RGBColor = RGBColor(231, 76, 60);

/// Something that can be rasterized into a report chart slot
#[async_trait]
pub trait ChartSurface: Send + Sync {
    fn title(&self) -> &str;

    /// Render at `scale` device pixels per layout point
    async fn rasterize(&self, scale: u32) -> CashPilotResult<RasterImage>;
}

/// Pixel size of a chart slot at the given scale
pub fn chart_pixel_size(scale: u32) -> (u32, u32) {
    let scale = scale.max(1);
    (CHART_WIDTH as u32 * scale, CHART_HEIGHT as u32 * scale)
}

/// Pie chart of expense totals per category
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBreakdownChart {
    slices: Vec<(String, Money)>,
}

impl ExpenseBreakdownChart {
    pub fn new(slices: Vec<(String, Money)>) -> Self {
        Self { slices }
    }

    /// Group expenses by category, largest first
    ///
    /// Category sums saturate rather than wrap on unvalidated input.
    pub fn from_transactions(transactions: &[TransactionRecord]) -> Self {
        let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
        for txn in transactions.iter().filter(|t| t.is_expense()) {
            let category = txn
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            let sum = by_category.entry(category).or_insert_with(Money::zero);
            *sum = sum.saturating_add(txn.amount);
        }

        let mut slices: Vec<_> = by_category
            .into_iter()
            .filter(|(_, amount)| amount.is_positive())
            .collect();
        slices.sort_by(|a, b| b.1.cmp(&a.1));

        Self { slices }
    }

    pub fn slices(&self) -> &[(String, Money)] {
        &self.slices
    }
}

#[async_trait]
impl ChartSurface for ExpenseBreakdownChart {
    fn title(&self) -> &str {
        EXPENSE_BREAKDOWN_TITLE
    }

    async fn rasterize(&self, scale: u32) -> CashPilotResult<RasterImage> {
        let values: Vec<f64> = self.slices.iter().map(|(_, m)| m.as_f64()).collect();
        if values.iter().sum::<f64>() <= 0.0 {
            return Err(CashPilotError::asset(self.title(), "no expenses to chart"));
        }

        let (width, height) = chart_pixel_size(scale);
        run_blocking(self.title(), move || draw_pie(&values, width, height)).await
    }
}

/// Two bars comparing total income with total expense
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeExpenseChart {
    income: Money,
    expense: Money,
}

impl IncomeExpenseChart {
    pub fn new(income: Money, expense: Money) -> Self {
        Self { income, expense }
    }

    pub fn from_totals(totals: &TotalsSummary) -> Self {
        Self::new(totals.income, totals.expense)
    }
}

#[async_trait]
impl ChartSurface for IncomeExpenseChart {
    fn title(&self) -> &str {
        INCOME_VS_EXPENSE_TITLE
    }

    async fn rasterize(&self, scale: u32) -> CashPilotResult<RasterImage> {
        let income = self.income.abs().as_f64();
        let expense = self.expense.abs().as_f64();
        if income <= 0.0 && expense <= 0.0 {
            return Err(CashPilotError::asset(self.title(), "no totals to chart"));
        }

        let (width, height) = chart_pixel_size(scale);
        run_blocking(self.title(), move || draw_bars(income, expense, width, height)).await
    }
}

async fn run_blocking<F>(title: &str, draw: F) -> CashPilotResult<RasterImage>
where
    F: FnOnce() -> Result<RasterImage, String> + Send + 'static,
{
    tokio::task::spawn_blocking(draw)
        .await
        .map_err(|e| CashPilotError::asset(title, e))?
        .map_err(|e| CashPilotError::asset(title, e))
}

fn draw_pie(values: &[f64], width: u32, height: u32) -> Result<RasterImage, String> {
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let total: f64 = values.iter().sum();
        let center = (width as f64 / 2.0, height as f64 / 2.0);
        let radius = width.min(height) as f64 * 0.42;

        let mut start = -PI / 2.0;
        for (i, value) in values.iter().enumerate() {
            let sweep = value / total * 2.0 * PI;
            let color = SLICE_COLORS[i % SLICE_COLORS.len()];
            root.draw(&Polygon::new(
                sector_points(center, radius, start, sweep),
                color.filled(),
            ))
            .map_err(|e| e.to_string())?;
            start += sweep;
        }

        root.present().map_err(|e| e.to_string())?;
    }

    RasterImage::from_rgb(width, height, buffer).map_err(|e| e.to_string())
}

/// Polygon approximating a pie sector, one vertex per degree of arc
fn sector_points(center: (f64, f64), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep.to_degrees().ceil() as usize).max(1)).min(360);
    let mut points = Vec::with_capacity(steps + 2);
    points.push((center.0.round() as i32, center.1.round() as i32));
    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push((
            (center.0 + radius * angle.cos()).round() as i32,
            (center.1 + radius * angle.sin()).round() as i32,
        ));
    }
    points
}

fn draw_bars(income: f64, expense: f64, width: u32, height: u32) -> Result<RasterImage, String> {
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let w = width as i32;
        let h = height as i32;
        let margin = h / 10;
        let baseline = h - margin;
        let usable = (baseline - margin) as f64;
        let max = income.max(expense);
        let bar_width = w / 4;

        for (slot, (value, color)) in [(income, INCOME_COLOR), (expense, EXPENSE_COLOR)]
            .into_iter()
            .enumerate()
        {
            let bar_height = (value / max * usable).round() as i32;
            let left = w / 8 + slot as i32 * (w / 2);
            root.draw(&Rectangle::new(
                [(left, baseline - bar_height), (left + bar_width, baseline)],
                color.filled(),
            ))
            .map_err(|e| e.to_string())?;
        }

        root.draw(&Rectangle::new(
            [(margin / 2, baseline), (w - margin / 2, baseline + 1)],
            RGBColor(120, 120, 120).filled(),
        ))
        .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    RasterImage::from_rgb(width, height, buffer).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(img: &RasterImage, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * img.width + x) * 3) as usize;
        [img.pixels[i], img.pixels[i + 1], img.pixels[i + 2]]
    }

    #[test]
    fn test_breakdown_groups_expenses_by_category() {
        let transactions = vec![
            TransactionRecord::expense(Money::from_cents(1000), "a").with_category("Food"),
            TransactionRecord::expense(Money::from_cents(3000), "b").with_category("Rent"),
            TransactionRecord::expense(Money::from_cents(500), "c").with_category("Food"),
            TransactionRecord::expense(Money::from_cents(200), "d"),
            TransactionRecord::income(Money::from_cents(99999), "e").with_category("Work"),
        ];

        let chart = ExpenseBreakdownChart::from_transactions(&transactions);

        assert_eq!(
            chart.slices(),
            &[
                ("Rent".to_string(), Money::from_cents(3000)),
                ("Food".to_string(), Money::from_cents(1500)),
                (UNCATEGORIZED.to_string(), Money::from_cents(200)),
            ]
        );
    }

    #[test]
    fn test_breakdown_of_huge_expenses_does_not_wrap() {
        let huge = Money::from_cents(5_000_000_000_000_000_000);
        let transactions = vec![
            TransactionRecord::expense(huge, "a").with_category("Rent"),
            TransactionRecord::expense(huge, "b").with_category("Rent"),
        ];

        let chart = ExpenseBreakdownChart::from_transactions(&transactions);

        assert_eq!(chart.slices().len(), 1);
        assert_eq!(chart.slices()[0].1.cents(), i64::MAX);
    }

    #[test]
    fn test_chart_pixel_size() {
        assert_eq!(chart_pixel_size(2), (440, 400));
        assert_eq!(chart_pixel_size(0), (220, 200));
    }

    #[test]
    fn test_sector_points_start_at_center() {
        let points = sector_points((100.0, 100.0), 50.0, 0.0, PI / 2.0);
        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (150, 100));
        assert_eq!(*points.last().unwrap(), (100, 150));
    }

    #[tokio::test]
    async fn test_pie_rasterizes_at_scale() {
        let chart = ExpenseBreakdownChart::new(vec![
            ("Food".into(), Money::from_cents(100)),
            ("Rent".into(), Money::from_cents(300)),
        ]);

        let img = chart.rasterize(2).await.unwrap();

        assert_eq!((img.width, img.height), (440, 400));
        assert_eq!(pixel(&img, 0, 0), [255, 255, 255]);
        assert_ne!(pixel(&img, 220, 300), [255, 255, 255]);
    }

    #[tokio::test]
    async fn test_bars_rasterize() {
        let chart = IncomeExpenseChart::new(Money::from_cents(100000), Money::from_cents(123450));

        let img = chart.rasterize(1).await.unwrap();

        assert_eq!((img.width, img.height), (220, 200));
        assert_eq!(pixel(&img, 0, 0), [255, 255, 255]);
    }

    #[tokio::test]
    async fn test_empty_charts_fail_recoverably() {
        let pie = ExpenseBreakdownChart::new(Vec::new());
        let bars = IncomeExpenseChart::new(Money::zero(), Money::zero());

        assert!(pie.rasterize(2).await.unwrap_err().is_recoverable());
        assert!(bars.rasterize(2).await.unwrap_err().is_recoverable());
    }
}
