//! CLI commands for data export
//!
//! Both exports read an [`ExportDataset`] file (JSON or YAML) and write a
//! dated artifact into the output directory.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::debug;

use crate::config::{CashPilotPaths, Settings};
use crate::display::Formats;
use crate::error::{CashPilotError, CashPilotResult};
use crate::export::{export_csv, DirectorySink};
use crate::models::ExportDataset;
use crate::reports::{export_report, preview_report, ChartSlots, ReportGenerator, ReportRequest};

/// Printed instead of producing an empty artifact
pub const NO_TRANSACTIONS_NOTICE: &str = "No transactions to export.";

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export transactions to CSV
    Csv {
        /// Dataset file (.json, .yaml or .yml)
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a paginated PDF report
    Pdf {
        /// Dataset file (.json, .yaml or .yml)
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Logo image drawn at the top of the first page
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Leave the chart row empty
        #[arg(long)]
        no_charts: bool,

        /// Print the page layout instead of writing a PDF
        #[arg(long)]
        dry_run: bool,
    },
}

impl ExportCommands {
    /// Prefix for the user-facing failure notice
    pub fn failure_context(&self) -> &'static str {
        match self {
            ExportCommands::Csv { .. } => "CSV export failed",
            ExportCommands::Pdf { .. } => "PDF export failed",
        }
    }
}

/// Handle export commands
pub async fn handle_export_command(
    paths: &CashPilotPaths,
    settings: &Settings,
    cmd: ExportCommands,
) -> CashPilotResult<()> {
    match cmd {
        ExportCommands::Csv { input, output } => {
            handle_export_csv(paths, settings, &input, output)
        }
        ExportCommands::Pdf {
            input,
            output,
            logo,
            no_charts,
            dry_run,
        } => handle_export_pdf(paths, settings, &input, output, logo, no_charts, dry_run).await,
    }
}

fn handle_export_csv(
    paths: &CashPilotPaths,
    settings: &Settings,
    input: &Path,
    output: Option<PathBuf>,
) -> CashPilotResult<()> {
    let dataset = ExportDataset::load(input)?;
    if dataset.is_empty() {
        println!("{}", NO_TRANSACTIONS_NOTICE);
        return Ok(());
    }

    let formats = Formats::from_settings(settings);
    let today = formats.datetime.now().date_naive();
    let sink = output_sink(paths, settings, output)?;

    if let Some(delivery) = export_csv(&dataset.transactions, &formats, today, &sink)? {
        println!(
            "Exported {} transactions to: {}",
            dataset.transactions.len(),
            delivery
                .location
                .as_deref()
                .unwrap_or_else(|| Path::new(&delivery.filename))
                .display()
        );
    }

    Ok(())
}

async fn handle_export_pdf(
    paths: &CashPilotPaths,
    settings: &Settings,
    input: &Path,
    output: Option<PathBuf>,
    logo: Option<PathBuf>,
    no_charts: bool,
    dry_run: bool,
) -> CashPilotResult<()> {
    let dataset = ExportDataset::load(input)?;
    if dataset.is_empty() {
        println!("{}", NO_TRANSACTIONS_NOTICE);
        return Ok(());
    }

    let mut settings = settings.clone();
    if logo.is_some() {
        settings.report.logo_path = logo;
    }

    let charts = if no_charts {
        ChartSlots::none()
    } else {
        ChartSlots::from_dataset(&dataset)
    };
    let generator = ReportGenerator::new(&settings);
    let request = ReportRequest::new(&dataset, charts);

    if dry_run {
        let (listing, outcome) = preview_report(&generator, &request).await?;
        print!("{}", listing);
        println!(
            "{} page(s), {} row(s), {} chart(s), logo: {}",
            outcome.pages,
            outcome.rows_drawn,
            outcome.charts_drawn,
            if outcome.logo_drawn { "yes" } else { "no" }
        );
        return Ok(());
    }

    let sink = output_sink(paths, &settings, output)?;
    let (delivery, outcome) = export_report(&generator, &request, &sink).await?;

    println!(
        "Report written to: {} ({} page(s), {} transaction(s))",
        delivery
            .location
            .as_deref()
            .unwrap_or_else(|| Path::new(&delivery.filename))
            .display(),
        outcome.pages,
        outcome.rows_drawn
    );

    Ok(())
}

/// Command-line directory, then configured directory, then the working directory
fn output_sink(
    paths: &CashPilotPaths,
    settings: &Settings,
    output: Option<PathBuf>,
) -> CashPilotResult<DirectorySink> {
    let dir = output
        .or_else(|| settings.output_dir.clone())
        .unwrap_or_else(|| paths.default_output_dir());

    std::fs::create_dir_all(&dir).map_err(|e| {
        CashPilotError::Export(format!(
            "Failed to create output directory {}: {}",
            dir.display(),
            e
        ))
    })?;
    debug!(dir = %dir.display(), "output directory ready");

    Ok(DirectorySink::new(dir))
}
