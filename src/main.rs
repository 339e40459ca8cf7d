use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cashpilot::cli::{handle_export_command, handle_summary_command, ExportCommands};
use cashpilot::config::{paths::CashPilotPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "cashpilot",
    version,
    about = "Export personal finance data as CSV or a PDF report",
    long_about = "CashPilot turns a snapshot of your transactions, totals, monthly \
                  income and budget into a spreadsheet-friendly CSV file or a \
                  paginated PDF report with charts."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a dataset as CSV or PDF
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show totals and budget usage for a dataset
    Summary {
        /// Dataset file (.json, .yaml or .yml)
        input: PathBuf,
    },

    /// Show current configuration and paths
    Config,

    /// Write the default settings file
    Init,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    cashpilot::logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = CashPilotPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Export(cmd)) => {
            let context = cmd.failure_context();
            handle_export_command(&paths, &settings, cmd)
                .await
                .context(context)?;
        }
        Some(Commands::Summary { input }) => {
            handle_summary_command(&settings, &input).context("Summary failed")?;
        }
        Some(Commands::Config) => {
            println!("CashPilot Configuration");
            println!("=======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Output directory: {}",
                settings
                    .output_dir
                    .clone()
                    .unwrap_or_else(|| paths.default_output_dir())
                    .display()
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency.symbol);
            println!(
                "  Separators:       thousands '{}', decimal '{}'",
                settings.currency.thousands_separator, settings.currency.decimal_separator
            );
            println!("  Date format:      {}", settings.datetime.format);
            println!("  UTC offset:       {} min", settings.datetime.utc_offset_minutes);
            println!("  Report title:     {}", settings.report.title);
            println!("  Chart scale:      {}x", settings.report.chart_scale);
            if let Some(logo) = &settings.report.logo_path {
                println!("  Logo:             {}", logo.display());
            }
            if let Some(font) = &settings.report.font_path {
                println!("  Font:             {}", font.display());
            }
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
        }
        None => {
            println!("CashPilot - personal finance exports");
            println!();
            println!("Run 'cashpilot --help' for usage information.");
        }
    }

    Ok(())
}
