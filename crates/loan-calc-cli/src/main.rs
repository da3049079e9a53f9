mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::error::Error;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::loan::LoanArgs;
use commands::reporting::{ExportRecordsArgs, StatsArgs};
use commands::CommandOutput;

/// Loan amortisation calculator
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Loan amortisation calculator",
    long_about = "A CLI for level-payment loan calculations with decimal precision. \
                  Produces monthly payments and amortisation schedules, summarises \
                  calculation logs, and exports both as CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Settings file (JSON or YAML) with default rate, term and currency symbol
    #[arg(long, env = "LOANCALC_SETTINGS", global = true)]
    settings: Option<String>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the monthly payment, totals and amortisation schedule
    Calculate(LoanArgs),
    /// Write the amortisation schedule as CSV
    ExportSchedule(LoanArgs),
    /// Summarise a calculation log (count, totals, recent entries)
    Stats(StatsArgs),
    /// Write a calculation log as CSV
    ExportRecords(ExportRecordsArgs),
    /// Show the effective calculator settings
    Settings,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands, settings_path: Option<&str>) -> Result<CommandOutput, Box<dyn Error>> {
    let settings = || input::settings::load_settings(settings_path);

    match command {
        Commands::Calculate(args) => {
            commands::loan::run_calculate(args, &settings()?).map(CommandOutput::Structured)
        }
        Commands::ExportSchedule(args) => {
            commands::loan::run_export_schedule(args, &settings()?).map(CommandOutput::Text)
        }
        Commands::Stats(args) => commands::reporting::run_stats(args).map(CommandOutput::Structured),
        Commands::ExportRecords(args) => {
            commands::reporting::run_export_records(args).map(CommandOutput::Text)
        }
        Commands::Settings => {
            commands::settings::run_settings(&settings()?).map(CommandOutput::Structured)
        }
        Commands::Version => Ok(CommandOutput::Text(format!(
            "loancalc {}\n",
            env!("CARGO_PKG_VERSION")
        ))),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command, cli.settings.as_deref()) {
        Ok(CommandOutput::Structured(value)) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Ok(CommandOutput::Text(text)) => {
            print!("{text}");
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
