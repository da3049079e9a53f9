use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::Value;

use loan_calc_core::export;
use loan_calc_core::reporting::stats::DEFAULT_RECENT_LIMIT;
use loan_calc_core::reporting::{self, CalculationRecord, StatsInput};

use crate::input;

/// Arguments for dashboard statistics
#[derive(Args)]
pub struct StatsArgs {
    /// Path to a JSON array of calculation records
    #[arg(long)]
    pub input: Option<String>,

    /// How many recent calculations to list
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub limit: usize,

    /// Day counted as today (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Arguments for exporting the calculation log
#[derive(Args)]
pub struct ExportRecordsArgs {
    /// Path to a JSON array of calculation records
    #[arg(long)]
    pub input: Option<String>,
}

fn read_records(path: Option<&str>) -> Result<Vec<CalculationRecord>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        input::file::read_json(path)
    } else if let Some(records) = input::stdin::read_stdin()? {
        Ok(records)
    } else {
        Err("--input <records.json> or stdin required".into())
    }
}

pub fn run_stats(args: StatsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let records = read_records(args.input.as_deref())?;
    let stats_input = StatsInput {
        records,
        as_of: args.today.unwrap_or_else(|| Local::now().date_naive()),
        recent_limit: Some(args.limit),
    };
    let result = reporting::calculation_stats(&stats_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_export_records(args: ExportRecordsArgs) -> Result<String, Box<dyn std::error::Error>> {
    let records = read_records(args.input.as_deref())?;
    tracing::info!(
        rows = records.len(),
        file_name = %export::records_file_name(Local::now().date_naive()),
        "exporting calculation log"
    );
    Ok(export::records_csv(&records)?)
}
