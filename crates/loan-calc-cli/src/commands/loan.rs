use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::amortization::{self, LoanRequest};
use loan_calc_core::export;
use loan_calc_core::settings::CalculatorSettings;

use crate::input;

/// Arguments shared by `calculate` and `export-schedule`
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file with loan_amount, interest_rate and loan_term
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent (defaults to the settings value)
    #[arg(long, allow_hyphen_values = true)]
    pub interest_rate: Option<Decimal>,

    /// Term in months (defaults to the settings value)
    #[arg(long, allow_hyphen_values = true)]
    pub loan_term: Option<i64>,
}

fn read_request(
    args: &LoanArgs,
    settings: &CalculatorSettings,
) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    if let Some(amount) = args.loan_amount {
        return Ok(settings.request(amount, args.interest_rate, args.loan_term));
    }
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    match input::stdin::read_stdin()? {
        Some(request) => Ok(request),
        None => Err("--loan-amount is required (or provide --input / stdin)".into()),
    }
}

pub fn run_calculate(
    args: LoanArgs,
    settings: &CalculatorSettings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = read_request(&args, settings)?;
    let result = amortization::calculate_loan(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_export_schedule(
    args: LoanArgs,
    settings: &CalculatorSettings,
) -> Result<String, Box<dyn std::error::Error>> {
    let request = read_request(&args, settings)?;
    let result = amortization::amortize(&request)?;
    Ok(export::schedule_csv(&result.schedule, &settings.currency_symbol)?)
}
