use chrono::{Local, NaiveDate};
use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use loan_calc_core::reporting::{CalculationRecord, StatsInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortisation
// ---------------------------------------------------------------------------

/// Full calculation envelope (result, methodology, warnings, metadata).
#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: loan_calc_core::amortization::LoanRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_calc_core::amortization::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Request-handler reply: `{"success": .., "data": ..}`. Never throws on bad
/// input; rejected requests come back with `success: false`.
#[napi]
pub fn handle_calculate_request(input_json: String) -> NapiResult<String> {
    let response = loan_calc_core::api::handle_calculate(&input_json);
    response.to_json().map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct StatsRequest {
    records: Vec<CalculationRecord>,
    #[serde(default)]
    as_of: Option<NaiveDate>,
    #[serde(default)]
    recent_limit: Option<usize>,
}

#[napi]
pub fn calculation_stats(input_json: String) -> NapiResult<String> {
    let request: StatsRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let input = StatsInput {
        records: request.records,
        as_of: request.as_of.unwrap_or_else(|| Local::now().date_naive()),
        recent_limit: request.recent_limit,
    };
    let output = loan_calc_core::reporting::calculation_stats(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn export_records_csv(input_json: String) -> NapiResult<String> {
    let records: Vec<CalculationRecord> =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    loan_calc_core::export::records_csv(&records).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[napi]
pub fn default_settings() -> NapiResult<String> {
    let settings = loan_calc_core::settings::CalculatorSettings::default();
    serde_json::to_string(&settings).map_err(to_napi_error)
}

#[napi]
pub fn validate_settings(input_json: String) -> NapiResult<String> {
    let settings = loan_calc_core::settings::CalculatorSettings::from_json(&input_json)
        .map_err(to_napi_error)?;
    serde_json::to_string(&settings).map_err(to_napi_error)
}
