use rust_decimal_macros::dec;
use serde_json::Value;

use loan_calc_core::settings::CalculatorSettings;

/// Show the effective settings together with a formatting sample.
pub fn run_settings(settings: &CalculatorSettings) -> Result<Value, Box<dyn std::error::Error>> {
    settings.validate()?;
    Ok(serde_json::json!({
        "result": settings,
        "methodology": format!("Amounts render as {}", settings.format_money(dec!(1234567.891))),
        "warnings": [],
    }))
}
