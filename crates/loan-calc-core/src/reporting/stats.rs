use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::reporting::records::CalculationRecord;
use crate::types::*;
use crate::LoanCalcResult;

/// Recent calculations returned when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Input for the dashboard statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsInput {
    pub records: Vec<CalculationRecord>,
    /// Day counted as "today"
    pub as_of: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_limit: Option<usize>,
}

/// Aggregate figures over the calculation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStats {
    pub total_calculations: usize,
    /// `None` when the log is empty
    pub avg_loan_amount: Option<Money>,
    /// `None` when the log is empty
    pub total_loan_amount: Option<Money>,
    pub calculations_today: usize,
    /// Newest first
    pub recent_calculations: Vec<CalculationRecord>,
}

/// Count, sum and average the log, and pick out the most recent rows.
pub fn summarize(
    records: &[CalculationRecord],
    as_of: NaiveDate,
    recent_limit: usize,
) -> CalculationStats {
    let total_calculations = records.len();

    let (avg_loan_amount, total_loan_amount) = if records.is_empty() {
        (None, None)
    } else {
        let total: Money = records.iter().map(|r| r.loan_amount).sum();
        let avg = total / Decimal::from(total_calculations as u64);
        (Some(round_money(avg)), Some(round_money(total)))
    };

    let calculations_today = records
        .iter()
        .filter(|r| r.calculation_date.date() == as_of)
        .count();

    let mut recent: Vec<&CalculationRecord> = records.iter().collect();
    recent.sort_by(|a, b| {
        b.calculation_date
            .cmp(&a.calculation_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    let recent_calculations = recent
        .into_iter()
        .take(recent_limit)
        .cloned()
        .collect();

    CalculationStats {
        total_calculations,
        avg_loan_amount,
        total_loan_amount,
        calculations_today,
        recent_calculations,
    }
}

/// Dashboard statistics wrapped with methodology metadata.
pub fn calculation_stats(
    input: &StatsInput,
) -> LoanCalcResult<ComputationOutput<CalculationStats>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let limit = input.recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    if limit == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "recent_limit".into(),
            reason: "Recent limit must be at least 1".into(),
        });
    }

    if let Some(rec) = input.records.iter().find(|r| r.calculation_date.date() > input.as_of) {
        warnings.push(format!(
            "Record {} is dated after {}; it is counted in totals but not as today",
            rec.id, input.as_of
        ));
    }

    let stats = summarize(&input.records, input.as_of, limit);
    tracing::debug!(
        total = stats.total_calculations,
        today = stats.calculations_today,
        "summarised calculation log"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Calculation log aggregation",
        &serde_json::json!({
            "as_of": input.as_of.to_string(),
            "recent_limit": limit,
        }),
        warnings,
        elapsed,
        stats,
    ))
}
