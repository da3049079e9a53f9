use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::time_value;
use crate::types::*;
use crate::LoanCalcResult;

/// Highest annual rate the calculator is tuned for; larger rates still compute.
pub const MAX_TYPICAL_RATE_PERCENT: Decimal = dec!(50);

/// Longest term the calculator is tuned for; longer terms still compute.
pub const MAX_TYPICAL_TERM_MONTHS: u32 = 360;

/// Hard ceiling on the term. The schedule holds one entry per month.
pub const MAX_TERM_MONTHS: u32 = 1200;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const RESIDUAL_TOLERANCE: Decimal = dec!(0.005);

/// A single loan to amortise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    #[serde(rename = "loan_amount")]
    pub principal: Money,
    /// Nominal annual rate as a percentage (7.5 = 7.5%)
    #[serde(rename = "interest_rate")]
    pub annual_rate_percent: Percent,
    #[serde(rename = "loan_term")]
    pub term_months: i64,
}

impl LoanRequest {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_months: i64) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
        }
    }

    /// Check the request and return the term as a period count.
    pub fn validate(&self) -> LoanCalcResult<u32> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanCalcError::invalid(
                "loan_amount",
                "Loan amount must be positive",
            ));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(LoanCalcError::invalid(
                "interest_rate",
                "Interest rate cannot be negative",
            ));
        }
        if self.term_months <= 0 {
            return Err(LoanCalcError::invalid(
                "loan_term",
                "Loan term must be at least 1 month",
            ));
        }
        match u32::try_from(self.term_months) {
            Ok(months) if months <= MAX_TERM_MONTHS => Ok(months),
            _ => Err(LoanCalcError::InvalidInput {
                field: "loan_term".into(),
                reason: format!("Loan term cannot exceed {MAX_TERM_MONTHS} months"),
            }),
        }
    }

    /// Nominal annual percentage converted to a per-month decimal rate.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
    }
}

/// One month of the amortisation schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month: u32,
    pub payment: Money,
    #[serde(rename = "principal")]
    pub principal_portion: Money,
    #[serde(rename = "interest")]
    pub interest_portion: Money,
    #[serde(rename = "balance")]
    pub remaining_balance: Money,
}

/// Level payment, totals and the full month-by-month schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    #[serde(rename = "amortization_schedule")]
    pub schedule: Vec<AmortizationEntry>,
}

/// Amortise a loan from its raw terms.
///
/// Rounding is applied per period: the running balance keeps full precision
/// while every recorded figure is rounded half away from zero to cents.
pub fn compute(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: i64,
) -> LoanCalcResult<AmortizationResult> {
    amortize(&LoanRequest::new(principal, annual_rate_percent, term_months))
}

/// Amortise a validated loan request.
pub fn amortize(request: &LoanRequest) -> LoanCalcResult<AmortizationResult> {
    let months = request.validate()?;
    walk(request, months).map(|(result, _)| result)
}

/// Walk the schedule month by month, returning the result together with the
/// unrounded balance left after the final payment.
fn walk(request: &LoanRequest, months: u32) -> LoanCalcResult<(AmortizationResult, Decimal)> {
    let monthly_rate = request.monthly_rate();

    // Annuity payment; zero-rate loans fall back to straight division.
    let payment = -time_value::pmt(monthly_rate, months, request.principal, Decimal::ZERO)
        .map_err(to_wire_field)?;
    let total_payment = payment
        .checked_mul(Decimal::from(months))
        .ok_or_else(too_large)?;
    let total_interest = total_payment - request.principal;

    let mut schedule = Vec::with_capacity(months as usize);
    let mut balance = request.principal;

    for month in 1..=months {
        let interest = balance.checked_mul(monthly_rate).ok_or_else(too_large)?;
        let principal_paid = payment - interest;
        balance -= principal_paid;

        schedule.push(AmortizationEntry {
            month,
            payment: round_money(payment),
            principal_portion: round_money(principal_paid),
            interest_portion: round_money(interest),
            remaining_balance: round_money(balance.max(Decimal::ZERO)),
        });
    }

    tracing::debug!(
        principal = %request.principal,
        rate = %request.annual_rate_percent,
        months,
        payment = %payment,
        residual = %balance,
        "amortised loan"
    );

    let result = AmortizationResult {
        monthly_payment: round_money(payment),
        total_payment: round_money(total_payment),
        total_interest: round_money(total_interest),
        schedule,
    };
    Ok((result, balance))
}

fn too_large() -> LoanCalcError {
    LoanCalcError::invalid("loan_amount", "Loan amount is too large to amortise")
}

/// Rename time-value parameters to the request fields they came from.
fn to_wire_field(err: LoanCalcError) -> LoanCalcError {
    match err {
        LoanCalcError::InvalidInput { field, reason } if field == "nper" => {
            LoanCalcError::InvalidInput {
                field: "loan_term".into(),
                reason,
            }
        }
        LoanCalcError::InvalidInput { reason, .. } => LoanCalcError::InvalidInput {
            field: "loan_amount".into(),
            reason,
        },
        other => other,
    }
}

/// Warning text when the balance left after the last payment is a cent or
/// more once rounded.
fn residual_warning(residual: Decimal) -> Option<String> {
    (residual.abs() >= RESIDUAL_TOLERANCE).then(|| {
        format!(
            "Residual balance of {} remains after the final payment",
            round_money(residual)
        )
    })
}

/// Amortise a loan and wrap the result with methodology and warnings.
pub fn calculate_loan(
    request: &LoanRequest,
) -> LoanCalcResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let months = request.validate()?;
    let (result, residual) = walk(request, months)?;

    if request.annual_rate_percent > MAX_TYPICAL_RATE_PERCENT {
        tracing::warn!(rate = %request.annual_rate_percent, "rate above typical range");
        warnings.push(format!(
            "Annual rate {}% exceeds the typical maximum of {}%",
            request.annual_rate_percent, MAX_TYPICAL_RATE_PERCENT
        ));
    }
    if months > MAX_TYPICAL_TERM_MONTHS {
        tracing::warn!(months, "term above typical range");
        warnings.push(format!(
            "Loan term of {months} months exceeds the typical maximum of {MAX_TYPICAL_TERM_MONTHS}"
        ));
    }
    if let Some(warning) = residual_warning(residual) {
        tracing::warn!(residual = %residual, "schedule did not amortise to zero");
        warnings.push(warning);
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment annuity amortisation (round half-up per period)",
        &serde_json::json!({
            "loan_amount": request.principal.to_string(),
            "interest_rate_pct": request.annual_rate_percent.to_string(),
            "monthly_rate": request.monthly_rate().to_string(),
            "loan_term_months": months,
        }),
        warnings,
        elapsed,
        result,
    ))
}
