use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::LoanCalcError;
use crate::types::{Money, Rate};
use crate::LoanCalcResult;

/// Compound growth factor `(1 + rate)^nper`.
pub fn growth_factor(rate: Rate, nper: u32) -> LoanCalcResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| LoanCalcError::InvalidInput {
            field: "nper".into(),
            reason: format!("Growth factor overflows decimal precision at {nper} periods"),
        })
}

fn overflow(context: &str) -> LoanCalcError {
    LoanCalcError::InvalidInput {
        field: "present_value".into(),
        reason: format!("{context} overflows decimal precision"),
    }
}

/// Future Value
pub fn fv(rate: Rate, nper: u32, pmt: Money, present_value: Money) -> LoanCalcResult<Money> {
    if rate.is_zero() {
        return pmt
            .checked_mul(Decimal::from(nper))
            .and_then(|paid| present_value.checked_add(paid))
            .map(|v| -v)
            .ok_or_else(|| overflow("FV"));
    }

    let factor = growth_factor(rate, nper)?;
    let annuity_factor = (factor - Decimal::ONE) / rate;

    let grown = present_value.checked_mul(factor);
    let paid = pmt.checked_mul(annuity_factor);
    grown
        .zip(paid)
        .and_then(|(g, p)| g.checked_add(p))
        .map(|v| -v)
        .ok_or_else(|| overflow("FV"))
}

/// Payment (PMT)
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> LoanCalcResult<Money> {
    if nper == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return present_value
            .checked_add(future_value)
            .map(|v| -v / Decimal::from(nper))
            .ok_or_else(|| overflow("PMT"));
    }

    let factor = growth_factor(rate, nper)?;
    let annuity_factor = (factor - Decimal::ONE) / rate;

    if annuity_factor.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    present_value
        .checked_mul(factor)
        .and_then(|grown| grown.checked_add(future_value))
        .and_then(|owed| owed.checked_div(annuity_factor))
        .map(|v| -v)
        .ok_or_else(|| overflow("PMT"))
}

/// Outstanding balance of a level-payment loan after `periods` payments.
pub fn remaining_balance(
    rate: Rate,
    periods: u32,
    payment: Money,
    principal: Money,
) -> LoanCalcResult<Money> {
    // Borrower receives the principal and pays out `payment`, so the FV of the
    // position is the negated balance still owed.
    Ok(-fv(rate, periods, -payment, principal)?)
}
