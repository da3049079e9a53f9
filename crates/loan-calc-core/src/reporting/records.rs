use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationResult, LoanRequest};
use crate::types::{round_money, Money, Percent};
use crate::LoanCalcResult;

/// One logged calculation, as kept by whatever store the host application
/// uses. Amounts are stored to the cent and rates to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: u64,
    pub loan_amount: Money,
    pub interest_rate: Percent,
    pub loan_term: u32,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub calculation_date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ip: Option<String>,
}

impl CalculationRecord {
    /// Capture a finished calculation for the log.
    pub fn from_result(
        id: u64,
        request: &LoanRequest,
        result: &AmortizationResult,
        calculation_date: NaiveDateTime,
        user_ip: Option<String>,
    ) -> LoanCalcResult<Self> {
        let loan_term = request.validate()?;
        Ok(Self {
            id,
            loan_amount: round_money(request.principal),
            interest_rate: round_money(request.annual_rate_percent),
            loan_term,
            monthly_payment: result.monthly_payment,
            total_payment: result.total_payment,
            total_interest: result.total_interest,
            calculation_date,
            user_ip,
        })
    }
}
