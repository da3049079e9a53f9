use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::LoanRequest;
use crate::error::LoanCalcError;
use crate::types::{round_money, Money, Percent};
use crate::LoanCalcResult;

const MAX_DEFAULT_RATE: Decimal = dec!(50);
const MAX_DEFAULT_TERM: u32 = 360;
const MAX_SYMBOL_CHARS: usize = 5;

/// Calculator-wide settings handed to every caller that builds requests or
/// formats amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    /// Pre-filled annual rate, as a percentage
    pub default_interest_rate: Percent,
    /// Pre-filled term in months
    pub default_loan_term: u32,
    pub currency_symbol: String,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            default_interest_rate: dec!(7.5),
            default_loan_term: 12,
            currency_symbol: "R".into(),
        }
    }
}

impl CalculatorSettings {
    /// Parse settings from JSON, filling absent keys with defaults.
    pub fn from_json(raw: &str) -> LoanCalcResult<Self> {
        let settings: Self = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from YAML, filling absent keys with defaults.
    pub fn from_yaml(raw: &str) -> LoanCalcResult<Self> {
        let settings: Self = serde_yaml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> LoanCalcResult<()> {
        if self.default_interest_rate < Decimal::ZERO
            || self.default_interest_rate > MAX_DEFAULT_RATE
        {
            return Err(LoanCalcError::InvalidInput {
                field: "default_interest_rate".into(),
                reason: format!("Interest rate must be between 0 and {MAX_DEFAULT_RATE}"),
            });
        }
        if self.default_loan_term == 0 || self.default_loan_term > MAX_DEFAULT_TERM {
            return Err(LoanCalcError::InvalidInput {
                field: "default_loan_term".into(),
                reason: format!("Loan term must be between 1 and {MAX_DEFAULT_TERM} months"),
            });
        }
        let symbol = self.currency_symbol.trim();
        if symbol.is_empty() || symbol.chars().count() > MAX_SYMBOL_CHARS {
            return Err(LoanCalcError::InvalidInput {
                field: "currency_symbol".into(),
                reason: format!("Currency symbol must be 1 to {MAX_SYMBOL_CHARS} characters"),
            });
        }
        Ok(())
    }

    /// Build a request, taking any omitted rate or term from the defaults.
    pub fn request(
        &self,
        principal: Money,
        annual_rate_percent: Option<Percent>,
        term_months: Option<i64>,
    ) -> LoanRequest {
        LoanRequest::new(
            principal,
            annual_rate_percent.unwrap_or(self.default_interest_rate),
            term_months.unwrap_or(i64::from(self.default_loan_term)),
        )
    }

    /// Build a request that uses the default rate and term.
    pub fn default_request(&self, principal: Money) -> LoanRequest {
        self.request(principal, None, None)
    }

    /// Render an amount as `"<symbol> 1,234.56"`.
    pub fn format_money(&self, amount: Money) -> String {
        format!("{} {}", self.currency_symbol, group_thousands(amount))
    }
}

/// Cents-rounded amount with comma thousands separators.
pub fn group_thousands(amount: Money) -> String {
    let rounded = round_money(amount).to_string();
    let (sign, unsigned) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (whole, cents) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_are_valid() {
        let settings = CalculatorSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.default_interest_rate, dec!(7.5));
        assert_eq!(settings.default_loan_term, 12);
        assert_eq!(settings.currency_symbol, "R");
    }

    #[test]
    fn test_from_json_partial() {
        let settings = CalculatorSettings::from_json(r#"{"currency_symbol": "$"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_loan_term, 12);
    }

    #[test]
    fn test_from_yaml() {
        let raw = "default_interest_rate: 11.25\ndefault_loan_term: 60\ncurrency_symbol: \"€\"\n";
        let settings = CalculatorSettings::from_yaml(raw).unwrap();
        assert_eq!(settings.default_interest_rate, dec!(11.25));
        assert_eq!(settings.default_loan_term, 60);
        assert_eq!(settings.currency_symbol, "€");
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(CalculatorSettings::from_json(r#"{"default_interest_rate": 51}"#).is_err());
        assert!(CalculatorSettings::from_json(r#"{"default_loan_term": 0}"#).is_err());
        assert!(CalculatorSettings::from_json(r#"{"default_loan_term": 361}"#).is_err());
        assert!(CalculatorSettings::from_json(r#"{"currency_symbol": "TOOLONG"}"#).is_err());
        assert!(CalculatorSettings::from_json(r#"{"currency_symbol": " "}"#).is_err());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = CalculatorSettings::from_json("{not json").unwrap_err();
        assert!(matches!(err, LoanCalcError::SerializationError(_)));
    }

    #[test]
    fn test_request_uses_defaults() {
        let settings = CalculatorSettings::default();
        let req = settings.request(dec!(5000), None, Some(24));
        assert_eq!(req.annual_rate_percent, dec!(7.5));
        assert_eq!(req.term_months, 24);
        assert_eq!(settings.default_request(dec!(5000)).term_months, 12);
    }

    #[test]
    fn test_format_money() {
        let settings = CalculatorSettings::default();
        assert_eq!(settings.format_money(dec!(8675.741)), "R 8,675.74");
        assert_eq!(settings.format_money(dec!(1234567.5)), "R 1,234,567.50");
        assert_eq!(settings.format_money(dec!(12)), "R 12.00");
    }

    #[test]
    fn test_group_thousands_negative() {
        assert_eq!(group_thousands(dec!(-1000)), "-1,000.00");
        assert_eq!(group_thousands(dec!(999.999)), "1,000.00");
    }
}
