use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Rates quoted as percentages (7.5 = 7.5%), as loan applicants enter them.
pub type Percent = Decimal;

/// Decimal places kept on every recorded monetary figure.
pub const MONEY_DP: u32 = 2;

/// Round to cents, half away from zero, always carrying exactly two decimal
/// places. A negative zero produced by rounding collapses to `0.00`.
pub fn round_money(value: Decimal) -> Money {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(2.345)).to_string(), "2.35");
        assert_eq!(round_money(dec!(2.344)).to_string(), "2.34");
        assert_eq!(round_money(dec!(-2.345)).to_string(), "-2.35");
    }

    #[test]
    fn test_round_money_pads_scale() {
        assert_eq!(round_money(dec!(1000)).to_string(), "1000.00");
        assert_eq!(round_money(dec!(0.5)).to_string(), "0.50");
    }

    #[test]
    fn test_round_money_no_negative_zero() {
        let tiny = dec!(-0.0000000001);
        assert_eq!(round_money(tiny).to_string(), "0.00");
        assert!(!round_money(tiny).is_sign_negative());
    }
}
