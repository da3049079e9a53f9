pub mod calculator;

pub use calculator::{
    amortize, calculate_loan, compute, AmortizationEntry, AmortizationResult, LoanRequest,
};
