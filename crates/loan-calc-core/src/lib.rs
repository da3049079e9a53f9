pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "amortization")]
pub mod settings;

#[cfg(feature = "reporting")]
pub mod reporting;

#[cfg(feature = "reporting")]
pub mod api;

#[cfg(feature = "export")]
pub mod export;

pub use error::LoanCalcError;
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
