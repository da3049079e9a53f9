pub mod records;
pub mod stats;

pub use records::CalculationRecord;
pub use stats::{calculation_stats, summarize, CalculationStats, StatsInput};
