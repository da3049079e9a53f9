pub mod loan;
pub mod reporting;
pub mod settings;

use serde_json::Value;

/// What a command hands back to `main` for printing.
pub enum CommandOutput {
    /// Rendered through the selected `--output` format
    Structured(Value),
    /// Written verbatim, e.g. CSV exports
    Text(String),
}
