use chrono::NaiveDate;

use crate::types::CustomerId;

/// Error type that can be returned by fallible operations in this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error reading or writing CSV files; could wrap IO or parsing errors
    #[error("Error processing CSV")]
    Load(#[from] csv::Error),
    /// Error reading or writing JSON; malformed transactions end up here too
    #[error("Error processing JSON")]
    Json(#[from] serde_json::Error),
    /// Error writing a report
    #[error("IO error")]
    Io(#[from] std::io::Error),
    /// A year that is not a four digit number
    #[error("Invalid year {0:?}")]
    InvalidYear(String),
    /// A month outside of 1 to 12
    #[error("Invalid month {0:?}")]
    InvalidMonth(String),
    /// The start and end dates do not describe three consecutive months, with the start on the
    /// first day of its month.
    #[error("Dates {start} to {end} do not span three consecutive months")]
    InvalidRange {
        /// First day of the requested range
        start: NaiveDate,
        /// Last day of the requested range
        end: NaiveDate,
    },
    /// A transaction fell outside of the three months being summarized.
    /// Callers are expected to select transactions by range before summarizing.
    #[error("Transaction for customer {customer} on {date} is outside the summarized months")]
    OutsideWindow {
        /// Customer on the offending transaction
        customer: CustomerId,
        /// Date of the offending transaction
        date: NaiveDate,
    },
}
