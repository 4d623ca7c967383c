#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
/// Year/month arithmetic and the three-month reporting window
pub mod calendar;
/// Error handling and custom [`Error`](std::error::Error) types
pub mod errors;
/// Functions for loading transactions and writing points summaries
pub mod io;
/// Business logic for scoring and summarizing transactions
mod ops;
/// Data types used throughout Loyalty
pub mod types;

pub use ops::{calculate_points, summarize, summarize_with, OutOfWindow};
