//! Helpers for reading transactions and outputting points reports

use std::io::{Read, Write};

use chrono::NaiveDate;
use csv::Trim;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    calendar::MonthRange,
    errors::Error,
    types::{Summary, Transaction},
};

/// Somewhere transactions can be fetched from, one range at a time
pub trait TransactionSource {
    /// Fetches every transaction dated between the first and last days of `range`, inclusive
    fn transactions(&self, range: &MonthRange) -> Result<Vec<Transaction>, Error>;
}

/// Holds transactions in memory, for instance after loading them from a file.
///
/// # Limitations
/// No persistence.
#[derive(Default, Debug)]
pub struct MemoryTransactionSource {
    transactions: Vec<Transaction>,
}

impl MemoryTransactionSource {
    /// Creates a source over an already loaded list of transactions
    #[must_use]
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

impl TransactionSource for MemoryTransactionSource {
    fn transactions(&self, range: &MonthRange) -> Result<Vec<Transaction>, Error> {
        let (start, end) = (range.start_date(), range.end_date());
        Ok(self
            .transactions
            .iter()
            .filter(|transaction| (start..=end).contains(&transaction.date))
            .cloned()
            .collect())
    }
}

/// CSV shape of a [`Transaction`]. Identifiers stay as written, leading zeros included.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvTransaction {
    customer_id: String,
    customer_name: String,
    date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
}

impl From<CsvTransaction> for Transaction {
    fn from(record: CsvTransaction) -> Self {
        Transaction::new(record.customer_id, record.customer_name, record.date, record.amount)
    }
}

/// Loads transactions from a CSV-formatted file stream.
///
/// Expects input data in this format (including header):
/// ```csv
/// customerId, customerName,     date,        amount
/// 123,        John Doe,         2023-01-17,  178.57
/// 118,        Jane Smith,       2023-02-03,  64.10
/// ```
///
/// A malformed record fails the whole load.
pub fn load_transactions_from_csv<R>(reader: &mut R) -> Result<Vec<Transaction>, Error>
where
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut transactions = Vec::new();
    for record in csv_reader.deserialize() {
        let record: CsvTransaction = record?;
        transactions.push(record.into());
    }
    Ok(transactions)
}

/// Loads transactions from a JSON array, as served by the transactions API:
/// ```json
/// [{"customerId": 123, "customerName": "John Doe", "date": "2023-01-17", "amount": 178.57}]
/// ```
pub fn load_transactions_from_json<R>(reader: &mut R) -> Result<Vec<Transaction>, Error>
where
    R: Read,
{
    Ok(serde_json::from_reader(reader)?)
}

/// Outputs a summary as CSV, using the summary's headers as the header record.
///
/// Output data will be in the form:
/// ```csv
/// Customer ID,Customer Name,July,August,September,Total
/// 1,A,90,10,0,100
/// ```
pub fn write_summary_to_csv<W>(writer: &mut W, summary: &Summary) -> Result<(), Error>
where
    W: Write,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(&summary.headers)?;
    for row in &summary.rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Outputs a summary as a pretty-printed JSON object with `title`, `headers` and `rows`.
pub fn write_summary_to_json<W>(writer: &mut W, summary: &Summary) -> Result<(), Error>
where
    W: Write,
{
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Outputs a summary as a plain text table under its title.
///
/// Text columns are left aligned and point columns right aligned.
pub fn write_summary_table<W>(writer: &mut W, summary: &Summary) -> Result<(), Error>
where
    W: Write,
{
    let cells: Vec<[String; 6]> = summary
        .rows
        .iter()
        .map(|row| {
            [
                row.id.to_string(),
                row.name.clone(),
                row.month1.to_string(),
                row.month2.to_string(),
                row.month3.to_string(),
                row.total.to_string(),
            ]
        })
        .collect();
    let mut widths = summary.headers.clone().map(|header| header.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(writer, "{}", summary.title)?;
    writeln!(writer)?;
    for line in std::iter::once(&summary.headers).chain(&cells) {
        let mut text = String::new();
        for (column, (cell, width)) in line.iter().zip(widths).enumerate() {
            if column > 0 {
                text.push_str("  ");
            }
            if column < 2 {
                text.push_str(&format!("{cell:<width$}"));
            } else {
                text.push_str(&format!("{cell:>width$}"));
            }
        }
        writeln!(writer, "{}", text.trim_end())?;
    }
    Ok(())
}
