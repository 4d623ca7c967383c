use std::{fs::File, io::BufReader, path::PathBuf};

use clap::{Parser, ValueEnum};
use log::info;
use loyalty::{
    calendar::{MonthRange, YearMonth},
    io::{self, MemoryTransactionSource, TransactionSource},
    summarize,
};

/// Shows the loyalty points each customer earned over three months
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Year of the first month, e.g. 2023
    year: String,
    /// First month of the range, e.g. 07
    month: String,
    /// Transactions file; `.json` files are read as JSON, anything else as CSV
    transactions: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Csv,
    Json,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let first = YearMonth::parse(&args.year, &args.month).unwrap_or_else(|err| {
        panic!(
            "Couldn't use {} {} as a starting month: {err}",
            args.year, args.month
        )
    });
    let range = MonthRange::starting(first);

    let file_name = args.transactions.display();
    let file = File::open(&args.transactions)
        .unwrap_or_else(|err| panic!("Couldn't open transactions at {file_name}: {err}"));
    let mut reader = BufReader::new(file);
    let is_json = args
        .transactions
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let transactions = if is_json {
        io::load_transactions_from_json(&mut reader)
    } else {
        io::load_transactions_from_csv(&mut reader)
    }
    .unwrap_or_else(|err| panic!("Failed to load transactions from {file_name}: {err}"));
    info!("Loaded {} transactions from {file_name}", transactions.len());

    let transactions = MemoryTransactionSource::new(transactions)
        .transactions(&range)
        .unwrap_or_else(|err| panic!("Failed to select transactions for {range}: {err}"));
    let summary = summarize(&transactions, range.start_date(), range.end_date())
        .unwrap_or_else(|err| panic!("Failed to summarize points for {range}: {err}"));

    let mut stdout = std::io::stdout().lock();
    match args.format {
        Format::Table => io::write_summary_table(&mut stdout, &summary),
        Format::Csv => io::write_summary_to_csv(&mut stdout, &summary),
        Format::Json => io::write_summary_to_json(&mut stdout, &summary),
    }
    .unwrap_or_else(|err| panic!("Failed to write summary: {err}"));
}
