use std::io::Write;
use std::process::Command;

const INPUT_CSV: &str = "customerId, customerName, date,       amount
123,        John Doe,     2023-12-17, 178.57
118,        Jane Smith,   2024-01-03, 64.10
123,        John Doe,     2024-02-29, 100
118,        Jane Smith,   2023-11-30, 900
";

const INPUT_JSON: &str = r#"[
    {"customerId": 123, "customerName": "John Doe", "date": "2023-12-17", "amount": 178.57},
    {"customerId": 118, "customerName": "Jane Smith", "date": "2024-01-03", "amount": 64.10},
    {"customerId": 123, "customerName": "John Doe", "date": "2024-02-29", "amount": 100},
    {"customerId": 118, "customerName": "Jane Smith", "date": "2023-11-30", "amount": 900}
]"#;

const EXPECTED_CSV: &str = "Customer ID,Customer Name,December,January,February,Total
118,Jane Smith,0,14,0,14
123,John Doe,206,0,50,256
";

fn run(input: &str, suffix: &str, args: &[&str]) -> std::process::Output {
    let bin_path = env!("CARGO_BIN_EXE_loyalty");
    let mut temp_file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temporary file");
    temp_file
        .write_all(input.as_bytes())
        .expect("Failed to write to temporary file");
    Command::new(bin_path)
        .args(args)
        .arg(temp_file.path())
        .args(["--format", "csv"])
        .output()
        .expect("Failed to execute binary")
}

#[test]
fn test_csv_input_across_year_end() {
    let output = run(INPUT_CSV, ".csv", &["2023", "12"]);
    assert!(
        output.status.success(),
        "Binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), EXPECTED_CSV);
}

#[test]
fn test_json_input() {
    let output = run(INPUT_JSON, ".json", &["2023", "12"]);
    assert!(
        output.status.success(),
        "Binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), EXPECTED_CSV);
}

#[test]
fn test_invalid_month_fails() {
    let output = run(INPUT_CSV, ".csv", &["2023", "13"]);
    assert!(!output.status.success());
}
