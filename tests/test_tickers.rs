//! Ticker table loading and company-name search.

mod common;

use flate2::write::GzEncoder;
use flate2::Compression;
use kabuka_sdk::{TickerRow, TickerTable};
use std::io::Write;

fn spec_table() -> TickerTable {
    TickerTable::from_rows(vec![
        TickerRow::new("Toyota Motor", "7203"),
        TickerRow::new("Sony", "6758"),
    ])
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn search_is_case_insensitive() {
    let table = spec_table();
    let rows = table.search("toyota");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].company_name, "Toyota Motor");
    assert_eq!(rows[0].ticker_code, "7203");
}

#[test]
fn search_matches_substrings_anywhere() {
    let table = spec_table();
    assert_eq!(table.search("MOTOR").len(), 1);
    assert_eq!(table.search("on").len(), 1);
    assert_eq!(table.search("on")[0].ticker_code, "6758");
}

#[test]
fn search_preserves_table_order() {
    let table = TickerTable::from_rows(common::sample_rows());
    let codes: Vec<&str> = table
        .search("toyota")
        .iter()
        .map(|r| r.ticker_code.as_str())
        .collect();
    assert_eq!(codes, vec!["7203", "6201"]);
}

#[test]
fn search_returns_empty_on_no_match() {
    assert!(spec_table().search("honda").is_empty());
}

#[test]
fn search_is_not_fuzzy() {
    assert!(spec_table().search("toyta").is_empty());
}

#[test]
fn search_handles_japanese_names() {
    let table = TickerTable::from_rows(vec![
        TickerRow::new("トヨタ自動車", "7203"),
        TickerRow::new("ソニーグループ", "6758"),
    ]);
    let rows = table.search("トヨタ");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ticker_code, "7203");
}

#[test]
fn get_by_code_finds_exact_code() {
    let table = TickerTable::from_rows(common::sample_rows());
    assert_eq!(table.get_by_code("7974").unwrap().company_name, "Nintendo");
    assert!(table.get_by_code("797").is_none());
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn load_plain_csv() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "company_name,ticker_code").unwrap();
    writeln!(file, "Toyota Motor,7203").unwrap();
    writeln!(file, "Sony,6758").unwrap();
    file.flush().unwrap();

    let table = TickerTable::load(file.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1], TickerRow::new("Sony", "6758"));
}

#[test]
fn load_japanese_headers_and_extra_columns() {
    let csv = "日付,コード,銘柄名,市場\n20240401,7203,トヨタ自動車,プライム\n20240401,6758,ソニーグループ,プライム\n";
    let table = TickerTable::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0].company_name, "トヨタ自動車");
    assert_eq!(table.rows()[0].ticker_code, "7203");
}

#[test]
fn load_skips_blank_rows() {
    let csv = "name,code\nToyota Motor,7203\n ,6758\nSony,\n";
    let table = TickerTable::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn load_gzipped_csv_matches_plain() {
    let contents = "company_name,ticker_code\nToyota Motor,7203\nSony,6758\n";

    let mut gz = tempfile::Builder::new().suffix(".csv.gz").tempfile().unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    gz.write_all(&encoder.finish().unwrap()).unwrap();
    gz.flush().unwrap();

    let from_gz = TickerTable::load(gz.path()).unwrap();
    let plain = TickerTable::from_reader(contents.as_bytes()).unwrap();
    assert_eq!(from_gz.rows(), plain.rows());
}

#[test]
fn load_missing_file_is_io_error() {
    let err = TickerTable::load("/nonexistent/tickers.csv").unwrap_err();
    assert!(matches!(err, kabuka_sdk::KabukaError::Io(_)));
}

// ---------------------------------------------------------------------------
// TickerQuery via the SDK
// ---------------------------------------------------------------------------

#[test]
fn sdk_ticker_query_clones_rows() {
    let sdk = common::sdk_with(common::FakeProvider::new());
    let rows = sdk.tickers().search("toyota");
    assert_eq!(rows.len(), 2);
    assert_eq!(sdk.tickers().count(), 4);
    assert_eq!(sdk.tickers().get_by_code("6758").unwrap().company_name, "Sony");
}
