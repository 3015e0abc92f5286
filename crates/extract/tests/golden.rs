// ABOUTME: Golden tests comparing extracted records of saved fund pages against expected field lists.
// ABOUTME: One fixture per snapshot layout: generic, money market, real estate and unclassified ETF.

use fundscrape_extract::{extract_fund, FundRecord, Options, Snapshot};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::fs;

/// Expected output of one fixture page.
#[derive(Debug, Deserialize)]
struct ExpectedOutput {
    layout: String,
    fields: Vec<String>,
}

/// Load an expectation file from the fixtures directory.
fn load_fixture(name: &str) -> ExpectedOutput {
    let path = format!(
        "{}/tests/fixtures/{}.json",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    let content = fs::read_to_string(&path).expect(&format!("Failed to read fixture: {}", path));
    serde_json::from_str(&content).expect(&format!("Failed to parse fixture: {}", path))
}

/// Load an HTML snapshot from the fixtures directory.
fn load_html_fixture(name: &str) -> String {
    let path = format!(
        "{}/tests/fixtures/html/{}.html",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    fs::read_to_string(&path).expect(&format!("Failed to read HTML fixture: {}", path))
}

fn layout_name(snapshot: &Snapshot) -> &'static str {
    match snapshot {
        Snapshot::Generic(_) => "generic",
        Snapshot::MoneyMarket(_) => "money_market",
        Snapshot::RealEstate(_) => "real_estate",
        Snapshot::Unclassified => "unclassified",
    }
}

fn run_golden_test(fixture_name: &str) {
    let expected = load_fixture(fixture_name);
    let html = load_html_fixture(fixture_name);

    let record = extract_fund(&html, &Options::default())
        .unwrap_or_else(|e| panic!("[{}] extraction failed: {}", fixture_name, e));

    assert_eq!(
        layout_name(&record.snapshot),
        expected.layout,
        "[{}] layout mismatch",
        fixture_name
    );

    let fields = record.fields();
    assert_eq!(fields.len(), FundRecord::WIDTH, "[{}] width", fixture_name);
    for (i, (actual, wanted)) in fields.iter().zip(expected.fields.iter()).enumerate() {
        assert_eq!(
            actual,
            wanted,
            "[{}] field {} ({}) mismatch",
            fixture_name,
            i,
            FundRecord::header()[i]
        );
    }
    assert_eq!(fields, expected.fields);
}

#[test]
fn golden_generic_fund() {
    run_golden_test("generic");
}

#[test]
fn golden_money_market_fund() {
    run_golden_test("money_market");
}

#[test]
fn golden_real_estate_fund() {
    run_golden_test("real_estate");
}

#[test]
fn golden_etf_fund() {
    run_golden_test("etf");
}
