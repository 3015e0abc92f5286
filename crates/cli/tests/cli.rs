// ABOUTME: End-to-end tests of the fundscrape binary over saved listing and detail pages.
// ABOUTME: Each test works in its own temp directory; detail fixtures are shared with fundscrape-extract.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn detail_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../extract/tests/fixtures/html")
        .join(format!("{}.html", name))
}

fn fundscrape() -> Command {
    let mut cmd = Command::cargo_bin("fundscrape").expect("binary built");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path).expect("output written");
    serde_json::from_str(&content).expect("valid json")
}

/// Lays out pages 1..=n in `<dir>/pages` and a pending progress list for them.
fn scrape_workspace(pages: &[&str]) -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let pages_dir = dir.path().join("pages");
    fs::create_dir_all(&pages_dir).unwrap();
    let mut entries = Vec::new();
    for (i, content) in pages.iter().enumerate() {
        let path = pages_dir.join(format!("{}.html", i + 1));
        fs::write(&path, content).unwrap();
        entries.push(serde_json::json!({ "url": path.to_string_lossy(), "scraped": false }));
    }
    let progress = dir.path().join("data/funds-list-scraped.json");
    fs::create_dir_all(progress.parent().unwrap()).unwrap();
    fs::write(&progress, serde_json::to_string(&entries).unwrap()).unwrap();
    let csv = dir.path().join("data/funds-detail.csv");
    (dir, progress, csv)
}

fn scraped_flags(progress: &Path) -> Vec<bool> {
    read_json(progress)
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["scraped"].as_bool().unwrap())
        .collect()
}

#[test]
fn list_collects_every_page() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("data/funds-list.json");

    fundscrape()
        .arg("list")
        .arg(fixture("listing-1.html"))
        .arg(fixture("listing-2.html"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let json = read_json(&output);
    let list = json["list"].as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["symbol"], "SCHDPRP:IJ");
    assert_eq!(list[1]["objective"], "Money Market");
    assert_eq!(list[2]["url"], "http://www.bloomberg.com/quote/DSREIT:IJ");

    let date = json["date"].as_str().unwrap();
    assert_eq!(date.len(), "2014-10-18 03:00:00".len());
    assert_eq!(&date[4..5], "-");
    assert_eq!(&date[10..11], " ");
}

#[test]
fn list_honors_base_url() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("funds-list.json");

    fundscrape()
        .args(["list", "--base-url", "https://mirror.example.com/"])
        .arg(fixture("listing-2.html"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(
        read_json(&output)["list"][0]["url"],
        "https://mirror.example.com/quote/DSREIT:IJ"
    );
}

#[test]
fn list_fails_without_listing_table() {
    let dir = TempDir::new().unwrap();
    fundscrape()
        .arg("list")
        .arg(detail_fixture("generic"))
        .arg("--output")
        .arg(dir.path().join("funds-list.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("ticker_data"));
}

#[test]
fn reset_marks_every_page_pending() {
    let dir = TempDir::new().unwrap();
    let list = dir.path().join("funds-list.json");
    let progress = dir.path().join("progress.json");
    fs::write(
        &list,
        r#"{"list": [
            {"name": "A", "symbol": "A:IJ", "fund_type": "Open-End Fund",
             "objective": "Growth", "url": "http://x/a"},
            {"name": "B", "symbol": "B:IJ", "fund_type": "Open-End Fund",
             "objective": "Growth", "url": "http://x/b"}
        ], "date": "2014-10-18 03:00:00"}"#,
    )
    .unwrap();

    fundscrape()
        .arg("reset")
        .arg("--list")
        .arg(&list)
        .args(["--pages-dir", "samples/funds-detail"])
        .arg("--progress")
        .arg(&progress)
        .assert()
        .success();

    assert_eq!(
        read_json(&progress),
        serde_json::json!([
            {"url": "samples/funds-detail/1.html", "scraped": false},
            {"url": "samples/funds-detail/2.html", "scraped": false}
        ])
    );
}

#[test]
fn scrape_writes_rows_and_keeps_failures_pending() {
    let generic = fs::read_to_string(detail_fixture("generic")).unwrap();
    let money_market = fs::read_to_string(detail_fixture("money_market")).unwrap();
    let broken = "<html><body><h2>No classification here</h2></body></html>";
    let (_dir, progress, csv) = scrape_workspace(&[&generic, broken, &money_market]);

    fundscrape()
        .arg("scrape")
        .arg("--progress")
        .arg(&progress)
        .arg("--output")
        .arg(&csv)
        .assert()
        .success()
        .stderr(predicate::str::contains("page left pending"));

    let out = fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("name;symbol;"));
    assert!(lines[1].starts_with("Alpha Equity Fund;ALPHAEQ:IJ;2014-10-18 03:00:00;"));
    assert!(lines[2].contains("BETAMM:IJ"));
    assert_eq!(scraped_flags(&progress), vec![true, false, true]);

    // A rerun only retries the pending page and never repeats the header.
    fundscrape()
        .arg("scrape")
        .arg("--progress")
        .arg(&progress)
        .arg("--output")
        .arg(&csv)
        .assert()
        .success();
    let rerun = fs::read_to_string(&csv).unwrap();
    assert_eq!(rerun, out);
}

#[test]
fn scrape_respects_limit() {
    let generic = fs::read_to_string(detail_fixture("generic")).unwrap();
    let real_estate = fs::read_to_string(detail_fixture("real_estate")).unwrap();
    let (_dir, progress, csv) = scrape_workspace(&[&generic, &real_estate]);

    fundscrape()
        .arg("scrape")
        .arg("--progress")
        .arg(&progress)
        .arg("--output")
        .arg(&csv)
        .args(["--limit", "1"])
        .assert()
        .success();

    assert_eq!(scraped_flags(&progress), vec![true, false]);
    assert_eq!(fs::read_to_string(&csv).unwrap().lines().count(), 2);
}

#[test]
fn scrape_fails_without_progress_list() {
    let dir = TempDir::new().unwrap();
    fundscrape()
        .arg("scrape")
        .arg("--progress")
        .arg(dir.path().join("missing.json"))
        .arg("--output")
        .arg(dir.path().join("out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading progress list"));
}

#[test]
fn detail_prints_csv_row() {
    fundscrape()
        .arg("detail")
        .arg(detail_fixture("real_estate"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name;symbol;last_updated;"))
        .stdout(predicate::str::contains("GAMMARE:IJ"));
}

#[test]
fn detail_prints_json_record() {
    let assert = fundscrape()
        .arg("detail")
        .arg(detail_fixture("money_market"))
        .arg("--json")
        .assert()
        .success();

    let record: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(record["symbol"], "BETAMM:IJ");
    assert_eq!(record["snapshot"]["layout"], "money_market");
    assert_eq!(record["trend"]["direction"], Value::Null);
}

#[test]
fn detail_uses_currency_flag() {
    let assert = fundscrape()
        .args(["detail", "--json", "--currency", "USD"])
        .arg(detail_fixture("generic"))
        .assert()
        .success();

    let record: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(record["price"]["currency"], "USD");
}

#[test]
fn detail_uses_utc_offset_flag() {
    let assert = fundscrape()
        .args(["detail", "--json", "--utc-offset", "0"])
        .arg(detail_fixture("generic"))
        .assert()
        .success();

    let record: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    // 16:00 EDT on 2014-10-17
    assert_eq!(record["last_updated"], "2014-10-17 20:00:00");
}

#[test]
fn utc_offset_out_of_range_is_rejected() {
    for offset in ["30", "-24", "100000000"] {
        fundscrape()
            .args(["detail", "--utc-offset", offset])
            .arg(detail_fixture("generic"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("--utc-offset"));
    }
}

#[test]
fn negative_utc_offset_is_accepted() {
    let assert = fundscrape()
        .args(["detail", "--json", "--utc-offset", "-5"])
        .arg(detail_fixture("generic"))
        .assert()
        .success();

    let record: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    // 16:00 EDT on 2014-10-17
    assert_eq!(record["last_updated"], "2014-10-17 15:00:00");
}
