// ABOUTME: Classified snapshot extraction: reads the snapshot table with the layout the fund's class selects.
// ABOUTME: Generic, money market and real estate layouts are fixed-position; anything else is Unclassified.

//! Snapshot table extraction.
//!
//! The `snapshot_table` has the same two-row shape on every detail page but
//! its cells mean different things per asset class. The layout is chosen
//! once from the classification, then each arm reads fixed positions into
//! its own struct. A row or cell the chosen layout needs but the table lacks
//! is a structural failure; unparsable cell text only blanks that value.

use scraper::ElementRef;

use crate::dom::page_index::{descendants, text};
use crate::dom::PageIndex;
use crate::error::ExtractError;
use crate::model::{
    AssetClass, Classification, GenericSnapshot, MoneyMarketSnapshot, RealEstateSnapshot, Snapshot,
};
use crate::text::{available, beta_reference, parse_decimal, parse_range};

pub const SNAPSHOT_TABLE_CLASS: &str = "snapshot_table";

const OP: &str = "snapshot";

/// Which of the fixed layouts a classification selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Generic,
    MoneyMarket,
    RealEstate,
    Unclassified,
}

impl Layout {
    /// Picks the layout. ETF funds outside the two special asset classes,
    /// and pages without a usable classification, are unclassified.
    pub fn for_classification(classification: Option<&Classification>) -> Self {
        let Some(c) = classification else {
            return Layout::Unclassified;
        };
        match c.asset() {
            AssetClass::MoneyMarket => Layout::MoneyMarket,
            AssetClass::RealEstate => Layout::RealEstate,
            AssetClass::Other if !c.is_etf() => Layout::Generic,
            AssetClass::Other => Layout::Unclassified,
        }
    }
}

/// The `snapshot_table` element, if the page has one.
pub fn snapshot_table(page: &PageIndex) -> Option<ElementRef<'_>> {
    page.nth_by_tag_and_class("table", SNAPSHOT_TABLE_CLASS, 0)
}

/// Reads the snapshot with the layout selected by `classification`.
pub fn snapshot(
    page: &PageIndex,
    classification: Option<&Classification>,
) -> Result<Snapshot, ExtractError> {
    let table = snapshot_table(page)
        .ok_or_else(|| ExtractError::snapshot(OP, "snapshot_table not found"))?;
    let rows = SnapshotTable::read(table);

    match Layout::for_classification(classification) {
        Layout::Generic => generic(&rows).map(Snapshot::Generic),
        Layout::MoneyMarket => money_market(&rows).map(Snapshot::MoneyMarket),
        Layout::RealEstate => real_estate(&rows).map(Snapshot::RealEstate),
        Layout::Unclassified => Ok(Snapshot::Unclassified),
    }
}

/// Cell and header text of each table row.
struct SnapshotTable {
    rows: Vec<Row>,
}

struct Row {
    cells: Vec<String>,
    headers: Vec<String>,
}

impl SnapshotTable {
    fn read(table: ElementRef<'_>) -> Self {
        let rows = descendants(table, "tr")
            .into_iter()
            .map(|tr| Row {
                cells: descendants(tr, "td").into_iter().map(text).collect(),
                headers: descendants(tr, "th").into_iter().map(text).collect(),
            })
            .collect();
        Self { rows }
    }

    fn row(&self, index: usize) -> Result<&Row, ExtractError> {
        self.rows
            .get(index)
            .ok_or_else(|| ExtractError::snapshot(OP, format!("row {} missing", index)))
    }

    fn cell(&self, row: usize, col: usize) -> Result<&str, ExtractError> {
        self.row(row)?
            .cells
            .get(col)
            .map(String::as_str)
            .ok_or_else(|| ExtractError::snapshot(OP, format!("row {} cell {} missing", row, col)))
    }

    fn header(&self, row: usize, col: usize) -> Result<&str, ExtractError> {
        self.row(row)?
            .headers
            .get(col)
            .map(String::as_str)
            .ok_or_else(|| {
                ExtractError::snapshot(OP, format!("row {} header {} missing", row, col))
            })
    }
}

fn generic(t: &SnapshotTable) -> Result<GenericSnapshot, ExtractError> {
    let (week52_min, week52_max) = parse_range(t.cell(0, 3)?);
    Ok(GenericSnapshot {
        ytd: parse_decimal(t.cell(0, 0)?),
        three_month: parse_decimal(t.cell(0, 1)?),
        three_year: parse_decimal(t.cell(0, 2)?),
        week52_min,
        week52_max,
        one_month: parse_decimal(t.cell(1, 0)?),
        one_year: parse_decimal(t.cell(1, 1)?),
        five_year: parse_decimal(t.cell(1, 2)?),
        beta: parse_decimal(t.cell(1, 3)?),
        beta_ref: beta_reference(t.header(1, 3)?),
    })
}

fn money_market(t: &SnapshotTable) -> Result<MoneyMarketSnapshot, ExtractError> {
    let (week52_min, week52_max) = parse_range(t.cell(0, 2)?);
    Ok(MoneyMarketSnapshot {
        days_to_maturity: available(t.cell(0, 0)?),
        assets: parse_decimal(t.cell(0, 1)?),
        week52_min,
        week52_max,
    })
}

fn real_estate(t: &SnapshotTable) -> Result<RealEstateSnapshot, ExtractError> {
    let (day_low, day_high) = parse_range(t.cell(0, 1)?);
    let (week52_min, week52_max) = parse_range(t.cell(1, 1)?);
    Ok(RealEstateSnapshot {
        open: parse_decimal(t.cell(0, 0)?),
        day_low,
        day_high,
        primary_exchange: available(t.cell(0, 2)?),
        volume: parse_decimal(t.cell(1, 0)?),
        week52_min,
        week52_max,
        beta: parse_decimal(t.cell(1, 2)?),
        beta_ref: beta_reference(t.header(1, 2)?),
    })
}
