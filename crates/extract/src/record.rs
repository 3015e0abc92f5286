// ABOUTME: FundRecord assembly: runs every field extractor over one page in a fixed order.
// ABOUTME: Only a missing classification container or snapshot table fails the whole record.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::PageIndex;
use crate::error::ExtractError;
use crate::extractors::{fields, snapshot};
use crate::model::{
    Classification, ExtendedProfile, PriceQuote, Snapshot, SnapshotRow, Trend, SNAPSHOT_SLOTS,
};
use crate::options::Options;

/// Everything extracted from one fund detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub last_updated: Option<String>,
    pub classification: Option<Classification>,
    pub price: Option<PriceQuote>,
    pub price_method: Option<String>,
    pub trend: Trend,
    pub snapshot: Snapshot,
    pub profile: Option<String>,
    pub extended_profile: ExtendedProfile,
}

const HEAD_COLUMNS: [&str; 13] = [
    "name",
    "symbol",
    "last_updated",
    "fund_type",
    "objective",
    "asset_class",
    "geographic_focus",
    "price",
    "currency",
    "price_method",
    "trend_direction",
    "trend_value",
    "trend_percentage",
];

const TAIL_COLUMNS: [&str; 5] = [
    "profile",
    "inception_date",
    "telephone",
    "managers",
    "website",
];

impl FundRecord {
    /// Number of positional output fields.
    pub const WIDTH: usize = HEAD_COLUMNS.len() + SnapshotRow::LEN + TAIL_COLUMNS.len();

    /// Column names matching [`FundRecord::fields`].
    pub fn header() -> Vec<&'static str> {
        HEAD_COLUMNS
            .iter()
            .chain(SNAPSHOT_SLOTS.iter())
            .chain(TAIL_COLUMNS.iter())
            .copied()
            .collect()
    }

    /// The record as positional text fields; absent values are empty strings.
    pub fn fields(&self) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let num = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();

        let mut out = Vec::with_capacity(Self::WIDTH);
        out.push(opt(&self.name));
        out.push(opt(&self.symbol));
        out.push(opt(&self.last_updated));
        match &self.classification {
            Some(c) => out.extend([
                c.fund_type.clone(),
                c.objective.clone(),
                c.asset_class.clone(),
                c.geographic_focus.clone(),
            ]),
            None => out.extend(std::iter::repeat(String::new()).take(4)),
        }
        out.push(num(self.price.as_ref().and_then(|p| p.value)));
        out.push(self.price.as_ref().map(|p| p.currency.clone()).unwrap_or_default());
        out.push(opt(&self.price_method));
        out.push(
            self.trend
                .direction
                .map(|d| d.as_str().to_string())
                .unwrap_or_default(),
        );
        out.push(num(self.trend.value));
        out.push(num(self.trend.percentage));
        out.extend(self.snapshot_row().fields());
        out.push(opt(&self.profile));
        out.push(opt(&self.extended_profile.inception_date));
        out.push(opt(&self.extended_profile.telephone));
        out.push(opt(&self.extended_profile.managers));
        out.push(opt(&self.extended_profile.website));
        out
    }

    /// The snapshot flattened to its fixed slots.
    pub fn snapshot_row(&self) -> SnapshotRow {
        SnapshotRow::from(&self.snapshot)
    }
}

/// Assembles one record from an indexed detail page.
///
/// Leaf fields degrade to `None` individually. The record fails only when
/// the classification container, the snapshot table, or a snapshot row/cell
/// its layout needs is missing.
pub fn assemble(page: &PageIndex, opts: &Options) -> Result<FundRecord, ExtractError> {
    if !fields::has_classification_container(page) {
        return Err(ExtractError::classification(
            "assemble",
            "exchange_type container not found",
        ));
    }
    let classification = fields::classification(page);
    if classification.is_none() {
        debug!("classification list malformed; snapshot left unclassified");
    }
    let class = classification.as_ref();

    let record = FundRecord {
        name: fields::name(page),
        symbol: fields::symbol(page),
        last_updated: fields::last_updated(page, opts.target_offset),
        price: fields::price(page, &opts.default_currency),
        price_method: fields::price_method(page, class),
        trend: fields::trend(page, class),
        snapshot: snapshot::snapshot(page, class)?,
        profile: fields::profile(page),
        extended_profile: fields::extended_profile(page),
        classification,
    };

    if record.name.is_none() || record.symbol.is_none() {
        debug!(symbol = ?record.symbol, "fund page without name or symbol");
    }
    if record.last_updated.is_none() {
        debug!(symbol = ?record.symbol, "last-updated timestamp absent or malformed");
    }
    Ok(record)
}

/// Parses `html` and assembles its record.
pub fn extract_fund(html: &str, opts: &Options) -> Result<FundRecord, ExtractError> {
    assemble(&PageIndex::parse(html), opts)
}
