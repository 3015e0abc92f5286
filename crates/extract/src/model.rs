// ABOUTME: Data model for extracted fund pages: classification, price, trend, snapshot and profile.
// ABOUTME: The snapshot is a tagged variant per asset class, flattened to 17 fixed slots for output.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MONEY_MARKET: &str = "Money Market";
pub const REAL_ESTATE: &str = "Real Estate";
pub const ETF: &str = "ETF";

/// The four-part exchange classification of a fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub fund_type: String,
    pub objective: String,
    pub asset_class: String,
    pub geographic_focus: String,
}

impl Classification {
    /// Builds a classification from exactly four values, in page order.
    pub fn from_values(values: Vec<String>) -> Option<Self> {
        let [fund_type, objective, asset_class, geographic_focus]: [String; 4] =
            values.try_into().ok()?;
        Some(Self {
            fund_type,
            objective,
            asset_class,
            geographic_focus,
        })
    }

    pub fn asset(&self) -> AssetClass {
        AssetClass::from(self.asset_class.as_str())
    }

    pub fn is_money_market(&self) -> bool {
        self.asset() == AssetClass::MoneyMarket
    }

    pub fn is_etf(&self) -> bool {
        self.fund_type == ETF
    }
}

/// Asset classes that change how a detail page is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    MoneyMarket,
    RealEstate,
    Other,
}

impl From<&str> for AssetClass {
    fn from(s: &str) -> Self {
        match s {
            MONEY_MARKET => AssetClass::MoneyMarket,
            REAL_ESTATE => AssetClass::RealEstate,
            _ => AssetClass::Other,
        }
    }
}

/// A quoted price. `value` is `None` when the page shows the `-` marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub value: Option<f64>,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    #[serde(rename = "none")]
    Flat,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Flat => "none",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest price movement. All three parts absent means no trend is shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: Option<TrendDirection>,
    pub value: Option<f64>,
    pub percentage: Option<f64>,
}

impl Trend {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn flat() -> Self {
        Self {
            direction: Some(TrendDirection::Flat),
            value: Some(0.0),
            percentage: Some(0.0),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.direction.is_none() && self.value.is_none() && self.percentage.is_none()
    }
}

/// Performance table of generic mutual funds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericSnapshot {
    pub ytd: Option<f64>,
    pub one_month: Option<f64>,
    pub three_month: Option<f64>,
    pub one_year: Option<f64>,
    pub three_year: Option<f64>,
    pub five_year: Option<f64>,
    pub beta: Option<f64>,
    pub beta_ref: Option<String>,
    pub week52_min: Option<f64>,
    pub week52_max: Option<f64>,
}

/// Snapshot of money market funds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoneyMarketSnapshot {
    pub days_to_maturity: Option<String>,
    pub assets: Option<f64>,
    pub week52_min: Option<f64>,
    pub week52_max: Option<f64>,
}

/// Trading snapshot of real estate funds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealEstateSnapshot {
    pub open: Option<f64>,
    pub day_low: Option<f64>,
    pub day_high: Option<f64>,
    pub primary_exchange: Option<String>,
    pub volume: Option<f64>,
    pub week52_min: Option<f64>,
    pub week52_max: Option<f64>,
    pub beta: Option<f64>,
    pub beta_ref: Option<String>,
}

/// The snapshot table, read with the layout its classification selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum Snapshot {
    Generic(GenericSnapshot),
    MoneyMarket(MoneyMarketSnapshot),
    RealEstate(RealEstateSnapshot),
    Unclassified,
}

/// A single output cell of the snapshot row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Number of flattened snapshot slots.
pub const SNAPSHOT_LEN: usize = 17;

/// Slot names of the flattened snapshot, in output order.
pub const SNAPSHOT_SLOTS: [&str; SNAPSHOT_LEN] = [
    "ytd",
    "one_month",
    "three_month",
    "one_year",
    "three_year",
    "five_year",
    "beta",
    "beta_ref",
    "week52_min",
    "week52_max",
    "days_to_maturity",
    "assets",
    "open",
    "volume",
    "day_high",
    "day_low",
    "primary_exchange",
];

/// The snapshot flattened to fixed positions so records stay aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow(pub [Option<Scalar>; SNAPSHOT_LEN]);

impl SnapshotRow {
    pub const LEN: usize = SNAPSHOT_LEN;

    pub const YTD: usize = 0;
    pub const ONE_MONTH: usize = 1;
    pub const THREE_MONTH: usize = 2;
    pub const ONE_YEAR: usize = 3;
    pub const THREE_YEAR: usize = 4;
    pub const FIVE_YEAR: usize = 5;
    pub const BETA: usize = 6;
    pub const BETA_REF: usize = 7;
    pub const WEEK52_MIN: usize = 8;
    pub const WEEK52_MAX: usize = 9;
    pub const DAYS_TO_MATURITY: usize = 10;
    pub const ASSETS: usize = 11;
    pub const OPEN: usize = 12;
    pub const VOLUME: usize = 13;
    pub const DAY_HIGH: usize = 14;
    pub const DAY_LOW: usize = 15;
    pub const PRIMARY_EXCHANGE: usize = 16;

    pub fn get(&self, slot: usize) -> Option<&Scalar> {
        self.0.get(slot).and_then(Option::as_ref)
    }

    fn number(&mut self, slot: usize, value: Option<f64>) {
        self.0[slot] = value.map(Scalar::Number);
    }

    fn text(&mut self, slot: usize, value: &Option<String>) {
        self.0[slot] = value.clone().map(Scalar::Text);
    }

    /// Output strings, empty for absent slots.
    pub fn fields(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|slot| slot.as_ref().map(Scalar::to_string).unwrap_or_default())
            .collect()
    }
}

impl From<&Snapshot> for SnapshotRow {
    fn from(snapshot: &Snapshot) -> Self {
        let mut row = SnapshotRow::default();
        match snapshot {
            Snapshot::Generic(g) => {
                row.number(SnapshotRow::YTD, g.ytd);
                row.number(SnapshotRow::ONE_MONTH, g.one_month);
                row.number(SnapshotRow::THREE_MONTH, g.three_month);
                row.number(SnapshotRow::ONE_YEAR, g.one_year);
                row.number(SnapshotRow::THREE_YEAR, g.three_year);
                row.number(SnapshotRow::FIVE_YEAR, g.five_year);
                row.number(SnapshotRow::BETA, g.beta);
                row.text(SnapshotRow::BETA_REF, &g.beta_ref);
                row.number(SnapshotRow::WEEK52_MIN, g.week52_min);
                row.number(SnapshotRow::WEEK52_MAX, g.week52_max);
            }
            Snapshot::MoneyMarket(m) => {
                row.number(SnapshotRow::WEEK52_MIN, m.week52_min);
                row.number(SnapshotRow::WEEK52_MAX, m.week52_max);
                row.text(SnapshotRow::DAYS_TO_MATURITY, &m.days_to_maturity);
                row.number(SnapshotRow::ASSETS, m.assets);
            }
            Snapshot::RealEstate(r) => {
                // beta has no column in this layout
                row.text(SnapshotRow::BETA_REF, &r.beta_ref);
                row.number(SnapshotRow::WEEK52_MIN, r.week52_min);
                row.number(SnapshotRow::WEEK52_MAX, r.week52_max);
                row.number(SnapshotRow::OPEN, r.open);
                row.number(SnapshotRow::VOLUME, r.volume);
                row.number(SnapshotRow::DAY_HIGH, r.day_high);
                row.number(SnapshotRow::DAY_LOW, r.day_low);
                row.text(SnapshotRow::PRIMARY_EXCHANGE, &r.primary_exchange);
            }
            Snapshot::Unclassified => {}
        }
        row
    }
}

/// Contact and history block at the bottom of a detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedProfile {
    pub inception_date: Option<String>,
    pub telephone: Option<String>,
    pub managers: Option<String>,
    pub website: Option<String>,
}

/// One row of a fund listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub symbol: String,
    pub fund_type: String,
    pub objective: String,
    pub url: String,
}
