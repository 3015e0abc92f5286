// ABOUTME: Main library entry point for fund page extraction.
// ABOUTME: Re-exports the public API: PageIndex, extract_fund, FundRecord, Options, ExtractError.

//! fundscrape-extract - structured fund metadata from saved fund pages.
//!
//! This crate reads fund detail pages (name, symbol, price, performance
//! snapshot, profile) and fund listing pages into typed records. Fetching
//! pages and persisting records are left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use fundscrape_extract::{extract_fund, ExtractError, Options};
//!
//! fn main() -> Result<(), ExtractError> {
//!     let html = std::fs::read_to_string("samples/funds-detail/1.html").unwrap_or_default();
//!     let record = extract_fund(&html, &Options::default())?;
//!     println!("{}", record.fields().join(";"));
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod extractors;
pub mod model;
pub mod options;
pub mod record;
pub mod text;
pub mod time_parse;

pub use crate::dom::PageIndex;
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::extractors::listing::{listing_entries, next_page_url};
pub use crate::model::{
    Classification, ExtendedProfile, ListingEntry, PriceQuote, Scalar, Snapshot, SnapshotRow,
    Trend, TrendDirection,
};
pub use crate::options::{Options, OptionsBuilder};
pub use crate::record::{assemble, extract_fund, FundRecord};
