// ABOUTME: Extraction strategies for fund detail and fund listing pages.
// ABOUTME: Field extractors, the classified snapshot reader and the listing row reader.

//! Fund page extraction module.
//!
//! Submodules:
//! - `fields`: one pure extractor per logical field of a detail page.
//! - `snapshot`: the snapshot table, read with a per-asset-class layout.
//! - `listing`: rows and pagination link of a fund listing page.

pub mod fields;
pub mod listing;
pub mod snapshot;
