// ABOUTME: fundscrape list: collects ListingEntry rows from saved listing pages into one JSON file.
// ABOUTME: The file is stamped with the run time in the configured output offset.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use fundscrape_extract::time_parse::TIMESTAMP_FORMAT;
use fundscrape_extract::{listing_entries, next_page_url, ListingEntry, Options, PageIndex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::load::read_page;
use crate::progress::write_json;

/// The funds list file: every listed fund plus when the list was built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundsList {
    pub list: Vec<ListingEntry>,
    pub date: String,
}

/// Extracts the entries of each page in order, concatenated.
pub fn collect(pages: &[PathBuf], opts: &Options) -> Result<Vec<ListingEntry>> {
    let mut list = Vec::new();
    for path in pages {
        let page = PageIndex::parse(&read_page(path)?);
        let entries = listing_entries(&page, opts)
            .with_context(|| format!("extracting listing {}", path.display()))?;
        debug!(
            path = %path.display(),
            entries = entries.len(),
            next = ?next_page_url(&page, opts),
            "listing page read"
        );
        list.extend(entries);
    }
    Ok(list)
}

/// `fundscrape list`: writes `{list, date}` to `output`.
pub fn run(pages: &[PathBuf], output: &Path, opts: &Options) -> Result<()> {
    let list = collect(pages, opts)?;
    let funds = FundsList {
        date: Utc::now()
            .with_timezone(&opts.target_offset)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        list,
    };
    write_json(output, &funds)?;
    info!(
        funds = funds.list.len(),
        path = %output.display(),
        "funds list written"
    );
    Ok(())
}
