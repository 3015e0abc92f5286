// ABOUTME: The progress list: one {url, scraped} entry per saved detail page, persisted as JSON.
// ABOUTME: reset rebuilds it from the funds list; scrape marks entries done one at a time.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::listing::FundsList;

/// One saved detail page and whether its record has been written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub url: String,
    pub scraped: bool,
}

/// Loads the progress list.
pub fn load(path: &Path) -> Result<Vec<ProgressEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading progress list {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing progress list {}", path.display()))
}

/// Writes the progress list, creating parent directories as needed.
pub fn save(path: &Path, entries: &[ProgressEntry]) -> Result<()> {
    write_json(path, entries)
}

/// Pending entries for the first `count` listing rows: `<pages_dir>/<i>.html`, `i` from 1.
pub fn pending_entries(pages_dir: &Path, count: usize) -> Vec<ProgressEntry> {
    (1..=count)
        .map(|i| ProgressEntry {
            url: pages_dir.join(format!("{}.html", i)).to_string_lossy().into_owned(),
            scraped: false,
        })
        .collect()
}

/// `fundscrape reset`: rebuilds the progress list with every page pending.
pub fn reset(list: &Path, pages_dir: &Path, progress: &Path) -> Result<()> {
    let content =
        fs::read_to_string(list).with_context(|| format!("reading funds list {}", list.display()))?;
    let funds: FundsList = serde_json::from_str(&content)
        .with_context(|| format!("parsing funds list {}", list.display()))?;

    let entries = pending_entries(pages_dir, funds.list.len());
    save(progress, &entries)?;
    info!(
        entries = entries.len(),
        path = %progress.display(),
        "progress list reset"
    );
    Ok(())
}

/// Serializes `value` as pretty JSON to `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
