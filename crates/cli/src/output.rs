// ABOUTME: Record output: appends `;`-separated fund rows to the CSV file and prints single records.
// ABOUTME: scrape walks the progress list, persisting it after every page so a rerun resumes.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fundscrape_extract::{extract_fund, FundRecord, Options};
use tracing::{info, warn};

use crate::load::read_page;
use crate::progress;

/// Field separator of the record file.
pub const DELIMITER: u8 = b';';

/// Appends rows to the record file, writing the header first when the file is new or empty.
pub struct RecordWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl RecordWriter<File> {
    pub fn append(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let empty = file.metadata()?.len() == 0;
        RecordWriter::new(file, empty)
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W, with_header: bool) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(writer);
        if with_header {
            inner.write_record(FundRecord::header())?;
            inner.flush()?;
        }
        Ok(Self { inner })
    }

    /// Writes one record and flushes it to the underlying writer.
    pub fn write(&mut self, record: &FundRecord) -> Result<()> {
        self.inner.write_record(record.fields())?;
        self.inner.flush()?;
        Ok(())
    }
}

/// Counts from one scrape run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub scraped: usize,
    pub failed: usize,
    pub remaining: usize,
}

/// `fundscrape scrape`: extracts each pending page and appends its row.
///
/// A page that cannot be read or extracted is logged and left pending.
pub fn scrape(
    progress_path: &Path,
    output: &Path,
    limit: Option<usize>,
    opts: &Options,
) -> Result<()> {
    let summary = scrape_pending(progress_path, output, limit, opts)?;
    info!(
        scraped = summary.scraped,
        failed = summary.failed,
        remaining = summary.remaining,
        "scrape finished"
    );
    Ok(())
}

pub fn scrape_pending(
    progress_path: &Path,
    output: &Path,
    limit: Option<usize>,
    opts: &Options,
) -> Result<ScrapeSummary> {
    let mut entries = progress::load(progress_path)?;
    let mut writer = RecordWriter::append(output)?;
    let mut summary = ScrapeSummary::default();

    let pending: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.scraped)
        .map(|(i, _)| i)
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    for i in pending {
        let url = entries[i].url.clone();
        let record = read_page(Path::new(&url))
            .and_then(|html| extract_fund(&html, opts).map_err(anyhow::Error::new));
        match record {
            Ok(record) => {
                writer.write(&record)?;
                entries[i].scraped = true;
                progress::save(progress_path, &entries)?;
                summary.scraped += 1;
                info!(page = %url, symbol = ?record.symbol, "scraped");
            }
            Err(err) => {
                summary.failed += 1;
                warn!(page = %url, error = %err, "page left pending");
            }
        }
    }

    summary.remaining = entries.iter().filter(|e| !e.scraped).count();
    Ok(summary)
}

/// `fundscrape detail`: prints one page's record as CSV with a header, or as JSON.
pub fn detail(page: &Path, json: bool, opts: &Options) -> Result<()> {
    let html = read_page(page)?;
    let record =
        extract_fund(&html, opts).with_context(|| format!("extracting {}", page.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let mut writer = RecordWriter::new(io::stdout().lock(), true)?;
        writer.write(&record)?;
    }
    Ok(())
}
