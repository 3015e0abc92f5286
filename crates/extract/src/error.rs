// ABOUTME: Error types for fund page extraction including ErrorCode enum and ExtractError struct.
// ABOUTME: Only structural failures are errors; absent or malformed leaf fields are plain `None`.

use std::fmt;

/// Error codes naming the foundational container that could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The `exchange_type` classification container is missing.
    Classification,
    /// The `snapshot_table` is missing, or a row/cell its layout requires is.
    Snapshot,
    /// The `ticker_data` table is missing or links cannot be resolved.
    Listing,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Classification => "classification not found",
            ErrorCode::Snapshot => "snapshot table malformed",
            ErrorCode::Listing => "listing unreadable",
        };
        write!(f, "{}", s)
    }
}

/// A record-level extraction failure.
///
/// The driver decides whether to skip or retry the page; nothing here is
/// fatal to a whole run.
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub op: String,
    pub detail: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fundscrape: {}: {}", self.op, self.code)?;
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ExtractError {
    /// Create a Classification error.
    pub fn classification(op: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Classification,
            op: op.into(),
            detail: detail.into(),
            source: None,
        }
    }

    /// Create a Snapshot error.
    pub fn snapshot(op: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Snapshot,
            op: op.into(),
            detail: detail.into(),
            source: None,
        }
    }

    /// Create a Listing error.
    pub fn listing(op: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Listing,
            op: op.into(),
            detail: detail.into(),
            source: None,
        }
    }

    /// Attach an underlying cause.
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns true if this is a Classification error.
    pub fn is_classification(&self) -> bool {
        self.code == ErrorCode::Classification
    }

    /// Returns true if this is a Snapshot error.
    pub fn is_snapshot(&self) -> bool {
        self.code == ErrorCode::Snapshot
    }

    /// Returns true if this is a Listing error.
    pub fn is_listing(&self) -> bool {
        self.code == ErrorCode::Listing
    }
}
