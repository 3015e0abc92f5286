// ABOUTME: Configuration options for fund page extraction and the fluent OptionsBuilder.
// ABOUTME: Defaults match the Indonesian fund pages: IDR prices, UTC+7 output, bloomberg.com links.

use chrono::FixedOffset;
use url::Url;

use crate::time_parse::fixed_offset;

/// Currency assumed when a price carries no currency token.
pub const DEFAULT_CURRENCY: &str = "IDR";
/// Output offset for timestamps (Asia/Jakarta, no daylight time).
pub const DEFAULT_TARGET_OFFSET_SECS: i32 = 7 * 3600;
/// Site root that relative listing links resolve against.
pub const DEFAULT_BASE_URL: &str = "http://www.bloomberg.com";

/// Configuration options for extraction.
#[derive(Debug, Clone)]
pub struct Options {
    pub default_currency: String,
    pub target_offset: FixedOffset,
    pub base_url: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            target_offset: fixed_offset(DEFAULT_TARGET_OFFSET_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// The parsed site root.
    pub fn base(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }

    /// Resolves a possibly relative link against `base_url`.
    ///
    /// Falls back to plain concatenation when the base is not a valid URL.
    pub fn resolve(&self, href: &str) -> String {
        match self.base().and_then(|base| base.join(href)) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.base_url.trim_end_matches('/'), href),
        }
    }
}

/// Builder for constructing Options with custom settings.
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    opts: Options,
}

impl OptionsBuilder {
    /// Create a new OptionsBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the currency used when a price has none.
    pub fn default_currency(mut self, currency: impl Into<String>) -> Self {
        self.opts.default_currency = currency.into();
        self
    }

    /// Set the output offset in seconds east of UTC.
    pub fn target_offset_secs(mut self, secs: i32) -> Self {
        self.opts.target_offset = fixed_offset(secs);
        self
    }

    /// Set the site root for relative links.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opts.base_url = base_url.into();
        self
    }

    pub fn build(self) -> Options {
        self.opts
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
