// ABOUTME: Text normalization and numeric parsing shared by every field extractor.
// ABOUTME: A normalized literal "-" means "not available" and always maps to None.

/// Marker the source pages print when a value is not available.
pub const NOT_AVAILABLE: &str = "-";

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes `s` and maps the empty string and the `-` marker to `None`.
pub fn available(s: &str) -> Option<String> {
    let normalized = normalize(s);
    if normalized.is_empty() || normalized == NOT_AVAILABLE {
        None
    } else {
        Some(normalized)
    }
}

/// Parses a decimal after stripping `%` signs and thousands separators.
///
/// Returns `None` for the `-` marker and for text that is not a number.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let text = available(s)?;
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && *c != '%' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Splits a `"low - high"` range into its two bounds.
///
/// The separator is a dash surrounded by whitespace so negative numbers
/// survive. A bare `-` marker yields `(None, None)`.
pub fn parse_range(s: &str) -> (Option<f64>, Option<f64>) {
    let Some(text) = available(s) else {
        return (None, None);
    };
    match text.split_once(" - ") {
        Some((low, high)) => (parse_decimal(low), parse_decimal(high)),
        None => (parse_decimal(&text), None),
    }
}

/// Removes every occurrence of each literal token, then normalizes.
pub fn strip_tokens(s: &str, tokens: &[&str]) -> String {
    let mut out = s.to_string();
    for token in tokens {
        out = out.replace(token, "");
    }
    normalize(&out)
}

/// Strips the `Beta vs ` prefix and trailing `:` from a beta header cell.
pub fn beta_reference(s: &str) -> Option<String> {
    let text = normalize(s);
    let text = text.strip_prefix("Beta vs ").unwrap_or(&text);
    let text = text.trim_end_matches(':').trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
