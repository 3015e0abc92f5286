// ABOUTME: Reads saved pages from disk and decodes them to UTF-8 text.
// ABOUTME: Uses a byte-order mark or declared meta charset when present, chardetng detection otherwise.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;

/// How far into the document a `<meta charset>` declaration is looked for.
const META_SNIFF_LEN: usize = 1024;

/// Reads and decodes one saved HTML page.
pub fn read_page(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(decode_page(&bytes))
}

/// Decodes page bytes using a BOM, the declared charset or detection.
pub fn decode_page(body: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(body) {
        let (decoded, _) = encoding.decode_without_bom_handling(&body[bom_len..]);
        return decoded.into_owned();
    }

    if let Some(encoding) = declared_charset(body).and_then(|c| Encoding::for_label(c.as_bytes())) {
        let (decoded, _, _) = encoding.decode(body);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract the charset named by a `<meta charset=...>` or http-equiv tag.
fn declared_charset(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(META_SNIFF_LEN)];
    let lower = String::from_utf8_lossy(head).to_lowercase();
    let start = lower.find("charset=")? + "charset=".len();
    let charset: String = lower[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if charset.is_empty() {
        None
    } else {
        Some(charset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declared_charset() {
        assert_eq!(
            declared_charset(br#"<meta charset="ISO-8859-1">"#).as_deref(),
            Some("iso-8859-1")
        );
        let http_equiv = br#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8">"#;
        assert_eq!(declared_charset(http_equiv).as_deref(), Some("utf-8"));
        assert_eq!(declared_charset(b"<html></html>"), None);
    }

    #[test]
    fn test_decode_declared_latin1() {
        let body = b"<meta charset=\"ISO-8859-1\"><h2>Dana \xc9kuitas</h2>";
        assert!(decode_page(body).contains("Dana \u{c9}kuitas"));
    }

    #[test]
    fn test_decode_utf8_bom() {
        let body = b"\xef\xbb\xbf<h2>Reksa Dana</h2>";
        assert_eq!(decode_page(body), "<h2>Reksa Dana</h2>");
    }

    #[test]
    fn test_decode_undeclared_utf8() {
        let body = "<h2>Dana Ekuitas \u{2013} Kelas A</h2>".as_bytes();
        assert_eq!(decode_page(body), "<h2>Dana Ekuitas \u{2013} Kelas A</h2>");
    }
}
