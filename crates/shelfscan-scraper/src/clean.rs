//! Field cleaners shared by every site extractor.
//!
//! All functions are pure and total: bad input degrades to an empty or
//! sentinel value, never to an error.

use std::sync::LazyLock;

use regex::Regex;
use shelfscan_core::{AttributeMap, NOT_FOUND};

/// First numeric run in a price string: optional `$`, digits either grouped
/// by commas in threes or ungrouped, optional decimal part.
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\s*(\d{1,3}(?:,\d{3})+|\d+)(\.\d+)?").expect("valid price regex")
});

/// Characters that render as nothing but survive `split_whitespace`.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}' | '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2060}' | '\u{FEFF}'
    )
}

/// Drops non-printable characters, collapses whitespace runs to one space
/// and trims both ends.
///
/// Idempotent: `clean_text(&clean_text(s)) == clean_text(s)`.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let printable: String = text
        .chars()
        .filter(|&c| (c.is_whitespace() || !c.is_control()) && !is_invisible(c))
        .collect();
    printable.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the first numeric run from a price string with thousands
/// separators removed, e.g. `"$1,234.56 USD"` → `"1234.56"`.
///
/// Returns an empty string when the text holds no digits.
#[must_use]
pub fn clean_price(text: &str) -> String {
    let Some(caps) = PRICE_RE.captures(text) else {
        return String::new();
    };
    let whole = caps.get(1).map_or("", |m| m.as_str()).replace(',', "");
    let fraction = caps.get(2).map_or("", |m| m.as_str());
    format!("{whole}{fraction}")
}

/// Repairs protocol-relative URLs (`//cdn.example.com/a.jpg`) to `https://`.
/// Any other input is returned trimmed but otherwise unchanged.
#[must_use]
pub fn normalize_image_url(url: &str) -> String {
    let trimmed = url.trim();
    match trimmed.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => trimmed.to_string(),
    }
}

/// Truncates to at most `max_chars` characters, never splitting a UTF-8
/// sequence.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Resolves a logical field from a scraped attribute map.
///
/// Walks the map's keys in enumeration order and returns the value of the
/// first key containing any of `candidates` as a case-insensitive substring.
/// Returns [`NOT_FOUND`] when nothing matches.
#[must_use]
pub fn lookup_attribute(attributes: &AttributeMap, candidates: &[&str]) -> String {
    let patterns: Vec<String> = candidates
        .iter()
        .map(|c| c.to_lowercase())
        .filter(|c| !c.is_empty())
        .collect();

    attributes
        .iter()
        .find(|(key, _)| {
            let key = key.to_lowercase();
            patterns.iter().any(|p| key.contains(p.as_str()))
        })
        .map_or_else(|| NOT_FOUND.to_string(), |(_, value)| value.clone())
}
