//! Selector fallback chains over a parsed page.
//!
//! Every helper takes an ordered list of CSS selector candidates and stops at
//! the first one that yields something non-empty. A candidate that does not
//! parse, or matches nothing, is skipped silently.

use scraper::{ElementRef, Html, Selector};
use shelfscan_core::AttributeMap;

use crate::clean::{clean_text, normalize_image_url};

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!(selector = css, error = ?e, "skipping invalid CSS selector");
            None
        }
    }
}

/// Cleaned text content of an element and its descendants. Text nodes are
/// joined with a space so adjacent list items do not run together.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

fn attr_value(element: ElementRef<'_>, attrs: &[&str]) -> Option<String> {
    attrs.iter().find_map(|name| {
        element
            .value()
            .attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.starts_with("data:"))
            .map(str::to_string)
    })
}

/// Text of the first element, across `candidates` in order, whose cleaned
/// text is non-empty.
pub(crate) fn first_text(doc: &Html, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|css| {
        let selector = parse_selector(css)?;
        doc.select(&selector)
            .map(element_text)
            .find(|text| !text.is_empty())
    })
}

/// First non-empty value of any of `attrs` on an element matched by
/// `candidates`, tried in order. Inline `data:` placeholders are ignored.
pub(crate) fn first_attr(doc: &Html, candidates: &[&str], attrs: &[&str]) -> Option<String> {
    candidates.iter().find_map(|css| {
        let selector = parse_selector(css)?;
        doc.select(&selector)
            .find_map(|element| attr_value(element, attrs))
    })
}

/// Every image URL matched by `candidates`, normalized and de-duplicated,
/// in candidate then document order.
pub(crate) fn all_attrs(doc: &Html, candidates: &[&str], attrs: &[&str]) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for css in candidates {
        let Some(selector) = parse_selector(css) else {
            continue;
        };
        for element in doc.select(&selector) {
            if let Some(url) = attr_value(element, attrs).map(|raw| normalize_image_url(&raw)) {
                if !urls.contains(&url) {
                    urls.push(url);
                }
            }
        }
    }
    urls
}

fn label_key(raw: &str) -> String {
    clean_text(raw.trim_end_matches(|c: char| c == ':' || c.is_whitespace()))
}

fn insert_pair(map: &mut AttributeMap, label: &str, value: &str) {
    let label = label_key(label);
    let value = clean_text(value);
    if !label.is_empty() && !value.is_empty() {
        map.entry(label).or_insert(value);
    }
}

/// Specification rows laid out as paired label/value sub-elements, e.g.
/// `<tr><th>Brand</th><td>Magpul</td></tr>`. The first occurrence of a label
/// wins.
pub(crate) fn labelled_rows(
    doc: &Html,
    row_css: &str,
    label_css: &str,
    value_css: &str,
) -> AttributeMap {
    let mut map = AttributeMap::new();
    let (Some(rows), Some(label_sel), Some(value_sel)) = (
        parse_selector(row_css),
        parse_selector(label_css),
        parse_selector(value_css),
    ) else {
        return map;
    };

    for row in doc.select(&rows) {
        let label = row.select(&label_sel).next().map(element_text);
        let value = row.select(&value_sel).next().map(element_text);
        if let (Some(label), Some(value)) = (label, value) {
            insert_pair(&mut map, &label, &value);
        }
    }
    map
}

/// Specification rows written as `"Label: value"` text, split on the first
/// `delimiter`. Rows without the delimiter are skipped.
pub(crate) fn delimited_rows(doc: &Html, row_css: &str, delimiter: char) -> AttributeMap {
    let mut map = AttributeMap::new();
    let Some(rows) = parse_selector(row_css) else {
        return map;
    };

    for row in doc.select(&rows) {
        let text = element_text(row);
        if let Some((label, value)) = text.split_once(delimiter) {
            insert_pair(&mut map, label, value);
        }
    }
    map
}

/// Adds entries from `extra` whose labels are not already present.
pub(crate) fn merge_missing(into: &mut AttributeMap, extra: AttributeMap) {
    for (label, value) in extra {
        into.entry(label).or_insert(value);
    }
}
