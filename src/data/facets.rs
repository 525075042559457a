use std::collections::BTreeSet;

use super::model::{split_targets, Record};

// ---------------------------------------------------------------------------
// Facet option sets derived from the loaded records
// ---------------------------------------------------------------------------

/// Broad region keywords (matched case-insensitively) and their labels.
const REGION_KEYWORDS: [(&str, &str); 8] = [
    ("global", "Global"),
    ("multi-country", "Multi-country"),
    ("africa", "Africa"),
    ("oecd", "OECD"),
    ("latin america", "Latin America"),
    (
        "fragile & conflict-affected states",
        "Fragile & conflict-affected states",
    ),
    ("united states", "United States"),
    ("south africa", "South Africa"),
];

/// Phrases that introduce a place list rather than name a place.
const FILLER_PHRASES: [&str; 4] = [
    "case studies in cities/regions:",
    "e.g.",
    "local case examples:",
    "etc.",
];

/// Place tokens containing any of these (case-insensitive) are not places.
const PLACE_BLACKLIST: [&str; 2] = ["lens", "material"];

/// Options offered by the Year, Region and SDG Target filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    /// Distinct years, newest first.
    pub years: Vec<String>,
    /// Cleaned region labels, ascending.
    pub regions: Vec<String>,
    /// Distinct target tokens, ascending.
    pub targets: Vec<String>,
}

impl Facets {
    pub fn from_records(records: &[Record]) -> Self {
        Facets {
            years: unique_years(records),
            regions: unique_regions(records),
            targets: unique_targets(records),
        }
    }
}

/// Distinct non-empty `Year` values sorted descending by string comparison.
pub fn unique_years(records: &[Record]) -> Vec<String> {
    let years: BTreeSet<&str> = records
        .iter()
        .map(|r| r.year.as_str())
        .filter(|y| !y.is_empty())
        .collect();
    years.into_iter().rev().map(str::to_string).collect()
}

/// Distinct trimmed target tokens across all records, ascending.
pub fn unique_targets(records: &[Record]) -> Vec<String> {
    let targets: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| split_targets(&r.sdg_targets))
        .collect();
    targets.into_iter().map(str::to_string).collect()
}

/// Union of [`region_options`] over all records, ascending.
pub fn unique_regions(records: &[Record]) -> Vec<String> {
    let regions: BTreeSet<String> = records
        .iter()
        .flat_map(|r| region_options(&r.region))
        .filter(|r| !r.is_empty())
        .collect();
    regions.into_iter().collect()
}

/// Region filter options contributed by one `Region or Country Focus` cell.
///
/// Best-effort text heuristics: each vocabulary keyword found in the text adds
/// its label, and a parenthesised list of places (`"Africa (Kenya, Uganda)"`)
/// adds each place, capitalised.
pub fn region_options(text: &str) -> BTreeSet<String> {
    let mut options = BTreeSet::new();
    if text.is_empty() {
        return options;
    }

    let lower = text.to_lowercase();
    for (keyword, label) in REGION_KEYWORDS {
        if lower.contains(keyword) {
            options.insert(label.to_string());
        }
    }

    let Some(content) = first_parenthetical(text) else {
        return options;
    };
    if !content.contains(',') && !content.contains(';') {
        return options;
    }

    let content = strip_filler_phrases(content);

    for token in content.split([',', ';']) {
        let without_and = remove_word_and(token);
        let place = without_and.trim().split('(').next().unwrap_or("").trim();
        if place.is_empty() || place.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        let place_lower = place.to_lowercase();
        if PLACE_BLACKLIST.iter().any(|b| place_lower.contains(b)) {
            continue;
        }
        options.insert(capitalize_first(place));
    }

    options
}

/// Content of the first `( ... )` group with at least one character inside.
fn first_parenthetical(text: &str) -> Option<&str> {
    for (open, _) in text.match_indices('(') {
        let rest = &text[open + 1..];
        if let Some(close) = rest.find(')') {
            if close > 0 {
                return Some(&rest[..close]);
            }
        }
    }
    None
}

fn starts_with_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

/// Remove filler phrases (any ASCII case) in one left-to-right pass.
///
/// Text joined by a removal is not rescanned: `"ete.g.c."` becomes `"etc."`.
fn strip_filler_phrases(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        match FILLER_PHRASES
            .iter()
            .find(|phrase| starts_with_ignore_ascii_case(rest, phrase))
        {
            Some(phrase) => rest = &rest[phrase.len()..],
            None => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Remove the standalone word "and" (any ASCII case).
fn remove_word_and(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        let at_word_start = !prev.is_some_and(is_word_char);
        if at_word_start && starts_with_ignore_ascii_case(rest, "and") {
            let after = &rest[3..];
            if !after.chars().next().is_some_and(is_word_char) {
                // `prev` stays put: the removed word leaves no character behind.
                rest = after;
                continue;
            }
        }
        out.push(ch);
        prev = Some(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
