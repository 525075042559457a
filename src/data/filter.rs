use super::model::{Record, SdgDataset};

// ---------------------------------------------------------------------------
// Filter predicate: free-text search plus one optional value per facet
// ---------------------------------------------------------------------------

/// The user's current filter inputs. Independent of the loaded records.
///
/// An empty search term matches everything; `None` facets impose no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub year: Option<String>,
    pub region: Option<String>,
    pub target: Option<String>,
}

impl FilterState {
    /// True when no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.year.is_none()
            && self.region.is_none()
            && self.target.is_none()
    }
}

/// Map a combo-box value to a facet selection: the empty string means "any".
pub fn selection(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Whether `record` passes every active constraint.
///
/// * search: some field contains the term, ignoring case
/// * year: exact match
/// * region: case-sensitive substring of the raw region text
/// * target: exact match against one parsed target token
#[cfg(test)]
pub fn matches(record: &Record, filter: &FilterState) -> bool {
    Matcher::new(filter).matches(record)
}

/// A [`FilterState`] with the search term lower-cased once.
struct Matcher<'a> {
    needle: String,
    filter: &'a FilterState,
}

impl<'a> Matcher<'a> {
    fn new(filter: &'a FilterState) -> Self {
        Matcher {
            needle: filter.search.to_lowercase(),
            filter,
        }
    }

    fn matches(&self, record: &Record) -> bool {
        let f = self.filter;
        self.matches_search(record)
            && f.year.as_ref().is_none_or(|y| record.year == *y)
            && f
                .region
                .as_ref()
                .is_none_or(|r| record.region.contains(r.as_str()))
            && f
                .target
                .as_ref()
                .is_none_or(|t| record.sdg_targets().any(|tok| tok == t))
    }

    fn matches_search(&self, record: &Record) -> bool {
        self.needle.is_empty()
            || record
                .values()
                .any(|v| v.to_lowercase().contains(&self.needle))
    }
}

/// Return indices of records that pass the filter, in file order.
pub fn filtered_indices(dataset: &SdgDataset, filter: &FilterState) -> Vec<usize> {
    let matcher = Matcher::new(filter);
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| matcher.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
