use std::collections::BTreeMap;
use std::fmt;

use super::facets::Facets;

// ---------------------------------------------------------------------------
// Column – one header of the initiatives CSV
// ---------------------------------------------------------------------------

/// The columns of the initiatives CSV, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    SerialNo,
    Title,
    Authors,
    Year,
    Publisher,
    Region,
    Type,
    SdgTargets,
    Summary,
    Link,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::SerialNo,
        Column::Title,
        Column::Authors,
        Column::Year,
        Column::Publisher,
        Column::Region,
        Column::Type,
        Column::SdgTargets,
        Column::Summary,
        Column::Link,
    ];

    /// Exact header label as it appears in the CSV file.
    pub fn header(self) -> &'static str {
        match self {
            Column::SerialNo => "S.N.",
            Column::Title => "Title",
            Column::Authors => "Author(s)",
            Column::Year => "Year",
            Column::Publisher => "Source / Publisher",
            Column::Region => "Region or Country Focus",
            Column::Type => "Type",
            Column::SdgTargets => "SDG Target(s)",
            Column::Summary => "Summary",
            Column::Link => "Link (URL)",
        }
    }

    pub fn from_header(label: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.header() == label)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the CSV
// ---------------------------------------------------------------------------

/// A single initiative (one row of the source CSV).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub serial_no: String,
    pub title: String,
    pub authors: String,
    pub year: String,
    pub publisher: String,
    pub region: String,
    pub kind: String,
    pub sdg_targets: String,
    pub summary: String,
    pub link: String,
}

impl Record {
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::SerialNo => &self.serial_no,
            Column::Title => &self.title,
            Column::Authors => &self.authors,
            Column::Year => &self.year,
            Column::Publisher => &self.publisher,
            Column::Region => &self.region,
            Column::Type => &self.kind,
            Column::SdgTargets => &self.sdg_targets,
            Column::Summary => &self.summary,
            Column::Link => &self.link,
        }
    }

    pub fn get_mut(&mut self, column: Column) -> &mut String {
        match column {
            Column::SerialNo => &mut self.serial_no,
            Column::Title => &mut self.title,
            Column::Authors => &mut self.authors,
            Column::Year => &mut self.year,
            Column::Publisher => &mut self.publisher,
            Column::Region => &mut self.region,
            Column::Type => &mut self.kind,
            Column::SdgTargets => &mut self.sdg_targets,
            Column::Summary => &mut self.summary,
            Column::Link => &mut self.link,
        }
    }

    /// All field values in header order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        Column::ALL.into_iter().map(move |c| self.get(c))
    }

    /// The comma-separated target list split into trimmed, non-empty tokens.
    pub fn sdg_targets(&self) -> impl Iterator<Item = &str> {
        split_targets(&self.sdg_targets)
    }
}

/// Split an `SDG Target(s)` cell on `,` and trim each token.
pub fn split_targets(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty())
}

// ---------------------------------------------------------------------------
// SdgDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded records with facet options computed once at construction.
///
/// Records are never mutated after loading; only derived views change.
#[derive(Debug, Clone)]
pub struct SdgDataset {
    /// Known columns in the order the source file listed them.
    pub columns: Vec<Column>,
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Filter options derived from `records`.
    pub facets: Facets,
    /// Number of records per `Type` label.
    pub type_counts: BTreeMap<String, usize>,
}

impl SdgDataset {
    /// Records with every column, in the standard header order.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::with_columns(Column::ALL.to_vec(), records)
    }

    /// Records read from a file whose header listed `columns`.
    pub fn with_columns(columns: Vec<Column>, records: Vec<Record>) -> Self {
        let facets = Facets::from_records(&records);
        let mut type_counts: BTreeMap<String, usize> = BTreeMap::new();
        for rec in &records {
            *type_counts.entry(rec.kind.clone()).or_default() += 1;
        }
        SdgDataset {
            columns,
            records,
            facets,
            type_counts,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(serial_no: &str, year: &str, region: &str, targets: &str) -> Record {
    Record {
        serial_no: serial_no.to_string(),
        title: format!("Initiative {serial_no}"),
        authors: "UNDP".to_string(),
        year: year.to_string(),
        publisher: "United Nations".to_string(),
        region: region.to_string(),
        kind: "Report".to_string(),
        sdg_targets: targets.to_string(),
        summary: format!("Summary of initiative {serial_no}"),
        link: format!("https://example.org/{serial_no}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_round_trip_through_from_header() {
        for col in Column::ALL {
            assert_eq!(Column::from_header(col.header()), Some(col));
        }
        assert_eq!(Column::from_header("title"), None);
    }

    #[test]
    fn values_follow_header_order() {
        let rec = record("7", "2022", "Global", "1.1, 1.2");
        let values: Vec<&str> = rec.values().collect();
        assert_eq!(values.len(), 10);
        assert_eq!(values[0], "7");
        assert_eq!(values[3], "2022");
        assert_eq!(values[9], "https://example.org/7");
    }

    #[test]
    fn target_tokens_are_trimmed_and_non_empty() {
        let rec = record("1", "2020", "", " 6.1 ,6.2,, 13.2 ");
        let targets: Vec<&str> = rec.sdg_targets().collect();
        assert_eq!(targets, vec!["6.1", "6.2", "13.2"]);
    }

    #[test]
    fn dataset_counts_types() {
        let mut b = record("2", "2021", "Africa", "4.1");
        b.kind = "Policy Brief".to_string();
        let ds = SdgDataset::from_records(vec![record("1", "2023", "Global", "1.1"), b]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.type_counts.get("Report"), Some(&1));
        assert_eq!(ds.type_counts.get("Policy Brief"), Some(&1));
        assert_eq!(ds.facets.years, vec!["2023", "2021"]);
    }
}
