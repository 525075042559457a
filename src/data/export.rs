use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Column, Record};

/// Default file name offered when saving the filtered records.
pub const EXPORT_FILE_NAME: &str = "sdg_initiatives.csv";

/// Write `records` as CSV: a header row naming `columns`, then one row per
/// record with those fields in that order. Fields containing a delimiter,
/// quote or newline are quoted.
pub fn write_csv<'a, W, I>(columns: &[Column], records: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(columns.iter().map(|c| c.header()))
        .context("writing CSV header")?;
    for rec in records {
        wtr.write_record(columns.iter().map(|&c| rec.get(c)))
            .with_context(|| format!("writing record {}", rec.serial_no))?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Render `records` to an in-memory CSV string.
#[cfg(test)]
pub fn export_csv_string<'a, I>(columns: &[Column], records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buf = Vec::new();
    write_csv(columns, records, &mut buf)?;
    String::from_utf8(buf).context("CSV output is not UTF-8")
}

/// Write `records` to a file at `path`, replacing any existing file.
pub fn export_to_path<'a, I>(columns: &[Column], records: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a Record>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(columns, records, std::io::BufWriter::new(file))
        .with_context(|| format!("exporting to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::filter::{FilterState, filtered_indices};
    use crate::data::loader::parse_csv;
    use crate::data::model::{SdgDataset, record};

    #[test]
    fn header_is_written_even_without_records() {
        let out = export_csv_string(&Column::ALL, std::iter::empty()).unwrap();
        assert_eq!(
            out,
            "S.N.,Title,Author(s),Year,Source / Publisher,Region or Country Focus,Type,SDG Target(s),Summary,Link (URL)\n"
        );
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        let mut rec = record("1", "2023", "Africa (Kenya, Uganda)", "6.1, 6.2");
        rec.summary = "He said \"go\"\nthen left".to_string();
        let out = export_csv_string(&Column::ALL, [&rec]).unwrap();
        let row = out.split_once('\n').map(|(_, rest)| rest).unwrap();
        assert!(row.starts_with("1,Initiative 1,UNDP,2023,United Nations,\"Africa (Kenya, Uganda)\",Report,\"6.1, 6.2\","));
        assert!(row.contains("\"He said \"\"go\"\"\nthen left\""));
    }

    #[test]
    fn exported_filter_view_round_trips() {
        let ds = SdgDataset::from_records(vec![
            record("1", "2023", "Global", "1.1"),
            record("2", "2021", "Africa (Kenya; Ghana)", "4.1, 4.2"),
            record("3", "2023", "OECD", "4.2"),
        ]);
        let filter = FilterState {
            target: Some("4.2".to_string()),
            ..Default::default()
        };
        let view: Vec<&Record> = filtered_indices(&ds, &filter)
            .into_iter()
            .map(|i| &ds.records[i])
            .collect();

        let out = export_csv_string(&ds.columns, view.iter().copied()).unwrap();
        let parsed = parse_csv(out.as_bytes()).unwrap().records;
        let expected: Vec<Record> = view.into_iter().cloned().collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn loaded_column_order_is_kept_on_export() {
        let input = "Year,S.N.,Title\n2022,9,\"Reordered, twice\"\n2021,10,Plain\n";
        let ds = parse_csv(input.as_bytes()).unwrap();
        let out = export_csv_string(&ds.columns, &ds.records).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn export_to_path_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let rec = record("4", "2020", "Global", "");
        export_to_path(&Column::ALL, [&rec], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("https://example.org/4"));
    }

    fn arb_record() -> impl Strategy<Value = Record> {
        let text = "[ -~\n,\"é]{0,12}";
        (
            "[0-9]{1,3}[a-z]?",
            text,
            text,
            "(19|20)[0-9]{2}",
            proptest::collection::vec(text, 4),
            text,
        )
            .prop_map(|(serial_no, title, authors, year, rest, link)| Record {
                serial_no,
                title,
                authors,
                year,
                publisher: rest[0].clone(),
                region: rest[1].clone(),
                kind: rest[2].clone(),
                sdg_targets: rest[3].clone(),
                summary: "summary, with \"quotes\"".to_string(),
                link,
            })
    }

    proptest! {
        #[test]
        fn parse_after_export_is_identity(records in proptest::collection::vec(arb_record(), 0..8)) {
            let out = export_csv_string(&Column::ALL, &records).unwrap();
            let parsed = parse_csv(out.as_bytes()).unwrap().records;
            prop_assert_eq!(parsed, records);
        }
    }
}
