use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::{Context, Result, bail};

use super::model::{Column, Record, SdgDataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the initiatives dataset from a `.csv` file.
pub fn load_file(path: &Path) -> Result<SdgDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if ext != "csv" {
        bail!("Unsupported file extension: .{ext}");
    }

    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    parse_csv(file).with_context(|| format!("parsing {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// CSV layout: header row with the column names of [`Column::ALL`], in any
/// order. Standard quoting applies (embedded commas, quotes and newlines).
///
/// * A missing column reads as empty text for every record; unknown columns
///   are ignored.
/// * Short rows are tolerated; absent cells read as empty text.
/// * Rows with an empty `S.N.` are dropped (trailing blank lines and the like).
///
/// The dataset remembers which known columns the header listed, and in what
/// order, so an export reproduces the file's layout.
pub fn parse_csv<R: Read>(input: R) -> Result<SdgDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    let mut positions: Vec<(Column, usize)> = Vec::new();
    for (pos, label) in headers.iter().enumerate() {
        match Column::from_header(label) {
            Some(col) if !positions.iter().any(|(c, _)| *c == col) => positions.push((col, pos)),
            Some(col) => log::warn!("CSV repeats the '{col}' column; using the first"),
            None => log::debug!("Ignoring unknown CSV column '{label}'"),
        }
    }
    for col in Column::ALL {
        if !positions.iter().any(|(c, _)| *c == col) {
            log::warn!("CSV has no '{col}' column; treating it as empty");
        }
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut record = Record::default();
        for &(col, pos) in &positions {
            *record.get_mut(col) = row.get(pos).unwrap_or("").to_string();
        }

        if record.serial_no.trim().is_empty() {
            dropped += 1;
            continue;
        }
        records.push(record);
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} CSV rows without a serial number");
    }
    let columns = positions.into_iter().map(|(col, _)| col).collect();
    Ok(SdgDataset::with_columns(columns, records))
}

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// A load running on a worker thread.
///
/// Dropping it discards the result once the worker finishes.
pub struct PendingLoad {
    pub path: PathBuf,
    rx: Receiver<Result<SdgDataset>>,
}

impl PendingLoad {
    /// Non-blocking check for the finished load.
    pub fn poll(&self) -> Option<Result<SdgDataset>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(anyhow::anyhow!(
                "loader thread for {} exited without a result",
                self.path.display()
            ))),
        }
    }
}

/// Start loading `path` without blocking the caller.
pub fn spawn_load(path: PathBuf) -> PendingLoad {
    let (tx, rx) = mpsc::channel();
    let worker_path = path.clone();
    thread::spawn(move || {
        // The receiver is gone when the view was torn down; nothing to do then.
        let _ = tx.send(load_file(&worker_path));
    });
    PendingLoad { path, rx }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;

    const HEADER: &str = "S.N.,Title,Author(s),Year,Source / Publisher,Region or Country Focus,Type,SDG Target(s),Summary,Link (URL)\n";

    #[test]
    fn parses_quoted_fields_in_file_order() {
        let csv = format!(
            "{HEADER}\
             1,\"Water, Sanitation\",\"Doe, J.\",2023,UN,\"Africa (Kenya, Uganda)\",Report,\"6.1, 6.2\",\"Says \"\"hi\"\"\nover two lines\",https://a.org\n\
             2,Energy,Smith,2021,IEA,Global,Policy Brief,7.1,Short,https://b.org\n"
        );
        let records = parse_csv(csv.as_bytes()).unwrap().records;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].serial_no, "1");
        assert_eq!(records[0].title, "Water, Sanitation");
        assert_eq!(records[0].authors, "Doe, J.");
        assert_eq!(records[0].region, "Africa (Kenya, Uganda)");
        assert_eq!(records[0].summary, "Says \"hi\"\nover two lines");
        assert_eq!(records[1].kind, "Policy Brief");
        assert_eq!(records[1].link, "https://b.org");
    }

    #[test]
    fn rows_without_serial_number_are_dropped() {
        let csv = format!(
            "{HEADER}\
             1,A,,2020,,,,,,\n\
             ,Orphan,,2020,,,,,,\n\
             \x20 ,Blank id,,2020,,,,,,\n\
             ,,,,,,,,,\n\
             \n\
             2,B,,2021,,,,,,\n"
        );
        let records = parse_csv(csv.as_bytes()).unwrap().records;
        let ids: Vec<&str> = records.iter().map(|r| r.serial_no.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn columns_are_matched_by_header_name() {
        let csv = "Year,S.N.,Title\n2022,9,Reordered\n";
        let records = parse_csv(csv.as_bytes()).unwrap().records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].serial_no, "9");
        assert_eq!(records[0].year, "2022");
        assert_eq!(records[0].title, "Reordered");
        assert_eq!(records[0].summary, "");
    }

    #[test]
    fn header_order_is_remembered() {
        let csv = "Year,Notes,S.N.,Title,S.N.\n2022,x,9,Reordered,10\n";
        let dataset = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(
            dataset.columns,
            vec![Column::Year, Column::SerialNo, Column::Title]
        );
        assert_eq!(dataset.records[0].serial_no, "9");
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let csv = format!("{HEADER}5,Only a title\n");
        let records = parse_csv(csv.as_bytes()).unwrap().records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Only a title");
        assert_eq!(records[0].link, "");
    }

    #[test]
    fn missing_serial_column_yields_nothing() {
        let csv = "Title,Year\nA,2020\n";
        assert!(parse_csv(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn load_file_rejects_other_extensions() {
        let err = load_file(Path::new("data/sdgs.json")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn load_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn spawn_load_delivers_the_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sdgs.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{HEADER}1,A,,2020,,Global,,,,\n2,B,,2021,,,,,,\n").unwrap();
        drop(file);

        let pending = spawn_load(path);
        let mut result = None;
        for _ in 0..500 {
            if let Some(r) = pending.poll() {
                result = Some(r);
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        let dataset = result.expect("load finished").unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.facets.years, vec!["2021", "2020"]);
        assert_eq!(dataset.facets.regions, vec!["Global"]);
    }
}
