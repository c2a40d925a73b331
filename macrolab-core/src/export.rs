//! CSV export of a merged table.
//!
//! The table is rendered to a string first so a download or file write
//! only happens once the whole document encoded cleanly. Missing cells
//! become empty fields, never "0".

use std::path::Path;

use anyhow::{Context, Result};

use crate::merge::MergedTable;

/// Render a merged table as CSV with a leading `date` column.
///
/// Dates are ISO (YYYY-MM-DD); values keep their full precision.
pub fn to_csv(table: &MergedTable) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = Vec::with_capacity(table.columns.len() + 1);
    header.push("date".to_string());
    header.extend(table.columns.iter().cloned());
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(header.len());
        record.push(row.date.to_string());
        for value in &row.values {
            record.push(match value {
                Some(v) => v.to_string(),
                None => String::new(),
            });
        }
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Render a merged table and write it to `path` in one shot.
///
/// Nothing is written when encoding fails, so a failed export never
/// leaves a truncated file behind.
pub fn write_csv(table: &MergedTable, path: &Path) -> Result<()> {
    let csv = to_csv(table)?;
    std::fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;
    use crate::series::{Observation, Series};
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_table() -> MergedTable {
        merge(&[
            Series::new(
                "UNRATE",
                vec![
                    Observation::new(d("2024-01-01"), 3.7),
                    Observation::new(d("2024-02-01"), 3.9),
                ],
            ),
            Series::new("FEDFUNDS", vec![Observation::new(d("2024-02-01"), 5.33)]),
        ])
    }

    #[test]
    fn header_is_date_then_columns() {
        let csv = to_csv(&sample_table()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,UNRATE,FEDFUNDS"));
    }

    #[test]
    fn missing_cells_are_empty_not_zero() {
        let csv = to_csv(&sample_table()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "2024-01-01,3.7,");
        assert_eq!(lines[2], "2024-02-01,3.9,5.33");
    }

    #[test]
    fn exported_csv_parses_back_with_the_reader() {
        let csv = to_csv(&sample_table()).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());

        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers, vec!["date", "UNRATE", "FEDFUNDS"]);

        let records: Vec<csv::StringRecord> =
            rdr.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(0), Some("2024-01-01"));
        assert_eq!(records[0].get(1), Some("3.7"));
        // The gap survives the round trip as an empty field
        assert_eq!(records[0].get(2), Some(""));
        assert_eq!(records[1].get(2), Some("5.33"));
    }

    #[test]
    fn empty_table_is_just_a_header() {
        let table = merge(&[Series::new("UNRATE", vec![])]);
        let csv = to_csv(&table).unwrap();
        assert_eq!(csv.trim_end(), "date,UNRATE");
    }

    #[test]
    fn write_csv_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("econ_data.csv");

        write_csv(&sample_table(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("date,UNRATE,FEDFUNDS"));
        assert_eq!(contents.lines().count(), 3);
    }
}
