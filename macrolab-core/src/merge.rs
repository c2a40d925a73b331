//! Date outer-join of multiple series into one wide table.
//!
//! Given N fetched series, build a table with one row per date in the
//! union of all observed dates and one column per series. A series with
//! no observation on a row's date gets `None` there, never zero and
//! never a carried-forward value.

use crate::series::Series;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// A date-keyed wide table: one row per date, one value column per series.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    /// Column headers, in the order the series were supplied.
    pub columns: Vec<String>,
    /// Rows sorted ascending by date. Every row has `columns.len()` values.
    pub rows: Vec<Row>,
}

/// One dated row of a [`MergedTable`]. `None` marks a missing observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

impl MergedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The dates of the first and last row, if any.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }

    /// The present (date, value) points of one column, for charting.
    pub fn column_points(&self, column: usize) -> Vec<(NaiveDate, f64)> {
        self.rows
            .iter()
            .filter_map(|row| {
                row.values
                    .get(column)
                    .and_then(|v| *v)
                    .map(|v| (row.date, v))
            })
            .collect()
    }

    /// Derive a new table with a percent-change column interleaved after
    /// each value column, headed `<name>-change`.
    ///
    /// The change on a row is measured against the column's most recent
    /// present value on an earlier row, so gaps are skipped rather than
    /// treated as zero. The first present value of a column has no
    /// baseline and gets `None`.
    pub fn with_percent_changes(&self) -> MergedTable {
        let mut columns = Vec::with_capacity(self.columns.len() * 2);
        for name in &self.columns {
            columns.push(name.clone());
            columns.push(format!("{name}-change"));
        }

        let mut last_seen: Vec<Option<f64>> = vec![None; self.columns.len()];
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut values = Vec::with_capacity(columns.len());
                for (col, value) in row.values.iter().enumerate() {
                    values.push(*value);
                    let change = match (*value, last_seen[col]) {
                        (Some(cur), Some(prev)) if prev != 0.0 => {
                            Some((cur - prev) / prev * 100.0)
                        }
                        _ => None,
                    };
                    values.push(change);
                    if value.is_some() {
                        last_seen[col] = *value;
                    }
                }
                Row {
                    date: row.date,
                    values,
                }
            })
            .collect();

        MergedTable { columns, rows }
    }
}

/// Outer-join series on date.
///
/// Row axis is the union of every date observed by any input series,
/// ascending. Column order follows input order. If a series reports the
/// same date twice, the later observation wins.
pub fn merge(series: &[Series]) -> MergedTable {
    // Union of all observed dates
    let mut all_dates = BTreeSet::new();
    for s in series {
        for obs in &s.observations {
            all_dates.insert(obs.date);
        }
    }

    // Per-series lookup: date → value
    let lookups: Vec<HashMap<NaiveDate, f64>> = series
        .iter()
        .map(|s| s.observations.iter().map(|o| (o.date, o.value)).collect())
        .collect();

    let columns: Vec<String> = series.iter().map(|s| s.id.clone()).collect();
    let rows: Vec<Row> = all_dates
        .into_iter()
        .map(|date| Row {
            date,
            values: lookups.iter().map(|m| m.get(&date).copied()).collect(),
        })
        .collect();

    MergedTable { columns, rows }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Observation;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(id: &str, points: &[(&str, f64)]) -> Series {
        Series::new(
            id,
            points
                .iter()
                .map(|(date, value)| Observation::new(d(date), *value))
                .collect(),
        )
    }

    #[test]
    fn identical_dates_yield_no_gaps() {
        let a = series("A", &[("2024-01-01", 1.0), ("2024-01-02", 2.0)]);
        let b = series("B", &[("2024-01-01", 10.0), ("2024-01-02", 20.0)]);

        let table = merge(&[a, b]);

        assert_eq!(table.columns, vec!["A", "B"]);
        assert_eq!(table.rows.len(), 2);
        for row in &table.rows {
            assert!(row.values.iter().all(|v| v.is_some()));
        }
    }

    #[test]
    fn disjoint_dates_yield_union_with_gaps() {
        let a = series("A", &[("2024-01-01", 1.0)]);
        let b = series("B", &[("2024-01-02", 2.0)]);

        let table = merge(&[a, b]);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].values, vec![Some(1.0), None]);
        assert_eq!(table.rows[1].values, vec![None, Some(2.0)]);
    }

    #[test]
    fn sparse_series_leaves_gap_in_middle() {
        // One series covers three days, the other skips the middle one.
        let full = series(
            "FULL",
            &[
                ("2024-01-01", 1.0),
                ("2024-01-02", 2.0),
                ("2024-01-03", 3.0),
            ],
        );
        let sparse = series("SPARSE", &[("2024-01-01", 10.0), ("2024-01-03", 30.0)]);

        let table = merge(&[full, sparse]);

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].date, d("2024-01-02"));
        assert_eq!(table.rows[1].values, vec![Some(2.0), None]);
        // Missing means absent, not zero.
        assert_ne!(table.rows[1].values[1], Some(0.0));
    }

    #[test]
    fn rows_sorted_even_from_unsorted_input() {
        let a = series(
            "A",
            &[("2024-03-01", 3.0), ("2024-01-01", 1.0), ("2024-02-01", 2.0)],
        );

        let table = merge(&[a]);

        let dates: Vec<NaiveDate> = table.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d("2024-01-01"), d("2024-02-01"), d("2024-03-01")]);
    }

    #[test]
    fn columns_follow_input_order() {
        let table = merge(&[
            series("Z", &[("2024-01-01", 1.0)]),
            series("A", &[("2024-01-01", 2.0)]),
            series("M", &[("2024-01-01", 3.0)]),
        ]);
        assert_eq!(table.columns, vec!["Z", "A", "M"]);
    }

    #[test]
    fn duplicate_dates_keep_the_later_observation() {
        let a = series("A", &[("2024-01-01", 1.0), ("2024-01-01", 9.0)]);
        let table = merge(&[a]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].values, vec![Some(9.0)]);
    }

    #[test]
    fn no_series_yields_empty_table() {
        let table = merge(&[]);
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
        assert_eq!(table.date_span(), None);
    }

    #[test]
    fn empty_series_contributes_column_but_no_rows() {
        let table = merge(&[series("A", &[])]);
        assert_eq!(table.columns, vec!["A"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn column_points_skips_gaps() {
        let table = merge(&[
            series("A", &[("2024-01-01", 1.0), ("2024-01-03", 3.0)]),
            series("B", &[("2024-01-02", 2.0)]),
        ]);
        let points = table.column_points(0);
        assert_eq!(points, vec![(d("2024-01-01"), 1.0), (d("2024-01-03"), 3.0)]);
    }

    #[test]
    fn percent_change_columns_interleave() {
        let table = merge(&[
            series("DJIA", &[("2024-01-01", 100.0)]),
            series("SP500", &[("2024-01-01", 50.0)]),
        ])
        .with_percent_changes();

        assert_eq!(
            table.columns,
            vec!["DJIA", "DJIA-change", "SP500", "SP500-change"]
        );
        assert_eq!(table.rows[0].values.len(), 4);
    }

    #[test]
    fn percent_change_first_value_has_no_baseline() {
        let table = merge(&[series("DJIA", &[("2024-01-01", 100.0), ("2024-01-02", 110.0)])])
            .with_percent_changes();

        assert_eq!(table.rows[0].values, vec![Some(100.0), None]);
        assert_eq!(table.rows[1].values[1], Some(10.0));
    }

    #[test]
    fn percent_change_skips_gaps_back_to_last_present_value() {
        // DJIA missing on the middle date: its change on day 3 is measured
        // against day 1, and the gap row carries no change at all.
        let table = merge(&[
            series("DJIA", &[("2024-01-01", 200.0), ("2024-01-03", 210.0)]),
            series("SP500", &[("2024-01-02", 1.0)]),
        ])
        .with_percent_changes();

        assert_eq!(table.rows[1].values[0], None);
        assert_eq!(table.rows[1].values[1], None);
        assert_eq!(table.rows[2].values[1], Some(5.0));
    }

    #[test]
    fn percent_change_zero_baseline_stays_empty() {
        let table = merge(&[series("X", &[("2024-01-01", 0.0), ("2024-01-02", 5.0)])])
            .with_percent_changes();
        assert_eq!(table.rows[1].values[1], None);
    }
}
